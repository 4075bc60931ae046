use std::io::Write;

use tracing::trace;

use crate::{
    adapters::Adapter,
    context::Context,
    error::{BindError, MarshalError},
    filter::NamespaceFilter,
    qname::QName,
    reader::ElementReader,
    writer::XmlWriter,
};

/// One schema complex type bound to a Rust struct.
///
/// Usually implemented through [`descriptor!`](crate::descriptor).
pub trait XmlNode: Default {
    const NAMESPACE: &'static str;
    /// Local name of the schema type, as used by `xsi:type`.
    const TYPE_NAME: &'static str;
    /// Other type names accepted in `xsi:type`, for types whose schema
    /// derives several named types from one content model.
    const TYPE_ALIASES: &'static [&'static str] = &[];
    /// Skip unknown child elements silently instead of reporting them.
    const LENIENT: bool = false;

    /// Reads attributes, then child elements, into `self`.
    fn read_fields(&mut self, reader: &ElementReader, context: &mut Context);

    /// Writes attributes, then child elements, in schema order.
    fn write_fields<W: Write>(
        &self,
        writer: &mut XmlWriter<W>,
        context: &mut Context,
    ) -> Result<(), BindError>;

    /// Whether this value may be written into a slot of this type. Closed
    /// families of variants report the mismatch themselves.
    fn admit(&self, _context: &mut Context) -> bool {
        true
    }

    fn accepts_type(name: &QName) -> bool {
        name.namespace() == Self::NAMESPACE
            && (name.local_name == Self::TYPE_NAME
                || Self::TYPE_ALIASES.iter().any(|alias| *alias == name.local_name))
    }
}

/// A node that can be the document element.
pub trait RootElement: XmlNode {
    const ELEMENT: &'static str;
    const FILTER: Option<&'static NamespaceFilter> = None;
}

/// Storage for one field: a scalar or a list.
pub trait Slot {
    type Item;
    const SCALAR: bool;

    /// Stores a value read from the document. `first` is true for the first
    /// value stored into this slot during the current read; lists drop any
    /// earlier content at that point.
    fn accept(&mut self, value: Self::Item, first: bool);

    /// Stores an `xsi:nil` element: scalars become empty, lists only drop
    /// earlier content.
    fn accept_nil(&mut self, first: bool);

    fn values(&self) -> &[Self::Item];

    /// Called once after the parent element has been read, if any value was
    /// accepted.
    fn finish(&mut self) -> Result<(), String> {
        Ok(())
    }
}

impl<T> Slot for Option<T> {
    type Item = T;
    const SCALAR: bool = true;

    fn accept(&mut self, value: T, _first: bool) {
        *self = Some(value);
    }

    fn accept_nil(&mut self, _first: bool) {
        *self = None;
    }

    fn values(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> Slot for Vec<T> {
    type Item = T;
    const SCALAR: bool = false;

    fn accept(&mut self, value: T, first: bool) {
        if first {
            self.clear();
        }
        self.push(value);
    }

    fn accept_nil(&mut self, first: bool) {
        if first {
            self.clear();
        }
    }

    fn values(&self) -> &[T] {
        self
    }
}

/// Reads a fresh node. `None` when the element is nil or has a foreign
/// `xsi:type`.
pub fn read_node<T: XmlNode>(reader: &ElementReader, context: &mut Context) -> Option<T> {
    let mut node = T::default();
    read_node_into(&mut node, reader, context).then_some(node)
}

/// Reads into an existing node, keeping whatever the element does not set.
/// Returns `false`, leaving `node` untouched, when the element is nil or has
/// a foreign `xsi:type`.
pub fn read_node_into<T: XmlNode>(
    node: &mut T,
    reader: &ElementReader,
    context: &mut Context,
) -> bool {
    if reader.is_nil() {
        trace!(node = T::TYPE_NAME, "nil");
        return false;
    }
    match reader.xsi_type() {
        Some(Ok(name)) if !T::accepts_type(&name) => {
            let expected = QName::from_table(T::NAMESPACE, T::TYPE_NAME);
            context.unexpected_xsi_type(reader, T::TYPE_NAME, name, expected);
            return false;
        }
        Some(Err(error)) => {
            let literal = reader.xsi_type_literal().unwrap_or_default();
            context.adapter_error(Some(reader), T::TYPE_NAME, "xsi:type", literal, &error);
            return false;
        }
        _ => {}
    }

    trace!(node = T::TYPE_NAME, "before read");
    node.read_fields(reader, context);
    trace!(node = T::TYPE_NAME, "after read");
    true
}

pub fn read_text<A: Adapter>(
    reader: &ElementReader,
    node: &'static str,
    context: &mut Context,
) -> Option<A::Value> {
    let raw = reader.text();
    match A::unmarshal(&raw, reader) {
        Ok(value) => Some(value),
        Err(error) => {
            context.adapter_error(Some(reader), node, A::NAME, &raw, &error);
            None
        }
    }
}

pub fn read_attribute<A: Adapter>(
    raw: &str,
    reader: &ElementReader,
    node: &'static str,
    context: &mut Context,
) -> Option<A::Value> {
    match A::unmarshal(raw, reader) {
        Ok(value) => Some(value),
        Err(error) => {
            context.adapter_error(Some(reader), node, A::NAME, raw, &error);
            None
        }
    }
}

/// Handles a child element that no field of `T` binds.
pub fn unknown_element<T: XmlNode>(
    child: &ElementReader,
    context: &mut Context,
    expected: &[&str],
) {
    if T::LENIENT {
        trace!(node = T::TYPE_NAME, element = %child.name(), "skipped element");
    } else {
        context.unexpected_element(child, T::TYPE_NAME, T::NAMESPACE, expected);
    }
}

pub fn write_node<T: XmlNode, W: Write>(
    writer: &mut XmlWriter<W>,
    namespace: &str,
    local_name: &str,
    value: &T,
    context: &mut Context,
) -> Result<(), BindError> {
    if !value.admit(context) {
        return Ok(());
    }
    trace!(node = T::TYPE_NAME, "before write");
    writer.start_element(namespace, local_name)?;
    value.write_fields(writer, context)?;
    writer.end_element()?;
    trace!(node = T::TYPE_NAME, "after write");
    Ok(())
}

/// Writes `value` as a text-only element. A value the adapter cannot write
/// here is recorded on `context` and the element is left out.
pub fn write_text<A: Adapter, W: Write>(
    writer: &mut XmlWriter<W>,
    namespace: &str,
    local_name: &str,
    value: &A::Value,
    node: &'static str,
    context: &mut Context,
) -> Result<(), BindError> {
    writer.start_element(namespace, local_name)?;
    match A::marshal(value, writer) {
        Ok(literal) => {
            writer.text(&literal)?;
            writer.end_element()
        }
        Err(MarshalError::Value { value, reason }) => {
            writer.discard_element()?;
            context.adapter_error(None, node, A::NAME, &value, &reason);
            Ok(())
        }
        Err(MarshalError::Write(error)) => Err(error),
    }
}

pub fn write_attribute<A: Adapter, W: Write>(
    writer: &mut XmlWriter<W>,
    namespace: &str,
    local_name: &str,
    value: &A::Value,
    node: &'static str,
    context: &mut Context,
) -> Result<(), BindError> {
    match A::marshal(value, writer) {
        Ok(literal) => writer.attribute(namespace, local_name, &literal),
        Err(MarshalError::Value { value, reason }) => {
            context.adapter_error(None, node, A::NAME, &value, &reason);
            Ok(())
        }
        Err(MarshalError::Write(error)) => Err(error),
    }
}

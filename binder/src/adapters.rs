//! Conversion rules between element/attribute text and field values.

use std::{borrow::Cow, io::Write, marker::PhantomData};

use dd_builtins::meta::{self, normalized_value, SimpleType, Whitespace};

use crate::{error::MarshalError, qname::QName, reader::ElementReader, writer::XmlWriter};

pub trait Adapter {
    type Value;

    /// Name used in diagnostics.
    const NAME: &'static str;

    fn unmarshal(raw: &str, reader: &ElementReader) -> Result<Self::Value, meta::Error>;

    fn marshal<'v, W: Write>(
        value: &'v Self::Value,
        writer: &mut XmlWriter<W>,
    ) -> Result<Cow<'v, str>, MarshalError>;
}

/// Whitespace-collapsed string, for tokens, names and class names.
pub struct Collapse;

impl Adapter for Collapse {
    type Value = String;
    const NAME: &'static str = "collapsed-string";

    fn unmarshal(raw: &str, _reader: &ElementReader) -> Result<String, meta::Error> {
        Ok(normalized_value(raw, Whitespace::Collapse).into_owned())
    }

    fn marshal<'v, W: Write>(
        value: &'v String,
        _writer: &mut XmlWriter<W>,
    ) -> Result<Cow<'v, str>, MarshalError> {
        Ok(Cow::Borrowed(value))
    }
}

/// Leading and trailing whitespace removed, inner whitespace kept.
pub struct Trim;

impl Adapter for Trim {
    type Value = String;
    const NAME: &'static str = "trimmed-string";

    fn unmarshal(raw: &str, _reader: &ElementReader) -> Result<String, meta::Error> {
        Ok(raw.trim_matches(meta::is_xml_whitespace).to_string())
    }

    fn marshal<'v, W: Write>(
        value: &'v String,
        _writer: &mut XmlWriter<W>,
    ) -> Result<Cow<'v, str>, MarshalError> {
        Ok(Cow::Borrowed(value))
    }
}

/// Text exactly as it appears in the document.
pub struct Verbatim;

impl Adapter for Verbatim {
    type Value = String;
    const NAME: &'static str = "string";

    fn unmarshal(raw: &str, _reader: &ElementReader) -> Result<String, meta::Error> {
        Ok(raw.to_string())
    }

    fn marshal<'v, W: Write>(
        value: &'v String,
        _writer: &mut XmlWriter<W>,
    ) -> Result<Cow<'v, str>, MarshalError> {
        Ok(Cow::Borrowed(value))
    }
}

/// `true` for exactly `"1"` or `"true"`, `false` for anything else.
pub struct Truth;

impl Adapter for Truth {
    type Value = bool;
    const NAME: &'static str = "boolean";

    fn unmarshal(raw: &str, _reader: &ElementReader) -> Result<bool, meta::Error> {
        Ok(raw == "1" || raw == "true")
    }

    fn marshal<'v, W: Write>(
        value: &'v bool,
        _writer: &mut XmlWriter<W>,
    ) -> Result<Cow<'v, str>, MarshalError> {
        Ok(value.to_literal())
    }
}

/// `true` for `"true"` in any letter case, `false` for anything else.
pub struct BooleanWord;

impl Adapter for BooleanWord {
    type Value = bool;
    const NAME: &'static str = "boolean-word";

    fn unmarshal(raw: &str, _reader: &ElementReader) -> Result<bool, meta::Error> {
        Ok(raw.eq_ignore_ascii_case("true"))
    }

    fn marshal<'v, W: Write>(
        value: &'v bool,
        _writer: &mut XmlWriter<W>,
    ) -> Result<Cow<'v, str>, MarshalError> {
        Ok(value.to_literal())
    }
}

/// Any [`SimpleType`]: integers and enumerated tokens.
pub struct Typed<T>(PhantomData<T>);

impl<T: SimpleType> Adapter for Typed<T> {
    type Value = T;
    const NAME: &'static str = "typed-value";

    fn unmarshal(raw: &str, _reader: &ElementReader) -> Result<T, meta::Error> {
        T::from_string(raw)
    }

    fn marshal<'v, W: Write>(
        value: &'v T,
        _writer: &mut XmlWriter<W>,
    ) -> Result<Cow<'v, str>, MarshalError> {
        Ok(value.to_literal())
    }
}

/// Integer fields.
pub type Int = Typed<i32>;
pub type Long = Typed<i64>;

/// `xs:QName`, resolved against the namespaces in scope on read and
/// declared on demand on write.
pub struct QualifiedName;

impl Adapter for QualifiedName {
    type Value = QName;
    const NAME: &'static str = "qname";

    fn unmarshal(raw: &str, reader: &ElementReader) -> Result<QName, meta::Error> {
        reader.resolve_qname(raw)
    }

    fn marshal<'v, W: Write>(
        value: &'v QName,
        writer: &mut XmlWriter<W>,
    ) -> Result<Cow<'v, str>, MarshalError> {
        writer.qualify(value).map(Cow::Owned)
    }
}

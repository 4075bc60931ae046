/// Declares a descriptor node: the struct, its `Default` and its
/// [`XmlNode`](crate::XmlNode) binding, from one field table.
///
/// ```
/// use dd_binder::{adapters::{Collapse, Truth}, descriptor, read_document, Context};
///
/// const NS: &str = "urn:example";
///
/// descriptor! {
///     pub struct Greeting: NS, "greetingType" {
///         attributes {
///             id: Option<String> = "id" => Collapse, xml_id;
///         }
///         elements {
///             text: Option<String> = "text" => text(Collapse), required;
///             loud: Option<bool> = "loud" => text(Truth);
///         }
///     }
/// }
///
/// impl dd_binder::RootElement for Greeting {
///     const ELEMENT: &'static str = "greeting";
/// }
///
/// let mut context = Context::new();
/// let greeting: Greeting = read_document(
///     r#"<greeting xmlns="urn:example"><text> hi  there </text></greeting>"#,
///     &Default::default(),
///     &mut context,
/// )
/// .unwrap()
/// .unwrap();
/// assert_eq!(greeting.text.as_deref(), Some("hi there"));
/// assert!(!context.has_diagnostics());
/// ```
///
/// Element fields are either `text(Adapter)`, converted with an
/// [`Adapter`](crate::adapters::Adapter), or `node`, read as the nested
/// [`XmlNode`](crate::XmlNode) named by the slot's item type; a `node`
/// element marked `xsi:nil` empties a scalar slot. Flags:
/// `required` (scalars only) and `xml_id` (attributes only). Adding
/// `lenient` after the type name skips unknown child elements silently.
#[macro_export]
macro_rules! descriptor {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident : $namespace:expr, $type_name:literal $(, $policy:ident)? {
            attributes {
                $(
                    $(#[$attribute_meta:meta])*
                    $attribute:ident : $attribute_slot:ty = $attribute_key:tt
                        => $attribute_adapter:ty $(, $attribute_flag:ident)* ;
                )*
            }
            elements {
                $(
                    $(#[$element_meta:meta])*
                    $element:ident : $element_slot:ty = $element_name:literal
                        => $kind:ident $(($adapter:ty))? $(, $element_flag:ident)* ;
                )*
            }
            $( defaults { $( $default_field:ident : $default:expr ),* $(,)? } )?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq)]
        $vis struct $name {
            $( $(#[$attribute_meta])* pub $attribute: $attribute_slot, )*
            $( $(#[$element_meta])* pub $element: $element_slot, )*
        }

        impl ::std::default::Default for $name {
            fn default() -> Self {
                #[allow(unused_mut)]
                let mut node = Self {
                    $( $attribute: ::std::default::Default::default(), )*
                    $( $element: ::std::default::Default::default(), )*
                };
                $( $( node.$default_field = $default; )* )?
                node
            }
        }

        impl $crate::XmlNode for $name {
            const NAMESPACE: &'static str = $namespace;
            const TYPE_NAME: &'static str = $type_name;
            const LENIENT: bool = $crate::__descriptor_lenient!($($policy)?);

            fn read_fields(
                &mut self,
                reader: &$crate::ElementReader<'_, '_>,
                context: &mut $crate::Context,
            ) {
                for attribute in reader.attributes() {
                    #[allow(unused_variables)]
                    let name = (attribute.namespace().unwrap_or(""), attribute.name());
                    if name.0 == $crate::XSI_NAMESPACE {
                        continue;
                    }
                    $(
                        if name == (
                            $crate::__attribute_namespace!($attribute_key),
                            $crate::__attribute_name!($attribute_key),
                        ) {
                            if let Some(value) = $crate::read_attribute::<$attribute_adapter>(
                                attribute.value(),
                                reader,
                                Self::TYPE_NAME,
                                context,
                            ) {
                                if $crate::__has_flag!(xml_id; $($attribute_flag)*) {
                                    context.add_xml_id(reader, Self::TYPE_NAME, attribute.value());
                                }
                                $crate::Slot::accept(&mut self.$attribute, value, true);
                            }
                            continue;
                        }
                    )*
                    context.unexpected_attribute(
                        reader,
                        Self::TYPE_NAME,
                        &attribute,
                        &[$(
                            (
                                $crate::__attribute_namespace!($attribute_key),
                                $crate::__attribute_name!($attribute_key),
                            )
                        ),*],
                    );
                }

                $( let mut $element = false; )*
                for child in reader.children() {
                    $(
                        if child.is_named(Self::NAMESPACE, $element_name) {
                            if $crate::__nillable!($kind) && child.is_nil() {
                                $crate::Slot::accept_nil(&mut self.$element, !$element);
                                $element = true;
                            } else if let Some(value) = $crate::__read_value!(
                                $kind $(($adapter))?; $element_slot;
                                &child, Self::TYPE_NAME, context
                            ) {
                                $crate::Slot::accept(&mut self.$element, value, !$element);
                                $element = true;
                            }
                            continue;
                        }
                    )*
                    $crate::unknown_element::<Self>(&child, context, &[$($element_name),*]);
                }
                $(
                    if $element {
                        if let Err(reason) = $crate::Slot::finish(&mut self.$element) {
                            let field = stringify!($element);
                            context.setter_error(reader, Self::TYPE_NAME, field, reason);
                        }
                    }
                )*
            }

            fn write_fields<W: ::std::io::Write>(
                &self,
                writer: &mut $crate::XmlWriter<W>,
                context: &mut $crate::Context,
            ) -> ::std::result::Result<(), $crate::BindError> {
                let _ = &context;
                $(
                    let values = $crate::Slot::values(&self.$attribute);
                    if values.is_empty()
                        && <$attribute_slot as $crate::Slot>::SCALAR
                        && $crate::__has_flag!(required; $($attribute_flag)*)
                    {
                        context.missing_required_value(Self::TYPE_NAME, stringify!($attribute));
                    }
                    for value in values {
                        $crate::write_attribute::<$attribute_adapter, W>(
                            writer,
                            $crate::__attribute_namespace!($attribute_key),
                            $crate::__attribute_name!($attribute_key),
                            value,
                            Self::TYPE_NAME,
                            context,
                        )?;
                    }
                )*
                $(
                    let values = $crate::Slot::values(&self.$element);
                    if values.is_empty()
                        && <$element_slot as $crate::Slot>::SCALAR
                        && $crate::__has_flag!(required; $($element_flag)*)
                    {
                        context.missing_required_value(Self::TYPE_NAME, stringify!($element));
                    }
                    for value in values {
                        $crate::__write_value!(
                            $kind $(($adapter))?;
                            writer, Self::NAMESPACE, $element_name, value, Self::TYPE_NAME, context
                        )?;
                    }
                )*
                Ok(())
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __descriptor_lenient {
    () => {
        false
    };
    (lenient) => {
        true
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __has_flag {
    ($flag:ident;) => {
        false
    };
    (required; required $($rest:ident)*) => {
        true
    };
    (xml_id; xml_id $($rest:ident)*) => {
        true
    };
    ($flag:ident; $other:ident $($rest:ident)*) => {
        $crate::__has_flag!($flag; $($rest)*)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __attribute_namespace {
    (($namespace:expr, $local_name:literal)) => {
        $namespace
    };
    ($local_name:literal) => {
        ""
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __attribute_name {
    (($namespace:expr, $local_name:literal)) => {
        $local_name
    };
    ($local_name:literal) => {
        $local_name
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __read_value {
    (text($adapter:ty); $slot:ty; $reader:expr, $node:expr, $context:expr) => {
        $crate::read_text::<$adapter>($reader, $node, $context)
    };
    (node; $slot:ty; $reader:expr, $node:expr, $context:expr) => {
        $crate::read_node::< <$slot as $crate::Slot>::Item >($reader, $context)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __write_value {
    (
        text($adapter:ty);
        $writer:expr, $namespace:expr, $local_name:expr, $value:expr, $node:expr, $context:expr
    ) => {
        $crate::write_text::<$adapter, _>($writer, $namespace, $local_name, $value, $node, $context)
    };
    (
        node;
        $writer:expr, $namespace:expr, $local_name:expr, $value:expr, $node:expr, $context:expr
    ) => {
        $crate::write_node($writer, $namespace, $local_name, $value, $context)
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __nillable {
    (text) => {
        false
    };
    (node) => {
        true
    };
}

use std::{borrow::Cow, fmt};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    ValueNotInEnumeration(String),
    InvalidLexicalValue {
        type_name: &'static str,
        value: String,
    },
    NamePrefixNotResolved(String),
    /// An unqualified name where only a default namespace could express it.
    NamespaceNotDeclarable(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Self::ValueNotInEnumeration(ref value) => {
                write!(f, "Value {value:?} is not in enumeration")
            }
            Self::InvalidLexicalValue {
                type_name,
                ref value,
            } => write!(f, "Value {value:?} is not a valid {type_name}"),
            Self::NamePrefixNotResolved(ref prefix) => {
                write!(f, "Failed to resolve prefix {prefix:?} to a namespace URI")
            }
            Self::NamespaceNotDeclarable(ref name) => write!(
                f,
                "Name {name:?} has no namespace but a default namespace is in scope"
            ),
        }
    }
}

impl std::error::Error for Error {}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Whitespace {
    Preserve,
    Replace,
    Collapse,
}

/// The whitespace characters of XML 1.0 (`S` production). Unlike
/// [`char::is_whitespace`] this does not include form feed or Unicode spaces.
pub fn is_xml_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

pub fn normalized_value(value: &str, whitespace: Whitespace) -> Cow<str> {
    match whitespace {
        Whitespace::Preserve => Cow::Borrowed(value),
        Whitespace::Replace => {
            if value.contains(['\t', '\n', '\r']) {
                Cow::Owned(value.replace(['\t', '\n', '\r'], " "))
            } else {
                Cow::Borrowed(value)
            }
        }
        Whitespace::Collapse => {
            let mut collapsed = String::with_capacity(value.len());
            for token in value.split(is_xml_whitespace).filter(|t| !t.is_empty()) {
                if !collapsed.is_empty() {
                    collapsed.push(' ');
                }
                collapsed.push_str(token);
            }
            if collapsed == value {
                Cow::Borrowed(value)
            } else {
                Cow::Owned(collapsed)
            }
        }
    }
}

/// A type with a lexical mapping from (and back to) XML character data.
pub trait SimpleType: Sized {
    const FACET_WHITE_SPACE: Option<Whitespace>;

    /// Parses an already whitespace-normalized literal.
    fn from_literal(normalized: &str) -> Result<Self, Error>;

    /// The canonical literal of this value.
    fn to_literal(&self) -> Cow<'_, str>;

    fn from_string(value: &str) -> Result<Self, Error> {
        match Self::FACET_WHITE_SPACE {
            Some(whitespace) => Self::from_literal(&normalized_value(value, whitespace)),
            None => Self::from_literal(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapse_joins_runs_of_xml_whitespace() {
        assert_eq!(
            normalized_value("  a\t\tb \r\n c  ", Whitespace::Collapse),
            "a b c"
        );
    }

    #[test]
    fn collapse_keeps_non_xml_whitespace() {
        // U+00A0 is not an XML whitespace character
        assert_eq!(
            normalized_value("\u{a0}a\u{a0}", Whitespace::Collapse),
            "\u{a0}a\u{a0}"
        );
    }

    #[test]
    fn collapse_borrows_when_unchanged() {
        assert!(matches!(
            normalized_value("already collapsed", Whitespace::Collapse),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn replace_maps_each_character_to_a_space() {
        assert_eq!(normalized_value("a\n\tb", Whitespace::Replace), "a  b");
    }
}

pub mod meta;

use std::borrow::Cow;

use lazy_static::lazy_static;
use meta::{Error, SimpleType, Whitespace};
use regex::Regex;

lazy_static! {
    // Pt. 2, 3.4.13.1 Lexical Mapping of integer
    static ref INTEGER: Regex = Regex::new(r"^[\-+]?[0-9]+$").unwrap();
}

impl SimpleType for String {
    const FACET_WHITE_SPACE: Option<Whitespace> = Some(Whitespace::Preserve);

    fn from_literal(normalized: &str) -> Result<Self, Error> {
        Ok(normalized.to_string())
    }

    fn to_literal(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

/// `xs:boolean`: `true`, `false`, `1` or `0`.
impl SimpleType for bool {
    const FACET_WHITE_SPACE: Option<Whitespace> = Some(Whitespace::Collapse);

    fn from_literal(normalized: &str) -> Result<Self, Error> {
        match normalized {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(Error::InvalidLexicalValue {
                type_name: "boolean",
                value: normalized.to_string(),
            }),
        }
    }

    fn to_literal(&self) -> Cow<'_, str> {
        Cow::Borrowed(if *self { "true" } else { "false" })
    }
}

macro_rules! impl_integer {
    ($($ty:ty => $type_name:literal),* $(,)?) => {
        $(
            impl SimpleType for $ty {
                const FACET_WHITE_SPACE: Option<Whitespace> = Some(Whitespace::Collapse);

                fn from_literal(normalized: &str) -> Result<Self, Error> {
                    let invalid = || Error::InvalidLexicalValue {
                        type_name: $type_name,
                        value: normalized.to_string(),
                    };
                    if !INTEGER.is_match(normalized) {
                        return Err(invalid());
                    }
                    // out of range for the target type
                    normalized.parse().map_err(|_| invalid())
                }

                fn to_literal(&self) -> Cow<'_, str> {
                    Cow::Owned(self.to_string())
                }
            }
        )*
    };
}

impl_integer!(i32 => "int", i64 => "long", u32 => "unsignedInt", u64 => "unsignedLong");

/// `xs:token`: a string with whitespace collapsed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Token(pub String);

impl SimpleType for Token {
    const FACET_WHITE_SPACE: Option<Whitespace> = Some(Whitespace::Collapse);

    fn from_literal(normalized: &str) -> Result<Self, Error> {
        Ok(Self(normalized.to_string()))
    }

    fn to_literal(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.0)
    }
}

/// Declares a string enumeration, i.e. an `xs:token` restricted by
/// `xs:enumeration` facets.
///
/// ```
/// dd_builtins::enumeration! {
///     pub enum Lock {
///         Read = "Read",
///         Write = "Write",
///     }
/// }
///
/// use dd_builtins::meta::SimpleType;
/// assert_eq!(Lock::from_string(" Write ").unwrap(), Lock::Write);
/// ```
#[macro_export]
macro_rules! enumeration {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$variant_meta:meta])* $variant:ident = $literal:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, PartialEq, Eq, Copy, Clone, Hash)]
        $vis enum $name {
            $( $(#[$variant_meta])* $variant ),+
        }

        impl $name {
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $literal ),+
                }
            }
        }

        impl $crate::meta::SimpleType for $name {
            const FACET_WHITE_SPACE: Option<$crate::meta::Whitespace> =
                Some($crate::meta::Whitespace::Collapse);

            fn from_literal(normalized: &str) -> Result<Self, $crate::meta::Error> {
                match normalized {
                    $( $literal => Ok(Self::$variant), )+
                    _ => Err($crate::meta::Error::ValueNotInEnumeration(normalized.to_string())),
                }
            }

            fn to_literal(&self) -> ::std::borrow::Cow<'_, str> {
                ::std::borrow::Cow::Borrowed(self.as_str())
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::meta::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <Self as $crate::meta::SimpleType>::from_string(s)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    enumeration! {
        enum Scope {
            Nested = "NESTED",
            AtBegin = "AT_BEGIN",
        }
    }

    #[test]
    fn booleans_accept_both_lexical_forms() {
        assert_eq!(bool::from_string(" 1 "), Ok(true));
        assert_eq!(bool::from_string("false"), Ok(false));
        assert!(bool::from_string("yes").is_err());
    }

    #[test]
    fn integers_collapse_before_parsing() {
        assert_eq!(i32::from_string("\n  42\t"), Ok(42));
        assert_eq!(i64::from_string("+7"), Ok(7));
        assert_eq!(i32::from_string("-3"), Ok(-3));
    }

    #[test]
    fn integers_reject_other_lexical_forms() {
        assert!(i32::from_string("4 2").is_err());
        assert!(i32::from_string("0x10").is_err());
        assert!(i32::from_string("99999999999").is_err());
        assert!(u32::from_string("-1").is_err());
    }

    #[test]
    fn enumerations_match_exact_tokens() {
        assert_eq!(Scope::from_string(" AT_BEGIN "), Ok(Scope::AtBegin));
        assert_eq!(
            Scope::from_string("nested"),
            Err(Error::ValueNotInEnumeration("nested".into()))
        );
        assert_eq!(Scope::Nested.to_string(), "NESTED");
        assert_eq!("NESTED".parse::<Scope>(), Ok(Scope::Nested));
    }
}

use std::fmt;

use crate::qname::QName;

/// 1-based line and column of an element in the input document.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiagnosticKind {
    UnexpectedElement {
        found: QName,
        expected: Vec<QName>,
    },
    UnexpectedAttribute {
        found: QName,
        expected: Vec<QName>,
    },
    /// A polymorphic slot was handed a variant it does not admit.
    UnexpectedSubclass {
        found: String,
        expected: Vec<&'static str>,
    },
    UnexpectedXsiType {
        found: QName,
        expected: QName,
    },
    AdapterConversion {
        adapter: &'static str,
        value: String,
        reason: String,
    },
    MissingRequiredValue {
        field: &'static str,
    },
    Setter {
        field: &'static str,
        reason: String,
    },
    DuplicateId {
        id: String,
    },
}

impl DiagnosticKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::UnexpectedElement { .. } => "unexpected-element",
            Self::UnexpectedAttribute { .. } => "unexpected-attribute",
            Self::UnexpectedSubclass { .. } => "unexpected-subclass",
            Self::UnexpectedXsiType { .. } => "unexpected-xsi-type",
            Self::AdapterConversion { .. } => "adapter-conversion",
            Self::MissingRequiredValue { .. } => "missing-required-value",
            Self::Setter { .. } => "setter",
            Self::DuplicateId { .. } => "duplicate-id",
        }
    }
}

fn write_names<T: fmt::Display>(f: &mut fmt::Formatter<'_>, names: &[T]) -> fmt::Result {
    if names.is_empty() {
        return f.write_str("nothing");
    }
    for (i, name) in names.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{name}")?;
    }
    Ok(())
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedElement { found, expected } => {
                write!(f, "unexpected element {found}, expected ")?;
                write_names(f, expected)
            }
            Self::UnexpectedAttribute { found, expected } => {
                write!(f, "unexpected attribute {found}, expected ")?;
                write_names(f, expected)
            }
            Self::UnexpectedSubclass { found, expected } => {
                write!(f, "unexpected variant {found}, expected ")?;
                write_names(f, expected)
            }
            Self::UnexpectedXsiType { found, expected } => {
                write!(f, "unexpected xsi:type {found}, expected {expected}")
            }
            Self::AdapterConversion {
                adapter,
                value,
                reason,
            } => write!(f, "{adapter} could not convert {value:?}: {reason}"),
            Self::MissingRequiredValue { field } => {
                write!(f, "required field {field} has no value")
            }
            Self::Setter { field, reason } => write!(f, "could not set {field}: {reason}"),
            Self::DuplicateId { id } => write!(f, "id {id:?} is already in use"),
        }
    }
}

/// A non-fatal problem found while reading or writing one node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Schema type name of the node being processed.
    pub node: &'static str,
    /// Where in the input the problem was found; `None` when writing.
    pub position: Option<Position>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(position) = self.position {
            write!(f, "{position}: ")?;
        }
        write!(f, "{}: {} (in {})", self.kind.name(), self.kind, self.node)
    }
}

use std::fmt;

use dd_builtins::meta;
use thiserror::Error;

/// Failures that prevent a document from being read or written at all.
///
/// Problems with individual nodes are never reported this way; they are
/// recorded as [`Diagnostic`](crate::Diagnostic)s on the
/// [`Context`](crate::Context) and processing continues.
#[derive(Debug, Error)]
pub enum BindError {
    #[error("the document is not well-formed XML: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("failed to write XML: {0}")]
    Write(String),
    #[error("{0} diagnostic(s) recorded")]
    Diagnostics(usize),
    #[error("unsupported root element {0:?}")]
    UnknownRoot(String),
}

/// Why one value could not be turned into its literal.
#[derive(Debug, Error)]
pub enum MarshalError {
    /// The value has no literal here; the caller leaves it out and records
    /// a diagnostic.
    #[error("{value} cannot be written: {reason}")]
    Value { value: String, reason: meta::Error },
    #[error(transparent)]
    Write(#[from] BindError),
}

impl BindError {
    pub(crate) fn write(error: impl fmt::Display) -> Self {
        Self::Write(error.to_string())
    }
}

use crate::{filter::NamespaceFilter, reader::Scope};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NamespacePolicy {
    /// Read every namespace generation of a descriptor as the canonical one.
    Normalize,
    /// Only elements in the canonical namespace are bound.
    Strict,
}

#[derive(Clone, Debug)]
pub struct ReadOptions {
    /// Allow a XML Document Type Definition (DTD) to occur
    pub allow_dtd: bool,
    pub namespaces: NamespacePolicy,
    /// Rename legacy element names, where the root type declares any.
    pub legacy_names: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            allow_dtd: false,
            namespaces: NamespacePolicy::Normalize,
            legacy_names: true,
        }
    }
}

impl ReadOptions {
    pub(crate) fn parsing_options(&self) -> roxmltree::ParsingOptions {
        roxmltree::ParsingOptions {
            allow_dtd: self.allow_dtd,
            ..Default::default()
        }
    }

    pub(crate) fn scope(&self, filter: Option<&'static NamespaceFilter>) -> Scope {
        match self.namespaces {
            NamespacePolicy::Normalize => Scope::new(filter, self.legacy_names),
            NamespacePolicy::Strict => Scope::default(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct WriteOptions {
    /// Indentation width; `None` writes everything on one line.
    pub indent: Option<usize>,
    /// Emit the `<?xml ...?>` declaration.
    pub declaration: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            indent: Some(2),
            declaration: true,
        }
    }
}

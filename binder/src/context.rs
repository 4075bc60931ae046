use std::collections::{hash_map::Entry, HashMap};

use dd_builtins::meta::{self, normalized_value, Whitespace};
use roxmltree::Attribute;
use tracing::debug;

use crate::{
    diagnostic::{Diagnostic, DiagnosticKind, Position},
    error::BindError,
    qname::QName,
    reader::ElementReader,
};

/// Collects diagnostics and tracks `id` uniqueness across every node read or
/// written through it.
///
/// One context is normally used per document, but several documents may
/// share one to get a single diagnostics trail and id table.
#[derive(Debug, Default)]
pub struct Context {
    diagnostics: Vec<Diagnostic>,
    xml_ids: HashMap<String, &'static str>,
    public_ids: Vec<String>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// For callers that treat any diagnostic as fatal.
    pub fn ensure_clean(&self) -> Result<(), BindError> {
        if self.diagnostics.is_empty() {
            Ok(())
        } else {
            Err(BindError::Diagnostics(self.diagnostics.len()))
        }
    }

    /// Public identifiers of the DTDs the documents read so far declared.
    pub fn public_ids(&self) -> &[String] {
        &self.public_ids
    }

    pub(crate) fn add_public_id(&mut self, public_id: &str) {
        debug!(public_id, "document type declaration");
        self.public_ids.push(public_id.to_string());
    }

    pub fn is_xml_id_registered(&self, id: &str) -> bool {
        self.xml_ids.contains_key(id)
    }

    fn record(&mut self, node: &'static str, position: Option<Position>, kind: DiagnosticKind) {
        let diagnostic = Diagnostic {
            kind,
            node,
            position,
        };
        debug!(%diagnostic, "recorded diagnostic");
        self.diagnostics.push(diagnostic);
    }

    pub fn unexpected_element(
        &mut self,
        reader: &ElementReader,
        node: &'static str,
        namespace: &str,
        expected: &[&str],
    ) {
        let kind = DiagnosticKind::UnexpectedElement {
            found: reader.name(),
            expected: expected
                .iter()
                .map(|local_name| QName::from_table(namespace, local_name))
                .collect(),
        };
        self.record(node, Some(reader.position()), kind);
    }

    pub fn unexpected_attribute(
        &mut self,
        reader: &ElementReader,
        node: &'static str,
        attribute: &Attribute,
        expected: &[(&str, &str)],
    ) {
        let kind = DiagnosticKind::UnexpectedAttribute {
            found: QName::with_optional_namespace(attribute.namespace(), attribute.name()),
            expected: expected
                .iter()
                .map(|(namespace, local_name)| QName::from_table(namespace, local_name))
                .collect(),
        };
        self.record(node, Some(reader.position()), kind);
    }

    pub fn unexpected_xsi_type(
        &mut self,
        reader: &ElementReader,
        node: &'static str,
        found: QName,
        expected: QName,
    ) {
        let kind = DiagnosticKind::UnexpectedXsiType { found, expected };
        self.record(node, Some(reader.position()), kind);
    }

    pub fn unexpected_subclass(
        &mut self,
        node: &'static str,
        found: impl Into<String>,
        expected: &[&'static str],
    ) {
        let kind = DiagnosticKind::UnexpectedSubclass {
            found: found.into(),
            expected: expected.to_vec(),
        };
        self.record(node, None, kind);
    }

    pub fn adapter_error(
        &mut self,
        reader: Option<&ElementReader>,
        node: &'static str,
        adapter: &'static str,
        value: &str,
        error: &meta::Error,
    ) {
        let kind = DiagnosticKind::AdapterConversion {
            adapter,
            value: value.to_string(),
            reason: error.to_string(),
        };
        self.record(node, reader.map(ElementReader::position), kind);
    }

    pub fn missing_required_value(&mut self, node: &'static str, field: &'static str) {
        self.record(node, None, DiagnosticKind::MissingRequiredValue { field });
    }

    pub fn setter_error(
        &mut self,
        reader: &ElementReader,
        node: &'static str,
        field: &'static str,
        reason: String,
    ) {
        let kind = DiagnosticKind::Setter { field, reason };
        self.record(node, Some(reader.position()), kind);
    }

    /// Registers the value of an `xs:ID` attribute.
    pub fn add_xml_id(&mut self, reader: &ElementReader, node: &'static str, id: &str) {
        let id = normalized_value(id, Whitespace::Collapse);
        match self.xml_ids.entry(id.to_string()) {
            Entry::Vacant(entry) => {
                entry.insert(node);
            }
            Entry::Occupied(_) => {
                let kind = DiagnosticKind::DuplicateId { id: id.into_owned() };
                self.record(node, Some(reader.position()), kind);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::Scope;

    #[test]
    fn duplicate_ids_are_reported_once_per_repeat() {
        let doc = roxmltree::Document::parse(r#"<a><b id="x"/><c id=" x "/></a>"#).unwrap();
        let root = ElementReader::new(doc.root_element(), Scope::default());
        let mut context = Context::new();

        for child in root.children() {
            let id = child.attribute("", "id").unwrap();
            context.add_xml_id(&child, "bType", id);
        }

        assert!(context.is_xml_id_registered("x"));
        assert_eq!(context.diagnostics().len(), 1);
        assert_eq!(
            context.diagnostics()[0].kind,
            DiagnosticKind::DuplicateId { id: "x".into() }
        );
        assert_eq!(
            context.diagnostics()[0].position,
            Some(Position { line: 1, column: 15 })
        );
    }

    #[test]
    fn ensure_clean_counts_diagnostics() {
        let mut context = Context::new();
        assert!(context.ensure_clean().is_ok());
        context.missing_required_value("servletType", "servlet_name");
        assert!(matches!(
            context.ensure_clean(),
            Err(BindError::Diagnostics(1))
        ));
        assert_eq!(context.take_diagnostics().len(), 1);
        assert!(!context.has_diagnostics());
    }
}

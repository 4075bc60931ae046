use roxmltree::Document;
use tracing::debug;

use crate::{
    context::Context,
    error::BindError,
    filter::doctype_public_id,
    node::{read_node, write_node, RootElement},
    options::{ReadOptions, WriteOptions},
    reader::ElementReader,
    writer::XmlWriter,
};

/// Parses `xml`, recording the public identifier of its DTD in `context`.
pub fn parse_document<'input>(
    xml: &'input str,
    options: &ReadOptions,
    context: &mut Context,
) -> Result<Document<'input>, BindError> {
    let document = Document::parse_with_options(xml, options.parsing_options())?;
    if let Some(public_id) = doctype_public_id(xml) {
        context.add_public_id(public_id);
    }
    Ok(document)
}

/// Binds the document element as `T`. A document element with another name
/// is reported and yields `None`, as does a nil one.
pub fn read_root<T: RootElement>(
    document: &Document,
    options: &ReadOptions,
    context: &mut Context,
) -> Option<T> {
    let reader = ElementReader::new(document.root_element(), options.scope(T::FILTER));
    if !reader.is_named(T::NAMESPACE, T::ELEMENT) {
        debug!(found = %reader.name(), expected = T::ELEMENT, "document element mismatch");
        context.unexpected_element(&reader, T::TYPE_NAME, T::NAMESPACE, &[T::ELEMENT]);
        return None;
    }
    read_node(&reader, context)
}

pub fn read_document<T: RootElement>(
    xml: &str,
    options: &ReadOptions,
    context: &mut Context,
) -> Result<Option<T>, BindError> {
    let document = parse_document(xml, options, context)?;
    Ok(read_root(&document, options, context))
}

/// Serializes `root` as a complete document. Diagnostics raised on the way,
/// such as missing required values, go to `context`; the affected elements
/// are left out.
pub fn write_document<T: RootElement>(
    root: &T,
    options: &WriteOptions,
    context: &mut Context,
) -> Result<String, BindError> {
    let mut writer = XmlWriter::new(Vec::new(), options);
    if options.declaration {
        writer.declaration()?;
    }
    write_node(&mut writer, T::NAMESPACE, T::ELEMENT, root, context)?;
    let bytes = writer.finish()?;
    String::from_utf8(bytes).map_err(BindError::write)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{adapters::Collapse, diagnostic::DiagnosticKind, filter::NamespaceFilter};

    static FILTER: NamespaceFilter = NamespaceFilter {
        target: "urn:notes",
        sources: &["urn:notes:1"],
        unqualified: true,
        renames: &[],
    };

    crate::descriptor! {
        struct Note: "urn:notes", "noteType" {
            attributes {}
            elements {
                body: Option<String> = "body" => text(Collapse), required;
            }
        }
    }

    impl RootElement for Note {
        const ELEMENT: &'static str = "note";
        const FILTER: Option<&'static NamespaceFilter> = Some(&FILTER);
    }

    #[test]
    fn wrong_document_element_is_reported() {
        let mut context = Context::new();
        let note: Option<Note> =
            read_document(r#"<memo xmlns="urn:notes"/>"#, &ReadOptions::default(), &mut context)
                .unwrap();
        assert_eq!(note, None);
        assert!(matches!(
            context.diagnostics()[0].kind,
            DiagnosticKind::UnexpectedElement { .. }
        ));
    }

    #[test]
    fn dtd_is_rejected_unless_allowed() {
        let xml = r#"<!DOCTYPE note PUBLIC "-//Notes//DTD Note 1.0//EN" "note.dtd"><note><body>x</body></note>"#;
        let mut context = Context::new();
        assert!(matches!(
            read_document::<Note>(xml, &ReadOptions::default(), &mut context),
            Err(BindError::Xml(_))
        ));

        let options = ReadOptions {
            allow_dtd: true,
            ..Default::default()
        };
        let note: Note = read_document(xml, &options, &mut context).unwrap().unwrap();
        assert_eq!(note.body.as_deref(), Some("x"));
        assert_eq!(context.public_ids(), ["-//Notes//DTD Note 1.0//EN"]);
    }

    #[test]
    fn older_namespaces_are_read_as_current() {
        let mut context = Context::new();
        let note: Note = read_document(
            r#"<note xmlns="urn:notes:1"><body>x</body></note>"#,
            &ReadOptions::default(),
            &mut context,
        )
        .unwrap()
        .unwrap();
        assert_eq!(note.body.as_deref(), Some("x"));
        assert!(!context.has_diagnostics());
    }

    #[test]
    fn missing_required_element_is_left_out() {
        let mut context = Context::new();
        let options = WriteOptions {
            indent: None,
            declaration: true,
        };
        let xml = write_document(&Note::default(), &options, &mut context).unwrap();
        assert_eq!(
            xml,
            r#"<?xml version="1.0" encoding="UTF-8"?><note xmlns="urn:notes"/>"#
        );
        assert_eq!(
            context.diagnostics()[0].kind,
            DiagnosticKind::MissingRequiredValue { field: "body" }
        );
    }
}

use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use dd_builtins::meta;

use crate::{
    error::{BindError, MarshalError},
    options::WriteOptions,
    qname::QName,
    XML_NAMESPACE, XSI_NAMESPACE,
};

struct Frame {
    name: String,
    default_namespace: String,
    /// Prefix declarations made on this element.
    prefixes: Vec<(String, String)>,
}

/// Streaming XML output with a start tag that stays open for attributes and
/// namespace declarations until content is written.
pub struct XmlWriter<W: Write> {
    inner: quick_xml::Writer<W>,
    pending: Option<BytesStart<'static>>,
    open: Vec<Frame>,
    generated_prefixes: usize,
}

impl<W: Write> XmlWriter<W> {
    pub fn new(inner: W, options: &WriteOptions) -> Self {
        let inner = match options.indent {
            Some(width) => quick_xml::Writer::new_with_indent(inner, b' ', width),
            None => quick_xml::Writer::new(inner),
        };
        Self {
            inner,
            pending: None,
            open: Vec::new(),
            generated_prefixes: 0,
        }
    }

    fn write_event(&mut self, event: Event) -> Result<(), BindError> {
        self.inner.write_event(event).map_err(BindError::write)
    }

    fn flush_start(&mut self) -> Result<(), BindError> {
        if let Some(start) = self.pending.take() {
            self.write_event(Event::Start(start))?;
        }
        Ok(())
    }

    pub fn declaration(&mut self) -> Result<(), BindError> {
        self.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
    }

    pub fn start_element(&mut self, namespace: &str, local_name: &str) -> Result<(), BindError> {
        self.flush_start()?;
        let mut start = BytesStart::new(local_name.to_string());
        let inherited = self.open.last().map_or("", |f| f.default_namespace.as_str());
        if inherited != namespace {
            start.push_attribute(("xmlns", namespace));
        }
        self.open.push(Frame {
            name: local_name.to_string(),
            default_namespace: namespace.to_string(),
            prefixes: Vec::new(),
        });
        self.pending = Some(start);
        Ok(())
    }

    pub fn end_element(&mut self) -> Result<(), BindError> {
        let frame = self
            .open
            .pop()
            .ok_or_else(|| BindError::write("end of element without a start"))?;
        match self.pending.take() {
            Some(start) => self.write_event(Event::Empty(start)),
            None => self.write_event(Event::End(BytesEnd::new(frame.name))),
        }
    }

    /// Drops the element started last, as long as nothing of it has been
    /// written yet.
    pub fn discard_element(&mut self) -> Result<(), BindError> {
        if self.pending.take().is_none() {
            return Err(BindError::write("element to discard already has content"));
        }
        self.open.pop();
        Ok(())
    }

    pub fn text(&mut self, text: &str) -> Result<(), BindError> {
        self.flush_start()?;
        self.write_event(Event::Text(BytesText::new(text)))
    }

    fn pending_start(&mut self) -> Result<&mut BytesStart<'static>, BindError> {
        self.pending
            .as_mut()
            .ok_or_else(|| BindError::write("attribute written outside of a start tag"))
    }

    /// Returns a prefix bound to `namespace`, declaring one on the open start
    /// tag when none is in scope.
    fn prefix_for(&mut self, namespace: &str, preferred: &str) -> Result<String, BindError> {
        let bound = self
            .open
            .iter()
            .rev()
            .flat_map(|frame| frame.prefixes.iter())
            .find(|(_, ns)| ns == namespace)
            .map(|(prefix, _)| prefix.clone());
        if let Some(prefix) = bound {
            return Ok(prefix);
        }

        let prefix = if preferred.is_empty() || self.is_prefix_in_scope(preferred) {
            self.generated_prefixes += 1;
            format!("ns{}", self.generated_prefixes)
        } else {
            preferred.to_string()
        };
        let declaration = format!("xmlns:{prefix}");
        self.pending_start()?
            .push_attribute((declaration.as_str(), namespace));
        if let Some(frame) = self.open.last_mut() {
            frame.prefixes.push((prefix.clone(), namespace.to_string()));
        }
        Ok(prefix)
    }

    fn is_prefix_in_scope(&self, prefix: &str) -> bool {
        self.open
            .iter()
            .flat_map(|frame| frame.prefixes.iter())
            .any(|(p, _)| p == prefix)
    }

    pub fn attribute(
        &mut self,
        namespace: &str,
        local_name: &str,
        value: &str,
    ) -> Result<(), BindError> {
        let name = match namespace {
            "" => local_name.to_string(),
            XML_NAMESPACE => format!("xml:{local_name}"),
            XSI_NAMESPACE => format!("{}:{local_name}", self.prefix_for(namespace, "xsi")?),
            _ => format!("{}:{local_name}", self.prefix_for(namespace, "")?),
        };
        self.pending_start()?
            .push_attribute((name.as_str(), value));
        Ok(())
    }

    /// The literal for `name` in the current scope, declaring its namespace
    /// on the open start tag if needed. A name without namespace cannot be
    /// written inside a default namespace.
    pub fn qualify(&mut self, name: &QName) -> Result<String, MarshalError> {
        let default_namespace = self
            .open
            .last()
            .map(|f| f.default_namespace.clone())
            .unwrap_or_default();
        match name.namespace_name.as_deref() {
            None if default_namespace.is_empty() => Ok(name.local_name.clone()),
            Some(ns) if ns == default_namespace => Ok(name.local_name.clone()),
            None => Err(MarshalError::Value {
                value: name.to_string(),
                reason: meta::Error::NamespaceNotDeclarable(name.local_name.clone()),
            }),
            Some(XML_NAMESPACE) => Ok(format!("xml:{}", name.local_name)),
            Some(ns) => Ok(format!("{}:{}", self.prefix_for(ns, "")?, name.local_name)),
        }
    }

    pub fn finish(self) -> Result<W, BindError> {
        if let Some(frame) = self.open.last() {
            return Err(BindError::write(format!(
                "element {} was never closed",
                frame.name
            )));
        }
        Ok(self.inner.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compact() -> WriteOptions {
        WriteOptions {
            indent: None,
            declaration: false,
        }
    }

    fn output(writer: XmlWriter<Vec<u8>>) -> String {
        String::from_utf8(writer.finish().unwrap()).unwrap()
    }

    #[test]
    fn declares_default_namespace_only_when_it_changes() {
        let mut writer = XmlWriter::new(Vec::new(), &compact());
        writer.start_element("urn:a", "root").unwrap();
        writer.attribute("", "version", "1").unwrap();
        writer.start_element("urn:a", "child").unwrap();
        writer.text("x & y").unwrap();
        writer.end_element().unwrap();
        writer.start_element("urn:a", "empty").unwrap();
        writer.end_element().unwrap();
        writer.end_element().unwrap();

        assert_eq!(
            output(writer),
            r#"<root xmlns="urn:a" version="1"><child>x &amp; y</child><empty/></root>"#
        );
    }

    #[test]
    fn qualify_declares_prefix_on_open_element() {
        let mut writer = XmlWriter::new(Vec::new(), &compact());
        writer.start_element("urn:a", "port").unwrap();
        let literal = writer
            .qualify(&QName::with_namespace("urn:wsdl", "EchoPort"))
            .unwrap();
        writer.text(&literal).unwrap();
        writer.end_element().unwrap();

        assert_eq!(
            output(writer),
            r#"<port xmlns="urn:a" xmlns:ns1="urn:wsdl">ns1:EchoPort</port>"#
        );
    }

    #[test]
    fn unqualified_name_in_default_namespace_can_be_discarded() {
        let mut writer = XmlWriter::new(Vec::new(), &compact());
        writer.start_element("urn:a", "ref").unwrap();
        writer.start_element("urn:a", "service-qname").unwrap();
        let error = writer.qualify(&QName::from_table("", "Echo")).unwrap_err();
        assert!(matches!(
            error,
            MarshalError::Value { ref value, .. } if value == "Echo"
        ));
        writer.discard_element().unwrap();
        writer.end_element().unwrap();

        assert_eq!(output(writer), r#"<ref xmlns="urn:a"/>"#);
    }

    #[test]
    fn instance_attributes_use_xsi_prefix() {
        let mut writer = XmlWriter::new(Vec::new(), &compact());
        writer.start_element("urn:a", "icon").unwrap();
        writer.attribute(XSI_NAMESPACE, "nil", "true").unwrap();
        writer.end_element().unwrap();

        assert_eq!(
            output(writer),
            concat!(
                r#"<icon xmlns="urn:a" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance""#,
                r#" xsi:nil="true"/>"#
            )
        );
    }

    #[test]
    fn attributes_after_content_are_rejected() {
        let mut writer = XmlWriter::new(Vec::new(), &compact());
        writer.start_element("", "a").unwrap();
        writer.text("x").unwrap();
        assert!(matches!(
            writer.attribute("", "id", "1"),
            Err(BindError::Write(_))
        ));
    }

    #[test]
    fn unclosed_elements_fail_to_finish() {
        let mut writer = XmlWriter::new(Vec::new(), &compact());
        writer.start_element("", "a").unwrap();
        assert!(writer.finish().is_err());
    }
}

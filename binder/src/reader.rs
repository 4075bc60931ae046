use dd_builtins::meta::{self, normalized_value, Whitespace};
use roxmltree::{Attribute, Node};

use crate::{diagnostic::Position, filter::NamespaceFilter, qname::QName, XSI_NAMESPACE};

/// How element names are interpreted while reading one document.
#[derive(Copy, Clone, Debug, Default)]
pub struct Scope {
    filter: Option<&'static NamespaceFilter>,
    legacy_names: bool,
}

impl Scope {
    pub fn new(filter: Option<&'static NamespaceFilter>, legacy_names: bool) -> Self {
        Self {
            filter,
            legacy_names,
        }
    }
}

/// A cursor positioned on one element of a parsed document.
#[derive(Copy, Clone, Debug)]
pub struct ElementReader<'a, 'input> {
    node: Node<'a, 'input>,
    scope: Scope,
}

impl<'a, 'input: 'a> ElementReader<'a, 'input> {
    pub fn new(node: Node<'a, 'input>, scope: Scope) -> Self {
        Self { node, scope }
    }

    pub fn node(&self) -> Node<'a, 'input> {
        self.node
    }

    /// The element's namespace, after normalization.
    pub fn namespace(&self) -> Option<&'a str> {
        let namespace = self.node.tag_name().namespace();
        match self.scope.filter {
            Some(filter) => filter.normalize(namespace),
            None => namespace,
        }
    }

    /// The element's local name, with legacy spellings replaced.
    pub fn local_name(&self) -> &'a str {
        let name = self.node.tag_name().name();
        match self.scope.filter {
            Some(filter) if self.scope.legacy_names => filter.rename(name),
            _ => name,
        }
    }

    pub fn name(&self) -> QName {
        QName::with_optional_namespace(self.namespace(), self.local_name())
    }

    /// `namespace` is the empty string for elements without a namespace.
    pub fn is_named(&self, namespace: &str, local_name: &str) -> bool {
        self.namespace().unwrap_or("") == namespace && self.local_name() == local_name
    }

    pub fn attributes(&self) -> impl Iterator<Item = Attribute<'a, 'input>> {
        self.node.attributes()
    }

    pub fn attribute(&self, namespace: &str, local_name: &str) -> Option<&'a str> {
        if namespace.is_empty() {
            self.node.attribute(local_name)
        } else {
            self.node.attribute((namespace, local_name))
        }
    }

    /// Element children in document order. Text, comments and processing
    /// instructions are skipped.
    pub fn children(&self) -> impl Iterator<Item = ElementReader<'a, 'input>> {
        let scope = self.scope;
        self.node
            .children()
            .filter(|n| n.is_element())
            .map(move |node| ElementReader { node, scope })
    }

    /// The concatenated character data directly inside this element.
    pub fn text(&self) -> String {
        self.node
            .children()
            .filter(|n| n.is_text())
            .filter_map(|n| n.text())
            .collect()
    }

    pub fn is_nil(&self) -> bool {
        self.attribute(XSI_NAMESPACE, "nil")
            .map(|nil| matches!(normalized_value(nil, Whitespace::Collapse).as_ref(), "true" | "1"))
            .unwrap_or(false)
    }

    /// The raw `xsi:type` literal, if present.
    pub fn xsi_type_literal(&self) -> Option<&'a str> {
        self.attribute(XSI_NAMESPACE, "type")
    }

    /// The resolved `xsi:type`, normalized like element namespaces are.
    pub fn xsi_type(&self) -> Option<Result<QName, meta::Error>> {
        let literal = self.xsi_type_literal()?;
        let resolved = self.resolve_qname(literal).map(|name| match self.scope.filter {
            Some(filter) => {
                let namespace = filter.normalize(name.namespace_name.as_deref());
                QName::with_optional_namespace(namespace, name.local_name.as_str())
            }
            None => name,
        });
        Some(resolved)
    }

    /// Resolves a QName literal against the namespaces in scope here.
    pub fn resolve_qname(&self, literal: &str) -> Result<QName, meta::Error> {
        QName::parse(&normalized_value(literal, Whitespace::Collapse), self.node)
    }

    pub fn position(&self) -> Position {
        let pos = self.node.document().text_pos_at(self.node.range().start);
        Position {
            line: pos.row,
            column: pos.col,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static FILTER: NamespaceFilter = NamespaceFilter {
        target: "urn:current",
        sources: &["urn:legacy"],
        unqualified: true,
        renames: &[("shortname", "short-name")],
    };

    #[test]
    fn children_skip_non_elements() {
        let doc =
            roxmltree::Document::parse("<a>text<!-- c --><b/><?pi x?><c/></a>").unwrap();
        let reader = ElementReader::new(doc.root_element(), Scope::default());
        let names: Vec<_> = reader.children().map(|c| c.local_name()).collect();
        assert_eq!(names, ["b", "c"]);
    }

    #[test]
    fn text_concatenates_character_data() {
        let doc = roxmltree::Document::parse("<a> x <![CDATA[<y>]]><!-- c -->z</a>").unwrap();
        let reader = ElementReader::new(doc.root_element(), Scope::default());
        assert_eq!(reader.text(), " x <y>z");
    }

    #[test]
    fn filter_applies_to_names_and_xsi_type() {
        let doc = roxmltree::Document::parse(
            r#"<l:shortname xmlns:l="urn:legacy"
                 xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
                 xsi:type="l:nameType"/>"#,
        )
        .unwrap();
        let reader = ElementReader::new(doc.root_element(), Scope::new(Some(&FILTER), true));
        assert!(reader.is_named("urn:current", "short-name"));
        assert_eq!(
            reader.xsi_type().unwrap().unwrap(),
            QName::with_namespace("urn:current", "nameType")
        );

        let strict = ElementReader::new(doc.root_element(), Scope::default());
        assert!(strict.is_named("urn:legacy", "shortname"));
    }

    #[test]
    fn nil_accepts_true_and_one() {
        let doc = roxmltree::Document::parse(
            r#"<a xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
                 <b xsi:nil="true"/><c xsi:nil=" 1 "/><d xsi:nil="false"/><e/>
               </a>"#,
        )
        .unwrap();
        let reader = ElementReader::new(doc.root_element(), Scope::default());
        let nils: Vec<_> = reader.children().map(|c| c.is_nil()).collect();
        assert_eq!(nils, [true, true, false, false]);
    }

    #[test]
    fn position_is_one_based() {
        let doc = roxmltree::Document::parse("<a>\n  <b/>\n</a>").unwrap();
        let reader = ElementReader::new(doc.root_element(), Scope::default());
        let b = reader.children().next().unwrap();
        assert_eq!(b.position(), Position { line: 2, column: 3 });
    }
}

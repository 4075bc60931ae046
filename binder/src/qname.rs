use std::fmt;

use dd_builtins::meta;
use roxmltree::Node;

use crate::XML_NAMESPACE;

/// An expanded name. Prefixes are not part of the value: two names with the
/// same namespace and local part are equal however they were spelled.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QName {
    pub namespace_name: Option<String>,
    pub local_name: String,
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(namespace_name) = self.namespace_name.as_ref() {
            write!(f, "{{{}}}{}", namespace_name, self.local_name)
        } else {
            write!(f, "{}", self.local_name)
        }
    }
}

impl QName {
    pub fn with_namespace(
        namespace_name: impl Into<String>,
        local_name: impl Into<String>,
    ) -> Self {
        Self::with_optional_namespace(Some(namespace_name), local_name)
    }

    pub fn with_optional_namespace(
        namespace_name: Option<impl Into<String>>,
        local_name: impl Into<String>,
    ) -> Self {
        Self {
            namespace_name: namespace_name.map(Into::into),
            local_name: local_name.into(),
        }
    }

    /// Builds a name from a binding table entry, where the empty string
    /// stands for "no namespace".
    pub fn from_table(namespace_name: &str, local_name: &str) -> Self {
        Self::with_optional_namespace(
            Some(namespace_name).filter(|ns| !ns.is_empty()),
            local_name,
        )
    }

    pub fn namespace(&self) -> &str {
        self.namespace_name.as_deref().unwrap_or("")
    }

    pub fn qualified(
        prefix: &str,
        local_name: impl Into<String>,
        context: Node,
    ) -> Result<Self, meta::Error> {
        let resolved_prefix = if prefix == "xml" {
            // The prefix xml is by definition bound to the namespace name
            // http://www.w3.org/XML/1998/namespace.
            // (Namespaces in XML 1.0, §3, Reserved Prefixes and Namespace Names)
            XML_NAMESPACE
        } else {
            context
                .lookup_namespace_uri(Some(prefix))
                .ok_or_else(|| meta::Error::NamePrefixNotResolved(prefix.into()))?
        };
        Ok(Self::with_namespace(resolved_prefix, local_name))
    }

    pub fn unqualified(local_name: impl Into<String>, context: Node) -> Self {
        // If there is a default namespace declaration in scope, the expanded name corresponding to
        // an unprefixed element name has the URI of the default namespace as its namespace name.
        // (Namespaces in XML 1.0, §6.2)
        let namespace_name = context.lookup_namespace_uri(None);
        QName::with_optional_namespace(namespace_name, local_name)
    }

    /// Resolves a `prefix:local` literal against the namespaces in scope at
    /// `context`. The literal must already be whitespace-collapsed.
    pub fn parse(source: &str, context: Node) -> Result<Self, meta::Error> {
        let invalid = || meta::Error::InvalidLexicalValue {
            type_name: "QName",
            value: source.to_string(),
        };
        if source.is_empty() || source.contains(' ') {
            return Err(invalid());
        }
        match source.split_once(':') {
            Some((prefix, local)) => {
                if prefix.is_empty() || local.is_empty() || local.contains(':') {
                    return Err(invalid());
                }
                Self::qualified(prefix, local, context)
            }
            None => Ok(Self::unqualified(source, context)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_resolves_prefixes_in_scope() {
        let doc = roxmltree::Document::parse(
            r#"<a xmlns="urn:default" xmlns:s="urn:service"><b/></a>"#,
        )
        .unwrap();
        let b = doc.root_element().first_element_child().unwrap();

        assert_eq!(
            QName::parse("s:Echo", b).unwrap(),
            QName::with_namespace("urn:service", "Echo")
        );
        assert_eq!(
            QName::parse("Echo", b).unwrap(),
            QName::with_namespace("urn:default", "Echo")
        );
        assert_eq!(
            QName::parse("xml:lang", b).unwrap(),
            QName::with_namespace(XML_NAMESPACE, "lang")
        );
    }

    #[test]
    fn parse_reports_unbound_prefix() {
        let doc = roxmltree::Document::parse("<a/>").unwrap();
        assert_eq!(
            QName::parse("q:Echo", doc.root_element()),
            Err(meta::Error::NamePrefixNotResolved("q".into()))
        );
        assert!(QName::parse("q:", doc.root_element()).is_err());
    }

    #[test]
    fn display_uses_clark_notation() {
        assert_eq!(QName::with_namespace("urn:x", "y").to_string(), "{urn:x}y");
        assert_eq!(QName::from_table("", "y").to_string(), "y");
    }
}

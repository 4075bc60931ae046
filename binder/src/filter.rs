//! Read-side rewriting of namespaces and element names, so that descriptors
//! written against older or newer schema generations bind to one table.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

lazy_static! {
    static ref DOCTYPE_PUBLIC_ID: Regex =
        Regex::new(r#"<!DOCTYPE\s+[^\s>\[]+\s+PUBLIC\s+(?:"([^"]*)"|'([^']*)')"#).unwrap();
}

#[derive(Debug)]
pub struct NamespaceFilter {
    /// The namespace that matching elements are read as.
    pub target: &'static str,
    /// Namespaces rewritten to `target`.
    pub sources: &'static [&'static str],
    /// Whether elements without a namespace (DTD-era descriptors) are
    /// rewritten to `target` as well.
    pub unqualified: bool,
    /// Legacy local names and their current spelling.
    pub renames: &'static [(&'static str, &'static str)],
}

impl NamespaceFilter {
    pub fn normalize<'n>(&self, namespace: Option<&'n str>) -> Option<&'n str> {
        match namespace {
            None if self.unqualified => Some(self.target),
            Some(ns) if ns != self.target && self.sources.iter().any(|s| *s == ns) => {
                debug!(from = ns, to = self.target, "normalized namespace");
                Some(self.target)
            }
            other => other,
        }
    }

    pub fn rename<'n>(&self, local_name: &'n str) -> &'n str {
        self.renames
            .iter()
            .find(|(legacy, _)| *legacy == local_name)
            .map(|(_, current)| *current)
            .unwrap_or(local_name)
    }
}

/// Extracts the public identifier of the document type declaration, if any.
pub fn doctype_public_id(xml: &str) -> Option<&str> {
    let captures = DOCTYPE_PUBLIC_ID.captures(xml)?;
    captures.get(1).or_else(|| captures.get(2)).map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILTER: NamespaceFilter = NamespaceFilter {
        target: "urn:new",
        sources: &["urn:old", "urn:older"],
        unqualified: true,
        renames: &[("shortname", "short-name")],
    };

    #[test]
    fn sources_and_missing_namespaces_map_to_target() {
        assert_eq!(FILTER.normalize(Some("urn:old")), Some("urn:new"));
        assert_eq!(FILTER.normalize(None), Some("urn:new"));
        assert_eq!(FILTER.normalize(Some("urn:other")), Some("urn:other"));
    }

    #[test]
    fn renames_only_listed_names() {
        assert_eq!(FILTER.rename("shortname"), "short-name");
        assert_eq!(FILTER.rename("uri"), "uri");
    }

    #[test]
    fn finds_doctype_public_id() {
        let xml = r#"<?xml version="1.0"?>
<!DOCTYPE web-app PUBLIC "-//Sun Microsystems, Inc.//DTD Web Application 2.3//EN"
    "http://java.sun.com/dtd/web-app_2_3.dtd">
<web-app/>"#;
        assert_eq!(
            doctype_public_id(xml),
            Some("-//Sun Microsystems, Inc.//DTD Web Application 2.3//EN")
        );
        assert_eq!(doctype_public_id("<web-app/>"), None);
    }
}

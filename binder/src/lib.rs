//! Binding between XML elements and typed Rust nodes.
//!
//! A node type declares its attributes and child elements once, usually with
//! [`descriptor!`], and gets both directions from that table: reading from a
//! [`roxmltree`] document and writing through [`XmlWriter`]. Problems in the
//! content never abort a read; they are collected as [`Diagnostic`]s in a
//! [`Context`].

pub mod adapters;
mod collections;
mod context;
mod diagnostic;
mod document;
mod error;
mod filter;
mod macros;
mod node;
mod options;
mod qname;
mod reader;
mod writer;

pub use collections::{Keyed, KeyedCollection, Localized, LocalizedList};
pub use context::Context;
pub use diagnostic::{Diagnostic, DiagnosticKind, Position};
pub use document::{parse_document, read_document, read_root, write_document};
pub use error::{BindError, MarshalError};
pub use filter::{doctype_public_id, NamespaceFilter};
pub use node::{
    read_attribute, read_node, read_node_into, read_text, unknown_element, write_attribute,
    write_node, write_text, RootElement, Slot, XmlNode,
};
pub use options::{NamespacePolicy, ReadOptions, WriteOptions};
pub use qname::QName;
pub use reader::{ElementReader, Scope};
pub use writer::XmlWriter;

pub use roxmltree::Document;

pub const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
pub const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{Collapse, Int, Truth};

    const NS: &str = "urn:shop";

    descriptor! {
        struct Item: NS, "itemType" {
            attributes {
                id: Option<String> = "id" => Collapse, xml_id;
            }
            elements {
                name: Option<String> = "name" => text(Collapse), required;
                count: Option<i32> = "count" => text(Int);
                gift: Option<bool> = "gift" => text(Truth);
            }
        }
    }

    descriptor! {
        struct Order: NS, "orderType" {
            attributes {
                lang: Option<String> = (XML_NAMESPACE, "lang") => Collapse;
            }
            elements {
                tags: Vec<String> = "tag" => text(Collapse);
                items: Vec<Item> = "item" => node;
                note: Option<Item> = "note" => node;
            }
            defaults {
                tags: vec!["default".to_string()],
            }
        }
    }

    descriptor! {
        struct Loose: NS, "looseType", lenient {
            attributes {}
            elements {
                kept: Option<String> = "kept" => text(Collapse);
            }
        }
    }

    fn read<T: XmlNode>(xml: &str, context: &mut Context) -> Option<T> {
        let document = roxmltree::Document::parse(xml).unwrap();
        read_node(&ElementReader::new(document.root_element(), Scope::default()), context)
    }

    #[test]
    fn defaults_apply_to_fresh_nodes() {
        assert_eq!(Order::default().tags, ["default"]);
        assert!(Order::default().items.is_empty());
    }

    #[test]
    fn lists_are_replaced_by_document_content() {
        let mut context = Context::new();
        let order: Order = read(
            r#"<order xmlns="urn:shop" xml:lang="en">
                 <tag>a</tag><item id="i1"><name> pen </name><count>3</count></item><tag>b</tag>
               </order>"#,
            &mut context,
        )
        .unwrap();
        assert!(!context.has_diagnostics(), "{:?}", context.diagnostics());
        assert_eq!(order.lang.as_deref(), Some("en"));
        assert_eq!(order.tags, ["a", "b"]);
        assert_eq!(order.items[0].name.as_deref(), Some("pen"));
        assert_eq!(order.items[0].count, Some(3));
        assert!(context.is_xml_id_registered("i1"));
    }

    #[test]
    fn read_into_keeps_fields_the_document_leaves_alone() {
        let document =
            roxmltree::Document::parse(r#"<order xmlns="urn:shop"><item/></order>"#).unwrap();
        let reader = ElementReader::new(document.root_element(), Scope::default());
        let mut order = Order::default();
        let mut context = Context::new();
        assert!(read_node_into(&mut order, &reader, &mut context));
        assert_eq!(order.tags, ["default"]);
        assert_eq!(order.items.len(), 1);
    }

    #[test]
    fn bad_values_are_skipped_with_a_diagnostic() {
        let mut context = Context::new();
        let item: Item = read(
            r#"<item xmlns="urn:shop" color="red"><count>many</count><gift>yes</gift><price/></item>"#,
            &mut context,
        )
        .unwrap();
        assert_eq!(item.count, None);
        assert_eq!(item.gift, Some(false));
        let kinds: Vec<_> = context.diagnostics().iter().map(|d| d.kind.name()).collect();
        assert_eq!(
            kinds,
            ["unexpected-attribute", "adapter-conversion", "unexpected-element"]
        );
    }

    #[test]
    fn nil_and_foreign_xsi_type_leave_the_slot_empty() {
        let mut context = Context::new();
        let order: Order = read(
            r#"<order xmlns="urn:shop" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
                 <note xsi:nil="true"/>
                 <item xsi:type="orderType"><name>x</name></item>
               </order>"#,
            &mut context,
        )
        .unwrap();
        assert_eq!(order.note, None);
        assert!(order.items.is_empty());
        assert_eq!(context.diagnostics().len(), 1);
        assert_eq!(context.diagnostics()[0].kind.name(), "unexpected-xsi-type");
    }

    #[test]
    fn lenient_nodes_skip_unknown_elements() {
        let mut context = Context::new();
        let loose: Loose = read(
            r#"<loose xmlns="urn:shop"><vendor-thing/><kept>k</kept></loose>"#,
            &mut context,
        )
        .unwrap();
        assert_eq!(loose.kept.as_deref(), Some("k"));
        assert!(!context.has_diagnostics());
    }

    #[test]
    fn writes_fields_in_table_order() {
        let order = Order {
            lang: Some("de".into()),
            tags: vec!["t".into()],
            items: vec![Item {
                id: Some("i1".into()),
                name: Some("pen".into()),
                count: Some(2),
                gift: Some(true),
            }],
            note: None,
        };
        let mut writer = XmlWriter::new(
            Vec::new(),
            &WriteOptions {
                indent: None,
                declaration: false,
            },
        );
        let mut context = Context::new();
        write_node(&mut writer, NS, "order", &order, &mut context).unwrap();
        assert_eq!(
            String::from_utf8(writer.finish().unwrap()).unwrap(),
            concat!(
                r#"<order xmlns="urn:shop" xml:lang="de"><tag>t</tag>"#,
                r#"<item id="i1"><name>pen</name><count>2</count><gift>true</gift></item></order>"#
            )
        );
        assert!(!context.has_diagnostics());
    }
}

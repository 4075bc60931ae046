//! Node types shared by several descriptors.

use std::io::Write;

use dd_binder::{
    adapters::{Collapse, Verbatim},
    descriptor, read_attribute, read_text, unknown_element, write_attribute, BindError, Context,
    ElementReader, LocalizedList, Localized, XmlNode, XmlWriter, XML_NAMESPACE, XSI_NAMESPACE,
};
use dd_builtins::enumeration;

use crate::JAVAEE_NAMESPACE as JAVAEE;

/// Character content with an optional language, used for descriptions and
/// display names.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Text {
    pub id: Option<String>,
    pub lang: Option<String>,
    pub value: String,
}

impl Text {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Default::default()
        }
    }

    pub fn with_lang(lang: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            lang: Some(lang.into()),
            value: value.into(),
            ..Default::default()
        }
    }
}

impl Localized for Text {
    fn lang(&self) -> Option<&str> {
        self.lang.as_deref()
    }
}

impl XmlNode for Text {
    const NAMESPACE: &'static str = JAVAEE;
    const TYPE_NAME: &'static str = "descriptionType";
    const TYPE_ALIASES: &'static [&'static str] = &["display-nameType", "xsdStringType"];

    fn read_fields(&mut self, reader: &ElementReader, context: &mut Context) {
        for attribute in reader.attributes() {
            match (attribute.namespace().unwrap_or(""), attribute.name()) {
                (XSI_NAMESPACE, _) => {}
                ("", "id") => {
                    if let Some(id) = read_attribute::<Collapse>(
                        attribute.value(),
                        reader,
                        Self::TYPE_NAME,
                        context,
                    ) {
                        context.add_xml_id(reader, Self::TYPE_NAME, &id);
                        self.id = Some(id);
                    }
                }
                (XML_NAMESPACE, "lang") => {
                    self.lang = read_attribute::<Collapse>(
                        attribute.value(),
                        reader,
                        Self::TYPE_NAME,
                        context,
                    );
                }
                _ => context.unexpected_attribute(
                    reader,
                    Self::TYPE_NAME,
                    &attribute,
                    &[("", "id"), (XML_NAMESPACE, "lang")],
                ),
            }
        }
        for child in reader.children() {
            unknown_element::<Self>(&child, context, &[]);
        }
        if let Some(value) = read_text::<Verbatim>(reader, Self::TYPE_NAME, context) {
            self.value = value;
        }
    }

    fn write_fields<W: Write>(
        &self,
        writer: &mut XmlWriter<W>,
        context: &mut Context,
    ) -> Result<(), BindError> {
        if let Some(id) = &self.id {
            write_attribute::<Collapse, W>(writer, "", "id", id, Self::TYPE_NAME, context)?;
        }
        if let Some(lang) = &self.lang {
            write_attribute::<Collapse, W>(
                writer,
                XML_NAMESPACE,
                "lang",
                lang,
                Self::TYPE_NAME,
                context,
            )?;
        }
        if !self.value.is_empty() {
            writer.text(&self.value)?;
        }
        Ok(())
    }
}

descriptor! {
    pub struct Icon: JAVAEE, "iconType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
            lang: Option<String> = (XML_NAMESPACE, "lang") => Collapse;
        }
        elements {
            small_icon: Option<String> = "small-icon" => text(Collapse);
            large_icon: Option<String> = "large-icon" => text(Collapse);
        }
    }
}

impl Localized for Icon {
    fn lang(&self) -> Option<&str> {
        self.lang.as_deref()
    }
}

descriptor! {
    /// A name/value pair, e.g. a servlet init parameter.
    pub struct ParamValue: JAVAEE, "param-valueType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            param_name: Option<String> = "param-name" => text(Collapse), required;
            param_value: Option<String> = "param-value" => text(Verbatim), required;
        }
    }
}

descriptor! {
    pub struct Property: JAVAEE, "propertyType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            name: Option<String> = "name" => text(Collapse), required;
            value: Option<String> = "value" => text(Verbatim), required;
        }
    }
}

descriptor! {
    pub struct LifecycleCallback: JAVAEE, "lifecycle-callbackType" {
        attributes {}
        elements {
            lifecycle_callback_class: Option<String> = "lifecycle-callback-class" => text(Collapse);
            lifecycle_callback_method: Option<String> = "lifecycle-callback-method" => text(Collapse), required;
        }
    }
}

descriptor! {
    pub struct InjectionTarget: JAVAEE, "injection-targetType" {
        attributes {}
        elements {
            injection_target_class: Option<String> = "injection-target-class" => text(Collapse), required;
            injection_target_name: Option<String> = "injection-target-name" => text(Collapse), required;
        }
    }
}

descriptor! {
    pub struct MethodParams: JAVAEE, "method-paramsType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            method_param: Vec<String> = "method-param" => text(Collapse);
        }
    }
}

descriptor! {
    pub struct NamedMethod: JAVAEE, "named-methodType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            method_name: Option<String> = "method-name" => text(Collapse), required;
            method_params: Option<MethodParams> = "method-params" => node;
        }
    }
}

descriptor! {
    /// A marker element such as `<distributable/>`.
    pub struct Empty: JAVAEE, "emptyType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {}
    }
}

descriptor! {
    /// Vendor extension content. Its children are not modelled and are
    /// skipped when read.
    pub struct Extension: JAVAEE, "extensionType", lenient {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {}
    }
}

descriptor! {
    pub struct SecurityRole: JAVAEE, "security-roleType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            role_name: Option<String> = "role-name" => text(Collapse), required;
        }
    }
}

descriptor! {
    pub struct SecurityRoleRef: JAVAEE, "security-role-refType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            role_name: Option<String> = "role-name" => text(Collapse), required;
            role_link: Option<String> = "role-link" => text(Collapse);
        }
    }
}

descriptor! {
    pub struct RunAs: JAVAEE, "run-asType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            role_name: Option<String> = "role-name" => text(Collapse), required;
        }
    }
}

descriptor! {
    pub struct SecurityIdentity: JAVAEE, "security-identityType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            use_caller_identity: Option<Empty> = "use-caller-identity" => node;
            run_as: Option<RunAs> = "run-as" => node;
        }
    }
}

descriptor! {
    pub struct MessageDestination: JAVAEE, "message-destinationType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            display_name: LocalizedList<Text> = "display-name" => node;
            icon: LocalizedList<Icon> = "icon" => node;
            message_destination_name: Option<String> = "message-destination-name" => text(Collapse), required;
            mapped_name: Option<String> = "mapped-name" => text(Collapse);
            lookup_name: Option<String> = "lookup-name" => text(Collapse);
        }
    }
}

keyed! {
    ParamValue => param_name,
    Property => name,
    SecurityRole => role_name,
    SecurityRoleRef => role_name,
    MessageDestination => message_destination_name,
}

enumeration! {
    pub enum TransactionType {
        Bean = "Bean",
        Container = "Container",
    }
}

enumeration! {
    pub enum IsolationLevel {
        ReadUncommitted = "TRANSACTION_READ_UNCOMMITTED",
        ReadCommitted = "TRANSACTION_READ_COMMITTED",
        RepeatableRead = "TRANSACTION_REPEATABLE_READ",
        Serializable = "TRANSACTION_SERIALIZABLE",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dd_binder::{read_node, Scope};
    use pretty_assertions::assert_eq;

    fn read<T: XmlNode>(xml: &str, context: &mut Context) -> Option<T> {
        let document = dd_binder::parse_document(xml, &Default::default(), context).unwrap();
        read_node(&ElementReader::new(document.root_element(), Scope::default()), context)
    }

    #[test]
    fn text_keeps_content_verbatim() {
        let mut context = Context::new();
        let text: Text = read(
            r#"<description xmlns="http://java.sun.com/xml/ns/javaee" xml:lang="de"> Ein  Text </description>"#,
            &mut context,
        )
        .unwrap();
        assert_eq!(text, Text::with_lang("de", " Ein  Text "));
        assert!(!context.has_diagnostics());
    }

    #[test]
    fn duplicate_description_languages_keep_previous_content() {
        let mut context = Context::new();
        let role: SecurityRole = read(
            r#"<security-role xmlns="http://java.sun.com/xml/ns/javaee">
                 <description>one</description>
                 <description>two</description>
                 <role-name>admin</role-name>
               </security-role>"#,
            &mut context,
        )
        .unwrap();
        assert!(role.description.is_empty());
        assert_eq!(role.role_name.as_deref(), Some("admin"));
        assert_eq!(context.diagnostics().len(), 1);
        assert_eq!(context.diagnostics()[0].kind.name(), "setter");
    }

    #[test]
    fn extension_content_is_skipped_silently() {
        let mut context = Context::new();
        let extension: Extension = read(
            r#"<faces-config-extension xmlns="http://java.sun.com/xml/ns/javaee" id="x">
                 <vendor:option xmlns:vendor="urn:vendor">on</vendor:option>
               </faces-config-extension>"#,
            &mut context,
        )
        .unwrap();
        assert_eq!(extension.id.as_deref(), Some("x"));
        assert!(!context.has_diagnostics());
    }
}

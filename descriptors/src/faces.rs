//! `faces-config.xml`, including JSF 2.2 flow definitions.

use std::io::Write;

use dd_binder::{
    adapters::{Collapse, Truth, Verbatim},
    descriptor, read_attribute, read_text, unknown_element, write_attribute, write_node,
    write_text, BindError, Context, ElementReader, LocalizedList, XmlNode, XmlWriter,
    XSI_NAMESPACE,
};

use crate::{
    common::{Empty, Extension, Icon, Text},
    web::{Ordering, OrderingList},
    JAVAEE_FILTER, JAVAEE_NAMESPACE as JAVAEE,
};

descriptor! {
    pub struct FacesSystemEventListener: JAVAEE, "faces-config-system-event-listenerType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            system_event_listener_class: Option<String> = "system-event-listener-class" => text(Collapse);
            system_event_class: Option<String> = "system-event-class" => text(Collapse);
            source_class: Option<String> = "source-class" => text(Collapse);
        }
    }
}

descriptor! {
    pub struct FacesLocaleConfig: JAVAEE, "faces-config-locale-configType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            default_locale: Option<String> = "default-locale" => text(Collapse);
            supported_locale: Vec<String> = "supported-locale" => text(Collapse);
        }
    }
}

descriptor! {
    pub struct FacesResourceBundle: JAVAEE, "faces-config-application-resource-bundleType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            display_name: LocalizedList<Text> = "display-name" => node;
            icon: LocalizedList<Icon> = "icon" => node;
            base_name: Option<String> = "base-name" => text(Collapse);
            var: Option<String> = "var" => text(Collapse);
        }
    }
}

descriptor! {
    pub struct FacesDefaultValidators: JAVAEE, "faces-config-default-validatorsType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            validator_id: Vec<String> = "validator-id" => text(Collapse);
        }
    }
}

descriptor! {
    /// Application-wide settings. Elements of newer JSF releases that are not
    /// modelled here are skipped without a diagnostic.
    pub struct FacesApplication: JAVAEE, "faces-config-applicationType", lenient {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            action_listener: Vec<String> = "action-listener" => text(Collapse);
            default_render_kit_id: Vec<String> = "default-render-kit-id" => text(Collapse);
            message_bundle: Vec<String> = "message-bundle" => text(Collapse);
            navigation_handler: Vec<String> = "navigation-handler" => text(Collapse);
            view_handler: Vec<String> = "view-handler" => text(Collapse);
            state_manager: Vec<String> = "state-manager" => text(Collapse);
            el_resolver: Vec<String> = "el-resolver" => text(Collapse);
            property_resolver: Vec<String> = "property-resolver" => text(Collapse);
            variable_resolver: Vec<String> = "variable-resolver" => text(Collapse);
            resource_handler: Vec<String> = "resource-handler" => text(Collapse);
            system_event_listener: Vec<FacesSystemEventListener> = "system-event-listener" => node;
            locale_config: Vec<FacesLocaleConfig> = "locale-config" => node;
            resource_bundle: Vec<FacesResourceBundle> = "resource-bundle" => node;
            application_extension: Vec<Extension> = "application-extension" => node;
            default_validators: Vec<FacesDefaultValidators> = "default-validators" => node;
        }
    }
}

descriptor! {
    pub struct FacesFactory: JAVAEE, "faces-config-factoryType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            application_factory: Vec<String> = "application-factory" => text(Collapse);
            exception_handler_factory: Vec<String> = "exception-handler-factory" => text(Collapse);
            external_context_factory: Vec<String> = "external-context-factory" => text(Collapse);
            faces_context_factory: Vec<String> = "faces-context-factory" => text(Collapse);
            partial_view_context_factory: Vec<String> = "partial-view-context-factory" => text(Collapse);
            lifecycle_factory: Vec<String> = "lifecycle-factory" => text(Collapse);
            view_declaration_language_factory: Vec<String> = "view-declaration-language-factory" => text(Collapse);
            tag_handler_delegate_factory: Vec<String> = "tag-handler-delegate-factory" => text(Collapse);
            render_kit_factory: Vec<String> = "render-kit-factory" => text(Collapse);
            visit_context_factory: Vec<String> = "visit-context-factory" => text(Collapse);
            factory_extension: Vec<Extension> = "factory-extension" => node;
        }
    }
}

descriptor! {
    pub struct FacesAttribute: JAVAEE, "faces-config-attributeType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            display_name: LocalizedList<Text> = "display-name" => node;
            icon: LocalizedList<Icon> = "icon" => node;
            attribute_name: Option<String> = "attribute-name" => text(Collapse);
            attribute_class: Option<String> = "attribute-class" => text(Collapse);
            default_value: Option<String> = "default-value" => text(Verbatim);
            suggested_value: Option<String> = "suggested-value" => text(Verbatim);
            attribute_extension: Vec<Extension> = "attribute-extension" => node;
        }
    }
}

descriptor! {
    pub struct FacesProperty: JAVAEE, "faces-config-propertyType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            display_name: LocalizedList<Text> = "display-name" => node;
            icon: LocalizedList<Icon> = "icon" => node;
            property_name: Option<String> = "property-name" => text(Collapse);
            property_class: Option<String> = "property-class" => text(Collapse);
            default_value: Option<String> = "default-value" => text(Verbatim);
            suggested_value: Option<String> = "suggested-value" => text(Verbatim);
            property_extension: Vec<Extension> = "property-extension" => node;
        }
    }
}

descriptor! {
    pub struct FacesFacet: JAVAEE, "faces-config-facetType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            display_name: LocalizedList<Text> = "display-name" => node;
            icon: LocalizedList<Icon> = "icon" => node;
            facet_name: Option<String> = "facet-name" => text(Collapse);
            facet_extension: Vec<Extension> = "facet-extension" => node;
        }
    }
}

descriptor! {
    pub struct FacesComponent: JAVAEE, "faces-config-componentType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            display_name: LocalizedList<Text> = "display-name" => node;
            icon: LocalizedList<Icon> = "icon" => node;
            component_type: Option<String> = "component-type" => text(Collapse);
            component_class: Option<String> = "component-class" => text(Collapse);
            facet: Vec<FacesFacet> = "facet" => node;
            attribute: Vec<FacesAttribute> = "attribute" => node;
            property: Vec<FacesProperty> = "property" => node;
            component_extension: Vec<Extension> = "component-extension" => node;
        }
    }
}

descriptor! {
    pub struct FacesConverter: JAVAEE, "faces-config-converterType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            display_name: LocalizedList<Text> = "display-name" => node;
            icon: LocalizedList<Icon> = "icon" => node;
            converter_id: Option<String> = "converter-id" => text(Collapse);
            converter_for_class: Option<String> = "converter-for-class" => text(Collapse);
            converter_class: Option<String> = "converter-class" => text(Collapse);
            attribute: Vec<FacesAttribute> = "attribute" => node;
            property: Vec<FacesProperty> = "property" => node;
            converter_extension: Vec<Extension> = "converter-extension" => node;
        }
    }
}

descriptor! {
    pub struct FacesValidator: JAVAEE, "faces-config-validatorType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            display_name: LocalizedList<Text> = "display-name" => node;
            icon: LocalizedList<Icon> = "icon" => node;
            validator_id: Option<String> = "validator-id" => text(Collapse);
            validator_class: Option<String> = "validator-class" => text(Collapse);
            attribute: Vec<FacesAttribute> = "attribute" => node;
            property: Vec<FacesProperty> = "property" => node;
            validator_extension: Vec<Extension> = "validator-extension" => node;
        }
    }
}

descriptor! {
    pub struct FacesBehavior: JAVAEE, "faces-config-behaviorType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            display_name: LocalizedList<Text> = "display-name" => node;
            icon: LocalizedList<Icon> = "icon" => node;
            behavior_id: Option<String> = "behavior-id" => text(Collapse);
            behavior_class: Option<String> = "behavior-class" => text(Collapse);
            attribute: Vec<FacesAttribute> = "attribute" => node;
            property: Vec<FacesProperty> = "property" => node;
            behavior_extension: Vec<Extension> = "behavior-extension" => node;
        }
    }
}

descriptor! {
    pub struct FacesMapEntry: JAVAEE, "faces-config-map-entryType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            key: Option<String> = "key" => text(Verbatim);
            null_value: Option<Empty> = "null-value" => node;
            value: Option<String> = "value" => text(Verbatim);
        }
    }
}

descriptor! {
    pub struct FacesMapEntries: JAVAEE, "faces-config-map-entriesType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            key_class: Option<String> = "key-class" => text(Collapse);
            value_class: Option<String> = "value-class" => text(Collapse);
            map_entry: Vec<FacesMapEntry> = "map-entry" => node;
        }
    }
}

/// One element of a managed list: a value or an explicit null.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListEntry {
    Value(String),
    Null,
}

/// `list-entries`: values and nulls in document order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FacesListEntries {
    pub id: Option<String>,
    pub value_class: Option<String>,
    pub entries: Vec<ListEntry>,
}

impl XmlNode for FacesListEntries {
    const NAMESPACE: &'static str = JAVAEE;
    const TYPE_NAME: &'static str = "faces-config-list-entriesType";

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
                _ => {
                    context.unexpected_attribute(reader, Self::TYPE_NAME, &attribute, &[("", "id")])
                }
            }
        }

        let mut first = true;
        for child in reader.children() {
            let entry = if child.is_named(JAVAEE, "value-class") {
                self.value_class = read_text::<Collapse>(&child, Self::TYPE_NAME, context);
                continue;
            } else if child.is_named(JAVAEE, "value") {
                read_text::<Verbatim>(&child, Self::TYPE_NAME, context).map(ListEntry::Value)
            } else if child.is_named(JAVAEE, "null-value") {
                Some(ListEntry::Null)
            } else {
                unknown_element::<Self>(&child, context, &["value-class", "null-value", "value"]);
                continue;
            };
            if let Some(entry) = entry {
                if first {
                    self.entries.clear();
                    first = false;
                }
                self.entries.push(entry);
            }
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
        if let Some(value_class) = &self.value_class {
            write_text::<Collapse, W>(
                writer,
                JAVAEE,
                "value-class",
                value_class,
                Self::TYPE_NAME,
                context,
            )?;
        }
        for entry in &self.entries {
            match entry {
                ListEntry::Value(value) => write_text::<Verbatim, W>(
                    writer,
                    JAVAEE,
                    "value",
                    value,
                    Self::TYPE_NAME,
                    context,
                )?,
                ListEntry::Null => {
                    write_node(writer, JAVAEE, "null-value", &Empty::default(), context)?
                }
            }
        }
        Ok(())
    }
}

descriptor! {
    pub struct FacesManagedProperty: JAVAEE, "faces-config-managed-propertyType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            display_name: LocalizedList<Text> = "display-name" => node;
            icon: LocalizedList<Icon> = "icon" => node;
            property_name: Option<String> = "property-name" => text(Collapse);
            property_class: Option<String> = "property-class" => text(Collapse);
            map_entries: Option<FacesMapEntries> = "map-entries" => node;
            null_value: Option<Empty> = "null-value" => node;
            value: Option<String> = "value" => text(Verbatim);
            list_entries: Option<FacesListEntries> = "list-entries" => node;
        }
    }
}

descriptor! {
    pub struct FacesManagedBean: JAVAEE, "faces-config-managed-beanType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
            eager: Option<bool> = "eager" => Truth;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            display_name: LocalizedList<Text> = "display-name" => node;
            icon: LocalizedList<Icon> = "icon" => node;
            managed_bean_name: Option<String> = "managed-bean-name" => text(Collapse), required;
            managed_bean_class: Option<String> = "managed-bean-class" => text(Collapse), required;
            managed_bean_scope: Option<String> = "managed-bean-scope" => text(Collapse), required;
            managed_property: Vec<FacesManagedProperty> = "managed-property" => node;
            map_entries: Option<FacesMapEntries> = "map-entries" => node;
            list_entries: Option<FacesListEntries> = "list-entries" => node;
            managed_bean_extension: Vec<Extension> = "managed-bean-extension" => node;
        }
    }
}

descriptor! {
    pub struct FacesRedirectViewParam: JAVAEE, "faces-config-redirect-viewParamType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            name: Option<String> = "name" => text(Collapse);
            value: Option<String> = "value" => text(Verbatim);
        }
    }
}

descriptor! {
    pub struct FacesRedirect: JAVAEE, "faces-config-redirectType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
            include_view_params: Option<bool> = "include-view-params" => Truth;
        }
        elements {
            view_param: Vec<FacesRedirectViewParam> = "view-param" => node;
            redirect_param: Vec<FacesRedirectViewParam> = "redirect-param" => node;
        }
    }
}

descriptor! {
    pub struct FacesNavigationCase: JAVAEE, "faces-config-navigation-caseType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            display_name: LocalizedList<Text> = "display-name" => node;
            icon: LocalizedList<Icon> = "icon" => node;
            from_action: Option<String> = "from-action" => text(Collapse);
            from_outcome: Option<String> = "from-outcome" => text(Collapse);
            condition: Option<String> = "if" => text(Verbatim);
            to_view_id: Option<String> = "to-view-id" => text(Collapse);
            to_flow_document_id: Option<String> = "to-flow-document-id" => text(Collapse);
            redirect: Option<FacesRedirect> = "redirect" => node;
        }
    }
}

descriptor! {
    pub struct FacesNavigationRule: JAVAEE, "faces-config-navigation-ruleType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            display_name: LocalizedList<Text> = "display-name" => node;
            icon: LocalizedList<Icon> = "icon" => node;
            from_view_id: Option<String> = "from-view-id" => text(Collapse);
            navigation_case: Vec<FacesNavigationCase> = "navigation-case" => node;
            navigation_rule_extension: Vec<Extension> = "navigation-rule-extension" => node;
        }
    }
}

descriptor! {
    pub struct FacesReferencedBean: JAVAEE, "faces-config-referenced-beanType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            display_name: LocalizedList<Text> = "display-name" => node;
            icon: LocalizedList<Icon> = "icon" => node;
            referenced_bean_name: Option<String> = "referenced-bean-name" => text(Collapse);
            referenced_bean_class: Option<String> = "referenced-bean-class" => text(Collapse);
        }
    }
}

descriptor! {
    pub struct FacesRenderer: JAVAEE, "faces-config-rendererType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            display_name: LocalizedList<Text> = "display-name" => node;
            icon: LocalizedList<Icon> = "icon" => node;
            component_family: Option<String> = "component-family" => text(Collapse);
            renderer_type: Option<String> = "renderer-type" => text(Collapse);
            renderer_class: Option<String> = "renderer-class" => text(Collapse);
            facet: Vec<FacesFacet> = "facet" => node;
            attribute: Vec<FacesAttribute> = "attribute" => node;
            renderer_extension: Vec<Extension> = "renderer-extension" => node;
        }
    }
}

descriptor! {
    pub struct FacesClientBehaviorRenderer: JAVAEE, "faces-config-client-behavior-rendererType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            client_behavior_renderer_type: Option<String> = "client-behavior-renderer-type" => text(Collapse);
            client_behavior_renderer_class: Option<String> = "client-behavior-renderer-class" => text(Collapse);
        }
    }
}

descriptor! {
    pub struct FacesRenderKit: JAVAEE, "faces-config-render-kitType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            display_name: LocalizedList<Text> = "display-name" => node;
            icon: LocalizedList<Icon> = "icon" => node;
            render_kit_id: Option<String> = "render-kit-id" => text(Collapse);
            render_kit_class: Option<String> = "render-kit-class" => text(Collapse);
            renderer: Vec<FacesRenderer> = "renderer" => node;
            client_behavior_renderer: Vec<FacesClientBehaviorRenderer> = "client-behavior-renderer" => node;
            render_kit_extension: Vec<Extension> = "render-kit-extension" => node;
        }
    }
}

descriptor! {
    pub struct FacesLifecycle: JAVAEE, "faces-config-lifecycleType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            phase_listener: Vec<String> = "phase-listener" => text(Collapse);
            lifecycle_extension: Vec<Extension> = "lifecycle-extension" => node;
        }
    }
}

descriptor! {
    pub struct FacesFlowView: JAVAEE, "faces-config-flow-definition-viewType" {
        attributes {
            id: Option<String> = "id" => Collapse, required;
        }
        elements {
            vdl_document: Option<String> = "vdl-document" => text(Collapse), required;
        }
    }
}

descriptor! {
    pub struct FacesFlowCase: JAVAEE, "faces-config-flow-definition-switch-caseType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            condition: Option<String> = "if" => text(Verbatim);
            from_outcome: Option<String> = "from-outcome" => text(Collapse), required;
        }
    }
}

descriptor! {
    pub struct FacesFlowSwitch: JAVAEE, "faces-config-flow-definition-switchType" {
        attributes {
            id: Option<String> = "id" => Collapse, required;
        }
        elements {
            case: Vec<FacesFlowCase> = "case" => node;
            default_outcome: Option<String> = "default-outcome" => text(Collapse);
        }
    }
}

descriptor! {
    pub struct FacesFlowReturn: JAVAEE, "faces-config-flow-definition-flow-returnType" {
        attributes {
            id: Option<String> = "id" => Collapse, required;
        }
        elements {
            from_outcome: Option<String> = "from-outcome" => text(Collapse);
        }
    }
}

descriptor! {
    pub struct FacesFlowReference: JAVAEE, "faces-config-flow-definition-flow-call-flow-referenceType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            flow_document_id: Option<String> = "flow-document-id" => text(Collapse);
            flow_id: Option<String> = "flow-id" => text(Collapse), required;
        }
    }
}

descriptor! {
    /// An inbound or outbound flow parameter.
    pub struct FacesFlowParameter: JAVAEE, "faces-config-flow-definition-inbound-parameterType" {
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
    pub struct FacesFlowCall: JAVAEE, "faces-config-flow-definition-flow-callType" {
        attributes {
            id: Option<String> = "id" => Collapse, required;
        }
        elements {
            flow_reference: Option<FacesFlowReference> = "flow-reference" => node, required;
            outbound_parameter: Vec<FacesFlowParameter> = "outbound-parameter" => node;
        }
    }
}

descriptor! {
    pub struct FacesFlowMethodCall: JAVAEE, "faces-config-flow-definition-faces-method-callType" {
        attributes {
            id: Option<String> = "id" => Collapse, required;
        }
        elements {
            method: Option<String> = "method" => text(Verbatim), required;
            default_outcome: Option<String> = "default-outcome" => text(Collapse);
        }
    }
}

descriptor! {
    pub struct FacesFlowDefinition: JAVAEE, "faces-config-flow-definitionType" {
        attributes {
            id: Option<String> = "id" => Collapse, required;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            display_name: LocalizedList<Text> = "display-name" => node;
            icon: LocalizedList<Icon> = "icon" => node;
            start_node: Option<String> = "start-node" => text(Collapse);
            view: Vec<FacesFlowView> = "view" => node;
            switch: Vec<FacesFlowSwitch> = "switch" => node;
            flow_return: Vec<FacesFlowReturn> = "flow-return" => node;
            navigation_rule: Vec<FacesNavigationRule> = "navigation-rule" => node;
            flow_call: Vec<FacesFlowCall> = "flow-call" => node;
            method_call: Vec<FacesFlowMethodCall> = "method-call" => node;
            initializer: Option<String> = "initializer" => text(Verbatim);
            finalizer: Option<String> = "finalizer" => text(Verbatim);
            inbound_parameter: Vec<FacesFlowParameter> = "inbound-parameter" => node;
        }
    }
}

descriptor! {
    pub struct FacesConfig: JAVAEE, "faces-configType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
            metadata_complete: Option<bool> = "metadata-complete" => Truth;
            version: Option<String> = "version" => Collapse;
        }
        elements {
            application: Vec<FacesApplication> = "application" => node;
            ordering: Vec<Ordering> = "ordering" => node;
            absolute_ordering: Option<OrderingList> = "absolute-ordering" => node;
            factory: Vec<FacesFactory> = "factory" => node;
            component: Vec<FacesComponent> = "component" => node;
            converter: Vec<FacesConverter> = "converter" => node;
            managed_bean: Vec<FacesManagedBean> = "managed-bean" => node;
            flow_definition: Vec<FacesFlowDefinition> = "flow-definition" => node;
            name: Vec<String> = "name" => text(Collapse);
            navigation_rule: Vec<FacesNavigationRule> = "navigation-rule" => node;
            referenced_bean: Vec<FacesReferencedBean> = "referenced-bean" => node;
            render_kit: Vec<FacesRenderKit> = "render-kit" => node;
            lifecycle: Vec<FacesLifecycle> = "lifecycle" => node;
            validator: Vec<FacesValidator> = "validator" => node;
            behavior: Vec<FacesBehavior> = "behavior" => node;
            faces_config_extension: Vec<Extension> = "faces-config-extension" => node;
        }
        defaults {
            version: Some("2.0".to_string()),
        }
    }
}

root_element!(FacesConfig, "faces-config", JAVAEE_FILTER);

impl FacesConfig {
    pub fn managed_bean(&self, name: &str) -> Option<&FacesManagedBean> {
        self.managed_bean
            .iter()
            .find(|bean| bean.managed_bean_name.as_deref() == Some(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dd_binder::{read_document, write_document, DiagnosticKind, WriteOptions};
    use pretty_assertions::assert_eq;

    const FACES_CONFIG: &str = r#"<faces-config xmlns="http://xmlns.jcp.org/xml/ns/javaee" version="2.2">
  <application>
    <message-bundle>shop.Messages</message-bundle>
    <locale-config><default-locale>en</default-locale><supported-locale>de</supported-locale></locale-config>
    <resource-library-contracts><contract-mapping/></resource-library-contracts>
    <el-resolver>shop.Resolver</el-resolver>
  </application>
  <managed-bean eager="true">
    <managed-bean-name>cart</managed-bean-name>
    <managed-bean-class>shop.Cart</managed-bean-class>
    <managed-bean-scope>session</managed-bean-scope>
    <managed-property>
      <property-name>items</property-name>
      <list-entries><value>a</value><null-value/><value>b</value></list-entries>
    </managed-property>
  </managed-bean>
  <flow-definition id="checkout">
    <start-node>address</start-node>
    <view id="address"><vdl-document>/checkout/address.xhtml</vdl-document></view>
    <flow-return id="done"><from-outcome>/index</from-outcome></flow-return>
  </flow-definition>
  <navigation-rule>
    <from-view-id>/cart.xhtml</from-view-id>
    <navigation-case>
      <from-outcome>pay</from-outcome>
      <if>#{cart.ready}</if>
      <to-view-id>/pay.xhtml</to-view-id>
      <redirect include-view-params="true"/>
    </navigation-case>
  </navigation-rule>
</faces-config>"#;

    fn faces_config(context: &mut Context) -> FacesConfig {
        read_document(FACES_CONFIG, &Default::default(), context)
            .unwrap()
            .unwrap()
    }

    #[test]
    fn application_skips_unmodelled_elements() {
        let mut context = Context::new();
        let config = faces_config(&mut context);
        assert!(!context.has_diagnostics(), "{:?}", context.diagnostics());
        let application = &config.application[0];
        assert_eq!(application.message_bundle, ["shop.Messages"]);
        assert_eq!(application.el_resolver, ["shop.Resolver"]);
        assert_eq!(
            application.locale_config[0].default_locale.as_deref(),
            Some("en")
        );
    }

    #[test]
    fn managed_bean_list_entries_keep_nulls_in_place() {
        let mut context = Context::new();
        let config = faces_config(&mut context);
        let cart = config.managed_bean("cart").unwrap();
        assert_eq!(cart.eager, Some(true));
        let entries = &cart.managed_property[0].list_entries.as_ref().unwrap().entries;
        assert_eq!(
            entries,
            &[
                ListEntry::Value("a".into()),
                ListEntry::Null,
                ListEntry::Value("b".into())
            ]
        );
    }

    #[test]
    fn list_entries_register_their_id() {
        let mut context = Context::new();
        let config: FacesConfig = read_document(
            r#"<faces-config xmlns="http://java.sun.com/xml/ns/javaee">
                 <managed-bean id="cart">
                   <managed-bean-name>cart</managed-bean-name>
                   <managed-property>
                     <property-name>items</property-name>
                     <list-entries id=" items "><value>a</value></list-entries>
                   </managed-property>
                 </managed-bean>
                 <managed-bean id="items"><managed-bean-name>other</managed-bean-name></managed-bean>
               </faces-config>"#,
            &Default::default(),
            &mut context,
        )
        .unwrap()
        .unwrap();
        let cart = config.managed_bean("cart").unwrap();
        let entries = cart.managed_property[0].list_entries.as_ref().unwrap();
        assert_eq!(entries.id.as_deref(), Some("items"));
        assert!(context.is_xml_id_registered("items"));
        assert_eq!(
            context.diagnostics()[0].kind,
            DiagnosticKind::DuplicateId { id: "items".into() }
        );
    }

    #[test]
    fn navigation_and_flows() {
        let mut context = Context::new();
        let config = faces_config(&mut context);
        let case = &config.navigation_rule[0].navigation_case[0];
        assert_eq!(case.condition.as_deref(), Some("#{cart.ready}"));
        assert_eq!(case.redirect.as_ref().unwrap().include_view_params, Some(true));

        let flow = &config.flow_definition[0];
        assert_eq!(flow.id.as_deref(), Some("checkout"));
        assert_eq!(flow.view[0].vdl_document.as_deref(), Some("/checkout/address.xhtml"));
        assert_eq!(flow.flow_return[0].from_outcome.as_deref(), Some("/index"));
    }

    #[test]
    fn round_trip_drops_only_unmodelled_content() {
        let mut context = Context::new();
        let config = faces_config(&mut context);
        let xml = write_document(&config, &WriteOptions::default(), &mut context).unwrap();
        assert!(!xml.contains("resource-library-contracts"));
        assert!(xml.contains("<null-value/>"));
        let again: FacesConfig = read_document(&xml, &Default::default(), &mut context)
            .unwrap()
            .unwrap();
        assert_eq!(again, config);
        assert!(!context.has_diagnostics(), "{:?}", context.diagnostics());
    }

    #[test]
    fn unknown_elements_outside_application_are_reported() {
        let mut context = Context::new();
        let _: FacesConfig = read_document(
            r#"<faces-config xmlns="http://java.sun.com/xml/ns/javaee">
                 <lifecycle><phase-listener>a.B</phase-listener><phase>x</phase></lifecycle>
               </faces-config>"#,
            &Default::default(),
            &mut context,
        )
        .unwrap()
        .unwrap();
        assert_eq!(context.diagnostics().len(), 1);
        assert!(matches!(
            context.diagnostics()[0].kind,
            DiagnosticKind::UnexpectedElement { .. }
        ));
    }
}

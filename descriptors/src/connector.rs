//! `ra.xml`, the resource adapter descriptor.

use dd_binder::{
    adapters::{Collapse, Truth, Typed, Verbatim},
    descriptor, LocalizedList,
};
use dd_builtins::enumeration;

use crate::{
    common::{Icon, Text},
    JAVAEE_FILTER, JAVAEE_NAMESPACE as JAVAEE,
};

enumeration! {
    pub enum TransactionSupport {
        NoTransaction = "NoTransaction",
        LocalTransaction = "LocalTransaction",
        XaTransaction = "XATransaction",
    }
}

descriptor! {
    pub struct License: JAVAEE, "licenseType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            license_required: Option<bool> = "license-required" => text(Truth), required;
        }
    }
}

descriptor! {
    pub struct ConfigProperty: JAVAEE, "config-propertyType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            config_property_name: Option<String> = "config-property-name" => text(Collapse), required;
            config_property_type: Option<String> = "config-property-type" => text(Collapse), required;
            config_property_value: Option<String> = "config-property-value" => text(Verbatim);
            config_property_ignore: Option<bool> = "config-property-ignore" => text(Truth);
            config_property_supports_dynamic_updates: Option<bool> =
                "config-property-supports-dynamic-updates" => text(Truth);
            config_property_confidential: Option<bool> = "config-property-confidential" => text(Truth);
        }
    }
}

keyed! {
    ConfigProperty => config_property_name,
}

descriptor! {
    pub struct AuthenticationMechanism: JAVAEE, "authentication-mechanismType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            authentication_mechanism_type: Option<String> = "authentication-mechanism-type" => text(Collapse), required;
            credential_interface: Option<String> = "credential-interface" => text(Collapse), required;
        }
    }
}

descriptor! {
    pub struct ConnectionDefinition: JAVAEE, "connection-definitionType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            managedconnectionfactory_class: Option<String> = "managedconnectionfactory-class" => text(Collapse), required;
            config_property: Vec<ConfigProperty> = "config-property" => node;
            connectionfactory_interface: Option<String> = "connectionfactory-interface" => text(Collapse), required;
            connectionfactory_impl_class: Option<String> = "connectionfactory-impl-class" => text(Collapse), required;
            connection_interface: Option<String> = "connection-interface" => text(Collapse), required;
            connection_impl_class: Option<String> = "connection-impl-class" => text(Collapse), required;
        }
    }
}

descriptor! {
    pub struct OutboundResourceAdapter: JAVAEE, "outbound-resourceadapterType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            connection_definition: Vec<ConnectionDefinition> = "connection-definition" => node;
            transaction_support: Option<TransactionSupport> = "transaction-support" => text(Typed<TransactionSupport>);
            authentication_mechanism: Vec<AuthenticationMechanism> = "authentication-mechanism" => node;
            reauthentication_support: Option<bool> = "reauthentication-support" => text(Truth);
        }
    }
}

descriptor! {
    pub struct RequiredConfigProperty: JAVAEE, "required-config-propertyType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            config_property_name: Option<String> = "config-property-name" => text(Collapse), required;
        }
    }
}

descriptor! {
    pub struct ActivationSpec: JAVAEE, "activationspecType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            activationspec_class: Option<String> = "activationspec-class" => text(Collapse), required;
            required_config_property: Vec<RequiredConfigProperty> = "required-config-property" => node;
            config_property: Vec<ConfigProperty> = "config-property" => node;
        }
    }
}

descriptor! {
    pub struct MessageListener: JAVAEE, "messagelistenerType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            messagelistener_type: Option<String> = "messagelistener-type" => text(Collapse), required;
            activationspec: Option<ActivationSpec> = "activationspec" => node, required;
        }
    }
}

descriptor! {
    pub struct MessageAdapter: JAVAEE, "messageadapterType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            messagelistener: Vec<MessageListener> = "messagelistener" => node;
        }
    }
}

descriptor! {
    pub struct InboundResourceAdapter: JAVAEE, "inbound-resourceadapterType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            messageadapter: Option<MessageAdapter> = "messageadapter" => node;
        }
    }
}

descriptor! {
    pub struct AdminObject: JAVAEE, "adminobjectType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            adminobject_interface: Option<String> = "adminobject-interface" => text(Collapse), required;
            adminobject_class: Option<String> = "adminobject-class" => text(Collapse), required;
            config_property: Vec<ConfigProperty> = "config-property" => node;
        }
    }
}

descriptor! {
    pub struct SecurityPermission: JAVAEE, "security-permissionType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            security_permission_spec: Option<String> = "security-permission-spec" => text(Verbatim), required;
        }
    }
}

descriptor! {
    pub struct ResourceAdapter: JAVAEE, "resourceadapterType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            resourceadapter_class: Option<String> = "resourceadapter-class" => text(Collapse);
            config_property: Vec<ConfigProperty> = "config-property" => node;
            outbound_resourceadapter: Option<OutboundResourceAdapter> = "outbound-resourceadapter" => node;
            inbound_resourceadapter: Option<InboundResourceAdapter> = "inbound-resourceadapter" => node;
            adminobject: Vec<AdminObject> = "adminobject" => node;
            security_permission: Vec<SecurityPermission> = "security-permission" => node;
        }
    }
}

descriptor! {
    pub struct Connector: JAVAEE, "connectorType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
            version: Option<String> = "version" => Collapse;
            metadata_complete: Option<bool> = "metadata-complete" => Truth;
        }
        elements {
            module_name: Option<String> = "module-name" => text(Collapse);
            description: LocalizedList<Text> = "description" => node;
            display_name: LocalizedList<Text> = "display-name" => node;
            icon: LocalizedList<Icon> = "icon" => node;
            vendor_name: Option<String> = "vendor-name" => text(Collapse);
            eis_type: Option<String> = "eis-type" => text(Collapse);
            resourceadapter_version: Option<String> = "resourceadapter-version" => text(Collapse);
            license: Option<License> = "license" => node;
            resourceadapter: Option<ResourceAdapter> = "resourceadapter" => node, required;
            required_work_context: Vec<String> = "required-work-context" => text(Collapse);
        }
        defaults {
            version: Some("1.6".to_string()),
        }
    }
}

root_element!(Connector, "connector", JAVAEE_FILTER);

#[cfg(test)]
mod tests {
    use super::*;
    use dd_binder::{read_document, write_document, Context, DiagnosticKind, WriteOptions};
    use pretty_assertions::assert_eq;

    const J2EE_CONNECTOR: &str = r#"<connector xmlns="http://java.sun.com/xml/ns/j2ee" version="1.5">
  <vendor-name>Acme</vendor-name>
  <eis-type>Queue</eis-type>
  <resourceadapter-version>1.0</resourceadapter-version>
  <license><license-required>false</license-required></license>
  <resourceadapter>
    <resourceadapter-class>acme.Adapter</resourceadapter-class>
    <outbound-resourceadapter>
      <connection-definition>
        <managedconnectionfactory-class>acme.Mcf</managedconnectionfactory-class>
        <config-property>
          <config-property-name>Host</config-property-name>
          <config-property-type>java.lang.String</config-property-type>
          <config-property-value>localhost</config-property-value>
        </config-property>
        <connectionfactory-interface>acme.Cf</connectionfactory-interface>
        <connectionfactory-impl-class>acme.CfImpl</connectionfactory-impl-class>
        <connection-interface>acme.C</connection-interface>
        <connection-impl-class>acme.CImpl</connection-impl-class>
      </connection-definition>
      <transaction-support>XATransaction</transaction-support>
      <reauthentication-support>false</reauthentication-support>
    </outbound-resourceadapter>
  </resourceadapter>
</connector>"#;

    #[test]
    fn reads_j2ee_resource_adapter() {
        let mut context = Context::new();
        let connector: Connector = read_document(J2EE_CONNECTOR, &Default::default(), &mut context)
            .unwrap()
            .unwrap();
        assert!(!context.has_diagnostics(), "{:?}", context.diagnostics());
        assert_eq!(connector.version.as_deref(), Some("1.5"));
        let outbound = connector
            .resourceadapter
            .as_ref()
            .and_then(|ra| ra.outbound_resourceadapter.as_ref())
            .unwrap();
        assert_eq!(outbound.transaction_support, Some(TransactionSupport::XaTransaction));
        assert_eq!(
            outbound.connection_definition[0].config_property[0]
                .config_property_value
                .as_deref(),
            Some("localhost")
        );
    }

    #[test]
    fn round_trip_is_stable() {
        let mut context = Context::new();
        let connector: Connector = read_document(J2EE_CONNECTOR, &Default::default(), &mut context)
            .unwrap()
            .unwrap();
        let xml = write_document(&connector, &WriteOptions::default(), &mut context).unwrap();
        assert!(xml.contains("<transaction-support>XATransaction</transaction-support>"), "{xml}");
        let again: Connector = read_document(&xml, &Default::default(), &mut context)
            .unwrap()
            .unwrap();
        assert_eq!(again, connector);
        assert!(!context.has_diagnostics(), "{:?}", context.diagnostics());
    }

    #[test]
    fn missing_resource_adapter_is_reported_on_write() {
        let mut context = Context::new();
        let options = WriteOptions {
            indent: None,
            declaration: false,
        };
        let xml = write_document(&Connector::default(), &options, &mut context).unwrap();
        assert_eq!(
            xml,
            r#"<connector xmlns="http://java.sun.com/xml/ns/javaee" version="1.6"/>"#
        );
        assert_eq!(
            context.diagnostics()[0].kind,
            DiagnosticKind::MissingRequiredValue {
                field: "resourceadapter"
            }
        );
        assert_eq!(context.diagnostics().len(), 1);
    }
}

//! Environment references, keyed by their name element.

use dd_binder::{
    adapters::{Collapse, Int, QualifiedName, Truth, Typed, Verbatim},
    descriptor, LocalizedList, QName,
};
use dd_builtins::enumeration;

use crate::{
    common::{Icon, InjectionTarget, IsolationLevel, ParamValue, Property, Text},
    JAVAEE_NAMESPACE as JAVAEE,
};

enumeration! {
    pub enum EjbRefType {
        Entity = "Entity",
        Session = "Session",
    }
}

enumeration! {
    pub enum ResAuth {
        Application = "Application",
        Container = "Container",
    }
}

enumeration! {
    pub enum ResSharingScope {
        Shareable = "Shareable",
        Unshareable = "Unshareable",
    }
}

enumeration! {
    pub enum MessageDestinationUsage {
        Consumes = "Consumes",
        Produces = "Produces",
        ConsumesProduces = "ConsumesProduces",
    }
}

enumeration! {
    pub enum PersistenceContextType {
        Transaction = "Transaction",
        Extended = "Extended",
    }
}

descriptor! {
    pub struct EnvEntry: JAVAEE, "env-entryType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            env_entry_name: Option<String> = "env-entry-name" => text(Collapse), required;
            env_entry_type: Option<String> = "env-entry-type" => text(Collapse);
            env_entry_value: Option<String> = "env-entry-value" => text(Verbatim);
            mapped_name: Option<String> = "mapped-name" => text(Collapse);
            injection_target: Vec<InjectionTarget> = "injection-target" => node;
            lookup_name: Option<String> = "lookup-name" => text(Collapse);
        }
    }
}

descriptor! {
    pub struct EjbRef: JAVAEE, "ejb-refType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            ejb_ref_name: Option<String> = "ejb-ref-name" => text(Collapse), required;
            ejb_ref_type: Option<EjbRefType> = "ejb-ref-type" => text(Typed<EjbRefType>);
            home: Option<String> = "home" => text(Collapse);
            remote: Option<String> = "remote" => text(Collapse);
            ejb_link: Option<String> = "ejb-link" => text(Collapse);
            mapped_name: Option<String> = "mapped-name" => text(Collapse);
            injection_target: Vec<InjectionTarget> = "injection-target" => node;
            lookup_name: Option<String> = "lookup-name" => text(Collapse);
        }
    }
}

descriptor! {
    pub struct EjbLocalRef: JAVAEE, "ejb-local-refType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            ejb_ref_name: Option<String> = "ejb-ref-name" => text(Collapse), required;
            ejb_ref_type: Option<EjbRefType> = "ejb-ref-type" => text(Typed<EjbRefType>);
            local_home: Option<String> = "local-home" => text(Collapse);
            local: Option<String> = "local" => text(Collapse);
            ejb_link: Option<String> = "ejb-link" => text(Collapse);
            mapped_name: Option<String> = "mapped-name" => text(Collapse);
            injection_target: Vec<InjectionTarget> = "injection-target" => node;
            lookup_name: Option<String> = "lookup-name" => text(Collapse);
        }
    }
}

descriptor! {
    pub struct Addressing: JAVAEE, "addressingType" {
        attributes {}
        elements {
            enabled: Option<bool> = "enabled" => text(Truth);
            required: Option<bool> = "required" => text(Truth);
            responses: Option<String> = "responses" => text(Collapse);
        }
    }
}

descriptor! {
    pub struct RespectBinding: JAVAEE, "respect-bindingType" {
        attributes {}
        elements {
            enabled: Option<bool> = "enabled" => text(Truth);
        }
    }
}

descriptor! {
    pub struct PortComponentRef: JAVAEE, "port-component-refType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            service_endpoint_interface: Option<String> = "service-endpoint-interface" => text(Collapse);
            enable_mtom: Option<bool> = "enable-mtom" => text(Truth);
            mtom_threshold: Option<i32> = "mtom-threshold" => text(Int);
            addressing: Option<Addressing> = "addressing" => node;
            respect_binding: Option<RespectBinding> = "respect-binding" => node;
            port_component_link: Option<String> = "port-component-link" => text(Collapse);
        }
    }
}

descriptor! {
    /// A JAX-WS/JAX-RPC handler declared on a service reference or a port.
    pub struct Handler: JAVAEE, "handlerType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            display_name: LocalizedList<Text> = "display-name" => node;
            icon: LocalizedList<Icon> = "icon" => node;
            handler_name: Option<String> = "handler-name" => text(Collapse), required;
            handler_class: Option<String> = "handler-class" => text(Collapse), required;
            init_param: Vec<ParamValue> = "init-param" => node;
            soap_header: Vec<QName> = "soap-header" => text(QualifiedName);
            soap_role: Vec<String> = "soap-role" => text(Collapse);
            port_name: Vec<String> = "port-name" => text(Collapse);
        }
    }
}

descriptor! {
    pub struct HandlerChain: JAVAEE, "handler-chainType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            service_name_pattern: Option<String> = "service-name-pattern" => text(Collapse);
            port_name_pattern: Option<String> = "port-name-pattern" => text(Collapse);
            protocol_bindings: Option<String> = "protocol-bindings" => text(Collapse);
            handler: Vec<Handler> = "handler" => node;
        }
    }
}

descriptor! {
    pub struct HandlerChains: JAVAEE, "handler-chainsType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            handler_chain: Vec<HandlerChain> = "handler-chain" => node;
        }
    }
}

descriptor! {
    pub struct ServiceRef: JAVAEE, "service-refType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            display_name: LocalizedList<Text> = "display-name" => node;
            icon: LocalizedList<Icon> = "icon" => node;
            service_ref_name: Option<String> = "service-ref-name" => text(Collapse), required;
            service_interface: Option<String> = "service-interface" => text(Collapse), required;
            service_ref_type: Option<String> = "service-ref-type" => text(Collapse);
            wsdl_file: Option<String> = "wsdl-file" => text(Collapse);
            jaxrpc_mapping_file: Option<String> = "jaxrpc-mapping-file" => text(Collapse);
            service_qname: Option<QName> = "service-qname" => text(QualifiedName);
            port_component_ref: Vec<PortComponentRef> = "port-component-ref" => node;
            handler: Vec<Handler> = "handler" => node;
            handler_chains: Option<HandlerChains> = "handler-chains" => node;
            mapped_name: Option<String> = "mapped-name" => text(Collapse);
            injection_target: Vec<InjectionTarget> = "injection-target" => node;
            lookup_name: Option<String> = "lookup-name" => text(Collapse);
        }
    }
}

descriptor! {
    pub struct ResourceRef: JAVAEE, "resource-refType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            res_ref_name: Option<String> = "res-ref-name" => text(Collapse), required;
            res_type: Option<String> = "res-type" => text(Collapse);
            res_auth: Option<ResAuth> = "res-auth" => text(Typed<ResAuth>);
            res_sharing_scope: Option<ResSharingScope> = "res-sharing-scope" => text(Typed<ResSharingScope>);
            mapped_name: Option<String> = "mapped-name" => text(Collapse);
            injection_target: Vec<InjectionTarget> = "injection-target" => node;
            lookup_name: Option<String> = "lookup-name" => text(Collapse);
        }
    }
}

descriptor! {
    pub struct ResourceEnvRef: JAVAEE, "resource-env-refType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            resource_env_ref_name: Option<String> = "resource-env-ref-name" => text(Collapse), required;
            resource_env_ref_type: Option<String> = "resource-env-ref-type" => text(Collapse);
            mapped_name: Option<String> = "mapped-name" => text(Collapse);
            injection_target: Vec<InjectionTarget> = "injection-target" => node;
            lookup_name: Option<String> = "lookup-name" => text(Collapse);
        }
    }
}

descriptor! {
    pub struct MessageDestinationRef: JAVAEE, "message-destination-refType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            message_destination_ref_name: Option<String> = "message-destination-ref-name" => text(Collapse), required;
            message_destination_type: Option<String> = "message-destination-type" => text(Collapse);
            message_destination_usage: Option<MessageDestinationUsage> =
                "message-destination-usage" => text(Typed<MessageDestinationUsage>);
            message_destination_link: Option<String> = "message-destination-link" => text(Collapse);
            mapped_name: Option<String> = "mapped-name" => text(Collapse);
            injection_target: Vec<InjectionTarget> = "injection-target" => node;
            lookup_name: Option<String> = "lookup-name" => text(Collapse);
        }
    }
}

descriptor! {
    pub struct PersistenceContextRef: JAVAEE, "persistence-context-refType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            persistence_context_ref_name: Option<String> = "persistence-context-ref-name" => text(Collapse), required;
            persistence_unit_name: Option<String> = "persistence-unit-name" => text(Collapse);
            persistence_context_type: Option<PersistenceContextType> =
                "persistence-context-type" => text(Typed<PersistenceContextType>);
            persistence_property: Vec<Property> = "persistence-property" => node;
            mapped_name: Option<String> = "mapped-name" => text(Collapse);
            injection_target: Vec<InjectionTarget> = "injection-target" => node;
        }
    }
}

descriptor! {
    pub struct PersistenceUnitRef: JAVAEE, "persistence-unit-refType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            persistence_unit_ref_name: Option<String> = "persistence-unit-ref-name" => text(Collapse), required;
            persistence_unit_name: Option<String> = "persistence-unit-name" => text(Collapse);
            mapped_name: Option<String> = "mapped-name" => text(Collapse);
            injection_target: Vec<InjectionTarget> = "injection-target" => node;
        }
    }
}

descriptor! {
    pub struct DataSource: JAVAEE, "data-sourceType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            name: Option<String> = "name" => text(Collapse), required;
            class_name: Option<String> = "class-name" => text(Collapse);
            server_name: Option<String> = "server-name" => text(Collapse);
            port_number: Option<i32> = "port-number" => text(Int);
            database_name: Option<String> = "database-name" => text(Collapse);
            url: Option<String> = "url" => text(Collapse);
            user: Option<String> = "user" => text(Collapse);
            password: Option<String> = "password" => text(Collapse);
            property: Vec<Property> = "property" => node;
            login_timeout: Option<i32> = "login-timeout" => text(Int);
            transactional: Option<bool> = "transactional" => text(Truth);
            isolation_level: Option<IsolationLevel> = "isolation-level" => text(Typed<IsolationLevel>);
            initial_pool_size: Option<i32> = "initial-pool-size" => text(Int);
            max_pool_size: Option<i32> = "max-pool-size" => text(Int);
            min_pool_size: Option<i32> = "min-pool-size" => text(Int);
            max_idle_time: Option<i32> = "max-idle-time" => text(Int);
            max_statements: Option<i32> = "max-statements" => text(Int);
        }
    }
}

descriptor! {
    pub struct JmsConnectionFactory: JAVAEE, "jms-connection-factoryType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            name: Option<String> = "name" => text(Collapse), required;
            class_name: Option<String> = "class-name" => text(Collapse);
            interface_name: Option<String> = "interface-name" => text(Collapse);
            resource_adapter: Option<String> = "resource-adapter" => text(Collapse);
            user: Option<String> = "user" => text(Collapse);
            password: Option<String> = "password" => text(Collapse);
            client_id: Option<String> = "client-id" => text(Collapse);
            transactional: Option<bool> = "transactional" => text(Truth);
            max_pool_size: Option<i32> = "max-pool-size" => text(Int);
            min_pool_size: Option<i32> = "min-pool-size" => text(Int);
            property: Vec<Property> = "property" => node;
        }
    }
}

descriptor! {
    pub struct JmsDestination: JAVAEE, "jms-destinationType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            name: Option<String> = "name" => text(Collapse), required;
            interface_name: Option<String> = "interface-name" => text(Collapse), required;
            class_name: Option<String> = "class-name" => text(Collapse);
            resource_adapter: Option<String> = "resource-adapter" => text(Collapse);
            destination_name: Option<String> = "destination-name" => text(Collapse);
            property: Vec<Property> = "property" => node;
        }
    }
}

keyed! {
    EnvEntry => env_entry_name,
    EjbRef => ejb_ref_name,
    EjbLocalRef => ejb_ref_name,
    ServiceRef => service_ref_name,
    ResourceRef => res_ref_name,
    ResourceEnvRef => resource_env_ref_name,
    MessageDestinationRef => message_destination_ref_name,
    PersistenceContextRef => persistence_context_ref_name,
    PersistenceUnitRef => persistence_unit_ref_name,
    DataSource => name,
    JmsConnectionFactory => name,
    JmsDestination => name,
    Handler => handler_name,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WebApp;
    use dd_binder::{
        read_document, read_node, write_document, Context, DiagnosticKind, ElementReader,
        KeyedCollection, Scope, WriteOptions, XmlNode,
    };
    use pretty_assertions::assert_eq;

    fn read<T: XmlNode>(xml: &str, context: &mut Context) -> Option<T> {
        let document = dd_binder::parse_document(xml, &Default::default(), context).unwrap();
        read_node(&ElementReader::new(document.root_element(), Scope::default()), context)
    }

    #[test]
    fn env_entry_reads_injection_targets_in_order() {
        let mut context = Context::new();
        let entry: EnvEntry = read(
            r#"<env-entry xmlns="http://java.sun.com/xml/ns/javaee" id="e1">
                 <env-entry-name> greeting </env-entry-name>
                 <env-entry-type>java.lang.String</env-entry-type>
                 <env-entry-value> Hello </env-entry-value>
                 <injection-target>
                   <injection-target-class>a.A</injection-target-class>
                   <injection-target-name>one</injection-target-name>
                 </injection-target>
                 <injection-target>
                   <injection-target-class>b.B</injection-target-class>
                   <injection-target-name>two</injection-target-name>
                 </injection-target>
               </env-entry>"#,
            &mut context,
        )
        .unwrap();
        assert!(!context.has_diagnostics(), "{:?}", context.diagnostics());
        assert_eq!(entry.env_entry_name.as_deref(), Some("greeting"));
        assert_eq!(entry.env_entry_value.as_deref(), Some(" Hello "));
        let names: Vec<_> = entry
            .injection_target
            .iter()
            .filter_map(|t| t.injection_target_name.as_deref())
            .collect();
        assert_eq!(names, ["one", "two"]);
    }

    #[test]
    fn unknown_enumeration_token_is_skipped() {
        let mut context = Context::new();
        let resource: ResourceRef = read(
            r#"<resource-ref xmlns="http://java.sun.com/xml/ns/javaee">
                 <res-ref-name>jdbc/db</res-ref-name>
                 <res-auth>Somebody</res-auth>
                 <res-sharing-scope> Unshareable </res-sharing-scope>
               </resource-ref>"#,
            &mut context,
        )
        .unwrap();
        assert_eq!(resource.res_auth, None);
        assert_eq!(resource.res_sharing_scope, Some(ResSharingScope::Unshareable));
        assert_eq!(context.diagnostics().len(), 1);
        assert_eq!(context.diagnostics()[0].kind.name(), "adapter-conversion");
    }

    #[test]
    fn service_qname_resolves_prefix() {
        let mut context = Context::new();
        let service: ServiceRef = read(
            r#"<service-ref xmlns="http://java.sun.com/xml/ns/javaee" xmlns:ns="urn:echo">
                 <service-ref-name>service/Echo</service-ref-name>
                 <service-interface>javax.xml.ws.Service</service-interface>
                 <service-qname>ns:EchoService</service-qname>
               </service-ref>"#,
            &mut context,
        )
        .unwrap();
        assert_eq!(
            service.service_qname,
            Some(QName::with_namespace("urn:echo", "EchoService"))
        );
    }

    #[test]
    fn unqualified_service_qname_is_left_out_when_written() {
        let mut context = Context::new();
        let app: WebApp = read_document(
            r#"<web-app><service-ref>
                 <service-ref-name>s</service-ref-name>
                 <service-interface>javax.xml.ws.Service</service-interface>
                 <service-qname>Echo</service-qname>
               </service-ref></web-app>"#,
            &Default::default(),
            &mut context,
        )
        .unwrap()
        .unwrap();
        assert!(!context.has_diagnostics(), "{:?}", context.diagnostics());
        assert_eq!(
            app.service_ref.get("s").unwrap().service_qname,
            Some(QName::from_table("", "Echo"))
        );

        let xml = write_document(&app, &WriteOptions::default(), &mut context).unwrap();
        assert!(xml.contains("<service-ref-name>s</service-ref-name>"), "{xml}");
        assert!(!xml.contains("service-qname"), "{xml}");
        assert_eq!(context.diagnostics().len(), 1);
        assert!(matches!(
            &context.diagnostics()[0].kind,
            DiagnosticKind::AdapterConversion { adapter: "qname", value, .. } if value == "Echo"
        ));
    }

    #[test]
    fn foreign_service_qname_survives_a_round_trip() {
        let mut app = WebApp::default();
        app.service_ref.push(ServiceRef {
            service_ref_name: Some("service/Echo".into()),
            service_interface: Some("javax.xml.ws.Service".into()),
            service_qname: Some(QName::with_namespace("urn:echo", "EchoService")),
            ..Default::default()
        });
        let mut context = Context::new();
        let xml = write_document(&app, &WriteOptions::default(), &mut context).unwrap();
        assert!(xml.contains(r#"xmlns:ns1="urn:echo">ns1:EchoService<"#), "{xml}");
        let again: WebApp = read_document(&xml, &Default::default(), &mut context)
            .unwrap()
            .unwrap();
        assert_eq!(again, app);
        assert!(!context.has_diagnostics(), "{:?}", context.diagnostics());
    }

    #[test]
    fn keyed_lookup_uses_reference_names() {
        let refs: KeyedCollection<EjbLocalRef> = ["ejb/A", "ejb/B"]
            .into_iter()
            .map(|name| EjbLocalRef {
                ejb_ref_name: Some(name.to_string()),
                ..Default::default()
            })
            .collect();
        assert!(refs.contains_key("ejb/B"));
        assert_eq!(refs.keys().collect::<Vec<_>>(), ["ejb/A", "ejb/B"]);
    }
}

//! `webservices.xml`: port components and their implementation beans.

use dd_binder::{
    adapters::{Collapse, Int, QualifiedName, Truth},
    descriptor, KeyedCollection, LocalizedList, QName,
};

use crate::{
    common::{Icon, Text},
    refs::{Addressing, Handler, HandlerChains, RespectBinding},
    JAVAEE_FILTER, JAVAEE_NAMESPACE as JAVAEE,
};

descriptor! {
    /// The servlet or session bean implementing a port.
    pub struct ServiceImplBean: JAVAEE, "service-impl-beanType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            ejb_link: Option<String> = "ejb-link" => text(Collapse);
            servlet_link: Option<String> = "servlet-link" => text(Collapse);
        }
    }
}

descriptor! {
    pub struct PortComponent: JAVAEE, "port-componentType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: Option<Text> = "description" => node;
            display_name: Option<Text> = "display-name" => node;
            icon: Option<Icon> = "icon" => node;
            port_component_name: Option<String> = "port-component-name" => text(Collapse), required;
            wsdl_service: Option<QName> = "wsdl-service" => text(QualifiedName);
            wsdl_port: Option<QName> = "wsdl-port" => text(QualifiedName);
            enable_mtom: Option<bool> = "enable-mtom" => text(Truth);
            mtom_threshold: Option<i32> = "mtom-threshold" => text(Int);
            addressing: Option<Addressing> = "addressing" => node;
            respect_binding: Option<RespectBinding> = "respect-binding" => node;
            protocol_binding: Option<String> = "protocol-binding" => text(Collapse);
            service_endpoint_interface: Option<String> = "service-endpoint-interface" => text(Collapse);
            service_impl_bean: Option<ServiceImplBean> = "service-impl-bean" => node, required;
            handler: Vec<Handler> = "handler" => node;
            handler_chains: Option<HandlerChains> = "handler-chains" => node;
        }
    }
}

keyed! {
    PortComponent => port_component_name,
}

descriptor! {
    pub struct WebserviceDescription: JAVAEE, "webservice-descriptionType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: Option<Text> = "description" => node;
            display_name: Option<Text> = "display-name" => node;
            icon: Option<Icon> = "icon" => node;
            webservice_description_name: Option<String> = "webservice-description-name" => text(Collapse), required;
            wsdl_file: Option<String> = "wsdl-file" => text(Collapse);
            jaxrpc_mapping_file: Option<String> = "jaxrpc-mapping-file" => text(Collapse);
            port_component: KeyedCollection<PortComponent> = "port-component" => node;
        }
    }
}

descriptor! {
    pub struct Webservices: JAVAEE, "webservicesType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
            version: Option<String> = "version" => Collapse;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            display_name: LocalizedList<Text> = "display-name" => node;
            icon: LocalizedList<Icon> = "icon" => node;
            webservice_description: Vec<WebserviceDescription> = "webservice-description" => node;
        }
        defaults {
            version: Some("1.3".to_string()),
        }
    }
}

root_element!(Webservices, "webservices", JAVAEE_FILTER);

impl Webservices {
    /// Finds a port component across all descriptions.
    pub fn port_component(&self, name: &str) -> Option<&PortComponent> {
        self.webservice_description
            .iter()
            .find_map(|description| description.port_component.get(name))
    }
}

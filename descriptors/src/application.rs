//! `application.xml` and `application-client.xml`.

use dd_binder::{
    adapters::{Collapse, Truth},
    descriptor, KeyedCollection, LocalizedList,
};

use crate::{
    common::{Icon, LifecycleCallback, MessageDestination, SecurityRole, Text},
    refs::{
        DataSource, EjbLocalRef, EjbRef, EnvEntry, MessageDestinationRef, PersistenceContextRef,
        PersistenceUnitRef, ResourceEnvRef, ResourceRef, ServiceRef,
    },
    JAVAEE_FILTER, JAVAEE_NAMESPACE as JAVAEE,
};

descriptor! {
    pub struct Web: JAVAEE, "webType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            web_uri: Option<String> = "web-uri" => text(Collapse), required;
            context_root: Option<String> = "context-root" => text(Collapse), required;
        }
    }
}

descriptor! {
    /// One module of an enterprise application; exactly one of the module
    /// kinds is expected to be set.
    pub struct Module: JAVAEE, "moduleType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            connector: Option<String> = "connector" => text(Collapse);
            ejb: Option<String> = "ejb" => text(Collapse);
            java: Option<String> = "java" => text(Collapse);
            web: Option<Web> = "web" => node;
            alt_dd: Option<String> = "alt-dd" => text(Collapse);
        }
    }
}

descriptor! {
    pub struct Application: JAVAEE, "applicationType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
            version: Option<String> = "version" => Collapse;
        }
        elements {
            application_name: Option<String> = "application-name" => text(Collapse);
            description: LocalizedList<Text> = "description" => node;
            display_name: LocalizedList<Text> = "display-name" => node;
            icon: LocalizedList<Icon> = "icon" => node;
            initialize_in_order: Option<bool> = "initialize-in-order" => text(Truth);
            module: Vec<Module> = "module" => node;
            security_role: Vec<SecurityRole> = "security-role" => node;
            library_directory: Option<String> = "library-directory" => text(Collapse);
            env_entry: KeyedCollection<EnvEntry> = "env-entry" => node;
            ejb_ref: KeyedCollection<EjbRef> = "ejb-ref" => node;
            ejb_local_ref: KeyedCollection<EjbLocalRef> = "ejb-local-ref" => node;
            service_ref: KeyedCollection<ServiceRef> = "service-ref" => node;
            resource_ref: KeyedCollection<ResourceRef> = "resource-ref" => node;
            resource_env_ref: KeyedCollection<ResourceEnvRef> = "resource-env-ref" => node;
            message_destination_ref: KeyedCollection<MessageDestinationRef> = "message-destination-ref" => node;
            persistence_context_ref: KeyedCollection<PersistenceContextRef> = "persistence-context-ref" => node;
            persistence_unit_ref: KeyedCollection<PersistenceUnitRef> = "persistence-unit-ref" => node;
            message_destination: KeyedCollection<MessageDestination> = "message-destination" => node;
            data_source: KeyedCollection<DataSource> = "data-source" => node;
        }
        defaults {
            version: Some("6".to_string()),
        }
    }
}

root_element!(Application, "application", JAVAEE_FILTER);

descriptor! {
    pub struct ApplicationClient: JAVAEE, "application-clientType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
            metadata_complete: Option<bool> = "metadata-complete" => Truth;
            version: Option<String> = "version" => Collapse;
        }
        elements {
            module_name: Option<String> = "module-name" => text(Collapse);
            description: LocalizedList<Text> = "description" => node;
            display_name: LocalizedList<Text> = "display-name" => node;
            icon: LocalizedList<Icon> = "icon" => node;
            env_entry: KeyedCollection<EnvEntry> = "env-entry" => node;
            ejb_ref: KeyedCollection<EjbRef> = "ejb-ref" => node;
            ejb_local_ref: KeyedCollection<EjbLocalRef> = "ejb-local-ref" => node;
            service_ref: KeyedCollection<ServiceRef> = "service-ref" => node;
            resource_ref: KeyedCollection<ResourceRef> = "resource-ref" => node;
            resource_env_ref: KeyedCollection<ResourceEnvRef> = "resource-env-ref" => node;
            message_destination_ref: KeyedCollection<MessageDestinationRef> = "message-destination-ref" => node;
            persistence_context_ref: KeyedCollection<PersistenceContextRef> = "persistence-context-ref" => node;
            persistence_unit_ref: KeyedCollection<PersistenceUnitRef> = "persistence-unit-ref" => node;
            post_construct: Vec<LifecycleCallback> = "post-construct" => node;
            pre_destroy: Vec<LifecycleCallback> = "pre-destroy" => node;
            callback_handler: Option<String> = "callback-handler" => text(Collapse);
            message_destination: KeyedCollection<MessageDestination> = "message-destination" => node;
            data_source: KeyedCollection<DataSource> = "data-source" => node;
        }
        defaults {
            version: Some("6".to_string()),
        }
    }
}

root_element!(ApplicationClient, "application-client", JAVAEE_FILTER);

//! `ejb-jar.xml`: enterprise beans, interceptors, relationships and the
//! assembly descriptor.

use std::io::Write;

use dd_binder::{
    adapters::{BooleanWord, Collapse, Long, Truth, Typed, Verbatim},
    descriptor, read_attribute, read_node, unknown_element, write_attribute,
    write_node, BindError, Context, ElementReader, Keyed, KeyedCollection, LocalizedList,
    XmlNode, XmlWriter, XSI_NAMESPACE,
};
use dd_builtins::enumeration;

use crate::{
    common::{
        Empty, Icon, LifecycleCallback, MessageDestination, MethodParams, NamedMethod,
        SecurityIdentity, SecurityRole, SecurityRoleRef, Text, TransactionType,
    },
    refs::{
        DataSource, EjbLocalRef, EjbRef, EnvEntry, JmsConnectionFactory, JmsDestination,
        MessageDestinationRef, PersistenceContextRef, PersistenceUnitRef, ResourceEnvRef,
        ResourceRef, ServiceRef,
    },
    JAVAEE_FILTER, JAVAEE_NAMESPACE as JAVAEE,
};

enumeration! {
    pub enum SessionType {
        Stateful = "Stateful",
        Stateless = "Stateless",
        Singleton = "Singleton",
    }
}

enumeration! {
    pub enum ConcurrencyManagementType {
        Bean = "Bean",
        Container = "Container",
    }
}

enumeration! {
    pub enum ConcurrentLockType {
        Read = "Read",
        Write = "Write",
    }
}

enumeration! {
    pub enum TimeUnit {
        Days = "Days",
        Hours = "Hours",
        Minutes = "Minutes",
        Seconds = "Seconds",
        Milliseconds = "Milliseconds",
        Microseconds = "Microseconds",
        Nanoseconds = "Nanoseconds",
    }
}

enumeration! {
    pub enum PersistenceType {
        Bean = "Bean",
        Container = "Container",
    }
}

enumeration! {
    pub enum CmpVersion {
        Cmp1 = "1.x",
        Cmp2 = "2.x",
    }
}

enumeration! {
    pub enum ResultTypeMapping {
        Local = "Local",
        Remote = "Remote",
    }
}

enumeration! {
    pub enum MethodIntf {
        Home = "Home",
        Remote = "Remote",
        LocalHome = "LocalHome",
        Local = "Local",
        ServiceEndpoint = "ServiceEndpoint",
        Timer = "Timer",
        MessageEndpoint = "MessageEndpoint",
    }
}

enumeration! {
    pub enum TransAttribute {
        NotSupported = "NotSupported",
        Supports = "Supports",
        Required = "Required",
        RequiresNew = "RequiresNew",
        Mandatory = "Mandatory",
        Never = "Never",
    }
}

enumeration! {
    pub enum Multiplicity {
        One = "One",
        Many = "Many",
    }
}

descriptor! {
    pub struct AroundInvoke: JAVAEE, "around-invokeType" {
        attributes {}
        elements {
            class: Option<String> = "class" => text(Collapse);
            method_name: Option<String> = "method-name" => text(Collapse), required;
        }
    }
}

descriptor! {
    pub struct AroundTimeout: JAVAEE, "around-timeoutType" {
        attributes {}
        elements {
            class: Option<String> = "class" => text(Collapse);
            method_name: Option<String> = "method-name" => text(Collapse), required;
        }
    }
}

descriptor! {
    /// Stateful timeout and access timeout values.
    pub struct Timeout: JAVAEE, "access-timeoutType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            timeout: Option<i64> = "timeout" => text(Long), required;
            unit: Option<TimeUnit> = "unit" => text(Typed<TimeUnit>), required;
        }
    }
}

descriptor! {
    pub struct TimerSchedule: JAVAEE, "timer-scheduleType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            second: Option<String> = "second" => text(Collapse);
            minute: Option<String> = "minute" => text(Collapse);
            hour: Option<String> = "hour" => text(Collapse);
            day_of_month: Option<String> = "day-of-month" => text(Collapse);
            month: Option<String> = "month" => text(Collapse);
            day_of_week: Option<String> = "day-of-week" => text(Collapse);
            year: Option<String> = "year" => text(Collapse);
        }
    }
}

descriptor! {
    pub struct Timer: JAVAEE, "timerType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            schedule: Option<TimerSchedule> = "schedule" => node, required;
            start: Option<String> = "start" => text(Collapse);
            end: Option<String> = "end" => text(Collapse);
            timeout_method: Option<NamedMethod> = "timeout-method" => node, required;
            persistent: Option<bool> = "persistent" => text(Truth);
            timezone: Option<String> = "timezone" => text(Collapse);
            info: Option<String> = "info" => text(Verbatim);
        }
    }
}

descriptor! {
    pub struct ConcurrentMethod: JAVAEE, "concurrent-methodType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            method: Option<NamedMethod> = "method" => node, required;
            lock: Option<ConcurrentLockType> = "lock" => text(Typed<ConcurrentLockType>);
            access_timeout: Option<Timeout> = "access-timeout" => node;
        }
    }
}

descriptor! {
    /// The `depends-on` wrapper of a session bean.
    pub struct DependsOn: JAVAEE, "depends-onType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            ejb_name: Vec<String> = "ejb-name" => text(Collapse);
        }
    }
}

descriptor! {
    pub struct InitMethod: JAVAEE, "init-methodType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            create_method: Option<NamedMethod> = "create-method" => node, required;
            bean_method: Option<NamedMethod> = "bean-method" => node, required;
        }
    }
}

descriptor! {
    pub struct RemoveMethod: JAVAEE, "remove-methodType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            bean_method: Option<NamedMethod> = "bean-method" => node, required;
            retain_if_exception: Option<bool> = "retain-if-exception" => text(Truth);
        }
    }
}

descriptor! {
    pub struct AsyncMethod: JAVAEE, "async-methodType" {
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
    pub struct SessionBean: JAVAEE, "session-beanType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            display_name: LocalizedList<Text> = "display-name" => node;
            icon: LocalizedList<Icon> = "icon" => node;
            ejb_name: Option<String> = "ejb-name" => text(Collapse), required;
            mapped_name: Option<String> = "mapped-name" => text(Collapse);
            home: Option<String> = "home" => text(Collapse);
            remote: Option<String> = "remote" => text(Collapse);
            local_home: Option<String> = "local-home" => text(Collapse);
            local: Option<String> = "local" => text(Collapse);
            business_local: Vec<String> = "business-local" => text(Collapse);
            business_remote: Vec<String> = "business-remote" => text(Collapse);
            local_bean: Option<Empty> = "local-bean" => node;
            service_endpoint: Option<String> = "service-endpoint" => text(Collapse);
            ejb_class: Option<String> = "ejb-class" => text(Collapse);
            session_type: Option<SessionType> = "session-type" => text(Typed<SessionType>);
            stateful_timeout: Option<Timeout> = "stateful-timeout" => node;
            timeout_method: Option<NamedMethod> = "timeout-method" => node;
            timer: Vec<Timer> = "timer" => node;
            init_on_startup: Option<bool> = "init-on-startup" => text(Truth);
            concurrency_management_type: Option<ConcurrencyManagementType> =
                "concurrency-management-type" => text(Typed<ConcurrencyManagementType>);
            concurrent_method: Vec<ConcurrentMethod> = "concurrent-method" => node;
            depends_on: Option<DependsOn> = "depends-on" => node;
            init_method: Vec<InitMethod> = "init-method" => node;
            remove_method: Vec<RemoveMethod> = "remove-method" => node;
            async_method: Vec<AsyncMethod> = "async-method" => node;
            transaction_type: Option<TransactionType> = "transaction-type" => text(Typed<TransactionType>);
            after_begin_method: Option<NamedMethod> = "after-begin-method" => node;
            before_completion_method: Option<NamedMethod> = "before-completion-method" => node;
            after_completion_method: Option<NamedMethod> = "after-completion-method" => node;
            around_invoke: Vec<AroundInvoke> = "around-invoke" => node;
            around_timeout: Vec<AroundTimeout> = "around-timeout" => node;
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
            data_source: KeyedCollection<DataSource> = "data-source" => node;
            jms_connection_factory: KeyedCollection<JmsConnectionFactory> = "jms-connection-factory" => node;
            jms_destination: KeyedCollection<JmsDestination> = "jms-destination" => node;
            post_activate: Vec<LifecycleCallback> = "post-activate" => node;
            pre_passivate: Vec<LifecycleCallback> = "pre-passivate" => node;
            security_role_ref: Vec<SecurityRoleRef> = "security-role-ref" => node;
            security_identity: Option<SecurityIdentity> = "security-identity" => node;
            passivation_capable: Option<bool> = "passivation-capable" => text(BooleanWord);
        }
    }
}

/// A session bean that must be stateless, e.g. in an EJB Lite container.
///
/// A fresh value is stateless; writing one whose session type was changed
/// to anything else records an unexpected-subclass diagnostic and leaves
/// the element out.
#[derive(Clone, Debug, PartialEq)]
pub struct StatelessBean(pub SessionBean);

impl Default for StatelessBean {
    fn default() -> Self {
        Self(SessionBean {
            session_type: Some(SessionType::Stateless),
            ..Default::default()
        })
    }
}

impl XmlNode for StatelessBean {
    const NAMESPACE: &'static str = JAVAEE;
    const TYPE_NAME: &'static str = "session-beanType";
    const TYPE_ALIASES: &'static [&'static str] = &["stateless-beanType"];

    fn read_fields(&mut self, reader: &ElementReader, context: &mut Context) {
        self.0.read_fields(reader, context);
    }

    fn write_fields<W: Write>(
        &self,
        writer: &mut XmlWriter<W>,
        context: &mut Context,
    ) -> Result<(), BindError> {
        self.0.write_fields(writer, context)
    }

    fn admit(&self, context: &mut Context) -> bool {
        match self.0.session_type {
            None | Some(SessionType::Stateless) => true,
            Some(other) => {
                context.unexpected_subclass(
                    Self::TYPE_NAME,
                    format!("{other} session bean"),
                    &["Stateless session bean"],
                );
                false
            }
        }
    }
}

descriptor! {
    pub struct ActivationConfigProperty: JAVAEE, "activation-config-propertyType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            activation_config_property_name: Option<String> = "activation-config-property-name" => text(Collapse), required;
            activation_config_property_value: Option<String> = "activation-config-property-value" => text(Verbatim), required;
        }
    }
}

keyed! {
    ActivationConfigProperty => activation_config_property_name,
}

descriptor! {
    pub struct ActivationConfig: JAVAEE, "activation-configType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            activation_config_property: KeyedCollection<ActivationConfigProperty> =
                "activation-config-property" => node;
        }
    }
}

descriptor! {
    /// EJB 2.0 destination declaration of a message-driven bean.
    pub struct MessageDrivenDestination: JAVAEE, "message-driven-destinationType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            destination_type: Option<String> = "destination-type" => text(Collapse);
            subscription_durability: Option<String> = "subscription-durability" => text(Collapse);
        }
    }
}

descriptor! {
    pub struct MessageDrivenBean: JAVAEE, "message-driven-beanType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            display_name: LocalizedList<Text> = "display-name" => node;
            icon: LocalizedList<Icon> = "icon" => node;
            ejb_name: Option<String> = "ejb-name" => text(Collapse), required;
            mapped_name: Option<String> = "mapped-name" => text(Collapse);
            ejb_class: Option<String> = "ejb-class" => text(Collapse);
            messaging_type: Option<String> = "messaging-type" => text(Collapse);
            timeout_method: Option<NamedMethod> = "timeout-method" => node;
            timer: Vec<Timer> = "timer" => node;
            transaction_type: Option<TransactionType> = "transaction-type" => text(Typed<TransactionType>);
            message_selector: Option<String> = "message-selector" => text(Collapse);
            acknowledge_mode: Option<String> = "acknowledge-mode" => text(Collapse);
            message_driven_destination: Option<MessageDrivenDestination> = "message-driven-destination" => node;
            message_destination_type: Option<String> = "message-destination-type" => text(Collapse);
            message_destination_link: Option<String> = "message-destination-link" => text(Collapse);
            activation_config: Option<ActivationConfig> = "activation-config" => node;
            around_invoke: Vec<AroundInvoke> = "around-invoke" => node;
            around_timeout: Vec<AroundTimeout> = "around-timeout" => node;
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
            data_source: KeyedCollection<DataSource> = "data-source" => node;
            security_role_ref: Vec<SecurityRoleRef> = "security-role-ref" => node;
            security_identity: Option<SecurityIdentity> = "security-identity" => node;
        }
    }
}

descriptor! {
    pub struct CmpField: JAVAEE, "cmp-fieldType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            field_name: Option<String> = "field-name" => text(Collapse), required;
        }
    }
}

descriptor! {
    pub struct QueryMethod: JAVAEE, "query-methodType" {
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
    pub struct Query: JAVAEE, "queryType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: Option<Text> = "description" => node;
            query_method: Option<QueryMethod> = "query-method" => node, required;
            result_type_mapping: Option<ResultTypeMapping> = "result-type-mapping" => text(Typed<ResultTypeMapping>);
            ejb_ql: Option<String> = "ejb-ql" => text(Verbatim), required;
        }
    }
}

descriptor! {
    pub struct EntityBean: JAVAEE, "entity-beanType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            display_name: LocalizedList<Text> = "display-name" => node;
            icon: LocalizedList<Icon> = "icon" => node;
            ejb_name: Option<String> = "ejb-name" => text(Collapse), required;
            mapped_name: Option<String> = "mapped-name" => text(Collapse);
            home: Option<String> = "home" => text(Collapse);
            remote: Option<String> = "remote" => text(Collapse);
            local_home: Option<String> = "local-home" => text(Collapse);
            local: Option<String> = "local" => text(Collapse);
            ejb_class: Option<String> = "ejb-class" => text(Collapse), required;
            persistence_type: Option<PersistenceType> = "persistence-type" => text(Typed<PersistenceType>), required;
            prim_key_class: Option<String> = "prim-key-class" => text(Collapse), required;
            reentrant: Option<bool> = "reentrant" => text(BooleanWord), required;
            cmp_version: Option<CmpVersion> = "cmp-version" => text(Typed<CmpVersion>);
            abstract_schema_name: Option<String> = "abstract-schema-name" => text(Collapse);
            cmp_field: Vec<CmpField> = "cmp-field" => node;
            primkey_field: Option<String> = "primkey-field" => text(Collapse);
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
            data_source: KeyedCollection<DataSource> = "data-source" => node;
            security_role_ref: Vec<SecurityRoleRef> = "security-role-ref" => node;
            security_identity: Option<SecurityIdentity> = "security-identity" => node;
            query: Vec<Query> = "query" => node;
        }
    }
}

/// One entry of `enterprise-beans`.
#[derive(Clone, Debug, PartialEq)]
pub enum EnterpriseBean {
    Session(SessionBean),
    MessageDriven(MessageDrivenBean),
    Entity(EntityBean),
}

impl EnterpriseBean {
    pub fn ejb_name(&self) -> Option<&str> {
        match self {
            Self::Session(bean) => bean.ejb_name.as_deref(),
            Self::MessageDriven(bean) => bean.ejb_name.as_deref(),
            Self::Entity(bean) => bean.ejb_name.as_deref(),
        }
    }

    pub fn ejb_class(&self) -> Option<&str> {
        match self {
            Self::Session(bean) => bean.ejb_class.as_deref(),
            Self::MessageDriven(bean) => bean.ejb_class.as_deref(),
            Self::Entity(bean) => bean.ejb_class.as_deref(),
        }
    }
}

impl Keyed for EnterpriseBean {
    fn key(&self) -> Option<&str> {
        self.ejb_name()
    }
}

/// The beans of an ejb-jar in document order, whatever their kind.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EnterpriseBeans {
    pub id: Option<String>,
    pub beans: KeyedCollection<EnterpriseBean>,
}

impl EnterpriseBeans {
    pub fn sessions(&self) -> impl Iterator<Item = &SessionBean> {
        self.beans.iter().filter_map(|bean| match bean {
            EnterpriseBean::Session(session) => Some(session),
            _ => None,
        })
    }

    pub fn message_driven(&self) -> impl Iterator<Item = &MessageDrivenBean> {
        self.beans.iter().filter_map(|bean| match bean {
            EnterpriseBean::MessageDriven(mdb) => Some(mdb),
            _ => None,
        })
    }

    pub fn entities(&self) -> impl Iterator<Item = &EntityBean> {
        self.beans.iter().filter_map(|bean| match bean {
            EnterpriseBean::Entity(entity) => Some(entity),
            _ => None,
        })
    }
}

impl XmlNode for EnterpriseBeans {
    const NAMESPACE: &'static str = JAVAEE;
    const TYPE_NAME: &'static str = "enterprise-beansType";

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
            let bean = if child.is_named(JAVAEE, "session") {
                read_node(&child, context).map(EnterpriseBean::Session)
            } else if child.is_named(JAVAEE, "message-driven") {
                read_node(&child, context).map(EnterpriseBean::MessageDriven)
            } else if child.is_named(JAVAEE, "entity") {
                read_node(&child, context).map(EnterpriseBean::Entity)
            } else {
                unknown_element::<Self>(&child, context, &["session", "message-driven", "entity"]);
                continue;
            };
            if let Some(bean) = bean {
                if first {
                    self.beans.clear();
                    first = false;
                }
                self.beans.push(bean);
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
        for bean in &self.beans {
            match bean {
                EnterpriseBean::Session(session) => {
                    write_node(writer, JAVAEE, "session", session, context)?
                }
                EnterpriseBean::MessageDriven(mdb) => {
                    write_node(writer, JAVAEE, "message-driven", mdb, context)?
                }
                EnterpriseBean::Entity(entity) => {
                    write_node(writer, JAVAEE, "entity", entity, context)?
                }
            }
        }
        Ok(())
    }
}

descriptor! {
    pub struct Interceptor: JAVAEE, "interceptorType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            interceptor_class: Option<String> = "interceptor-class" => text(Collapse), required;
            around_invoke: Vec<AroundInvoke> = "around-invoke" => node;
            around_timeout: Vec<AroundTimeout> = "around-timeout" => node;
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
            data_source: KeyedCollection<DataSource> = "data-source" => node;
            post_activate: Vec<LifecycleCallback> = "post-activate" => node;
            pre_passivate: Vec<LifecycleCallback> = "pre-passivate" => node;
            after_begin: Vec<LifecycleCallback> = "after-begin" => node;
            before_completion: Vec<LifecycleCallback> = "before-completion" => node;
            after_completion: Vec<LifecycleCallback> = "after-completion" => node;
        }
    }
}

descriptor! {
    pub struct Interceptors: JAVAEE, "interceptorsType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            interceptor: Vec<Interceptor> = "interceptor" => node;
        }
    }
}

descriptor! {
    pub struct RelationshipRoleSource: JAVAEE, "relationship-role-sourceType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            ejb_name: Option<String> = "ejb-name" => text(Collapse), required;
        }
    }
}

descriptor! {
    pub struct CmrField: JAVAEE, "cmr-fieldType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            cmr_field_name: Option<String> = "cmr-field-name" => text(Collapse), required;
            cmr_field_type: Option<String> = "cmr-field-type" => text(Collapse);
        }
    }
}

descriptor! {
    pub struct EjbRelationshipRole: JAVAEE, "ejb-relationship-roleType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            ejb_relationship_role_name: Option<String> = "ejb-relationship-role-name" => text(Collapse);
            multiplicity: Option<Multiplicity> = "multiplicity" => text(Typed<Multiplicity>), required;
            cascade_delete: Option<Empty> = "cascade-delete" => node;
            relationship_role_source: Option<RelationshipRoleSource> = "relationship-role-source" => node, required;
            cmr_field: Option<CmrField> = "cmr-field" => node;
        }
    }
}

descriptor! {
    pub struct EjbRelation: JAVAEE, "ejb-relationType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            ejb_relation_name: Option<String> = "ejb-relation-name" => text(Collapse);
            ejb_relationship_role: Vec<EjbRelationshipRole> = "ejb-relationship-role" => node;
        }
    }
}

descriptor! {
    pub struct Relationships: JAVAEE, "relationshipsType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            ejb_relation: Vec<EjbRelation> = "ejb-relation" => node;
        }
    }
}

descriptor! {
    pub struct Method: JAVAEE, "methodType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            ejb_name: Option<String> = "ejb-name" => text(Collapse), required;
            method_intf: Option<MethodIntf> = "method-intf" => text(Typed<MethodIntf>);
            method_name: Option<String> = "method-name" => text(Collapse), required;
            method_params: Option<MethodParams> = "method-params" => node;
        }
    }
}

descriptor! {
    pub struct MethodPermission: JAVAEE, "method-permissionType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            role_name: Vec<String> = "role-name" => text(Collapse);
            unchecked: Option<Empty> = "unchecked" => node;
            method: Vec<Method> = "method" => node;
        }
    }
}

descriptor! {
    pub struct ContainerTransaction: JAVAEE, "container-transactionType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            method: Vec<Method> = "method" => node;
            trans_attribute: Option<TransAttribute> = "trans-attribute" => text(Typed<TransAttribute>), required;
        }
    }
}

descriptor! {
    pub struct InterceptorOrder: JAVAEE, "interceptor-orderType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            interceptor_class: Vec<String> = "interceptor-class" => text(Collapse);
        }
    }
}

descriptor! {
    pub struct InterceptorBinding: JAVAEE, "interceptor-bindingType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            ejb_name: Option<String> = "ejb-name" => text(Collapse), required;
            interceptor_class: Vec<String> = "interceptor-class" => text(Collapse);
            interceptor_order: Option<InterceptorOrder> = "interceptor-order" => node;
            exclude_default_interceptors: Option<bool> = "exclude-default-interceptors" => text(Truth);
            exclude_class_interceptors: Option<bool> = "exclude-class-interceptors" => text(Truth);
            method: Option<NamedMethod> = "method" => node;
        }
    }
}

descriptor! {
    pub struct ExcludeList: JAVAEE, "exclude-listType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            method: Vec<Method> = "method" => node;
        }
    }
}

descriptor! {
    pub struct ApplicationException: JAVAEE, "application-exceptionType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            exception_class: Option<String> = "exception-class" => text(Collapse), required;
            rollback: Option<bool> = "rollback" => text(Truth);
            inherited: Option<bool> = "inherited" => text(Truth);
        }
    }
}

descriptor! {
    pub struct AssemblyDescriptor: JAVAEE, "assembly-descriptorType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            security_role: Vec<SecurityRole> = "security-role" => node;
            method_permission: Vec<MethodPermission> = "method-permission" => node;
            container_transaction: Vec<ContainerTransaction> = "container-transaction" => node;
            interceptor_binding: Vec<InterceptorBinding> = "interceptor-binding" => node;
            message_destination: KeyedCollection<MessageDestination> = "message-destination" => node;
            exclude_list: Option<ExcludeList> = "exclude-list" => node;
            application_exception: Vec<ApplicationException> = "application-exception" => node;
        }
    }
}

descriptor! {
    pub struct EjbJar: JAVAEE, "ejb-jarType" {
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
            enterprise_beans: Option<EnterpriseBeans> = "enterprise-beans" => node;
            interceptors: Option<Interceptors> = "interceptors" => node;
            relationships: Option<Relationships> = "relationships" => node;
            assembly_descriptor: Option<AssemblyDescriptor> = "assembly-descriptor" => node;
            ejb_client_jar: Option<String> = "ejb-client-jar" => text(Collapse);
        }
        defaults {
            version: Some("3.1".to_string()),
        }
    }
}

root_element!(EjbJar, "ejb-jar", JAVAEE_FILTER);

impl EjbJar {
    /// Finds a bean of any kind by name.
    pub fn bean(&self, ejb_name: &str) -> Option<&EnterpriseBean> {
        self.enterprise_beans.as_ref()?.beans.get(ejb_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dd_binder::{
        read_document, read_node_into, write_document, DiagnosticKind, Scope, WriteOptions,
    };
    use pretty_assertions::assert_eq;

    const EJB_JAR: &str = r#"<ejb-jar xmlns="http://java.sun.com/xml/ns/javaee" version="3.1">
  <enterprise-beans>
    <session>
      <ejb-name>Cart</ejb-name>
      <ejb-class>shop.CartBean</ejb-class>
      <session-type>Stateful</session-type>
      <stateful-timeout><timeout>30</timeout><unit>Minutes</unit></stateful-timeout>
      <depends-on><ejb-name>Catalog</ejb-name><ejb-name>Pricing</ejb-name></depends-on>
      <env-entry><env-entry-name>x</env-entry-name></env-entry>
      <env-entry><env-entry-name>x</env-entry-name></env-entry>
    </session>
    <message-driven>
      <ejb-name>Orders</ejb-name>
      <activation-config>
        <activation-config-property>
          <activation-config-property-name>destinationType</activation-config-property-name>
          <activation-config-property-value>javax.jms.Queue</activation-config-property-value>
        </activation-config-property>
      </activation-config>
    </message-driven>
    <session>
      <ejb-name>Catalog</ejb-name>
      <session-type>Singleton</session-type>
      <init-on-startup>true</init-on-startup>
    </session>
  </enterprise-beans>
  <assembly-descriptor>
    <container-transaction>
      <method><ejb-name>Cart</ejb-name><method-name>*</method-name></method>
      <trans-attribute>Required</trans-attribute>
    </container-transaction>
  </assembly-descriptor>
</ejb-jar>"#;

    fn ejb_jar(context: &mut Context) -> EjbJar {
        read_document(EJB_JAR, &Default::default(), context)
            .unwrap()
            .unwrap()
    }

    #[test]
    fn beans_keep_document_order_across_kinds() {
        let mut context = Context::new();
        let jar = ejb_jar(&mut context);
        assert!(!context.has_diagnostics(), "{:?}", context.diagnostics());
        let beans = jar.enterprise_beans.as_ref().unwrap();
        let names: Vec<_> = beans.beans.keys().collect();
        assert_eq!(names, ["Cart", "Orders", "Catalog"]);
        assert_eq!(beans.sessions().count(), 2);
        assert!(matches!(jar.bean("Orders"), Some(EnterpriseBean::MessageDriven(_))));
    }

    #[test]
    fn session_bean_details() {
        let mut context = Context::new();
        let jar = ejb_jar(&mut context);
        let Some(EnterpriseBean::Session(cart)) = jar.bean("Cart") else {
            panic!("Cart is not a session bean");
        };
        assert_eq!(cart.session_type, Some(SessionType::Stateful));
        let timeout = cart.stateful_timeout.as_ref().unwrap();
        assert_eq!((timeout.timeout, timeout.unit), (Some(30), Some(TimeUnit::Minutes)));
        assert_eq!(cart.depends_on.as_ref().unwrap().ejb_name, ["Catalog", "Pricing"]);
    }

    #[test]
    fn duplicate_env_entries_survive_parsing() {
        let mut context = Context::new();
        let jar = ejb_jar(&mut context);
        let Some(EnterpriseBean::Session(cart)) = jar.bean("Cart") else {
            panic!("Cart is not a session bean");
        };
        assert_eq!(cart.env_entry.len(), 2);
        assert_eq!(cart.env_entry.keys().collect::<Vec<_>>(), ["x", "x"]);
    }

    #[test]
    fn round_trip_is_stable() {
        let mut context = Context::new();
        let jar = ejb_jar(&mut context);
        let xml = write_document(&jar, &WriteOptions::default(), &mut context).unwrap();
        let again: EjbJar = read_document(&xml, &Default::default(), &mut context)
            .unwrap()
            .unwrap();
        assert_eq!(again, jar);
        assert!(!context.has_diagnostics(), "{:?}", context.diagnostics());
    }

    #[test]
    fn merging_replaces_pre_populated_beans_once() {
        let mut jar = EjbJar::default();
        jar.enterprise_beans = Some(EnterpriseBeans {
            id: None,
            beans: [EnterpriseBean::Session(SessionBean {
                ejb_name: Some("Old".into()),
                ..Default::default()
            })]
            .into_iter()
            .collect(),
        });
        let mut context = Context::new();
        let document =
            dd_binder::parse_document(EJB_JAR, &Default::default(), &mut context).unwrap();
        let reader = ElementReader::new(document.root_element(), Scope::default());
        assert!(read_node_into(&mut jar, &reader, &mut context));
        let names: Vec<_> = jar.enterprise_beans.unwrap().beans.keys().map(str::to_owned).collect();
        assert_eq!(names, ["Cart", "Orders", "Catalog"]);
    }

    #[test]
    fn nil_element_empties_pre_populated_field() {
        let mut jar = EjbJar {
            interceptors: Some(Interceptors::default()),
            module_name: Some("old".into()),
            ..Default::default()
        };
        let mut context = Context::new();
        let document = dd_binder::parse_document(
            r#"<ejb-jar xmlns="http://java.sun.com/xml/ns/javaee"
                 xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
                 <interceptors xsi:nil="true"/>
               </ejb-jar>"#,
            &Default::default(),
            &mut context,
        )
        .unwrap();
        let reader = ElementReader::new(document.root_element(), Scope::default());
        assert!(read_node_into(&mut jar, &reader, &mut context));
        assert_eq!(jar.interceptors, None);
        assert_eq!(jar.module_name.as_deref(), Some("old"));
        assert!(!context.has_diagnostics(), "{:?}", context.diagnostics());
    }

    #[test]
    fn stateless_slot_rejects_other_session_types() {
        let mut context = Context::new();
        let mut writer = XmlWriter::new(Vec::new(), &WriteOptions::default());
        let mut bean = StatelessBean::default();
        bean.0.ejb_name = Some("Cart".into());
        bean.0.session_type = Some(SessionType::Stateful);

        write_node(&mut writer, JAVAEE, "session", &bean, &mut context).unwrap();
        assert!(writer.finish().unwrap().is_empty());
        assert!(matches!(
            &context.diagnostics()[0].kind,
            DiagnosticKind::UnexpectedSubclass { found, .. } if found == "Stateful session bean"
        ));
    }

    #[test]
    fn passivation_capable_ignores_case() {
        let mut context = Context::new();
        let document = dd_binder::parse_document(
            r#"<session xmlns="http://java.sun.com/xml/ns/javaee">
                 <ejb-name>A</ejb-name><passivation-capable>TRUE</passivation-capable>
               </session>"#,
            &Default::default(),
            &mut context,
        )
        .unwrap();
        let reader = ElementReader::new(document.root_element(), Scope::default());
        let bean: StatelessBean = read_node(&reader, &mut context).unwrap();
        assert_eq!(bean.0.passivation_capable, Some(true));
        assert_eq!(bean.0.session_type, Some(SessionType::Stateless));
    }
}

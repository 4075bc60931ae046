//! `web.xml` and `web-fragment.xml`.

use std::{borrow::Cow, io::Write};

use dd_binder::{
    adapters::{Adapter, Collapse, Int, Long, Trim, Truth, Typed, Verbatim},
    descriptor, read_text, unknown_element, write_node, write_text, BindError, Context,
    ElementReader, KeyedCollection, LocalizedList, MarshalError, XmlNode, XmlWriter, XSI_NAMESPACE,
};
use dd_builtins::{enumeration, meta};

use crate::{
    common::{
        Empty, Icon, LifecycleCallback, MessageDestination, ParamValue, RunAs, SecurityRole,
        SecurityRoleRef, Text,
    },
    refs::{
        DataSource, EjbLocalRef, EjbRef, EnvEntry, JmsConnectionFactory, JmsDestination,
        MessageDestinationRef, PersistenceContextRef, PersistenceUnitRef, ResourceEnvRef,
        ResourceRef, ServiceRef,
    },
    JAVAEE_FILTER, JAVAEE_NAMESPACE as JAVAEE,
};

/// `load-on-startup`: an integer, with anything unparseable read as `0`.
pub struct LoadOnStartup;

impl Adapter for LoadOnStartup {
    type Value = i32;
    const NAME: &'static str = "load-on-startup";

    fn unmarshal(raw: &str, _reader: &ElementReader) -> Result<i32, meta::Error> {
        Ok(raw.trim_matches(meta::is_xml_whitespace).parse().unwrap_or(0))
    }

    fn marshal<'v, W: Write>(
        value: &'v i32,
        _writer: &mut XmlWriter<W>,
    ) -> Result<Cow<'v, str>, MarshalError> {
        Ok(Cow::Owned(value.to_string()))
    }
}

enumeration! {
    pub enum Dispatcher {
        Forward = "FORWARD",
        Include = "INCLUDE",
        Request = "REQUEST",
        Async = "ASYNC",
        Error = "ERROR",
    }
}

enumeration! {
    pub enum TrackingMode {
        Cookie = "COOKIE",
        Url = "URL",
        Ssl = "SSL",
    }
}

enumeration! {
    pub enum TransportGuarantee {
        None = "NONE",
        Integral = "INTEGRAL",
        Confidential = "CONFIDENTIAL",
    }
}

descriptor! {
    pub struct MultipartConfig: JAVAEE, "multipart-configType" {
        attributes {}
        elements {
            location: Option<String> = "location" => text(Collapse);
            max_file_size: Option<i64> = "max-file-size" => text(Long);
            max_request_size: Option<i64> = "max-request-size" => text(Long);
            file_size_threshold: Option<i32> = "file-size-threshold" => text(Int);
        }
    }
}

descriptor! {
    pub struct Servlet: JAVAEE, "servletType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            display_name: LocalizedList<Text> = "display-name" => node;
            icon: LocalizedList<Icon> = "icon" => node;
            servlet_name: Option<String> = "servlet-name" => text(Collapse), required;
            servlet_class: Option<String> = "servlet-class" => text(Collapse);
            jsp_file: Option<String> = "jsp-file" => text(Collapse);
            init_param: KeyedCollection<ParamValue> = "init-param" => node;
            load_on_startup: Option<i32> = "load-on-startup" => text(LoadOnStartup);
            enabled: Option<bool> = "enabled" => text(Truth);
            async_supported: Option<bool> = "async-supported" => text(Truth);
            run_as: Option<RunAs> = "run-as" => node;
            security_role_ref: Vec<SecurityRoleRef> = "security-role-ref" => node;
            multipart_config: Option<MultipartConfig> = "multipart-config" => node;
        }
    }
}

descriptor! {
    pub struct ServletMapping: JAVAEE, "servlet-mappingType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            servlet_name: Option<String> = "servlet-name" => text(Collapse), required;
            url_pattern: Vec<String> = "url-pattern" => text(Trim);
        }
    }
}

descriptor! {
    pub struct Filter: JAVAEE, "filterType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            display_name: LocalizedList<Text> = "display-name" => node;
            icon: LocalizedList<Icon> = "icon" => node;
            filter_name: Option<String> = "filter-name" => text(Collapse), required;
            filter_class: Option<String> = "filter-class" => text(Collapse);
            async_supported: Option<bool> = "async-supported" => text(Truth);
            init_param: KeyedCollection<ParamValue> = "init-param" => node;
        }
    }
}

descriptor! {
    pub struct FilterMapping: JAVAEE, "filter-mappingType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            filter_name: Option<String> = "filter-name" => text(Collapse), required;
            url_pattern: Vec<String> = "url-pattern" => text(Trim);
            servlet_name: Vec<String> = "servlet-name" => text(Collapse);
            dispatcher: Vec<Dispatcher> = "dispatcher" => text(Typed<Dispatcher>);
        }
    }
}

descriptor! {
    pub struct Listener: JAVAEE, "listenerType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            display_name: LocalizedList<Text> = "display-name" => node;
            icon: LocalizedList<Icon> = "icon" => node;
            listener_class: Option<String> = "listener-class" => text(Collapse), required;
        }
    }
}

descriptor! {
    pub struct CookieConfig: JAVAEE, "cookie-configType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            name: Option<String> = "name" => text(Collapse);
            domain: Option<String> = "domain" => text(Collapse);
            path: Option<String> = "path" => text(Collapse);
            comment: Option<String> = "comment" => text(Verbatim);
            http_only: Option<bool> = "http-only" => text(Truth);
            secure: Option<bool> = "secure" => text(Truth);
            max_age: Option<i32> = "max-age" => text(Int);
        }
    }
}

descriptor! {
    pub struct SessionConfig: JAVAEE, "session-configType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            session_timeout: Option<i32> = "session-timeout" => text(Int);
            cookie_config: Option<CookieConfig> = "cookie-config" => node;
            tracking_mode: Vec<TrackingMode> = "tracking-mode" => text(Typed<TrackingMode>);
        }
    }
}

descriptor! {
    pub struct MimeMapping: JAVAEE, "mime-mappingType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            extension: Option<String> = "extension" => text(Collapse), required;
            mime_type: Option<String> = "mime-type" => text(Collapse), required;
        }
    }
}

keyed! {
    MimeMapping => extension,
}

descriptor! {
    pub struct WelcomeFileList: JAVAEE, "welcome-file-listType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            welcome_file: Vec<String> = "welcome-file" => text(Collapse);
        }
    }
}

descriptor! {
    pub struct ErrorPage: JAVAEE, "error-pageType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            error_code: Option<i32> = "error-code" => text(Int);
            exception_type: Option<String> = "exception-type" => text(Collapse);
            location: Option<String> = "location" => text(Collapse), required;
        }
    }
}

descriptor! {
    pub struct Taglib: JAVAEE, "taglibType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            taglib_uri: Option<String> = "taglib-uri" => text(Collapse), required;
            taglib_location: Option<String> = "taglib-location" => text(Collapse), required;
        }
    }
}

descriptor! {
    pub struct JspPropertyGroup: JAVAEE, "jsp-property-groupType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            display_name: LocalizedList<Text> = "display-name" => node;
            icon: LocalizedList<Icon> = "icon" => node;
            url_pattern: Vec<String> = "url-pattern" => text(Trim);
            el_ignored: Option<bool> = "el-ignored" => text(Truth);
            page_encoding: Option<String> = "page-encoding" => text(Collapse);
            scripting_invalid: Option<bool> = "scripting-invalid" => text(Truth);
            is_xml: Option<bool> = "is-xml" => text(Truth);
            include_prelude: Vec<String> = "include-prelude" => text(Collapse);
            include_coda: Vec<String> = "include-coda" => text(Collapse);
            deferred_syntax_allowed_as_literal: Option<bool> = "deferred-syntax-allowed-as-literal" => text(Truth);
            trim_directive_whitespaces: Option<bool> = "trim-directive-whitespaces" => text(Truth);
            default_content_type: Option<String> = "default-content-type" => text(Collapse);
            buffer: Option<String> = "buffer" => text(Collapse);
            error_on_undeclared_namespace: Option<bool> = "error-on-undeclared-namespace" => text(Truth);
        }
    }
}

descriptor! {
    pub struct JspConfig: JAVAEE, "jsp-configType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            taglib: Vec<Taglib> = "taglib" => node;
            jsp_property_group: Vec<JspPropertyGroup> = "jsp-property-group" => node;
        }
    }
}

descriptor! {
    pub struct WebResourceCollection: JAVAEE, "web-resource-collectionType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            web_resource_name: Option<String> = "web-resource-name" => text(Collapse), required;
            description: LocalizedList<Text> = "description" => node;
            url_pattern: Vec<String> = "url-pattern" => text(Trim);
            http_method: Vec<String> = "http-method" => text(Collapse);
            http_method_omission: Vec<String> = "http-method-omission" => text(Collapse);
        }
    }
}

descriptor! {
    pub struct AuthConstraint: JAVAEE, "auth-constraintType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            role_name: Vec<String> = "role-name" => text(Collapse);
        }
    }
}

descriptor! {
    pub struct UserDataConstraint: JAVAEE, "user-data-constraintType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            transport_guarantee: Option<TransportGuarantee> =
                "transport-guarantee" => text(Typed<TransportGuarantee>), required;
        }
    }
}

descriptor! {
    pub struct SecurityConstraint: JAVAEE, "security-constraintType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            display_name: LocalizedList<Text> = "display-name" => node;
            web_resource_collection: Vec<WebResourceCollection> = "web-resource-collection" => node;
            auth_constraint: Option<AuthConstraint> = "auth-constraint" => node;
            user_data_constraint: Option<UserDataConstraint> = "user-data-constraint" => node;
        }
    }
}

descriptor! {
    pub struct FormLoginConfig: JAVAEE, "form-login-configType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            form_login_page: Option<String> = "form-login-page" => text(Collapse), required;
            form_error_page: Option<String> = "form-error-page" => text(Collapse), required;
        }
    }
}

descriptor! {
    pub struct LoginConfig: JAVAEE, "login-configType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            auth_method: Option<String> = "auth-method" => text(Collapse);
            realm_name: Option<String> = "realm-name" => text(Collapse);
            form_login_config: Option<FormLoginConfig> = "form-login-config" => node;
        }
    }
}

descriptor! {
    pub struct LocaleEncodingMapping: JAVAEE, "locale-encoding-mappingType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            locale: Option<String> = "locale" => text(Collapse), required;
            encoding: Option<String> = "encoding" => text(Collapse), required;
        }
    }
}

descriptor! {
    pub struct LocaleEncodingMappingList: JAVAEE, "locale-encoding-mapping-listType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            locale_encoding_mapping: Vec<LocaleEncodingMapping> = "locale-encoding-mapping" => node;
        }
    }
}

/// One step of an ordering: a named fragment or every other fragment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OrderingEntry {
    Name(String),
    Others,
}

/// A sequence of `name` and `others` elements whose relative order matters,
/// used by `absolute-ordering` and by `before`/`after` of `ordering`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OrderingList {
    pub entries: Vec<OrderingEntry>,
}

impl OrderingList {
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(|entry| match entry {
            OrderingEntry::Name(name) => Some(name.as_str()),
            OrderingEntry::Others => None,
        })
    }

    pub fn has_others(&self) -> bool {
        self.entries.contains(&OrderingEntry::Others)
    }
}

impl XmlNode for OrderingList {
    const NAMESPACE: &'static str = JAVAEE;
    const TYPE_NAME: &'static str = "absoluteOrderingType";
    const TYPE_ALIASES: &'static [&'static str] = &["ordering-orderingType"];

    fn read_fields(&mut self, reader: &ElementReader, context: &mut Context) {
        for attribute in reader.attributes() {
            if attribute.namespace() != Some(XSI_NAMESPACE) {
                context.unexpected_attribute(reader, Self::TYPE_NAME, &attribute, &[]);
            }
        }
        let mut first = true;
        for child in reader.children() {
            let entry = if child.is_named(JAVAEE, "name") {
                read_text::<Collapse>(&child, Self::TYPE_NAME, context).map(OrderingEntry::Name)
            } else if child.is_named(JAVAEE, "others") {
                Some(OrderingEntry::Others)
            } else {
                unknown_element::<Self>(&child, context, &["name", "others"]);
                None
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
        for entry in &self.entries {
            match entry {
                OrderingEntry::Name(name) => write_text::<Collapse, W>(
                    writer,
                    JAVAEE,
                    "name",
                    name,
                    Self::TYPE_NAME,
                    context,
                )?,
                OrderingEntry::Others => {
                    write_node(writer, JAVAEE, "others", &Empty::default(), context)?
                }
            }
        }
        Ok(())
    }
}

descriptor! {
    /// Relative ordering of a web fragment.
    pub struct Ordering: JAVAEE, "orderingType" {
        attributes {}
        elements {
            after: Option<OrderingList> = "after" => node;
            before: Option<OrderingList> = "before" => node;
        }
    }
}

descriptor! {
    pub struct WebApp: JAVAEE, "web-appType" {
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
            distributable: Option<Empty> = "distributable" => node;
            context_param: KeyedCollection<ParamValue> = "context-param" => node;
            filter: Vec<Filter> = "filter" => node;
            filter_mapping: Vec<FilterMapping> = "filter-mapping" => node;
            listener: Vec<Listener> = "listener" => node;
            servlet: Vec<Servlet> = "servlet" => node;
            servlet_mapping: Vec<ServletMapping> = "servlet-mapping" => node;
            session_config: Vec<SessionConfig> = "session-config" => node;
            mime_mapping: KeyedCollection<MimeMapping> = "mime-mapping" => node;
            welcome_file_list: Vec<WelcomeFileList> = "welcome-file-list" => node;
            error_page: Vec<ErrorPage> = "error-page" => node;
            taglib: Vec<Taglib> = "taglib" => node;
            jsp_config: Vec<JspConfig> = "jsp-config" => node;
            security_constraint: Vec<SecurityConstraint> = "security-constraint" => node;
            login_config: Vec<LoginConfig> = "login-config" => node;
            security_role: Vec<SecurityRole> = "security-role" => node;
            locale_encoding_mapping_list: Vec<LocaleEncodingMappingList> = "locale-encoding-mapping-list" => node;
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
            message_destination: KeyedCollection<MessageDestination> = "message-destination" => node;
            absolute_ordering: Option<OrderingList> = "absolute-ordering" => node;
        }
        defaults {
            version: Some("3.0".to_string()),
        }
    }
}

root_element!(WebApp, "web-app", JAVAEE_FILTER);

impl WebApp {
    pub fn servlet(&self, servlet_name: &str) -> Option<&Servlet> {
        self.servlet
            .iter()
            .find(|servlet| servlet.servlet_name.as_deref() == Some(servlet_name))
    }

    /// URL patterns mapped to `servlet_name`, across all mappings.
    pub fn servlet_mappings<'a>(&'a self, servlet_name: &'a str) -> impl Iterator<Item = &'a str> {
        self.servlet_mapping
            .iter()
            .filter(move |mapping| mapping.servlet_name.as_deref() == Some(servlet_name))
            .flat_map(|mapping| mapping.url_pattern.iter().map(String::as_str))
    }
}

descriptor! {
    pub struct WebFragment: JAVAEE, "web-fragmentType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
            metadata_complete: Option<bool> = "metadata-complete" => Truth;
            version: Option<String> = "version" => Collapse;
        }
        elements {
            name: Option<String> = "name" => text(Collapse);
            description: LocalizedList<Text> = "description" => node;
            display_name: LocalizedList<Text> = "display-name" => node;
            icon: LocalizedList<Icon> = "icon" => node;
            distributable: Option<Empty> = "distributable" => node;
            context_param: KeyedCollection<ParamValue> = "context-param" => node;
            filter: Vec<Filter> = "filter" => node;
            filter_mapping: Vec<FilterMapping> = "filter-mapping" => node;
            listener: Vec<Listener> = "listener" => node;
            servlet: Vec<Servlet> = "servlet" => node;
            servlet_mapping: Vec<ServletMapping> = "servlet-mapping" => node;
            session_config: Vec<SessionConfig> = "session-config" => node;
            mime_mapping: KeyedCollection<MimeMapping> = "mime-mapping" => node;
            welcome_file_list: Vec<WelcomeFileList> = "welcome-file-list" => node;
            error_page: Vec<ErrorPage> = "error-page" => node;
            jsp_config: Vec<JspConfig> = "jsp-config" => node;
            security_constraint: Vec<SecurityConstraint> = "security-constraint" => node;
            login_config: Vec<LoginConfig> = "login-config" => node;
            security_role: Vec<SecurityRole> = "security-role" => node;
            locale_encoding_mapping_list: Vec<LocaleEncodingMappingList> = "locale-encoding-mapping-list" => node;
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
            message_destination: KeyedCollection<MessageDestination> = "message-destination" => node;
            ordering: Option<Ordering> = "ordering" => node;
        }
        defaults {
            version: Some("3.0".to_string()),
        }
    }
}

root_element!(WebFragment, "web-fragment", JAVAEE_FILTER);

#[cfg(test)]
mod tests {
    use super::*;
    use dd_binder::{read_document, write_document, DiagnosticKind, ReadOptions, WriteOptions};
    use pretty_assertions::assert_eq;

    const WEB_XML: &str = r#"<web-app xmlns="http://java.sun.com/xml/ns/javaee" version="3.0">
  <display-name>Shop</display-name>
  <context-param><param-name>mode</param-name><param-value> dev </param-value></context-param>
  <servlet>
    <servlet-name>cart</servlet-name>
    <servlet-class>shop.CartServlet</servlet-class>
    <load-on-startup>soon</load-on-startup>
    <async-supported>true</async-supported>
    <multipart-config><max-file-size>1048576</max-file-size></multipart-config>
  </servlet>
  <servlet-mapping><servlet-name>cart</servlet-name><url-pattern>/cart/*</url-pattern></servlet-mapping>
  <servlet-mapping><servlet-name>cart</servlet-name><url-pattern>*.cart</url-pattern></servlet-mapping>
  <filter-mapping>
    <filter-name>auth</filter-name>
    <url-pattern>/*</url-pattern>
    <dispatcher>REQUEST</dispatcher>
    <dispatcher>FORWARD</dispatcher>
  </filter-mapping>
  <session-config><tracking-mode>COOKIE</tracking-mode></session-config>
  <jsp-config>
    <jsp-property-group><url-pattern> /pages/my  page.jsp </url-pattern></jsp-property-group>
  </jsp-config>
  <absolute-ordering><name>a</name><others/><name>b</name></absolute-ordering>
</web-app>"#;

    fn web_app(context: &mut Context) -> WebApp {
        read_document(WEB_XML, &ReadOptions::default(), context)
            .unwrap()
            .unwrap()
    }

    #[test]
    fn reads_servlets_and_mappings() {
        let mut context = Context::new();
        let app = web_app(&mut context);
        assert!(!context.has_diagnostics(), "{:?}", context.diagnostics());

        let cart = app.servlet("cart").unwrap();
        assert_eq!(cart.load_on_startup, Some(0));
        assert_eq!(cart.async_supported, Some(true));
        assert_eq!(
            cart.multipart_config.as_ref().unwrap().max_file_size,
            Some(1_048_576)
        );
        assert_eq!(app.servlet_mappings("cart").collect::<Vec<_>>(), ["/cart/*", "*.cart"]);
        assert_eq!(
            app.filter_mapping[0].dispatcher,
            [Dispatcher::Request, Dispatcher::Forward]
        );
        assert_eq!(
            app.context_param.get("mode").unwrap().param_value.as_deref(),
            Some(" dev ")
        );
    }

    #[test]
    fn url_patterns_are_trimmed_not_collapsed() {
        let mut context = Context::new();
        let app = web_app(&mut context);
        let group = &app.jsp_config[0].jsp_property_group[0];
        assert_eq!(group.url_pattern, ["/pages/my  page.jsp"]);
    }

    #[test]
    fn absolute_ordering_keeps_relative_position_of_others() {
        let mut context = Context::new();
        let app = web_app(&mut context);
        let ordering = app.absolute_ordering.as_ref().unwrap();
        assert_eq!(
            ordering.entries,
            [
                OrderingEntry::Name("a".into()),
                OrderingEntry::Others,
                OrderingEntry::Name("b".into())
            ]
        );
        assert!(ordering.has_others());
        assert_eq!(ordering.names().collect::<Vec<_>>(), ["a", "b"]);
    }

    #[test]
    fn round_trip_is_stable() {
        let mut context = Context::new();
        let app = web_app(&mut context);
        let xml = write_document(&app, &WriteOptions::default(), &mut context).unwrap();
        assert!(xml.contains("<others/>"), "{xml}");
        let again: WebApp = read_document(&xml, &ReadOptions::default(), &mut context)
            .unwrap()
            .unwrap();
        assert_eq!(again, app);
        assert!(!context.has_diagnostics(), "{:?}", context.diagnostics());
    }

    const WEB_FRAGMENT: &str = r#"<web-fragment xmlns="http://java.sun.com/xml/ns/javaee">
  <name>payments</name>
  <distributable/>
  <filter>
    <filter-name>audit</filter-name>
    <filter-class>payments.AuditFilter</filter-class>
    <init-param><param-name>level</param-name><param-value>full</param-value></init-param>
  </filter>
  <filter-mapping>
    <filter-name>audit</filter-name>
    <url-pattern>/pay/*</url-pattern>
    <dispatcher>REQUEST</dispatcher>
    <dispatcher>ASYNC</dispatcher>
  </filter-mapping>
  <listener><listener-class>payments.Startup</listener-class></listener>
  <ordering><after><others/></after><before><name>shop</name></before></ordering>
</web-fragment>"#;

    #[test]
    fn fragment_round_trip_is_stable() {
        let mut context = Context::new();
        let fragment: WebFragment = read_document(WEB_FRAGMENT, &Default::default(), &mut context)
            .unwrap()
            .unwrap();
        assert!(!context.has_diagnostics(), "{:?}", context.diagnostics());
        assert_eq!(fragment.version.as_deref(), Some("3.0"));
        assert_eq!(fragment.filter_mapping[0].dispatcher.len(), 2);

        let xml = write_document(&fragment, &WriteOptions::default(), &mut context).unwrap();
        assert!(xml.contains("<after>"), "{xml}");
        let again: WebFragment = read_document(&xml, &ReadOptions::default(), &mut context)
            .unwrap()
            .unwrap();
        assert_eq!(again, fragment);
        assert!(!context.has_diagnostics(), "{:?}", context.diagnostics());
    }

    #[test]
    fn fragment_ordering_and_bad_dispatcher() {
        let xml = r#"<web-fragment xmlns="http://java.sun.com/xml/ns/javaee">
  <name>payments</name>
  <filter-mapping><filter-name>f</filter-name><dispatcher>SOMETIMES</dispatcher></filter-mapping>
  <ordering><after><others/></after><before><name>shop</name></before></ordering>
</web-fragment>"#;
        let mut context = Context::new();
        let fragment: WebFragment = read_document(xml, &ReadOptions::default(), &mut context)
            .unwrap()
            .unwrap();
        assert_eq!(fragment.name.as_deref(), Some("payments"));
        let ordering = fragment.ordering.as_ref().unwrap();
        assert!(ordering.after.as_ref().unwrap().has_others());
        assert_eq!(
            ordering.before.as_ref().unwrap().names().collect::<Vec<_>>(),
            ["shop"]
        );
        assert!(fragment.filter_mapping[0].dispatcher.is_empty());
        assert_eq!(context.diagnostics().len(), 1);
        assert!(matches!(
            context.diagnostics()[0].kind,
            DiagnosticKind::AdapterConversion { .. }
        ));
    }
}

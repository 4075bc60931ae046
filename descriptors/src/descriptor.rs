use dd_binder::{
    parse_document, read_root, write_document, BindError, Context, Document, ReadOptions,
    RootElement, WriteOptions,
};
use tracing::debug;

use crate::{
    Application, ApplicationClient, Connector, EjbJar, FacesConfig, TldTaglib, WebApp,
    WebFragment, Webservices,
};

/// The descriptor files this crate understands, by document element.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DescriptorKind {
    Application,
    ApplicationClient,
    Connector,
    EjbJar,
    FacesConfig,
    WebApp,
    WebFragment,
    Taglib,
    Webservices,
}

impl DescriptorKind {
    pub const ALL: [DescriptorKind; 9] = [
        Self::Application,
        Self::ApplicationClient,
        Self::Connector,
        Self::EjbJar,
        Self::FacesConfig,
        Self::WebApp,
        Self::WebFragment,
        Self::Taglib,
        Self::Webservices,
    ];

    /// The local name of the document element.
    pub fn element(self) -> &'static str {
        match self {
            Self::Application => Application::ELEMENT,
            Self::ApplicationClient => ApplicationClient::ELEMENT,
            Self::Connector => Connector::ELEMENT,
            Self::EjbJar => EjbJar::ELEMENT,
            Self::FacesConfig => FacesConfig::ELEMENT,
            Self::WebApp => WebApp::ELEMENT,
            Self::WebFragment => WebFragment::ELEMENT,
            Self::Taglib => TldTaglib::ELEMENT,
            Self::Webservices => Webservices::ELEMENT,
        }
    }

    pub fn from_element(local_name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.element() == local_name)
    }
}

/// Any root descriptor.
#[derive(Clone, Debug, PartialEq)]
pub enum Descriptor {
    Application(Application),
    ApplicationClient(ApplicationClient),
    Connector(Connector),
    EjbJar(EjbJar),
    FacesConfig(FacesConfig),
    WebApp(WebApp),
    WebFragment(WebFragment),
    Taglib(TldTaglib),
    Webservices(Webservices),
}

impl Descriptor {
    /// Reads a descriptor of whatever kind the document element names.
    ///
    /// Fails only when the document is not well-formed or its element is
    /// not a known descriptor; `None` is returned for a nil document
    /// element or one in a foreign namespace, with a diagnostic.
    pub fn parse(
        xml: &str,
        options: &ReadOptions,
        context: &mut Context,
    ) -> Result<Option<Self>, BindError> {
        let document = parse_document(xml, options, context)?;
        let local_name = document.root_element().tag_name().name();
        let kind = DescriptorKind::from_element(local_name)
            .ok_or_else(|| BindError::UnknownRoot(local_name.to_string()))?;
        debug!(kind = kind.element(), "detected descriptor");
        Ok(Self::read(kind, &document, options, context))
    }

    /// Reads the document as `kind`, whatever its document element.
    pub fn parse_as(
        kind: DescriptorKind,
        xml: &str,
        options: &ReadOptions,
        context: &mut Context,
    ) -> Result<Option<Self>, BindError> {
        let document = parse_document(xml, options, context)?;
        Ok(Self::read(kind, &document, options, context))
    }

    fn read(
        kind: DescriptorKind,
        document: &Document,
        options: &ReadOptions,
        context: &mut Context,
    ) -> Option<Self> {
        match kind {
            DescriptorKind::Application => {
                read_root(document, options, context).map(Self::Application)
            }
            DescriptorKind::ApplicationClient => {
                read_root(document, options, context).map(Self::ApplicationClient)
            }
            DescriptorKind::Connector => read_root(document, options, context).map(Self::Connector),
            DescriptorKind::EjbJar => read_root(document, options, context).map(Self::EjbJar),
            DescriptorKind::FacesConfig => {
                read_root(document, options, context).map(Self::FacesConfig)
            }
            DescriptorKind::WebApp => read_root(document, options, context).map(Self::WebApp),
            DescriptorKind::WebFragment => {
                read_root(document, options, context).map(Self::WebFragment)
            }
            DescriptorKind::Taglib => read_root(document, options, context).map(Self::Taglib),
            DescriptorKind::Webservices => {
                read_root(document, options, context).map(Self::Webservices)
            }
        }
    }

    pub fn write(
        &self,
        options: &WriteOptions,
        context: &mut Context,
    ) -> Result<String, BindError> {
        match self {
            Self::Application(root) => write_document(root, options, context),
            Self::ApplicationClient(root) => write_document(root, options, context),
            Self::Connector(root) => write_document(root, options, context),
            Self::EjbJar(root) => write_document(root, options, context),
            Self::FacesConfig(root) => write_document(root, options, context),
            Self::WebApp(root) => write_document(root, options, context),
            Self::WebFragment(root) => write_document(root, options, context),
            Self::Taglib(root) => write_document(root, options, context),
            Self::Webservices(root) => write_document(root, options, context),
        }
    }

    pub fn kind(&self) -> DescriptorKind {
        match self {
            Self::Application(_) => DescriptorKind::Application,
            Self::ApplicationClient(_) => DescriptorKind::ApplicationClient,
            Self::Connector(_) => DescriptorKind::Connector,
            Self::EjbJar(_) => DescriptorKind::EjbJar,
            Self::FacesConfig(_) => DescriptorKind::FacesConfig,
            Self::WebApp(_) => DescriptorKind::WebApp,
            Self::WebFragment(_) => DescriptorKind::WebFragment,
            Self::Taglib(_) => DescriptorKind::Taglib,
            Self::Webservices(_) => DescriptorKind::Webservices,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ejb_jar::EnterpriseBean, refs::EnvEntry};
    use dd_binder::{DiagnosticKind, KeyedCollection, NamespacePolicy};
    use pretty_assertions::assert_eq;

    fn parse(xml: &str, context: &mut Context) -> Descriptor {
        Descriptor::parse(xml, &ReadOptions::default(), context)
            .unwrap()
            .unwrap()
    }

    #[test]
    fn dispatches_on_document_element() {
        let mut context = Context::new();
        for kind in DescriptorKind::ALL {
            let xml = format!(
                r#"<{0} xmlns="http://java.sun.com/xml/ns/javaee"/>"#,
                kind.element()
            );
            assert_eq!(parse(&xml, &mut context).kind(), kind);
        }
        assert!(!context.has_diagnostics(), "{:?}", context.diagnostics());
    }

    #[test]
    fn unknown_document_element_is_an_error() {
        let mut context = Context::new();
        let error =
            Descriptor::parse("<beans/>", &ReadOptions::default(), &mut context).unwrap_err();
        assert!(matches!(error, BindError::UnknownRoot(name) if name == "beans"));
    }

    #[test]
    fn duplicate_env_entries_are_kept_in_order() {
        let mut context = Context::new();
        let descriptor = parse(
            r#"<ejb-jar xmlns="http://java.sun.com/xml/ns/javaee"><enterprise-beans><session>
                 <ejb-name>A</ejb-name>
                 <env-entry><env-entry-name>x</env-entry-name></env-entry>
                 <env-entry><env-entry-name>x</env-entry-name></env-entry>
               </session></enterprise-beans></ejb-jar>"#,
            &mut context,
        );
        let Descriptor::EjbJar(jar) = descriptor else {
            panic!("not an ejb-jar");
        };
        let Some(EnterpriseBean::Session(bean)) = jar.bean("A") else {
            panic!("A is not a session bean");
        };
        let entries: &KeyedCollection<EnvEntry> = &bean.env_entry;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries.keys().collect::<Vec<_>>(), ["x", "x"]);
    }

    #[test]
    fn strict_namespaces_reject_older_generations() {
        let options = ReadOptions {
            namespaces: NamespacePolicy::Strict,
            ..Default::default()
        };
        let mut context = Context::new();
        let descriptor = Descriptor::parse(
            r#"<web-app xmlns="http://java.sun.com/xml/ns/j2ee" version="2.4"/>"#,
            &options,
            &mut context,
        )
        .unwrap();
        assert_eq!(descriptor, None);
        assert!(matches!(
            context.diagnostics()[0].kind,
            DiagnosticKind::UnexpectedElement { .. }
        ));
    }

    #[test]
    fn nil_document_element_yields_nothing() {
        let mut context = Context::new();
        let descriptor = Descriptor::parse(
            r#"<connector xmlns="http://java.sun.com/xml/ns/javaee"
                 xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xsi:nil="true">
                 <vendor-name>ignored</vendor-name>
               </connector>"#,
            &ReadOptions::default(),
            &mut context,
        )
        .unwrap();
        assert_eq!(descriptor, None);
        assert!(!context.has_diagnostics());
    }

    #[test]
    fn forced_kind_reports_mismatched_document_element() {
        let mut context = Context::new();
        let descriptor = Descriptor::parse_as(
            DescriptorKind::WebFragment,
            r#"<web-app xmlns="http://java.sun.com/xml/ns/javaee"/>"#,
            &ReadOptions::default(),
            &mut context,
        )
        .unwrap();
        assert_eq!(descriptor, None);
        assert_eq!(context.diagnostics().len(), 1);
    }

    #[test]
    fn writes_through_the_matching_root() {
        let mut context = Context::new();
        let descriptor = Descriptor::WebFragment(WebFragment::default());
        let options = WriteOptions {
            indent: None,
            declaration: false,
        };
        assert_eq!(
            descriptor.write(&options, &mut context).unwrap(),
            r#"<web-fragment xmlns="http://java.sun.com/xml/ns/javaee" version="3.0"/>"#
        );
    }
}

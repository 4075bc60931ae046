//! Java EE deployment descriptors as typed nodes.
//!
//! Every descriptor generation from J2EE 1.4 to Jakarta EE is read into the
//! same types: the namespace filters below map older and newer namespaces
//! to [`JAVAEE_NAMESPACE`], and tag libraries additionally get their JSP 1.1
//! element names modernized. Writing always uses [`JAVAEE_NAMESPACE`].

use dd_binder::NamespaceFilter;

pub const JAVAEE_NAMESPACE: &str = "http://java.sun.com/xml/ns/javaee";
pub const J2EE_NAMESPACE: &str = "http://java.sun.com/xml/ns/j2ee";
pub const JCP_NAMESPACE: &str = "http://xmlns.jcp.org/xml/ns/javaee";
pub const JAKARTAEE_NAMESPACE: &str = "https://jakarta.ee/xml/ns/jakartaee";

pub static JAVAEE_FILTER: NamespaceFilter = NamespaceFilter {
    target: JAVAEE_NAMESPACE,
    sources: &[J2EE_NAMESPACE, JCP_NAMESPACE, JAKARTAEE_NAMESPACE],
    unqualified: true,
    renames: &[],
};

pub static TAGLIB_FILTER: NamespaceFilter = NamespaceFilter {
    target: JAVAEE_NAMESPACE,
    sources: &[
        J2EE_NAMESPACE,
        JCP_NAMESPACE,
        JAKARTAEE_NAMESPACE,
        "http://java.sun.com/JSP/TagLibraryDescriptor",
    ],
    unqualified: true,
    renames: &[
        ("tlibversion", "tlib-version"),
        ("jspversion", "jsp-version"),
        ("shortname", "short-name"),
        ("tagclass", "tag-class"),
        ("teiclass", "tei-class"),
        ("bodycontent", "body-content"),
        ("info", "description"),
    ],
};

/// Implements [`Keyed`](dd_binder::Keyed) from an optional string field.
macro_rules! keyed {
    ($($node:ty => $field:ident),* $(,)?) => {
        $(
            impl dd_binder::Keyed for $node {
                fn key(&self) -> Option<&str> {
                    self.$field.as_deref()
                }
            }
        )*
    };
}

/// Implements [`RootElement`](dd_binder::RootElement).
macro_rules! root_element {
    ($node:ty, $element:literal, $filter:expr) => {
        impl dd_binder::RootElement for $node {
            const ELEMENT: &'static str = $element;
            const FILTER: Option<&'static dd_binder::NamespaceFilter> = Some(&$filter);
        }
    };
}

pub mod application;
pub mod common;
pub mod connector;
mod descriptor;
pub mod ejb_jar;
pub mod faces;
pub mod refs;
pub mod tld;
pub mod web;
pub mod webservices;

pub use application::{Application, ApplicationClient};
pub use connector::Connector;
pub use descriptor::{Descriptor, DescriptorKind};
pub use ejb_jar::EjbJar;
pub use faces::FacesConfig;
pub use tld::TldTaglib;
pub use web::{WebApp, WebFragment};
pub use webservices::Webservices;

//! JSP tag library descriptors (`*.tld`), including JSP 1.1 era files with
//! their old element names.

use dd_binder::{
    adapters::{Collapse, Truth, Typed, Verbatim},
    descriptor, LocalizedList,
};
use dd_builtins::enumeration;

use crate::{
    common::{Icon, ParamValue, Text},
    web::Listener,
    JAVAEE_NAMESPACE as JAVAEE, TAGLIB_FILTER,
};

enumeration! {
    pub enum BodyContent {
        TagDependent = "tagdependent",
        Jsp = "JSP",
        Empty = "empty",
        Scriptless = "scriptless",
    }
}

enumeration! {
    pub enum VariableScope {
        Nested = "NESTED",
        AtBegin = "AT_BEGIN",
        AtEnd = "AT_END",
    }
}

descriptor! {
    /// Extension content of a tag, tag file, function or taglib. Its
    /// children are skipped when read.
    pub struct TldExtension: JAVAEE, "tld-extensionType", lenient {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
            namespace: Option<String> = "namespace" => Collapse, required;
        }
        elements {}
    }
}

descriptor! {
    pub struct TldValidator: JAVAEE, "validatorType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            validator_class: Option<String> = "validator-class" => text(Collapse), required;
            init_param: Vec<ParamValue> = "init-param" => node;
        }
    }
}

descriptor! {
    pub struct Variable: JAVAEE, "variableType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            name_given: Option<String> = "name-given" => text(Collapse);
            name_from_attribute: Option<String> = "name-from-attribute" => text(Collapse);
            variable_class: Option<String> = "variable-class" => text(Collapse);
            declare: Option<bool> = "declare" => text(Truth);
            scope: Option<VariableScope> = "scope" => text(Typed<VariableScope>);
        }
    }
}

descriptor! {
    pub struct DeferredValue: JAVAEE, "tld-deferred-valueType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            value_type: Option<String> = "type" => text(Collapse);
        }
    }
}

descriptor! {
    pub struct DeferredMethod: JAVAEE, "tld-deferred-methodType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            method_signature: Option<String> = "method-signature" => text(Collapse);
        }
    }
}

descriptor! {
    pub struct TldAttribute: JAVAEE, "tld-attributeType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            name: Option<String> = "name" => text(Collapse), required;
            required: Option<bool> = "required" => text(Truth);
            rtexprvalue: Option<bool> = "rtexprvalue" => text(Truth);
            attribute_type: Option<String> = "type" => text(Collapse);
            fragment: Option<bool> = "fragment" => text(Truth);
            deferred_value: Option<DeferredValue> = "deferred-value" => node;
            deferred_method: Option<DeferredMethod> = "deferred-method" => node;
        }
    }
}

keyed! {
    TldAttribute => name,
}

descriptor! {
    pub struct Tag: JAVAEE, "tagType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            display_name: LocalizedList<Text> = "display-name" => node;
            icon: LocalizedList<Icon> = "icon" => node;
            name: Option<String> = "name" => text(Collapse), required;
            tag_class: Option<String> = "tag-class" => text(Collapse), required;
            tei_class: Option<String> = "tei-class" => text(Collapse);
            body_content: Option<BodyContent> = "body-content" => text(Typed<BodyContent>), required;
            variable: Vec<Variable> = "variable" => node;
            attribute: Vec<TldAttribute> = "attribute" => node;
            dynamic_attributes: Option<bool> = "dynamic-attributes" => text(Truth);
            example: Option<String> = "example" => text(Verbatim);
            tag_extension: Vec<TldExtension> = "tag-extension" => node;
        }
    }
}

impl Tag {
    pub fn attribute(&self, name: &str) -> Option<&TldAttribute> {
        self.attribute
            .iter()
            .find(|attribute| attribute.name.as_deref() == Some(name))
    }
}

descriptor! {
    pub struct TagFile: JAVAEE, "tagFileType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            display_name: LocalizedList<Text> = "display-name" => node;
            icon: LocalizedList<Icon> = "icon" => node;
            name: Option<String> = "name" => text(Collapse), required;
            path: Option<String> = "path" => text(Collapse), required;
            example: Option<String> = "example" => text(Verbatim);
            tag_extension: Vec<TldExtension> = "tag-extension" => node;
        }
    }
}

descriptor! {
    pub struct Function: JAVAEE, "functionType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            display_name: LocalizedList<Text> = "display-name" => node;
            icon: LocalizedList<Icon> = "icon" => node;
            name: Option<String> = "name" => text(Collapse), required;
            function_class: Option<String> = "function-class" => text(Collapse), required;
            function_signature: Option<String> = "function-signature" => text(Collapse), required;
            example: Option<String> = "example" => text(Verbatim);
            function_extension: Vec<TldExtension> = "function-extension" => node;
        }
    }
}

descriptor! {
    pub struct TldTaglib: JAVAEE, "tldTaglibType" {
        attributes {
            id: Option<String> = "id" => Collapse, xml_id;
            version: Option<String> = "version" => Collapse;
        }
        elements {
            description: LocalizedList<Text> = "description" => node;
            display_name: LocalizedList<Text> = "display-name" => node;
            icon: LocalizedList<Icon> = "icon" => node;
            tlib_version: Option<String> = "tlib-version" => text(Collapse), required;
            jsp_version: Option<String> = "jsp-version" => text(Collapse);
            short_name: Option<String> = "short-name" => text(Collapse), required;
            uri: Option<String> = "uri" => text(Collapse);
            validator: Option<TldValidator> = "validator" => node;
            listener: Vec<Listener> = "listener" => node;
            tag: Vec<Tag> = "tag" => node;
            tag_file: Vec<TagFile> = "tag-file" => node;
            function: Vec<Function> = "function" => node;
            taglib_extension: Vec<TldExtension> = "taglib-extension" => node;
        }
        defaults {
            version: Some("2.1".to_string()),
        }
    }
}

root_element!(TldTaglib, "taglib", TAGLIB_FILTER);

impl TldTaglib {
    pub fn tag(&self, name: &str) -> Option<&Tag> {
        self.tag.iter().find(|tag| tag.name.as_deref() == Some(name))
    }
}

use std::collections::BTreeMap;

use serde::Deserialize;

/// Kind of a leaf field inside a container instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    #[default]
    Input,
    Text,
    Check,
}

/// One leaf field of a container instance
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElementConfig {
    pub name: String,
    pub label: String,
    #[serde(rename = "type", default)]
    pub kind: ElementKind,
    #[serde(default)]
    pub value: String,
}

impl ElementConfig {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind: ElementKind::Input,
            value: String::new(),
        }
    }

    pub fn with_kind(mut self, kind: ElementKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }
}

/// One occurrence of a repeatable field group
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContainerInstance {
    /// Data structure name of the container, e.g. `item`
    pub name: String,
    /// Display title, trusted markup
    pub title: String,
    #[serde(default)]
    pub collapsed: bool,
    #[serde(default)]
    pub elements: Vec<ElementConfig>,
}

/// A section of a flex form field as read from a JSON document
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SectionDocument {
    pub table: String,
    pub database_row: BTreeMap<String, serde_json::Value>,
    pub field_name: String,
    pub item_form_el_name: String,
    pub form_prefix: String,
    pub identifier_prefix: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub containers: Vec<ContainerInstance>,
}

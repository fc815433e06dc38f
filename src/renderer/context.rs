use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{RenderError, Result};
use crate::parser::types::{ContainerInstance, ElementConfig};
use crate::renderer::traits::{NodeFactory, RenderMode};

/// The record a form is rendered for
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatabaseRow(BTreeMap<String, Value>);

impl DatabaseRow {
    pub fn new(fields: BTreeMap<String, Value>) -> Self {
        Self(fields)
    }

    pub fn with_uid(uid: impl Into<Value>) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert("uid".to_string(), uid.into());
        Self(fields)
    }

    /// The record uid as it appears in field names. New records carry
    /// string uids such as `NEW5f2a`, stored ones carry integers.
    pub fn uid(&self) -> Result<String> {
        match self.0.get("uid") {
            Some(Value::Number(n)) => Ok(n.to_string()),
            Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
            _ => Err(RenderError::MissingRecordUid),
        }
    }
}

/// Immutable options shared across one render tree.
///
/// Built once per top-level render through [`RenderContextBuilder`]; every
/// level below derives its own copy with the `for_*` methods.
#[derive(Clone)]
pub struct RenderContext {
    table: String,
    database_row: DatabaseRow,
    field_name: String,
    item_form_element_name: String,
    form_prefix: String,
    identifier_prefix: String,
    container_counter: usize,
    container_name: String,
    title: String,
    collapsed: bool,
    render_mode: RenderMode,
    containers: Vec<ContainerInstance>,
    elements: Vec<ElementConfig>,
    element: Option<ElementConfig>,
    node_factory: Arc<dyn NodeFactory>,
}

impl RenderContext {
    pub fn builder() -> RenderContextBuilder {
        RenderContextBuilder::default()
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn database_row(&self) -> &DatabaseRow {
        &self.database_row
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    pub fn item_form_element_name(&self) -> &str {
        &self.item_form_element_name
    }

    pub fn form_prefix(&self) -> &str {
        &self.form_prefix
    }

    pub fn identifier_prefix(&self) -> &str {
        &self.identifier_prefix
    }

    pub fn container_counter(&self) -> usize {
        self.container_counter
    }

    pub fn container_name(&self) -> &str {
        &self.container_name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    pub fn containers(&self) -> &[ContainerInstance] {
        &self.containers
    }

    pub fn elements(&self) -> &[ElementConfig] {
        &self.elements
    }

    pub fn element(&self) -> Option<&ElementConfig> {
        self.element.as_ref()
    }

    pub fn node_factory(&self) -> &dyn NodeFactory {
        self.node_factory.as_ref()
    }

    /// HTTP name prefix of every value stored in this flex form field
    pub fn data_field_name(&self) -> Result<String> {
        Ok(format!(
            "data[{}][{}][{}]",
            self.table,
            self.database_row.uid()?,
            self.field_name
        ))
    }

    /// Context for the container instance at position `counter` of a section
    pub fn for_container(&self, counter: usize, instance: &ContainerInstance) -> Self {
        Self {
            container_counter: counter,
            container_name: instance.name.clone(),
            title: instance.title.clone(),
            collapsed: instance.collapsed,
            elements: instance.elements.clone(),
            containers: Vec::new(),
            element: None,
            render_mode: RenderMode::Container,
            ..self.clone()
        }
    }

    /// Context for the body of a container instance whose wrapper got the
    /// DOM id `id_suffix`
    pub fn for_container_content(&self, id_suffix: &str) -> Self {
        Self {
            form_prefix: format!(
                "{}[{}][{}][el]",
                self.form_prefix, self.container_counter, self.container_name
            ),
            identifier_prefix: id_suffix.to_string(),
            render_mode: RenderMode::ElementGroup,
            ..self.clone()
        }
    }

    /// Context for one leaf field of an element group
    pub fn for_element(&self, element: &ElementConfig) -> Self {
        Self {
            element: Some(element.clone()),
            render_mode: RenderMode::Element,
            ..self.clone()
        }
    }
}

impl fmt::Debug for RenderContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderContext")
            .field("table", &self.table)
            .field("database_row", &self.database_row)
            .field("field_name", &self.field_name)
            .field("item_form_element_name", &self.item_form_element_name)
            .field("form_prefix", &self.form_prefix)
            .field("identifier_prefix", &self.identifier_prefix)
            .field("container_counter", &self.container_counter)
            .field("container_name", &self.container_name)
            .field("title", &self.title)
            .field("collapsed", &self.collapsed)
            .field("render_mode", &self.render_mode)
            .field("containers", &self.containers.len())
            .field("elements", &self.elements.len())
            .field("element", &self.element.as_ref().map(|e| &e.name))
            .finish_non_exhaustive()
    }
}

#[derive(Default)]
pub struct RenderContextBuilder {
    table: Option<String>,
    database_row: Option<DatabaseRow>,
    field_name: Option<String>,
    item_form_element_name: Option<String>,
    form_prefix: Option<String>,
    identifier_prefix: Option<String>,
    container_counter: usize,
    container_name: String,
    title: String,
    collapsed: bool,
    render_mode: RenderMode,
    containers: Vec<ContainerInstance>,
    elements: Vec<ElementConfig>,
    element: Option<ElementConfig>,
    node_factory: Option<Arc<dyn NodeFactory>>,
}

impl RenderContextBuilder {
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn database_row(mut self, row: DatabaseRow) -> Self {
        self.database_row = Some(row);
        self
    }

    pub fn field_name(mut self, field_name: impl Into<String>) -> Self {
        self.field_name = Some(field_name.into());
        self
    }

    pub fn item_form_element_name(mut self, name: impl Into<String>) -> Self {
        self.item_form_element_name = Some(name.into());
        self
    }

    pub fn form_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.form_prefix = Some(prefix.into());
        self
    }

    pub fn identifier_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.identifier_prefix = Some(prefix.into());
        self
    }

    pub fn container_counter(mut self, counter: usize) -> Self {
        self.container_counter = counter;
        self
    }

    pub fn container_name(mut self, name: impl Into<String>) -> Self {
        self.container_name = name.into();
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn collapsed(mut self, collapsed: bool) -> Self {
        self.collapsed = collapsed;
        self
    }

    pub fn render_mode(mut self, mode: RenderMode) -> Self {
        self.render_mode = mode;
        self
    }

    pub fn containers(mut self, containers: Vec<ContainerInstance>) -> Self {
        self.containers = containers;
        self
    }

    pub fn elements(mut self, elements: Vec<ElementConfig>) -> Self {
        self.elements = elements;
        self
    }

    pub fn element(mut self, element: ElementConfig) -> Self {
        self.element = Some(element);
        self
    }

    pub fn node_factory(mut self, factory: Arc<dyn NodeFactory>) -> Self {
        self.node_factory = Some(factory);
        self
    }

    pub fn build(self) -> Result<RenderContext> {
        let database_row = self
            .database_row
            .ok_or(RenderError::MissingOption("database_row"))?;
        // Fail here rather than halfway through a render tree
        database_row.uid()?;

        Ok(RenderContext {
            table: required("table", self.table)?,
            database_row,
            field_name: required("field_name", self.field_name)?,
            item_form_element_name: required(
                "item_form_element_name",
                self.item_form_element_name,
            )?,
            form_prefix: required("form_prefix", self.form_prefix)?,
            identifier_prefix: required("identifier_prefix", self.identifier_prefix)?,
            container_counter: self.container_counter,
            container_name: self.container_name,
            title: self.title,
            collapsed: self.collapsed,
            render_mode: self.render_mode,
            containers: self.containers,
            elements: self.elements,
            element: self.element,
            node_factory: self
                .node_factory
                .ok_or(RenderError::MissingOption("node_factory"))?,
        })
    }
}

fn required(option: &'static str, value: Option<String>) -> Result<String> {
    match value {
        None => Err(RenderError::MissingOption(option)),
        Some(v) if v.is_empty() => Err(RenderError::InvalidOption {
            option,
            reason: "must not be empty".to_string(),
        }),
        Some(v) => Ok(v),
    }
}

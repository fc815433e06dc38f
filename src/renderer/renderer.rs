use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::parser::types::SectionDocument;
use crate::renderer::container::{Collaborators, ContainerRenderer};
use crate::renderer::context::{DatabaseRow, RenderContext};
use crate::renderer::renders::{ElementGroupRenderer, ElementRenderer};
use crate::renderer::result::RenderResult;
use crate::renderer::section::SectionRenderer;
use crate::renderer::traits::*;

/// Dispatches on render mode to the built-in nodes
#[derive(Clone)]
pub struct DefaultNodeFactory {
    collaborators: Collaborators,
}

impl DefaultNodeFactory {
    pub fn new(collaborators: Collaborators) -> Self {
        Self { collaborators }
    }
}

impl NodeFactory for DefaultNodeFactory {
    fn create(&self, context: &RenderContext) -> Result<Box<dyn Node>> {
        let node: Box<dyn Node> = match context.render_mode() {
            RenderMode::Section => Box::new(SectionRenderer::new(self.collaborators.clone())),
            RenderMode::Container => Box::new(ContainerRenderer::new(self.collaborators.clone())),
            RenderMode::ElementGroup => Box::new(ElementGroupRenderer),
            RenderMode::Element => Box::new(ElementRenderer),
        };
        Ok(node)
    }
}

/// Entry point: renders a whole section document
pub struct FormRenderer {
    collaborators: Collaborators,
}

impl FormRenderer {
    pub fn new(collaborators: Collaborators) -> Self {
        Self { collaborators }
    }

    pub fn context_for(&self, document: SectionDocument) -> Result<RenderContext> {
        RenderContext::builder()
            .table(document.table)
            .database_row(DatabaseRow::new(document.database_row))
            .field_name(document.field_name)
            .item_form_element_name(document.item_form_el_name)
            .form_prefix(document.form_prefix)
            .identifier_prefix(document.identifier_prefix)
            .title(document.title)
            .containers(document.containers)
            .render_mode(RenderMode::Section)
            .node_factory(Arc::new(DefaultNodeFactory::new(self.collaborators.clone())))
            .build()
    }

    pub fn render(&self, document: SectionDocument) -> Result<RenderResult> {
        let context = self.context_for(document)?;
        debug!(table = context.table(), field = context.field_name(), "rendering section document");
        let node = context.node_factory().create(&context)?;
        node.render(&context)
    }
}

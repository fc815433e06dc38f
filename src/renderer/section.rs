use serde_json::json;
use tracing::debug;

use crate::error::Result;
use crate::renderer::components::*;
use crate::renderer::container::Collaborators;
use crate::renderer::context::RenderContext;
use crate::renderer::result::RenderResult;
use crate::renderer::traits::*;

pub const FLEX_FORM_MODULE: &str = "TYPO3/CMS/Backend/FormEngineFlexForm";

/// Renders every container instance of a section, numbering them by
/// position so each gets its own slot in the submitted data.
pub struct SectionRenderer {
    collaborators: Collaborators,
}

impl SectionRenderer {
    pub fn new(collaborators: Collaborators) -> Self {
        Self { collaborators }
    }
}

impl Node for SectionRenderer {
    fn render(&self, context: &RenderContext) -> Result<RenderResult> {
        let id = IdentifierBuilder
            .unique_id(context.identifier_prefix(), self.collaborators.ids.as_ref());
        debug!(id = %id, containers = context.containers().len(), "rendering flex form section");

        let mut result =
            RenderResult::new("").with_aux("requireJsModules", json!([FLEX_FORM_MODULE]));
        let mut containers = Vec::with_capacity(context.containers().len());
        for (counter, instance) in context.containers().iter().enumerate() {
            let container_context = context.for_container(counter, instance);
            let node = context.node_factory().create(&container_context)?;
            let mut rendered = node.render(&container_context)?;
            containers.push(std::mem::take(&mut rendered.html));
            result = result.merge_child(rendered);
        }

        let mut html = vec![
            "<div class=\"t3-form-field-container t3-form-flex\">".to_string(),
            format!(
                "<div class=\"t3-form-field-label-flexsection\"><strong>{}</strong></div>",
                context.title()
            ),
            format!(
                "<div id=\"{}\" class=\"t3-form-field-container-flexsection t3-flex-container\">",
                escape_attr(&id)
            ),
        ];
        html.extend(containers);
        html.push("</div>".to_string());
        html.push("</div>".to_string());

        result.html = html.join("\n");
        Ok(result)
    }
}

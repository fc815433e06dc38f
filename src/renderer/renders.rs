use serde_json::json;
use tracing::trace;

use crate::error::{RenderError, Result};
use crate::parser::types::{ElementConfig, ElementKind};
use crate::renderer::components::*;
use crate::renderer::context::RenderContext;
use crate::renderer::result::RenderResult;
use crate::renderer::traits::*;

pub const TEXT_ELEMENT_MODULE: &str = "TYPO3/CMS/Backend/FormEngine/Element/TextElement";

/// Renders the leaf fields of one container instance
pub struct ElementGroupRenderer;

impl Node for ElementGroupRenderer {
    fn render(&self, context: &RenderContext) -> Result<RenderResult> {
        let mut result = RenderResult::default();
        let mut html =
            vec!["<div class=\"t3-form-field-container-flexsection-elements\">".to_string()];

        for element in context.elements() {
            let element_context = context.for_element(element);
            let node = context.node_factory().create(&element_context)?;
            let mut rendered = node.render(&element_context)?;
            html.push(std::mem::take(&mut rendered.html));
            result = result.merge_child(rendered);
        }

        html.push("</div>".to_string());
        result.html = html.join("\n");
        Ok(result)
    }
}

/// Renders a single leaf field
pub struct ElementRenderer;

impl ElementRenderer {
    fn render_control(&self, element: &ElementConfig, id: &str, name: &str) -> String {
        let value = escape_attr(&element.value);
        match element.kind {
            ElementKind::Input => format!(
                "<input type=\"text\" class=\"form-control\" id=\"{}\" name=\"{}\" value=\"{}\" />",
                id, name, value
            ),
            ElementKind::Text => format!(
                "<textarea class=\"form-control\" id=\"{}\" name=\"{}\" rows=\"5\">{}</textarea>",
                id, name, value
            ),
            ElementKind::Check => {
                let checked = if element.value == "1" {
                    " checked=\"checked\""
                } else {
                    ""
                };
                format!(
                    "<input type=\"hidden\" name=\"{}\" value=\"0\" />\n\
                     <input type=\"checkbox\" class=\"checkbox\" \
                     id=\"{}\" name=\"{}\" value=\"1\"{} />",
                    name, id, name, checked
                )
            }
        }
    }
}

impl Node for ElementRenderer {
    fn render(&self, context: &RenderContext) -> Result<RenderResult> {
        let element = context.element().ok_or(RenderError::MissingOption("element"))?;
        if element.name.is_empty() {
            return Err(RenderError::InvalidOption {
                option: "element",
                reason: "element name must not be empty".to_string(),
            });
        }
        trace!(element = %element.name, kind = ?element.kind, "rendering flex form element");

        let name = FieldNameBuilder.element_field_name(
            &context.data_field_name()?,
            context.form_prefix(),
            &element.name,
        );
        let id = escape_attr(&format!("{}-{}", context.identifier_prefix(), element.name));
        let name = escape_attr(&name);

        let html = [
            "<div class=\"form-group t3js-formengine-palette-field\">".to_string(),
            format!(
                "<label class=\"t3js-formengine-label\" for=\"{}\">{}</label>",
                id,
                escape_attr(&element.label)
            ),
            self.render_control(element, &id, &name),
            "</div>".to_string(),
        ]
        .join("\n");

        let mut result = RenderResult::new(html);
        if element.kind == ElementKind::Text {
            result = result.with_aux("requireJsModules", json!([TEXT_ELEMENT_MODULE]));
        }
        Ok(result)
    }
}

use std::sync::Arc;

use tracing::{debug, trace};

use crate::error::Result;
use crate::renderer::components::*;
use crate::renderer::context::RenderContext;
use crate::renderer::result::RenderResult;
use crate::renderer::traits::*;

/// Collaborators shared by every node of one render tree
#[derive(Clone)]
pub struct Collaborators {
    pub permissions: Arc<dyn PermissionCheck>,
    pub icons: Arc<dyn IconProvider>,
    pub ids: Arc<dyn IdGenerator>,
}

impl Collaborators {
    pub fn new(
        permissions: Arc<dyn PermissionCheck>,
        icons: Arc<dyn IconProvider>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            permissions,
            icons,
            ids,
        }
    }
}

/// Renders a single container instance of a flex form section: the header
/// with toggle, title and move/delete controls, and a body holding the
/// instance's elements as rendered by the element group node.
pub struct ContainerRenderer {
    collaborators: Collaborators,
}

impl ContainerRenderer {
    pub fn new(collaborators: Collaborators) -> Self {
        Self { collaborators }
    }

    fn toggle_icons(&self, collapsed: bool) -> String {
        let icons = &self.collaborators.icons;
        let mut html = String::new();
        html.push_str(&format!(
            "<span class=\"t3-flex-control-toggle-icon-open\" style=\"{}\">{}</span>",
            if collapsed { "display: none;" } else { "" },
            icons.icon("actions-move-down", IconSize::Small)
        ));
        html.push_str(&format!(
            "<span class=\"t3-flex-control-toggle-icon-close\" style=\"{}\">{}</span>",
            if collapsed { "" } else { "display: none;" },
            icons.icon("actions-move-right", IconSize::Small)
        ));
        html
    }

    fn move_and_delete_controls(&self) -> Vec<String> {
        let icons = &self.collaborators.icons;
        vec![
            "<div class=\"pull-right\">".to_string(),
            format!(
                "<span title=\"Drag to Move\" class=\"t3-js-sortable-handle\">{}</span>",
                icons.icon("actions-move-move", IconSize::Small)
            ),
            format!(
                "<span title=\"Delete\" class=\"t3-js-delete\">{}</span>",
                icons.icon("actions-edit-delete", IconSize::Small)
            ),
            "</div>".to_string(),
        ]
    }
}

impl Node for ContainerRenderer {
    fn render(&self, context: &RenderContext) -> Result<RenderResult> {
        let counter = context.container_counter();
        let collapsed = context.collapsed();
        let uid = context.database_row().uid()?;

        let id = IdentifierBuilder
            .unique_id(context.identifier_prefix(), self.collaborators.ids.as_ref());
        debug!(id = %id, counter, collapsed, "rendering flex form container");

        let names = FieldNameBuilder;
        let action_field_name = names.action_field_name(
            context.item_form_element_name(),
            context.form_prefix(),
            counter,
        );
        let toggle_field_name = names.toggle_field_name(
            context.table(),
            &uid,
            context.field_name(),
            context.form_prefix(),
            counter,
        );

        // An error from the check propagates, only an explicit false denies
        let may_edit_default_language = self
            .collaborators
            .permissions
            .can_edit_default_language(context.database_row())?;
        let move_and_delete = if may_edit_default_language {
            self.move_and_delete_controls()
        } else {
            trace!(id = %id, "no default language access, omitting move and delete controls");
            Vec::new()
        };

        let child_context = context.for_container_content(&id);
        let child = context.node_factory().create(&child_context)?;
        let mut content = child.render(&child_context)?;
        let child_html = std::mem::take(&mut content.html);

        let escaped_id = escape_attr(&id);
        let mut html = vec![
            format!(
                "<div id=\"{}\" class=\"t3-form-field-container-flexsections t3-flex-section\">",
                escaped_id
            ),
            format!(
                "<input class=\"t3-flex-control t3-flex-control-action\" type=\"hidden\" \
                 name=\"{}\" value=\"\" />",
                escape_attr(&action_field_name)
            ),
            "<div class=\"t3-form-field-header-flexsection t3-flex-section-header\">".to_string(),
            "<div class=\"pull-left\">".to_string(),
            format!(
                "<a href=\"#\" class=\"t3-flex-control-toggle-button\">{}</a>",
                self.toggle_icons(collapsed)
            ),
            format!("<span class=\"t3-record-title\">{}</span>", context.title()),
            "</div>".to_string(),
        ];
        html.extend(move_and_delete);
        html.push("</div>".to_string());
        html.push(format!(
            "<div class=\"t3-form-field-record-flexsection t3-flex-section-content\"{}>",
            if collapsed { " style=\"display:none;\"" } else { "" }
        ));
        html.push(child_html);
        html.push("</div>".to_string());
        html.push("<input".to_string());
        html.push("class=\"t3-flex-control t3-flex-control-toggle\"".to_string());
        html.push(format!("id=\"{}-toggleClosed\"", escaped_id));
        html.push("type=\"hidden\"".to_string());
        html.push(format!("name=\"{}\"", escape_attr(&toggle_field_name)));
        html.push(format!("value=\"{}\"", if collapsed { "1" } else { "0" }));
        html.push("/>".to_string());
        html.push("</div>".to_string());

        Ok(RenderResult::new(html.join("\n")).merge_child(content))
    }
}

use tracing::debug;

use crate::error::{RenderError, Result};
use crate::parser::types::*;

/// Parse a section document from JSON. Unknown keys are rejected.
pub fn parse_document(json: &str) -> Result<SectionDocument> {
    let document: SectionDocument = serde_json::from_str(json)?;
    validate_document(&document)?;
    debug!(
        table = %document.table,
        field = %document.field_name,
        containers = document.containers.len(),
        "parsed section document"
    );
    Ok(document)
}

fn validate_document(document: &SectionDocument) -> Result<()> {
    for container in &document.containers {
        if container.name.is_empty() {
            return Err(RenderError::InvalidOption {
                option: "containers",
                reason: "container name must not be empty".to_string(),
            });
        }
        if let Some(duplicate) = first_duplicate(&container.elements) {
            return Err(RenderError::InvalidOption {
                option: "elements",
                reason: format!(
                    "element `{}` appears twice in container `{}`",
                    duplicate, container.name
                ),
            });
        }
    }
    Ok(())
}

fn first_duplicate(elements: &[ElementConfig]) -> Option<&str> {
    elements.iter().enumerate().find_map(|(i, element)| {
        elements[..i]
            .iter()
            .any(|earlier| earlier.name == element.name)
            .then_some(element.name.as_str())
    })
}

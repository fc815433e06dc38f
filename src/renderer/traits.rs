use crate::error::{PermissionError, Result};
use crate::renderer::context::{DatabaseRow, RenderContext};
use crate::renderer::result::RenderResult;

/// Which node a factory should build for a context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// A whole section: every container instance of one repeatable field
    #[default]
    Section,
    /// One container instance with its header and body
    Container,
    /// The leaf fields inside one container instance
    ElementGroup,
    /// A single leaf field
    Element,
}

/// Core rendering trait for every node of a form tree
pub trait Node: Send + Sync {
    fn render(&self, context: &RenderContext) -> Result<RenderResult>;
}

/// Builds the node matching `context.render_mode()`.
pub trait NodeFactory: Send + Sync {
    fn create(&self, context: &RenderContext) -> Result<Box<dyn Node>>;
}

/// Backend user permissions needed while rendering.
///
/// An `Err` is a failure of the check itself and must never be read as a
/// denial or a grant.
pub trait PermissionCheck: Send + Sync {
    fn can_edit_default_language(
        &self,
        row: &DatabaseRow,
    ) -> std::result::Result<bool, PermissionError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconSize {
    Small,
    Default,
    Large,
}

impl IconSize {
    pub fn as_str(&self) -> &'static str {
        match self {
            IconSize::Small => "small",
            IconSize::Default => "default",
            IconSize::Large => "large",
        }
    }
}

/// Resolves an icon identifier to markup
pub trait IconProvider: Send + Sync {
    fn icon(&self, identifier: &str, size: IconSize) -> String;
}

/// Source of short tokens that make DOM ids unique per render call
pub trait IdGenerator: Send + Sync {
    fn short_token(&self) -> String;
}

//! # flexsection
//!
//! Renders the backend form markup of repeatable flex form sections: each
//! container instance gets a header with toggle, move and delete controls and
//! a body with its fields, plus the hidden inputs the form submission uses to
//! carry pending actions and collapsed state.
//!
//! Rendering walks a tree of [`Node`]s created by a [`NodeFactory`] per
//! [`RenderMode`]. Every level receives an immutable [`RenderContext`] and
//! derives a modified copy for the level below.

pub mod error;
pub mod manifest;
pub mod parser;
pub mod renderer;

#[cfg(test)]
mod tests;

pub use error::{PermissionError, RenderError, Result};
pub use parser::*;
pub use renderer::*;

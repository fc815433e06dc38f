use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::PermissionError;
use crate::renderer::context::DatabaseRow;
use crate::renderer::traits::*;

/// Escape a value for a double-quoted HTML attribute or text node
pub fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Helper for the HTTP field names the form submission protocol expects
pub struct FieldNameBuilder;

impl FieldNameBuilder {
    /// Field carrying add/delete/move commands for one container instance
    pub fn action_field_name(
        &self,
        item_form_element_name: &str,
        form_prefix: &str,
        counter: usize,
    ) -> String {
        format!(
            "_ACTION_FLEX_FORM{}{}[_ACTION][{}]",
            item_form_element_name, form_prefix, counter
        )
    }

    /// Field carrying the collapsed state of one container instance
    pub fn toggle_field_name(
        &self,
        table: &str,
        uid: &str,
        field_name: &str,
        form_prefix: &str,
        counter: usize,
    ) -> String {
        format!(
            "data[{}][{}][{}]{}[{}][_TOGGLE]",
            table, uid, field_name, form_prefix, counter
        )
    }

    /// Field carrying the value of one leaf element
    pub fn element_field_name(
        &self,
        data_field_name: &str,
        form_prefix: &str,
        element: &str,
    ) -> String {
        format!("{}{}[{}][vDEF]", data_field_name, form_prefix, element)
    }
}

/// Helper for DOM ids
pub struct IdentifierBuilder;

impl IdentifierBuilder {
    /// Every container adds its own token to the id prefix
    pub fn unique_id(&self, prefix: &str, ids: &dyn IdGenerator) -> String {
        format!("{}-{}", prefix, ids.short_token())
    }
}

/// Renders icons as bare spans for the client icon loader to fill in
#[derive(Debug, Clone, Copy, Default)]
pub struct SpanIconProvider;

impl IconProvider for SpanIconProvider {
    fn icon(&self, identifier: &str, size: IconSize) -> String {
        let identifier = escape_attr(identifier);
        format!(
            "<span class=\"icon icon-size-{} icon-{}\" data-identifier=\"{}\"></span>",
            size.as_str(),
            identifier,
            identifier
        )
    }
}

/// Permission answers fixed up front, e.g. from a command line flag
#[derive(Debug, Clone, Copy)]
pub struct StaticPermissions {
    pub default_language: bool,
}

impl StaticPermissions {
    pub fn allow_all() -> Self {
        Self {
            default_language: true,
        }
    }

    pub fn deny_all() -> Self {
        Self {
            default_language: false,
        }
    }
}

impl PermissionCheck for StaticPermissions {
    fn can_edit_default_language(&self, _row: &DatabaseRow) -> Result<bool, PermissionError> {
        Ok(self.default_language)
    }
}

/// Random 10 character hex tokens
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn short_token(&self) -> String {
        // The leading 48 bits of a v4 uuid are all random
        let mut token = uuid::Uuid::new_v4().simple().to_string();
        token.truncate(10);
        token
    }
}

/// Counting tokens, for output that must not change between runs
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn short_token(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{:010x}", n)
    }
}

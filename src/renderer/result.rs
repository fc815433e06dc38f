use std::collections::BTreeMap;

use serde_json::Value;

/// Output of one rendering step: markup plus side-channel data such as
/// client modules the markup needs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderResult {
    pub html: String,
    pub aux: BTreeMap<String, Value>,
}

impl RenderResult {
    pub fn new(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            aux: BTreeMap::new(),
        }
    }

    pub fn with_aux(mut self, key: impl Into<String>, value: Value) -> Self {
        self.aux.insert(key.into(), value);
        self
    }

    /// Fold a child's aux output into this result. The child's html is
    /// dropped; callers embed it before merging.
    pub fn merge_child(mut self, child: RenderResult) -> Self {
        for (key, value) in child.aux {
            match self.aux.remove(&key) {
                Some(existing) => {
                    self.aux.insert(key, merge_values(existing, value));
                }
                None => {
                    self.aux.insert(key, value);
                }
            }
        }
        self
    }
}

fn merge_values(parent: Value, child: Value) -> Value {
    match (parent, child) {
        (Value::Array(mut a), Value::Array(b)) => {
            a.extend(b);
            Value::Array(a)
        }
        (Value::Object(mut a), Value::Object(b)) => {
            for (key, value) in b {
                let merged = match a.remove(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => value,
                };
                a.insert(key, merged);
            }
            Value::Object(a)
        }
        (_, child) => child,
    }
}

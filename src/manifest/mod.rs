//! Extension metadata manifests.
//!
//! A manifest names an extension, its version and the version ranges of the
//! extensions it depends on, conflicts with or suggests. Loading extensions
//! and resolving those constraints is left to the package loader.

pub mod version;

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer};
use thiserror::Error;
use tracing::debug;

pub use version::{Version, VersionRange};

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("invalid version `{0}`, expected major.minor.patch")]
    InvalidVersion(String),

    #[error("version range `{0}` has a lower bound above its upper bound")]
    InvertedRange(String),

    #[error("invalid manifest: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExtensionState {
    Alpha,
    Beta,
    Stable,
    Experimental,
    Test,
    Obsolete,
    ExcludeFromUpdates,
}

impl fmt::Display for ExtensionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExtensionState::Alpha => "alpha",
            ExtensionState::Beta => "beta",
            ExtensionState::Stable => "stable",
            ExtensionState::Experimental => "experimental",
            ExtensionState::Test => "test",
            ExtensionState::Obsolete => "obsolete",
            ExtensionState::ExcludeFromUpdates => "excludeFromUpdates",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Constraints {
    #[serde(default, deserialize_with = "constraint_map")]
    pub depends: BTreeMap<String, VersionRange>,
    #[serde(default, deserialize_with = "constraint_map")]
    pub conflicts: BTreeMap<String, VersionRange>,
    #[serde(default, deserialize_with = "constraint_map")]
    pub suggests: BTreeMap<String, VersionRange>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionManifest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    pub state: ExtensionState,
    pub version: Version,
    #[serde(default)]
    pub constraints: Constraints,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default, rename = "author_email")]
    pub author_email: Option<String>,
    #[serde(default, rename = "author_company")]
    pub author_company: Option<String>,
    #[serde(default, rename = "uploadfolder", deserialize_with = "legacy_flag")]
    pub upload_folder: bool,
    #[serde(default)]
    pub create_dirs: String,
    #[serde(default, deserialize_with = "legacy_flag")]
    pub clear_cache_on_load: bool,
}

impl ExtensionManifest {
    /// Range required for `extension`, if this manifest depends on it
    pub fn dependency(&self, extension: &str) -> Option<&VersionRange> {
        self.constraints.depends.get(extension)
    }

    /// Whether `version` of `extension` is one this manifest conflicts with
    pub fn conflicts_with(&self, extension: &str, version: &Version) -> bool {
        self.constraints
            .conflicts
            .get(extension)
            .is_some_and(|range| range.contains(version))
    }
}

pub fn parse_manifest(json: &str) -> Result<ExtensionManifest, ManifestError> {
    let manifest: ExtensionManifest = serde_json::from_str(json)?;
    debug!(
        title = %manifest.title,
        version = %manifest.version,
        depends = manifest.constraints.depends.len(),
        "parsed extension manifest"
    );
    Ok(manifest)
}

/// Constraint lists exported from PHP arrays arrive as `[]` when empty
fn constraint_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, VersionRange>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Object(entries) => entries
            .into_iter()
            .map(|(extension, range)| match range {
                serde_json::Value::String(raw) => raw
                    .parse::<VersionRange>()
                    .map(|range| (extension.clone(), range))
                    .map_err(|err| {
                        D::Error::custom(format!("constraint `{}`: {}", extension, err))
                    }),
                other => Err(D::Error::custom(format!(
                    "constraint `{}`: expected a version range string, got {}",
                    extension, other
                ))),
            })
            .collect(),
        serde_json::Value::Array(list) if list.is_empty() => Ok(BTreeMap::new()),
        _ => Err(D::Error::custom("constraints must map extension keys to version ranges")),
    }
}

/// Flags written as `0`, `1`, `"0"`, `"1"` or booleans
fn legacy_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Bool(b) => Ok(b),
        serde_json::Value::Number(n) => Ok(n.as_f64().is_some_and(|f| f != 0.0)),
        serde_json::Value::String(s) => Ok(!(s.is_empty() || s == "0")),
        serde_json::Value::Null => Ok(false),
        other => Err(serde::de::Error::custom(format!("invalid flag value {}", other))),
    }
}

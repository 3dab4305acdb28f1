//! Schema loading.
//!
//! Loading is structural decoding followed by validation: a cookbook returned
//! from here has passed [`validate`](crate::validate::validate).

use crate::error::SchemaError;
use crate::model::Cookbook;
use crate::validate::validate;
use std::path::Path;

/// Source format of a schema file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
}

/// Error loading a schema.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot infer schema format from `{0}` (expected .yaml, .yml or .json)")]
    UnknownFormat(String),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl Format {
    /// Infer the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "yaml" | "yml" => Some(Format::Yaml),
            "json" => Some(Format::Json),
            _ => None,
        }
    }
}

/// Decode and validate a cookbook from text.
pub fn load_str(text: &str, format: Format) -> Result<Cookbook, LoadError> {
    let cookbook: Cookbook = match format {
        Format::Yaml => serde_yaml::from_str(text)?,
        Format::Json => serde_json::from_str(text)?,
    };
    tracing::debug!(
        domain = %cookbook.domain,
        ingredients = cookbook.ingredients.len(),
        enums = cookbook.enums.len(),
        "decoded cookbook"
    );
    validate(&cookbook)?;
    Ok(cookbook)
}

/// Read, decode, and validate a cookbook file. The format is inferred from
/// the extension unless given.
pub fn load_path(path: &Path, format: Option<Format>) -> Result<Cookbook, LoadError> {
    let format = match format.or_else(|| Format::from_path(path)) {
        Some(format) => format,
        None => return Err(LoadError::UnknownFormat(path.display().to_string())),
    };
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    tracing::info!(path = %path.display(), "loading cookbook");
    load_str(&text, format)
}

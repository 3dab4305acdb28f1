//! Renderer contract and the built-in JSON renderer.
//!
//! A renderer turns one [`ArtifactRecord`] into named text files. File
//! naming is entirely the renderer's decision; paths are relative and get
//! rooted by a [`Writer`](crate::write::Writer).

use crate::record::{ArtifactRecord, RecordKind};
use std::path::PathBuf;

/// One rendered file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    /// Path relative to the output root.
    pub path: PathBuf,
    pub contents: String,
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to serialize {kind} record `{name}`: {source}")]
    Json {
        kind: RecordKind,
        name: String,
        source: serde_json::Error,
    },

    #[error("{kind} name `{name}` cannot be used as a file name")]
    UnsafeName { kind: RecordKind, name: String },
}

/// Turns records into files.
pub trait Renderer: Send + Sync {
    /// Short renderer identifier (e.g., "json").
    fn name(&self) -> &'static str;

    fn render(&self, record: &ArtifactRecord) -> Result<Vec<RenderedFile>, RenderError>;
}

/// Writes each record as pretty-printed JSON.
///
/// Layout, per binding:
///
/// ```text
/// <binding>/index.json
/// <binding>/ingredients/<Name>.json
/// <binding>/enums/<Name>.json
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl Renderer for JsonRenderer {
    fn name(&self) -> &'static str {
        "json"
    }

    fn render(&self, record: &ArtifactRecord) -> Result<Vec<RenderedFile>, RenderError> {
        let kind = record.kind();
        let mut path = PathBuf::from(file_stem(kind, record.binding())?);
        match kind {
            RecordKind::Ingredient => path.push("ingredients"),
            RecordKind::Enum => path.push("enums"),
            RecordKind::Manifest => {}
        }
        match kind {
            RecordKind::Manifest => path.push("index.json"),
            _ => path.push(format!("{}.json", file_stem(kind, record.name())?)),
        }

        let mut contents =
            serde_json::to_string_pretty(record).map_err(|source| RenderError::Json {
                kind,
                name: record.name().to_string(),
                source,
            })?;
        contents.push('\n');
        Ok(vec![RenderedFile { path, contents }])
    }
}

/// A name usable as a single path component.
fn file_stem(kind: RecordKind, name: &str) -> Result<&str, RenderError> {
    let unsafe_name = name.is_empty()
        || name == "."
        || name == ".."
        || name.contains(['/', '\\', '\0']);
    if unsafe_name {
        Err(RenderError::UnsafeName {
            kind,
            name: name.to_string(),
        })
    } else {
        Ok(name)
    }
}

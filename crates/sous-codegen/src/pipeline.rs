//! Validate, generate, render, write.
//!
//! A run is all-or-nothing up to the write step: the cookbook is validated,
//! every binding generates, and every record renders before the first file is
//! handed to the writer.

use crate::binding::Binding;
use crate::driver::generate;
use crate::render::{RenderError, RenderedFile, Renderer};
use crate::write::Writer;
use rayon::prelude::*;
use sous_schema::{Cookbook, SchemaError, validate};
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("binding `{binding}`: {source}")]
    Generate {
        binding: String,
        source: SchemaError,
    },

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// What a run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub bindings: Vec<String>,
    pub records: usize,
    /// Paths handed to the writer, in write order.
    pub files: Vec<PathBuf>,
}

/// A set of bindings and the renderer their records go through.
pub struct Pipeline<'r> {
    bindings: Vec<&'static dyn Binding>,
    renderer: &'r dyn Renderer,
}

impl<'r> Pipeline<'r> {
    pub fn new(renderer: &'r dyn Renderer) -> Self {
        Self {
            bindings: Vec::new(),
            renderer,
        }
    }

    pub fn with_binding(mut self, binding: &'static dyn Binding) -> Self {
        self.bindings.push(binding);
        self
    }

    pub fn with_bindings(mut self, bindings: impl IntoIterator<Item = &'static dyn Binding>) -> Self {
        self.bindings.extend(bindings);
        self
    }

    /// Render every binding's records without writing anything.
    ///
    /// Bindings generate in parallel; files come back grouped by binding in
    /// the order bindings were added.
    pub fn render(&self, cookbook: &Cookbook) -> Result<(usize, Vec<RenderedFile>), PipelineError> {
        validate(cookbook)?;

        let generated = self
            .bindings
            .par_iter()
            .map(|binding| {
                generate(cookbook, *binding).map_err(|source| PipelineError::Generate {
                    binding: binding.name().to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let records: usize = generated.iter().map(Vec::len).sum();
        let mut files = Vec::new();
        for record in generated.iter().flatten() {
            files.extend(self.renderer.render(record)?);
        }
        tracing::debug!(
            renderer = self.renderer.name(),
            records,
            files = files.len(),
            "rendered"
        );
        Ok((records, files))
    }

    /// Render everything, then write it.
    pub fn run(
        &self,
        cookbook: &Cookbook,
        writer: &mut dyn Writer,
    ) -> Result<RunSummary, PipelineError> {
        let (records, files) = self.render(cookbook)?;
        let mut written = Vec::with_capacity(files.len());
        for file in files {
            writer
                .write(&file.path, &file.contents)
                .map_err(|source| PipelineError::Write {
                    path: file.path.clone(),
                    source,
                })?;
            written.push(file.path);
        }
        Ok(RunSummary {
            bindings: self.bindings.iter().map(|b| b.name().to_string()).collect(),
            records,
            files: written,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::JsonRenderer;
    use crate::write::MemoryWriter;
    use crate::BindingSet;
    use sous_schema::{EnumDef, Ingredient, Optional, SchemaErrorKind};

    fn cookbook() -> Cookbook {
        Cookbook::new("kitchen")
            .with_enum(EnumDef::new("Heat", &["LOW", "HIGH"]))
            .with_ingredient(Ingredient::new("Fry").with_optional(Optional::simple("heat", "Heat")))
    }

    #[test]
    fn test_run_writes_every_binding() {
        let set = BindingSet::builtin();
        let pipeline = Pipeline::new(&JsonRenderer).with_bindings(set.iter());
        let mut writer = MemoryWriter::new();
        let summary = pipeline.run(&cookbook(), &mut writer).unwrap();

        assert_eq!(summary.bindings.len(), set.len());
        assert_eq!(summary.records, 3 * set.len());
        assert_eq!(writer.files().len(), 3 * set.len());
        for name in set.names() {
            assert!(writer.get(format!("{name}/index.json")).is_some());
            assert!(writer.get(format!("{name}/ingredients/Fry.json")).is_some());
            assert!(writer.get(format!("{name}/enums/Heat.json")).is_some());
        }
    }

    #[test]
    fn test_invalid_cookbook_writes_nothing() {
        let cb = cookbook().with_enum(EnumDef::new("Heat", &["LOW"]));
        let pipeline = Pipeline::new(&JsonRenderer).with_bindings(BindingSet::builtin().iter());
        let mut writer = MemoryWriter::new();
        let err = pipeline.run(&cb, &mut writer).unwrap_err();
        assert!(matches!(err, PipelineError::Schema(ref e) if e.kind() == SchemaErrorKind::DuplicateName));
        assert!(writer.files().is_empty());
    }
}

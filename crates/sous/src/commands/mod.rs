//! Subcommands. Each `run` prints its own output and errors and returns the
//! process exit code.

pub mod bindings;
pub mod check;
pub mod generate;
pub mod types;

use crate::config::SousConfig;
use clap::ValueEnum;
use sous_schema::{Cookbook, Format, load_path};
use std::path::PathBuf;

/// Schema source format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SchemaFormat {
    /// Detect from the file extension
    Auto,
    Yaml,
    Json,
}

impl SchemaFormat {
    fn explicit(self) -> Option<Format> {
        match self {
            SchemaFormat::Auto => None,
            SchemaFormat::Yaml => Some(Format::Yaml),
            SchemaFormat::Json => Some(Format::Json),
        }
    }
}

/// The schema named on the command line, else the configured one.
fn schema_path(arg: Option<PathBuf>, config: &SousConfig) -> Option<PathBuf> {
    arg.or_else(|| config.schema.path.clone())
}

/// Load and validate a cookbook, reporting failures on stderr.
fn load_cookbook(
    arg: Option<PathBuf>,
    format: SchemaFormat,
    config: &SousConfig,
) -> Result<(PathBuf, Cookbook), i32> {
    let Some(path) = schema_path(arg, config) else {
        eprintln!("No schema given. Pass a path or set [schema] path in .sous/config.toml");
        return Err(2);
    };
    match load_path(&path, format.explicit()) {
        Ok(cookbook) => Ok((path, cookbook)),
        Err(e) => {
            eprintln!("{}: {}", path.display(), e);
            Err(1)
        }
    }
}

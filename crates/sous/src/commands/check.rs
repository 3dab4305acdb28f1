//! `sous check`: load and validate a cookbook.

use super::{SchemaFormat, load_cookbook};
use crate::config::SousConfig;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Cookbook schema (YAML or JSON); defaults to [schema] path from config
    pub schema: Option<PathBuf>,

    /// Schema format
    #[arg(short, long, value_enum, default_value = "auto")]
    pub format: SchemaFormat,
}

pub fn run(args: CheckArgs, config: &SousConfig) -> i32 {
    let (path, cookbook) = match load_cookbook(args.schema, args.format, config) {
        Ok(loaded) => loaded,
        Err(code) => return code,
    };
    println!(
        "{}: ok ({} ingredients, {} enums)",
        path.display(),
        cookbook.ingredients.len(),
        cookbook.enums.len()
    );
    0
}

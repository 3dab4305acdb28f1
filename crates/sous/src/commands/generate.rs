//! `sous generate`: validate a cookbook and write records for each binding.

use super::{SchemaFormat, load_cookbook};
use crate::config::{OutputFormat, SousConfig};
use clap::Args;
use sous_codegen::{Binding, BindingSet, FsWriter, JsonRenderer, Pipeline, Renderer};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Cookbook schema (YAML or JSON); defaults to [schema] path from config
    pub schema: Option<PathBuf>,

    /// Bindings to generate for (comma-separated); defaults to config, then all
    #[arg(short, long = "binding", value_delimiter = ',')]
    pub bindings: Vec<String>,

    /// Output directory
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Schema format
    #[arg(short, long, value_enum, default_value = "auto")]
    pub format: SchemaFormat,

    /// List the files that would be written without writing them
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(args: GenerateArgs, config: &SousConfig) -> i32 {
    let set = BindingSet::builtin();
    let bindings = match select_bindings(&set, &args.bindings, config) {
        Ok(bindings) => bindings,
        Err(unknown) => {
            eprintln!(
                "Unknown binding: {}. Available: {}",
                unknown,
                set.names().join(", ")
            );
            return 1;
        }
    };

    let (path, cookbook) = match load_cookbook(args.schema, args.format, config) {
        Ok(loaded) => loaded,
        Err(code) => return code,
    };

    let renderer: &dyn Renderer = match args.output.unwrap_or(config.format()) {
        OutputFormat::Json => &JsonRenderer,
    };
    let pipeline = Pipeline::new(renderer).with_bindings(bindings);

    if args.dry_run {
        return match pipeline.render(&cookbook) {
            Ok((_, files)) => {
                for file in files {
                    println!("{}", file.path.display());
                }
                0
            }
            Err(e) => {
                eprintln!("{}: {}", path.display(), e);
                1
            }
        };
    }

    let out_dir = args.out_dir.unwrap_or_else(|| config.out_dir());
    let mut writer = FsWriter::new(&out_dir);
    match pipeline.run(&cookbook, &mut writer) {
        Ok(summary) => {
            eprintln!(
                "Generated {} files for {} into {}",
                summary.files.len(),
                summary.bindings.join(", "),
                out_dir.display()
            );
            0
        }
        Err(e) => {
            eprintln!("{}: {}", path.display(), e);
            1
        }
    }
}

/// Flags win over config; with neither, every built-in binding is used.
fn select_bindings(
    set: &BindingSet,
    requested: &[String],
    config: &SousConfig,
) -> Result<Vec<&'static dyn Binding>, String> {
    if !requested.is_empty() {
        return set.select(requested);
    }
    match &config.generate.bindings {
        Some(names) => set.select(names),
        None => Ok(set.iter().collect()),
    }
}

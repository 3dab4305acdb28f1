//! `sous types`: resolve a type string and show how each binding spells it.

use super::{SchemaFormat, load_cookbook, schema_path};
use crate::config::SousConfig;
use clap::Args;
use sous_codegen::{Binding, BindingSet};
use sous_schema::{Cookbook, ParamType, parse_type};
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct TypesArgs {
    /// Type string, e.g. `string[]...` or `Heat`
    pub ty: String,

    /// Cookbook to resolve enum names against; defaults to [schema] path
    /// from config. Without one, only built-in types resolve.
    #[arg(short, long)]
    pub schema: Option<PathBuf>,

    /// Schema format
    #[arg(short, long, value_enum, default_value = "auto")]
    pub format: SchemaFormat,
}

pub fn run(args: TypesArgs, config: &SousConfig) -> i32 {
    let cookbook = if schema_path(args.schema.clone(), config).is_some() {
        match load_cookbook(args.schema, args.format, config) {
            Ok((_, cookbook)) => cookbook,
            Err(code) => return code,
        }
    } else {
        Cookbook::default()
    };

    let ty = match parse_type(&args.ty, &cookbook) {
        Ok(ty) => ty,
        Err(e) => {
            eprintln!("{e}");
            return 1;
        }
    };

    println!("{ty}");
    for binding in BindingSet::builtin().iter() {
        println!("  {:<12} {}", binding.name(), spell(binding, &ty));
    }
    0
}

/// Native spelling, plus the array form when it differs.
fn spell(binding: &dyn Binding, ty: &ParamType) -> String {
    let native = binding.map_type(ty, false);
    let array = binding.map_type(ty, true);
    if native == array {
        native
    } else {
        format!("{native}  (as array: {array})")
    }
}

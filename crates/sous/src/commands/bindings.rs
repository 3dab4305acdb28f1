//! `sous bindings`: list the built-in bindings.

use clap::Args;
use sous_codegen::BindingSet;

#[derive(Debug, Args)]
pub struct BindingsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: BindingsArgs) -> i32 {
    let set = BindingSet::builtin();
    if args.json {
        let list: Vec<_> = set
            .iter()
            .map(|b| {
                serde_json::json!({
                    "name": b.name(),
                    "language": b.language(),
                    "extension": b.extension(),
                })
            })
            .collect();
        match serde_json::to_string_pretty(&list) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("Failed to serialize bindings: {e}");
                return 1;
            }
        }
    } else {
        for binding in set.iter() {
            println!(
                "{:<12} {:<12} .{}",
                binding.name(),
                binding.language(),
                binding.extension()
            );
        }
    }
    0
}

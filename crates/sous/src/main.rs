use clap::{Parser, Subcommand};
use sous::commands::{bindings, check, generate, types};
use sous::config::SousConfig;
use tracing_subscriber::EnvFilter;

/// Generate builder artifacts for several languages from one cookbook schema.
#[derive(Parser)]
#[command(name = "sous", version, about)]
struct Cli {
    /// Increase log verbosity (-v: info, -vv: debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load and validate a cookbook
    Check(check::CheckArgs),
    /// Generate records for one or more bindings
    Generate(generate::GenerateArgs),
    /// List built-in bindings
    Bindings(bindings::BindingsArgs),
    /// Resolve a type string and show each binding's spelling
    Types(types::TypesArgs),
}

/// `SOUS_LOG` takes precedence; otherwise `-v` picks the level.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_env("SOUS_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let root = std::env::current_dir().unwrap_or_else(|_| ".".into());
    let config = SousConfig::load(&root);

    let code = match cli.command {
        Command::Check(args) => check::run(args, &config),
        Command::Generate(args) => generate::run(args, &config),
        Command::Bindings(args) => bindings::run(args),
        Command::Types(args) => types::run(args, &config),
    };
    std::process::exit(code);
}

mod analyzer;
mod check;
mod config;
mod finding;
mod naming;
mod registry;
mod set_literal;
mod source;
mod strip;
mod unused;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "cmake-check",
    version,
    about = "Check CMake projects for include-what-you-use and style issues"
)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report redundant/missing include(), unused modules and set(VAR) calls
    Check {
        /// Project root or a single CMake file
        path: PathBuf,
        /// Print findings as JSON
        #[arg(long)]
        json: bool,
        /// Maximum parent directories walked to namespace a local module
        #[arg(long)]
        max_depth: Option<usize>,
        /// Local modules directory, relative to PATH
        #[arg(long)]
        modules_dir: Option<PathBuf>,
        /// Skip the unused find/utility module checks
        #[arg(long)]
        skip_unused: bool,
        /// Skip the set(VAR) without value check
        #[arg(long)]
        skip_set_literal: bool,
    },
    /// List the known modules and their usage patterns
    Modules,
}

fn init_logging(verbose: bool) {
    let env_filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("cmake_check=debug")
    } else {
        EnvFilter::new("cmake_check=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Check {
            path,
            json,
            max_depth,
            modules_dir,
            skip_unused,
            skip_set_literal,
        } => {
            let mut config = config::load(&path)?;
            if let Some(depth) = max_depth {
                config.max_namespace_depth = depth;
            }
            if let Some(dir) = modules_dir {
                config.modules_dir = dir;
            }
            let options = check::Options {
                json,
                skip_unused,
                skip_set_literal,
            };
            if !check::run(&path, &config, options)? {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Modules => registry::run(),
    }
}

//! grapnel - pluggable checker runner for Git hooks.

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use grapnel::cli;
use grapnel::Error;

#[derive(Parser)]
#[command(name = "grapnel")]
#[command(about = "Pluggable checker runner for Git hooks")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run checkers for a hook firing (invoked by installed hook scripts)
    Run {
        /// Hook name (one of the Git hook entry points)
        #[arg(default_value = "pre-commit")]
        hook: String,

        /// Arguments Git passed to the hook
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Install hook entry scripts into .git/hooks
    Install {
        /// Print actions without touching the filesystem
        #[arg(long)]
        dry_run: bool,
    },

    /// Remove grapnel entries from .git/hooks
    Uninstall,

    /// List registered checkers
    Checkers,
}

fn main() -> Result<(), Error> {
    // Installer sanity probe: identify ourselves and do nothing else.
    if let Ok(probe) = std::env::var("GRAPNEL_INSTALL_TEST") {
        if !probe.is_empty() {
            println!("grapnel {}", probe);
            return Ok(());
        }
    }

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("grapnel=info".parse().unwrap()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { hook, args } => {
            let exit_code = cli::run::run(&hook, args)?;
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Commands::Install { dry_run } => {
            cli::install::run(dry_run)?;
        }
        Commands::Uninstall => {
            cli::uninstall::run()?;
        }
        Commands::Checkers => {
            cli::checkers::run()?;
        }
    }

    Ok(())
}

use anyhow::Result;
use clap::Parser;
use covtree::cli::{Cli, Commands};
use covtree::commands;
use covtree::observability::{init_logging, install_panic_hook};

/// Exit status when project coverage is below the requested minimum.
const BELOW_MINIMUM_EXIT_CODE: i32 = 2;

fn main() -> Result<()> {
    install_panic_hook();
    let cli = Cli::parse();

    match cli.command {
        Commands::Init { force } => {
            init_logging(0, "warn");
            commands::init_config(force)
        }
        Commands::Report(args) => {
            let config = commands::resolve_config(&args)?;
            init_logging(args.verbose, &config.log_level);

            let outcome = commands::run_report(&args, &config)?;
            if !outcome.meets_minimum() {
                std::process::exit(BELOW_MINIMUM_EXIT_CODE);
            }
            Ok(())
        }
    }
}

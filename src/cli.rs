use crate::output::ColorMode;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "covtree")]
#[command(about = "Roll up coverage measures over a project's component tree", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Aggregate an LCOV report into per-directory and project coverage
    Report(ReportArgs),

    /// Write a default .covtree.toml in the current directory
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}

#[derive(clap::Args, Debug, Clone)]
pub struct ReportArgs {
    /// LCOV report produced by unit tests
    pub lcov: PathBuf,

    /// LCOV report produced by integration tests
    #[arg(long = "it-lcov")]
    pub it_lcov: Option<PathBuf>,

    /// Directory that report paths are relative to (defaults to the current directory)
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Key of the root project component
    #[arg(long = "project-key", env = "COVTREE_PROJECT_KEY")]
    pub project_key: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    pub format: OutputFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Aggregate sibling subtrees in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Exit with status 2 when project coverage is below this percentage
    #[arg(long = "min-coverage")]
    pub min_coverage: Option<f64>,

    /// Include file rows in the report
    #[arg(long)]
    pub files: bool,

    /// Configuration file (defaults to the nearest .covtree.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Colored terminal output
    #[arg(long, value_enum, default_value = "auto")]
    pub color: ColorMode,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Terminal,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_report_arguments() {
        let cli = Cli::try_parse_from([
            "covtree",
            "report",
            "lcov.info",
            "--it-lcov",
            "it.info",
            "--format",
            "json",
            "--min-coverage",
            "80",
            "--parallel",
            "-vv",
        ])
        .unwrap();

        let Commands::Report(args) = cli.command else {
            panic!("expected report command");
        };
        assert_eq!(args.lcov, PathBuf::from("lcov.info"));
        assert_eq!(args.it_lcov, Some(PathBuf::from("it.info")));
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.min_coverage, Some(80.0));
        assert!(args.parallel);
        assert_eq!(args.verbose, 2);
        assert_eq!(args.color, ColorMode::Auto);
    }

    #[test]
    fn test_parse_init() {
        let cli = Cli::try_parse_from(["covtree", "init", "--force"]).unwrap();
        assert!(matches!(cli.command, Commands::Init { force: true }));
    }
}

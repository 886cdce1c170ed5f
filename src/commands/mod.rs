//! CLI command implementations.
//!
//! - **report**: aggregate LCOV coverage over the component tree and print it
//! - **init**: write a default `.covtree.toml`

pub mod init;
pub mod report;

pub use init::{init_config, init_config_in};
pub use report::{resolve_config, run_report, ReportOutcome};

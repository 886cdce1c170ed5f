//! LCOV ingestion.
//!
//! Reads `SF`/`DA`/`BRDA` records into per-file hit counts and turns them
//! into the raw measures coverage formulas consume:
//!
//! | measure                | derived from                        |
//! |------------------------|-------------------------------------|
//! | `lines_to_cover`       | distinct `DA` lines                 |
//! | `uncovered_lines`      | `DA` lines with a zero count        |
//! | `conditions_to_cover`  | `BRDA` entries                      |
//! | `uncovered_conditions` | `BRDA` entries never taken          |
//!
//! A file listed several times (e.g. once per test binary) is merged by
//! keeping the highest hit count per line and branch.

mod handlers;
pub mod parser;
pub mod project;
pub mod types;

pub use parser::{parse_lcov_file, parse_lcov_reader};
pub use project::{relative_path, ProjectCoverage};
pub use types::{CoverageReport, FileCoverage};

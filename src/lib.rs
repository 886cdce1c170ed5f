//! Hierarchical coverage aggregation.
//!
//! Raw per-file coverage measures are rolled up a component tree
//! (files, directories, project) by typed counters. Each formula owns one
//! counter per node; leaves feed their counter from raw measures, parents
//! merge their children's counters, and every node gets its output measures.
//!
//! ```
//! use covtree::component::{ComponentTreeBuilder, FileAttributes};
//! use covtree::formula::{coverage_formulas, FormulaExecutor};
//! use covtree::measure::{keys, InMemoryMeasureRepository, Measure};
//!
//! let mut builder = ComponentTreeBuilder::new("demo");
//! builder.add_file("src/lib.rs", FileAttributes::production()).unwrap();
//! let tree = builder.build();
//!
//! let mut measures = InMemoryMeasureRepository::new();
//! measures.add("demo:src/lib.rs", keys::LINES_TO_COVER, Measure::Long(10));
//! measures.add("demo:src/lib.rs", keys::UNCOVERED_LINES, Measure::Long(4));
//!
//! let computed = FormulaExecutor::new(coverage_formulas()).execute(&tree, &measures);
//! let coverage = computed.get(tree.root(), keys::COVERAGE).map(Measure::as_double);
//! assert_eq!(coverage, Some(60.0));
//! ```

pub mod cli;
pub mod commands;
pub mod component;
pub mod config;
pub mod errors;
pub mod formula;
pub mod lcov;
pub mod measure;
pub mod observability;
pub mod output;

pub use crate::component::{Component, ComponentId, ComponentTree, ComponentTreeBuilder, ComponentType};
pub use crate::errors::{Error, Result};
pub use crate::formula::{
    coverage_formulas, ComputedMeasures, Counter, Formula, FormulaExecutor, FormulaSet,
    TraversalMode,
};
pub use crate::measure::{InMemoryMeasureRepository, Measure, MeasureRepository};

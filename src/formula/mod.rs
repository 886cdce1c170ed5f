//! Formulas: pluggable bottom-up aggregations over a component tree.
//!
//! A [`Formula`] owns a kind of [`Counter`]. The executor creates one counter
//! per tree node, feeds it leaf data or child counters, and finally asks the
//! formula to turn the finished counter into output measures.
//!
//! Several formulas run in the same traversal without sharing any counter
//! state: each keeps its own arena of counters.

pub mod counter;
pub mod coverage;
pub mod executor;
pub mod registry;
pub mod sum;

pub use counter::{Counter, CreateMeasureContext, LeafAggregateContext};
pub use executor::{aggregate_subtree, ComputedMeasures, FormulaExecutor, TraversalMode};
pub use registry::{coverage_formulas, FormulaSet};
pub use sum::{SumCounter, SumFormula};

use crate::measure::Measure;

/// A counter factory plus the step that converts finished counters into
/// measures.
pub trait Formula: Send + Sync {
    type Counter: Counter + Send;

    fn create_new_counter(&self) -> Self::Counter;

    /// Called once per output metric key for every node whose counter is
    /// complete. `None` means no measure for that node.
    fn create_measure(&self, counter: &Self::Counter, context: &CreateMeasureContext<'_>) -> Option<Measure>;

    fn output_metric_keys(&self) -> &[&'static str];
}

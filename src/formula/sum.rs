//! Integer sum of a raw leaf measure.

use super::counter::{Counter, CreateMeasureContext, LeafAggregateContext};
use super::coverage::is_excluded_leaf;
use super::Formula;
use crate::measure::Measure;

#[derive(Debug, Clone)]
pub struct SumCounter {
    metric_key: &'static str,
    exclude_unit_tests: bool,
    sum: i64,
    has_value: bool,
}

impl SumCounter {
    pub fn value(&self) -> Option<i64> {
        self.has_value.then_some(self.sum)
    }
}

impl Counter for SumCounter {
    fn aggregate(&mut self, other: &Self) {
        self.sum += other.sum;
        self.has_value |= other.has_value;
    }

    fn aggregate_leaf(&mut self, context: &LeafAggregateContext<'_>) {
        if self.exclude_unit_tests && is_excluded_leaf(context.leaf()) {
            return;
        }
        if let Some(value) = context.long_value(self.metric_key) {
            self.sum += value;
            self.has_value = true;
        }
    }
}

/// Rolls a raw measure up the tree under the same metric key.
///
/// Nodes where no leaf carried the measure get no output.
#[derive(Debug, Clone)]
pub struct SumFormula {
    metric_key: &'static str,
    exclude_unit_tests: bool,
}

impl SumFormula {
    pub fn new(metric_key: &'static str) -> Self {
        Self {
            metric_key,
            exclude_unit_tests: false,
        }
    }

    /// Skip unit-test files, with the same rule as coverage counters.
    pub fn excluding_unit_tests(mut self) -> Self {
        self.exclude_unit_tests = true;
        self
    }
}

impl Formula for SumFormula {
    type Counter = SumCounter;

    fn create_new_counter(&self) -> SumCounter {
        SumCounter {
            metric_key: self.metric_key,
            exclude_unit_tests: self.exclude_unit_tests,
            sum: 0,
            has_value: false,
        }
    }

    fn create_measure(&self, counter: &SumCounter, _context: &CreateMeasureContext<'_>) -> Option<Measure> {
        counter.value().map(Measure::Long)
    }

    fn output_metric_keys(&self) -> &[&'static str] {
        std::slice::from_ref(&self.metric_key)
    }
}

//! The accumulator contract shared by every formula.

use crate::component::Component;
use crate::measure::{Measure, MeasureRepository};

/// Per-node accumulator for one metric family.
///
/// A counter is created by the executor for a single tree node and is fed
/// either one leaf visit (leaf-type nodes) or the counters of all its
/// children (aggregate nodes). Merging is typed on `Self`, so a counter can
/// only absorb a counter of the exact same kind.
///
/// Implementations must make [`Counter::aggregate`] commutative and
/// associative: children are merged in no guaranteed order.
pub trait Counter {
    /// Merge a child's accumulated state into `self`.
    fn aggregate(&mut self, other: &Self);

    /// Absorb the contribution of one leaf.
    ///
    /// Calling this twice for the same leaf counts it twice.
    fn aggregate_leaf(&mut self, context: &LeafAggregateContext<'_>);
}

/// Read-only view handed to a counter while it visits a leaf.
#[derive(Clone, Copy)]
pub struct LeafAggregateContext<'a> {
    leaf: &'a Component,
    measures: &'a dyn MeasureRepository,
}

impl<'a> LeafAggregateContext<'a> {
    pub fn new(leaf: &'a Component, measures: &'a dyn MeasureRepository) -> Self {
        Self { leaf, measures }
    }

    pub fn leaf(&self) -> &'a Component {
        self.leaf
    }

    pub fn measure(&self, metric_key: &str) -> Option<&'a Measure> {
        self.measures.raw(self.leaf, metric_key)
    }

    pub fn long_value(&self, metric_key: &str) -> Option<i64> {
        self.measure(metric_key).map(Measure::as_long)
    }
}

/// What a formula sees when turning a finished counter into a measure.
#[derive(Debug, Clone, Copy)]
pub struct CreateMeasureContext<'a> {
    component: &'a Component,
    metric_key: &'a str,
}

impl<'a> CreateMeasureContext<'a> {
    pub fn new(component: &'a Component, metric_key: &'a str) -> Self {
        Self {
            component,
            metric_key,
        }
    }

    pub fn component(&self) -> &'a Component {
        self.component
    }

    pub fn metric_key(&self) -> &'a str {
        self.metric_key
    }
}

//! Leaf value extraction for coverage counters.
//!
//! Extractors read raw measures of a single leaf and return its
//! [`ElementsAndCovered`] pair. They never see unit-test files: the counter
//! filters those out before calling them.
//!
//! Absent measures are tolerated: a missing "to cover" value contributes
//! zero elements, a missing "uncovered" value reads as zero uncovered.

use super::ElementsAndCovered;
use crate::formula::counter::LeafAggregateContext;
use crate::measure::keys::CoverageInputKeys;

/// Metric-specific policy deriving a leaf's elements and covered elements.
pub trait ElementsExtractor {
    fn extract(&self, context: &LeafAggregateContext<'_>) -> ElementsAndCovered;
}

/// One countable measure paired with its uncovered counterpart, e.g. lines
/// to cover and uncovered lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SingleWithUncovered {
    pub elements: &'static str,
    pub uncovered: &'static str,
}

impl SingleWithUncovered {
    pub const fn new(elements: &'static str, uncovered: &'static str) -> Self {
        Self {
            elements,
            uncovered,
        }
    }

    pub const fn lines(keys: CoverageInputKeys) -> Self {
        Self::new(keys.lines_to_cover, keys.uncovered_lines)
    }

    pub const fn conditions(keys: CoverageInputKeys) -> Self {
        Self::new(keys.conditions_to_cover, keys.uncovered_conditions)
    }
}

impl ElementsExtractor for SingleWithUncovered {
    fn extract(&self, context: &LeafAggregateContext<'_>) -> ElementsAndCovered {
        let Some(elements) = context.long_value(self.elements) else {
            return ElementsAndCovered::ZERO;
        };
        let uncovered = context.long_value(self.uncovered).unwrap_or(0);
        ElementsAndCovered::new(elements, elements - uncovered)
    }
}

/// Lines and conditions counted together, for overall coverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinesAndConditionsWithUncovered {
    pub keys: CoverageInputKeys,
}

impl LinesAndConditionsWithUncovered {
    pub const fn new(keys: CoverageInputKeys) -> Self {
        Self { keys }
    }
}

impl ElementsExtractor for LinesAndConditionsWithUncovered {
    fn extract(&self, context: &LeafAggregateContext<'_>) -> ElementsAndCovered {
        let lines = context.long_value(self.keys.lines_to_cover);
        let conditions = context.long_value(self.keys.conditions_to_cover);
        if lines.is_none() && conditions.is_none() {
            return ElementsAndCovered::ZERO;
        }

        let lines = lines.unwrap_or(0).max(0);
        let conditions = conditions.unwrap_or(0).max(0);
        let uncovered_lines = if lines > 0 {
            context.long_value(self.keys.uncovered_lines).unwrap_or(0)
        } else {
            0
        };
        let uncovered_conditions = if conditions > 0 {
            context.long_value(self.keys.uncovered_conditions).unwrap_or(0)
        } else {
            0
        };

        let elements = lines + conditions;
        ElementsAndCovered::new(elements, elements - uncovered_lines - uncovered_conditions)
    }
}

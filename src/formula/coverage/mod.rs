//! Coverage-style counters built from an elements / covered-elements pair.
//!
//! Every counter of this family shares the same leaf policy: a reportable
//! file flagged as unit-test code contributes nothing, and its raw data is
//! never read. What varies between metrics is only which raw measures make
//! up the pair, which is the job of an [`ElementsExtractor`].
//!
//! # Example
//!
//! ```rust
//! use covtree::component::{Component, FileAttributes};
//! use covtree::formula::coverage::{ElementsAndCoveredElementsCounter, SingleWithUncovered};
//! use covtree::formula::{Counter, LeafAggregateContext};
//! use covtree::measure::{keys, InMemoryMeasureRepository, Measure};
//!
//! let file = Component::file("p:a.rs", "a.rs", FileAttributes::production());
//! let mut measures = InMemoryMeasureRepository::new();
//! measures.add("p:a.rs", keys::LINES_TO_COVER, Measure::Long(10));
//! measures.add("p:a.rs", keys::UNCOVERED_LINES, Measure::Long(3));
//!
//! let extractor = SingleWithUncovered::new(keys::LINES_TO_COVER, keys::UNCOVERED_LINES);
//! let mut counter = ElementsAndCoveredElementsCounter::new(extractor);
//! counter.aggregate_leaf(&LeafAggregateContext::new(&file, &measures));
//!
//! assert_eq!(counter.elements(), 10);
//! assert_eq!(counter.covered_elements(), 7);
//! ```

pub mod extractors;
mod formula;

pub use extractors::{ElementsExtractor, LinesAndConditionsWithUncovered, SingleWithUncovered};
pub use formula::{calculate_coverage, CoverageFormula};

use super::counter::{Counter, LeafAggregateContext};
use crate::component::Component;
use std::ops::AddAssign;

/// A leaf's contribution: some countable elements and the covered subset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ElementsAndCovered {
    pub elements: i64,
    pub covered: i64,
}

impl ElementsAndCovered {
    pub const ZERO: Self = Self {
        elements: 0,
        covered: 0,
    };

    /// Clamps so that `0 <= covered <= elements` and `elements >= 0`.
    pub fn new(elements: i64, covered: i64) -> Self {
        let elements = elements.max(0);
        Self {
            elements,
            covered: covered.clamp(0, elements),
        }
    }
}

impl AddAssign for ElementsAndCovered {
    fn add_assign(&mut self, rhs: Self) {
        self.elements += rhs.elements;
        self.covered += rhs.covered;
    }
}

/// Whether a leaf must be skipped by every coverage counter.
///
/// Only reportable components are checked, so project views are never
/// skipped. Components without file attributes are production code.
pub fn is_excluded_leaf(component: &Component) -> bool {
    component.component_type().is_report_type() && component.is_unit_test()
}

/// Accumulates `elements` and `covered_elements` with the shared exclusion
/// policy and a metric-specific extractor.
#[derive(Debug, Clone)]
pub struct ElementsAndCoveredElementsCounter<E> {
    elements: i64,
    covered_elements: i64,
    extractor: E,
}

impl<E: ElementsExtractor> ElementsAndCoveredElementsCounter<E> {
    pub fn new(extractor: E) -> Self {
        Self {
            elements: 0,
            covered_elements: 0,
            extractor,
        }
    }

    pub fn elements(&self) -> i64 {
        self.elements
    }

    pub fn covered_elements(&self) -> i64 {
        self.covered_elements
    }

    pub fn totals(&self) -> ElementsAndCovered {
        ElementsAndCovered {
            elements: self.elements,
            covered: self.covered_elements,
        }
    }

    pub fn extractor(&self) -> &E {
        &self.extractor
    }

    fn add(&mut self, values: ElementsAndCovered) {
        self.elements += values.elements;
        self.covered_elements += values.covered;
    }
}

impl<E: ElementsExtractor> Counter for ElementsAndCoveredElementsCounter<E> {
    fn aggregate(&mut self, other: &Self) {
        self.elements += other.elements;
        self.covered_elements += other.covered_elements;
    }

    fn aggregate_leaf(&mut self, context: &LeafAggregateContext<'_>) {
        let leaf = context.leaf();
        if is_excluded_leaf(leaf) {
            tracing::trace!(component = leaf.key(), "unit test file excluded from coverage");
            return;
        }
        self.add(self.extractor.extract(context));
    }
}

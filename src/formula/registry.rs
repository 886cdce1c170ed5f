//! Formula wiring.

use super::coverage::{CoverageFormula, LinesAndConditionsWithUncovered, SingleWithUncovered};
use super::executor::ErasedFormula;
use super::sum::SumFormula;
use super::Formula;
use crate::measure::keys::{self, CoverageInputKeys, INTEGRATION_TEST_INPUTS, UNIT_TEST_INPUTS};
use std::fmt;

/// An ordered collection of formulas of any counter type.
#[derive(Default)]
pub struct FormulaSet {
    formulas: Vec<Box<dyn ErasedFormula>>,
}

impl FormulaSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<F: Formula + 'static>(mut self, formula: F) -> Self {
        self.push(formula);
        self
    }

    pub fn push<F: Formula + 'static>(&mut self, formula: F) {
        let taken = self.output_metric_keys();
        for key in formula.output_metric_keys() {
            if taken.contains(key) {
                log::warn!("Metric {} is produced by more than one formula; the last one wins", key);
            }
        }
        self.formulas.push(Box::new(formula));
    }

    pub fn output_metric_keys(&self) -> Vec<&'static str> {
        self.formulas
            .iter()
            .flat_map(|f| f.metric_keys().iter().copied())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.formulas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formulas.is_empty()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &dyn ErasedFormula> {
        self.formulas.iter().map(|f| f.as_ref())
    }
}

impl fmt::Debug for FormulaSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormulaSet")
            .field("output_metric_keys", &self.output_metric_keys())
            .finish()
    }
}

fn push_coverage_family(
    set: &mut FormulaSet,
    inputs: CoverageInputKeys,
    [overall, lines, branches]: [&'static str; 3],
) {
    set.push(CoverageFormula::new(overall, LinesAndConditionsWithUncovered::new(inputs)));
    set.push(CoverageFormula::new(lines, SingleWithUncovered::lines(inputs)));
    set.push(CoverageFormula::new(branches, SingleWithUncovered::conditions(inputs)));
}

/// Overall, line, and branch coverage for unit and integration tests, plus
/// the rolled-up unit-test raw totals reports show next to them.
pub fn coverage_formulas() -> FormulaSet {
    let mut set = FormulaSet::new();
    push_coverage_family(
        &mut set,
        UNIT_TEST_INPUTS,
        [keys::COVERAGE, keys::LINE_COVERAGE, keys::BRANCH_COVERAGE],
    );
    push_coverage_family(
        &mut set,
        INTEGRATION_TEST_INPUTS,
        [keys::IT_COVERAGE, keys::IT_LINE_COVERAGE, keys::IT_BRANCH_COVERAGE],
    );
    for raw in [
        UNIT_TEST_INPUTS.lines_to_cover,
        UNIT_TEST_INPUTS.uncovered_lines,
        UNIT_TEST_INPUTS.conditions_to_cover,
        UNIT_TEST_INPUTS.uncovered_conditions,
    ] {
        set.push(SumFormula::new(raw).excluding_unit_tests());
    }
    set
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coverage_formulas_outputs() {
        let set = coverage_formulas();
        assert_eq!(set.len(), 10);
        let outputs = set.output_metric_keys();
        for key in [
            keys::COVERAGE,
            keys::LINE_COVERAGE,
            keys::BRANCH_COVERAGE,
            keys::IT_COVERAGE,
            keys::IT_LINE_COVERAGE,
            keys::IT_BRANCH_COVERAGE,
            keys::LINES_TO_COVER,
            keys::UNCOVERED_CONDITIONS,
        ] {
            assert!(outputs.contains(&key), "missing {}", key);
        }
        for raw_it_key in [
            keys::IT_LINES_TO_COVER,
            keys::IT_UNCOVERED_LINES,
            keys::IT_CONDITIONS_TO_COVER,
            keys::IT_UNCOVERED_CONDITIONS,
        ] {
            assert!(!outputs.contains(&raw_it_key), "unexpected {}", raw_it_key);
        }
    }

    #[test]
    fn test_empty_set() {
        let set = FormulaSet::new();
        assert!(set.is_empty());
        assert!(set.output_metric_keys().is_empty());
        assert_eq!(format!("{:?}", set), "FormulaSet { output_metric_keys: [] }");
    }
}

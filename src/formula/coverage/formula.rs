use super::{ElementsAndCoveredElementsCounter, ElementsExtractor};
use crate::formula::counter::CreateMeasureContext;
use crate::formula::Formula;
use crate::measure::Measure;

/// Percentage of covered elements, rounded to one decimal.
///
/// Returns `None` when there is nothing to cover.
pub fn calculate_coverage(covered: i64, elements: i64) -> Option<f64> {
    if elements <= 0 {
        return None;
    }
    let percent = 100.0 * covered as f64 / elements as f64;
    Some((percent * 10.0).round() / 10.0)
}

/// Turns an elements/covered counter into a coverage percentage measure.
#[derive(Debug, Clone)]
pub struct CoverageFormula<E> {
    output_metric_key: &'static str,
    extractor: E,
}

impl<E> CoverageFormula<E> {
    pub fn new(output_metric_key: &'static str, extractor: E) -> Self {
        Self {
            output_metric_key,
            extractor,
        }
    }
}

impl<E> Formula for CoverageFormula<E>
where
    E: ElementsExtractor + Clone + Send + Sync,
{
    type Counter = ElementsAndCoveredElementsCounter<E>;

    fn create_new_counter(&self) -> Self::Counter {
        ElementsAndCoveredElementsCounter::new(self.extractor.clone())
    }

    fn create_measure(&self, counter: &Self::Counter, _context: &CreateMeasureContext<'_>) -> Option<Measure> {
        calculate_coverage(counter.covered_elements(), counter.elements()).map(Measure::Double)
    }

    fn output_metric_keys(&self) -> &[&'static str] {
        std::slice::from_ref(&self.output_metric_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{Component, FileAttributes};
    use crate::formula::coverage::SingleWithUncovered;
    use crate::formula::{Counter, LeafAggregateContext};
    use crate::measure::keys::{self, UNIT_TEST_INPUTS};
    use crate::measure::InMemoryMeasureRepository;

    #[test]
    fn test_calculate_coverage() {
        assert_eq!(calculate_coverage(7, 10), Some(70.0));
        assert_eq!(calculate_coverage(1, 3), Some(33.3));
        assert_eq!(calculate_coverage(2, 3), Some(66.7));
        assert_eq!(calculate_coverage(0, 5), Some(0.0));
        assert_eq!(calculate_coverage(0, 0), None);
    }

    #[test]
    fn test_formula_creates_percentage() {
        let formula = CoverageFormula::new(keys::LINE_COVERAGE, SingleWithUncovered::lines(UNIT_TEST_INPUTS));
        let file = Component::file("p:a.rs", "a.rs", FileAttributes::production());
        let mut repo = InMemoryMeasureRepository::new();
        repo.add("p:a.rs", keys::LINES_TO_COVER, Measure::Long(8));
        repo.add("p:a.rs", keys::UNCOVERED_LINES, Measure::Long(2));

        let mut counter = formula.create_new_counter();
        counter.aggregate_leaf(&LeafAggregateContext::new(&file, &repo));
        let measure = formula.create_measure(&counter, &CreateMeasureContext::new(&file, keys::LINE_COVERAGE));

        assert_eq!(measure, Some(Measure::Double(75.0)));
        assert_eq!(formula.output_metric_keys(), &[keys::LINE_COVERAGE]);
    }

    #[test]
    fn test_formula_without_elements_creates_nothing() {
        let formula = CoverageFormula::new(keys::LINE_COVERAGE, SingleWithUncovered::lines(UNIT_TEST_INPUTS));
        let file = Component::file("p:a.rs", "a.rs", FileAttributes::production());
        let counter = formula.create_new_counter();
        assert_eq!(
            formula.create_measure(&counter, &CreateMeasureContext::new(&file, keys::LINE_COVERAGE)),
            None
        );
    }
}

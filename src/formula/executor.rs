//! Bottom-up traversal driver.
//!
//! Counters are owned by the executor, one slot per node per formula,
//! addressed by [`ComponentId`]. A node's slot is filled once all of its
//! children are complete and released as soon as it has been merged into
//! its parent.
//!
//! In [`TraversalMode::Parallel`] sibling subtrees are aggregated on the
//! rayon pool, each with independently owned counters. Their results are
//! folded into the parent one at a time, in child order, so both modes
//! produce identical measures.

use super::counter::{Counter, CreateMeasureContext, LeafAggregateContext};
use super::registry::FormulaSet;
use super::Formula;
use crate::component::{Component, ComponentId, ComponentTree};
use crate::measure::{InMemoryMeasureRepository, Measure, MeasureRepository};
use rayon::prelude::*;
use std::collections::BTreeMap;
use tracing::{debug, debug_span, trace};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TraversalMode {
    #[default]
    Sequential,
    Parallel,
}

/// Measures produced by one execution, keyed by node and metric.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComputedMeasures {
    measures: BTreeMap<(ComponentId, &'static str), Measure>,
}

impl ComputedMeasures {
    pub fn get(&self, id: ComponentId, metric_key: &str) -> Option<&Measure> {
        self.for_component(id)
            .find(|(key, _)| *key == metric_key)
            .map(|(_, measure)| measure)
    }

    pub fn for_component(&self, id: ComponentId) -> impl Iterator<Item = (&'static str, &Measure)> {
        self.measures
            .range((id, "")..)
            .take_while(move |((component, _), _)| *component == id)
            .map(|((_, key), measure)| (*key, measure))
    }

    pub fn iter(&self) -> impl Iterator<Item = (ComponentId, &'static str, &Measure)> {
        self.measures
            .iter()
            .map(|((id, key), measure)| (*id, *key, measure))
    }

    pub fn len(&self) -> usize {
        self.measures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measures.is_empty()
    }

    /// Write every computed measure into `repository` under the component's
    /// key.
    pub fn apply_to(&self, tree: &ComponentTree, repository: &mut InMemoryMeasureRepository) {
        for (id, key, measure) in self.iter() {
            repository.add(tree.get(id).key(), key, *measure);
        }
    }

    fn insert(&mut self, id: ComponentId, metric_key: &'static str, measure: Measure) {
        self.measures.insert((id, metric_key), measure);
    }

    fn extend(&mut self, entries: Vec<ComputedEntry>) {
        for (id, key, measure) in entries {
            self.insert(id, key, measure);
        }
    }
}

type ComputedEntry = (ComponentId, &'static str, Measure);

/// Runs a [`FormulaSet`] over a component tree.
///
/// # Examples
///
/// ```rust
/// use covtree::component::{ComponentTreeBuilder, FileAttributes};
/// use covtree::formula::{coverage_formulas, FormulaExecutor};
/// use covtree::measure::{keys, InMemoryMeasureRepository, Measure};
///
/// let mut builder = ComponentTreeBuilder::new("p");
/// builder.add_file("src/a.rs", FileAttributes::production()).unwrap();
/// let tree = builder.build();
///
/// let mut measures = InMemoryMeasureRepository::new();
/// measures.add("p:src/a.rs", keys::LINES_TO_COVER, Measure::Long(4));
/// measures.add("p:src/a.rs", keys::UNCOVERED_LINES, Measure::Long(1));
///
/// let computed = FormulaExecutor::new(coverage_formulas()).execute(&tree, &measures);
/// assert_eq!(
///     computed.get(tree.root(), keys::LINE_COVERAGE),
///     Some(&Measure::Double(75.0))
/// );
/// ```
#[derive(Debug)]
pub struct FormulaExecutor {
    formulas: FormulaSet,
    mode: TraversalMode,
}

impl FormulaExecutor {
    pub fn new(formulas: FormulaSet) -> Self {
        Self {
            formulas,
            mode: TraversalMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: TraversalMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> TraversalMode {
        self.mode
    }

    pub fn execute(&self, tree: &ComponentTree, measures: &dyn MeasureRepository) -> ComputedMeasures {
        let _span = debug_span!(
            "execute_formulas",
            formulas = self.formulas.len(),
            components = tree.len(),
            mode = ?self.mode
        )
        .entered();

        let mut computed = ComputedMeasures::default();
        match self.mode {
            TraversalMode::Sequential => {
                let mut runs: Vec<_> = self
                    .formulas
                    .iter()
                    .map(|formula| formula.start_run(tree.len()))
                    .collect();
                for id in tree.post_order() {
                    for run in runs.iter_mut() {
                        run.visit(tree, id, measures, &mut computed);
                    }
                }
            }
            TraversalMode::Parallel => {
                for formula in self.formulas.iter() {
                    formula.execute_parallel(tree, measures, &mut computed);
                }
            }
        }

        debug!(measures = computed.len(), "formula execution complete");
        computed
    }
}

/// Aggregate the subtree rooted at `id` with a single formula and return
/// the finished counter.
pub fn aggregate_subtree<F: Formula>(
    formula: &F,
    tree: &ComponentTree,
    measures: &dyn MeasureRepository,
    id: ComponentId,
) -> F::Counter {
    let component = tree.get(id);
    let mut counter = formula.create_new_counter();
    if component.component_type().is_leaf_type() {
        counter.aggregate_leaf(&LeafAggregateContext::new(component, measures));
    } else {
        for child in tree.children(id) {
            counter.aggregate(&aggregate_subtree(formula, tree, measures, *child));
        }
    }
    counter
}

/// Type-erased view of a [`Formula`] so heterogeneous formulas can share a
/// traversal.
pub(crate) trait ErasedFormula: Send + Sync {
    fn metric_keys(&self) -> &[&'static str];

    fn start_run(&self, tree_len: usize) -> Box<dyn FormulaRun + '_>;

    fn execute_parallel(
        &self,
        tree: &ComponentTree,
        measures: &dyn MeasureRepository,
        computed: &mut ComputedMeasures,
    );
}

/// One formula's state during a sequential traversal.
pub(crate) trait FormulaRun {
    fn visit(
        &mut self,
        tree: &ComponentTree,
        id: ComponentId,
        measures: &dyn MeasureRepository,
        computed: &mut ComputedMeasures,
    );
}

impl<F: Formula> ErasedFormula for F {
    fn metric_keys(&self) -> &[&'static str] {
        self.output_metric_keys()
    }

    fn start_run(&self, tree_len: usize) -> Box<dyn FormulaRun + '_> {
        Box::new(SequentialRun {
            formula: self,
            counters: std::iter::repeat_with(|| None).take(tree_len).collect(),
        })
    }

    fn execute_parallel(
        &self,
        tree: &ComponentTree,
        measures: &dyn MeasureRepository,
        computed: &mut ComputedMeasures,
    ) {
        let (_, entries) = fold_parallel(self, tree, measures, tree.root());
        computed.extend(entries);
    }
}

struct SequentialRun<'f, F: Formula> {
    formula: &'f F,
    counters: Vec<Option<F::Counter>>,
}

impl<F: Formula> FormulaRun for SequentialRun<'_, F> {
    fn visit(
        &mut self,
        tree: &ComponentTree,
        id: ComponentId,
        measures: &dyn MeasureRepository,
        computed: &mut ComputedMeasures,
    ) {
        let component = tree.get(id);
        let mut counter = self.formula.create_new_counter();
        if component.component_type().is_leaf_type() {
            trace!(component = component.key(), "visiting leaf");
            counter.aggregate_leaf(&LeafAggregateContext::new(component, measures));
        } else {
            for child in tree.children(id) {
                if let Some(child_counter) = self.counters[child.index()].take() {
                    counter.aggregate(&child_counter);
                }
            }
        }

        for (key, measure) in create_measures(self.formula, &counter, component) {
            computed.insert(id, key, measure);
        }
        self.counters[id.index()] = Some(counter);
    }
}

fn fold_parallel<F: Formula>(
    formula: &F,
    tree: &ComponentTree,
    measures: &dyn MeasureRepository,
    id: ComponentId,
) -> (F::Counter, Vec<ComputedEntry>) {
    let component = tree.get(id);
    let mut counter = formula.create_new_counter();
    let mut entries = Vec::new();

    if component.component_type().is_leaf_type() {
        trace!(component = component.key(), "visiting leaf");
        counter.aggregate_leaf(&LeafAggregateContext::new(component, measures));
    } else {
        let children: Vec<_> = tree
            .children(id)
            .par_iter()
            .map(|child| fold_parallel(formula, tree, measures, *child))
            .collect();
        for (child_counter, child_entries) in children {
            counter.aggregate(&child_counter);
            entries.extend(child_entries);
        }
    }

    entries.extend(
        create_measures(formula, &counter, component).map(|(key, measure)| (id, key, measure)),
    );
    (counter, entries)
}

fn create_measures<'a, F: Formula>(
    formula: &'a F,
    counter: &'a F::Counter,
    component: &'a Component,
) -> impl Iterator<Item = (&'static str, Measure)> + 'a {
    formula.output_metric_keys().iter().filter_map(move |key| {
        formula
            .create_measure(counter, &CreateMeasureContext::new(component, key))
            .map(|measure| (*key, measure))
    })
}

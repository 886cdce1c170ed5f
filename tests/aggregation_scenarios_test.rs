//! End-to-end aggregation over hand-built component trees.

use covtree::component::{Component, ComponentTreeBuilder, ComponentType, FileAttributes};
use covtree::formula::coverage::{CoverageFormula, ElementsAndCovered, SingleWithUncovered};
use covtree::formula::{aggregate_subtree, coverage_formulas, Counter, Formula, FormulaExecutor, TraversalMode};
use covtree::measure::keys::{self, UNIT_TEST_INPUTS};
use covtree::measure::{InMemoryMeasureRepository, Measure};
use pretty_assertions::assert_eq;

fn line_formula() -> CoverageFormula<SingleWithUncovered> {
    CoverageFormula::new(keys::LINE_COVERAGE, SingleWithUncovered::lines(UNIT_TEST_INPUTS))
}

fn add_lines(measures: &mut InMemoryMeasureRepository, key: &str, lines: i64, uncovered: i64) {
    measures.add(key, keys::LINES_TO_COVER, Measure::Long(lines));
    measures.add(key, keys::UNCOVERED_LINES, Measure::Long(uncovered));
}

#[test]
fn test_unit_test_file_is_excluded_from_directory_totals() {
    let mut builder = ComponentTreeBuilder::new("p");
    builder.add_file("dir/a.rs", FileAttributes::production()).unwrap();
    builder.add_file("dir/b_test.rs", FileAttributes::unit_test()).unwrap();
    let tree = builder.build();

    let mut measures = InMemoryMeasureRepository::new();
    add_lines(&mut measures, "p:dir/a.rs", 10, 3);
    add_lines(&mut measures, "p:dir/b_test.rs", 5, 0);

    let formula = line_formula();
    let project = aggregate_subtree(&formula, &tree, &measures, tree.root());
    assert_eq!(project.totals(), ElementsAndCovered::new(10, 7));

    let dir = tree.find_by_key("p:dir").unwrap();
    let dir_counter = aggregate_subtree(&formula, &tree, &measures, dir);
    assert_eq!((dir_counter.elements(), dir_counter.covered_elements()), (10, 7));

    let computed = FormulaExecutor::new(coverage_formulas()).execute(&tree, &measures);
    assert_eq!(
        computed.get(tree.root(), keys::LINE_COVERAGE),
        Some(&Measure::Double(70.0))
    );
    // Raw sums skip unit-test files too.
    assert_eq!(
        computed.get(tree.root(), keys::LINES_TO_COVER),
        Some(&Measure::Long(10))
    );
}

#[test]
fn test_merge_order_does_not_change_totals() {
    let mut builder = ComponentTreeBuilder::new("p");
    let files = [("a.rs", 4, 0), ("b.rs", 6, 3), ("c.rs", 2, 2)];
    for (path, _, _) in files {
        builder.add_file(path, FileAttributes::production()).unwrap();
    }
    let tree = builder.build();

    let mut measures = InMemoryMeasureRepository::new();
    for (path, lines, uncovered) in files {
        add_lines(&mut measures, &format!("p:{}", path), lines, uncovered);
    }

    let formula = line_formula();
    let leaves: Vec<_> = tree
        .children(tree.root())
        .iter()
        .map(|id| aggregate_subtree(&formula, &tree, &measures, *id))
        .collect();

    let permutations = [
        [0, 1, 2],
        [0, 2, 1],
        [1, 0, 2],
        [1, 2, 0],
        [2, 0, 1],
        [2, 1, 0],
    ];
    for order in permutations {
        let mut total = formula.create_new_counter();
        for index in order {
            total.aggregate(&leaves[index]);
        }
        assert_eq!(total.totals(), ElementsAndCovered::new(12, 7), "order {:?}", order);
    }
}

#[test]
fn test_empty_directory_contributes_nothing() {
    let mut builder = ComponentTreeBuilder::new("p");
    let root = builder.root();
    let empty = builder
        .add_child(root, Component::new("p:empty", "empty", ComponentType::Directory))
        .unwrap();
    builder.add_file("src/lib.rs", FileAttributes::production()).unwrap();
    let tree = builder.build();

    let mut measures = InMemoryMeasureRepository::new();
    add_lines(&mut measures, "p:src/lib.rs", 8, 2);

    let formula = line_formula();
    let empty_counter = aggregate_subtree(&formula, &tree, &measures, empty);
    assert_eq!(empty_counter.totals(), ElementsAndCovered::ZERO);

    let project = aggregate_subtree(&formula, &tree, &measures, tree.root());
    assert_eq!(project.totals(), ElementsAndCovered::new(8, 6));

    for mode in [TraversalMode::Sequential, TraversalMode::Parallel] {
        let computed = FormulaExecutor::new(coverage_formulas())
            .with_mode(mode)
            .execute(&tree, &measures);
        assert_eq!(computed.get(empty, keys::COVERAGE), None);
        assert_eq!(computed.get(tree.root(), keys::COVERAGE), Some(&Measure::Double(75.0)));
    }
}

#[test]
fn test_views_tree_aggregates_project_view_leaves() {
    let view = Component::new("v", "v", ComponentType::View);
    let mut builder = ComponentTreeBuilder::with_root("v", view);
    let root = builder.root();
    let sub = builder
        .add_child(root, Component::new("v:sub", "sub", ComponentType::SubView))
        .unwrap();
    builder
        .add_child(sub, Component::new("v:p1", "p1", ComponentType::ProjectView))
        .unwrap();
    builder
        .add_child(sub, Component::new("v:p2", "p2", ComponentType::ProjectView))
        .unwrap();
    let tree = builder.build();

    let mut measures = InMemoryMeasureRepository::new();
    add_lines(&mut measures, "v:p1", 10, 4);
    add_lines(&mut measures, "v:p2", 30, 0);

    let total = aggregate_subtree(&line_formula(), &tree, &measures, tree.root());
    assert_eq!(total.totals(), ElementsAndCovered::new(40, 36));

    let computed = FormulaExecutor::new(coverage_formulas()).execute(&tree, &measures);
    assert_eq!(computed.get(sub, keys::LINE_COVERAGE), Some(&Measure::Double(90.0)));
}

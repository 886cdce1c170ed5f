//! Turn LCOV reports into a component tree plus raw measures.

use super::types::{CoverageReport, FileCoverage};
use crate::component::tree::normalized_segments;
use crate::component::{ComponentTree, ComponentTreeBuilder, FileAttributes, TestFileClassifier};
use crate::errors::{Result, ResultExt};
use crate::measure::keys::{CoverageInputKeys, INTEGRATION_TEST_INPUTS, UNIT_TEST_INPUTS};
use crate::measure::{InMemoryMeasureRepository, Measure};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Reports feeding one project, keyed by project-relative path.
#[derive(Debug, Clone)]
pub struct ProjectCoverage {
    project_key: String,
    unit: BTreeMap<PathBuf, FileCoverage>,
    integration: BTreeMap<PathBuf, FileCoverage>,
}

impl ProjectCoverage {
    /// `root` is the directory paths in the reports are made relative to.
    pub fn new(project_key: impl Into<String>, root: &Path, unit: CoverageReport) -> Self {
        Self {
            project_key: project_key.into(),
            unit: relativize(unit, root),
            integration: BTreeMap::new(),
        }
    }

    pub fn with_integration(mut self, root: &Path, report: CoverageReport) -> Self {
        self.integration = relativize(report, root);
        self
    }

    /// Every file present in any report.
    pub fn files(&self) -> impl Iterator<Item = &Path> {
        let mut paths: Vec<&Path> = self
            .unit
            .keys()
            .chain(self.integration.keys())
            .map(PathBuf::as_path)
            .collect();
        paths.sort();
        paths.dedup();
        paths.into_iter()
    }

    /// Build the component tree and the raw measure repository.
    pub fn build(&self, classifier: &TestFileClassifier) -> Result<(ComponentTree, InMemoryMeasureRepository)> {
        let mut builder = ComponentTreeBuilder::new(self.project_key.clone());
        let mut measures = InMemoryMeasureRepository::new();

        for path in self.files() {
            let attributes = self.file_attributes(path, classifier);
            let id = builder
                .add_file(path, attributes)
                .context(format!("adding {}", path.display()))?;
            let key = builder.get(id).key().to_string();
            if let Some(coverage) = self.unit.get(path) {
                add_raw_measures(&mut measures, &key, coverage, UNIT_TEST_INPUTS);
            }
            if let Some(coverage) = self.integration.get(path) {
                add_raw_measures(&mut measures, &key, coverage, INTEGRATION_TEST_INPUTS);
            }
        }

        let tree = builder.build();
        log::debug!(
            "Built component tree with {} nodes and {} raw measures",
            tree.len(),
            measures.len()
        );
        Ok((tree, measures))
    }

    fn file_attributes(&self, path: &Path, classifier: &TestFileClassifier) -> FileAttributes {
        let mut attributes = FileAttributes::new(classifier.is_unit_test(path));
        if let Some(extension) = path.extension().and_then(|e| e.to_str()) {
            attributes = attributes.with_language(extension.to_ascii_lowercase());
        }
        let last_line = [self.unit.get(path), self.integration.get(path)]
            .into_iter()
            .flatten()
            .filter_map(FileCoverage::last_line)
            .max();
        if let Some(lines) = last_line {
            attributes = attributes.with_lines(lines);
        }
        attributes
    }
}

fn add_raw_measures(
    measures: &mut InMemoryMeasureRepository,
    component_key: &str,
    coverage: &FileCoverage,
    keys: CoverageInputKeys,
) {
    let mut raw = vec![
        (keys.lines_to_cover, coverage.lines_to_cover()),
        (keys.uncovered_lines, coverage.uncovered_lines()),
    ];
    if coverage.conditions_to_cover() > 0 {
        raw.push((keys.conditions_to_cover, coverage.conditions_to_cover()));
        raw.push((keys.uncovered_conditions, coverage.uncovered_conditions()));
    }
    measures.add_all(
        raw.into_iter()
            .map(|(metric_key, value)| (component_key, metric_key, Measure::Long(value))),
    );
}

fn relativize(report: CoverageReport, root: &Path) -> BTreeMap<PathBuf, FileCoverage> {
    let mut files: BTreeMap<PathBuf, FileCoverage> = BTreeMap::new();
    for (path, coverage) in report.files {
        files
            .entry(project_path(&path, root))
            .or_default()
            .merge(coverage);
    }
    files
}

/// The path a file gets in the tree, so that every spelling of the same
/// file lands on one entry. Paths climbing above the root are left as they
/// are for the tree builder to reject.
fn project_path(path: &Path, root: &Path) -> PathBuf {
    let relative = relative_path(path, root);
    match normalized_segments(&relative) {
        Ok(segments) => segments.iter().collect(),
        Err(_) => relative,
    }
}

/// Path relative to `root` when it lies inside it, otherwise unchanged.
pub fn relative_path(path: &Path, root: &Path) -> PathBuf {
    if !path.is_absolute() || !root.is_absolute() {
        return path.to_path_buf();
    }
    match pathdiff::diff_paths(path, root) {
        Some(relative) if !relative.starts_with("..") => relative,
        _ => {
            log::debug!(
                "{} is outside {}, keeping path as reported",
                path.display(),
                root.display()
            );
            path.to_path_buf()
        }
    }
}

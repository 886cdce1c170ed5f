//! Coverage reports rendered from computed measures.

mod color;
mod table;

pub use color::ColorMode;
pub use table::render_table;

use crate::component::{ComponentTree, ComponentType};
use crate::errors::Result;
use crate::formula::ComputedMeasures;
use crate::measure::{keys, Measure};
use serde::Serialize;
use std::io::Write;

/// One component line of a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub key: String,
    pub name: String,
    pub component_type: ComponentType,
    pub depth: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines_to_cover: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uncovered_lines: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions_to_cover: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uncovered_conditions: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_coverage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_coverage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub it_coverage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub it_line_coverage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub it_branch_coverage: Option<f64>,
}

/// Rows of a whole tree, parents before children.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageSummary {
    pub project_key: String,
    pub rows: Vec<ReportRow>,
}

impl CoverageSummary {
    /// Collect rows for aggregate nodes, and for files when `include_files`.
    pub fn from_computed(tree: &ComponentTree, computed: &ComputedMeasures, include_files: bool) -> Self {
        let rows = tree
            .pre_order()
            .into_iter()
            .filter(|id| include_files || !tree.get(*id).component_type().is_leaf_type())
            .map(|id| {
                let component = tree.get(id);
                let long = |key: &str| computed.get(id, key).map(Measure::as_long);
                let double = |key: &str| computed.get(id, key).map(Measure::as_double);
                ReportRow {
                    key: component.key().to_string(),
                    name: component.name().to_string(),
                    component_type: component.component_type(),
                    depth: tree.depth(id),
                    lines_to_cover: long(keys::LINES_TO_COVER),
                    uncovered_lines: long(keys::UNCOVERED_LINES),
                    conditions_to_cover: long(keys::CONDITIONS_TO_COVER),
                    uncovered_conditions: long(keys::UNCOVERED_CONDITIONS),
                    coverage: double(keys::COVERAGE),
                    line_coverage: double(keys::LINE_COVERAGE),
                    branch_coverage: double(keys::BRANCH_COVERAGE),
                    it_coverage: double(keys::IT_COVERAGE),
                    it_line_coverage: double(keys::IT_LINE_COVERAGE),
                    it_branch_coverage: double(keys::IT_BRANCH_COVERAGE),
                }
            })
            .collect();

        Self {
            project_key: tree.get(tree.root()).key().to_string(),
            rows,
        }
    }

    /// Overall coverage of the root component.
    pub fn project_coverage(&self) -> Option<f64> {
        self.rows
            .iter()
            .find(|row| row.depth == 0)
            .and_then(|row| row.coverage)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Write `content` to `writer` followed by a newline.
pub fn write_report(writer: &mut dyn Write, content: &str) -> Result<()> {
    writeln!(writer, "{}", content)?;
    writer.flush()?;
    Ok(())
}

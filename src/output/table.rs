use super::{ColorMode, CoverageSummary, ReportRow};
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Color, Table};

const GOOD_COVERAGE: f64 = 80.0;
const FAIR_COVERAGE: f64 = 50.0;

/// Render a summary as a terminal table followed by the project total.
pub fn render_table(summary: &CoverageSummary, color: ColorMode, min_coverage: Option<f64>) -> String {
    let use_color = color.should_use_color();
    let show_it = summary.rows.iter().any(|row| row.it_coverage.is_some());

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    if use_color {
        table.enforce_styling();
    } else {
        table.force_no_tty();
    }

    let mut header = vec!["Component", "Type", "Lines", "Uncovered", "Line %", "Branch %", "Coverage %"];
    if show_it {
        header.push("IT %");
    }
    table.set_header(header);

    for row in &summary.rows {
        let mut cells = vec![
            Cell::new(format!("{}{}", "  ".repeat(row.depth), display_name(row))),
            Cell::new(row.component_type.as_str()),
            count_cell(row.lines_to_cover),
            count_cell(row.uncovered_lines),
            percent_cell(row.line_coverage, false),
            percent_cell(row.branch_coverage, false),
            percent_cell(row.coverage, use_color),
        ];
        if show_it {
            cells.push(percent_cell(row.it_coverage, use_color));
        }
        table.add_row(cells);
    }

    format!(
        "{}\n{}",
        table,
        project_line(summary.project_coverage(), min_coverage, use_color)
    )
}

fn display_name(row: &ReportRow) -> &str {
    if row.depth == 0 {
        return &row.name;
    }
    row.name.rsplit('/').next().unwrap_or(&row.name)
}

fn count_cell(value: Option<i64>) -> Cell {
    let text = value.map_or_else(|| "-".to_string(), |v| v.to_string());
    Cell::new(text).set_alignment(CellAlignment::Right)
}

fn percent_cell(value: Option<f64>, use_color: bool) -> Cell {
    let Some(value) = value else {
        return Cell::new("-").set_alignment(CellAlignment::Right);
    };
    let cell = Cell::new(format!("{:.1}", value)).set_alignment(CellAlignment::Right);
    if !use_color {
        return cell;
    }
    cell.fg(if value >= GOOD_COVERAGE {
        Color::Green
    } else if value >= FAIR_COVERAGE {
        Color::Yellow
    } else {
        Color::Red
    })
}

fn project_line(coverage: Option<f64>, min_coverage: Option<f64>, use_color: bool) -> String {
    let Some(coverage) = coverage else {
        return "Project coverage: no coverable elements".to_string();
    };
    let text = format!("Project coverage: {:.1}%", coverage);
    match min_coverage {
        Some(min) => {
            let passed = coverage >= min;
            let verdict = format!("(minimum {:.1}%: {})", min, if passed { "ok" } else { "FAILED" });
            if use_color {
                let verdict = if passed { verdict.green() } else { verdict.red().bold() };
                format!("{} {}", text.bold(), verdict)
            } else {
                format!("{} {}", text, verdict)
            }
        }
        None if use_color => text.bold().to_string(),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::ComponentType;

    fn row(key: &str, name: &str, component_type: ComponentType, depth: usize, coverage: Option<f64>) -> ReportRow {
        ReportRow {
            key: key.to_string(),
            name: name.to_string(),
            component_type,
            depth,
            lines_to_cover: Some(20),
            uncovered_lines: Some(5),
            conditions_to_cover: None,
            uncovered_conditions: None,
            coverage,
            line_coverage: coverage,
            branch_coverage: None,
            it_coverage: None,
            it_line_coverage: None,
            it_branch_coverage: None,
        }
    }

    fn summary() -> CoverageSummary {
        CoverageSummary {
            project_key: "p".to_string(),
            rows: vec![
                row("p", "p", ComponentType::Project, 0, Some(75.0)),
                row("p:src/util", "src/util", ComponentType::Directory, 1, Some(75.0)),
            ],
        }
    }

    #[test]
    fn test_plain_table() {
        let rendered = render_table(&summary(), ColorMode::Never, None);
        assert!(rendered.contains("Component"));
        assert!(rendered.contains("util"));
        assert!(!rendered.contains("src/util"));
        assert!(rendered.contains("75.0"));
        assert!(!rendered.contains("IT %"));
        assert!(rendered.ends_with("Project coverage: 75.0%"));
    }

    #[test]
    fn test_min_coverage_verdict() {
        let failed = render_table(&summary(), ColorMode::Never, Some(80.0));
        assert!(failed.ends_with("Project coverage: 75.0% (minimum 80.0%: FAILED)"));
        let passed = render_table(&summary(), ColorMode::Never, Some(70.0));
        assert!(passed.ends_with("(minimum 70.0%: ok)"));
    }

    #[test]
    fn test_no_coverable_elements() {
        let mut summary = summary();
        summary.rows[0].coverage = None;
        let rendered = render_table(&summary, ColorMode::Never, None);
        assert!(rendered.ends_with("Project coverage: no coverable elements"));
    }
}

use crate::cli::{OutputFormat, ReportArgs};
use crate::config::{load_config, load_config_from, CovtreeConfig};
use crate::formula::{coverage_formulas, FormulaExecutor, TraversalMode};
use crate::lcov::{parse_lcov_file, ProjectCoverage};
use crate::output::{render_table, write_report, ColorMode, CoverageSummary};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Result of a report run, used by the binary to pick an exit code.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOutcome {
    pub project_coverage: Option<f64>,
    pub min_coverage: Option<f64>,
}

impl ReportOutcome {
    /// A project with nothing to cover passes any minimum.
    pub fn meets_minimum(&self) -> bool {
        match (self.project_coverage, self.min_coverage) {
            (Some(coverage), Some(min)) => coverage >= min,
            _ => true,
        }
    }
}

/// Explicit `--config` is fatal on error; otherwise discover one.
pub fn resolve_config(args: &ReportArgs) -> Result<CovtreeConfig> {
    match &args.config {
        Some(path) => load_config_from(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => Ok(load_config()),
    }
}

/// Settings after merging flags over configuration.
#[derive(Debug, Clone, PartialEq)]
struct ReportSettings {
    project_key: String,
    root: PathBuf,
    mode: TraversalMode,
    include_files: bool,
    min_coverage: Option<f64>,
}

fn settings(args: &ReportArgs, config: &CovtreeConfig) -> Result<ReportSettings> {
    let root = match &args.root {
        Some(root) => root.clone(),
        None => std::env::current_dir().context("Failed to get current directory")?,
    };
    let root = std::path::absolute(&root)
        .with_context(|| format!("Invalid root directory {}", root.display()))?;

    let min_coverage = args.min_coverage.or(config.report.min_coverage);
    if let Some(min) = min_coverage {
        if !(0.0..=100.0).contains(&min) {
            anyhow::bail!("--min-coverage must be within 0..=100, got {}", min);
        }
    }

    let mode = if args.parallel {
        TraversalMode::Parallel
    } else {
        config.traversal.mode()
    };

    Ok(ReportSettings {
        project_key: args
            .project_key
            .clone()
            .unwrap_or_else(|| config.project_key.clone()),
        root,
        mode,
        include_files: args.files || config.report.show_files,
        min_coverage,
    })
}

/// Parse the reports, roll coverage up the tree and write the result.
pub fn run_report(args: &ReportArgs, config: &CovtreeConfig) -> Result<ReportOutcome> {
    let settings = settings(args, config)?;
    let _span = tracing::info_span!("report", project = %settings.project_key).entered();

    let classifier = config
        .test_classifier()
        .context("Invalid test file patterns")?;

    let unit = parse_lcov_file(&args.lcov)?;
    let mut project = ProjectCoverage::new(settings.project_key.clone(), &settings.root, unit);
    if let Some(it_path) = &args.it_lcov {
        let integration = parse_lcov_file(it_path)?;
        project = project.with_integration(&settings.root, integration);
    }

    let (tree, measures) = project
        .build(&classifier)
        .context("Failed to build component tree")?;
    tracing::info!(
        components = tree.len(),
        mode = ?settings.mode,
        "Aggregating coverage"
    );

    let computed = FormulaExecutor::new(coverage_formulas())
        .with_mode(settings.mode)
        .execute(&tree, &measures);
    let summary = CoverageSummary::from_computed(&tree, &computed, settings.include_files);

    let rendered = match args.format {
        OutputFormat::Json => summary.to_json()?,
        OutputFormat::Terminal => {
            let color = if args.output.is_some() {
                ColorMode::Never
            } else {
                args.color.with_env_overrides()
            };
            render_table(&summary, color, settings.min_coverage)
        }
    };

    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };
    write_report(writer.as_mut(), &rendered)?;

    let outcome = ReportOutcome {
        project_coverage: summary.project_coverage(),
        min_coverage: settings.min_coverage,
    };
    if !outcome.meets_minimum() {
        log::warn!(
            "Project coverage {:?} is below the minimum {:?}",
            outcome.project_coverage,
            outcome.min_coverage
        );
    }
    Ok(outcome)
}

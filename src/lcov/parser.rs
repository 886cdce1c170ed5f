//! LCOV report reader: the I/O shell around the pure handlers.

use super::handlers::{
    handle_branch_data, handle_end_of_record, handle_incomplete_file, handle_line_data,
    handle_source_file, LcovParserState,
};
use super::types::CoverageReport;
use crate::errors::{Error, Result};
use ::lcov::{Reader, Record};
use std::io::BufRead;
use std::path::Path;

/// Parse an LCOV file from disk.
///
/// # Errors
///
/// Returns [`Error::Lcov`] if the file cannot be opened or a record is
/// malformed.
pub fn parse_lcov_file(path: &Path) -> Result<CoverageReport> {
    let reader = Reader::open_file(path)
        .map_err(|e| Error::lcov(path, format!("failed to open report: {}", e)))?;
    let report = read_records(reader, path)?;
    log::info!(
        "Loaded coverage for {} files ({} lines to cover) from {}",
        report.len(),
        report.total_lines(),
        path.display()
    );
    Ok(report)
}

/// Parse LCOV content from any buffered reader. `origin` is only used in
/// error messages.
pub fn parse_lcov_reader<R: BufRead>(input: R, origin: &Path) -> Result<CoverageReport> {
    read_records(Reader::new(input), origin)
}

fn read_records<R: BufRead>(reader: Reader<R>, origin: &Path) -> Result<CoverageReport> {
    let mut state = LcovParserState::new();

    for record in reader {
        let record = record.map_err(|e| Error::lcov(origin, e.to_string()))?;
        match record {
            Record::SourceFile { path } => handle_source_file(&mut state, path),
            Record::LineData { line, count, .. } => handle_line_data(&mut state, line, count),
            Record::BranchData {
                line,
                block,
                branch,
                taken,
            } => handle_branch_data(&mut state, (line, block, branch), taken),
            Record::EndOfRecord => handle_end_of_record(&mut state),
            _ => {} // Summaries (LF/LH/BRF/BRH) are recomputed from the details
        }
    }

    handle_incomplete_file(&mut state);
    log::debug!("Parsed {} LCOV file records", state.file_count);
    Ok(state.report)
}

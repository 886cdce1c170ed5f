//! Pure handler functions for LCOV record types.
//!
//! Each handler transforms parser state deterministically without I/O, so
//! they can be tested in isolation from the reader.

use super::types::{BranchId, CoverageReport, FileCoverage};
use std::path::PathBuf;

/// Mutable state while reading one report.
#[derive(Debug, Default)]
pub(crate) struct LcovParserState {
    pub report: CoverageReport,
    pub current_file: Option<PathBuf>,
    pub current: FileCoverage,
    pub file_count: usize,
}

impl LcovParserState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// `SF:` starts a new file, flushing a previous one left open.
pub(crate) fn handle_source_file(state: &mut LcovParserState, path: PathBuf) {
    flush_current(state);
    state.current_file = Some(path);
}

/// `DA:` line hit count.
pub(crate) fn handle_line_data(state: &mut LcovParserState, line: u32, count: u64) {
    if state.current_file.is_some() {
        state.current.record_line(line, count);
    }
}

/// `BRDA:` branch taken count.
pub(crate) fn handle_branch_data(state: &mut LcovParserState, branch: BranchId, taken: Option<u64>) {
    if state.current_file.is_some() {
        state.current.record_branch(branch, taken);
    }
}

/// `end_of_record`.
pub(crate) fn handle_end_of_record(state: &mut LcovParserState) {
    flush_current(state);
}

/// A report that ends without `end_of_record` still keeps its last file.
pub(crate) fn handle_incomplete_file(state: &mut LcovParserState) {
    flush_current(state);
}

fn flush_current(state: &mut LcovParserState) {
    let coverage = std::mem::take(&mut state.current);
    if let Some(path) = state.current_file.take() {
        state.file_count += 1;
        state.report.insert(path, coverage);
    }
}

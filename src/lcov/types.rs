//! Per-file coverage data read from LCOV reports.
//!
//! Pure data, no I/O. The parser fills these structures; the project
//! builder turns them into raw measures.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Branch identity within a file: line, block, branch number.
pub type BranchId = (u32, u32, u32);

/// Hit counts of one source file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileCoverage {
    pub lines: BTreeMap<u32, u64>,
    pub branches: BTreeMap<BranchId, u64>,
}

impl FileCoverage {
    /// Record a line hit count; a line seen twice keeps its highest count.
    pub fn record_line(&mut self, line: u32, count: u64) {
        let entry = self.lines.entry(line).or_insert(0);
        *entry = (*entry).max(count);
    }

    /// Record a branch; `None` means the branch was never reached.
    pub fn record_branch(&mut self, branch: BranchId, taken: Option<u64>) {
        let entry = self.branches.entry(branch).or_insert(0);
        *entry = (*entry).max(taken.unwrap_or(0));
    }

    pub fn merge(&mut self, other: FileCoverage) {
        for (line, count) in other.lines {
            self.record_line(line, count);
        }
        for (branch, taken) in other.branches {
            self.record_branch(branch, Some(taken));
        }
    }

    pub fn lines_to_cover(&self) -> i64 {
        self.lines.len() as i64
    }

    pub fn uncovered_lines(&self) -> i64 {
        self.lines.values().filter(|c| **c == 0).count() as i64
    }

    pub fn conditions_to_cover(&self) -> i64 {
        self.branches.len() as i64
    }

    pub fn uncovered_conditions(&self) -> i64 {
        self.branches.values().filter(|c| **c == 0).count() as i64
    }

    /// Highest line number with line data.
    pub fn last_line(&self) -> Option<u32> {
        self.lines.keys().next_back().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.branches.is_empty()
    }
}

/// All files of one LCOV report, keyed by the path given in `SF:` records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverageReport {
    pub files: BTreeMap<PathBuf, FileCoverage>,
}

impl CoverageReport {
    pub fn get(&self, path: &Path) -> Option<&FileCoverage> {
        self.files.get(path)
    }

    pub fn insert(&mut self, path: PathBuf, coverage: FileCoverage) {
        self.files.entry(path).or_default().merge(coverage);
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn total_lines(&self) -> i64 {
        self.files.values().map(FileCoverage::lines_to_cover).sum()
    }
}

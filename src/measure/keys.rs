//! Metric keys shared by raw inputs and computed outputs.

pub const LINES_TO_COVER: &str = "lines_to_cover";
pub const UNCOVERED_LINES: &str = "uncovered_lines";
pub const CONDITIONS_TO_COVER: &str = "conditions_to_cover";
pub const UNCOVERED_CONDITIONS: &str = "uncovered_conditions";

pub const IT_LINES_TO_COVER: &str = "it_lines_to_cover";
pub const IT_UNCOVERED_LINES: &str = "it_uncovered_lines";
pub const IT_CONDITIONS_TO_COVER: &str = "it_conditions_to_cover";
pub const IT_UNCOVERED_CONDITIONS: &str = "it_uncovered_conditions";

pub const COVERAGE: &str = "coverage";
pub const LINE_COVERAGE: &str = "line_coverage";
pub const BRANCH_COVERAGE: &str = "branch_coverage";

pub const IT_COVERAGE: &str = "it_coverage";
pub const IT_LINE_COVERAGE: &str = "it_line_coverage";
pub const IT_BRANCH_COVERAGE: &str = "it_branch_coverage";

/// Raw input keys for one kind of test execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoverageInputKeys {
    pub lines_to_cover: &'static str,
    pub uncovered_lines: &'static str,
    pub conditions_to_cover: &'static str,
    pub uncovered_conditions: &'static str,
}

pub const UNIT_TEST_INPUTS: CoverageInputKeys = CoverageInputKeys {
    lines_to_cover: LINES_TO_COVER,
    uncovered_lines: UNCOVERED_LINES,
    conditions_to_cover: CONDITIONS_TO_COVER,
    uncovered_conditions: UNCOVERED_CONDITIONS,
};

pub const INTEGRATION_TEST_INPUTS: CoverageInputKeys = CoverageInputKeys {
    lines_to_cover: IT_LINES_TO_COVER,
    uncovered_lines: IT_UNCOVERED_LINES,
    conditions_to_cover: IT_CONDITIONS_TO_COVER,
    uncovered_conditions: IT_UNCOVERED_CONDITIONS,
};

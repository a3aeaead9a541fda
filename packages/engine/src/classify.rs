use common::ExecutionStatus;
use once_cell::sync::Lazy;
use regex::RegexSet;

/// Fixed, case-insensitive markers that flag a model response as a failed
/// run. Matching free-form text is heuristic labeling, not ground truth:
/// a program legitimately printing "undefined" will be misclassified, and
/// an exotic error format may slip through.
const ERROR_PATTERNS: &[&str] = &[
    "error:",
    "exception",
    "traceback",
    "syntaxerror",
    "nameerror",
    "typeerror",
    "undefined",
    "cannot find",
    "compilation failed",
    "segmentation fault",
];

static ERROR_MATCHER: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new(
        ERROR_PATTERNS
            .iter()
            .map(|pattern| format!("(?i){}", regex::escape(pattern))),
    )
    .expect("error patterns compile")
});

/// Classify a trimmed model response into a verdict.
pub fn classify(output: &str) -> ExecutionStatus {
    if ERROR_MATCHER.is_match(output) {
        ExecutionStatus::RuntimeError
    } else {
        ExecutionStatus::Success
    }
}

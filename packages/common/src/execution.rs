use serde::{Deserialize, Serialize};

use crate::execution_status::ExecutionStatus;
use crate::language::Language;

/// One request to the simulated-execution engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionRequest {
    /// Source code to "run".
    pub code: String,
    pub language: Language,
    /// Stdin the program will consume, one value per line. May be empty.
    pub stdin: String,
}

/// Outcome of a simulated execution, before persistence.
///
/// Maps 1:1 onto the corresponding submission columns. `execution_time_ms`
/// measures the completion call, not any real program runtime, and
/// `memory_kb` is a synthetic figure; no process is ever measured.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub success: bool,
    pub status: ExecutionStatus,
    /// Simulated console output, trimmed.
    pub output: String,
    pub execution_time_ms: i32,
    pub memory_kb: i32,
}

impl ExecutionResult {
    /// A completed simulation with a classification verdict.
    pub fn completed(
        status: ExecutionStatus,
        output: String,
        execution_time_ms: i32,
        memory_kb: i32,
    ) -> Self {
        Self {
            success: status.is_success(),
            status,
            output,
            execution_time_ms,
            memory_kb,
        }
    }

    /// The engine's never-raise fallback: the completion call itself failed
    /// and the detail becomes the user-visible output.
    pub fn failure(output: String) -> Self {
        Self {
            success: false,
            status: ExecutionStatus::Error,
            output,
            execution_time_ms: 0,
            memory_kb: 0,
        }
    }
}

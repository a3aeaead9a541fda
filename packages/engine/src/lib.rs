//! Simulated code execution.
//!
//! Nothing here compiles or runs user programs. A chat-completions model is
//! prompted to behave like an interpreter and its response is classified
//! into an execution verdict. The output is therefore a prediction, not a
//! measurement: callers get a best-effort simulation with model latency as
//! "execution time" and a synthetic memory figure.

pub mod classify;
pub mod client;
pub mod config;
pub mod error;
mod llm;
pub mod prompt;

use async_trait::async_trait;
use common::{ExecutionRequest, ExecutionResult};

pub use client::ChatClient;
pub use config::EngineConfig;
pub use error::EngineError;
pub use llm::LlmEngine;

/// Whether the upstream model integration is configured.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EngineMode {
    /// An API key is present; runs go to the model provider.
    Ai,
    /// No API key; runs fail fast with a configuration hint.
    Demo,
}

impl EngineMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ai => "ai",
            Self::Demo => "demo",
        }
    }
}

/// The seam between the HTTP layer and the simulation backend.
///
/// `execute` never fails outward: upstream errors are folded into an
/// error-shaped [`ExecutionResult`] so a failed provider call is still a
/// normal run from the caller's perspective.
#[async_trait]
pub trait ExecutionEngine: Send + Sync {
    async fn execute(&self, request: &ExecutionRequest) -> ExecutionResult;

    fn mode(&self) -> EngineMode;
}

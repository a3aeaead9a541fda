use std::time::Instant;

use async_trait::async_trait;
use common::{ExecutionRequest, ExecutionResult};
use rand::Rng;
use tracing::{debug, warn};

use crate::classify::classify;
use crate::client::ChatClient;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::prompt::{SYSTEM_PROMPT, build_prompt};
use crate::{EngineMode, ExecutionEngine};

/// Simulated-execution engine backed by a chat-completions model.
///
/// Without an API key the engine stays in demo mode and every run fails
/// fast with a configuration hint instead of reaching the network.
pub struct LlmEngine {
    client: Option<ChatClient>,
}

impl LlmEngine {
    pub fn new(config: &EngineConfig) -> Self {
        let client = config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .map(|key| {
                ChatClient::new(key.to_string(), config.model.clone())
                    .with_api_base(&config.api_base)
                    .with_max_tokens(config.max_tokens)
            });

        Self { client }
    }

    async fn simulate(&self, request: &ExecutionRequest) -> Result<ExecutionResult, EngineError> {
        let client = self.client.as_ref().ok_or(EngineError::NotConfigured)?;

        let prompt = build_prompt(request);
        let started = Instant::now();
        let response = client.complete(SYSTEM_PROMPT, &prompt).await?;
        // Wall-clock of the completion call, i.e. model latency. There is
        // no real program runtime to measure.
        let execution_time_ms = started.elapsed().as_millis().min(i32::MAX as u128) as i32;

        let output = response.trim().to_string();
        let status = classify(&output);
        // Simulated: no process exists, so the figure is a bounded random
        // value in the 1-6 MB range.
        let memory_kb = rand::rng().random_range(1000..6000);

        debug!(
            language = %request.language,
            %status,
            execution_time_ms,
            "simulated execution completed"
        );

        Ok(ExecutionResult::completed(
            status,
            output,
            execution_time_ms,
            memory_kb,
        ))
    }
}

#[async_trait]
impl ExecutionEngine for LlmEngine {
    async fn execute(&self, request: &ExecutionRequest) -> ExecutionResult {
        match self.simulate(request).await {
            Ok(result) => result,
            Err(err) => {
                warn!(error = %err, language = %request.language, "simulated execution failed");
                ExecutionResult::failure(format!("AI execution error: {err}"))
            }
        }
    }

    fn mode(&self) -> EngineMode {
        if self.client.is_some() {
            EngineMode::Ai
        } else {
            EngineMode::Demo
        }
    }
}

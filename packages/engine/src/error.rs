use thiserror::Error;

/// Failures of the completion call itself.
///
/// These never escape the engine: [`crate::LlmEngine`] folds them into an
/// error-shaped execution result whose output embeds the detail.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("request to model provider failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("model provider returned HTTP {status}: {detail}")]
    Api { status: u16, detail: String },

    #[error("no model provider API key is configured (demo mode)")]
    NotConfigured,
}

use serde::Deserialize;

/// Default chat-completions endpoint (Groq's OpenAI-compatible API).
pub const DEFAULT_API_BASE: &str = "https://api.groq.com/openai/v1";

/// Default model used for execution simulation.
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Configuration for the simulated-execution engine.
///
/// Embedded by the server's `AppConfig`; overridable via
/// `COMPILER__ENGINE__*` environment variables.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EngineConfig {
    /// API key for the model provider. Absent or empty means demo mode.
    pub api_key: Option<String>,
    pub api_base: String,
    pub model: String,
    /// Response token budget for one simulated run.
    pub max_tokens: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 2000,
        }
    }
}

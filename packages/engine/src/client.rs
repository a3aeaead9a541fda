use serde::Deserialize;
use serde_json::json;

use crate::config::DEFAULT_API_BASE;
use crate::error::EngineError;

/// How much of an upstream error body is carried into the user-visible
/// error detail.
const ERROR_DETAIL_LIMIT: usize = 300;

/// Minimal OpenAI-compatible chat-completions client.
///
/// Temperature is pinned to 0: the model is being used as a (pretend)
/// deterministic interpreter, so sampling noise is unwanted.
#[derive(Debug, Clone)]
pub struct ChatClient {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
    model: String,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            api_base: DEFAULT_API_BASE.to_string(),
            model,
            max_tokens: 2000,
        }
    }

    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Send one system+user exchange and return the assistant's text.
    ///
    /// An absent `content` on the first choice is treated as empty output;
    /// a program that prints nothing is a legitimate simulation result.
    pub async fn complete(&self, system: &str, user: &str) -> Result<String, EngineError> {
        let url = format!("{}/chat/completions", self.api_base);
        let body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system },
                { "role": "user", "content": user },
            ],
            "temperature": 0,
            "max_tokens": self.max_tokens,
        });

        tracing::debug!(%url, model = %self.model, "dispatching completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(EngineError::Api {
                status: status.as_u16(),
                detail: truncate_detail(&detail),
            });
        }

        let completion: ChatCompletion = response.json().await?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        Ok(content)
    }
}

fn truncate_detail(detail: &str) -> String {
    let detail = detail.trim();
    if detail.len() <= ERROR_DETAIL_LIMIT {
        return detail.to_string();
    }
    let mut end = ERROR_DETAIL_LIMIT;
    while !detail.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &detail[..end])
}

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
// Leading `::` keeps the workspace crate distinct from this test module,
// which shares its name.
use ::common::{ExecutionRequest, ExecutionResult, ExecutionStatus};
use engine::{EngineMode, ExecutionEngine};
use reqwest::Client;
use sea_orm::DatabaseConnection;
use serde_json::Value;

use server::config::{AppConfig, AuthConfig};
use server::database;
use server::state::AppState;
use server::store::SubmissionStore;

pub mod routes {
    pub const HEALTH: &str = "/api/health";

    pub const REGISTER: &str = "/api/auth/register";
    pub const LOGIN: &str = "/api/auth/login";
    pub const ME: &str = "/api/auth/me";

    pub const RUN: &str = "/api/compile/run";
    pub const MODE: &str = "/api/compile/mode";

    pub fn template(language: &str) -> String {
        format!("/api/compile/template/{language}")
    }

    pub fn share(share_id: &str) -> String {
        format!("/api/compile/share/{share_id}")
    }

    pub const MY_SUBMISSIONS: &str = "/api/submissions/my";

    pub fn submission(id: i64) -> String {
        format!("/api/submissions/{id}")
    }
}

/// Execution engine double: returns a scripted result and counts calls, so
/// tests can prove when the adapter was (not) reached.
pub struct ScriptedEngine {
    result: ExecutionResult,
    mode: EngineMode,
    calls: AtomicUsize,
}

impl ScriptedEngine {
    pub fn success(output: &str) -> Arc<Self> {
        Self::with_result(
            ExecutionResult::completed(ExecutionStatus::Success, output.to_string(), 42, 2048),
            EngineMode::Ai,
        )
    }

    /// A run whose output the classifier flagged as a failure.
    pub fn failing(output: &str) -> Arc<Self> {
        Self::with_result(
            ExecutionResult::completed(ExecutionStatus::RuntimeError, output.to_string(), 42, 2048),
            EngineMode::Ai,
        )
    }

    /// The provider call itself failed; the engine returned its fallback.
    pub fn upstream_error(detail: &str) -> Arc<Self> {
        Self::with_result(
            ExecutionResult::failure(format!("AI execution error: {detail}")),
            EngineMode::Ai,
        )
    }

    pub fn demo() -> Arc<Self> {
        Self::with_result(
            ExecutionResult::failure(
                "AI execution error: no model provider API key is configured (demo mode)".into(),
            ),
            EngineMode::Demo,
        )
    }

    fn with_result(result: ExecutionResult, mode: EngineMode) -> Arc<Self> {
        Arc::new(Self {
            result,
            mode,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ExecutionEngine for ScriptedEngine {
    async fn execute(&self, _request: &ExecutionRequest) -> ExecutionResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }

    fn mode(&self) -> EngineMode {
        self.mode
    }
}

/// A running test server.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
    pub engine: Arc<ScriptedEngine>,
    _db_dir: Option<tempfile::TempDir>,
}

/// Parsed HTTP response for test assertions.
pub struct TestResponse {
    pub status: u16,
    /// Raw response body as text.
    pub text: String,
    /// Parsed JSON body, or `Null` if the response is not valid JSON.
    pub body: Value,
}

impl TestApp {
    /// Boot with a file-backed SQLite store and a default always-green
    /// engine.
    pub async fn spawn() -> Self {
        Self::spawn_with_engine(ScriptedEngine::success("Hello, World!")).await
    }

    pub async fn spawn_with_engine(engine: Arc<ScriptedEngine>) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir for sqlite");
        let db_url = format!("sqlite://{}/test.db?mode=rwc", dir.path().display());
        let db = database::init_db(&db_url)
            .await
            .expect("Failed to initialize sqlite test database");

        Self::boot(Some(db), Some(dir), engine).await
    }

    /// Boot with persistence unavailable: the store has no connection at
    /// all, as when the database never came up.
    pub async fn spawn_without_db() -> Self {
        Self::boot(None, None, ScriptedEngine::success("Hello, World!")).await
    }

    async fn boot(
        db: Option<DatabaseConnection>,
        db_dir: Option<tempfile::TempDir>,
        engine: Arc<ScriptedEngine>,
    ) -> Self {
        let config = AppConfig {
            auth: AuthConfig {
                jwt_secret: "test-secret-for-integration-tests".to_string(),
            },
            ..AppConfig::default()
        };

        let state = AppState {
            store: SubmissionStore::new(db),
            engine: engine.clone(),
            config,
        };

        let app = server::build_router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            addr,
            client: Client::new(),
            engine,
            _db_dir: db_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn post_with_token(&self, path: &str, body: &Value, token: &str) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn post_without_token(&self, path: &str, body: &Value) -> TestResponse {
        let res = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("Failed to send POST request");

        TestResponse::from_response(res).await
    }

    pub async fn get_with_token(&self, path: &str, token: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn get_without_token(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send GET request");

        TestResponse::from_response(res).await
    }

    pub async fn delete_with_token(&self, path: &str, token: &str) -> TestResponse {
        let res = self
            .client
            .delete(self.url(path))
            .header("Authorization", format!("Bearer {token}"))
            .send()
            .await
            .expect("Failed to send DELETE request");

        TestResponse::from_response(res).await
    }

    pub async fn delete_without_token(&self, path: &str) -> TestResponse {
        let res = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .expect("Failed to send DELETE request");

        TestResponse::from_response(res).await
    }

    /// Register a user and log in, returning the auth token.
    pub async fn create_authenticated_user(&self, username: &str, password: &str) -> String {
        let body = serde_json::json!({
            "username": username,
            "password": password,
        });

        let reg = self.post_without_token(routes::REGISTER, &body).await;
        assert_eq!(reg.status, 201, "Registration failed: {}", reg.text);

        let res = self.post_without_token(routes::LOGIN, &body).await;
        assert_eq!(res.status, 200, "Login failed: {}", res.text);

        res.body["token"]
            .as_str()
            .expect("Login response should contain a token")
            .to_string()
    }

    /// Run code anonymously and return the parsed response.
    pub async fn run_code(&self, code: &str, language: &str) -> TestResponse {
        let body = serde_json::json!({ "code": code, "language": language });
        self.post_without_token(routes::RUN, &body).await
    }

    /// Run code as an authenticated user and return the parsed response.
    pub async fn run_code_as(&self, code: &str, language: &str, token: &str) -> TestResponse {
        let body = serde_json::json!({ "code": code, "language": language });
        self.post_with_token(routes::RUN, &body, token).await
    }
}

impl TestResponse {
    pub async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let text = res.text().await.unwrap_or_default();
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Self { status, text, body }
    }

    /// Share id from a run response, panicking if it is absent.
    pub fn share_id(&self) -> String {
        self.body["shareId"]
            .as_str()
            .expect("response body should contain 'shareId'")
            .to_string()
    }

    /// Submission id from a run response, panicking if it is absent.
    pub fn submission_id(&self) -> i64 {
        self.body["submissionId"]
            .as_i64()
            .expect("response body should contain 'submissionId'")
    }
}

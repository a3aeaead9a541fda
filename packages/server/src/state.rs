use std::sync::Arc;

use engine::ExecutionEngine;

use crate::config::AppConfig;
use crate::store::SubmissionStore;

#[derive(Clone)]
pub struct AppState {
    pub store: SubmissionStore,
    pub engine: Arc<dyn ExecutionEngine>,
    pub config: AppConfig,
}

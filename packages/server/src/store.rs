use chrono::Utc;
use common::{ExecutionStatus, Language};
use sea_orm::*;
use thiserror::Error;
use tracing::debug;

use crate::entity::submission;
use crate::utils::share_id::generate_share_id;

/// How many submissions a history listing returns at most.
pub const HISTORY_LIMIT: u64 = 50;

/// Fresh share ids tried before a create gives up. Collisions are
/// detected by the unique constraint, never by a racy pre-read.
const SHARE_ID_ATTEMPTS: u32 = 4;

#[derive(Debug, Error)]
pub enum StoreError {
    /// No database connection; the server is running without persistence.
    #[error("submission store is unavailable: {0}")]
    Unavailable(&'static str),

    #[error("could not allocate a unique share id")]
    ShareIdExhausted,

    #[error(transparent)]
    Db(#[from] DbErr),
}

/// Fields of a submission known before persistence. The share id is not
/// among them: the store assigns it.
#[derive(Clone, Debug)]
pub struct NewSubmission {
    pub user_id: Option<i32>,
    pub code: String,
    pub language: Language,
    pub stdin: String,
    pub output: String,
    pub status: ExecutionStatus,
    pub execution_time_ms: Option<i32>,
    pub memory_kb: Option<i32>,
}

/// Submission persistence over an optional connection.
///
/// `None` means storage never came up. Every method then reports
/// [`StoreError::Unavailable`] and callers decide what that means: the run
/// flow degrades its response, read endpoints surface a 503.
#[derive(Clone)]
pub struct SubmissionStore {
    db: Option<DatabaseConnection>,
}

impl SubmissionStore {
    pub fn new(db: Option<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Raw connection for collaborators that run their own queries (auth).
    pub fn connection(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }

    fn db(&self) -> Result<&DatabaseConnection, StoreError> {
        self.db
            .as_ref()
            .ok_or(StoreError::Unavailable("no database connection"))
    }

    /// Persist a completed run.
    ///
    /// A unique-constraint violation on insert means the generated share id
    /// collided; the write is retried with a fresh id.
    pub async fn create(&self, new: NewSubmission) -> Result<submission::Model, StoreError> {
        let db = self.db()?;

        for _ in 0..SHARE_ID_ATTEMPTS {
            let model = submission::ActiveModel {
                share_id: Set(generate_share_id()),
                user_id: Set(new.user_id),
                code: Set(new.code.clone()),
                language: Set(new.language),
                engine_id: Set(new.language.engine_id()),
                stdin: Set(new.stdin.clone()),
                output: Set(new.output.clone()),
                status: Set(new.status),
                execution_time_ms: Set(new.execution_time_ms),
                memory_kb: Set(new.memory_kb),
                created_at: Set(Utc::now()),
                ..Default::default()
            };

            match model.insert(db).await {
                Ok(stored) => return Ok(stored),
                Err(e) => match e.sql_err() {
                    Some(SqlErr::UniqueConstraintViolation(_)) => {
                        debug!("share id collision on insert, retrying with a fresh id");
                        continue;
                    }
                    _ => return Err(e.into()),
                },
            }
        }

        Err(StoreError::ShareIdExhausted)
    }

    /// The owner's history, newest first, capped at [`HISTORY_LIMIT`].
    pub async fn find_by_owner(&self, user_id: i32) -> Result<Vec<submission::Model>, StoreError> {
        let db = self.db()?;

        let submissions = submission::Entity::find()
            .filter(submission::Column::UserId.eq(user_id))
            .order_by_desc(submission::Column::CreatedAt)
            .order_by_desc(submission::Column::Id)
            .limit(HISTORY_LIMIT)
            .all(db)
            .await?;

        Ok(submissions)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<submission::Model>, StoreError> {
        let db = self.db()?;
        Ok(submission::Entity::find_by_id(id).one(db).await?)
    }

    pub async fn find_by_share_id(
        &self,
        share_id: &str,
    ) -> Result<Option<submission::Model>, StoreError> {
        let db = self.db()?;

        Ok(submission::Entity::find()
            .filter(submission::Column::ShareId.eq(share_id))
            .one(db)
            .await?)
    }

    /// Owner-scoped delete.
    ///
    /// Returns `false` both for a missing row and for a row owned by
    /// someone else; callers must not distinguish the two.
    pub async fn delete_by_owner(&self, id: i32, user_id: i32) -> Result<bool, StoreError> {
        let db = self.db()?;

        let result = submission::Entity::delete_many()
            .filter(submission::Column::Id.eq(id))
            .filter(submission::Column::UserId.eq(user_id))
            .exec(db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}

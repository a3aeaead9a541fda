use common::{ExecutionStatus, Language};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "submission")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Public share token, assigned exactly once at creation. This is the
    /// only identifier share links carry; the sequential `id` stays out of
    /// them so records cannot be enumerated.
    #[sea_orm(unique)]
    pub share_id: String,

    /// NULL for anonymous submissions.
    pub user_id: Option<i32>,
    #[sea_orm(belongs_to, from = "user_id", to = "id")]
    pub user: Option<super::user::Entity>,

    pub code: String,
    pub language: Language,
    /// Numeric execution-engine id derived from the language.
    pub engine_id: i32,
    pub stdin: String,
    pub output: String,
    pub status: ExecutionStatus,

    /// Latency of the simulation call in milliseconds, not a real runtime.
    pub execution_time_ms: Option<i32>,
    /// Simulated memory figure in kilobytes.
    pub memory_kb: Option<i32>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}

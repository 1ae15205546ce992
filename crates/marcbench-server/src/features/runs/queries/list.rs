use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::db::runs::{self, RunRecord};
use crate::db::DbResult;

/// Evaluation run history, newest first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListRunsQuery {}

impl Request<DbResult<Vec<RunRecord>>> for ListRunsQuery {}

#[tracing::instrument(skip(pool))]
pub async fn handle(pool: SqlitePool, _query: ListRunsQuery) -> DbResult<Vec<RunRecord>> {
    runs::list_runs(&pool).await
}

//! Run evaluation command
//!
//! Scores every record of a cached dataset with the mock metric and records
//! the run. The dataset is read from a snapshot, so a concurrent reload does
//! not affect a run in progress.

use marcbench_ingest::DatasetCache;
use mediator::Request;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::db::runs::{self, NewRun};
use crate::db::DbError;
use crate::error::AppError;
use crate::evaluation::{average_score, evaluate_records, EvalType, MockMetric};
use crate::models::ModelRegistry;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunEvaluationCommand {
    pub dataset_name: String,
    pub model_name: String,
    /// `vlm` or `slm`
    pub eval_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunEvaluationResponse {
    pub run_id: i64,
    pub count: usize,
    pub average_score: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum RunEvaluationError {
    #[error("unsupported eval_type '{0}', expected 'vlm' or 'slm'")]
    InvalidEvalType(String),
    #[error("Dataset '{0}' is not loaded")]
    DatasetNotFound(String),
    #[error("Model '{0}' is not registered")]
    ModelNotFound(String),
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

impl From<RunEvaluationError> for AppError {
    fn from(err: RunEvaluationError) -> Self {
        match err {
            e @ RunEvaluationError::InvalidEvalType(_) => AppError::Validation(e.to_string()),
            e @ (RunEvaluationError::DatasetNotFound(_) | RunEvaluationError::ModelNotFound(_)) => {
                AppError::NotFound(e.to_string())
            },
            RunEvaluationError::Database(e) => AppError::from(e),
        }
    }
}

impl Request<Result<RunEvaluationResponse, RunEvaluationError>> for RunEvaluationCommand {}

#[tracing::instrument(
    skip(pool, cache, registry, command),
    fields(dataset = %command.dataset_name, model = %command.model_name)
)]
pub async fn handle(
    pool: SqlitePool,
    cache: &DatasetCache,
    registry: &ModelRegistry,
    command: RunEvaluationCommand,
) -> Result<RunEvaluationResponse, RunEvaluationError> {
    let eval_type: EvalType = command
        .eval_type
        .parse()
        .map_err(|_| RunEvaluationError::InvalidEvalType(command.eval_type.clone()))?;

    if registry.get(&command.model_name).is_none() {
        return Err(RunEvaluationError::ModelNotFound(command.model_name));
    }

    let records = cache
        .records(&command.dataset_name)
        .ok_or_else(|| RunEvaluationError::DatasetNotFound(command.dataset_name.clone()))?;

    let results = evaluate_records(&records, eval_type, &MockMetric);
    let average = average_score(&results);

    let run = NewRun {
        dataset_name: &command.dataset_name,
        model_name: &command.model_name,
        eval_type: eval_type.as_str(),
        average_score: average,
    };
    let run_id = runs::save_run(&pool, &run, &results).await?;

    tracing::info!(run_id, count = results.len(), average_score = average, "Evaluation run recorded");

    Ok(RunEvaluationResponse {
        run_id,
        count: results.len(),
        average_score: average,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::db::memory_pool;

    fn command(dataset: &str, model: &str, eval_type: &str) -> RunEvaluationCommand {
        RunEvaluationCommand {
            dataset_name: dataset.to_string(),
            model_name: model.to_string(),
            eval_type: eval_type.to_string(),
        }
    }

    #[tokio::test]
    async fn test_invalid_eval_type() {
        let pool = memory_pool().await.unwrap();
        let err = handle(
            pool,
            &DatasetCache::new(),
            &ModelRegistry::with_defaults(),
            command("docs", "mock-vlm", "ocr"),
        )
        .await
        .unwrap_err();

        assert!(matches!(err, RunEvaluationError::InvalidEvalType(t) if t == "ocr"));
    }

    #[tokio::test]
    async fn test_unknown_model_and_dataset() {
        let pool = memory_pool().await.unwrap();
        let registry = ModelRegistry::with_defaults();
        let cache = DatasetCache::new();

        let err = handle(pool.clone(), &cache, &registry, command("docs", "gpt-x", "vlm"))
            .await
            .unwrap_err();
        assert!(matches!(err, RunEvaluationError::ModelNotFound(_)));

        let err = handle(pool.clone(), &cache, &registry, command("docs", "mock-vlm", "vlm"))
            .await
            .unwrap_err();
        assert!(matches!(err, RunEvaluationError::DatasetNotFound(_)));

        assert!(runs::list_runs(&pool).await.unwrap().is_empty());
    }

    #[test]
    fn test_error_status_mapping() {
        use axum::http::StatusCode;
        use axum::response::IntoResponse;

        let status = |e: RunEvaluationError| AppError::from(e).into_response().status();
        assert_eq!(status(RunEvaluationError::InvalidEvalType("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status(RunEvaluationError::ModelNotFound("x".into())), StatusCode::NOT_FOUND);
        assert_eq!(status(RunEvaluationError::DatasetNotFound("x".into())), StatusCode::NOT_FOUND);
    }
}

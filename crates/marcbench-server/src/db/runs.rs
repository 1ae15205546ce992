//! Evaluation runs and their per-item results.
//!
//! # Key Operations
//!
//! - `save_run()` - Insert a run and all its items in one transaction
//! - `list_runs()` - Run history, newest first
//! - `list_run_items()` - Item results of one run

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use super::DbResult;

// ============================================================================
// Types
// ============================================================================

/// A run about to be recorded
#[derive(Debug, Clone)]
pub struct NewRun<'a> {
    pub dataset_name: &'a str,
    pub model_name: &'a str,
    pub eval_type: &'a str,
    pub average_score: f64,
}

/// Score of one evaluated record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemResult {
    pub item_id: String,
    pub prediction: String,
    pub score: f64,
}

/// A recorded run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct RunRecord {
    pub id: i64,
    pub dataset_name: String,
    pub model_name: String,
    pub eval_type: String,
    pub average_score: f64,
    pub created_at: DateTime<Utc>,
}

/// A recorded item result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct RunItemRecord {
    pub id: i64,
    pub run_id: i64,
    pub item_id: String,
    pub prediction: String,
    pub score: f64,
}

// ============================================================================
// Operations
// ============================================================================

/// Record a run with its item results and return the new run id
#[tracing::instrument(skip(pool, run, items), fields(dataset = %run.dataset_name, items = items.len()))]
pub async fn save_run(pool: &SqlitePool, run: &NewRun<'_>, items: &[ItemResult]) -> DbResult<i64> {
    let mut tx = pool.begin().await?;

    let run_id = sqlx::query(
        r#"
        INSERT INTO runs (dataset_name, model_name, eval_type, average_score, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(run.dataset_name)
    .bind(run.model_name)
    .bind(run.eval_type)
    .bind(run.average_score)
    .bind(Utc::now())
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    for item in items {
        sqlx::query(
            r#"
            INSERT INTO run_items (run_id, item_id, prediction, score)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(run_id)
        .bind(&item.item_id)
        .bind(&item.prediction)
        .bind(item.score)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    tracing::debug!(run_id, "Run saved");
    Ok(run_id)
}

/// All runs, newest first
pub async fn list_runs(pool: &SqlitePool) -> DbResult<Vec<RunRecord>> {
    let runs = sqlx::query_as::<_, RunRecord>(
        r#"
        SELECT id, dataset_name, model_name, eval_type, average_score, created_at
        FROM runs
        ORDER BY id DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(runs)
}

pub async fn list_run_items(pool: &SqlitePool, run_id: i64) -> DbResult<Vec<RunItemRecord>> {
    let items = sqlx::query_as::<_, RunItemRecord>(
        r#"
        SELECT id, run_id, item_id, prediction, score
        FROM run_items
        WHERE run_id = ?1
        ORDER BY id
        "#,
    )
    .bind(run_id)
    .fetch_all(pool)
    .await?;

    Ok(items)
}

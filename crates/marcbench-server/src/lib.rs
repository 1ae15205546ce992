//! marcbench Server Library
//!
//! HTTP service for benchmarking catalogue-record models.
//!
//! # Overview
//!
//! - **Datasets**: load remote hub datasets or local document folders into an
//!   in-process cache (see `marcbench_ingest`)
//! - **Models**: a registry of OpenAI-compatible model endpoints
//! - **Evaluation**: mock predictions scored against reference UNIMARC records
//! - **Runs**: evaluation history persisted in SQLite
//!
//! # Architecture
//!
//! Feature slices under [`features`] pair `mediator` commands and queries with
//! handler functions and axum routes. All routes are mounted under `/api`.
//!
//! # Example
//!
//! ```no_run
//! use marcbench_server::{api, config::Config, db};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let pool = db::create_pool(&config.database).await?;
//!     db::run_migrations(&pool).await?;
//!
//!     let state = api::AppState::new(pool, &config)?;
//!     let app = api::create_router(state, &config.cors);
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod evaluation;
pub mod features;
pub mod middleware;
pub mod models;

pub use error::{AppError, AppResult};

//! marcbench Common Library
//!
//! Shared types, error handling and logging for the marcbench workspace.
//!
//! # Overview
//!
//! - **Error Handling**: the [`BenchError`] taxonomy shared by ingestion and the server
//! - **Types**: dataset descriptors, normalized records and cache summaries
//! - **Logging**: `tracing` subscriber setup driven by [`logging::LogConfig`]
//!
//! # Example
//!
//! ```no_run
//! use marcbench_common::types::{DatasetDescriptor, SourceKind};
//!
//! let descriptor = DatasetDescriptor::local("docs", "/data/docs");
//! assert_eq!(descriptor.source, SourceKind::Local);
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{BenchError, Result};

//! marcbench ingest library
//!
//! Loads catalogue datasets into an in-process cache of normalized records.
//!
//! # Supported Sources
//!
//! - **Remote**: tabular datasets served by the dataset hub rows API
//! - **Local**: a directory of `doc_*` folders holding `page_texts.json` and scans
//!
//! # Example
//!
//! ```no_run
//! use marcbench_common::types::DatasetDescriptor;
//! use marcbench_ingest::{DatasetCache, HubClient, IngestionCoordinator};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let cache = DatasetCache::new();
//!     let hub = HubClient::new("https://datasets-server.huggingface.co")?;
//!     let coordinator = IngestionCoordinator::new(hub, cache.clone());
//!
//!     let resolved = coordinator
//!         .load_dataset(DatasetDescriptor::remote("acme/catalogue-scans").with_limit(10))
//!         .await?;
//!     println!("{} records", cache.records(&resolved.name).map_or(0, |r| r.len()));
//!     Ok(())
//! }
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]

pub mod cache;
pub mod cli;
pub mod coordinator;
pub mod local;
pub mod normalize;
pub mod remote;

pub use cache::DatasetCache;
pub use coordinator::IngestionCoordinator;
pub use local::LocalDirectoryAdapter;
pub use remote::{HubClient, RemoteTabularAdapter, RowFetcher};

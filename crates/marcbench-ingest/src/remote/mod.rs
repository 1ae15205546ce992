//! Remote tabular datasets
//!
//! Rows come from a [`RowFetcher`] (the dataset hub in production, an
//! in-memory table in tests). The adapter applies the row selection policy:
//!
//! - `sample`: seeded shuffle of the full row set, then the first `sample` rows
//! - `limit`: the first `limit` rows in hub order
//! - neither: every row

pub mod hub;

use async_trait::async_trait;
use marcbench_common::types::DatasetDescriptor;
use marcbench_common::Result;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::normalize::{ColumnHints, RawItem, SourceBatch};

pub use hub::HubClient;

/// Seed of the permutation used for `sample`; fixed so samples are reproducible
pub const SAMPLE_SEED: u64 = 42;

/// Source of raw rows for a named remote dataset split
#[async_trait]
pub trait RowFetcher: Send + Sync {
    /// Fetch rows in source order, stopping after `max_rows` when given.
    ///
    /// Unknown datasets and unreachable sources fail with
    /// [`marcbench_common::BenchError::SourceFetch`].
    async fn fetch_remote_rows(
        &self,
        name: &str,
        split: &str,
        max_rows: Option<usize>,
    ) -> Result<Vec<RawItem>>;
}

/// Adapter for datasets served by a [`RowFetcher`]
pub struct RemoteTabularAdapter<F> {
    fetcher: F,
}

impl<F: RowFetcher> RemoteTabularAdapter<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Fetch and select the rows requested by `descriptor`
    pub async fn load(&self, descriptor: &DatasetDescriptor) -> Result<SourceBatch> {
        // A sample is drawn from the whole split; a plain limit only needs a prefix.
        let max_rows = match descriptor.sample {
            Some(_) => None,
            None => descriptor.limit,
        };

        let rows = self
            .fetcher
            .fetch_remote_rows(&descriptor.name, &descriptor.split, max_rows)
            .await?;
        debug!(dataset = %descriptor.name, fetched = rows.len(), "Fetched remote rows");

        let items = select_rows(rows, descriptor.limit, descriptor.sample);
        info!(
            dataset = %descriptor.name,
            split = %descriptor.split,
            selected = items.len(),
            "Selected remote rows"
        );

        Ok(SourceBatch {
            items,
            hints: ColumnHints::from_descriptor(descriptor),
        })
    }
}

/// Apply the row selection policy; `sample` takes precedence over `limit`
pub fn select_rows<T>(mut rows: Vec<T>, limit: Option<usize>, sample: Option<usize>) -> Vec<T> {
    if let Some(count) = sample {
        let mut rng = StdRng::seed_from_u64(SAMPLE_SEED);
        rows.shuffle(&mut rng);
        rows.truncate(count);
    } else if let Some(count) = limit {
        rows.truncate(count);
    }
    rows
}

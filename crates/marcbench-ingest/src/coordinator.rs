//! Ingestion coordinator
//!
//! Single entry point for loading datasets: validates the descriptor,
//! dispatches to the matching source adapter, normalizes the raw items and
//! replaces the cache entry. Nothing is written to the cache unless every
//! earlier step succeeded.

use marcbench_common::types::{DatasetDescriptor, DatasetSummary, NormalizedRecord, SourceKind};
use marcbench_common::{BenchError, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, instrument, Span};

use crate::cache::DatasetCache;
use crate::local::LocalDirectoryAdapter;
use crate::normalize::{normalize_batch, SourceBatch};
use crate::remote::{RemoteTabularAdapter, RowFetcher};

pub struct IngestionCoordinator<F> {
    remote: RemoteTabularAdapter<F>,
    local: LocalDirectoryAdapter,
    cache: DatasetCache,
}

impl<F: RowFetcher> IngestionCoordinator<F> {
    /// Coordinator writing into `cache`, fetching remote rows through `fetcher`
    pub fn new(fetcher: F, cache: DatasetCache) -> Self {
        Self {
            remote: RemoteTabularAdapter::new(fetcher),
            local: LocalDirectoryAdapter::default(),
            cache,
        }
    }

    pub fn with_local_adapter(mut self, local: LocalDirectoryAdapter) -> Self {
        self.local = local;
        self
    }

    pub fn fetcher(&self) -> &F {
        self.remote.fetcher()
    }

    pub fn cache(&self) -> &DatasetCache {
        &self.cache
    }

    /// Load a dataset into the cache and return the resolved descriptor.
    ///
    /// The returned descriptor carries the cache key as `name`. Local loads
    /// come back with the column overrides cleared since they do not apply.
    #[instrument(skip(self, descriptor), fields(source = %descriptor.source, name = %descriptor.name))]
    pub async fn load_dataset(&self, mut descriptor: DatasetDescriptor) -> Result<DatasetDescriptor> {
        validate(&descriptor)?;

        let batch = match descriptor.source {
            SourceKind::Remote => self.remote.load(&descriptor).await?,
            SourceKind::Local => self.load_local(PathBuf::from(local_path(&descriptor)?)).await?,
        };

        let records = normalize_batch(&batch);
        let key = cache_key(&descriptor)?;
        let count = records.len();

        let replaced = self.cache.replace(key.clone(), records);
        info!(dataset = %key, records = count, replaced = ?replaced, "Dataset cached");

        descriptor.name = key;
        if descriptor.source == SourceKind::Local {
            descriptor.clear_column_hints();
        }
        Ok(descriptor)
    }

    /// Walk a local root on the blocking pool; the adapter does synchronous file I/O
    async fn load_local(&self, root: PathBuf) -> Result<SourceBatch> {
        let local = self.local.clone();
        let span = Span::current();

        tokio::task::spawn_blocking(move || span.in_scope(|| local.load(&root)))
            .await
            .map_err(|e| BenchError::Io(std::io::Error::other(e)))?
    }

    /// One summary per cached dataset
    pub fn list_loaded_datasets(&self) -> Vec<DatasetSummary> {
        self.cache.summaries()
    }

    /// Snapshot of a cached dataset's records
    pub fn records(&self, name: &str) -> Option<Arc<[NormalizedRecord]>> {
        self.cache.records(name)
    }
}

/// Reject descriptors no adapter could serve
pub fn validate(descriptor: &DatasetDescriptor) -> Result<()> {
    if descriptor.limit == Some(0) {
        return Err(BenchError::validation("limit must be a positive integer"));
    }
    if descriptor.sample == Some(0) {
        return Err(BenchError::validation("sample must be a positive integer"));
    }

    match descriptor.source {
        SourceKind::Remote => {
            if descriptor.name.trim().is_empty() {
                return Err(BenchError::validation("name is required for remote datasets"));
            }
            if descriptor.split.trim().is_empty() {
                return Err(BenchError::validation("split must not be empty"));
            }
        },
        SourceKind::Local => {
            local_path(descriptor)?;
        },
    }

    Ok(())
}

fn local_path(descriptor: &DatasetDescriptor) -> Result<&str> {
    descriptor
        .path
        .as_deref()
        .filter(|path| !path.trim().is_empty())
        .ok_or_else(|| BenchError::validation("path is required for local datasets"))
}

/// Remote datasets are keyed by name; local ones fall back to the last path segment
fn cache_key(descriptor: &DatasetDescriptor) -> Result<String> {
    if !descriptor.name.trim().is_empty() {
        return Ok(descriptor.name.clone());
    }

    let path = local_path(descriptor)?;
    Path::new(path)
        .file_name()
        .map(|segment| segment.to_string_lossy().into_owned())
        .ok_or_else(|| {
            BenchError::validation(format!(
                "cannot derive a dataset name from path '{}'; pass a name",
                path
            ))
        })
}

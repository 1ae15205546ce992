//! Coordinator validation and cache replacement

#![allow(clippy::unwrap_used, clippy::expect_used)]

use async_trait::async_trait;
use marcbench_common::types::{DatasetDescriptor, SourceKind};
use marcbench_common::{BenchError, Result};
use marcbench_ingest::normalize::RawItem;
use marcbench_ingest::{DatasetCache, IngestionCoordinator, RowFetcher};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Serves `rows` rows per call and counts the calls
struct CountingFetcher {
    rows: usize,
    calls: AtomicUsize,
}

impl CountingFetcher {
    fn new(rows: usize) -> Self {
        Self {
            rows,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl RowFetcher for CountingFetcher {
    async fn fetch_remote_rows(
        &self,
        _name: &str,
        _split: &str,
        max_rows: Option<usize>,
    ) -> Result<Vec<RawItem>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let count = max_rows.map_or(self.rows, |max| max.min(self.rows));
        Ok((0..count)
            .map(|i| json!({"metadata": format!("item {}", i)}).as_object().cloned().unwrap())
            .collect())
    }
}

#[tokio::test]
async fn test_invalid_descriptors_fail_before_fetch() {
    let cache = DatasetCache::new();
    let coordinator = IngestionCoordinator::new(CountingFetcher::new(5), cache.clone());

    let invalid = vec![
        DatasetDescriptor::remote(""),
        DatasetDescriptor::remote("acme/scans").with_limit(0),
        DatasetDescriptor::remote("acme/scans").with_sample(0),
        DatasetDescriptor::local("docs", ""),
        DatasetDescriptor {
            path: None,
            source: SourceKind::Local,
            ..DatasetDescriptor::remote("docs")
        },
    ];

    for descriptor in invalid {
        let err = coordinator.load_dataset(descriptor).await.unwrap_err();
        assert!(matches!(err, BenchError::Validation(_)), "unexpected error: {:?}", err);
    }

    assert!(cache.is_empty());
    assert_eq!(coordinator.fetcher().calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_missing_local_root_is_rejected() {
    let coordinator = IngestionCoordinator::new(CountingFetcher::new(0), DatasetCache::new());

    let err = coordinator
        .load_dataset(DatasetDescriptor::local("docs", "/definitely/not/here"))
        .await
        .unwrap_err();

    assert!(matches!(err, BenchError::Validation(_)));
    assert!(coordinator.list_loaded_datasets().is_empty());
}

#[tokio::test]
async fn test_reload_replaces_entry() {
    let cache = DatasetCache::new();
    let coordinator = IngestionCoordinator::new(CountingFetcher::new(8), cache.clone());

    coordinator
        .load_dataset(DatasetDescriptor::remote("acme/scans").with_limit(5))
        .await
        .unwrap();
    assert_eq!(coordinator.records("acme/scans").unwrap().len(), 5);

    coordinator
        .load_dataset(DatasetDescriptor::remote("acme/scans").with_limit(2))
        .await
        .unwrap();

    assert_eq!(coordinator.records("acme/scans").unwrap().len(), 2);
    assert_eq!(cache.len(), 1);
}

#[tokio::test]
async fn test_positional_ids_restart_per_load() {
    let coordinator = IngestionCoordinator::new(CountingFetcher::new(3), DatasetCache::new());

    coordinator
        .load_dataset(DatasetDescriptor::remote("acme/scans"))
        .await
        .unwrap();

    let ids: Vec<String> = coordinator
        .records("acme/scans")
        .unwrap()
        .iter()
        .map(|r| r.id.clone())
        .collect();
    assert_eq!(ids, vec!["0", "1", "2"]);
}

#[tokio::test]
async fn test_listing_reports_cached_summaries() {
    let coordinator = IngestionCoordinator::new(CountingFetcher::new(1), DatasetCache::new());

    for name in ["zeta/scans", "alpha/scans"] {
        coordinator
            .load_dataset(DatasetDescriptor::remote(name).with_split("test"))
            .await
            .unwrap();
    }

    let listing = coordinator.list_loaded_datasets();
    let names: Vec<&str> = listing.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["alpha/scans", "zeta/scans"]);
    assert!(listing.iter().all(|s| s.split == "train" && s.source == "cached"));
}

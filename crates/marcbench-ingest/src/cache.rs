//! In-process dataset cache
//!
//! Maps a dataset name to its normalized records for the lifetime of the
//! process. Entries are never evicted or persisted. Only the ingestion
//! coordinator writes; everything else reads snapshots.

use marcbench_common::types::{DatasetSummary, NormalizedRecord};
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

type Entries = BTreeMap<String, Arc<[NormalizedRecord]>>;

/// Cloneable handle to the shared dataset cache
#[derive(Debug, Clone, Default)]
pub struct DatasetCache {
    entries: Arc<RwLock<Entries>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the records cached under `name`
    pub fn records(&self, name: &str) -> Option<Arc<[NormalizedRecord]>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// Cached dataset names in ascending order
    pub fn names(&self) -> Vec<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    /// One summary per entry, ordered by name
    pub fn summaries(&self) -> Vec<DatasetSummary> {
        self.names().into_iter().map(DatasetSummary::cached).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Swap in a new entry, returning the record count it replaced.
    ///
    /// Two loads racing on the same name both succeed; the later replace wins.
    pub(crate) fn replace(&self, name: String, records: Vec<NormalizedRecord>) -> Option<usize> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name, records.into())
            .map(|previous| previous.len())
    }
}

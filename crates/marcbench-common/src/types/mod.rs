//! Common types used across marcbench

use serde::{Deserialize, Serialize};

use crate::error::BenchError;

/// Split loaded when a descriptor does not name one.
pub const DEFAULT_SPLIT: &str = "train";

/// Source tag reported for every entry listed from the dataset cache.
pub const CACHED_SOURCE_TAG: &str = "cached";

// ============================================================================
// Dataset Descriptor
// ============================================================================

/// Where a dataset comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Tabular dataset served by the remote dataset hub
    #[default]
    #[serde(alias = "hf", alias = "hub")]
    Remote,
    /// Directory tree of document folders on the local filesystem
    Local,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Remote => "remote",
            SourceKind::Local => "local",
        }
    }
}

impl std::str::FromStr for SourceKind {
    type Err = BenchError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "remote" | "hf" | "hub" => Ok(SourceKind::Remote),
            "local" => Ok(SourceKind::Local),
            other => Err(BenchError::validation(format!(
                "unsupported dataset source '{}', expected 'remote' or 'local'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Identifies a requested or loaded dataset.
///
/// The same shape is used for the load request and for the resolved
/// descriptor handed back once the dataset sits in the cache.
///
/// # Examples
///
/// ```
/// use marcbench_common::types::DatasetDescriptor;
///
/// let request = DatasetDescriptor::remote("acme/catalogue-scans")
///     .with_split("test")
///     .with_limit(10);
/// assert_eq!(request.split, "test");
/// assert_eq!(request.limit, Some(10));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetDescriptor {
    /// Cache key; required for remote datasets
    #[serde(default)]
    pub name: String,

    /// Remote split to fetch (ignored for local datasets)
    #[serde(default = "default_split")]
    pub split: String,

    #[serde(default)]
    pub source: SourceKind,

    /// Keep only the first `limit` rows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,

    /// Keep a reproducible random subset of `sample` rows; wins over `limit`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample: Option<usize>,

    /// Filesystem root of a local dataset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_column: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_column: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_column: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unimarc_column: Option<String>,
}

fn default_split() -> String {
    DEFAULT_SPLIT.to_string()
}

impl DatasetDescriptor {
    /// Descriptor for a dataset hosted on the remote hub
    pub fn remote(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            split: default_split(),
            source: SourceKind::Remote,
            limit: None,
            sample: None,
            path: None,
            id_column: None,
            image_column: None,
            metadata_column: None,
            unimarc_column: None,
        }
    }

    /// Descriptor for a local directory of document folders.
    ///
    /// An empty `name` lets the loader derive it from the last path segment.
    pub fn local(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            source: SourceKind::Local,
            path: Some(path.into()),
            ..Self::remote(name)
        }
    }

    pub fn with_split(mut self, split: impl Into<String>) -> Self {
        self.split = split.into();
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_sample(mut self, sample: usize) -> Self {
        self.sample = Some(sample);
        self
    }

    /// Drop the remote column overrides
    pub fn clear_column_hints(&mut self) {
        self.id_column = None;
        self.image_column = None;
        self.metadata_column = None;
        self.unimarc_column = None;
    }
}

// ============================================================================
// Normalized Records
// ============================================================================

/// Canonical per-item shape consumed by evaluation.
///
/// Every field is always present; missing source data degrades to an empty
/// string or an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    /// Unique within a dataset; the positional index when the source has no identifier
    pub id: String,

    /// File paths or image handles, in source order
    pub images: Vec<String>,

    /// Free text describing the item, fed to the models
    pub metadata_text: String,

    /// Reference record the predictions are scored against
    pub unimarc_record: String,
}

/// One line of the cached dataset listing.
///
/// Deliberately lossy: the original load parameters are not kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub name: String,
    pub split: String,
    pub source: String,
}

impl DatasetSummary {
    pub fn cached(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            split: DEFAULT_SPLIT.to_string(),
            source: CACHED_SOURCE_TAG.to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_source_kind_from_str() {
        assert_eq!("remote".parse::<SourceKind>().unwrap(), SourceKind::Remote);
        assert_eq!("HF".parse::<SourceKind>().unwrap(), SourceKind::Remote);
        assert_eq!("local".parse::<SourceKind>().unwrap(), SourceKind::Local);

        let err = "s3".parse::<SourceKind>().unwrap_err();
        assert!(matches!(err, BenchError::Validation(_)));
    }

    #[test]
    fn test_descriptor_defaults_from_json() {
        let descriptor: DatasetDescriptor =
            serde_json::from_str(r#"{"name": "acme/scans"}"#).unwrap();

        assert_eq!(descriptor.split, "train");
        assert_eq!(descriptor.source, SourceKind::Remote);
        assert!(descriptor.limit.is_none());
        assert!(descriptor.path.is_none());
    }

    #[test]
    fn test_descriptor_accepts_hf_alias() {
        let descriptor: DatasetDescriptor =
            serde_json::from_str(r#"{"name": "acme/scans", "source": "hf"}"#).unwrap();
        assert_eq!(descriptor.source, SourceKind::Remote);
    }

    #[test]
    fn test_local_descriptor_serialization_skips_empty_fields() {
        let descriptor = DatasetDescriptor::local("docs", "/data/docs");
        let json = serde_json::to_value(&descriptor).unwrap();

        assert_eq!(json["source"], "local");
        assert_eq!(json["path"], "/data/docs");
        assert!(json.get("id_column").is_none());
        assert!(json.get("limit").is_none());
    }

    #[test]
    fn test_clear_column_hints() {
        let mut descriptor = DatasetDescriptor::remote("acme/scans");
        descriptor.id_column = Some("record_id".to_string());
        descriptor.image_column = Some("scan".to_string());

        descriptor.clear_column_hints();

        assert!(descriptor.id_column.is_none());
        assert!(descriptor.image_column.is_none());
    }

    #[test]
    fn test_cached_summary() {
        let summary = DatasetSummary::cached("docs");
        assert_eq!(summary.split, "train");
        assert_eq!(summary.source, "cached");
    }
}

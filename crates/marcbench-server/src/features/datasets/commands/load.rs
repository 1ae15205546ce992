//! Load dataset command
//!
//! Parses the HTTP request body into a [`DatasetDescriptor`] and hands it to
//! the ingestion coordinator. The body mirrors the descriptor except that
//! `source` is a free string and `limit`/`sample` are signed, so bad values
//! surface as validation errors instead of body rejections.

use marcbench_common::types::{DatasetDescriptor, SourceKind, DEFAULT_SPLIT};
use marcbench_common::{BenchError, Result};
use marcbench_ingest::{IngestionCoordinator, RowFetcher};
use mediator::Request;
use serde::{Deserialize, Serialize};

/// Command to load a dataset into the cache
///
/// # Examples
///
/// ```rust,ignore
/// use marcbench_server::features::datasets::LoadDatasetCommand;
///
/// let command = LoadDatasetCommand {
///     name: "acme/catalogue-scans".to_string(),
///     source: Some("hf".to_string()),
///     limit: Some(25),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoadDatasetCommand {
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split: Option<String>,

    /// `remote` (or `hf`/`hub`) and `local`; defaults to remote
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample: Option<i64>,

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

impl Request<Result<DatasetDescriptor>> for LoadDatasetCommand {}

fn positive(field: &str, value: Option<i64>) -> Result<Option<usize>> {
    match value {
        None => Ok(None),
        Some(v) if v > 0 => usize::try_from(v)
            .map(Some)
            .map_err(|_| BenchError::validation(format!("{} is out of range", field))),
        Some(_) => Err(BenchError::validation(format!("{} must be a positive integer", field))),
    }
}

impl LoadDatasetCommand {
    pub fn into_descriptor(self) -> Result<DatasetDescriptor> {
        let source = match self.source.as_deref() {
            Some(raw) => raw.parse::<SourceKind>()?,
            None => SourceKind::default(),
        };

        Ok(DatasetDescriptor {
            name: self.name,
            split: self.split.unwrap_or_else(|| DEFAULT_SPLIT.to_string()),
            source,
            limit: positive("limit", self.limit)?,
            sample: positive("sample", self.sample)?,
            path: self.path,
            id_column: self.id_column,
            image_column: self.image_column,
            metadata_column: self.metadata_column,
            unimarc_column: self.unimarc_column,
        })
    }
}

#[tracing::instrument(skip(coordinator, command), fields(name = %command.name))]
pub async fn handle<F: RowFetcher>(
    coordinator: &IngestionCoordinator<F>,
    command: LoadDatasetCommand,
) -> Result<DatasetDescriptor> {
    let descriptor = command.into_descriptor()?;
    coordinator.load_dataset(descriptor).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_remote_train_split() {
        let command: LoadDatasetCommand =
            serde_json::from_str(r#"{"name": "acme/scans"}"#).unwrap();

        let descriptor = command.into_descriptor().unwrap();

        assert_eq!(descriptor.source, SourceKind::Remote);
        assert_eq!(descriptor.split, "train");
    }

    #[test]
    fn test_hf_alias_and_local_source() {
        let remote = LoadDatasetCommand {
            name: "acme/scans".to_string(),
            source: Some("hf".to_string()),
            ..Default::default()
        };
        assert_eq!(remote.into_descriptor().unwrap().source, SourceKind::Remote);

        let local = LoadDatasetCommand {
            source: Some("local".to_string()),
            path: Some("/data/docs".to_string()),
            ..Default::default()
        };
        let descriptor = local.into_descriptor().unwrap();
        assert_eq!(descriptor.source, SourceKind::Local);
        assert_eq!(descriptor.path.as_deref(), Some("/data/docs"));
    }

    #[test]
    fn test_unknown_source_is_validation_error() {
        let command = LoadDatasetCommand {
            name: "x".to_string(),
            source: Some("ftp".to_string()),
            ..Default::default()
        };
        assert!(matches!(command.into_descriptor(), Err(BenchError::Validation(_))));
    }

    #[test]
    fn test_non_positive_limit_and_sample_rejected() {
        for (limit, sample) in [(Some(0), None), (Some(-3), None), (None, Some(0))] {
            let command = LoadDatasetCommand {
                name: "acme/scans".to_string(),
                limit,
                sample,
                ..Default::default()
            };
            assert!(matches!(command.into_descriptor(), Err(BenchError::Validation(_))));
        }
    }
}

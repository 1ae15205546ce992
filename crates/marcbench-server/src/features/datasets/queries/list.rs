use marcbench_common::types::DatasetSummary;
use marcbench_ingest::{IngestionCoordinator, RowFetcher};
use mediator::Request;
use serde::{Deserialize, Serialize};

/// List the datasets currently held in the cache
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListDatasetsQuery {}

impl Request<Vec<DatasetSummary>> for ListDatasetsQuery {}

pub fn handle<F: RowFetcher>(
    coordinator: &IngestionCoordinator<F>,
    _query: ListDatasetsQuery,
) -> Vec<DatasetSummary> {
    coordinator.list_loaded_datasets()
}

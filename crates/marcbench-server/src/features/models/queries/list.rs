use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::models::{ModelEntry, ModelRegistry};

/// List the registered models
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListModelsQuery {}

impl Request<Vec<ModelEntry>> for ListModelsQuery {}

pub fn handle(registry: &ModelRegistry, _query: ListModelsQuery) -> Vec<ModelEntry> {
    registry.list().to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_seeded_models() {
        let models = handle(&ModelRegistry::with_defaults(), ListModelsQuery::default());
        assert_eq!(models.len(), 2);
        assert!(handle(&ModelRegistry::new(), ListModelsQuery::default()).is_empty());
    }
}

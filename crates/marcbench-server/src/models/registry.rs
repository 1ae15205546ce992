//! Registry of the models runs can be evaluated against.
//!
//! Entries describe OpenAI-compatible endpoints. The registry is seeded once
//! at startup and read-only afterwards.

use serde::{Deserialize, Serialize};

use crate::evaluation::EvalType;

/// One registered model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelEntry {
    pub name: String,
    pub model_type: EvalType,
    pub endpoint: String,
    pub description: String,
}

impl ModelEntry {
    pub fn new(
        name: impl Into<String>,
        model_type: EvalType,
        endpoint: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            model_type,
            endpoint: endpoint.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    entries: Vec<ModelEntry>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the two mock models
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_default_models();
        registry
    }

    /// Seed the mock models; a no-op once the registry holds anything
    pub fn register_default_models(&mut self) {
        if !self.entries.is_empty() {
            return;
        }

        self.entries.extend([
            ModelEntry::new(
                "mock-vlm",
                EvalType::Vlm,
                "http://localhost:8001/v1",
                "Mock VLM via OpenAI-compatible endpoint",
            ),
            ModelEntry::new(
                "mock-slm",
                EvalType::Slm,
                "http://localhost:8002/v1",
                "Mock SLM via OpenAI-compatible endpoint",
            ),
        ]);
    }

    pub fn list(&self) -> &[ModelEntry] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&ModelEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeding_is_idempotent() {
        let mut registry = ModelRegistry::with_defaults();
        registry.register_default_models();

        let names: Vec<&str> = registry.list().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["mock-vlm", "mock-slm"]);
    }

    #[test]
    fn test_get_by_name() {
        let registry = ModelRegistry::with_defaults();

        let slm = registry.get("mock-slm");
        assert_eq!(slm.map(|m| m.model_type), Some(EvalType::Slm));
        assert_eq!(slm.map(|m| m.endpoint.as_str()), Some("http://localhost:8002/v1"));
        assert!(registry.get("gpt-unknown").is_none());
    }

    #[test]
    fn test_entry_serializes_lowercase_type() {
        let registry = ModelRegistry::with_defaults();
        let json = serde_json::to_value(&registry.list()[0]).unwrap_or_default();

        assert_eq!(json["model_type"], "vlm");
        assert_eq!(json["name"], "mock-vlm");
    }
}

//! Scoring of a prediction against its reference

/// A per-item score in `[0.0, 1.0]`
pub trait Metric: Send + Sync {
    fn compute(&self, prediction: &str, reference: &str) -> f64;
}

/// Placeholder metric: 0.0 without a reference, 1.0 on exact match, 0.5 otherwise
#[derive(Debug, Clone, Copy, Default)]
pub struct MockMetric;

impl Metric for MockMetric {
    fn compute(&self, prediction: &str, reference: &str) -> f64 {
        if reference.is_empty() {
            return 0.0;
        }
        if prediction == reference {
            return 1.0;
        }
        0.5
    }
}

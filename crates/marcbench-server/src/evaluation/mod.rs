//! Evaluation of cached datasets against registered models
//!
//! Predictions are mocked: no model endpoint is called. Each record gets a
//! deterministic prediction derived from its metadata text, scored against
//! its reference UNIMARC record.

pub mod metric;
pub mod pipeline;

use marcbench_common::BenchError;
use serde::{Deserialize, Serialize};

pub use metric::{Metric, MockMetric};
pub use pipeline::{average_score, evaluate_records, mock_prediction};

/// Kind of model under evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvalType {
    /// Vision-language model reading page scans
    Vlm,
    /// Small language model producing UNIMARC from text
    Slm,
}

impl EvalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EvalType::Vlm => "vlm",
            EvalType::Slm => "slm",
        }
    }
}

impl std::str::FromStr for EvalType {
    type Err = BenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vlm" => Ok(EvalType::Vlm),
            "slm" => Ok(EvalType::Slm),
            other => Err(BenchError::validation(format!(
                "unsupported eval_type '{}', expected 'vlm' or 'slm'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for EvalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

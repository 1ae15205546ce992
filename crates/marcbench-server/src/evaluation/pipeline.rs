//! Prediction and scoring over a dataset snapshot

use marcbench_common::types::NormalizedRecord;

use super::metric::Metric;
use super::EvalType;
use crate::db::runs::ItemResult;

/// Deterministic stand-in for a model call
pub fn mock_prediction(eval_type: EvalType, record: &NormalizedRecord) -> String {
    match eval_type {
        EvalType::Vlm => format!("mock-metadata:{}", record.metadata_text),
        EvalType::Slm => format!("mock-unimarc:{}", record.metadata_text),
    }
}

/// Predict and score every record, in dataset order
pub fn evaluate_records(
    records: &[NormalizedRecord],
    eval_type: EvalType,
    metric: &dyn Metric,
) -> Vec<ItemResult> {
    records
        .iter()
        .map(|record| {
            let prediction = mock_prediction(eval_type, record);
            let score = metric.compute(&prediction, &record.unimarc_record);
            ItemResult {
                item_id: record.id.clone(),
                prediction,
                score,
            }
        })
        .collect()
}

/// Mean item score; 0.0 for an empty run
pub fn average_score(results: &[ItemResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    results.iter().map(|r| r.score).sum::<f64>() / results.len() as f64
}

pub mod run;

pub use run::{RunEvaluationCommand, RunEvaluationError, RunEvaluationResponse};

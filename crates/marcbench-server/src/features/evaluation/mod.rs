pub mod commands;
pub mod routes;

pub use commands::{RunEvaluationCommand, RunEvaluationError, RunEvaluationResponse};
pub use routes::evaluation_routes;

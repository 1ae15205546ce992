pub mod commands;
pub mod queries;
pub mod routes;

pub use commands::LoadDatasetCommand;
pub use queries::ListDatasetsQuery;
pub use routes::datasets_routes;

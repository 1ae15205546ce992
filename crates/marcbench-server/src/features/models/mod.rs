pub mod queries;
pub mod routes;

pub use queries::ListModelsQuery;
pub use routes::models_routes;

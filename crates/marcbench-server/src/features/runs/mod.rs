pub mod queries;
pub mod routes;

pub use queries::ListRunsQuery;
pub use routes::runs_routes;

pub mod list;

pub use list::ListModelsQuery;

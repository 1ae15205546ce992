pub mod list;

pub use list::ListDatasetsQuery;

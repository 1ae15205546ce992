pub mod list;

pub use list::ListRunsQuery;

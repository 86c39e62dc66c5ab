pub mod project_file;
pub mod seed;

pub use crate::error::CatalogError;
pub use project_file::{load_project_file, ProjectFile};

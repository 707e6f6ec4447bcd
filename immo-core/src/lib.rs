pub mod calculations;
pub mod models;

pub use calculations::{ProjectionError, ProjectionSummary, project};
pub use models::*;

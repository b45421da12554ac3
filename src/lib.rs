pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod types;

pub use config::Config;
pub use error::{CatalogError, Result};
pub use pipeline::{IngestReport, Pipeline};
pub use types::CourseRecord;

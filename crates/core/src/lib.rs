#![forbid(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod model;
pub mod resolver;
pub mod stats;
pub mod time;

pub use catalog::{CatalogError, QuestionCatalog, QuestionFilter};
pub use error::Error;
pub use stats::{Mastery, ProgressStats};
pub use time::Clock;

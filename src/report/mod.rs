//! Report module - run summary table and JSON export

pub mod export;
pub mod summary;

pub use export::{HoldoutEntry, ModelEntry, ReportMetadata, RunReport};
pub use summary::RunSummary;

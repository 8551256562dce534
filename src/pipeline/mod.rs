//! Pipeline module - the five analysis stages in execution order

pub mod analyze;
pub mod clean;
pub mod error;
pub mod loader;
pub mod model;
pub mod tune;

pub use analyze::*;
pub use clean::*;
pub use error::PipelineError;
pub use loader::*;
pub use model::*;
pub use tune::*;

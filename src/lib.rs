pub mod analyzers;
pub mod checks;
pub mod cli;
pub mod engine;
pub mod error;
pub mod models;
pub mod readers;
pub mod utils;

pub use engine::{CheckKind, QcConfig, QcEngine, QcRunResult};
pub use error::{QcError, Result};
pub use models::FlagCode;

pub mod flag_analyzer;

pub use flag_analyzer::{FlagAnalyzer, FlagSummary, QcReport};

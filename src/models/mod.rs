pub mod config;
pub mod flag;
pub mod series;

pub use config::{BoundingBox, FlatLineParams, SpikeThresholds, ValueRange};
pub use flag::FlagCode;
pub use series::{ObservationRecord, ObservationSeries};

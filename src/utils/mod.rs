pub mod constants;
pub mod geo;
pub mod progress;

pub use constants::*;
pub use geo::{haversine_distance_m, kilometers_to_meters, meters_to_kilometers};
pub use progress::ProgressReporter;

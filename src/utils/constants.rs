/// QARTOD primary flag values
pub const FLAG_GOOD: u8 = 1;
pub const FLAG_UNKNOWN: u8 = 2;
pub const FLAG_SUSPECT: u8 = 3;
pub const FLAG_BAD: u8 = 4;
pub const FLAG_MISSING: u8 = 9;

/// Nominal spherical Earth radius in meters
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Global coordinate bounds (default location bounding box)
pub const GLOBAL_MIN_LON: f64 = -180.0;
pub const GLOBAL_MAX_LON: f64 = 180.0;
pub const GLOBAL_MIN_LAT: f64 = -90.0;
pub const GLOBAL_MAX_LAT: f64 = 90.0;

/// Default check parameters for significant wave height (meters)
pub const DEFAULT_SENSOR_MIN: f64 = 0.0;
pub const DEFAULT_SENSOR_MAX: f64 = 0.8;
pub const DEFAULT_SPIKE_SUSPECT: f64 = 0.15;
pub const DEFAULT_SPIKE_BAD: f64 = 0.5;
pub const DEFAULT_FLAT_RUN_SUSPECT: usize = 3;
pub const DEFAULT_FLAT_RUN_BAD: usize = 5;
pub const DEFAULT_FLAT_TOLERANCE: f64 = 0.001;

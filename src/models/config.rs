use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{QcError, Result};
use crate::utils::constants::{
    GLOBAL_MAX_LAT, GLOBAL_MAX_LON, GLOBAL_MIN_LAT, GLOBAL_MIN_LON,
};

/// Axis-aligned geographic bounding box in decimal degrees
///
/// Containment is boundary-inclusive. The default box spans the whole
/// globe, so the location check only rejects points when a narrower box
/// is configured.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
pub struct BoundingBox {
    #[validate(range(min = -180.0, max = 180.0))]
    pub min_lon: f64,

    #[validate(range(min = -90.0, max = 90.0))]
    pub min_lat: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub max_lon: f64,

    #[validate(range(min = -90.0, max = 90.0))]
    pub max_lat: f64,
}

impl BoundingBox {
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Result<Self> {
        let bbox = Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        };
        bbox.check()?;
        Ok(bbox)
    }

    /// The whole globe
    pub fn global() -> Self {
        Self {
            min_lon: GLOBAL_MIN_LON,
            min_lat: GLOBAL_MIN_LAT,
            max_lon: GLOBAL_MAX_LON,
            max_lat: GLOBAL_MAX_LAT,
        }
    }

    pub fn check(&self) -> Result<()> {
        self.validate()?;

        if self.min_lon > self.max_lon || self.min_lat > self.max_lat {
            return Err(QcError::Config(format!(
                "Bounding box corners are not ordered: [{}, {}] x [{}, {}]",
                self.min_lon, self.max_lon, self.min_lat, self.max_lat
            )));
        }

        Ok(())
    }

    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        lon >= self.min_lon && lon <= self.max_lon && lat >= self.min_lat && lat <= self.max_lat
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::global()
    }
}

/// Inclusive (min, max) value range in the sensor's physical units
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub fn new(min: f64, max: f64) -> Result<Self> {
        let range = Self { min, max };
        range.check()?;
        Ok(range)
    }

    pub fn check(&self) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(QcError::Config(format!(
                "Value range bounds must be finite, got [{}, {}]",
                self.min, self.max
            )));
        }

        if self.min > self.max {
            return Err(QcError::Config(format!(
                "Value range minimum {} exceeds maximum {}",
                self.min, self.max
            )));
        }

        Ok(())
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// True when `other` lies entirely within this range
    pub fn encloses(&self, other: &ValueRange) -> bool {
        self.min <= other.min && self.max >= other.max
    }
}

/// Spike test thresholds on the three-point midpoint deviation
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpikeThresholds {
    pub suspect: f64,
    pub bad: f64,
}

impl SpikeThresholds {
    pub fn new(suspect: f64, bad: f64) -> Result<Self> {
        let thresholds = Self { suspect, bad };
        thresholds.check()?;
        Ok(thresholds)
    }

    pub fn check(&self) -> Result<()> {
        if !(self.suspect > 0.0) || !(self.bad > 0.0) {
            return Err(QcError::Config(format!(
                "Spike thresholds must be positive, got suspect={}, bad={}",
                self.suspect, self.bad
            )));
        }

        if self.suspect > self.bad {
            return Err(QcError::Config(format!(
                "Spike suspect threshold {} exceeds bad threshold {}",
                self.suspect, self.bad
            )));
        }

        Ok(())
    }
}

/// Flat line test parameters
///
/// Run lengths are sample counts; tolerance is an absolute value
/// difference below which two consecutive samples count as repeats.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FlatLineParams {
    pub min_run_suspect: usize,
    pub min_run_bad: usize,
    pub tolerance: f64,
}

impl FlatLineParams {
    pub fn new(min_run_suspect: usize, min_run_bad: usize, tolerance: f64) -> Result<Self> {
        let params = Self {
            min_run_suspect,
            min_run_bad,
            tolerance,
        };
        params.check()?;
        Ok(params)
    }

    pub fn check(&self) -> Result<()> {
        if self.min_run_suspect < 1 || self.min_run_bad < 1 {
            return Err(QcError::Config(format!(
                "Flat line run lengths must be at least 1, got suspect={}, bad={}",
                self.min_run_suspect, self.min_run_bad
            )));
        }

        if self.min_run_suspect > self.min_run_bad {
            return Err(QcError::Config(format!(
                "Flat line suspect run length {} exceeds bad run length {}",
                self.min_run_suspect, self.min_run_bad
            )));
        }

        if !(self.tolerance >= 0.0) || !self.tolerance.is_finite() {
            return Err(QcError::Config(format!(
                "Flat line tolerance must be non-negative, got {}",
                self.tolerance
            )));
        }

        Ok(())
    }
}

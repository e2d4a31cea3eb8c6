use tracing::debug;

use crate::error::{QcError, Result};
use crate::models::{BoundingBox, FlagCode};
use crate::utils::geo::haversine_distance_m;

/// QARTOD location test
///
/// Validates each reported coordinate pair against a bounding box
/// (boundary-inclusive, defaulting to the whole globe) and, optionally,
/// against a maximum great-circle displacement from the platform's
/// anchor position. The anchor is the first reported point that falls
/// inside the box; for a moored buoy that is its deployment position.
pub struct LocationCheck {
    bbox: BoundingBox,
    range_max_m: Option<f64>,
}

impl LocationCheck {
    pub fn new(bbox: BoundingBox) -> Result<Self> {
        bbox.check()?;

        Ok(Self {
            bbox,
            range_max_m: None,
        })
    }

    /// Flag points further than `range_max_m` meters from the anchor as
    /// suspect
    pub fn with_range_max_m(mut self, range_max_m: f64) -> Result<Self> {
        if !(range_max_m > 0.0) || !range_max_m.is_finite() {
            return Err(QcError::Config(format!(
                "Maximum displacement must be positive, got {} m",
                range_max_m
            )));
        }

        self.range_max_m = Some(range_max_m);
        Ok(self)
    }

    pub fn check(&self, lons: &[Option<f64>], lats: &[Option<f64>]) -> Result<Vec<FlagCode>> {
        if lons.len() != lats.len() {
            return Err(QcError::LengthMismatch {
                expected: lons.len(),
                actual: lats.len(),
            });
        }

        let mut flags = Vec::with_capacity(lons.len());
        let mut anchor: Option<(f64, f64)> = None;

        for (lon, lat) in lons.iter().zip(lats) {
            flags.push(self.flag_point(*lon, *lat, &mut anchor));
        }

        debug!(
            total = flags.len(),
            missing = flags.iter().filter(|f| **f == FlagCode::Missing).count(),
            bad = flags.iter().filter(|f| **f == FlagCode::Bad).count(),
            "location check complete"
        );

        Ok(flags)
    }

    fn flag_point(
        &self,
        lon: Option<f64>,
        lat: Option<f64>,
        anchor: &mut Option<(f64, f64)>,
    ) -> FlagCode {
        let (lon, lat) = match (lon, lat) {
            (Some(lon), Some(lat)) => (lon, lat),
            _ => return FlagCode::Missing,
        };

        if !self.bbox.contains(lon, lat) {
            return FlagCode::Bad;
        }

        if let Some(range_max_m) = self.range_max_m {
            match anchor {
                Some((anchor_lon, anchor_lat)) => {
                    let displacement = haversine_distance_m(*anchor_lon, *anchor_lat, lon, lat);
                    if displacement > range_max_m {
                        return FlagCode::Suspect;
                    }
                }
                None => {
                    *anchor = Some((lon, lat));
                }
            }
        }

        FlagCode::Good
    }
}

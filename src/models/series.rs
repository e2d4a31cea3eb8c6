use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{QcError, Result};

/// A single observation row as it arrives from an ingestion source
///
/// Coordinates are optional: fixed platforms often report them only with
/// position fixes, and value-only extracts omit them entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationRecord {
    pub timestamp: DateTime<Utc>,
    pub value: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub lat: Option<f64>,
}

/// A time-ordered observation series in column form
///
/// Missing values are explicit `None`s rather than NaN sentinels; the
/// constructors normalize any non-finite float to `None` so NaN never
/// propagates into check arithmetic. All columns have identical length
/// and the timestamp column is monotonically non-decreasing.
#[derive(Debug, Clone)]
pub struct ObservationSeries {
    timestamps: Vec<DateTime<Utc>>,
    values: Vec<Option<f64>>,
    longitudes: Vec<Option<f64>>,
    latitudes: Vec<Option<f64>>,
}

impl ObservationSeries {
    pub fn new(
        timestamps: Vec<DateTime<Utc>>,
        values: Vec<Option<f64>>,
        longitudes: Vec<Option<f64>>,
        latitudes: Vec<Option<f64>>,
    ) -> Result<Self> {
        if timestamps.is_empty() {
            return Err(QcError::EmptySeries);
        }

        for column_len in [values.len(), longitudes.len(), latitudes.len()] {
            if column_len != timestamps.len() {
                return Err(QcError::LengthMismatch {
                    expected: timestamps.len(),
                    actual: column_len,
                });
            }
        }

        if timestamps.windows(2).any(|pair| pair[0] > pair[1]) {
            return Err(QcError::InvalidFormat(
                "Timestamps are not monotonically non-decreasing".to_string(),
            ));
        }

        Ok(Self {
            timestamps,
            values: values.into_iter().map(normalize).collect(),
            longitudes: longitudes.into_iter().map(normalize).collect(),
            latitudes: latitudes.into_iter().map(normalize).collect(),
        })
    }

    pub fn from_records(records: Vec<ObservationRecord>) -> Result<Self> {
        let mut timestamps = Vec::with_capacity(records.len());
        let mut values = Vec::with_capacity(records.len());
        let mut longitudes = Vec::with_capacity(records.len());
        let mut latitudes = Vec::with_capacity(records.len());

        for record in records {
            timestamps.push(record.timestamp);
            values.push(record.value);
            longitudes.push(record.lon);
            latitudes.push(record.lat);
        }

        Self::new(timestamps, values, longitudes, latitudes)
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    pub fn longitudes(&self) -> &[Option<f64>] {
        &self.longitudes
    }

    pub fn latitudes(&self) -> &[Option<f64>] {
        &self.latitudes
    }

    /// True when at least one observation carries a coordinate pair
    pub fn has_coordinates(&self) -> bool {
        self.longitudes
            .iter()
            .zip(&self.latitudes)
            .any(|(lon, lat)| lon.is_some() && lat.is_some())
    }

    pub fn missing_value_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_none()).count()
    }

    pub fn time_span(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        // Constructor guarantees a non-empty, ordered timestamp column
        (self.timestamps[0], self.timestamps[self.timestamps.len() - 1])
    }
}

fn normalize(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(offset_secs: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2014, 9, 29, 12, 0, 0).unwrap() + chrono::Duration::seconds(offset_secs)
    }

    #[test]
    fn test_series_construction() {
        let series = ObservationSeries::new(
            vec![ts(0), ts(360), ts(720)],
            vec![Some(0.2), None, Some(0.3)],
            vec![Some(-76.2), Some(-76.2), None],
            vec![Some(39.2), Some(39.2), None],
        )
        .unwrap();

        assert_eq!(series.len(), 3);
        assert!(series.has_coordinates());
        assert_eq!(series.missing_value_count(), 1);
        assert_eq!(series.time_span(), (ts(0), ts(720)));
    }

    #[test]
    fn test_empty_series_rejected() {
        let result = ObservationSeries::new(vec![], vec![], vec![], vec![]);
        assert!(matches!(result, Err(QcError::EmptySeries)));
    }

    #[test]
    fn test_column_length_mismatch_rejected() {
        let result = ObservationSeries::new(
            vec![ts(0), ts(360)],
            vec![Some(0.2)],
            vec![None, None],
            vec![None, None],
        );
        assert!(matches!(result, Err(QcError::LengthMismatch { .. })));
    }

    #[test]
    fn test_unordered_timestamps_rejected() {
        let result = ObservationSeries::new(
            vec![ts(360), ts(0)],
            vec![Some(0.2), Some(0.3)],
            vec![None, None],
            vec![None, None],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_nan_normalized_to_missing() {
        let series = ObservationSeries::new(
            vec![ts(0), ts(360)],
            vec![Some(f64::NAN), Some(f64::INFINITY)],
            vec![None, None],
            vec![None, None],
        )
        .unwrap();

        assert_eq!(series.missing_value_count(), 2);
        assert!(!series.has_coordinates());
    }
}

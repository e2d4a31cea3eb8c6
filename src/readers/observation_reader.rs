use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

use crate::error::Result;
use crate::models::{ObservationRecord, ObservationSeries};

/// Reads observation series from CSV extracts
///
/// Expected columns: `timestamp` (RFC 3339), `value`, and optionally
/// `lon`/`lat`. Empty value fields become missing observations.
pub struct ObservationReader {
    trim_fields: bool,
}

impl ObservationReader {
    pub fn new() -> Self {
        Self { trim_fields: true }
    }

    pub fn read_records(&self, path: &Path) -> Result<Vec<ObservationRecord>> {
        let file = File::open(path)?;
        let mut reader = csv::ReaderBuilder::new()
            .trim(if self.trim_fields {
                csv::Trim::All
            } else {
                csv::Trim::None
            })
            .from_reader(BufReader::new(file));

        let mut records = Vec::new();
        for result in reader.deserialize() {
            let record: ObservationRecord = result?;
            records.push(record);
        }

        debug!(
            records = records.len(),
            path = %path.display(),
            "read observation records"
        );

        Ok(records)
    }

    pub fn read_series(&self, path: &Path) -> Result<ObservationSeries> {
        let records = self.read_records(path)?;
        ObservationSeries::from_records(records)
    }
}

impl Default for ObservationReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_read_series_with_coordinates() {
        let file = write_csv(
            "timestamp,value,lon,lat\n\
             2014-09-29T12:00:00Z,0.25,-76.2,39.2\n\
             2014-09-29T12:06:00Z,,-76.2,39.2\n\
             2014-09-29T12:12:00Z,0.31,-76.2,39.2\n",
        );

        let series = ObservationReader::new().read_series(file.path()).unwrap();
        assert_eq!(series.len(), 3);
        assert!(series.has_coordinates());
        assert_eq!(series.missing_value_count(), 1);
        assert_eq!(series.values()[0], Some(0.25));
    }

    #[test]
    fn test_read_series_without_coordinate_columns() {
        let file = write_csv(
            "timestamp,value\n\
             2014-09-29T12:00:00Z,0.25\n\
             2014-09-29T12:06:00Z,0.26\n",
        );

        let series = ObservationReader::new().read_series(file.path()).unwrap();
        assert_eq!(series.len(), 2);
        assert!(!series.has_coordinates());
    }

    #[test]
    fn test_nan_value_becomes_missing() {
        let file = write_csv(
            "timestamp,value\n\
             2014-09-29T12:00:00Z,NaN\n\
             2014-09-29T12:06:00Z,0.26\n",
        );

        let series = ObservationReader::new().read_series(file.path()).unwrap();
        assert_eq!(series.missing_value_count(), 1);
    }

    #[test]
    fn test_empty_file_rejected() {
        let file = write_csv("timestamp,value\n");
        assert!(ObservationReader::new().read_series(file.path()).is_err());
    }

    #[test]
    fn test_malformed_timestamp_rejected() {
        let file = write_csv(
            "timestamp,value\n\
             not-a-timestamp,0.25\n",
        );
        assert!(ObservationReader::new().read_series(file.path()).is_err());
    }
}

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::NamedTempFile;

use qartod_qc::analyzers::FlagAnalyzer;
use qartod_qc::engine::{GrossRangeParams, LocationParams, QcConfig, QcEngine};
use qartod_qc::models::{
    BoundingBox, FlagCode, FlatLineParams, ObservationSeries, SpikeThresholds, ValueRange,
};
use qartod_qc::readers::ObservationReader;
use qartod_qc::CheckKind;

fn cbibs_wave_config() -> QcConfig {
    // Parameters matching a CBIBS wave height deployment
    QcConfig {
        location: Some(LocationParams {
            bbox: BoundingBox::new(-76.5, 39.0, -76.0, 39.5).unwrap(),
            range_max_m: Some(1000.0),
        }),
        gross_range: Some(GrossRangeParams {
            sensor_range: ValueRange::new(0.0, 0.8).unwrap(),
            user_range: None,
        }),
        spike: Some(SpikeThresholds::new(0.15, 0.5).unwrap()),
        flat_line: Some(FlatLineParams::new(3, 5, 0.001).unwrap()),
    }
}

#[test]
fn test_csv_to_flags_pipeline() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        "timestamp,value,lon,lat\n\
         2014-09-29T12:00:00Z,0.1,-76.2,39.2\n\
         2014-09-29T12:06:00Z,0.1,-76.2,39.2\n\
         2014-09-29T12:12:00Z,0.9,-76.2,39.2\n\
         2014-09-29T12:18:00Z,0.1,-76.2,39.2\n\
         2014-09-29T12:24:00Z,0.1,-77.0,39.2\n"
    )
    .unwrap();
    file.flush().unwrap();

    let series = ObservationReader::new().read_series(file.path()).unwrap();
    let results = QcEngine::new(cbibs_wave_config()).run(&series).unwrap();

    // Every check returns one flag per observation
    assert_eq!(results.len(), 4);
    for flags in results.values() {
        assert_eq!(flags.len(), series.len());
    }

    // Gross range: 0.9 exceeds the 0.8 sensor maximum
    assert_eq!(
        results[&CheckKind::GrossRange],
        vec![
            FlagCode::Good,
            FlagCode::Good,
            FlagCode::Bad,
            FlagCode::Good,
            FlagCode::Good
        ]
    );

    // Spike: deviation 0.8 at the middle point, 0.4 at its neighbors
    assert_eq!(
        results[&CheckKind::Spike],
        vec![
            FlagCode::Unknown,
            FlagCode::Suspect,
            FlagCode::Bad,
            FlagCode::Suspect,
            FlagCode::Unknown
        ]
    );

    // Location: the last fix left the bounding box
    assert_eq!(
        results[&CheckKind::Location],
        vec![
            FlagCode::Good,
            FlagCode::Good,
            FlagCode::Good,
            FlagCode::Good,
            FlagCode::Bad
        ]
    );
}

#[test]
fn test_flat_line_over_stalled_sensor() {
    let start = Utc.with_ymd_and_hms(2014, 9, 29, 12, 0, 0).unwrap();
    let timestamps = (0..8)
        .map(|i| start + chrono::Duration::minutes(6 * i))
        .collect();
    let values = vec![
        Some(0.21),
        Some(0.24),
        Some(0.24),
        Some(0.24),
        Some(0.24),
        Some(0.24),
        Some(0.31),
        Some(0.28),
    ];

    let series =
        ObservationSeries::new(timestamps, values, vec![None; 8], vec![None; 8]).unwrap();

    let engine = QcEngine::new(QcConfig {
        flat_line: Some(FlatLineParams::new(3, 5, 0.001).unwrap()),
        ..Default::default()
    });
    let results = engine.run(&series).unwrap();

    assert_eq!(
        results[&CheckKind::FlatLine],
        vec![
            FlagCode::Good,
            FlagCode::Good,
            FlagCode::Good,
            FlagCode::Suspect,
            FlagCode::Suspect,
            FlagCode::Bad,
            FlagCode::Good,
            FlagCode::Good
        ]
    );
}

#[test]
fn test_missing_values_never_panic() {
    let start = Utc.with_ymd_and_hms(2014, 9, 29, 12, 0, 0).unwrap();
    let timestamps = (0..6)
        .map(|i| start + chrono::Duration::minutes(6 * i))
        .collect();
    let values = vec![None, Some(0.2), None, None, Some(0.3), None];

    let series =
        ObservationSeries::new(timestamps, values, vec![None; 6], vec![None; 6]).unwrap();

    let mut config = cbibs_wave_config();
    config.location = None; // no coordinates in this series
    let results = QcEngine::new(config).run(&series).unwrap();

    for flags in results.values() {
        assert_eq!(flags.len(), 6);
    }

    // Gross range mirrors the gaps exactly
    assert_eq!(
        results[&CheckKind::GrossRange],
        vec![
            FlagCode::Missing,
            FlagCode::Good,
            FlagCode::Missing,
            FlagCode::Missing,
            FlagCode::Good,
            FlagCode::Missing
        ]
    );
}

#[test]
fn test_report_summarizes_run() {
    let start = Utc.with_ymd_and_hms(2014, 9, 29, 12, 0, 0).unwrap();
    let timestamps = (0..5)
        .map(|i| start + chrono::Duration::minutes(6 * i))
        .collect();
    let values = vec![Some(0.1), Some(0.1), Some(0.9), Some(0.1), Some(0.1)];

    let series =
        ObservationSeries::new(timestamps, values, vec![None; 5], vec![None; 5]).unwrap();

    let engine = QcEngine::new(QcConfig {
        gross_range: Some(GrossRangeParams {
            sensor_range: ValueRange::new(0.0, 0.8).unwrap(),
            user_range: None,
        }),
        ..Default::default()
    });
    let results = engine.run(&series).unwrap();

    let analyzer = FlagAnalyzer::new();
    let report = analyzer.analyze(&results, series.len());

    assert_eq!(report.total_samples, 5);
    assert_eq!(report.summaries.len(), 1);
    assert_eq!(report.summaries[0].bad, 1);
    assert_eq!(report.summaries[0].first_bad_index, Some(2));

    // The JSON report round-trips through serde
    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("gross_range"));
}

#[test]
fn test_configuration_errors_fail_the_whole_run() {
    let start = Utc.with_ymd_and_hms(2014, 9, 29, 12, 0, 0).unwrap();
    let series = ObservationSeries::new(
        vec![start, start + chrono::Duration::minutes(6)],
        vec![Some(0.1), Some(0.2)],
        vec![None, None],
        vec![None, None],
    )
    .unwrap();

    // User range escaping the sensor range is a configuration error, not
    // a silent reorder
    let engine = QcEngine::new(QcConfig {
        gross_range: Some(GrossRangeParams {
            sensor_range: ValueRange::new(0.0, 0.8).unwrap(),
            user_range: Some(ValueRange::new(-1.0, 0.5).unwrap()),
        }),
        flat_line: Some(FlatLineParams::new(3, 5, 0.001).unwrap()),
        ..Default::default()
    });

    assert!(engine.run(&series).is_err());
}

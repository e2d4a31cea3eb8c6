use std::path::{Path, PathBuf};
use tracing::info;

use crate::analyzers::FlagAnalyzer;
use crate::cli::args::{Cli, Commands};
use crate::engine::{GrossRangeParams, LocationParams, QcConfig, QcEngine};
use crate::error::{QcError, Result};
use crate::models::{BoundingBox, FlatLineParams, ObservationSeries, SpikeThresholds, ValueRange};
use crate::readers::ObservationReader;
use crate::utils::geo::kilometers_to_meters;
use crate::utils::progress::ProgressReporter;

pub async fn run(cli: Cli) -> Result<()> {
    setup_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Check {
            input,
            output,
            bbox,
            range_max_km,
            sensor_min,
            sensor_max,
            user_min,
            user_max,
            spike_suspect,
            spike_bad,
            flat_suspect,
            flat_bad,
            flat_tolerance,
            no_location,
            no_gross_range,
            no_spike,
            no_flat_line,
            max_workers,
        } => {
            let progress = ProgressReporter::new_spinner("Reading observations...", cli.quiet);

            let series = ObservationReader::new().read_series(&input)?;
            progress.set_message("Running QC checks...");

            let mut run_location = !no_location;
            if run_location && !series.has_coordinates() {
                progress.println("No coordinate columns found - skipping location check");
                run_location = false;
            }

            let config = QcConfig {
                location: if run_location {
                    Some(LocationParams {
                        bbox: match &bbox {
                            Some(spec) => parse_bbox(spec)?,
                            None => BoundingBox::global(),
                        },
                        range_max_m: range_max_km.map(kilometers_to_meters),
                    })
                } else {
                    None
                },
                gross_range: if no_gross_range {
                    None
                } else {
                    Some(GrossRangeParams {
                        sensor_range: ValueRange::new(sensor_min, sensor_max)?,
                        user_range: build_user_range(user_min, user_max)?,
                    })
                },
                spike: if no_spike {
                    None
                } else {
                    Some(SpikeThresholds::new(spike_suspect, spike_bad)?)
                },
                flat_line: if no_flat_line {
                    None
                } else {
                    Some(FlatLineParams::new(flat_suspect, flat_bad, flat_tolerance)?)
                },
            };

            let engine = QcEngine::new(config).with_max_workers(max_workers);
            let results = engine.run(&series)?;

            progress.finish_with_message(&format!(
                "Checked {} observations with {} checks",
                series.len(),
                results.len()
            ));

            let analyzer = FlagAnalyzer::new();
            let report = analyzer.analyze(&results, series.len());
            println!("\n{}", analyzer.generate_summary(&report));

            if let Some(output_path) = output {
                write_json_report(&report, &output_path)?;
                println!("JSON report written to {}", output_path.display());
            }
        }

        Commands::Info { input, sample } => {
            let series = ObservationReader::new().read_series(&input)?;
            print_series_info(&series, sample);
        }
    }

    Ok(())
}

fn setup_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let log_level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("qartod_qc={}", log_level)));

    // Logs go to stderr so report output stays pipeable
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

/// Parse a bounding box argument of the form 'min_lon,min_lat,max_lon,max_lat'
fn parse_bbox(spec: &str) -> Result<BoundingBox> {
    let parts: Vec<&str> = spec.split(',').map(|s| s.trim()).collect();

    if parts.len() != 4 {
        return Err(QcError::InvalidFormat(format!(
            "Expected 'min_lon,min_lat,max_lon,max_lat', got '{}'",
            spec
        )));
    }

    let mut corners = [0.0f64; 4];
    for (slot, part) in corners.iter_mut().zip(&parts) {
        *slot = part.parse::<f64>().map_err(|_| {
            QcError::InvalidFormat(format!("Invalid bounding box coordinate: '{}'", part))
        })?;
    }

    BoundingBox::new(corners[0], corners[1], corners[2], corners[3])
}

fn build_user_range(user_min: Option<f64>, user_max: Option<f64>) -> Result<Option<ValueRange>> {
    match (user_min, user_max) {
        (Some(min), Some(max)) => Ok(Some(ValueRange::new(min, max)?)),
        (None, None) => Ok(None),
        _ => Err(QcError::Config(
            "User range requires both --user-min and --user-max".to_string(),
        )),
    }
}

fn write_json_report(report: &crate::analyzers::QcReport, path: &PathBuf) -> Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json)?;

    info!(path = %path.display(), "wrote JSON report");
    Ok(())
}

fn print_series_info(series: &ObservationSeries, sample: usize) {
    let (start, end) = series.time_span();
    let present: Vec<f64> = series.values().iter().flatten().copied().collect();

    println!("Observations: {}", series.len());
    println!("Time span: {} to {}", start, end);
    println!(
        "Missing values: {} ({:.1}%)",
        series.missing_value_count(),
        (series.missing_value_count() as f64 / series.len() as f64) * 100.0
    );
    println!(
        "Coordinates: {}",
        if series.has_coordinates() {
            "present"
        } else {
            "absent"
        }
    );

    if !present.is_empty() {
        let min = present.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = present.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let mean = present.iter().sum::<f64>() / present.len() as f64;
        println!("Value range: {:.3} to {:.3} (mean {:.3})", min, max, mean);
    }

    if sample > 0 {
        println!("\nSample records (showing up to {}):", sample);
        for (i, (ts, value)) in series
            .timestamps()
            .iter()
            .zip(series.values())
            .take(sample)
            .enumerate()
        {
            match value {
                Some(v) => println!("{}. {} {:.3}", i + 1, ts, v),
                None => println!("{}. {} (missing)", i + 1, ts),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bbox() {
        let bbox = parse_bbox("-76.5, 39, -76, 39.5").unwrap();
        assert_eq!(bbox.min_lon, -76.5);
        assert_eq!(bbox.max_lat, 39.5);

        assert!(parse_bbox("-76.5,39,-76").is_err());
        assert!(parse_bbox("a,b,c,d").is_err());
    }

    #[test]
    fn test_build_user_range() {
        assert!(build_user_range(None, None).unwrap().is_none());
        assert!(build_user_range(Some(0.1), Some(0.6)).unwrap().is_some());
        assert!(build_user_range(Some(0.1), None).is_err());
    }
}

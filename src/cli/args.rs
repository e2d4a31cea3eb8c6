use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::utils::constants::{
    DEFAULT_FLAT_RUN_BAD, DEFAULT_FLAT_RUN_SUSPECT, DEFAULT_FLAT_TOLERANCE, DEFAULT_SENSOR_MAX,
    DEFAULT_SENSOR_MIN, DEFAULT_SPIKE_BAD, DEFAULT_SPIKE_SUSPECT,
};

#[derive(Parser)]
#[command(name = "qartod-qc")]
#[command(about = "QARTOD-style quality control for sensor time series")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(short, long, global = true, help = "Suppress progress output")]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run QC checks over a CSV observation extract
    Check {
        #[arg(short, long, help = "Input CSV file (timestamp,value[,lon,lat])")]
        input: PathBuf,

        #[arg(short, long, help = "Write the full JSON report to this path")]
        output: Option<PathBuf>,

        #[arg(
            long,
            help = "Location bounding box as 'min_lon,min_lat,max_lon,max_lat' [default: whole globe]"
        )]
        bbox: Option<String>,

        #[arg(long, help = "Maximum displacement from the anchor position, km")]
        range_max_km: Option<f64>,

        #[arg(long, default_value_t = DEFAULT_SENSOR_MIN, help = "Sensor range minimum")]
        sensor_min: f64,

        #[arg(long, default_value_t = DEFAULT_SENSOR_MAX, help = "Sensor range maximum")]
        sensor_max: f64,

        #[arg(long, help = "Optional stricter user range minimum")]
        user_min: Option<f64>,

        #[arg(long, help = "Optional stricter user range maximum")]
        user_max: Option<f64>,

        #[arg(long, default_value_t = DEFAULT_SPIKE_SUSPECT, help = "Spike suspect threshold")]
        spike_suspect: f64,

        #[arg(long, default_value_t = DEFAULT_SPIKE_BAD, help = "Spike bad threshold")]
        spike_bad: f64,

        #[arg(long, default_value_t = DEFAULT_FLAT_RUN_SUSPECT, help = "Flat line suspect run length")]
        flat_suspect: usize,

        #[arg(long, default_value_t = DEFAULT_FLAT_RUN_BAD, help = "Flat line bad run length")]
        flat_bad: usize,

        #[arg(long, default_value_t = DEFAULT_FLAT_TOLERANCE, help = "Flat line tolerance")]
        flat_tolerance: f64,

        #[arg(long, default_value = "false", help = "Skip the location check")]
        no_location: bool,

        #[arg(long, default_value = "false", help = "Skip the gross range check")]
        no_gross_range: bool,

        #[arg(long, default_value = "false", help = "Skip the spike check")]
        no_spike: bool,

        #[arg(long, default_value = "false", help = "Skip the flat line check")]
        no_flat_line: bool,

        #[arg(long, default_value_t = num_cpus::get())]
        max_workers: usize,
    },

    /// Display information about a CSV observation extract
    Info {
        #[arg(short, long, help = "Input CSV file")]
        input: PathBuf,

        #[arg(short, long, default_value = "5", help = "Sample records to show")]
        sample: usize,
    },
}

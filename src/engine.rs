use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::info;

use crate::checks::{FlatLineCheck, GrossRangeCheck, LocationCheck, SpikeCheck};
use crate::error::{QcError, Result};
use crate::models::{
    BoundingBox, FlagCode, FlatLineParams, ObservationSeries, SpikeThresholds, ValueRange,
};

/// Identifies one of the four QC tests in engine output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CheckKind {
    Location,
    GrossRange,
    Spike,
    FlatLine,
}

impl CheckKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckKind::Location => "location",
            CheckKind::GrossRange => "gross_range",
            CheckKind::Spike => "spike",
            CheckKind::FlatLine => "flat_line",
        }
    }
}

impl std::fmt::Display for CheckKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationParams {
    pub bbox: BoundingBox,
    pub range_max_m: Option<f64>,
}

impl Default for LocationParams {
    fn default() -> Self {
        Self {
            bbox: BoundingBox::global(),
            range_max_m: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrossRangeParams {
    pub sensor_range: ValueRange,
    pub user_range: Option<ValueRange>,
}

/// Which checks to run and with what parameters; `None` disables a check
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QcConfig {
    pub location: Option<LocationParams>,
    pub gross_range: Option<GrossRangeParams>,
    pub spike: Option<SpikeThresholds>,
    pub flat_line: Option<FlatLineParams>,
}

impl QcConfig {
    pub fn enabled_count(&self) -> usize {
        [
            self.location.is_some(),
            self.gross_range.is_some(),
            self.spike.is_some(),
            self.flat_line.is_some(),
        ]
        .iter()
        .filter(|enabled| **enabled)
        .count()
    }
}

/// One flag vector per executed check, aligned with the input series
pub type QcRunResult = HashMap<CheckKind, Vec<FlagCode>>;

enum BuiltCheck {
    Location(LocationCheck),
    GrossRange(GrossRangeCheck),
    Spike(SpikeCheck),
    FlatLine(FlatLineCheck),
}

/// Runs the configured checks over one observation series
///
/// The engine is stateless across calls and never merges flags between
/// checks; severity precedence differs between deployments, so flag
/// combination stays with the caller.
pub struct QcEngine {
    config: QcConfig,
    max_workers: Option<usize>,
}

impl QcEngine {
    pub fn new(config: QcConfig) -> Self {
        Self {
            config,
            max_workers: None,
        }
    }

    /// Cap the rayon thread pool used for the run; defaults to the
    /// global pool
    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = Some(max_workers);
        self
    }

    pub fn config(&self) -> &QcConfig {
        &self.config
    }

    /// Run every enabled check over the series
    ///
    /// Configuration is validated in full before any observation is
    /// touched; a single malformed parameter fails the whole call with no
    /// partial results. The checks themselves are pure and read-only, so
    /// they run in parallel.
    pub fn run(&self, series: &ObservationSeries) -> Result<QcRunResult> {
        let checks = self.build_checks(series)?;

        if checks.is_empty() {
            return Err(QcError::Config("No checks are enabled".to_string()));
        }

        info!(
            samples = series.len(),
            checks = checks.len(),
            "running QC checks"
        );

        let results = match self.max_workers {
            Some(max_workers) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(max_workers)
                    .build()
                    .map_err(|e| QcError::Config(e.to_string()))?;
                pool.install(|| Self::execute(&checks, series))?
            }
            None => Self::execute(&checks, series)?,
        };

        Ok(results.into_iter().collect())
    }

    fn execute(
        checks: &[(CheckKind, BuiltCheck)],
        series: &ObservationSeries,
    ) -> Result<Vec<(CheckKind, Vec<FlagCode>)>> {
        checks
            .par_iter()
            .map(|(kind, check)| {
                let flags = match check {
                    BuiltCheck::Location(check) => {
                        check.check(series.longitudes(), series.latitudes())?
                    }
                    BuiltCheck::GrossRange(check) => check.check(series.values())?,
                    BuiltCheck::Spike(check) => check.check(series.values())?,
                    BuiltCheck::FlatLine(check) => check.check(series.values())?,
                };
                Ok((*kind, flags))
            })
            .collect()
    }

    fn build_checks(&self, series: &ObservationSeries) -> Result<Vec<(CheckKind, BuiltCheck)>> {
        let mut checks = Vec::new();

        if let Some(params) = &self.config.location {
            if !series.has_coordinates() {
                return Err(QcError::MissingData(
                    "Location check is enabled but the series has no coordinates".to_string(),
                ));
            }

            let mut check = LocationCheck::new(params.bbox)?;
            if let Some(range_max_m) = params.range_max_m {
                check = check.with_range_max_m(range_max_m)?;
            }
            checks.push((CheckKind::Location, BuiltCheck::Location(check)));
        }

        if let Some(params) = &self.config.gross_range {
            let mut check = GrossRangeCheck::new(params.sensor_range)?;
            if let Some(user_range) = params.user_range {
                check = check.with_user_range(user_range)?;
            }
            checks.push((CheckKind::GrossRange, BuiltCheck::GrossRange(check)));
        }

        if let Some(thresholds) = &self.config.spike {
            checks.push((CheckKind::Spike, BuiltCheck::Spike(SpikeCheck::new(*thresholds)?)));
        }

        if let Some(params) = &self.config.flat_line {
            checks.push((
                CheckKind::FlatLine,
                BuiltCheck::FlatLine(FlatLineCheck::new(*params)?),
            ));
        }

        Ok(checks)
    }
}

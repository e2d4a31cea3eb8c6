use tracing::debug;

use crate::error::Result;
use crate::models::{FlagCode, FlatLineParams};

/// QARTOD flat line test
///
/// Detects runs of consecutive values that repeat within a tolerance,
/// which usually means a stalled sensor. A single left-to-right pass
/// carries the current run length, so no window is ever re-scanned.
pub struct FlatLineCheck {
    params: FlatLineParams,
}

impl FlatLineCheck {
    pub fn new(params: FlatLineParams) -> Result<Self> {
        params.check()?;
        Ok(Self { params })
    }

    pub fn check(&self, values: &[Option<f64>]) -> Result<Vec<FlagCode>> {
        let mut flags = Vec::with_capacity(values.len());
        let mut run_length: usize = 0;
        let mut prev_value: Option<f64> = None;

        for value in values {
            match value {
                Some(current) => {
                    run_length = match prev_value {
                        Some(prev) if (current - prev).abs() <= self.params.tolerance => {
                            run_length + 1
                        }
                        _ => 1,
                    };
                    prev_value = Some(*current);

                    flags.push(if run_length >= self.params.min_run_bad {
                        FlagCode::Bad
                    } else if run_length >= self.params.min_run_suspect {
                        FlagCode::Suspect
                    } else {
                        FlagCode::Good
                    });
                }
                None => {
                    // A gap breaks flatness on both sides
                    run_length = 0;
                    prev_value = None;
                    flags.push(FlagCode::Missing);
                }
            }
        }

        debug!(
            total = flags.len(),
            suspect = flags.iter().filter(|f| **f == FlagCode::Suspect).count(),
            bad = flags.iter().filter(|f| **f == FlagCode::Bad).count(),
            "flat line check complete"
        );

        Ok(flags)
    }
}

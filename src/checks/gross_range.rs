use tracing::debug;

use crate::error::{QcError, Result};
use crate::models::{FlagCode, ValueRange};

/// QARTOD gross range test
///
/// Flags values outside the sensor's physically plausible output range as
/// bad, and values outside a stricter operator-defined range as suspect.
/// Each index is judged independently.
pub struct GrossRangeCheck {
    sensor_range: ValueRange,
    user_range: Option<ValueRange>,
}

impl GrossRangeCheck {
    pub fn new(sensor_range: ValueRange) -> Result<Self> {
        sensor_range.check()?;

        Ok(Self {
            sensor_range,
            user_range: None,
        })
    }

    /// Add an operator-defined range; it must lie entirely within the
    /// sensor range, otherwise the suspect and bad verdicts would
    /// contradict each other
    pub fn with_user_range(mut self, user_range: ValueRange) -> Result<Self> {
        user_range.check()?;

        if !self.sensor_range.encloses(&user_range) {
            return Err(QcError::Config(format!(
                "User range [{}, {}] is not contained in sensor range [{}, {}]",
                user_range.min, user_range.max, self.sensor_range.min, self.sensor_range.max
            )));
        }

        self.user_range = Some(user_range);
        Ok(self)
    }

    pub fn check(&self, values: &[Option<f64>]) -> Result<Vec<FlagCode>> {
        let flags = values
            .iter()
            .map(|value| self.flag_value(*value))
            .collect::<Vec<_>>();

        debug!(
            total = flags.len(),
            bad = flags.iter().filter(|f| **f == FlagCode::Bad).count(),
            "gross range check complete"
        );

        Ok(flags)
    }

    fn flag_value(&self, value: Option<f64>) -> FlagCode {
        let value = match value {
            Some(v) => v,
            None => return FlagCode::Missing,
        };

        if !self.sensor_range.contains(value) {
            FlagCode::Bad
        } else if matches!(&self.user_range, Some(range) if !range.contains(value)) {
            FlagCode::Suspect
        } else {
            FlagCode::Good
        }
    }
}

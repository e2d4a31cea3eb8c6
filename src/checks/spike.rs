use tracing::debug;

use crate::error::Result;
use crate::models::{FlagCode, SpikeThresholds};

/// QARTOD spike test
///
/// A spike at index i is a deviation of the value from the midpoint of
/// its two neighbors exceeding a threshold; the flag lands on the middle
/// point of the three-point window. Boundary points have no full window
/// and are flagged unknown rather than dropped, so the output always has
/// the input's length.
pub struct SpikeCheck {
    thresholds: SpikeThresholds,
}

impl SpikeCheck {
    pub fn new(thresholds: SpikeThresholds) -> Result<Self> {
        thresholds.check()?;
        Ok(Self { thresholds })
    }

    pub fn check(&self, values: &[Option<f64>]) -> Result<Vec<FlagCode>> {
        let n = values.len();
        let mut flags = vec![FlagCode::Unknown; n];

        for i in 1..n.saturating_sub(1) {
            flags[i] = match (values[i - 1], values[i], values[i + 1]) {
                (Some(prev), Some(curr), Some(next)) => {
                    let midpoint = (prev + next) / 2.0;
                    let deviation = (curr - midpoint).abs();

                    if deviation > self.thresholds.bad {
                        FlagCode::Bad
                    } else if deviation > self.thresholds.suspect {
                        FlagCode::Suspect
                    } else {
                        FlagCode::Good
                    }
                }
                // A gap anywhere in the window leaves no verdict for the center
                _ => FlagCode::Missing,
            };
        }

        debug!(
            total = n,
            suspect = flags.iter().filter(|f| **f == FlagCode::Suspect).count(),
            bad = flags.iter().filter(|f| **f == FlagCode::Bad).count(),
            "spike check complete"
        );

        Ok(flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check() -> SpikeCheck {
        SpikeCheck::new(SpikeThresholds::new(0.15, 0.5).unwrap()).unwrap()
    }

    #[test]
    fn test_spike_scenario() {
        let values = vec![Some(0.1), Some(0.1), Some(0.9), Some(0.1), Some(0.1)];
        let flags = check().check(&values).unwrap();

        // Deviation at index 2 is |0.9 - 0.1| = 0.8 > bad threshold;
        // neighbors deviate |0.1 - 0.5| = 0.4, between the thresholds
        assert_eq!(
            flags,
            vec![
                FlagCode::Unknown,
                FlagCode::Suspect,
                FlagCode::Bad,
                FlagCode::Suspect,
                FlagCode::Unknown
            ]
        );
    }

    #[test]
    fn test_endpoints_are_unknown() {
        let values = vec![Some(0.1), Some(0.1)];
        let flags = check().check(&values).unwrap();
        assert_eq!(flags, vec![FlagCode::Unknown, FlagCode::Unknown]);
    }

    #[test]
    fn test_single_point_series() {
        let flags = check().check(&[Some(0.1)]).unwrap();
        assert_eq!(flags, vec![FlagCode::Unknown]);
    }

    #[test]
    fn test_flat_series_is_good() {
        let values = vec![Some(0.2); 6];
        let flags = check().check(&values).unwrap();
        assert_eq!(flags[1..5], vec![FlagCode::Good; 4][..]);
    }

    #[test]
    fn test_missing_neighbor_propagates() {
        let values = vec![Some(0.1), Some(0.1), None, Some(0.1), Some(0.1)];
        let flags = check().check(&values).unwrap();

        // The gap itself and both windows that straddle it lack a verdict
        assert_eq!(flags[1], FlagCode::Missing);
        assert_eq!(flags[2], FlagCode::Missing);
        assert_eq!(flags[3], FlagCode::Missing);
    }

    #[test]
    fn test_idempotent() {
        let values = vec![Some(0.1), Some(0.4), Some(0.1), Some(0.9), Some(0.1)];
        let first = check().check(&values).unwrap();
        let second = check().check(&values).unwrap();
        assert_eq!(first, second);
    }
}

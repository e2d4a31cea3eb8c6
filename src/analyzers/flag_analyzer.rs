use serde::Serialize;

use crate::engine::QcRunResult;
use crate::models::FlagCode;

/// Flag distribution for a single check
#[derive(Debug, Clone, Serialize)]
pub struct FlagSummary {
    pub check: String,
    pub total: usize,
    pub good: usize,
    pub unknown: usize,
    pub suspect: usize,
    pub bad: usize,
    pub missing: usize,
    pub first_bad_index: Option<usize>,
}

impl FlagSummary {
    pub fn from_flags(check: &str, flags: &[FlagCode]) -> Self {
        let count = |wanted: FlagCode| flags.iter().filter(|flag| **flag == wanted).count();

        Self {
            check: check.to_string(),
            total: flags.len(),
            good: count(FlagCode::Good),
            unknown: count(FlagCode::Unknown),
            suspect: count(FlagCode::Suspect),
            bad: count(FlagCode::Bad),
            missing: count(FlagCode::Missing),
            first_bad_index: flags.iter().position(|flag| *flag == FlagCode::Bad),
        }
    }

    pub fn good_percentage(&self) -> f64 {
        (self.good as f64 / self.total as f64) * 100.0
    }

    pub fn flagged_percentage(&self) -> f64 {
        ((self.suspect + self.bad) as f64 / self.total as f64) * 100.0
    }
}

/// Aggregated QC run report for presentation and JSON export
#[derive(Debug, Clone, Serialize)]
pub struct QcReport {
    pub total_samples: usize,
    pub summaries: Vec<FlagSummary>,
}

pub struct FlagAnalyzer;

impl FlagAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, results: &QcRunResult, total_samples: usize) -> QcReport {
        let mut summaries: Vec<FlagSummary> = results
            .iter()
            .map(|(kind, flags)| FlagSummary::from_flags(kind.as_str(), flags))
            .collect();

        // HashMap iteration order is arbitrary; keep reports stable
        summaries.sort_by(|a, b| a.check.cmp(&b.check));

        QcReport {
            total_samples,
            summaries,
        }
    }

    pub fn generate_summary(&self, report: &QcReport) -> String {
        let mut summary = String::new();

        summary.push_str("=== QC Flag Report ===\n");
        summary.push_str(&format!("Total Samples: {}\n", report.total_samples));

        for check in &report.summaries {
            summary.push_str(&format!(
                "\n{} check: {} good ({:.1}%), {} suspect, {} bad, {} unknown, {} missing\n",
                check.check,
                check.good,
                check.good_percentage(),
                check.suspect,
                check.bad,
                check.unknown,
                check.missing
            ));

            if let Some(index) = check.first_bad_index {
                summary.push_str(&format!("  first bad sample at index {}\n", index));
            }
        }

        summary
    }
}

impl Default for FlagAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

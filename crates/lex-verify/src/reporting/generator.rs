use crate::checks::CheckKind;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::types::CheckOutcome;
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

// ============================================================================
// Report Types
// ============================================================================

/// Result of one check, without run metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckEntry {
    /// Registry code of the check
    pub check: CheckKind,
    /// What the check looks for
    pub description: String,
    /// Cardinality of the result set
    pub count: usize,
    /// Implicated columns or row identifiers, sorted
    pub result: CheckOutcome,
}

impl CheckEntry {
    fn new(check: CheckKind, outcome: CheckOutcome) -> Self {
        Self {
            check,
            description: check.description().to_string(),
            count: outcome.len(),
            result: outcome,
        }
    }
}

/// Report for a single check run (`lex-verify <CHECK> <PATH>`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    /// Timestamp when the report was generated
    pub generated_at: String,
    /// Path to the input file
    pub input_file: String,
    #[serde(flatten)]
    pub entry: CheckEntry,
}

impl CheckReport {
    pub fn new(input_file: impl AsRef<Path>, check: CheckKind, outcome: CheckOutcome) -> Self {
        Self {
            generated_at: timestamp(),
            input_file: input_file.as_ref().display().to_string(),
            entry: CheckEntry::new(check, outcome),
        }
    }
}

/// Report for a full run over every check (`lex-verify --all <PATH>`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    /// Timestamp when the report was generated
    pub generated_at: String,
    /// Path to the input file
    pub input_file: String,
    /// Number of data rows
    pub rows: usize,
    /// Number of header columns, label included
    pub columns: usize,
    /// Checks with a non-empty result
    pub checks_flagged: usize,
    pub checks: Vec<CheckEntry>,
}

impl VerificationReport {
    pub fn new(
        input_file: impl AsRef<Path>,
        dataset: &Dataset,
        outcomes: Vec<(CheckKind, CheckOutcome)>,
    ) -> Self {
        let checks: Vec<CheckEntry> = outcomes
            .into_iter()
            .map(|(check, outcome)| CheckEntry::new(check, outcome))
            .collect();
        Self {
            generated_at: timestamp(),
            input_file: input_file.as_ref().display().to_string(),
            rows: dataset.height(),
            columns: dataset.width(),
            checks_flagged: checks.iter().filter(|entry| entry.count > 0).count(),
            checks,
        }
    }
}

fn timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

// ============================================================================
// Report Writer
// ============================================================================

pub struct ReportGenerator {
    output_dir: PathBuf,
}

impl ReportGenerator {
    pub fn new(output_dir: PathBuf) -> Self {
        Self { output_dir }
    }

    /// Write `report` as pretty JSON to `<output_dir>/<base_name>_report.json`.
    pub fn write_report_to_file<T: Serialize>(
        &self,
        report: &T,
        report_base_name: &str,
    ) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;

        let report_path = self
            .output_dir
            .join(format!("{}_report.json", report_base_name));
        let mut file = File::create(&report_path)?;
        file.write_all(serde_json::to_string_pretty(report)?.as_bytes())?;

        info!("Report saved: {}", report_path.display());

        Ok(report_path)
    }
}

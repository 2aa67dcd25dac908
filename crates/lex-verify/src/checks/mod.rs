//! Verification checks and the registry that dispatches them.
//!
//! Every check is a pure function of a [`Dataset`] and a [`CheckConfig`].
//! Column-level checks return a [`FeatureSet`](crate::types::FeatureSet),
//! row-level checks a [`CaseSet`](crate::types::CaseSet). [`CheckKind`]
//! names each check by its single-letter code.
//!
//! # Example
//!
//! ```rust,ignore
//! use lex_verify::{CheckConfig, CheckKind, Dataset};
//!
//! let config = CheckConfig::default();
//! let dataset = Dataset::from_csv("data/page-blocks.csv", &config)?;
//! let outcome = "J".parse::<CheckKind>()?.run(&dataset, &config)?;
//! println!("{} inconsistent rows", outcome.len());
//! ```

pub mod columns;
mod constraints;
mod correlation;
mod duplicates;
mod outliers;
mod plausibility;
pub(crate) mod rules;

pub use constraints::{constraint_cases, constraint_features};
pub use correlation::correlated_features;
pub use duplicates::{constant_features, inconsistent_cases};
pub use outliers::{class_outlier_cases, outlier_cases, outlier_features};
pub use plausibility::{plausibility_cases, plausibility_features};

use crate::config::CheckConfig;
use crate::dataset::Dataset;
use crate::error::{Result, VerifyError};
use crate::types::{CheckOutcome, Granularity};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;
use tracing::info;

/// The fixed registry of checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CheckKind {
    /// Constant columns.
    A,
    /// Correlated column pairs.
    B,
    /// Columns with outlier values.
    C,
    /// Columns involved in derived-value inconsistencies.
    D,
    /// Columns with implausible values.
    E,
    /// Rows with outlier values.
    G,
    /// Duplicate feature vectors with different labels.
    H,
    /// Rows with outlier values within their label class.
    I,
    /// Rows with derived-value inconsistencies.
    J,
    /// Rows with implausible or missing values.
    K,
}

impl CheckKind {
    /// Every check, in registry order.
    pub const ALL: [CheckKind; 10] = [
        CheckKind::A,
        CheckKind::B,
        CheckKind::C,
        CheckKind::D,
        CheckKind::E,
        CheckKind::G,
        CheckKind::H,
        CheckKind::I,
        CheckKind::J,
        CheckKind::K,
    ];

    /// Single-letter code of the check.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            CheckKind::A => "A",
            CheckKind::B => "B",
            CheckKind::C => "C",
            CheckKind::D => "D",
            CheckKind::E => "E",
            CheckKind::G => "G",
            CheckKind::H => "H",
            CheckKind::I => "I",
            CheckKind::J => "J",
            CheckKind::K => "K",
        }
    }

    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            CheckKind::A => "columns with the same value in every row",
            CheckKind::B => "columns strongly correlated with another column",
            CheckKind::C => "columns containing statistical outliers",
            CheckKind::D => "columns involved in derived-value inconsistencies",
            CheckKind::E => "columns containing implausible values",
            CheckKind::G => "rows containing statistical outliers",
            CheckKind::H => "rows duplicated with a different label",
            CheckKind::I => "rows containing outliers within their label class",
            CheckKind::J => "rows with derived-value inconsistencies",
            CheckKind::K => "rows with implausible or missing values",
        }
    }

    /// Whether the check reports columns or rows.
    #[must_use]
    pub fn granularity(&self) -> Granularity {
        match self {
            CheckKind::A | CheckKind::B | CheckKind::C | CheckKind::D | CheckKind::E => {
                Granularity::Feature
            }
            CheckKind::G | CheckKind::H | CheckKind::I | CheckKind::J | CheckKind::K => {
                Granularity::Case
            }
        }
    }

    /// Run the check against `dataset`.
    pub fn run(&self, dataset: &Dataset, config: &CheckConfig) -> Result<CheckOutcome> {
        let outcome = match self {
            CheckKind::A => constant_features(dataset).into(),
            CheckKind::B => correlated_features(dataset, config)?.into(),
            CheckKind::C => outlier_features(dataset, config)?.into(),
            CheckKind::D => constraint_features(dataset, config)?.into(),
            CheckKind::E => plausibility_features(dataset, config)?.into(),
            CheckKind::G => outlier_cases(dataset, config)?.into(),
            CheckKind::H => inconsistent_cases(dataset)?.into(),
            CheckKind::I => class_outlier_cases(dataset, config)?.into(),
            CheckKind::J => constraint_cases(dataset, config)?.into(),
            CheckKind::K => plausibility_cases(dataset, config)?.into(),
        };
        Ok(outcome)
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CheckKind {
    type Err = VerifyError;

    fn from_str(s: &str) -> Result<Self> {
        CheckKind::ALL
            .into_iter()
            .find(|kind| kind.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| VerifyError::UnknownCheck(s.to_string()))
    }
}

/// Run every check in registry order.
///
/// Stops at the first check that fails.
pub fn run_all(dataset: &Dataset, config: &CheckConfig) -> Result<Vec<(CheckKind, CheckOutcome)>> {
    let mut outcomes = Vec::with_capacity(CheckKind::ALL.len());

    for kind in CheckKind::ALL {
        let start = Instant::now();
        let outcome = kind
            .run(dataset, config)
            .map_err(|e| e.with_context(format!("check {}", kind)))?;
        info!(
            "Check {} finished in {:?}: {} {}",
            kind,
            start.elapsed(),
            outcome.len(),
            outcome.granularity()
        );
        outcomes.push((kind, outcome));
    }

    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        let header = [
            "HEIGHT", "LENGHT", "WIDTH", "AREA", "ECCEN", "P_BLACK", "P_AND", "MEAN_TR",
            "BLACKPIX", "BLACKAND", "WB_TRANS", "DATASET_ID", "class!",
        ];
        let rows = [
            ["5", "7", "3", "35", "1.4", "0.4", "0.6", "1.5", "14", "21", "9", "0", "1"],
            ["2", "3", "4", "7", "1.5", "0.5", "0.667", "2", "3", "4", "2", "0", "1"],
            ["5", "7", "3", "35", "1.4", "0.4", "0.6", "1.5", "14", "21", "9", "0", "2"],
            ["4", "5", "6", "20", "1.25", "0.5", "0.75", "3", "10", "15", "5", "0", "?"],
        ];
        Dataset::from_records(&header, &rows, "class!", "?").unwrap()
    }

    #[test]
    fn test_parse_codes() {
        assert_eq!("A".parse::<CheckKind>().unwrap(), CheckKind::A);
        assert_eq!("k".parse::<CheckKind>().unwrap(), CheckKind::K);
        assert!(matches!(
            "F".parse::<CheckKind>(),
            Err(VerifyError::UnknownCheck(code)) if code == "F"
        ));
        assert!("AB".parse::<CheckKind>().is_err());
    }

    #[test]
    fn test_display_round_trips_code() {
        for kind in CheckKind::ALL {
            assert_eq!(kind.to_string().parse::<CheckKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_granularity_matches_outcome() {
        let dataset = sample();
        let config = CheckConfig::default();
        for kind in CheckKind::ALL {
            let outcome = kind.run(&dataset, &config).unwrap();
            assert_eq!(outcome.granularity(), kind.granularity(), "check {}", kind);
        }
    }

    #[test]
    fn test_checks_are_idempotent() {
        let dataset = sample();
        let config = CheckConfig::default();
        let first = run_all(&dataset, &config).unwrap();
        let second = run_all(&dataset, &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_registry_dispatch() {
        let dataset = sample();
        let config = CheckConfig::default();
        let outcomes = run_all(&dataset, &config).unwrap();
        assert_eq!(outcomes.len(), 10);

        let find = |kind: CheckKind| {
            outcomes
                .iter()
                .find(|(k, _)| *k == kind)
                .map(|(_, outcome)| outcome.items())
                .unwrap()
        };

        assert_eq!(find(CheckKind::A), vec!["DATASET_ID"]);
        // Row 3 has AREA 7 instead of 6
        assert_eq!(find(CheckKind::J), vec!["3"]);
        // Rows 2 and 4 share every identity column but not the label
        assert_eq!(find(CheckKind::H), vec!["2", "4"]);
        // Row 5 carries a missing label
        assert_eq!(find(CheckKind::K), vec!["5"]);
    }
}

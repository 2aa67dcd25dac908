//! Data Quality Verification Library
//!
//! Statistical verification checks for labelled tabular datasets, built with
//! Rust and Polars.
//!
//! # Overview
//!
//! A [`Dataset`] is loaded once (from CSV, a Polars `DataFrame`, or raw
//! records) and then handed to any number of read-only checks. Each check
//! reports either the set of suspect **columns** ([`FeatureSet`]) or the set
//! of suspect **rows** ([`CaseSet`]):
//!
//! - **Constant columns** (A) and **inconsistent duplicates** (H)
//! - **Correlated columns** (B)
//! - **Statistical outliers** per column (C), per row (G), and per row
//!   within its label class (I)
//! - **Derived-value consistency** per column (D) and per row (J)
//! - **Domain plausibility** per column (E) and per row (K)
//!
//! Row identifiers are reported as the 0-based row index plus two, which is
//! the line number of the row in a CSV file with one header line.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use lex_verify::{CheckConfig, CheckKind, Dataset, run_all};
//!
//! let config = CheckConfig::default();
//! let dataset = Dataset::from_csv("data/page-blocks.csv", &config)?;
//!
//! // One check
//! let outliers = CheckKind::G.run(&dataset, &config)?;
//! print!("{}", lex_verify::render_text(&outliers));
//!
//! // Every check
//! for (kind, outcome) in run_all(&dataset, &config)? {
//!     println!("{}: {} {}", kind, outcome.len(), outcome.granularity());
//! }
//! ```
//!
//! # Configuration
//!
//! Use [`CheckConfig`] to change the missing-value marker, the label column,
//! or the thresholds of the statistical and domain checks:
//!
//! ```rust,ignore
//! use lex_verify::CheckConfig;
//!
//! let config = CheckConfig::builder()
//!     .missing_marker("NA")
//!     .label_column("class")
//!     .correlation_threshold(0.9)
//!     .outlier_sigmas(2.5)
//!     .build()?;
//! ```

pub mod checks;
pub mod config;
pub mod dataset;
pub mod error;
pub mod reporting;
pub mod stats;
pub mod types;

// Re-exports for convenient access
pub use checks::{CheckKind, run_all};
pub use config::{CheckConfig, CheckConfigBuilder, ConfigValidationError};
pub use dataset::{Dataset, ROW_ID_OFFSET, Row};
pub use error::{Result as VerifyResult, ResultExt, VerifyError};
pub use reporting::{CheckReport, ReportGenerator, VerificationReport, render_text};
pub use types::{CaseSet, CheckOutcome, FeatureSet, Granularity};

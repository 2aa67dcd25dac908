//! Presentation of check results.
//!
//! Results are rendered either as plain text (cardinality on the first line,
//! then one element per line in sorted order) or as JSON reports suitable
//! for:
//! - JSON output to stdout (`--json` CLI flag)
//! - JSON file output (`--emit-report` CLI flag)
//! - Programmatic access in library mode
//!
//! # Example
//!
//! ```rust,ignore
//! use lex_verify::reporting::{CheckReport, ReportGenerator};
//!
//! let outcome = CheckKind::G.run(&dataset, &config)?;
//! print!("{}", lex_verify::reporting::render_text(&outcome));
//!
//! let report = CheckReport::new("data/page-blocks.csv", CheckKind::G, outcome);
//! let generator = ReportGenerator::new(PathBuf::from("reports"));
//! generator.write_report_to_file(&report, "page-blocks_G")?;
//! ```

mod generator;
mod text;

pub use generator::{CheckEntry, CheckReport, ReportGenerator, VerificationReport};
pub use text::render_text;

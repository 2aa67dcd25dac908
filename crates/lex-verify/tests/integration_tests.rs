//! Integration tests for the verification checks.
//!
//! These tests load CSV fixtures from disk and verify end-to-end behavior of
//! every check through the public API.
//!
//! `page_blocks.csv` holds 24 consistent blocks followed by six rows with
//! known defects:
//!
//! | Row | Defect                                                   |
//! |-----|----------------------------------------------------------|
//! | 26  | block an order of magnitude larger than the rest         |
//! | 27  | `AREA` does not equal `HEIGHT * LENGHT`                  |
//! | 28  | same block as row 29 ...                                 |
//! | 29  | ... with a different label                               |
//! | 30  | `WIDTH` is missing                                       |
//! | 31  | `P_AND` above 1 and label 6                              |

use lex_verify::{
    CaseSet, CheckConfig, CheckKind, CheckOutcome, CheckReport, Dataset, FeatureSet,
    ReportGenerator, VerificationReport, VerifyError, render_text, run_all,
};
use polars::df;
use pretty_assertions::assert_eq;
use std::path::PathBuf;

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load(filename: &str) -> Dataset {
    Dataset::from_csv(fixtures_path().join(filename), &CheckConfig::default())
        .expect("Failed to load fixture")
}

fn run(kind: CheckKind) -> Vec<String> {
    kind.run(&load("page_blocks.csv"), &CheckConfig::default())
        .expect("Check failed")
        .items()
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_load_keeps_raw_text() {
    let dataset = load("page_blocks.csv");

    assert_eq!(dataset.height(), 30);
    assert_eq!(dataset.width(), 13);
    assert_eq!(dataset.label_column(), "class!");

    // Formatting of numeric text survives loading
    let first = dataset.row(0).unwrap();
    assert_eq!(first.id(), 2);
    assert_eq!(first.get("ECCEN").unwrap(), "3.90");
    assert_eq!(first.get("MEAN_TR").unwrap(), "33.00");

    let missing_width = dataset.row(28).unwrap();
    assert_eq!(missing_width.get("WIDTH").unwrap(), "?");
    assert!(missing_width.has_missing());
}

#[test]
fn test_load_without_label_column_fails() {
    let result = Dataset::from_csv(
        fixtures_path().join("unlabelled.csv"),
        &CheckConfig::default(),
    );
    assert!(matches!(result, Err(VerifyError::ColumnNotFound(ref c)) if c == "class!"));
}

#[test]
fn test_load_with_custom_label_column() {
    let config = CheckConfig::builder().label_column("AREA").build().unwrap();
    let dataset = Dataset::from_csv(fixtures_path().join("unlabelled.csv"), &config).unwrap();
    assert_eq!(dataset.label_column(), "AREA");
    assert_eq!(dataset.height(), 2);
}

#[test]
fn test_dataframe_and_csv_agree() {
    let df = df!(
        "X" => ["1", "2", "3", "4"],
        "Y" => ["2", "4", "6", "8"],
        "class!" => ["1", "1", "2", "2"]
    )
    .unwrap();
    let dataset = Dataset::from_dataframe(&df, "class!", "?").unwrap();

    let outcome = CheckKind::B.run(&dataset, &CheckConfig::default()).unwrap();
    assert_eq!(outcome.items(), vec!["X", "Y"]);
}

// ============================================================================
// Column-level checks
// ============================================================================

#[test]
fn test_constant_columns() {
    assert_eq!(run(CheckKind::A), vec!["DATASET_ID"]);
}

#[test]
fn test_correlated_columns() {
    // WIDTH has one missing value, so every pair involving it is skipped
    assert_eq!(
        run(CheckKind::B),
        vec!["AREA", "BLACKAND", "BLACKPIX", "HEIGHT", "LENGHT", "WB_TRANS"]
    );
}

#[test]
fn test_outlier_columns() {
    assert_eq!(
        run(CheckKind::C),
        vec!["AREA", "BLACKAND", "BLACKPIX", "HEIGHT", "LENGHT", "MEAN_TR", "WB_TRANS"]
    );
}

#[test]
fn test_inconsistent_columns() {
    // Rows 27 and 31 are complete; row 30 is skipped for its missing WIDTH
    assert_eq!(
        run(CheckKind::D),
        vec!["AREA", "BLACKAND", "BLACKPIX", "HEIGHT", "LENGHT", "P_AND", "P_BLACK"]
    );
}

#[test]
fn test_implausible_columns() {
    assert_eq!(run(CheckKind::E), vec!["P_AND", "class!"]);
}

// ============================================================================
// Row-level checks
// ============================================================================

#[test]
fn test_outlier_rows() {
    assert_eq!(run(CheckKind::G), vec!["26"]);
}

#[test]
fn test_conflicting_duplicates() {
    assert_eq!(run(CheckKind::H), vec!["28", "29"]);
}

#[test]
fn test_class_outlier_rows() {
    assert_eq!(run(CheckKind::I), vec!["26"]);
}

#[test]
fn test_inconsistent_rows() {
    // Row 30 lacks WIDTH, which no identity uses, and is consistent
    assert_eq!(run(CheckKind::J), vec!["27", "31"]);
}

#[test]
fn test_implausible_rows() {
    // Row 30 is flagged for its missing value alone
    assert_eq!(run(CheckKind::K), vec!["30", "31"]);
}

// ============================================================================
// Cross-check properties
// ============================================================================

#[test]
fn test_run_all_matches_individual_runs() {
    let dataset = load("page_blocks.csv");
    let config = CheckConfig::default();

    let outcomes = run_all(&dataset, &config).unwrap();
    let kinds: Vec<CheckKind> = outcomes.iter().map(|(kind, _)| *kind).collect();
    assert_eq!(kinds, CheckKind::ALL.to_vec());

    for (kind, outcome) in outcomes {
        assert_eq!(outcome, kind.run(&dataset, &config).unwrap(), "check {}", kind);
    }
}

#[test]
fn test_checks_do_not_depend_on_row_order() {
    let forward = load("page_blocks.csv");
    let header: Vec<String> = forward.header().to_vec();
    let mut rows: Vec<Vec<String>> = forward
        .rows()
        .map(|row| (0..header.len()).map(|i| row.raw(i).to_string()).collect())
        .collect();
    rows.reverse();
    let reversed = Dataset::new(header, rows, "class!", "?").unwrap();

    let config = CheckConfig::default();
    for kind in [CheckKind::A, CheckKind::C, CheckKind::D, CheckKind::E] {
        assert_eq!(
            kind.run(&forward, &config).unwrap(),
            kind.run(&reversed, &config).unwrap(),
            "check {}",
            kind
        );
    }

    // Row identifiers mirror: id -> 33 - id for 30 rows
    let mirrored: CaseSet = CheckKind::J
        .run(&forward, &config)
        .unwrap()
        .as_cases()
        .unwrap()
        .iter()
        .map(|id| 33 - id)
        .collect();
    assert_eq!(
        CheckKind::J.run(&reversed, &config).unwrap(),
        CheckOutcome::from(mirrored)
    );
}

#[test]
fn test_lower_sigma_threshold_widens_results() {
    let dataset = load("page_blocks.csv");
    let strict = CheckKind::G.run(&dataset, &CheckConfig::default()).unwrap();
    let loose_config = CheckConfig::builder().outlier_sigmas(1.0).build().unwrap();
    let loose = CheckKind::G.run(&dataset, &loose_config).unwrap();

    let strict = strict.as_cases().unwrap();
    let loose = loose.as_cases().unwrap();
    assert!(loose.len() > strict.len());
    assert!(strict.iter().all(|id| loose.contains(id)));
}

// ============================================================================
// Error handling
// ============================================================================

#[test]
fn test_malformed_number_fails_numeric_checks() {
    let dataset = load("malformed.csv");
    let config = CheckConfig::default();

    for kind in [CheckKind::C, CheckKind::J, CheckKind::K] {
        let err = kind.run(&dataset, &config).unwrap_err();
        match err {
            VerifyError::TypeConversionFailed { column, row, value } => {
                assert_eq!(column, "AREA");
                assert_eq!(row, 3);
                assert_eq!(value, "n/a");
            }
            other => panic!("check {}: unexpected error {:?}", kind, other),
        }
    }

    // Raw-text checks never parse numbers
    assert!(CheckKind::A.run(&dataset, &config).is_ok());
    assert!(CheckKind::H.run(&dataset, &config).is_ok());
}

#[test]
fn test_domain_checks_require_their_columns() {
    let config = CheckConfig::builder().label_column("AREA").build().unwrap();
    let dataset = Dataset::from_csv(fixtures_path().join("unlabelled.csv"), &config).unwrap();

    for kind in [CheckKind::D, CheckKind::E, CheckKind::H, CheckKind::J, CheckKind::K] {
        assert!(
            matches!(kind.run(&dataset, &config), Err(VerifyError::ColumnNotFound(_))),
            "check {}",
            kind
        );
    }
}

// ============================================================================
// Reporting
// ============================================================================

#[test]
fn test_text_output() {
    let dataset = load("page_blocks.csv");
    let outcome = CheckKind::J.run(&dataset, &CheckConfig::default()).unwrap();
    assert_eq!(render_text(&outcome), "2\n27\n31\n");

    let features: FeatureSet = ["P_AND", "class!"].into_iter().collect();
    assert_eq!(render_text(&features.into()), "2\nP_AND\nclass!\n");
}

#[test]
fn test_emit_reports() {
    let dataset = load("page_blocks.csv");
    let config = CheckConfig::default();
    let dir = std::env::temp_dir().join(format!("lex-verify-it-{}", std::process::id()));
    let generator = ReportGenerator::new(dir.clone());

    let single = CheckReport::new(
        "page_blocks.csv",
        CheckKind::H,
        CheckKind::H.run(&dataset, &config).unwrap(),
    );
    let path = generator
        .write_report_to_file(&single, "page_blocks_H")
        .unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["count"], 2);
    assert_eq!(json["result"]["items"], serde_json::json!([28, 29]));

    let outcomes = run_all(&dataset, &config).unwrap();
    let full = VerificationReport::new("page_blocks.csv", &dataset, outcomes);
    assert_eq!(full.checks_flagged, 10);
    let path = generator.write_report_to_file(&full, "page_blocks").unwrap();
    assert!(path.ends_with("page_blocks_report.json"));

    std::fs::remove_dir_all(&dir).unwrap();
}

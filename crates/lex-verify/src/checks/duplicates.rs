//! Duplicate-based checks: constant columns (A) and inconsistent cases (H).
//!
//! Both compare raw field text. `"1"` and `"1.0"` are different values here.

use super::columns::IDENTITY_COLUMNS;
use crate::dataset::{Dataset, Row};
use crate::error::Result;
use crate::types::{CaseSet, FeatureSet};
use std::collections::{HashMap, HashSet};
use tracing::debug;

fn identity_key<'a>(row: &Row<'a>, positions: &[usize]) -> Vec<&'a str> {
    positions.iter().map(|&position| row.raw(position)).collect()
}

/// Non-label columns whose value is the same in every row (check A).
pub fn constant_features(dataset: &Dataset) -> FeatureSet {
    let Some(first) = dataset.row(0) else {
        return FeatureSet::new();
    };

    dataset
        .feature_positions()
        .filter(|&position| {
            let expected = first.raw(position);
            dataset.rows().all(|row| row.raw(position) == expected)
        })
        .map(|position| dataset.column_name(position))
        .collect()
}

/// Rows whose identity tuple also occurs with a different label (check H).
///
/// The identity tuple is the raw values of the twelve identity columns.
/// Every row of a conflicting group is reported, including rows that share
/// a label with some other member of the group.
pub fn inconsistent_cases(dataset: &Dataset) -> Result<CaseSet> {
    let positions = dataset.column_indices(&IDENTITY_COLUMNS)?;
    let mut labels: HashMap<Vec<&str>, HashSet<&str>> = HashMap::new();
    for row in dataset.rows() {
        labels
            .entry(identity_key(&row, &positions))
            .or_default()
            .insert(row.label());
    }

    let conflicting = labels.values().filter(|set| set.len() > 1).count();
    debug!("{} identity tuples carry conflicting labels", conflicting);

    Ok(dataset
        .rows()
        .filter(|row| {
            labels
                .get(&identity_key(row, &positions))
                .is_some_and(|set| set.len() > 1)
        })
        .map(|row| row.id())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VerifyError;

    const HEADER: [&str; 13] = [
        "HEIGHT", "LENGHT", "WIDTH", "AREA", "ECCEN", "P_BLACK", "P_AND", "MEAN_TR", "BLACKPIX",
        "BLACKAND", "WB_TRANS", "DATASET_ID", "class!",
    ];

    fn block(height: &'static str, label: &'static str) -> [&'static str; 13] {
        [
            height, "7", "3", "35", "1.4", "0.4", "0.6", "1.5", "14", "21", "9", "0", label,
        ]
    }

    // ==================== constant_features tests ====================

    #[test]
    fn test_constant_column_reported() {
        let data = Dataset::from_records(
            &["X", "Y", "class!"],
            &[["4", "1", "1"], ["4", "2", "1"], ["4", "3", "1"]],
            "class!",
            "?",
        )
        .unwrap();
        let features = constant_features(&data);
        assert_eq!(features.iter().collect::<Vec<_>>(), vec!["X"]);
    }

    #[test]
    fn test_constant_label_not_reported() {
        let data =
            Dataset::from_records(&["X", "class!"], &[["1", "2"], ["2", "2"]], "class!", "?")
                .unwrap();
        assert!(constant_features(&data).is_empty());
    }

    #[test]
    fn test_constant_compares_raw_text() {
        let data =
            Dataset::from_records(&["X", "class!"], &[["1", "1"], ["1.0", "1"]], "class!", "?")
                .unwrap();
        assert!(constant_features(&data).is_empty());
    }

    #[test]
    fn test_all_missing_column_is_constant() {
        let data =
            Dataset::from_records(&["X", "class!"], &[["?", "1"], ["?", "2"]], "class!", "?")
                .unwrap();
        assert!(constant_features(&data).contains("X"));
    }

    #[test]
    fn test_constant_single_row_and_empty() {
        let one =
            Dataset::from_records(&["X", "Y", "class!"], &[["1", "2", "3"]], "class!", "?")
                .unwrap();
        assert_eq!(constant_features(&one).len(), 2);

        let none: [[&str; 2]; 0] = [];
        let empty = Dataset::from_records(&["X", "class!"], &none, "class!", "?").unwrap();
        assert!(constant_features(&empty).is_empty());
    }

    // ==================== inconsistent_cases tests ====================

    #[test]
    fn test_conflicting_labels_reported() {
        let rows = [block("5", "1"), block("6", "1"), block("5", "2")];
        let data = Dataset::from_records(&HEADER, &rows, "class!", "?").unwrap();
        let cases = inconsistent_cases(&data).unwrap();
        assert_eq!(cases.iter().collect::<Vec<_>>(), vec![2, 4]);
    }

    #[test]
    fn test_agreeing_duplicates_not_reported() {
        let rows = [block("5", "1"), block("5", "1"), block("6", "3")];
        let data = Dataset::from_records(&HEADER, &rows, "class!", "?").unwrap();
        assert!(inconsistent_cases(&data).unwrap().is_empty());
    }

    #[test]
    fn test_whole_conflicting_group_reported() {
        let rows = [block("5", "1"), block("5", "1"), block("5", "4")];
        let data = Dataset::from_records(&HEADER, &rows, "class!", "?").unwrap();
        let cases = inconsistent_cases(&data).unwrap();
        assert_eq!(cases.iter().collect::<Vec<_>>(), vec![2, 3, 4]);
    }

    #[test]
    fn test_missing_identity_column_fails() {
        let data =
            Dataset::from_records(&["HEIGHT", "class!"], &[["1", "1"]], "class!", "?").unwrap();
        assert!(matches!(
            inconsistent_cases(&data),
            Err(VerifyError::ColumnNotFound(_))
        ));
    }
}

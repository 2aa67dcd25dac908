//! Standard-deviation outlier checks (C, G and I).
//!
//! A value is an outlier when its column has a positive standard deviation
//! and the value lies more than `outlier_sigmas` deviations from the column
//! mean. Statistics are computed over non-missing values only, and missing
//! values are never outliers. The label column is not checked.

use crate::config::CheckConfig;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::stats::{ColumnStats, numeric_column};
use crate::types::{CaseSet, FeatureSet};
use std::collections::HashMap;
use tracing::debug;

/// Global statistics of every non-label column, in header order.
fn column_stats(dataset: &Dataset) -> Result<Vec<(usize, ColumnStats)>> {
    dataset
        .feature_positions()
        .map(|position| -> Result<_> {
            let stats = ColumnStats::of(&numeric_column(dataset, position)?);
            debug!(
                "Column {}: n={} mean={:.4} sd={:.4}",
                dataset.column_name(position),
                stats.count,
                stats.mean,
                stats.sd
            );
            Ok((position, stats))
        })
        .collect()
}

/// Per-class statistics of every non-label column, keyed by raw label.
fn class_stats(dataset: &Dataset) -> Result<Vec<(usize, HashMap<&str, ColumnStats>)>> {
    dataset
        .feature_positions()
        .map(|position| -> Result<_> {
            let mut by_class: HashMap<&str, Vec<f64>> = HashMap::new();
            for row in dataset.rows() {
                if let Some(value) = row.number(position)? {
                    by_class.entry(row.label()).or_default().push(value);
                }
            }
            let stats: HashMap<&str, ColumnStats> = by_class
                .into_iter()
                .map(|(label, values)| (label, ColumnStats::of(&values)))
                .collect();
            Ok((position, stats))
        })
        .collect()
}

/// Columns holding at least one outlier value (check C).
pub fn outlier_features(dataset: &Dataset, config: &CheckConfig) -> Result<FeatureSet> {
    let mut features = FeatureSet::new();

    for position in dataset.feature_positions() {
        let values = numeric_column(dataset, position)?;
        let stats = ColumnStats::of(&values);
        if stats.sd == 0.0 {
            continue;
        }
        if values
            .iter()
            .any(|&value| stats.is_outlier(value, config.outlier_sigmas))
        {
            features.insert(dataset.column_name(position));
        }
    }

    debug!("{} columns contain outliers", features.len());
    Ok(features)
}

/// Rows holding at least one outlier value under global statistics (check G).
///
/// A row is recorded at its first outlying column.
pub fn outlier_cases(dataset: &Dataset, config: &CheckConfig) -> Result<CaseSet> {
    let stats = column_stats(dataset)?;
    let mut cases = CaseSet::new();

    for row in dataset.rows() {
        for (position, column) in &stats {
            if column.sd == 0.0 {
                continue;
            }
            let Some(value) = row.number(*position)? else {
                continue;
            };
            if column.is_outlier(value, config.outlier_sigmas) {
                cases.insert(row.id());
                break;
            }
        }
    }

    debug!("{} rows contain global outliers", cases.len());
    Ok(cases)
}

/// Rows holding at least one outlier value under the statistics of their
/// own label class (check I).
///
/// A class with no values for a column has zero mean and deviation there,
/// which exempts the column for that class.
pub fn class_outlier_cases(dataset: &Dataset, config: &CheckConfig) -> Result<CaseSet> {
    let stats = class_stats(dataset)?;
    let mut cases = CaseSet::new();

    for row in dataset.rows() {
        let label = row.label();
        for (position, by_class) in &stats {
            let column = by_class.get(label).copied().unwrap_or_default();
            if column.sd == 0.0 {
                continue;
            }
            let Some(value) = row.number(*position)? else {
                continue;
            };
            if column.is_outlier(value, config.outlier_sigmas) {
                cases.insert(row.id());
                break;
            }
        }
    }

    debug!("{} rows contain class-conditional outliers", cases.len());
    Ok(cases)
}

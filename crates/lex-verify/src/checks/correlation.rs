//! Pairwise correlation check (B).

use crate::config::CheckConfig;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::stats::{numeric_column, pearson};
use crate::types::FeatureSet;
use tracing::debug;

/// Columns taking part in at least one strongly correlated pair (check B).
///
/// Both columns of a pair are reported when `|r|` strictly exceeds
/// `correlation_threshold`. Each column is reduced to its non-missing values
/// independently; a pair whose sequences end up with different lengths, or
/// where either is empty, is skipped.
pub fn correlated_features(dataset: &Dataset, config: &CheckConfig) -> Result<FeatureSet> {
    let columns = dataset
        .feature_positions()
        .map(|position| -> Result<_> {
            Ok((dataset.column_name(position), numeric_column(dataset, position)?))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut features = FeatureSet::new();
    for (i, (left, xs)) in columns.iter().enumerate() {
        for (right, ys) in &columns[i + 1..] {
            if xs.len() != ys.len() {
                debug!(
                    "Skipping {} x {}: {} vs {} non-missing values",
                    left,
                    right,
                    xs.len(),
                    ys.len()
                );
                continue;
            }
            if xs.is_empty() {
                continue;
            }

            let r = pearson(xs, ys);
            if r.abs() > config.correlation_threshold {
                debug!("{} x {}: r={:.4}", left, right, r);
                features.insert(*left);
                features.insert(*right);
            }
        }
    }

    Ok(features)
}

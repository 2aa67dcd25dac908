//! Statistics primitives shared by the checks.
//!
//! All functions degrade to `0.0` on empty input instead of failing, so
//! callers never have to special-case empty columns or empty classes.

use crate::dataset::{Dataset, Row};
use crate::error::Result;

/// Arithmetic mean. Returns `0.0` for an empty slice.
pub fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().sum::<f64>() / xs.len() as f64
}

/// Population standard deviation. Returns `0.0` for an empty slice.
pub fn population_sd(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    let mu = mean(xs);
    let variance = xs.iter().map(|x| (x - mu).powi(2)).sum::<f64>() / xs.len() as f64;
    variance.sqrt()
}

/// Pearson correlation coefficient of two equal-length sequences.
///
/// Returns `0.0` when either sequence is empty or has zero variance.
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    if xs.is_empty() || ys.is_empty() {
        return 0.0;
    }

    let mx = mean(xs);
    let my = mean(ys);

    let num: f64 = xs.iter().zip(ys).map(|(x, y)| (x - mx) * (y - my)).sum();
    let dx: f64 = xs.iter().map(|x| (x - mx).powi(2)).sum();
    let dy: f64 = ys.iter().map(|y| (y - my).powi(2)).sum();

    if dx == 0.0 || dy == 0.0 {
        return 0.0;
    }

    num / (dx * dy).sqrt()
}

/// Numeric values of column `position`, skipping missing fields.
pub fn numeric_column(dataset: &Dataset, position: usize) -> Result<Vec<f64>> {
    numeric_column_where(dataset, position, |_| true)
}

/// Numeric values of column `position` over the rows accepted by `keep`,
/// skipping missing fields.
pub fn numeric_column_where<F>(dataset: &Dataset, position: usize, keep: F) -> Result<Vec<f64>>
where
    F: Fn(&Row<'_>) -> bool,
{
    let mut values = Vec::with_capacity(dataset.height());
    for row in dataset.rows().filter(|row| keep(row)) {
        if let Some(value) = row.number(position)? {
            values.push(value);
        }
    }
    Ok(values)
}

/// Mean and population standard deviation of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ColumnStats {
    pub count: usize,
    pub mean: f64,
    pub sd: f64,
}

impl ColumnStats {
    pub fn of(xs: &[f64]) -> Self {
        Self {
            count: xs.len(),
            mean: mean(xs),
            sd: population_sd(xs),
        }
    }

    /// Whether `value` lies more than `sigmas` standard deviations from the mean.
    ///
    /// Zero-variance samples never produce outliers.
    #[inline]
    pub fn is_outlier(&self, value: f64, sigmas: f64) -> bool {
        self.sd > 0.0 && (value - self.mean).abs() > sigmas * self.sd
    }
}

//! Domain plausibility checks (E and K).
//!
//! Rule groups, in evaluation order:
//!
//! 1. every magnitude column (dimensions, area, pixel and transition counts,
//!    eccentricity) is strictly positive;
//! 2. the label is an integer within `label_min..=label_max`;
//! 3. `BLACKPIX <= BLACKAND`;
//! 4. `0 <= P_BLACK <= 1`;
//! 5. `0 <= P_AND <= 1`.
//!
//! Missing values are handled differently per mode. The feature check does
//! not evaluate rows with a missing value at all, while the case check
//! reports such rows outright without evaluating any rule. Both behaviors
//! are kept as they are; whether a missing value should count as
//! implausible in the feature check too is an open question for whoever
//! owns these rules.

use super::columns::{BLACKAND, BLACKPIX, MAGNITUDE_COLUMNS, P_AND, P_BLACK};
use super::rules::{self, CaseCollector, FeatureCollector, MissingPolicy, Rule, RuleContext};
use crate::config::CheckConfig;
use crate::dataset::{Dataset, Row};
use crate::error::Result;
use crate::types::{CaseSet, FeatureSet};
use tracing::debug;

const BLACKPIX_SLOT: usize = 5;
const BLACKAND_SLOT: usize = 6;

/// Numeric reading of the plausibility columns of one row.
#[derive(Debug, Clone, Copy)]
struct Reading {
    /// Values in [`MAGNITUDE_COLUMNS`] order.
    magnitudes: [f64; 9],
    /// `None` when the raw label is not a number.
    label: Option<f64>,
    p_black: f64,
    p_and: f64,
}

/// Header positions of the plausibility columns.
struct Layout {
    magnitudes: Vec<usize>,
    label: usize,
    p_black: usize,
    p_and: usize,
}

impl Layout {
    fn resolve(dataset: &Dataset) -> Result<Self> {
        Ok(Self {
            magnitudes: dataset.column_indices(&MAGNITUDE_COLUMNS)?,
            label: dataset.label_position(),
            p_black: dataset.column_index(P_BLACK)?,
            p_and: dataset.column_index(P_AND)?,
        })
    }

    fn read(&self, row: &Row<'_>) -> Result<Reading> {
        let mut magnitudes = [0.0; 9];
        for (slot, &position) in magnitudes.iter_mut().zip(&self.magnitudes) {
            *slot = row.required_number(position)?;
        }
        Ok(Reading {
            magnitudes,
            label: row.raw(self.label).trim().parse::<f64>().ok(),
            p_black: row.required_number(self.p_black)?,
            p_and: row.required_number(self.p_and)?,
        })
    }
}

fn positive_magnitudes<'a>(r: &Reading, _: &RuleContext<'a>, out: &mut Vec<&'a str>) {
    for (&column, &value) in MAGNITUDE_COLUMNS.iter().zip(&r.magnitudes) {
        if value <= 0.0 || value.is_nan() {
            out.push(column);
        }
    }
}

fn label_in_range<'a>(r: &Reading, ctx: &RuleContext<'a>, out: &mut Vec<&'a str>) {
    let (min, max) = (ctx.config.label_min as f64, ctx.config.label_max as f64);
    let valid = r
        .label
        .is_some_and(|label| label.fract() == 0.0 && (min..=max).contains(&label));
    if !valid {
        out.push(ctx.label_column);
    }
}

fn blackpix_within_blackand<'a>(r: &Reading, _: &RuleContext<'a>, out: &mut Vec<&'a str>) {
    if r.magnitudes[BLACKPIX_SLOT] > r.magnitudes[BLACKAND_SLOT] {
        out.extend([BLACKPIX, BLACKAND]);
    }
}

fn p_black_is_ratio<'a>(r: &Reading, _: &RuleContext<'a>, out: &mut Vec<&'a str>) {
    if !(0.0..=1.0).contains(&r.p_black) {
        out.push(P_BLACK);
    }
}

fn p_and_is_ratio<'a>(r: &Reading, _: &RuleContext<'a>, out: &mut Vec<&'a str>) {
    if !(0.0..=1.0).contains(&r.p_and) {
        out.push(P_AND);
    }
}

const RULE_GROUPS: [Rule<Reading>; 5] = [
    positive_magnitudes,
    label_in_range,
    blackpix_within_blackand,
    p_black_is_ratio,
    p_and_is_ratio,
];

/// Columns holding at least one implausible value (check E).
///
/// Rows with a missing value anywhere are skipped. Every violated rule of a
/// row contributes its columns.
pub fn plausibility_features(dataset: &Dataset, config: &CheckConfig) -> Result<FeatureSet> {
    let layout = Layout::resolve(dataset)?;
    let features = rules::evaluate(
        dataset,
        config,
        MissingPolicy::SkipRowIfAnyMissing,
        |row| layout.read(row),
        &RULE_GROUPS,
        FeatureCollector::default(),
    )?;
    debug!("Implausible values found in {} columns", features.len());
    Ok(features)
}

/// Rows holding at least one implausible value (check K).
///
/// A row with a missing value anywhere is reported without evaluating any
/// rule.
pub fn plausibility_cases(dataset: &Dataset, config: &CheckConfig) -> Result<CaseSet> {
    let layout = Layout::resolve(dataset)?;
    let cases = rules::evaluate(
        dataset,
        config,
        MissingPolicy::FlagRowIfAnyMissing,
        |row| layout.read(row),
        &RULE_GROUPS,
        CaseCollector::default(),
    )?;
    debug!("{} implausible rows", cases.len());
    Ok(cases)
}

//! Derived-value consistency checks (D and J).
//!
//! Four identities tie the geometry columns of a block together:
//!
//! | Identity                         | Guard      | Tolerance                |
//! |----------------------------------|------------|--------------------------|
//! | `AREA == HEIGHT * LENGHT`        | none       | exact                    |
//! | `ECCEN == LENGHT / HEIGHT`       | HEIGHT > 0 | `eccentricity_tolerance` |
//! | `P_BLACK == BLACKPIX / AREA`     | AREA > 0   | `ratio_tolerance`        |
//! | `P_AND == BLACKAND / AREA`       | AREA > 0   | `ratio_tolerance`        |
//!
//! The two modes do not skip the same rows. The feature check ignores a row
//! with a missing value in *any* column; the case check ignores it only when
//! one of the eight identity columns is missing. Both scopes are kept as-is.

use super::columns::{
    AREA, BLACKAND, BLACKPIX, ECCEN, GEOMETRY_COLUMNS, HEIGHT, LENGHT, P_AND, P_BLACK,
};
use super::rules::{self, CaseCollector, FeatureCollector, MissingPolicy, Rule, RuleContext};
use crate::config::CheckConfig;
use crate::dataset::{Dataset, Row};
use crate::error::Result;
use crate::types::{CaseSet, FeatureSet};
use tracing::debug;

/// Numeric reading of the identity columns of one row.
#[derive(Debug, Clone, Copy)]
struct Geometry {
    height: f64,
    length: f64,
    area: f64,
    eccentricity: f64,
    p_black: f64,
    p_and: f64,
    blackpix: f64,
    blackand: f64,
}

impl Geometry {
    /// `positions` follows [`GEOMETRY_COLUMNS`] order.
    fn read(row: &Row<'_>, positions: &[usize]) -> Result<Self> {
        Ok(Self {
            height: row.required_number(positions[0])?,
            length: row.required_number(positions[1])?,
            area: row.required_number(positions[2])?,
            eccentricity: row.required_number(positions[3])?,
            p_black: row.required_number(positions[4])?,
            p_and: row.required_number(positions[5])?,
            blackpix: row.required_number(positions[6])?,
            blackand: row.required_number(positions[7])?,
        })
    }
}

fn area_identity<'a>(g: &Geometry, _: &RuleContext<'a>, out: &mut Vec<&'a str>) {
    if g.area != g.height * g.length {
        out.extend([AREA, HEIGHT, LENGHT]);
    }
}

fn eccentricity_identity<'a>(g: &Geometry, ctx: &RuleContext<'a>, out: &mut Vec<&'a str>) {
    if g.height > 0.0
        && (g.eccentricity - g.length / g.height).abs() > ctx.config.eccentricity_tolerance
    {
        out.extend([ECCEN, LENGHT, HEIGHT]);
    }
}

fn black_ratio_identity<'a>(g: &Geometry, ctx: &RuleContext<'a>, out: &mut Vec<&'a str>) {
    if g.area > 0.0 && (g.p_black - g.blackpix / g.area).abs() > ctx.config.ratio_tolerance {
        out.extend([P_BLACK, BLACKPIX, AREA]);
    }
}

fn and_ratio_identity<'a>(g: &Geometry, ctx: &RuleContext<'a>, out: &mut Vec<&'a str>) {
    if g.area > 0.0 && (g.p_and - g.blackand / g.area).abs() > ctx.config.ratio_tolerance {
        out.extend([P_AND, BLACKAND, AREA]);
    }
}

const IDENTITIES: [Rule<Geometry>; 4] = [
    area_identity,
    eccentricity_identity,
    black_ratio_identity,
    and_ratio_identity,
];

/// Columns involved in at least one violated identity (check D).
///
/// Rows with a missing value in any column are not evaluated.
pub fn constraint_features(dataset: &Dataset, config: &CheckConfig) -> Result<FeatureSet> {
    let positions = dataset.column_indices(&GEOMETRY_COLUMNS)?;
    let features = rules::evaluate(
        dataset,
        config,
        MissingPolicy::SkipRowIfAnyMissing,
        |row| Geometry::read(row, &positions),
        &IDENTITIES,
        FeatureCollector::default(),
    )?;
    debug!("Identity violations implicate {} columns", features.len());
    Ok(features)
}

/// Rows violating at least one identity (check J).
///
/// Rows are skipped only when one of the identity columns is missing.
pub fn constraint_cases(dataset: &Dataset, config: &CheckConfig) -> Result<CaseSet> {
    let positions = dataset.column_indices(&GEOMETRY_COLUMNS)?;
    let cases = rules::evaluate(
        dataset,
        config,
        MissingPolicy::SkipRowIfFieldsMissing(&positions),
        |row| Geometry::read(row, &positions),
        &IDENTITIES,
        CaseCollector::default(),
    )?;
    debug!("{} rows violate an identity", cases.len());
    Ok(cases)
}

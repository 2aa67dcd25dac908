//! Column names of the page-block dataset the domain checks are written for.
//!
//! `LENGHT` is spelled the way the dataset header spells it.

pub const HEIGHT: &str = "HEIGHT";
pub const LENGHT: &str = "LENGHT";
pub const WIDTH: &str = "WIDTH";
pub const AREA: &str = "AREA";
pub const ECCEN: &str = "ECCEN";
pub const P_BLACK: &str = "P_BLACK";
pub const P_AND: &str = "P_AND";
pub const MEAN_TR: &str = "MEAN_TR";
pub const BLACKPIX: &str = "BLACKPIX";
pub const BLACKAND: &str = "BLACKAND";
pub const WB_TRANS: &str = "WB_TRANS";
pub const DATASET_ID: &str = "DATASET_ID";

/// Full feature identity of a block, in tuple order. Excludes the label.
pub const IDENTITY_COLUMNS: [&str; 12] = [
    HEIGHT, LENGHT, WIDTH, AREA, ECCEN, P_BLACK, P_AND, MEAN_TR, BLACKPIX, BLACKAND, WB_TRANS,
    DATASET_ID,
];

/// Columns used by the derived-value identities.
pub const GEOMETRY_COLUMNS: [&str; 8] = [
    HEIGHT, LENGHT, AREA, ECCEN, P_BLACK, P_AND, BLACKPIX, BLACKAND,
];

/// Columns that must be strictly positive.
pub const MAGNITUDE_COLUMNS: [&str; 9] = [
    HEIGHT, LENGHT, WIDTH, AREA, ECCEN, BLACKPIX, BLACKAND, MEAN_TR, WB_TRANS,
];

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Set of implicated column names, listed in lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureSet(BTreeSet<String>);

impl FeatureSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, column: impl Into<String>) -> bool {
        self.0.insert(column.into())
    }

    pub fn contains(&self, column: &str) -> bool {
        self.0.contains(column)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Column names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<S: Into<String>> Extend<S> for FeatureSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(Into::into));
    }
}

/// Set of implicated row identifiers, listed in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CaseSet(BTreeSet<usize>);

impl CaseSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, row_id: usize) -> bool {
        self.0.insert(row_id)
    }

    pub fn contains(&self, row_id: usize) -> bool {
        self.0.contains(&row_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Row identifiers in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<usize> for CaseSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<usize> for CaseSet {
    fn extend<I: IntoIterator<Item = usize>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

/// Whether a check reports columns or rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    Feature,
    Case,
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Granularity::Feature => write!(f, "feature"),
            Granularity::Case => write!(f, "case"),
        }
    }
}

/// Result of running one check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "granularity", content = "items", rename_all = "snake_case")]
pub enum CheckOutcome {
    Feature(FeatureSet),
    Case(CaseSet),
}

impl CheckOutcome {
    pub fn granularity(&self) -> Granularity {
        match self {
            CheckOutcome::Feature(_) => Granularity::Feature,
            CheckOutcome::Case(_) => Granularity::Case,
        }
    }

    /// Cardinality of the result set.
    pub fn len(&self) -> usize {
        match self {
            CheckOutcome::Feature(set) => set.len(),
            CheckOutcome::Case(set) => set.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Elements rendered as text, in output order.
    pub fn items(&self) -> Vec<String> {
        match self {
            CheckOutcome::Feature(set) => set.iter().map(str::to_string).collect(),
            CheckOutcome::Case(set) => set.iter().map(|id| id.to_string()).collect(),
        }
    }

    pub fn as_features(&self) -> Option<&FeatureSet> {
        match self {
            CheckOutcome::Feature(set) => Some(set),
            CheckOutcome::Case(_) => None,
        }
    }

    pub fn as_cases(&self) -> Option<&CaseSet> {
        match self {
            CheckOutcome::Case(set) => Some(set),
            CheckOutcome::Feature(_) => None,
        }
    }
}

impl From<FeatureSet> for CheckOutcome {
    fn from(set: FeatureSet) -> Self {
        CheckOutcome::Feature(set)
    }
}

impl From<CaseSet> for CheckOutcome {
    fn from(set: CaseSet) -> Self {
        CheckOutcome::Case(set)
    }
}

//! Row-rule driver shared by the constraint and plausibility checks.
//!
//! A rule inspects one typed reading of a row and pushes the columns it
//! implicates when violated. The same rule list serves both output modes;
//! a [`Collector`] decides whether a violation records columns (and keeps
//! going) or records the row identifier (and moves on to the next row).

use crate::config::CheckConfig;
use crate::dataset::{Dataset, Row};
use crate::error::Result;
use crate::types::{CaseSet, FeatureSet};
use tracing::trace;

/// Values a rule may consult besides the reading itself.
pub(crate) struct RuleContext<'a> {
    pub config: &'a CheckConfig,
    pub label_column: &'a str,
}

/// Pushes the implicated columns onto the buffer when the rule is violated.
pub(crate) type Rule<R> = for<'a> fn(&R, &RuleContext<'a>, &mut Vec<&'a str>);

/// Output-accumulation strategy for rule violations.
pub(crate) trait Collector {
    type Output;

    /// Record a violation in the row `row_id`.
    ///
    /// Returns `true` when the rest of the row need not be evaluated.
    fn record(&mut self, row_id: usize, columns: &[&str]) -> bool;

    fn finish(self) -> Self::Output;
}

/// Records every implicated column of every violation.
#[derive(Debug, Default)]
pub(crate) struct FeatureCollector {
    features: FeatureSet,
}

impl Collector for FeatureCollector {
    type Output = FeatureSet;

    fn record(&mut self, _row_id: usize, columns: &[&str]) -> bool {
        self.features.extend(columns.iter().copied());
        false
    }

    fn finish(self) -> FeatureSet {
        self.features
    }
}

/// Records the row on its first violation.
#[derive(Debug, Default)]
pub(crate) struct CaseCollector {
    cases: CaseSet,
}

impl Collector for CaseCollector {
    type Output = CaseSet;

    fn record(&mut self, row_id: usize, _columns: &[&str]) -> bool {
        self.cases.insert(row_id);
        true
    }

    fn finish(self) -> CaseSet {
        self.cases
    }
}

/// How rows with missing values are treated before any rule runs.
#[derive(Debug, Clone, Copy)]
pub(crate) enum MissingPolicy<'f> {
    /// Skip the row when any of its fields is missing.
    SkipRowIfAnyMissing,
    /// Skip the row when one of the listed fields is missing.
    SkipRowIfFieldsMissing(&'f [usize]),
    /// Record the row as a violation when any of its fields is missing.
    FlagRowIfAnyMissing,
}

/// Evaluate `rules` in order over every row of `dataset`.
///
/// `read` turns a row that passed the missing-value policy into the typed
/// reading the rules operate on.
pub(crate) fn evaluate<R, F, C>(
    dataset: &Dataset,
    config: &CheckConfig,
    policy: MissingPolicy<'_>,
    read: F,
    rules: &[Rule<R>],
    mut collector: C,
) -> Result<C::Output>
where
    F: Fn(&Row<'_>) -> Result<R>,
    C: Collector,
{
    let context = RuleContext {
        config,
        label_column: dataset.label_column(),
    };
    let mut implicated = Vec::new();

    for row in dataset.rows() {
        match policy {
            MissingPolicy::SkipRowIfAnyMissing if row.has_missing() => {
                trace!("Row {} skipped: missing value", row.id());
                continue;
            }
            MissingPolicy::SkipRowIfFieldsMissing(fields) if row.any_missing(fields) => {
                trace!("Row {} skipped: missing rule field", row.id());
                continue;
            }
            MissingPolicy::FlagRowIfAnyMissing if row.has_missing() => {
                collector.record(row.id(), &[]);
                continue;
            }
            _ => {}
        }

        let reading = read(&row)?;
        for rule in rules {
            implicated.clear();
            rule(&reading, &context, &mut implicated);
            if !implicated.is_empty() && collector.record(row.id(), &implicated) {
                break;
            }
        }
    }

    Ok(collector.finish())
}

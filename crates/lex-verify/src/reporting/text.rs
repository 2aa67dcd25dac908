use crate::types::CheckOutcome;
use std::fmt::Write;

/// Render an outcome as its cardinality followed by one element per line.
pub fn render_text(outcome: &CheckOutcome) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", outcome.len());
    for item in outcome.items() {
        let _ = writeln!(out, "{}", item);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CaseSet, FeatureSet};

    #[test]
    fn test_render_cases_numerically() {
        let cases: CaseSet = [12, 3, 100].into_iter().collect();
        assert_eq!(render_text(&cases.into()), "3\n3\n12\n100\n");
    }

    #[test]
    fn test_render_features_lexicographically() {
        let features: FeatureSet = ["WIDTH", "AREA", "P_AND"].into_iter().collect();
        assert_eq!(render_text(&features.into()), "3\nAREA\nP_AND\nWIDTH\n");
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_text(&CaseSet::new().into()), "0\n");
    }
}

//! Removes duplicate rules, keeping the last occurrence.

use ahash::AHashSet;

use super::{filter_with_comment_cascade, Transformation};

/// Deduplication stage.
///
/// The list is scanned from the end, so the last copy of a rule survives.
/// Comments that only annotated a removed copy go with it.
#[derive(Debug, Default, Clone, Copy)]
pub struct Deduplicate;

impl Transformation for Deduplicate {
    fn name(&self) -> &'static str {
        "deduplicate"
    }

    fn apply(&self, rules: Vec<String>) -> Vec<String> {
        let mut seen: AHashSet<String> = AHashSet::with_capacity(rules.len());
        filter_with_comment_cascade(rules, |line| !seen.insert(line.to_string()))
    }
}

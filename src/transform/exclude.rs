//! Removes rules matching user-supplied wildcard exclusions.

use super::{filter_with_comment_cascade, Transformation};
use crate::rule::is_comment;
use crate::wildcard::Wildcard;

/// Exclusion stage.
#[derive(Debug, Clone, Default)]
pub struct Exclude {
    patterns: Vec<Wildcard>,
}

impl Exclude {
    pub fn new(patterns: Vec<Wildcard>) -> Self {
        Self { patterns }
    }

    /// True if no exclusion is configured.
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    fn is_excluded(&self, line: &str) -> bool {
        !is_comment(line) && self.patterns.iter().any(|w| w.test(line))
    }
}

impl Transformation for Exclude {
    fn name(&self) -> &'static str {
        "exclude"
    }

    fn apply(&self, rules: Vec<String>) -> Vec<String> {
        if self.is_empty() {
            return rules;
        }
        filter_with_comment_cascade(rules, |line| self.is_excluded(line))
    }
}

//! Strips comment and blank lines.

use super::Transformation;
use crate::rule::is_comment;

/// Removes every comment and blank line.
#[derive(Debug, Default, Clone, Copy)]
pub struct RemoveComments;

impl Transformation for RemoveComments {
    fn name(&self) -> &'static str {
        "removecomments"
    }

    fn apply(&self, rules: Vec<String>) -> Vec<String> {
        rules.into_iter().filter(|rule| !is_comment(rule)).collect()
    }
}

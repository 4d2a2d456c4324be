//! Transformations applied to a rule list, one stage at a time.
//!
//! Every stage consumes the whole ordered list produced by the previous
//! stage and returns a new one.

mod compress;
mod deduplicate;
mod exclude;
mod remove_comments;
mod remove_modifiers;
mod validate;

pub use compress::{BlocklistRule, Compress};
pub use deduplicate::Deduplicate;
pub use exclude::Exclude;
pub use remove_comments::RemoveComments;
pub use remove_modifiers::{RemoveModifiers, REMOVED_MODIFIERS};
pub use validate::{is_valid, validate_rule, Validate, MIN_PATTERN_LENGTH, SUPPORTED_MODIFIERS};

use crate::rule::is_comment;

/// A single stage of the compiler pipeline.
pub trait Transformation: Send + Sync {
    /// Stage name used in log output.
    fn name(&self) -> &'static str;

    /// Transform the rule list.
    fn apply(&self, rules: Vec<String>) -> Vec<String>;
}

/// Drop the lines `discard` selects, together with the comments and blank
/// lines directly above each dropped line.
///
/// The list is scanned from the end. `discard` is called exactly once per
/// line, comments included, in that backward order, so it may keep state.
/// Comment and blank lines are never dropped by the predicate itself, only
/// by the cascade, which stops at the first kept rule.
pub fn filter_with_comment_cascade<F>(rules: Vec<String>, mut discard: F) -> Vec<String>
where
    F: FnMut(&str) -> bool,
{
    let mut kept = Vec::with_capacity(rules.len());
    let mut cascading = false;

    for line in rules.into_iter().rev() {
        let is_annotation = is_comment(&line);
        let drop = discard(&line);

        if drop && !is_annotation {
            cascading = true;
        } else if cascading && is_annotation {
            // orphaned comment
        } else {
            cascading = false;
            kept.push(line);
        }
    }

    kept.reverse();
    kept
}

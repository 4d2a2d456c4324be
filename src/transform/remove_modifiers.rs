//! Removes modifiers that mean nothing to a DNS-level blocker.

use super::Transformation;
use crate::rule::{is_comment, AdblockRule, Grammar};

/// Modifiers dropped from every rule (exact, case-sensitive names).
pub const REMOVED_MODIFIERS: &[&str] = &["third-party", "3p", "all", "document", "doc", "popup"];

/// Modifier stripping stage.
#[derive(Debug, Clone, Copy)]
pub struct RemoveModifiers<'g> {
    grammar: &'g Grammar,
}

impl<'g> RemoveModifiers<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        Self { grammar }
    }

    /// Strip irrelevant modifiers from one line.
    ///
    /// Comments come back trimmed. Lines that do not parse, or parse to an
    /// empty pattern, come back exactly as given.
    pub fn strip(&self, raw: &str) -> String {
        let line = raw.trim();
        if is_comment(line) {
            return line.to_string();
        }

        let mut rule = match AdblockRule::parse(line, self.grammar) {
            Ok(rule) if !rule.pattern.is_empty() => rule,
            _ => return raw.to_string(),
        };

        for name in REMOVED_MODIFIERS {
            rule.remove_modifier(name);
        }
        rule.to_string()
    }
}

impl Default for RemoveModifiers<'static> {
    fn default() -> Self {
        Self::new(Grammar::shared())
    }
}

impl Transformation for RemoveModifiers<'_> {
    fn name(&self) -> &'static str {
        "removemodifiers"
    }

    fn apply(&self, rules: Vec<String>) -> Vec<String> {
        rules.iter().map(|rule| self.strip(rule)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip(line: &str) -> String {
        RemoveModifiers::default().strip(line)
    }

    #[test]
    fn test_strip_third_party() {
        assert_eq!(strip("||example.com^$third-party,important"), "||example.com^$important");
    }

    #[test]
    fn test_strip_all_removed_modifiers() {
        assert_eq!(strip("||example.com^$3p,all,document,doc,popup"), "||example.com^");
        assert_eq!(strip("@@||example.com^$popup,3p,badfilter,3p"), "@@||example.com^$badfilter");
    }

    #[test]
    fn test_case_sensitive() {
        assert_eq!(strip("||example.com^$Third-Party"), "||example.com^$Third-Party");
    }

    #[test]
    fn test_untouched_rules() {
        assert_eq!(strip("||example.com^"), "||example.com^");
        assert_eq!(strip("  ||example.com^$important  "), "||example.com^$important");
        assert_eq!(strip("# comment "), "# comment");
    }

    #[test]
    fn test_empty_pattern_passes_through_once() {
        let out = RemoveModifiers::default().apply(vec!["$third-party".to_string(), "@@".to_string()]);
        assert_eq!(out, vec!["$third-party", "@@"]);
    }

    #[test]
    fn test_empty_pattern_kept_verbatim() {
        assert_eq!(strip("  $third-party "), "  $third-party ");
        assert_eq!(strip("@@\t"), "@@\t");
    }
}

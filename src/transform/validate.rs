//! Validation: drops malformed rules and rules that would block too much.

use super::{filter_with_comment_cascade, Transformation};
use crate::error::ValidationError;
use crate::rule::{is_comment, AdblockRule, EtcHostsRule, Grammar};

/// The only modifiers a DNS-level blocker understands.
pub const SUPPORTED_MODIFIERS: &[&str] = &["important", "~important", "badfilter", "ctag", "denyallow"];

/// Shortest accepted pattern, `||` and `^` included.
pub const MIN_PATTERN_LENGTH: usize = 5;

/// Check one line. Comments and blank lines are always valid.
///
/// Hosts records need every hostname to look like one. Adblock-style rules
/// need supported modifiers only, a pattern of at least
/// [`MIN_PATTERN_LENGTH`] characters made of domain characters and `*|^`
/// (regex patterns are exempt), and nothing but `|` after the `^` separator.
/// Hostnames are not checked against WHOIS or the public suffix list.
pub fn validate_rule(line: &str, grammar: &Grammar) -> Result<(), ValidationError> {
    if is_comment(line) {
        return Ok(());
    }

    if grammar.is_etc_hosts_rule(line) {
        validate_etc_hosts_rule(line, grammar)
    } else {
        validate_adblock_rule(line, grammar)
    }
}

/// True if [`validate_rule`] accepts the line.
pub fn is_valid(line: &str, grammar: &Grammar) -> bool {
    validate_rule(line, grammar).is_ok()
}

fn validate_hostname(hostname: &str, grammar: &Grammar) -> Result<(), ValidationError> {
    if grammar.is_hostname_shaped(hostname) {
        Ok(())
    } else {
        Err(ValidationError::InvalidHostnameShape(hostname.to_string()))
    }
}

fn validate_etc_hosts_rule(line: &str, grammar: &Grammar) -> Result<(), ValidationError> {
    let rule = EtcHostsRule::parse(line)?;
    rule.hostnames
        .iter()
        .try_for_each(|hostname| validate_hostname(hostname, grammar))
}

fn validate_adblock_rule(line: &str, grammar: &Grammar) -> Result<(), ValidationError> {
    let rule = AdblockRule::parse(line, grammar)?;
    let pattern = rule.pattern.as_str();

    if pattern.is_empty() {
        return Err(ValidationError::EmptyPattern);
    }

    if let Some(option) = rule
        .options
        .iter()
        .find(|o| !SUPPORTED_MODIFIERS.contains(&o.name.as_str()))
    {
        return Err(ValidationError::UnsupportedModifier(option.name.clone()));
    }

    if pattern.len() < MIN_PATTERN_LENGTH {
        return Err(ValidationError::TooNarrowPattern(pattern.len()));
    }

    // Regex rules may contain any characters.
    if rule.is_regex_pattern() {
        return Ok(());
    }

    let chars = pattern.strip_prefix("://").unwrap_or(pattern);
    if !grammar.has_pattern_chars_only(chars) {
        return Err(ValidationError::InvalidPatternCharacters);
    }

    let separator = pattern.find('^');
    let wildcard = pattern.find('*');

    if let (Some(sep), Some(star)) = (separator, wildcard) {
        // ||example.org^test*
        if star > sep {
            return Err(ValidationError::WildcardAfterAnchor);
        }

        if pattern.starts_with("||") {
            validate_hostname(&pattern[2..sep], grammar)?;

            // `^|` is the only thing allowed after the separator
            if pattern.as_bytes().get(sep + 1).is_some_and(|&c| c != b'|') {
                return Err(ValidationError::WildcardAfterAnchor);
            }
        }
    }

    Ok(())
}

/// Validation stage. Invalid rules are removed along with the comments
/// directly above them.
#[derive(Debug, Clone, Copy)]
pub struct Validate<'g> {
    grammar: &'g Grammar,
}

impl<'g> Validate<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        Self { grammar }
    }
}

impl Default for Validate<'static> {
    fn default() -> Self {
        Self::new(Grammar::shared())
    }
}

impl Transformation for Validate<'_> {
    fn name(&self) -> &'static str {
        "validate"
    }

    fn apply(&self, rules: Vec<String>) -> Vec<String> {
        filter_with_comment_cascade(rules, |line| match validate_rule(line, self.grammar) {
            Ok(()) => false,
            Err(e) => {
                log::debug!("validate - dropping {:?}: {}", line, e);
                true
            }
        })
    }
}

//! Adblock-style rule model: `[@@]pattern[$option1,option2=value]`.

use std::fmt;

use super::grammar::Grammar;
use super::tokenize::{escape_delimiter, find_options_separator, split_with_escape};
use super::{is_allow_rule, ALLOW_PREFIX};
use crate::error::RuleError;

const OPTIONS_DELIMITER: char = ',';
const ESCAPE_CHAR: char = '\\';

/// A single `name[=value]` modifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOption {
    pub name: String,
    pub value: Option<String>,
}

impl RuleOption {
    /// Parse one option token, splitting once on `=`.
    pub fn parse(token: &str) -> Self {
        match token.split_once('=') {
            Some((name, value)) => Self {
                name: name.to_string(),
                value: Some(value.to_string()),
            },
            None => Self {
                name: token.to_string(),
                value: None,
            },
        }
    }
}

impl fmt::Display for RuleOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&escape_delimiter(&self.name, OPTIONS_DELIMITER, ESCAPE_CHAR))?;
        if let Some(value) = &self.value {
            write!(f, "={}", escape_delimiter(value, OPTIONS_DELIMITER, ESCAPE_CHAR))?;
        }
        Ok(())
    }
}

/// Raw split of a rule line before options are tokenized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RuleTokens<'a> {
    pattern: &'a str,
    options: Option<&'a str>,
    is_allow_rule: bool,
}

/// A parsed adblock-style rule.
///
/// Options keep their parse order; names are not required to be unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdblockRule {
    /// The line this rule was parsed from
    pub rule_text: String,
    pub pattern: String,
    pub options: Vec<RuleOption>,
    pub is_allow_rule: bool,
    /// Set only when the pattern is exactly `||hostname^`
    pub hostname: Option<String>,
}

impl AdblockRule {
    /// Parse a rule line.
    ///
    /// Fails with [`RuleError::MalformedAdblockRule`] when nothing is left
    /// after the `@@` prefix. A rule consisting only of options (`$third-party`)
    /// parses successfully with an empty pattern.
    pub fn parse(line: &str, grammar: &Grammar) -> Result<Self, RuleError> {
        let tokens = tokenize(line.trim())?;

        let options: Vec<RuleOption> = tokens
            .options
            .map(|text| {
                split_with_escape(text, OPTIONS_DELIMITER, ESCAPE_CHAR, false)
                    .iter()
                    .map(|token| RuleOption::parse(token))
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            rule_text: line.to_string(),
            pattern: tokens.pattern.to_string(),
            options,
            is_allow_rule: tokens.is_allow_rule,
            hostname: grammar.host_anchor(tokens.pattern).map(str::to_string),
        })
    }

    /// True if the pattern is a `/regex/` literal.
    pub fn is_regex_pattern(&self) -> bool {
        is_regex_literal(&self.pattern)
    }

    /// First option with the given name.
    pub fn find_modifier(&self, name: &str) -> Option<&RuleOption> {
        self.options.iter().find(|o| o.name == name)
    }

    /// Remove every option with the given name. Returns true if any was removed.
    pub fn remove_modifier(&mut self, name: &str) -> bool {
        let before = self.options.len();
        self.options.retain(|o| o.name != name);
        self.options.len() != before
    }
}

impl fmt::Display for AdblockRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_allow_rule {
            f.write_str(ALLOW_PREFIX)?;
        }
        f.write_str(&self.pattern)?;

        for (i, option) in self.options.iter().enumerate() {
            f.write_str(if i == 0 { "$" } else { "," })?;
            write!(f, "{}", option)?;
        }
        Ok(())
    }
}

fn is_regex_literal(text: &str) -> bool {
    text.len() > 1 && text.starts_with('/') && text.ends_with('/')
}

/// Split a trimmed line into allow flag, pattern and raw options text.
fn tokenize(text: &str) -> Result<RuleTokens<'_>, RuleError> {
    let is_allow = is_allow_rule(text);
    let body = if is_allow {
        &text[ALLOW_PREFIX.len()..]
    } else {
        text
    };

    if body.is_empty() {
        return Err(RuleError::MalformedAdblockRule(text.to_string()));
    }

    let split = find_options_separator(body).map(|pos| (&body[..pos], &body[pos + 1..]));

    // A regex literal keeps its `$` anchors unless the tail is a `replace=` option.
    if is_regex_literal(body) {
        let replaces = matches!(split, Some((_, options)) if options.contains("replace="));
        if !replaces {
            return Ok(RuleTokens {
                pattern: body,
                options: None,
                is_allow_rule: is_allow,
            });
        }
    }

    Ok(match split {
        Some((pattern, options)) => RuleTokens {
            pattern,
            options: Some(options),
            is_allow_rule: is_allow,
        },
        None => RuleTokens {
            pattern: body,
            options: None,
            is_allow_rule: is_allow,
        },
    })
}

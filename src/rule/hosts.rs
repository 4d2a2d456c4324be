//! /etc/hosts records: `<address> host1 host2 ... [# comment]`.

use crate::error::RuleError;

/// A parsed /etc/hosts line. Always holds at least one hostname.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EtcHostsRule {
    /// The line this rule was parsed from
    pub rule_text: String,
    pub hostnames: Vec<String>,
}

impl EtcHostsRule {
    /// Parse a hosts line. The trailing `#...` is dropped and the first
    /// whitespace-separated token (the address) is skipped.
    pub fn parse(line: &str) -> Result<Self, RuleError> {
        let trimmed = line.trim();
        let without_comment = match trimmed.find('#') {
            Some(idx) => &trimmed[..idx],
            None => trimmed,
        };

        let hostnames: Vec<String> = without_comment
            .split_whitespace()
            .skip(1)
            .map(str::to_string)
            .collect();

        if hostnames.is_empty() {
            return Err(RuleError::MalformedEtcHostsRule(line.to_string()));
        }

        Ok(Self {
            rule_text: line.to_string(),
            hostnames,
        })
    }
}

//! Rule model and parser.
//!
//! A raw line is one of:
//! - a comment or blank line (`#`, `!`, `####`)
//! - an /etc/hosts record (`0.0.0.0 example.org`)
//! - a plain domain (`example.org`)
//! - an adblock-style rule (`@@||example.org^$important`)

mod adblock;
mod grammar;
mod hosts;
pub mod tokenize;

pub use adblock::{AdblockRule, RuleOption};
pub use grammar::Grammar;
pub use hosts::EtcHostsRule;

/// Prefix that marks an allow (whitelist) rule.
pub const ALLOW_PREFIX: &str = "@@";

/// True for blank lines and lines starting with `#`, `!` or `####`.
pub fn is_comment(line: &str) -> bool {
    line.trim().is_empty() || line.starts_with('#') || line.starts_with('!')
}

/// True if the line starts with `@@`.
pub fn is_allow_rule(line: &str) -> bool {
    line.starts_with(ALLOW_PREFIX)
}

/// Syntactic category of a raw line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKind {
    /// Comment or blank line
    Comment,
    /// /etc/hosts record
    EtcHosts,
    /// Bare domain name
    PlainDomain,
    /// Anything else is read as adblock syntax
    Adblock,
}

impl RuleKind {
    /// Classify a line. Hosts records take precedence over plain domains.
    pub fn of(line: &str, grammar: &Grammar) -> Self {
        if is_comment(line) {
            RuleKind::Comment
        } else if grammar.is_etc_hosts_rule(line) {
            RuleKind::EtcHosts
        } else if grammar.is_plain_domain(line) {
            RuleKind::PlainDomain
        } else {
            RuleKind::Adblock
        }
    }
}

//! Compression: converts rules to `||hostname^` form and drops the ones
//! already covered by a broader rule.
//!
//! `0.0.0.0 example.org` becomes `||example.org^`. Since `||example.org^`
//! blocks `example.org` and all of its subdomains, a later (or earlier)
//! `||ads.example.org^` adds nothing and is discarded.

use ahash::AHashSet;

use super::Transformation;
use crate::rule::{AdblockRule, EtcHostsRule, Grammar, RuleKind};

/// Intermediate form of a rule during compression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlocklistRule {
    /// Text to emit
    pub rule_text: String,
    /// Set iff the rule is a plain host block that may be compressed
    pub hostname: Option<String>,
    pub original_rule_text: String,
}

impl BlocklistRule {
    fn host_block(hostname: &str, original: &str) -> Self {
        Self {
            rule_text: format!("||{}^", hostname),
            hostname: Some(hostname.to_string()),
            original_rule_text: original.to_string(),
        }
    }

    fn verbatim(original: &str) -> Self {
        Self {
            rule_text: original.to_string(),
            hostname: None,
            original_rule_text: original.to_string(),
        }
    }

    /// True if the rule takes part in hostname compression.
    pub fn can_compress(&self) -> bool {
        self.hostname.is_some()
    }

    /// Convert one raw line into blocklist rules.
    ///
    /// Hosts records yield one rule per hostname, or none if the record
    /// has no hostname. Plain domains and option-less `||hostname^` block
    /// rules are compressible; everything else is kept verbatim.
    /// Surrounding whitespace is ignored.
    pub fn from_line(line: &str, grammar: &Grammar) -> Vec<Self> {
        let line = line.trim();
        match RuleKind::of(line, grammar) {
            RuleKind::EtcHosts => match EtcHostsRule::parse(line) {
                Ok(hosts) => hosts
                    .hostnames
                    .iter()
                    .map(|hostname| Self::host_block(hostname, line))
                    .collect(),
                Err(e) => {
                    log::debug!("compress - dropping: {}", e);
                    Vec::new()
                }
            },
            RuleKind::PlainDomain => vec![Self::host_block(line, line)],
            RuleKind::Adblock => match AdblockRule::parse(line, grammar) {
                Ok(rule) if !rule.is_allow_rule && rule.options.is_empty() => match rule.hostname {
                    Some(hostname) => vec![Self {
                        rule_text: line.to_string(),
                        hostname: Some(hostname),
                        original_rule_text: line.to_string(),
                    }],
                    None => vec![Self::verbatim(line)],
                },
                _ => vec![Self::verbatim(line)],
            },
            RuleKind::Comment => vec![Self::verbatim(line)],
        }
    }
}

/// Every proper parent of `hostname`: `a.b.com` yields `b.com`, `com`.
fn parent_domains(hostname: &str) -> impl Iterator<Item = &str> {
    hostname.match_indices('.').map(move |(i, _)| &hostname[i + 1..])
}

/// Compression stage.
#[derive(Debug, Clone, Copy)]
pub struct Compress<'g> {
    grammar: &'g Grammar,
}

impl<'g> Compress<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        Self { grammar }
    }
}

impl Default for Compress<'static> {
    fn default() -> Self {
        Self::new(Grammar::shared())
    }
}

impl Transformation for Compress<'_> {
    fn name(&self) -> &'static str {
        "compress"
    }

    fn apply(&self, rules: Vec<String>) -> Vec<String> {
        let mut by_hostname: AHashSet<String> = AHashSet::new();
        let mut filtered: Vec<BlocklistRule> = Vec::with_capacity(rules.len());

        // Convert and drop exact hostname duplicates, first occurrence wins.
        for line in &rules {
            for rule in BlocklistRule::from_line(line, self.grammar) {
                match &rule.hostname {
                    Some(hostname) => {
                        if by_hostname.insert(hostname.clone()) {
                            filtered.push(rule);
                        }
                    }
                    None => filtered.push(rule),
                }
            }
        }

        // Drop rules covered by a rule for one of their parent domains.
        filtered.retain(|rule| match &rule.hostname {
            Some(hostname) => !parent_domains(hostname).any(|parent| by_hostname.contains(parent)),
            None => true,
        });

        filtered.into_iter().map(|rule| rule.rule_text).collect()
    }
}

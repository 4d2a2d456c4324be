//! Compiled patterns for the rule grammar.

use once_cell::sync::Lazy;
use regex::Regex;

/// Dot-joined labels of 1-63 alphanumerics/hyphens, no hyphen at either end.
const PLAIN_DOMAIN: &str = r"^([0-9A-Za-z](?:[0-9A-Za-z-]{0,61}[0-9A-Za-z])?)(\.[0-9A-Za-z](?:[0-9A-Za-z-]{0,61}[0-9A-Za-z])?)*$";

/// `<address>[%zone] <names...> [#comment]`
const ETC_HOSTS: &str = r"^([a-f0-9.:\]\[]+)(%[a-z0-9]+)?\s+([^#]+)(#.*)?$";

/// `||hostname^`
const HOST_ANCHOR: &str = r"^\|\|([a-z0-9.-]+)\^$";

/// Searched, not anchored: a hostname is accepted if it contains a dotted name.
const HOSTNAME_SHAPE: &str = r"(?:[a-z0-9](?:[a-z0-9-]{0,61}[a-z0-9])?\.)+[a-z0-9][a-z0-9-]{0,61}[a-z0-9]";

/// Domain name characters plus the `*`, `|` and `^` specials.
const PATTERN_CHARS: &str = r"^[a-zA-Z0-9\-.*|^]+$";

static PLAIN_DOMAIN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(PLAIN_DOMAIN).unwrap());
static ETC_HOSTS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(ETC_HOSTS).unwrap());
static HOST_ANCHOR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(HOST_ANCHOR).unwrap());
static HOSTNAME_SHAPE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(HOSTNAME_SHAPE).unwrap());
static PATTERN_CHARS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(PATTERN_CHARS).unwrap());

static SHARED: Lazy<Grammar> = Lazy::new(Grammar::new);

/// The fixed regular expressions used by the parser and the validator.
///
/// Build one with [`Grammar::new`] or borrow the process-wide instance
/// from [`Grammar::shared`], then pass it to the functions that need it.
#[derive(Debug, Clone)]
pub struct Grammar {
    plain_domain: Regex,
    etc_hosts: Regex,
    host_anchor: Regex,
    hostname_shape: Regex,
    pattern_chars: Regex,
}

impl Grammar {
    /// A grammar backed by the patterns compiled on first use.
    pub fn new() -> Self {
        Self {
            plain_domain: PLAIN_DOMAIN_RE.clone(),
            etc_hosts: ETC_HOSTS_RE.clone(),
            host_anchor: HOST_ANCHOR_RE.clone(),
            hostname_shape: HOSTNAME_SHAPE_RE.clone(),
            pattern_chars: PATTERN_CHARS_RE.clone(),
        }
    }

    /// Process-wide grammar, compiled on first use.
    pub fn shared() -> &'static Grammar {
        &SHARED
    }

    /// True if the line is a bare domain name such as `example.org`.
    pub fn is_plain_domain(&self, line: &str) -> bool {
        line.contains('.') && self.plain_domain.is_match(line)
    }

    /// True if the line has the shape of an /etc/hosts record.
    pub fn is_etc_hosts_rule(&self, line: &str) -> bool {
        self.etc_hosts.is_match(line)
    }

    /// Hostname of a `||hostname^` pattern.
    pub fn host_anchor<'a>(&self, pattern: &'a str) -> Option<&'a str> {
        self.host_anchor
            .captures(pattern)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }

    /// Loose hostname check used by the validator.
    pub fn is_hostname_shaped(&self, hostname: &str) -> bool {
        self.hostname_shape.is_match(hostname)
    }

    /// True if every character may appear in a domain-blocking pattern.
    pub fn has_pattern_chars_only(&self, pattern: &str) -> bool {
        self.pattern_chars.is_match(pattern)
    }
}

impl Default for Grammar {
    fn default() -> Self {
        Self::new()
    }
}

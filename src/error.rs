//! Error types for hostlist-compiler.

use thiserror::Error;

/// Error type for compiler operations.
///
/// Only source loading and output writing can fail; the rule pipeline
/// itself never returns an error.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Download error
    #[error("download error: {0}")]
    Download(#[from] reqwest::Error),

    /// Remote source answered with a non-success status
    #[error("unable to download {source_url}: HTTP {status}")]
    HttpStatus { source_url: String, status: u16 },

    /// Source is neither a URL nor an existing file
    #[error("invalid URL or file path: {0}")]
    InvalidSource(String),

    /// Wildcard pattern could not be compiled
    #[error("invalid wildcard {pattern:?}: {reason}")]
    InvalidWildcard { pattern: String, reason: String },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for compiler operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for rule parsing.
///
/// Both variants describe a single bad line and are recoverable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    /// No hostnames left after removing the address and trailing comment
    #[error("invalid /etc/hosts rule: {0}")]
    MalformedEtcHostsRule(String),

    /// Nothing left after removing the `@@` prefix
    #[error("the rule is too short: {0}")]
    MalformedAdblockRule(String),
}

/// Reason a rule was rejected by the validator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Pattern is empty
    #[error("empty pattern")]
    EmptyPattern,

    /// Modifier outside of the supported set
    #[error("unsupported modifier: {0}")]
    UnsupportedModifier(String),

    /// Pattern would block too much
    #[error("pattern is too wide ({0} characters)")]
    TooNarrowPattern(usize),

    /// Pattern contains characters that cannot appear in a domain rule
    #[error("pattern contains invalid characters")]
    InvalidPatternCharacters,

    /// A `*` follows the `^` separator, or junk follows `^`
    #[error("wildcard or text after the separator")]
    WildcardAfterAnchor,

    /// Hostname does not look like a hostname
    #[error("invalid hostname: {0}")]
    InvalidHostnameShape(String),

    /// Rule could not be parsed at all
    #[error(transparent)]
    Malformed(#[from] RuleError),
}

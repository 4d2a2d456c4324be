//! hostlist-compiler - builds compact DNS blocklists from filter lists.
//!
//! This crate takes adblock-style filter rules and /etc/hosts entries,
//! normalizes them and reduces them to a minimal, valid, deduplicated
//! blocklist.
//!
//! # Pipeline
//!
//! 1. **Remove comments**: blank lines and `!`/`#` comments are dropped
//! 2. **Compress**: hosts records and plain domains become `||host^`, and
//!    rules covered by a rule for a parent domain are discarded
//! 3. **Remove modifiers**: `third-party`, `3p`, `all`, `document`, `doc`
//!    and `popup` are stripped
//! 4. **Validate**: unsupported modifiers, too wide patterns and
//!    malformed rules are dropped together with their comments
//! 5. **Deduplicate**: exact duplicates are removed, last copy wins
//!
//! # Quick Start
//!
//! ```
//! use hostlist_compiler::run_pipeline;
//!
//! let input = vec![
//!     "0.0.0.0 ads.example.com".to_string(),
//!     "||example.com^".to_string(),
//!     "||example.com^$third-party".to_string(),
//! ];
//! assert_eq!(run_pipeline(input), vec!["||example.com^"]);
//! ```
//!
//! # Sources
//!
//! ```ignore
//! use hostlist_compiler::{compile_sources, HttpFetcher, Pipeline};
//!
//! let fetcher = HttpFetcher::new()?;
//! let sources = vec!["https://example.org/hosts.txt".to_string()];
//! let rules = compile_sources(&sources, &fetcher, &Pipeline::new())?;
//! ```

mod error;

pub mod config;
pub mod pipeline;
pub mod rule;
pub mod source;
pub mod transform;
pub mod wildcard;

// Re-export core types
pub use error::{Error, Result, RuleError, ValidationError};
pub use rule::{is_allow_rule, is_comment, AdblockRule, EtcHostsRule, Grammar, RuleKind, RuleOption};
pub use wildcard::Wildcard;

// Re-export pipeline API
pub use config::CompilerConfig;
pub use pipeline::{compile_sources, dedupe_sources, run_pipeline, Pipeline};
pub use source::{HttpFetcher, SourceFetcher};
pub use transform::{is_valid, validate_rule, Transformation};

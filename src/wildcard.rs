//! Wildcard patterns used to exclude rules from the output.
//!
//! Three flavours are supported:
//! - `/regex/` - a regular expression (search semantics)
//! - `ads*.example.org` - `*` matches any run of characters, anchored at both ends
//! - `example.org` - plain substring match

use std::fmt;

use regex::Regex;

use crate::error::{Error, Result};

/// A compiled wildcard pattern.
#[derive(Debug, Clone)]
pub struct Wildcard {
    regex: Option<Regex>,
    plain: String,
}

impl Wildcard {
    /// Compile a wildcard. Empty patterns are rejected.
    ///
    /// # Example
    /// ```
    /// use hostlist_compiler::Wildcard;
    ///
    /// let w = Wildcard::new("||ads*^").unwrap();
    /// assert!(w.test("||ads.example.org^"));
    /// assert!(!w.test("||example.org^"));
    /// ```
    pub fn new(pattern: &str) -> Result<Self> {
        if pattern.is_empty() {
            return Err(Error::InvalidWildcard {
                pattern: String::new(),
                reason: "wildcard cannot be empty".to_string(),
            });
        }

        let source = if pattern.len() > 2 && pattern.starts_with('/') && pattern.ends_with('/') {
            Some(pattern[1..pattern.len() - 1].to_string())
        } else if pattern.contains('*') {
            let escaped: Vec<String> = pattern.split('*').map(regex::escape).collect();
            Some(format!("^{}$", escaped.join(".*")))
        } else {
            None
        };

        let regex = source
            .map(|src| Regex::new(&src))
            .transpose()
            .map_err(|e| Error::InvalidWildcard {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            regex,
            plain: pattern.to_string(),
        })
    }

    /// True if `text` matches.
    pub fn test(&self, text: &str) -> bool {
        match &self.regex {
            Some(re) => re.is_match(text),
            None => text.contains(&self.plain),
        }
    }

    /// The pattern as written.
    pub fn as_str(&self) -> &str {
        &self.plain
    }
}

impl fmt::Display for Wildcard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.plain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_is_substring() {
        let w = Wildcard::new("example").unwrap();
        assert!(w.test("||example.org^"));
        assert!(w.test("example"));
        assert!(!w.test("||exampl.org^"));
    }

    #[test]
    fn test_star_is_anchored() {
        let w = Wildcard::new("*.example.org").unwrap();
        assert!(w.test("ads.example.org"));
        assert!(w.test(".example.org"));
        assert!(!w.test("ads.example.org.evil"));
        assert!(!w.test("example.org"));
    }

    #[test]
    fn test_star_escapes_metacharacters() {
        let w = Wildcard::new("||ads*^$third-party").unwrap();
        assert!(w.test("||ads.example.org^$third-party"));
        assert!(!w.test("||adsXexample.org^third-party"));
    }

    #[test]
    fn test_regex() {
        let w = Wildcard::new(r"/^\|\|ads[0-9]+\./").unwrap();
        assert!(w.test("||ads12.example.org^"));
        assert!(!w.test("||ads.example.org^"));
    }

    #[test]
    fn test_short_slash_pattern_is_plain() {
        let w = Wildcard::new("//").unwrap();
        assert!(w.test("https://example.org"));
        assert!(!w.test("example.org"));
    }

    #[test]
    fn test_invalid() {
        assert!(matches!(Wildcard::new(""), Err(Error::InvalidWildcard { .. })));
        assert!(matches!(Wildcard::new("/(unclosed/"), Err(Error::InvalidWildcard { .. })));
    }

    #[test]
    fn test_display() {
        let w = Wildcard::new("*.example.org").unwrap();
        assert_eq!(w.to_string(), "*.example.org");
        assert_eq!(w.as_str(), "*.example.org");
    }
}

//! YAML configuration for a compilation run.
//!
//! ```yaml
//! name: my blocklist
//! sources:
//!   - https://example.org/hosts.txt
//!   - lists/local.txt
//! exclusions:
//!   - "*.example.com^"
//! timeout_secs: 30
//! ```

use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::wildcard::Wildcard;

fn default_timeout_secs() -> u64 {
    60
}

/// Compiler configuration.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CompilerConfig {
    /// Name of the resulting list, for logging only
    #[serde(default)]
    pub name: Option<String>,
    /// Source URLs or paths, in order
    #[serde(default)]
    pub sources: Vec<String>,
    /// Wildcard patterns for rules to leave out
    #[serde(default)]
    pub exclusions: Vec<String>,
    /// Timeout for each remote source
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            name: None,
            sources: Vec::new(),
            exclusions: Vec::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl CompilerConfig {
    /// Parse a configuration from YAML text.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: CompilerConfig = serde_yaml::from_str(content)?;
        if config.timeout_secs == 0 {
            return Err(Error::Config("timeout_secs must be greater than 0".to_string()));
        }
        Ok(config)
    }

    /// Load a configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        Self::from_yaml(&fs::read_to_string(path)?)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Compile the exclusion patterns.
    pub fn exclusion_wildcards(&self) -> Result<Vec<Wildcard>> {
        self.exclusions.iter().map(|p| Wildcard::new(p)).collect()
    }
}

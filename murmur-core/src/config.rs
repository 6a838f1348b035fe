//! Analysis configuration.
//!
//! Loaded from YAML. Every field is optional:
//!
//! ```yaml
//! top_k: 10
//! failure_policy: isolate   # or: abort
//! stop_words: ./stopwords.txt
//! lexicon: ./vader_lexicon.txt
//! max_text_len: 65535
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use murmur_types::DEFAULT_TOP_K;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sentiment::vader::DEFAULT_MAX_TEXT_LEN;
use crate::sentiment::LexiconError;

/// What to do when the analyzer fails on one comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Record a neutral placeholder row and keep going.
    #[default]
    Isolate,
    /// Stop the whole batch at the first failure.
    Abort,
}

/// Errors raised while loading or applying configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        /// Config path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// The YAML did not match the expected shape.
    #[error("invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),
    /// A value is out of range.
    #[error("invalid config value for {field}: {reason}")]
    Invalid {
        /// Offending field.
        field: &'static str,
        /// Why it was rejected.
        reason: &'static str,
    },
    /// The stop-word file could not be read.
    #[error("failed to load stop words from {}: {source}", path.display())]
    StopWords {
        /// Stop-word path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// The lexicon could not be loaded.
    #[error("failed to load lexicon from {}: {source}", path.display())]
    Lexicon {
        /// Lexicon path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: LexiconError,
    },
}

/// Tunables of a [`Pipeline`](crate::pipeline::Pipeline).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Entries in the frequent-word table.
    pub top_k: usize,
    /// Handling of per-comment analyzer failures.
    pub failure_policy: FailurePolicy,
    /// Custom stop-word list; the built-in English list when absent.
    pub stop_words: Option<PathBuf>,
    /// Custom valence lexicon; the built-in lexicon when absent.
    pub lexicon: Option<PathBuf>,
    /// Largest text, in bytes, the analyzer accepts.
    pub max_text_len: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            failure_policy: FailurePolicy::Isolate,
            stop_words: None,
            lexicon: None,
            max_text_len: DEFAULT_MAX_TEXT_LEN,
        }
    }
}

impl AnalysisConfig {
    /// Parses and validates YAML text.
    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = if text.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(text)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a YAML file.
    ///
    /// Relative `stop_words` and `lexicon` paths resolve against the config
    /// file's directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_yaml_str(&text)?;

        if let Some(base) = path.parent() {
            config.stop_words = config.stop_words.map(|p| resolve(base, p));
            config.lexicon = config.lexicon.map(|p| resolve(base, p));
        }
        Ok(config)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.top_k == 0 {
            return Err(ConfigError::Invalid {
                field: "top_k",
                reason: "must be at least 1",
            });
        }
        if self.max_text_len == 0 {
            return Err(ConfigError::Invalid {
                field: "max_text_len",
                reason: "must be greater than 0",
            });
        }
        Ok(())
    }
}

fn resolve(base: &Path, path: PathBuf) -> PathBuf {
    if path.is_relative() {
        base.join(path)
    } else {
        path
    }
}

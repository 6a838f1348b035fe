//! Valence lexicon.
//!
//! Files use the `vader_lexicon.txt` layout: one entry per line, tab
//! separated, token first and mean valence second. Any further columns
//! (standard deviation, raw ratings) are ignored, so the full upstream VADER
//! lexicon loads unchanged.

use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::debug;

const ENGLISH_TSV: &str = include_str!("../../resources/lexicon_en.tsv");

static ENGLISH: Lazy<Arc<Lexicon>> = Lazy::new(|| {
    Arc::new(Lexicon::parse(ENGLISH_TSV).expect("embedded lexicon is well formed"))
});

/// Errors produced while reading a lexicon.
#[derive(Debug, Error)]
pub enum LexiconError {
    /// The file could not be read.
    #[error("failed to read lexicon: {0}")]
    Io(#[from] io::Error),
    /// A line did not have a token and a numeric valence.
    #[error("malformed lexicon entry on line {line}: {reason}")]
    Malformed {
        /// One-based line number.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },
}

/// Read-only map from lowercase token to valence.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    valences: FxHashMap<Box<str>, f64>,
}

impl Lexicon {
    /// Built-in compact English lexicon, shared.
    pub fn english() -> Arc<Lexicon> {
        Arc::clone(&ENGLISH)
    }

    /// Parses lexicon text. Blank lines and `#` comments are skipped.
    pub fn parse(text: &str) -> Result<Self, LexiconError> {
        let mut valences = FxHashMap::default();

        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim_end();
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }

            let mut cols = line.split('\t');
            let token = cols.next().map(str::trim).unwrap_or_default();
            if token.is_empty() {
                return Err(LexiconError::Malformed {
                    line: idx + 1,
                    reason: "missing token".to_owned(),
                });
            }

            let valence = cols
                .next()
                .ok_or_else(|| LexiconError::Malformed {
                    line: idx + 1,
                    reason: "missing valence column".to_owned(),
                })?
                .trim()
                .parse::<f64>()
                .map_err(|e| LexiconError::Malformed {
                    line: idx + 1,
                    reason: e.to_string(),
                })?;

            valences.insert(token.to_lowercase().into_boxed_str(), valence);
        }

        Ok(Self { valences })
    }

    /// Loads a lexicon file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LexiconError> {
        let path = path.as_ref();
        let lexicon = Self::parse(&fs::read_to_string(path)?)?;
        debug!(path = %path.display(), entries = lexicon.len(), "loaded lexicon");
        Ok(lexicon)
    }

    /// Valence of a lowercase token.
    #[inline]
    pub fn get(&self, token: &str) -> Option<f64> {
        self.valences.get(token).copied()
    }

    /// Returns `true` if the token has a valence.
    #[inline]
    pub fn contains(&self, token: &str) -> bool {
        self.valences.contains_key(token)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.valences.len()
    }

    /// Returns `true` for an empty lexicon.
    pub fn is_empty(&self) -> bool {
        self.valences.is_empty()
    }
}

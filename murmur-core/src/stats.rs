//! Corpus statistics.

use serde::{Deserialize, Serialize};

use crate::frequency::WordCounter;

/// A snapshot of what one analysis run processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CorpusStats {
    /// Number of comments analyzed.
    pub comments: usize,
    /// Tokens left after cleaning, duplicates included.
    pub tokens: usize,
    /// Distinct tokens after cleaning.
    pub distinct_tokens: usize,
    /// Comments whose cleaned text was empty.
    pub empty_comments: usize,
    /// Rows recorded as neutral placeholders after a scoring failure.
    pub failed_rows: usize,
}

impl CorpusStats {
    /// Constructs stats from a finished counter.
    pub fn from_counter(
        counter: &WordCounter,
        comments: usize,
        empty_comments: usize,
        failed_rows: usize,
    ) -> Self {
        Self {
            comments,
            tokens: counter.total_tokens(),
            distinct_tokens: counter.distinct_tokens(),
            empty_comments,
            failed_rows,
        }
    }

    /// Average tokens per comment, zero when there are no comments.
    pub fn tokens_per_comment(&self) -> f64 {
        if self.comments == 0 {
            0.0
        } else {
            self.tokens as f64 / self.comments as f64
        }
    }
}

impl core::fmt::Display for CorpusStats {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{} comments, {} tokens, {} distinct",
            self.comments, self.tokens, self.distinct_tokens
        )?;

        if self.empty_comments > 0 {
            write!(f, ", {} empty after cleaning", self.empty_comments)?;
        }
        if self.failed_rows > 0 {
            write!(f, ", {} failed", self.failed_rows)?;
        }

        Ok(())
    }
}

//! Sentiment scoring.
//!
//! - **PolarityAnalyzer**: the seam for any engine that turns text into
//!   [`PolarityScores`]
//! - **LexiconAnalyzer**: the built-in VADER-style engine
//! - **SentimentScorer**: applies the fixed label thresholds to an engine's
//!   compound score

pub mod lexicon;
pub mod vader;

use std::fmt;
use std::sync::Arc;

use murmur_types::{PolarityError, PolarityScores, SentimentResult};

pub use lexicon::{Lexicon, LexiconError};
pub use vader::LexiconAnalyzer;

/// Something that can score the polarity of a text.
///
/// Implementations must be reentrant: the pipeline shares one instance
/// across every comment.
pub trait PolarityAnalyzer: Send + Sync {
    /// Scores `text`.
    fn polarity_scores(&self, text: &str) -> Result<PolarityScores, PolarityError>;

    /// Compound score only.
    fn compound(&self, text: &str) -> Result<f64, PolarityError> {
        self.polarity_scores(text).map(|s| s.compound)
    }
}

/// Maps text to a [`SentimentResult`] through a shared analyzer.
///
/// ```
/// use murmur_core::sentiment::SentimentScorer;
/// use murmur_types::Sentiment;
///
/// let scorer = SentimentScorer::default();
/// assert_eq!(scorer.score("love").unwrap().label, Sentiment::Positive);
/// assert_eq!(scorer.score("").unwrap().label, Sentiment::Neutral);
/// ```
#[derive(Clone)]
pub struct SentimentScorer {
    analyzer: Arc<dyn PolarityAnalyzer>,
}

impl Default for SentimentScorer {
    fn default() -> Self {
        Self::new(Arc::new(LexiconAnalyzer::default()))
    }
}

impl fmt::Debug for SentimentScorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SentimentScorer").finish_non_exhaustive()
    }
}

impl SentimentScorer {
    /// Wraps an analyzer.
    pub fn new(analyzer: Arc<dyn PolarityAnalyzer>) -> Self {
        Self { analyzer }
    }

    /// Scores `text` and labels it.
    pub fn score(&self, text: &str) -> Result<SentimentResult, PolarityError> {
        self.analyzer
            .compound(text)
            .map(SentimentResult::from_compound)
    }

    /// Full analyzer output for `text`.
    pub fn polarity_scores(&self, text: &str) -> Result<PolarityScores, PolarityError> {
        self.analyzer.polarity_scores(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use murmur_types::Sentiment;

    /// Returns the same compound for every text.
    struct Fixed(f64);

    impl PolarityAnalyzer for Fixed {
        fn polarity_scores(&self, _text: &str) -> Result<PolarityScores, PolarityError> {
            Ok(PolarityScores {
                compound: self.0,
                ..PolarityScores::default()
            })
        }
    }

    fn label_for(compound: f64) -> Sentiment {
        SentimentScorer::new(Arc::new(Fixed(compound)))
            .score("anything")
            .unwrap()
            .label
    }

    #[test]
    fn boundary_labels() {
        assert_eq!(label_for(0.05), Sentiment::Positive);
        assert_eq!(label_for(-0.05), Sentiment::Negative);
        assert_eq!(label_for(0.0), Sentiment::Neutral);
        assert_eq!(label_for(0.049_999), Sentiment::Neutral);
        assert_eq!(label_for(-0.049_999), Sentiment::Neutral);
    }

    #[test]
    fn score_keeps_compound() {
        let r = SentimentScorer::new(Arc::new(Fixed(-0.42)))
            .score("x")
            .unwrap();
        assert_eq!(r.compound, -0.42);
        assert_eq!(r.label, Sentiment::Negative);
    }

    #[test]
    fn default_scorer_uses_lexicon() {
        let scorer = SentimentScorer::default();
        assert_eq!(scorer.score("love").unwrap().label, Sentiment::Positive);
        assert_eq!(scorer.score("hate").unwrap().label, Sentiment::Negative);
        assert_eq!(scorer.score("chair").unwrap().label, Sentiment::Neutral);
    }

    #[test]
    fn errors_propagate() {
        let scorer = SentimentScorer::new(Arc::new(
            LexiconAnalyzer::default().with_max_text_len(3),
        ));
        assert!(matches!(
            scorer.score("lovely"),
            Err(PolarityError::TooLong { .. })
        ));
    }
}

//! Comment analysis pipeline.
//!
//! Per comment: clean, then score the cleaned text. Across comments: count
//! cleaned tokens for the frequent-word table and tally labels for the
//! distribution chart. Rows are independent of each other and keep input
//! order.

use std::sync::Arc;

use murmur_types::{
    AnalysisError, AnalysisRow, FrequencyTable, PolarityError, SentimentDistribution,
    SentimentResult, DEFAULT_TOP_K,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::analyzer::{Cleaner, StopWords};
use crate::config::{AnalysisConfig, ConfigError, FailurePolicy};
use crate::frequency::{top_words, WordCounter};
use crate::sentiment::{Lexicon, LexiconAnalyzer, SentimentScorer};
use crate::source::{CommentSource, PostRef, SourceError};
use crate::stats::CorpusStats;

/// Errors from [`Pipeline::run`].
///
/// `Fetch` means no comments could be obtained; `Analysis` means comments
/// were fetched but the batch stopped midway. A post with zero comments is
/// not an error: the report is simply empty.
#[derive(Debug, Error)]
pub enum RunError {
    /// Fetching comments failed.
    #[error("could not fetch comments: {0}")]
    Fetch(#[from] SourceError),
    /// Analysis stopped before every comment was processed.
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

/// Everything one analysis produces.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// One row per comment, input order.
    pub rows: Vec<AnalysisRow>,
    /// Most frequent cleaned tokens.
    pub frequencies: FrequencyTable,
    /// Label counts over `rows`.
    pub distribution: SentimentDistribution,
    /// Processing summary.
    pub stats: CorpusStats,
}

impl AnalysisReport {
    /// Returns `true` when no comments were analyzed.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows that hold a neutral placeholder after a scoring failure.
    pub fn failures(&self) -> impl Iterator<Item = (usize, &AnalysisRow)> {
        self.rows.iter().enumerate().filter(|(_, r)| r.is_failed())
    }
}

/// Cleaner, scorer and aggregation settings bundled for one session.
///
/// Built once, then shared read-only; every method takes `&self`.
#[derive(Debug, Clone)]
pub struct Pipeline {
    cleaner: Cleaner,
    scorer: SentimentScorer,
    top_k: usize,
    policy: FailurePolicy,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(Cleaner::english(), SentimentScorer::default())
    }
}

impl Pipeline {
    /// Creates a pipeline with the default `top_k` and failure policy.
    pub fn new(cleaner: Cleaner, scorer: SentimentScorer) -> Self {
        Self {
            cleaner,
            scorer,
            top_k: DEFAULT_TOP_K,
            policy: FailurePolicy::default(),
        }
    }

    /// Builds a pipeline from configuration, loading custom resources.
    pub fn from_config(config: &AnalysisConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let stop_words = match &config.stop_words {
            Some(path) => Arc::new(StopWords::load(path).map_err(|source| {
                ConfigError::StopWords {
                    path: path.clone(),
                    source,
                }
            })?),
            None => StopWords::english(),
        };

        let lexicon = match &config.lexicon {
            Some(path) => Arc::new(Lexicon::load(path).map_err(|source| ConfigError::Lexicon {
                path: path.clone(),
                source,
            })?),
            None => Lexicon::english(),
        };

        info!(
            stop_words = stop_words.len(),
            lexicon = lexicon.len(),
            top_k = config.top_k,
            policy = ?config.failure_policy,
            "pipeline ready"
        );

        let analyzer = LexiconAnalyzer::new(lexicon).with_max_text_len(config.max_text_len);

        Ok(Self::new(
            Cleaner::new(stop_words),
            SentimentScorer::new(Arc::new(analyzer)),
        )
        .with_top_k(config.top_k)
        .with_failure_policy(config.failure_policy))
    }

    /// Sets the size of the frequent-word table.
    #[must_use]
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Sets the failure policy.
    #[must_use]
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The cleaner in use.
    pub fn cleaner(&self) -> &Cleaner {
        &self.cleaner
    }

    /// The scorer in use.
    pub fn scorer(&self) -> &SentimentScorer {
        &self.scorer
    }

    /// Size of the frequent-word table.
    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// The failure policy.
    pub fn failure_policy(&self) -> FailurePolicy {
        self.policy
    }

    /// Cleans one comment.
    pub fn clean(&self, text: &str) -> String {
        self.cleaner.clean(text)
    }

    /// Scores text as given, without cleaning it.
    pub fn score(&self, text: &str) -> Result<SentimentResult, PolarityError> {
        self.scorer.score(text)
    }

    /// Cleans and scores one comment.
    pub fn analyze_row(&self, comment: &str) -> Result<AnalysisRow, PolarityError> {
        let cleaned = self.cleaner.clean(comment);
        let result = self.scorer.score(&cleaned)?;
        Ok(AnalysisRow::scored(comment.to_owned(), cleaned, result))
    }

    /// The `top_k` most frequent tokens across `comments`.
    pub fn top_words<S: AsRef<str>>(&self, comments: &[S]) -> FrequencyTable {
        top_words(&self.cleaner, comments, self.top_k)
    }

    /// Analyzes a batch of raw comments.
    ///
    /// With [`FailurePolicy::Isolate`] this never fails; a comment the
    /// analyzer rejects becomes a neutral row carrying the cause. With
    /// [`FailurePolicy::Abort`] the first rejection ends the batch.
    pub fn analyze<S: AsRef<str>>(&self, comments: &[S]) -> Result<AnalysisReport, AnalysisError> {
        debug!(comments = comments.len(), "analyzing comments");

        let mut rows = Vec::with_capacity(comments.len());
        let mut counter = WordCounter::new();
        let mut distribution = SentimentDistribution::default();
        let mut empty = 0usize;
        let mut failed = 0usize;

        for (index, comment) in comments.iter().enumerate() {
            let original = comment.as_ref();
            let cleaned = self.cleaner.clean(original);
            counter.add_cleaned(&cleaned);
            if cleaned.is_empty() {
                empty += 1;
            }

            let row = match self.scorer.score(&cleaned) {
                Ok(result) => AnalysisRow::scored(original.to_owned(), cleaned, result),
                Err(source) => match self.policy {
                    FailurePolicy::Abort => {
                        warn!(index, error = %source, "scoring failed, aborting batch");
                        return Err(AnalysisError::AnalyzerFailure { index, source });
                    }
                    FailurePolicy::Isolate => {
                        warn!(index, error = %source, "scoring failed, recording neutral placeholder");
                        failed += 1;
                        AnalysisRow::failed(original.to_owned(), cleaned, source.to_string())
                    }
                },
            };

            distribution.record(row.sentiment);
            rows.push(row);
        }

        let stats = CorpusStats::from_counter(&counter, rows.len(), empty, failed);
        debug!(%stats, "analysis complete");

        Ok(AnalysisReport {
            rows,
            frequencies: counter.top(self.top_k),
            distribution,
            stats,
        })
    }

    /// Fetches the comments of `post` from `source` and analyzes them.
    pub fn run<S>(&self, source: &S, post: &PostRef) -> Result<AnalysisReport, RunError>
    where
        S: CommentSource + ?Sized,
    {
        let comments = source.fetch(post)?;
        if comments.is_empty() {
            info!(post = %post, "post has no comments");
        } else {
            info!(post = %post, comments = comments.len(), "fetched comments");
        }
        Ok(self.analyze(&comments)?)
    }
}

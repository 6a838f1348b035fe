//! Core types for the Murmur comment analyzer.
//!
//! This crate holds the values that cross crate boundaries:
//!
//! - **Sentiment labels** and the fixed thresholds that produce them
//! - **Rows and tables** handed to whatever renders the analysis
//! - **Error enums** shared between analyzers and the pipeline
//!
//! Nothing here performs I/O or owns long-lived state.

#![warn(missing_docs)]

use core::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Compound scores at or above this value are [`Sentiment::Positive`].
pub const POSITIVE_THRESHOLD: f64 = 0.05;

/// Compound scores at or below this value are [`Sentiment::Negative`].
pub const NEGATIVE_THRESHOLD: f64 = -0.05;

/// Number of entries returned by the frequent-word table unless overridden.
pub const DEFAULT_TOP_K: usize = 10;

/// Sentiment label derived from a compound score.
///
/// `#[repr(u8)]` keeps the label one byte wide inside rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Sentiment {
    /// Compound score `>= 0.05`.
    Positive = 0,
    /// Compound score strictly between the two thresholds.
    Neutral = 1,
    /// Compound score `<= -0.05`.
    Negative = 2,
}

impl Sentiment {
    /// All labels in display order.
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

    /// Classifies a compound score.
    ///
    /// Both thresholds are inclusive toward their own label; the open interval
    /// `(-0.05, 0.05)` is neutral. `NaN` compares false everywhere and lands
    /// on [`Sentiment::Neutral`].
    ///
    /// ```
    /// use murmur_types::Sentiment;
    ///
    /// assert_eq!(Sentiment::from_compound(0.05), Sentiment::Positive);
    /// assert_eq!(Sentiment::from_compound(-0.05), Sentiment::Negative);
    /// assert_eq!(Sentiment::from_compound(0.0), Sentiment::Neutral);
    /// ```
    #[must_use]
    #[inline]
    pub fn from_compound(score: f64) -> Self {
        if score >= POSITIVE_THRESHOLD {
            Sentiment::Positive
        } else if score <= NEGATIVE_THRESHOLD {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    /// Label text as shown in tables and charts.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw output of a polarity analyzer.
///
/// `positive`, `neutral` and `negative` are proportions of the text that
/// fall in each category and sum to 1.0 (or are all zero for empty text).
/// `compound` is the normalized overall score in `[-1.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PolarityScores {
    /// Share of positive sentiment.
    pub positive: f64,
    /// Share of neutral tokens.
    pub neutral: f64,
    /// Share of negative sentiment.
    pub negative: f64,
    /// Normalized compound score.
    pub compound: f64,
}

/// A label together with the compound score it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    /// Thresholded label.
    pub label: Sentiment,
    /// Compound score in `[-1.0, 1.0]`.
    pub compound: f64,
}

impl SentimentResult {
    /// Builds a result by classifying `compound`.
    #[must_use]
    pub fn from_compound(compound: f64) -> Self {
        Self {
            label: Sentiment::from_compound(compound),
            compound,
        }
    }
}

impl fmt::Display for SentimentResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:+.4})", self.label, self.compound)
    }
}

/// One token and how often it occurred.
///
/// Serializes with the `Word`/`Frequency` column names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordCount {
    /// The cleaned token.
    #[serde(rename = "Word")]
    pub word: String,
    /// Number of occurrences across all comments.
    #[serde(rename = "Frequency")]
    pub count: usize,
}

impl WordCount {
    /// Creates a new entry.
    pub fn new(word: impl Into<String>, count: usize) -> Self {
        Self {
            word: word.into(),
            count,
        }
    }
}

/// Most frequent tokens, sorted by descending count.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrequencyTable {
    entries: Vec<WordCount>,
}

impl FrequencyTable {
    /// Wraps already ordered entries.
    pub fn new(entries: Vec<WordCount>) -> Self {
        debug_assert!(
            entries.windows(2).all(|w| w[0].count >= w[1].count),
            "frequency table entries must be sorted by descending count"
        );
        Self { entries }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no tokens were counted.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in rank order.
    pub fn as_slice(&self) -> &[WordCount] {
        &self.entries
    }

    /// Iterates entries in rank order.
    pub fn iter(&self) -> core::slice::Iter<'_, WordCount> {
        self.entries.iter()
    }

    /// Borrows the table as `(word, count)` pairs.
    pub fn to_pairs(&self) -> Vec<(&str, usize)> {
        self.entries
            .iter()
            .map(|e| (e.word.as_str(), e.count))
            .collect()
    }

    /// Highest count in the table, zero when empty.
    pub fn max_count(&self) -> usize {
        self.entries.first().map_or(0, |e| e.count)
    }
}

impl<'a> IntoIterator for &'a FrequencyTable {
    type Item = &'a WordCount;
    type IntoIter = core::slice::Iter<'a, WordCount>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// One analyzed comment.
///
/// Column names follow the rendered table:
/// `Original Comment`, `Cleaned`, `Sentiment`, `Score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRow {
    /// The comment as fetched.
    #[serde(rename = "Original Comment")]
    pub original: String,
    /// Output of the cleaner.
    #[serde(rename = "Cleaned")]
    pub cleaned: String,
    /// Thresholded label.
    #[serde(rename = "Sentiment")]
    pub sentiment: Sentiment,
    /// Compound score.
    #[serde(rename = "Score")]
    pub score: f64,
    /// Cause of a scoring failure, when the row is a placeholder.
    #[serde(rename = "Failure", default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

impl AnalysisRow {
    /// Builds a successfully scored row.
    pub fn scored(original: String, cleaned: String, result: SentimentResult) -> Self {
        Self {
            original,
            cleaned,
            sentiment: result.label,
            score: result.compound,
            failure: None,
        }
    }

    /// Builds a neutral placeholder for a row whose scoring failed.
    pub fn failed(original: String, cleaned: String, cause: String) -> Self {
        Self {
            original,
            cleaned,
            sentiment: Sentiment::Neutral,
            score: 0.0,
            failure: Some(cause),
        }
    }

    /// Returns `true` if the row is a placeholder.
    pub fn is_failed(&self) -> bool {
        self.failure.is_some()
    }
}

/// Count of rows per label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SentimentDistribution {
    /// Rows labelled positive.
    pub positive: usize,
    /// Rows labelled neutral, placeholders included.
    pub neutral: usize,
    /// Rows labelled negative.
    pub negative: usize,
}

impl SentimentDistribution {
    /// Tallies the labels of `rows`.
    pub fn from_rows<'a, I>(rows: I) -> Self
    where
        I: IntoIterator<Item = &'a AnalysisRow>,
    {
        let mut dist = Self::default();
        for row in rows {
            dist.record(row.sentiment);
        }
        dist
    }

    /// Adds one label.
    #[inline]
    pub fn record(&mut self, label: Sentiment) {
        match label {
            Sentiment::Positive => self.positive += 1,
            Sentiment::Neutral => self.neutral += 1,
            Sentiment::Negative => self.negative += 1,
        }
    }

    /// Count for a single label.
    pub const fn get(&self, label: Sentiment) -> usize {
        match label {
            Sentiment::Positive => self.positive,
            Sentiment::Neutral => self.neutral,
            Sentiment::Negative => self.negative,
        }
    }

    /// Total number of rows.
    pub const fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }
}

/// Errors raised by a polarity analyzer for a single text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolarityError {
    /// Text exceeds the analyzer's size limit.
    #[error("text too long: {len} bytes (max: {max} bytes)")]
    TooLong {
        /// Actual length in bytes.
        len: usize,
        /// Configured maximum in bytes.
        max: usize,
    },
    /// Text contains content the analyzer cannot score.
    #[error("text contains invalid input: {reason}")]
    InvalidInput {
        /// Description of the rejected content.
        reason: &'static str,
    },
}

/// Errors that stop a batch analysis.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// The analyzer failed on one comment and the batch was aborted.
    ///
    /// Every comment before `index` was analyzed.
    #[error("analysis failed at comment {index}: {source}")]
    AnalyzerFailure {
        /// Zero-based position of the failing comment.
        index: usize,
        /// Underlying analyzer error.
        #[source]
        source: PolarityError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_inclusive() {
        assert_eq!(Sentiment::from_compound(0.05), Sentiment::Positive);
        assert_eq!(Sentiment::from_compound(-0.05), Sentiment::Negative);
        assert_eq!(Sentiment::from_compound(0.0), Sentiment::Neutral);
        assert_eq!(Sentiment::from_compound(0.0499), Sentiment::Neutral);
        assert_eq!(Sentiment::from_compound(-0.0499), Sentiment::Neutral);
        assert_eq!(Sentiment::from_compound(1.0), Sentiment::Positive);
        assert_eq!(Sentiment::from_compound(-1.0), Sentiment::Negative);
    }

    #[test]
    fn nan_is_neutral() {
        assert_eq!(Sentiment::from_compound(f64::NAN), Sentiment::Neutral);
    }

    #[test]
    fn sentiment_size_is_1_byte() {
        assert_eq!(size_of::<Sentiment>(), 1);
    }

    #[test]
    fn sentiment_display() {
        let labels: Vec<String> = Sentiment::ALL.iter().map(|s| s.to_string()).collect();
        assert_eq!(labels, ["Positive", "Neutral", "Negative"]);
    }

    #[test]
    fn result_display_shows_sign() {
        let r = SentimentResult::from_compound(-0.5);
        assert_eq!(r.label, Sentiment::Negative);
        assert_eq!(r.to_string(), "Negative (-0.5000)");
    }

    #[test]
    fn distribution_counts_rows() {
        let rows = vec![
            AnalysisRow::scored("a".into(), "a".into(), SentimentResult::from_compound(0.6)),
            AnalysisRow::scored("b".into(), "b".into(), SentimentResult::from_compound(0.2)),
            AnalysisRow::failed("c".into(), "c".into(), "boom".into()),
            AnalysisRow::scored("d".into(), "d".into(), SentimentResult::from_compound(-0.7)),
        ];
        let dist = SentimentDistribution::from_rows(&rows);
        assert_eq!(dist.positive, 2);
        assert_eq!(dist.neutral, 1);
        assert_eq!(dist.negative, 1);
        assert_eq!(dist.total(), rows.len());
        assert_eq!(dist.get(Sentiment::Negative), 1);
    }

    #[test]
    fn failed_row_is_neutral_placeholder() {
        let row = AnalysisRow::failed("x".into(), "x".into(), "too long".into());
        assert!(row.is_failed());
        assert_eq!(row.sentiment, Sentiment::Neutral);
        assert_eq!(row.score, 0.0);
    }

    #[test]
    fn row_serializes_with_table_columns() {
        let row = AnalysisRow::scored(
            "Love it!".into(),
            "love".into(),
            SentimentResult::from_compound(0.6369),
        );
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["Original Comment"], "Love it!");
        assert_eq!(json["Cleaned"], "love");
        assert_eq!(json["Sentiment"], "Positive");
        assert!(json.get("Failure").is_none());
    }

    #[test]
    fn frequency_table_serializes_with_table_columns() {
        let table = FrequencyTable::new(vec![WordCount::new("good", 2), WordCount::new("bad", 1)]);
        let json = serde_json::to_value(&table).unwrap();
        assert_eq!(json[0]["Word"], "good");
        assert_eq!(json[0]["Frequency"], 2);
        assert_eq!(json[1]["Word"], "bad");
        assert!(json[0].get("word").is_none());
        assert!(json[0].get("count").is_none());

        let back: FrequencyTable = serde_json::from_value(json).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn frequency_table_accessors() {
        let table = FrequencyTable::new(vec![WordCount::new("good", 3), WordCount::new("bad", 1)]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.max_count(), 3);
        assert_eq!(table.to_pairs(), vec![("good", 3), ("bad", 1)]);
        assert!(FrequencyTable::default().is_empty());
        assert_eq!(FrequencyTable::default().max_count(), 0);
    }

    #[test]
    fn analysis_error_reports_index() {
        let err = AnalysisError::AnalyzerFailure {
            index: 4,
            source: PolarityError::TooLong { len: 70_000, max: 65_535 },
        };
        assert_eq!(
            err.to_string(),
            "analysis failed at comment 4: text too long: 70000 bytes (max: 65535 bytes)"
        );
    }
}

//! Comment analysis core.
//!
//! Cleans raw social-media comments, scores their sentiment and aggregates
//! word frequencies:
//!
//! ```
//! use murmur_core::Pipeline;
//! use murmur_types::Sentiment;
//!
//! let report = Pipeline::default()
//!     .analyze(&["I love this!!", "I hate this.", "meh"])
//!     .unwrap();
//!
//! assert_eq!(report.rows.len(), 3);
//! assert_eq!(report.rows[0].sentiment, Sentiment::Positive);
//! assert_eq!(report.rows[1].sentiment, Sentiment::Negative);
//! ```
//!
//! Threading: every type here is immutable after construction and can be
//! shared behind an `Arc`; no call mutates shared state.

pub mod analyzer;
pub mod config;
pub mod frequency;
pub mod pipeline;
pub mod sentiment;
pub mod source;
pub mod stats;

pub use analyzer::{Cleaner, StopWords};
pub use config::{AnalysisConfig, ConfigError, FailurePolicy};
pub use frequency::{top_words, WordCounter};
pub use pipeline::{AnalysisReport, Pipeline, RunError};
pub use sentiment::{LexiconAnalyzer, PolarityAnalyzer, SentimentScorer};
pub use source::{ArchiveSource, CommentSource, FileSource, MemorySource, PostRef, SourceError};
pub use stats::CorpusStats;

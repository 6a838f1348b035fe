//! Text analysis pipeline.
//!
//! This module provides the text processing components:
//! - **StopWords**: Read-only set of words excluded from analysis
//! - **Cleaner**: Strips URLs and punctuation, lowercases, drops stop words
//! - **Tokenizer**: Splits cleaned text into tokens

pub mod cleaner;
pub mod stopwords;
pub mod tokenizer;

pub use cleaner::Cleaner;
pub use stopwords::StopWords;
pub use tokenizer::Tokenizer;

//! Word-frequency aggregation.
//!
//! Tokens are counted in input order. Entries live in a vector in first-seen
//! order and an FxHashMap maps each token to its slot, so ranking with a
//! stable sort breaks count ties in favour of the token seen first.

use murmur_types::{FrequencyTable, WordCount};
use rustc_hash::FxHashMap;

use crate::analyzer::{Cleaner, Tokenizer};

/// Multiset of tokens with deterministic ranking.
#[derive(Debug, Clone, Default)]
pub struct WordCounter {
    slots: FxHashMap<Box<str>, usize>,
    entries: Vec<(Box<str>, usize)>,
    total: usize,
    tokenizer: Tokenizer,
}

impl WordCounter {
    /// Creates an empty counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one token.
    pub fn add_token(&mut self, token: &str) {
        self.total += 1;
        if let Some(&slot) = self.slots.get(token) {
            self.entries[slot].1 += 1;
            return;
        }
        let key: Box<str> = token.into();
        self.slots.insert(key.clone(), self.entries.len());
        self.entries.push((key, 1));
    }

    /// Counts every token of already cleaned text.
    pub fn add_cleaned(&mut self, cleaned: &str) {
        let tokenizer = self.tokenizer;
        tokenizer.tokenize(cleaned, |token, _| self.add_token(token));
    }

    /// Occurrences of `token` so far.
    pub fn count(&self, token: &str) -> usize {
        self.slots.get(token).map_or(0, |&slot| self.entries[slot].1)
    }

    /// Number of tokens counted, duplicates included.
    pub fn total_tokens(&self) -> usize {
        self.total
    }

    /// Number of distinct tokens.
    pub fn distinct_tokens(&self) -> usize {
        self.entries.len()
    }

    /// The `k` most frequent tokens, by descending count.
    ///
    /// Equal counts keep first-seen order. `k == 0` gives an empty table.
    pub fn top(&self, k: usize) -> FrequencyTable {
        if k == 0 || self.entries.is_empty() {
            return FrequencyTable::default();
        }

        let mut order: Vec<usize> = (0..self.entries.len()).collect();
        order.sort_by(|&a, &b| self.entries[b].1.cmp(&self.entries[a].1));
        order.truncate(k);

        FrequencyTable::new(
            order
                .into_iter()
                .map(|slot| {
                    let (word, count) = &self.entries[slot];
                    WordCount::new(&**word, *count)
                })
                .collect(),
        )
    }
}

/// Cleans every comment and returns its `k` most frequent tokens.
///
/// ```
/// use murmur_core::analyzer::Cleaner;
/// use murmur_core::frequency::top_words;
///
/// let table = top_words(&Cleaner::english(), &["good good bad", "good"], 1);
/// assert_eq!(table.to_pairs(), vec![("good", 3)]);
/// ```
pub fn top_words<S: AsRef<str>>(cleaner: &Cleaner, comments: &[S], k: usize) -> FrequencyTable {
    let mut counter = WordCounter::new();
    let mut buf = String::new();
    for comment in comments {
        cleaner.clean_into(comment.as_ref(), &mut buf);
        counter.add_cleaned(&buf);
    }
    counter.top(k)
}

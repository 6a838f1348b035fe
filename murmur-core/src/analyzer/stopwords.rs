//! Stop-word sets.
//!
//! A [`StopWords`] set is built once and then only read. The built-in English
//! list matches the NLTK English corpus and is compiled into the binary, so
//! no download happens at startup.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;
use rustc_hash::FxHashSet;
use tracing::debug;

const ENGLISH_LIST: &str = include_str!("../../resources/stopwords_english.txt");

static ENGLISH: Lazy<Arc<StopWords>> = Lazy::new(|| Arc::new(StopWords::parse(ENGLISH_LIST)));

/// Immutable set of lowercase stop words.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: FxHashSet<Box<str>>,
}

impl StopWords {
    /// Shared built-in English set.
    ///
    /// Initialized on first use, read-only afterwards.
    pub fn english() -> Arc<StopWords> {
        Arc::clone(&ENGLISH)
    }

    /// An empty set; the cleaner then only strips URLs and punctuation.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a set from arbitrary words, lowercasing each one.
    ///
    /// ```
    /// use murmur_core::analyzer::StopWords;
    ///
    /// let set = StopWords::new(["The", "AND"]);
    /// assert!(set.contains("the"));
    /// assert!(set.contains("and"));
    /// ```
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .map(String::into_boxed_str)
            .collect();
        Self { words }
    }

    /// Reads one word per line. Blank lines and `#` comments are skipped.
    pub fn from_reader<R: Read>(reader: R) -> io::Result<Self> {
        let mut lines = Vec::new();
        for line in BufReader::new(reader).lines() {
            lines.push(line?);
        }
        Ok(Self::new(lines.iter().filter_map(|l| significant_line(l))))
    }

    /// Loads a word list from disk.
    pub fn load(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let set = Self::from_reader(File::open(path)?)?;
        debug!(path = %path.display(), words = set.len(), "loaded stop words");
        Ok(set)
    }

    fn parse(list: &str) -> Self {
        Self::new(list.lines().filter_map(significant_line))
    }

    /// Returns `true` if `word` is a stop word. `word` must already be lowercase.
    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of words in the set.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns `true` if the set has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

fn significant_line(line: &str) -> Option<&str> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        None
    } else {
        Some(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_has_nltk_size() {
        assert_eq!(StopWords::english().len(), 179);
    }

    #[test]
    fn english_contains_common_words() {
        let set = StopWords::english();
        for w in ["the", "and", "this", "out", "i", "not", "don't", "very"] {
            assert!(set.contains(w), "{w} should be a stop word");
        }
        for w in ["good", "bad", "love", "hate", "meh", "check"] {
            assert!(!set.contains(w), "{w} should not be a stop word");
        }
    }

    #[test]
    fn english_is_shared() {
        let a = StopWords::english();
        let b = StopWords::english();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn custom_words_are_lowercased() {
        let set = StopWords::new(["Foo", " BAR ", ""]);
        assert_eq!(set.len(), 2);
        assert!(set.contains("foo"));
        assert!(set.contains("bar"));
    }

    #[test]
    fn reader_skips_comments_and_blanks() {
        let input = "# header\nalpha\n\n  beta  \n#gamma\n";
        let set = StopWords::from_reader(input.as_bytes()).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains("alpha"));
        assert!(set.contains("beta"));
        assert!(!set.contains("gamma"));
    }

    #[test]
    fn load_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "lol\nomg").unwrap();
        let set = StopWords::load(file.path()).unwrap();
        assert!(set.contains("lol"));
        assert!(set.contains("omg"));
    }

    #[test]
    fn load_missing_file_errors() {
        assert!(StopWords::load("/definitely/not/here.txt").is_err());
    }
}

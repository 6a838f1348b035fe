//! Streaming Tokenizer Module
//!
//! Splits cleaned comment text into tokens without allocating. It is the last
//! stage of the cleaner and the first stage of frequency counting.
//!
//! ## What It Does
//!
//! Given cleaned input like `"love new song"`, it emits each word with its
//! position among the emitted tokens:
//!
//! ```ignore
//! ("love", 0)
//! ("new", 1)
//! ("song", 2)
//! ```
//!
//! ## Key Features
//!
//! - **Zero Allocation**: tokens are slices of the input string
//! - **Streaming**: tokens go to a callback, no intermediate collection
//! - **Fast**: `memchr` scan for ASCII space (0x20)
//! - **Forgiving**: runs of spaces and leading/trailing spaces produce no
//!   empty tokens, so the cleaner can feed it text before re-joining
//!
//! ## Usage
//!
//! ```rust
//! use murmur_core::analyzer::tokenizer::Tokenizer;
//!
//! let mut words = Vec::new();
//! Tokenizer::new().tokenize("hello  world ", |text, _pos| words.push(text));
//! assert_eq!(words, ["hello", "world"]);
//! ```
//!
//! ## The Input Contract
//!
//! Input must be the cleaner's alphabet: ASCII lowercase letters, digits and
//! spaces. Debug builds assert this.

use core::str;
use memchr::memchr_iter;

/// Streaming tokenizer over cleaned text.
///
/// Reusable and `Copy`; holds no per-call state.
#[derive(Debug, Copy, Clone, Default)]
pub struct Tokenizer;

impl Tokenizer {
    /// Creates a new tokenizer.
    #[inline]
    pub const fn new() -> Self {
        Self
    }

    /// Tokenizes cleaned input and emits `(text, position)`.
    ///
    /// Position is `u32`. After emitting a token at position `u32::MAX`,
    /// further emissions stop.
    #[inline(always)]
    #[allow(clippy::needless_lifetimes)]
    pub fn tokenize<'n, F>(&self, cleaned: &'n str, mut emit: F)
    where
        F: FnMut(&'n str, u32),
    {
        let bytes = cleaned.as_bytes();

        debug_assert!(
            bytes
                .iter()
                .all(|&b| b == b' ' || b.is_ascii_lowercase() || b.is_ascii_digit()),
            "tokenizer: input outside [a-z0-9 ] — cleaner contract violated"
        );

        if bytes.is_empty() {
            return;
        }

        let mut start = 0usize;
        let mut pos = 0u32;

        for i in memchr_iter(b' ', bytes) {
            if start < i {
                // SAFETY: `cleaned` is valid UTF-8 and we split only on ASCII space,
                // which is never a continuation byte.
                let text = unsafe { str::from_utf8_unchecked(&bytes[start..i]) };
                emit(text, pos);
                if pos == u32::MAX {
                    return;
                }
                pos += 1;
            }
            start = i + 1;
        }

        if start < bytes.len() {
            // SAFETY: `start` follows an ASCII space byte, see above.
            let text = unsafe { str::from_utf8_unchecked(&bytes[start..]) };
            emit(text, pos);
        }
    }

    /// Counts tokens without materializing them.
    #[inline]
    pub fn count(&self, cleaned: &str) -> usize {
        let mut n = 0usize;
        self.tokenize(cleaned, |_, _| n += 1);
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(input: &str) -> Vec<(&str, u32)> {
        let mut out = Vec::new();
        Tokenizer::new().tokenize(input, |text, pos| out.push((text, pos)));
        out
    }

    #[test]
    fn single_word() {
        let out = collect("hello");
        assert_eq!(out, vec![("hello", 0)]);
    }

    #[test]
    fn two_words() {
        let out = collect("hello world");
        assert_eq!(out, vec![("hello", 0), ("world", 1)]);
    }

    #[test]
    fn positions_skip_empty_runs() {
        let out = collect("  quick   brown fox ");
        assert_eq!(out, vec![("quick", 0), ("brown", 1), ("fox", 2)]);
    }

    #[test]
    fn empty_emits_nothing() {
        assert!(collect("").is_empty());
        assert!(collect("    ").is_empty());
    }

    #[test]
    fn digits_are_tokens() {
        let out = collect("top 10 2024");
        assert_eq!(out.len(), 3);
        assert_eq!(out[1].0, "10");
    }

    #[test]
    fn tokens_are_slices_of_input() {
        let input = String::from("hello world");
        let base = input.as_ptr() as usize;
        let end = base + input.len();

        Tokenizer::new().tokenize(&input, |text, _| {
            let ptr = text.as_ptr() as usize;
            assert!(ptr >= base && ptr < end);
        });
    }

    #[test]
    fn tokenizer_is_reusable() {
        let t = Tokenizer::new();
        assert_eq!(t.count("hello world"), 2);
        assert_eq!(t.count("one two three"), 3);
    }
}

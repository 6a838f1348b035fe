//! Comment cleaner.
//!
//! Turns a raw comment into lowercase, stop-word-free text:
//!
//! 1. Drop every `http\S+` run (URLs).
//! 2. Drop every byte that is not an ASCII letter, digit or space.
//! 3. Lowercase.
//! 4. Split on spaces, drop stop words, re-join with single spaces.
//!
//! Non-ASCII text (emoji, accented letters, other scripts) is removed in
//! step 2. Between steps 3 and 4 the URL pattern runs once more over the
//! lowercased text: punctuation removal or case folding can glue an `http`
//! prefix back together (`"h.ttps"`, `"HTTPS://x"`), and clearing those
//! leftovers keeps `clean(clean(t)) == clean(t)` for every input. The same
//! pass also drops standalone words that start with `http`, such as "HTTPS".

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use super::stopwords::StopWords;
use super::tokenizer::Tokenizer;

static URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"http\S+").expect("URL pattern is a valid regex"));

/// Maps every byte to its cleaned form; `0` means "drop".
const CLEAN_TABLE: [u8; 256] = build_clean_table();

const fn build_clean_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut b = 0usize;
    while b < 256 {
        let byte = b as u8;
        table[b] = match byte {
            b'A'..=b'Z' => byte + 32,
            b'a'..=b'z' | b'0'..=b'9' | b' ' => byte,
            _ => 0,
        };
        b += 1;
    }
    table
}

/// Stateless comment cleaner bound to one stop-word set.
///
/// Cloning is cheap; the set is shared.
///
/// # Examples
///
/// ```
/// use murmur_core::analyzer::Cleaner;
///
/// let cleaner = Cleaner::english();
/// assert_eq!(cleaner.clean("Check this out! http://x.co/a"), "check");
/// assert_eq!(cleaner.clean("The BEST song of 2024!!"), "best song 2024");
/// ```
#[derive(Debug, Clone)]
pub struct Cleaner {
    stop_words: Arc<StopWords>,
    tokenizer: Tokenizer,
}

impl Default for Cleaner {
    fn default() -> Self {
        Self::english()
    }
}

impl Cleaner {
    /// Creates a cleaner using `stop_words`.
    pub fn new(stop_words: Arc<StopWords>) -> Self {
        Self {
            stop_words,
            tokenizer: Tokenizer::new(),
        }
    }

    /// Creates a cleaner using the built-in English stop words.
    pub fn english() -> Self {
        Self::new(StopWords::english())
    }

    /// The stop-word set in use.
    pub fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    /// Cleans `text` into a new string.
    #[must_use]
    pub fn clean(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        self.clean_into(text, &mut out);
        out
    }

    /// Cleans `text` into `out`, clearing it first.
    ///
    /// Never fails: every string has a cleaned form, possibly empty.
    pub fn clean_into(&self, text: &str, out: &mut String) {
        out.clear();

        let without_urls = URL_PATTERN.replace_all(text, "");

        let mut ascii = String::with_capacity(without_urls.len());
        for &b in without_urls.as_bytes() {
            let c = CLEAN_TABLE[b as usize];
            if c != 0 {
                ascii.push(c as char);
            }
        }

        let residue_free = URL_PATTERN.replace_all(&ascii, "");

        self.tokenizer.tokenize(&residue_free, |token, _| {
            if self.stop_words.contains(token) {
                return;
            }
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(token);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn clean(text: &str) -> String {
        Cleaner::english().clean(text)
    }

    #[test]
    fn table_keeps_only_ascii_alnum_and_space() {
        assert_eq!(CLEAN_TABLE[b'A' as usize], b'a');
        assert_eq!(CLEAN_TABLE[b'z' as usize], b'z');
        assert_eq!(CLEAN_TABLE[b'7' as usize], b'7');
        assert_eq!(CLEAN_TABLE[b' ' as usize], b' ');
        assert_eq!(CLEAN_TABLE[b'!' as usize], 0);
        assert_eq!(CLEAN_TABLE[b'\n' as usize], 0);
        assert_eq!(CLEAN_TABLE[b'\t' as usize], 0);
        assert_eq!(CLEAN_TABLE[0xC3], 0);
    }

    #[test]
    fn url_and_stop_words_removed() {
        assert_eq!(clean("Check this out! http://x.co/a"), "check");
    }

    #[test]
    fn https_and_mid_token_urls_removed() {
        assert_eq!(clean("see https://example.com/p?q=1 now"), "see");
        assert_eq!(clean("link:http://a.b/c great"), "link great");
    }

    #[test]
    fn bare_http_word_survives() {
        assert_eq!(clean("http is a protocol"), "http protocol");
    }

    #[test]
    fn punctuation_and_emoji_removed() {
        assert_eq!(clean("Wow!!! 😍😍 so good..."), "wow good");
        assert_eq!(clean("café"), "caf");
    }

    #[test]
    fn newlines_and_tabs_glue_words() {
        assert_eq!(clean("great\nsong"), "greatsong");
        assert_eq!(clean("great\tsong"), "greatsong");
    }

    #[test]
    fn lowercases_and_collapses_spaces() {
        assert_eq!(clean("  LOVE   New   Song  "), "love new song");
    }

    #[test]
    fn order_is_preserved() {
        assert_eq!(clean("zebra apple mango"), "zebra apple mango");
    }

    #[test]
    fn empty_input() {
        assert_eq!(clean(""), "");
    }

    #[test]
    fn only_stop_words_yields_empty() {
        assert_eq!(clean("I am the one, and you are not!"), "one");
        assert_eq!(clean("this is it."), "");
    }

    #[test]
    fn glued_url_residue_removed() {
        assert_eq!(clean("h.ttps everywhere"), "everywhere");
        assert_eq!(clean("HTTPS://SHOUTY.LINK wow"), "wow");
    }

    #[test]
    fn http_prefixed_words_are_dropped() {
        assert_eq!(clean("Use HTTPS please"), "use please");
        assert_eq!(clean("https"), "");
    }

    #[test]
    fn apostrophe_words_lose_apostrophe() {
        // "don't" is a stop word but its cleaned form "dont" is not.
        assert_eq!(clean("I don't care"), "dont care");
    }

    #[test]
    fn custom_stop_words() {
        let cleaner = Cleaner::new(Arc::new(StopWords::new(["lol"])));
        assert_eq!(cleaner.clean("LOL this is great"), "this is great");
    }

    #[test]
    fn empty_stop_words_keeps_everything() {
        let cleaner = Cleaner::new(Arc::new(StopWords::empty()));
        assert_eq!(cleaner.clean("The end."), "the end");
    }

    #[test]
    fn clean_into_reuses_buffer() {
        let cleaner = Cleaner::english();
        let mut buf = String::from("stale content");
        cleaner.clean_into("Fresh start", &mut buf);
        assert_eq!(buf, "fresh start");
    }

    fn stop_word_or_punct() -> impl Strategy<Value = String> {
        let words: Vec<&'static str> = vec![
            "the", "and", "this", "out", "I", "You", "IS", "a", "not", "very", ",", "!", "...",
            "?", "\u{1F600}", "-", "'",
        ];
        proptest::collection::vec(proptest::sample::select(words), 0..12)
            .prop_map(|parts| parts.join(" "))
    }

    proptest! {
        #[test]
        fn clean_is_idempotent(text in "\\PC{0,80}") {
            let once = clean(&text);
            prop_assert_eq!(clean(&once), once);
        }

        #[test]
        fn clean_is_idempotent_on_url_shaped_text(text in "[hHtTpPsS:/. a-z!]{0,40}") {
            let once = clean(&text);
            prop_assert_eq!(clean(&once), once);
        }

        #[test]
        fn stop_words_and_punctuation_clean_to_empty(text in stop_word_or_punct()) {
            prop_assert_eq!(clean(&text), "");
        }

        #[test]
        fn output_alphabet_is_restricted(text in "\\PC{0,80}") {
            let out = clean(&text);
            prop_assert!(out.bytes().all(|b| b == b' ' || b.is_ascii_lowercase() || b.is_ascii_digit()));
            prop_assert!(!out.starts_with(' ') && !out.ends_with(' ') && !out.contains("  "));
        }
    }
}

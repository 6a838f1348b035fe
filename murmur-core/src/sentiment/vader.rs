//! Rule-based lexicon analyzer in the style of VADER.
//!
//! Each token gets its lexicon valence, then the rules adjust it:
//!
//! - boosters/dampeners up to three tokens back (`very good`, `kind of bad`)
//! - negation up to three tokens back (`never good`, `isnt bad`)
//! - ALL-CAPS emphasis when only some words are shouted
//! - contrast around `but` (earlier clause halved, later clause weighted 1.5)
//! - `!` and `?` amplification of the final sum
//!
//! The sum is squashed into `[-1, 1]` with `x / sqrt(x² + 15)`.

use std::sync::Arc;

use murmur_types::{PolarityError, PolarityScores};
use smallvec::SmallVec;

use super::lexicon::Lexicon;
use super::PolarityAnalyzer;

/// Default size limit for scored text, in bytes.
pub const DEFAULT_MAX_TEXT_LEN: usize = 65_535;

const B_INCR: f64 = 0.293;
const B_DECR: f64 = -0.293;
const C_INCR: f64 = 0.733;
const N_SCALAR: f64 = -0.74;
const NORMALIZE_ALPHA: f64 = 15.0;

const MAX_EXCLAMATIONS: usize = 4;
const EXCLAMATION_WEIGHT: f64 = 0.292;
const QUESTION_WEIGHT: f64 = 0.18;
const QUESTION_CAP: f64 = 0.96;

/// Token with its lookup form and shouting flag.
struct Word {
    lower: String,
    shouted: bool,
}

/// VADER-style polarity analyzer backed by a [`Lexicon`].
///
/// Holds only read-only data, so one instance can serve every call.
#[derive(Debug, Clone)]
pub struct LexiconAnalyzer {
    lexicon: Arc<Lexicon>,
    max_text_len: usize,
}

impl Default for LexiconAnalyzer {
    fn default() -> Self {
        Self::new(Lexicon::english())
    }
}

impl LexiconAnalyzer {
    /// Creates an analyzer over `lexicon`.
    pub fn new(lexicon: Arc<Lexicon>) -> Self {
        Self {
            lexicon,
            max_text_len: DEFAULT_MAX_TEXT_LEN,
        }
    }

    /// Overrides the text size limit.
    #[must_use]
    pub fn with_max_text_len(mut self, max_text_len: usize) -> Self {
        self.max_text_len = max_text_len;
        self
    }

    /// The lexicon in use.
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Rejects oversized text and control characters.
    ///
    /// Cleaned comments hold only `[a-z0-9 ]`, so inside a
    /// [`Pipeline`](crate::pipeline::Pipeline) only the size limit can fail a
    /// row; the control-character check guards text scored directly.
    fn validate(&self, text: &str) -> Result<(), PolarityError> {
        if text.len() > self.max_text_len {
            return Err(PolarityError::TooLong {
                len: text.len(),
                max: self.max_text_len,
            });
        }
        if contains_invalid_controls(text) {
            return Err(PolarityError::InvalidInput {
                reason: "control characters (0x00-0x1F excluding whitespace) are not allowed",
            });
        }
        Ok(())
    }

    fn valence(&self, words: &[Word], i: usize, cap_diff: bool) -> f64 {
        let word = &words[i];

        if booster(&word.lower).is_some() {
            return 0.0;
        }
        if word.lower == "kind" && words.get(i + 1).is_some_and(|w| w.lower == "of") {
            return 0.0;
        }

        let Some(mut valence) = self.lexicon.get(&word.lower) else {
            return 0.0;
        };

        if word.shouted && cap_diff {
            valence += C_INCR.copysign(valence);
        }

        for dist in 1..=3usize {
            if i < dist {
                break;
            }
            let prev = &words[i - dist];
            if self.lexicon.contains(&prev.lower) {
                continue;
            }

            let mut scalar = scalar_inc_dec(prev, valence, cap_diff);
            match dist {
                2 => scalar *= 0.95,
                3 => scalar *= 0.9,
                _ => {}
            }
            valence += scalar;
            valence = negation_check(valence, words, dist, i);
        }

        valence
    }
}

impl PolarityAnalyzer for LexiconAnalyzer {
    fn polarity_scores(&self, text: &str) -> Result<PolarityScores, PolarityError> {
        self.validate(text)?;

        let words: SmallVec<[Word; 32]> = text
            .split_whitespace()
            .filter_map(|raw| {
                let trimmed = raw.trim_matches(|c: char| c.is_ascii_punctuation());
                (!trimmed.is_empty()).then(|| Word {
                    lower: trimmed.to_lowercase(),
                    shouted: is_shouted(trimmed),
                })
            })
            .collect();

        if words.is_empty() {
            return Ok(PolarityScores::default());
        }

        let shouted = words.iter().filter(|w| w.shouted).count();
        let cap_diff = shouted > 0 && shouted < words.len();

        let mut valences: SmallVec<[f64; 32]> = (0..words.len())
            .map(|i| self.valence(&words, i, cap_diff))
            .collect();

        but_check(&words, &mut valences);

        Ok(score_valences(&valences, punctuation_emphasis(text)))
    }
}

fn score_valences(valences: &[f64], punct_amp: f64) -> PolarityScores {
    let mut sum: f64 = valences.iter().sum();
    if sum > 0.0 {
        sum += punct_amp;
    } else if sum < 0.0 {
        sum -= punct_amp;
    }
    let compound = round4(normalize(sum));

    let mut pos_sum = 0.0f64;
    let mut neg_sum = 0.0f64;
    let mut neu_count = 0.0f64;
    for &v in valences {
        if v > 0.0 {
            pos_sum += v + 1.0;
        } else if v < 0.0 {
            neg_sum += v - 1.0;
        } else {
            neu_count += 1.0;
        }
    }

    if pos_sum > neg_sum.abs() {
        pos_sum += punct_amp;
    } else if pos_sum < neg_sum.abs() {
        neg_sum -= punct_amp;
    }

    let total = pos_sum + neg_sum.abs() + neu_count;
    if total == 0.0 {
        return PolarityScores {
            compound,
            ..PolarityScores::default()
        };
    }

    PolarityScores {
        positive: round3((pos_sum / total).abs()),
        neutral: round3((neu_count / total).abs()),
        negative: round3((neg_sum / total).abs()),
        compound,
    }
}

#[inline]
fn normalize(score: f64) -> f64 {
    (score / (score * score + NORMALIZE_ALPHA).sqrt()).clamp(-1.0, 1.0)
}

#[inline]
fn round3(x: f64) -> f64 {
    (x * 1_000.0).round() / 1_000.0
}

#[inline]
fn round4(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}

fn is_shouted(word: &str) -> bool {
    word.chars().any(char::is_alphabetic) && !word.chars().any(char::is_lowercase)
}

fn contains_invalid_controls(input: &str) -> bool {
    input
        .bytes()
        .any(|b| matches!(b, 0x00..=0x08 | 0x0B | 0x0C | 0x0E..=0x1F | 0x7F))
}

fn booster(word: &str) -> Option<f64> {
    match word {
        "absolutely" | "amazingly" | "awfully" | "completely" | "considerably" | "decidedly"
        | "deeply" | "enormously" | "entirely" | "especially" | "exceptionally" | "extremely"
        | "fabulously" | "flipping" | "fully" | "greatly" | "highly" | "hugely" | "incredibly"
        | "intensely" | "majorly" | "more" | "most" | "particularly" | "purely" | "quite"
        | "really" | "remarkably" | "so" | "substantially" | "thoroughly"
        | "totally" | "tremendously" | "uber" | "unbelievably" | "unusually" | "utterly"
        | "very" => Some(B_INCR),
        "almost" | "barely" | "hardly" | "just" | "less" | "little" | "marginally"
        | "occasionally" | "partly" | "scarcely" | "slightly" | "somewhat" => Some(B_DECR),
        _ => None,
    }
}

fn scalar_inc_dec(word: &Word, valence: f64, cap_diff: bool) -> f64 {
    let Some(mut scalar) = booster(&word.lower) else {
        return 0.0;
    };
    if valence < 0.0 {
        scalar = -scalar;
    }
    if word.shouted && cap_diff {
        scalar += C_INCR.copysign(valence);
    }
    scalar
}

fn is_negation(word: &str) -> bool {
    matches!(
        word,
        "aint" | "arent" | "cannot" | "cant" | "couldnt" | "darent" | "didnt" | "doesnt"
            | "dont" | "hadnt" | "hasnt" | "havent" | "isnt" | "mightnt" | "mustnt"
            | "neither" | "never" | "none" | "nope" | "nor" | "not" | "nothing" | "nowhere"
            | "oughtnt" | "shant" | "shouldnt" | "wasnt" | "werent" | "without" | "wont"
            | "wouldnt" | "rarely" | "seldom" | "despite"
    ) || word.contains("n't")
}

fn negation_check(valence: f64, words: &[Word], dist: usize, i: usize) -> f64 {
    let prev = words[i - dist].lower.as_str();
    match dist {
        1 if is_negation(prev) => valence * N_SCALAR,
        2 | 3 => {
            let next = words[i - dist + 1].lower.as_str();
            if prev == "never" && matches!(next, "so" | "this") {
                valence * 1.25
            } else if prev == "without" && next == "doubt" {
                valence
            } else if is_negation(prev) {
                valence * N_SCALAR
            } else {
                valence
            }
        }
        _ => valence,
    }
}

fn but_check(words: &[Word], valences: &mut [f64]) {
    let Some(pivot) = words.iter().position(|w| w.lower == "but") else {
        return;
    };
    for (i, v) in valences.iter_mut().enumerate() {
        if i < pivot {
            *v *= 0.5;
        } else if i > pivot {
            *v *= 1.5;
        }
    }
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclamations = text.matches('!').count().min(MAX_EXCLAMATIONS);
    let questions = text.matches('?').count();

    let qm = match questions {
        0 | 1 => 0.0,
        2 | 3 => questions as f64 * QUESTION_WEIGHT,
        _ => QUESTION_CAP,
    };

    exclamations as f64 * EXCLAMATION_WEIGHT + qm
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compound(text: &str) -> f64 {
        LexiconAnalyzer::default()
            .polarity_scores(text)
            .unwrap()
            .compound
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn single_word_matches_normalization() {
        assert!(close(compound("love"), 0.6369));
        assert!(close(compound("hate"), -0.5719));
        assert!(close(compound("meh"), -0.0772));
    }

    #[test]
    fn empty_and_unknown_are_zero() {
        assert_eq!(compound(""), 0.0);
        assert_eq!(compound("table chair window"), 0.0);
        assert_eq!(compound("!!! ???"), 0.0);
    }

    #[test]
    fn booster_raises_intensity() {
        assert!(compound("very good") > compound("good"));
        assert!(compound("slightly good") < compound("good"));
        assert!(compound("very bad") < compound("bad"));
    }

    #[test]
    fn negation_flips_sign() {
        assert!(compound("good") > 0.0);
        assert!(compound("not good") < 0.0);
        assert!(compound("isnt bad") > 0.0);
        assert!(compound("never really good") < 0.0);
    }

    #[test]
    fn but_shifts_weight_to_second_clause() {
        assert!(compound("good but bad") < 0.0);
        assert!(compound("bad but good") > 0.0);
    }

    #[test]
    fn exclamations_amplify() {
        assert!(compound("good!!!") > compound("good"));
        assert_eq!(compound("good!!!!!!"), compound("good!!!!"));
        assert!(compound("bad!!") < compound("bad"));
    }

    #[test]
    fn caps_emphasis_needs_mixed_case() {
        assert!(compound("GOOD food") > compound("good food"));
        assert_eq!(compound("GOOD FOOD"), compound("good food"));
    }

    #[test]
    fn kind_of_is_not_scored() {
        assert_eq!(compound("kind of"), 0.0);
        assert!(compound("kind") > 0.0);
    }

    #[test]
    fn compound_is_bounded() {
        let text = "love ".repeat(500);
        let c = compound(&text);
        assert!(c <= 1.0 && c > 0.99);
    }

    #[test]
    fn proportions_sum_to_one() {
        let s = LexiconAnalyzer::default()
            .polarity_scores("good day but terrible night")
            .unwrap();
        let total = s.positive + s.neutral + s.negative;
        assert!((total - 1.0).abs() < 0.01, "total was {total}");
        assert!(s.negative > s.positive);
    }

    #[test]
    fn rejects_oversized_text() {
        let analyzer = LexiconAnalyzer::default().with_max_text_len(8);
        let err = analyzer.polarity_scores("good good good").unwrap_err();
        assert_eq!(err, PolarityError::TooLong { len: 14, max: 8 });
    }

    #[test]
    fn rejects_control_characters() {
        let err = LexiconAnalyzer::default()
            .polarity_scores("good\u{0}")
            .unwrap_err();
        assert!(matches!(err, PolarityError::InvalidInput { .. }));
        assert!(LexiconAnalyzer::default()
            .polarity_scores("good\n\tday\r\n")
            .is_ok());
    }

    #[test]
    fn custom_lexicon() {
        let lex = Lexicon::parse("banger\t3.0\n").unwrap();
        let analyzer = LexiconAnalyzer::new(Arc::new(lex));
        assert!(analyzer.polarity_scores("banger").unwrap().compound > 0.5);
        assert_eq!(analyzer.polarity_scores("love").unwrap().compound, 0.0);
    }
}

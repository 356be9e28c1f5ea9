//! Text → sign sequence, the reverse direction.
//!
//! Known phrases win outright. Otherwise each token becomes a letter sign,
//! digit signs, a word sign, or fingerspelling.

pub mod animator;

pub use animator::SignAnimator;

use crate::defaults;
use crate::vocabulary::{SignCategory, SignDefinition, SignVocabulary};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;

/// Built-in phrase table, matched against the lower-cased input.
///
/// Labels the vocabulary does not know are skipped when rendering.
pub const PHRASE_PATTERNS: &[(&str, &[&str])] = &[
    ("thank you", &["thank_you"]),
    ("i love you", &["i_love_you"]),
    ("how are you", &["how", "you"]),
    ("nice to meet you", &["nice", "meet", "you"]),
    ("my name is", &["my", "name"]),
    ("what is your name", &["what", "your", "name"]),
];

#[allow(clippy::expect_used)]
static PUNCTUATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s']").expect("punctuation regex"));

/// Kind of a rendered unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignOutputType {
    /// A whole-word sign.
    #[serde(rename = "word")]
    WordSign,
    /// One spelled letter.
    #[serde(rename = "letter")]
    LetterSpell,
    Number,
    /// A word spelled as one bundled unit.
    Fingerspell,
}

impl SignOutputType {
    pub fn as_str(self) -> &'static str {
        match self {
            SignOutputType::WordSign => "word",
            SignOutputType::LetterSpell => "letter",
            SignOutputType::Number => "number",
            SignOutputType::Fingerspell => "fingerspell",
        }
    }
}

/// One displayable unit of a sign rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignOutput {
    pub sign_id: String,
    /// Source text this unit renders.
    pub text: String,
    pub display_text: String,
    pub output_type: SignOutputType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sign_definition: Option<SignDefinition>,
    /// Suggested display time in seconds.
    pub duration_hint: f32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub letters: Vec<char>,
    /// Position of a spelled letter within its word.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SignOutput {
    fn new(
        sign_id: impl Into<String>,
        text: impl Into<String>,
        output_type: SignOutputType,
        duration_hint: f32,
    ) -> Self {
        let text = text.into();
        Self {
            sign_id: sign_id.into(),
            display_text: text.clone(),
            text,
            output_type,
            sign_definition: None,
            duration_hint,
            letters: Vec::new(),
            description: None,
        }
    }

    pub fn has_animation(&self) -> bool {
        self.sign_definition
            .as_ref()
            .is_some_and(SignDefinition::has_animation)
    }

    pub fn emoji(&self) -> Option<&str> {
        self.sign_definition.as_ref()?.emoji.as_deref()
    }
}

/// Full rendering of one text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignSequenceResult {
    pub original_text: String,
    pub signs: Vec<SignOutput>,
    /// Tokens rendered as word signs (or phrase signs).
    pub word_count: usize,
    pub sign_count: usize,
    /// Tokens that had to be fingerspelled.
    pub fingerspelled_count: usize,
}

impl SignSequenceResult {
    pub fn has_signs(&self) -> bool {
        !self.signs.is_empty()
    }

    /// Sum of every unit's duration hint.
    pub fn total_duration(&self) -> f32 {
        self.signs.iter().map(|s| s.duration_hint).sum()
    }

    pub fn display_sequence(&self) -> Vec<&str> {
        self.signs.iter().map(|s| s.display_text.as_str()).collect()
    }
}

/// What a token turned into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenRendering {
    Letter,
    Number,
    Word,
    Fingerspelled,
}

/// Converts text into a sequence of [`SignOutput`] units.
#[derive(Debug, Clone)]
pub struct TextToSignTranslator {
    vocabulary: Arc<SignVocabulary>,
    phrases: Vec<(String, Vec<String>)>,
    pub word_sign_duration: f32,
    pub letter_duration: f32,
}

impl TextToSignTranslator {
    pub fn new(vocabulary: Arc<SignVocabulary>) -> Self {
        Self {
            vocabulary,
            phrases: PHRASE_PATTERNS
                .iter()
                .map(|(phrase, labels)| {
                    (
                        (*phrase).to_string(),
                        labels.iter().map(|l| (*l).to_string()).collect(),
                    )
                })
                .collect(),
            word_sign_duration: defaults::WORD_SIGN_DURATION_SECS,
            letter_duration: defaults::LETTER_DURATION_SECS,
        }
    }

    /// Translates `text`.
    ///
    /// With `expand_fingerspelling`, unknown words become one unit per
    /// letter; otherwise one bundled [`SignOutputType::Fingerspell`] unit.
    pub fn translate(&self, text: &str, expand_fingerspelling: bool) -> SignSequenceResult {
        let mut result = SignSequenceResult {
            original_text: text.to_string(),
            ..Default::default()
        };

        let normalized = normalize_text(text);
        if normalized.is_empty() {
            return result;
        }

        if let Some(labels) = self.match_phrase(&normalized.to_lowercase()) {
            result.signs = labels
                .iter()
                .filter_map(|label| self.phrase_sign(label))
                .collect();
            result.word_count = labels.len();
            result.sign_count = result.signs.len();
            tracing::debug!(text = %normalized, signs = result.sign_count, "Phrase match");
            return result;
        }

        for token in normalized.split_whitespace() {
            match self.render_token(token, expand_fingerspelling, &mut result.signs) {
                TokenRendering::Word => result.word_count += 1,
                TokenRendering::Fingerspelled => result.fingerspelled_count += 1,
                TokenRendering::Letter | TokenRendering::Number => {}
            }
        }
        result.sign_count = result.signs.len();

        tracing::debug!(
            text = %normalized,
            signs = result.sign_count,
            words = result.word_count,
            fingerspelled = result.fingerspelled_count,
            "Text translated to signs"
        );
        result
    }

    /// Same units as `translate(text, true)`, produced one token at a time.
    pub fn translate_streaming(&self, text: &str) -> SignStream<'_> {
        let normalized = normalize_text(text);
        let mut pending = VecDeque::new();
        let mut tokens = VecDeque::new();

        if let Some(labels) = self.match_phrase(&normalized.to_lowercase()) {
            pending.extend(labels.iter().filter_map(|label| self.phrase_sign(label)));
        } else {
            tokens.extend(normalized.split_whitespace().map(str::to_string));
        }

        SignStream {
            translator: self,
            tokens,
            pending,
        }
    }

    fn match_phrase(&self, lowered: &str) -> Option<&[String]> {
        self.phrases
            .iter()
            .find(|(phrase, _)| {
                lowered == phrase
                    || lowered
                        .strip_prefix(phrase.as_str())
                        .is_some_and(|rest| rest.starts_with(' '))
            })
            .map(|(_, labels)| labels.as_slice())
    }

    fn render_token(&self, token: &str, expand: bool, out: &mut Vec<SignOutput>) -> TokenRendering {
        let mut chars = token.chars();
        if let (Some(c), None) = (chars.next(), chars.next())
            && c.is_alphabetic()
            && let Some(sign) = self.sign_for_letter(c)
        {
            out.push(sign);
            return TokenRendering::Letter;
        }

        if token.chars().all(|c| c.is_ascii_digit()) {
            out.extend(token.chars().map(|d| self.number_sign(d)));
            return TokenRendering::Number;
        }

        if let Some(sign) = self.word_sign(token) {
            out.push(sign);
            return TokenRendering::Word;
        }

        if expand {
            out.extend(self.fingerspell_expanded(token));
        } else {
            out.push(self.fingerspell_bundled(token));
        }
        TokenRendering::Fingerspelled
    }

    fn phrase_sign(&self, label: &str) -> Option<SignOutput> {
        let sign = self.vocabulary.get_sign_by_gesture(label)?;
        let mut output = SignOutput::new(
            sign.id.clone(),
            sign.text.clone(),
            SignOutputType::WordSign,
            self.word_sign_duration,
        );
        output.display_text = sign.display_text.clone();
        output.sign_definition = Some(sign.clone());
        Some(output)
    }

    fn word_sign(&self, word: &str) -> Option<SignOutput> {
        let sign = self
            .vocabulary
            .get_sign_by_text(word)
            .filter(|s| s.category.is_word_level())?;
        let mut output = SignOutput::new(
            sign.id.clone(),
            word,
            SignOutputType::WordSign,
            self.word_sign_duration,
        );
        if !sign.display_text.is_empty() {
            output.display_text = sign.display_text.clone();
        }
        output.sign_definition = Some(sign.clone());
        Some(output)
    }

    fn number_sign(&self, digit: char) -> SignOutput {
        let text = digit.to_string();
        match self
            .vocabulary
            .get_sign_by_text(&text)
            .filter(|s| s.category == SignCategory::Number)
        {
            Some(sign) => {
                let mut output = SignOutput::new(
                    sign.id.clone(),
                    text,
                    SignOutputType::Number,
                    self.letter_duration,
                );
                output.sign_definition = Some(sign.clone());
                output
            }
            None => SignOutput::new(
                format!("number_{digit}"),
                text,
                SignOutputType::Number,
                self.letter_duration,
            ),
        }
    }

    /// The letter sign for `letter`, or `None` if it is not alphabetic.
    pub fn sign_for_letter(&self, letter: char) -> Option<SignOutput> {
        if !letter.is_alphabetic() {
            return None;
        }
        let upper = letter.to_uppercase().collect::<String>();
        let mut output = SignOutput::new(
            format!("letter_{}", upper.to_lowercase()),
            upper.clone(),
            SignOutputType::LetterSpell,
            self.letter_duration,
        );
        output.sign_definition = self.vocabulary.get_sign_by_text(&upper).cloned();
        Some(output)
    }

    fn fingerspell_expanded(&self, word: &str) -> Vec<SignOutput> {
        let upper: Vec<char> = word.to_uppercase().chars().collect();
        let lower = word.to_lowercase();
        let last = upper.len().saturating_sub(1);

        upper
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_alphabetic())
            .map(|(i, &letter)| {
                let description = if i == 0 {
                    format!("Start of '{word}'")
                } else if i == last {
                    format!("End of '{word}'")
                } else {
                    format!("'{word}' ({}/{})", i + 1, upper.len())
                };
                let mut output = SignOutput::new(
                    format!("fingerspell_{lower}_{}_{i}", letter.to_lowercase()),
                    letter.to_string(),
                    SignOutputType::LetterSpell,
                    self.letter_duration,
                );
                output.sign_definition = self
                    .vocabulary
                    .get_sign_by_text(&letter.to_string())
                    .cloned();
                output.letters = vec![letter];
                output.description = Some(description);
                output
            })
            .collect()
    }

    fn fingerspell_bundled(&self, word: &str) -> SignOutput {
        let letters: Vec<char> = word
            .to_uppercase()
            .chars()
            .filter(|c| c.is_alphabetic())
            .collect();
        let duration = letters.len() as f32 * self.letter_duration;

        let mut output = SignOutput::new(
            format!("fingerspell_{}", word.to_lowercase()),
            word,
            SignOutputType::Fingerspell,
            duration,
        );
        output.display_text = format!("[{}]", word.to_uppercase());
        output.letters = letters;
        output
    }

    /// Texts that have a whole-word sign.
    pub fn available_words(&self) -> Vec<&str> {
        self.vocabulary
            .all_words()
            .into_iter()
            .map(|s| s.text.as_str())
            .collect()
    }

    /// Adds or replaces a phrase. Newer phrases are tried after the built-ins.
    pub fn add_phrase_pattern<I, S>(&mut self, phrase: &str, labels: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let phrase = normalize_text(phrase).to_lowercase();
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        match self.phrases.iter_mut().find(|(p, _)| *p == phrase) {
            Some((_, existing)) => *existing = labels,
            None => self.phrases.push((phrase, labels)),
        }
    }

    pub fn vocabulary(&self) -> &Arc<SignVocabulary> {
        &self.vocabulary
    }

    pub fn set_vocabulary(&mut self, vocabulary: Arc<SignVocabulary>) {
        self.vocabulary = vocabulary;
    }
}

/// Lazy rendering returned by [`TextToSignTranslator::translate_streaming`].
#[derive(Debug)]
pub struct SignStream<'a> {
    translator: &'a TextToSignTranslator,
    tokens: VecDeque<String>,
    pending: VecDeque<SignOutput>,
}

impl Iterator for SignStream<'_> {
    type Item = SignOutput;

    fn next(&mut self) -> Option<SignOutput> {
        loop {
            if let Some(sign) = self.pending.pop_front() {
                return Some(sign);
            }
            let token = self.tokens.pop_front()?;
            let mut rendered = Vec::new();
            self.translator.render_token(&token, true, &mut rendered);
            self.pending.extend(rendered);
        }
    }
}

/// Collapses whitespace and replaces punctuation other than apostrophes.
pub fn normalize_text(text: &str) -> String {
    PUNCTUATION_RE
        .replace_all(text, " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn translator() -> TextToSignTranslator {
        TextToSignTranslator::new(Arc::new(SignVocabulary::new()))
    }

    fn types(result: &SignSequenceResult) -> Vec<SignOutputType> {
        result.signs.iter().map(|s| s.output_type).collect()
    }

    #[test]
    fn test_normalization_strips_punctuation_but_keeps_apostrophes() {
        assert_eq!(normalize_text("  Hello,   world! "), "Hello world");
        assert_eq!(normalize_text("don't stop."), "don't stop");
        assert_eq!(normalize_text("?!"), "");
    }

    #[test]
    fn test_known_word_becomes_one_word_sign() {
        let result = translator().translate("Hello", true);
        assert_eq!(result.sign_count, 1);
        assert_eq!(result.word_count, 1);
        let sign = &result.signs[0];
        assert_eq!(sign.sign_id, "word_hello");
        assert_eq!(sign.output_type, SignOutputType::WordSign);
        assert_eq!(sign.duration_hint, defaults::WORD_SIGN_DURATION_SECS);
        assert!(sign.emoji().is_some());
    }

    #[test]
    fn test_question_words_match_without_punctuation() {
        let result = translator().translate("where", true);
        assert_eq!(result.signs[0].sign_id, "word_where");
        assert_eq!(result.signs[0].display_text, "Where?");
    }

    #[test]
    fn test_phrase_takes_priority_over_tokens() {
        let result = translator().translate("Thank you, friend", true);
        assert_eq!(result.sign_count, 1);
        assert_eq!(result.signs[0].sign_id, "word_thanks");
    }

    #[test]
    fn test_phrase_prefix_needs_a_word_boundary() {
        let result = translator().translate("thank yourself", true);
        assert!(result.signs.iter().all(|s| s.sign_id != "word_thanks"));
    }

    #[test]
    fn test_phrase_skips_unknown_labels() {
        let result = translator().translate("nice to meet you", true);
        assert_eq!(result.word_count, 3);
        assert_eq!(result.sign_count, 1);
        assert_eq!(result.signs[0].sign_id, "word_you");
    }

    #[test]
    fn test_unknown_word_is_fingerspelled_per_letter() {
        let result = translator().translate("Xyzzy", true);
        assert_eq!(result.sign_count, 5);
        assert_eq!(result.fingerspelled_count, 1);
        assert!(
            types(&result)
                .iter()
                .all(|t| *t == SignOutputType::LetterSpell)
        );
        assert_eq!(result.display_sequence(), ["X", "Y", "Z", "Z", "Y"]);
        assert_eq!(result.signs[0].description.as_deref(), Some("Start of 'Xyzzy'"));
        assert_eq!(result.signs[2].description.as_deref(), Some("'Xyzzy' (3/5)"));
        assert_eq!(result.signs[4].description.as_deref(), Some("End of 'Xyzzy'"));
        assert_eq!(result.signs[1].sign_id, "fingerspell_xyzzy_y_1");
    }

    #[test]
    fn test_bundled_fingerspelling_is_one_unit() {
        let result = translator().translate("Xyzzy", false);
        assert_eq!(result.sign_count, 1);
        let sign = &result.signs[0];
        assert_eq!(sign.output_type, SignOutputType::Fingerspell);
        assert_eq!(sign.display_text, "[XYZZY]");
        assert_eq!(sign.letters, ['X', 'Y', 'Z', 'Z', 'Y']);
        assert!((sign.duration_hint - 5.0 * defaults::LETTER_DURATION_SECS).abs() < 1e-6);
    }

    #[test]
    fn test_numbers_become_one_sign_per_digit() {
        let result = translator().translate("42", true);
        let ids: Vec<&str> = result.signs.iter().map(|s| s.sign_id.as_str()).collect();
        assert_eq!(ids, ["number_4", "number_2"]);
        assert!(types(&result).iter().all(|t| *t == SignOutputType::Number));
    }

    #[test]
    fn test_single_letters_are_letter_signs() {
        let result = translator().translate("a", true);
        assert_eq!(result.signs[0].sign_id, "letter_a");
        assert_eq!(result.signs[0].text, "A");
        assert!(result.signs[0].sign_definition.is_some());
    }

    #[test]
    fn test_mixed_sentence_counts() {
        let result = translator().translate("I want pizza 7", true);
        // "I" is a single letter, "want" a word, "pizza" spelled, "7" a digit.
        assert_eq!(result.word_count, 1);
        assert_eq!(result.fingerspelled_count, 1);
        assert_eq!(result.sign_count, 1 + 1 + 5 + 1);
        let expected = 2.0 * defaults::LETTER_DURATION_SECS
            + defaults::WORD_SIGN_DURATION_SECS
            + 5.0 * defaults::LETTER_DURATION_SECS;
        assert!((result.total_duration() - expected).abs() < 1e-5);
    }

    #[test]
    fn test_empty_text_has_no_signs() {
        let result = translator().translate("  ...  ", true);
        assert!(!result.has_signs());
        assert_eq!(result.original_text, "  ...  ");
    }

    #[test]
    fn test_streaming_matches_expanded_translation() {
        let t = translator();
        for text in ["Hello there 12", "thank you", "Xyzzy", ""] {
            let streamed: Vec<SignOutput> = t.translate_streaming(text).collect();
            assert_eq!(streamed, t.translate(text, true).signs, "for {text:?}");
        }
    }

    #[test]
    fn test_custom_phrase_is_used() {
        let mut t = translator();
        t.add_phrase_pattern("Good Morning", ["hello"]);
        let result = t.translate("good morning everyone", true);
        assert_eq!(result.signs.len(), 1);
        assert_eq!(result.signs[0].sign_id, "word_hello");
    }

    #[test]
    fn test_sign_for_letter_rejects_non_letters() {
        let t = translator();
        assert!(t.sign_for_letter('7').is_none());
        assert_eq!(t.sign_for_letter('q').map(|s| s.sign_id), Some("letter_q".into()));
    }

    #[test]
    fn test_available_words_lists_word_signs() {
        let t = translator();
        let words = t.available_words();
        assert!(words.contains(&"Hello"));
        assert!(words.contains(&"I love you"));
        assert!(!words.contains(&"A"));
    }
}

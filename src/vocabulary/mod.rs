//! Sign vocabulary: gesture label ↔ text lookup.
//!
//! The registry is insert-only. Labels and texts are matched
//! case-insensitively, and when two signs claim the same label or text the
//! one registered first keeps it. Built-ins register letters, then numbers,
//! then words, then controls, so a bare `"I"` is the letter and `"wave"`
//! is the word *Hello*.

pub mod builtin;
pub mod role;

pub use role::{DELIMITER_LABELS, GestureRole, classify};

use crate::defaults;
use crate::error::{Result, SigntextError};
use crate::gesture::Landmarks;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

/// Category of a sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignCategory {
    Letter,
    Number,
    Word,
    Phrase,
    Punctuation,
    /// Space, backspace, enter.
    Control,
}

impl SignCategory {
    /// Word and phrase signs stand for whole words.
    pub fn is_word_level(self) -> bool {
        matches!(self, SignCategory::Word | SignCategory::Phrase)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SignCategory::Letter => "letter",
            SignCategory::Number => "number",
            SignCategory::Word => "word",
            SignCategory::Phrase => "phrase",
            SignCategory::Punctuation => "punctuation",
            SignCategory::Control => "control",
        }
    }
}

/// One entry of the vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignDefinition {
    pub id: String,
    /// Canonical English text.
    pub text: String,
    pub category: SignCategory,
    /// Every classifier label that triggers this sign.
    pub gesture_labels: Vec<String>,
    /// Requires motion tracking.
    pub is_dynamic: bool,
    pub min_confidence: f32,
    pub display_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Landmark keyframes for animating the sign.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub landmark_sequence: Vec<Landmarks>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub synonyms: Vec<String>,
}

impl SignDefinition {
    pub fn new(id: impl Into<String>, text: impl Into<String>, category: SignCategory) -> Self {
        let text = text.into();
        Self {
            id: id.into(),
            display_text: text.clone(),
            text,
            category,
            gesture_labels: Vec::new(),
            is_dynamic: false,
            min_confidence: defaults::SIGN_MIN_CONFIDENCE,
            emoji: None,
            description: None,
            landmark_sequence: Vec::new(),
            video_path: None,
            synonyms: Vec::new(),
        }
    }

    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.gesture_labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn dynamic(mut self, is_dynamic: bool) -> Self {
        self.is_dynamic = is_dynamic;
        self
    }

    pub fn with_display_text(mut self, display_text: impl Into<String>) -> Self {
        self.display_text = display_text.into();
        self
    }

    pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = Some(emoji.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_synonyms<I, S>(mut self, synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.synonyms = synonyms.into_iter().map(Into::into).collect();
        self
    }

    /// True when the sign carries data for animating it.
    pub fn has_animation(&self) -> bool {
        !self.landmark_sequence.is_empty() || self.video_path.is_some()
    }
}

/// Serializable summary of one sign, as produced by [`SignVocabulary::export`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedSign {
    pub text: String,
    pub category: SignCategory,
    pub gesture_labels: Vec<String>,
    pub is_dynamic: bool,
    pub description: String,
    pub emoji: String,
}

/// Bidirectional sign lookup table.
#[derive(Debug, Clone)]
pub struct SignVocabulary {
    signs: Vec<SignDefinition>,
    by_id: HashMap<String, usize>,
    by_label: HashMap<String, usize>,
    by_text: HashMap<String, usize>,
    word_patterns: HashMap<String, String>,
}

fn lookup_key(s: &str) -> String {
    s.trim().to_uppercase()
}

/// Text key with trailing sentence punctuation removed (`"What?"` → `"WHAT"`).
fn bare_text_key(s: &str) -> String {
    lookup_key(s.trim_end_matches(['?', '!', '.']))
}

impl SignVocabulary {
    /// Vocabulary loaded with the built-in ASL table.
    pub fn new() -> Self {
        let mut vocab = Self::empty();
        vocab.load_builtin();
        vocab
    }

    /// Vocabulary with no signs and no word patterns.
    pub fn empty() -> Self {
        Self {
            signs: Vec::new(),
            by_id: HashMap::new(),
            by_label: HashMap::new(),
            by_text: HashMap::new(),
            word_patterns: HashMap::new(),
        }
    }

    fn load_builtin(&mut self) {
        let mut signs = Vec::new();

        for letter in 'A'..='Z' {
            signs.push(
                SignDefinition::new(
                    format!("letter_{}", letter.to_ascii_lowercase()),
                    letter.to_string(),
                    SignCategory::Letter,
                )
                .with_labels([letter.to_string()])
                .dynamic(builtin::DYNAMIC_LETTERS.contains(&letter))
                .with_description(format!("ASL letter {letter}")),
            );
        }

        for (digit, word) in builtin::NUMBER_WORDS.iter().enumerate() {
            signs.push(
                SignDefinition::new(
                    format!("number_{digit}"),
                    digit.to_string(),
                    SignCategory::Number,
                )
                .with_labels([digit.to_string(), word.to_string()])
                .with_description(format!("Number {digit}")),
            );
        }

        for entry in builtin::WORDS {
            let category = if entry.phrase {
                SignCategory::Phrase
            } else {
                SignCategory::Word
            };
            let mut sign = SignDefinition::new(entry.id, entry.text, category)
                .with_labels(entry.labels.iter().copied())
                .dynamic(entry.is_dynamic)
                .with_description(entry.description);
            if let Some(emoji) = entry.emoji {
                sign = sign.with_emoji(emoji);
            }
            signs.push(sign);
        }

        for entry in builtin::CONTROLS {
            signs.push(
                SignDefinition::new(entry.id, entry.text, SignCategory::Control)
                    .with_labels(entry.labels.iter().copied())
                    .with_display_text(entry.display_text)
                    .with_description(entry.description),
            );
        }

        for sign in signs {
            if let Err(e) = self.register(sign) {
                tracing::warn!("Skipping built-in sign: {e}");
            }
        }

        for (letters, word) in builtin::WORD_PATTERNS {
            self.add_word_pattern(letters, word);
        }
    }

    /// Adds a sign. Fails if the id is already taken.
    ///
    /// Labels and texts already claimed by an earlier sign stay with it.
    pub fn register(&mut self, sign: SignDefinition) -> Result<()> {
        if sign.id.trim().is_empty() {
            return Err(SigntextError::InvalidSign {
                message: "sign id is empty".to_string(),
            });
        }
        if self.by_id.contains_key(&sign.id) {
            return Err(SigntextError::DuplicateSign { id: sign.id });
        }

        let index = self.signs.len();
        self.by_id.insert(sign.id.clone(), index);

        for label in &sign.gesture_labels {
            let key = lookup_key(label);
            if !key.is_empty() {
                self.by_label.entry(key).or_insert(index);
            }
        }

        let texts = std::iter::once(&sign.text).chain(&sign.synonyms);
        for text in texts {
            for key in [lookup_key(text), bare_text_key(text)] {
                if !key.is_empty() {
                    self.by_text.entry(key).or_insert(index);
                }
            }
        }

        self.signs.push(sign);
        Ok(())
    }

    /// Adds a custom word sign and returns its id (`custom_<text>`).
    pub fn add_custom_word(
        &mut self,
        text: &str,
        gesture_labels: &[&str],
        description: Option<&str>,
        emoji: Option<&str>,
    ) -> Result<String> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SigntextError::InvalidSign {
                message: "custom word text is empty".to_string(),
            });
        }
        let id = format!("custom_{}", text.to_lowercase().replace(' ', "_"));

        let mut sign = SignDefinition::new(id.clone(), text, SignCategory::Word)
            .with_labels(gesture_labels.iter().copied());
        if let Some(description) = description {
            sign = sign.with_description(description);
        }
        if let Some(emoji) = emoji {
            sign = sign.with_emoji(emoji);
        }

        self.register(sign)?;
        tracing::debug!(id = %id, "Registered custom word");
        Ok(id)
    }

    /// Maps an upper-case letter sequence to a word at finalization time.
    pub fn add_word_pattern(&mut self, letters: &str, word: &str) {
        self.word_patterns
            .insert(lookup_key(letters), word.to_string());
    }

    pub fn get(&self, id: &str) -> Option<&SignDefinition> {
        self.by_id.get(id).map(|&i| &self.signs[i])
    }

    /// Looks up a sign by classifier label (sign → text direction).
    pub fn get_sign_by_gesture(&self, label: &str) -> Option<&SignDefinition> {
        self.by_label
            .get(&lookup_key(label))
            .map(|&i| &self.signs[i])
    }

    /// Looks up a sign by its text or a synonym (text → sign direction).
    pub fn get_sign_by_text(&self, text: &str) -> Option<&SignDefinition> {
        self.by_text
            .get(&lookup_key(text))
            .or_else(|| self.by_text.get(&bare_text_key(text)))
            .map(|&i| &self.signs[i])
    }

    /// Display text for a label, or the label itself when unknown.
    pub fn gesture_to_text(&self, label: &str) -> String {
        self.get_sign_by_gesture(label)
            .map_or_else(|| label.to_string(), |s| s.display_text.clone())
    }

    /// Recognizes a whole word from a spelled letter sequence.
    pub fn recognize_word_pattern(&self, letters: &str) -> Option<&str> {
        self.word_patterns
            .get(&lookup_key(letters))
            .map(String::as_str)
    }

    pub fn is_word_gesture(&self, label: &str) -> bool {
        self.get_sign_by_gesture(label)
            .is_some_and(|s| s.category.is_word_level())
    }

    pub fn is_dynamic_gesture(&self, label: &str) -> bool {
        self.get_sign_by_gesture(label).is_some_and(|s| s.is_dynamic)
    }

    /// Role of a label for sentence construction.
    pub fn classify(&self, label: &str) -> GestureRole {
        classify(label, self.get_sign_by_gesture(label))
    }

    pub fn all_words(&self) -> Vec<&SignDefinition> {
        self.signs
            .iter()
            .filter(|s| s.category.is_word_level())
            .collect()
    }

    pub fn all_letters(&self) -> Vec<&SignDefinition> {
        self.signs
            .iter()
            .filter(|s| s.category == SignCategory::Letter)
            .collect()
    }

    /// Case-insensitive substring search over text, description and labels.
    pub fn search(&self, query: &str) -> Vec<&SignDefinition> {
        let query = query.trim().to_lowercase();
        self.signs
            .iter()
            .filter(|s| {
                s.text.to_lowercase().contains(&query)
                    || s
                        .description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&query))
                    || s
                        .gesture_labels
                        .iter()
                        .any(|l| l.to_lowercase().contains(&query))
            })
            .collect()
    }

    /// Summary of every sign keyed by id.
    pub fn export(&self) -> BTreeMap<String, ExportedSign> {
        self.signs
            .iter()
            .map(|s| {
                (
                    s.id.clone(),
                    ExportedSign {
                        text: s.text.clone(),
                        category: s.category,
                        gesture_labels: s.gesture_labels.clone(),
                        is_dynamic: s.is_dynamic,
                        description: s.description.clone().unwrap_or_default(),
                        emoji: s.emoji.clone().unwrap_or_default(),
                    },
                )
            })
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SignDefinition> {
        self.signs.iter()
    }

    pub fn len(&self) -> usize {
        self.signs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signs.is_empty()
    }
}

impl Default for SignVocabulary {
    fn default() -> Self {
        Self::new()
    }
}

//! Letters → words → sentence.

use crate::clock::{Clock, SystemClock, secs_between};
use crate::defaults;
use crate::gesture::{GestureSequence, RecognizedGesture, TranslationResult};
use crate::sentence::format::{expand_abbreviation, format_text};
use crate::vocabulary::{GestureRole, SignVocabulary};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// How spelled letters become words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstructionMode {
    /// Pure spelling: no pattern or abbreviation lookup.
    LetterByLetter,
    WordRecognition,
    #[default]
    Hybrid,
    Continuous,
}

impl ConstructionMode {
    /// Whether finalized words go through pattern and abbreviation lookup.
    pub fn recognizes_words(self) -> bool {
        !matches!(self, ConstructionMode::LetterByLetter)
    }
}

/// Timeouts and mode for a [`SentenceConstructor`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentenceConfig {
    pub mode: ConstructionMode,
    /// Silence that closes the word in progress.
    pub word_timeout: Duration,
    /// Silence that closes the sentence.
    pub sentence_timeout: Duration,
}

impl Default for SentenceConfig {
    fn default() -> Self {
        Self {
            mode: ConstructionMode::default(),
            word_timeout: Duration::from_secs_f64(defaults::WORD_TIMEOUT_SECS),
            sentence_timeout: Duration::from_secs_f64(defaults::SENTENCE_TIMEOUT_SECS),
        }
    }
}

/// Letters accumulated toward one word.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WordCandidate {
    pub letters: Vec<char>,
    pub confidences: Vec<f32>,
    pub start_time: Option<Instant>,
}

impl WordCandidate {
    pub fn text(&self) -> String {
        self.letters.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    pub fn average_confidence(&self) -> f32 {
        if self.confidences.is_empty() {
            return 0.0;
        }
        self.confidences.iter().sum::<f32>() / self.confidences.len() as f32
    }
}

/// Result of [`SentenceConstructor::check_timeout`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeoutStatus {
    pub word: bool,
    pub sentence: bool,
}

/// Builds readable text from recognized gestures.
///
/// Word and sentence boundaries come from explicit delimiters, word-level
/// signs, and silence measured on the injected clock.
#[derive(Debug)]
pub struct SentenceConstructor<C: Clock = SystemClock> {
    vocabulary: Arc<SignVocabulary>,
    config: SentenceConfig,
    current_word: WordCandidate,
    words: Vec<String>,
    sequence: GestureSequence,
    last_gesture_at: Option<Instant>,
    sentence_started_at: Option<Instant>,
    raw_text: String,
    formatted_text: String,
    clock: C,
}

impl SentenceConstructor<SystemClock> {
    pub fn new(vocabulary: Arc<SignVocabulary>) -> Self {
        Self::with_clock(vocabulary, SentenceConfig::default(), SystemClock)
    }

    pub fn with_config(vocabulary: Arc<SignVocabulary>, config: SentenceConfig) -> Self {
        Self::with_clock(vocabulary, config, SystemClock)
    }
}

impl<C: Clock> SentenceConstructor<C> {
    pub fn with_clock(vocabulary: Arc<SignVocabulary>, config: SentenceConfig, clock: C) -> Self {
        Self {
            vocabulary,
            config,
            current_word: WordCandidate::default(),
            words: Vec::new(),
            sequence: GestureSequence::new(),
            last_gesture_at: None,
            sentence_started_at: None,
            raw_text: String::new(),
            formatted_text: String::new(),
            clock,
        }
    }

    /// Adds a gesture and returns the updated formatted text.
    pub fn add_gesture(&mut self, gesture: RecognizedGesture) -> &str {
        let now = self.clock.now();

        if let Some(last) = self.last_gesture_at
            && now.saturating_duration_since(last) > self.config.word_timeout
        {
            self.close_word();
        }
        self.last_gesture_at = Some(now);
        self.sentence_started_at.get_or_insert(now);

        let role = if gesture.is_word_level {
            GestureRole::Word
        } else {
            self.vocabulary.classify(&gesture.label)
        };

        match role {
            GestureRole::Word => {
                self.close_word();
                let text = self.word_text(&gesture);
                tracing::debug!(word = %text, "Word-level gesture");
                self.words.push(text);
            }
            GestureRole::Delimiter => {
                self.close_word();
            }
            GestureRole::Letter(c) | GestureRole::Digit(c) => {
                if self.current_word.is_empty() {
                    self.current_word.start_time = Some(now);
                }
                self.current_word.letters.push(c);
                self.current_word.confidences.push(gesture.confidence);
            }
            GestureRole::Unknown => {
                tracing::debug!(label = %gesture.label, "Ignoring gesture with no text role");
            }
        }

        self.sequence.add_gesture(gesture);
        self.update_text();
        &self.formatted_text
    }

    fn word_text(&self, gesture: &RecognizedGesture) -> String {
        if let Some(meaning) = gesture.semantic_meaning.as_deref() {
            return meaning.to_string();
        }
        self.vocabulary
            .get_sign_by_gesture(&gesture.label)
            .map_or_else(|| gesture.label.clone(), |s| s.text.clone())
    }

    /// Closes the word in progress, returning the word it became.
    ///
    /// Returns `None` when no letters are pending.
    pub fn finalize_word(&mut self) -> Option<String> {
        let word = self.close_word();
        self.update_text();
        word
    }

    fn close_word(&mut self) -> Option<String> {
        if self.current_word.is_empty() {
            return None;
        }
        let spelled = self.current_word.text();

        let word = if self.config.mode.recognizes_words() {
            self.vocabulary
                .recognize_word_pattern(&spelled)
                .or_else(|| expand_abbreviation(&spelled))
                .map_or_else(|| spelled.clone(), str::to_string)
        } else {
            spelled.clone()
        };

        tracing::debug!(spelled = %spelled, word = %word, "Word finalized");
        self.words.push(word.clone());
        self.current_word = WordCandidate::default();
        Some(word)
    }

    fn update_text(&mut self) {
        let mut parts: Vec<String> = self.words.clone();
        if !self.current_word.is_empty() {
            parts.push(self.current_word.text());
        }
        self.raw_text = parts.join(" ");
        self.formatted_text = format_text(&self.raw_text);
    }

    /// Which inactivity timeouts have elapsed since the last gesture.
    pub fn check_timeout(&self) -> TimeoutStatus {
        let Some(last) = self.last_gesture_at else {
            return TimeoutStatus::default();
        };
        let elapsed = self.clock.now().saturating_duration_since(last);
        TimeoutStatus {
            word: elapsed >= self.config.word_timeout,
            sentence: elapsed >= self.config.sentence_timeout,
        }
    }

    /// Closes the pending word and produces the sentence translation.
    ///
    /// Accumulated state is kept; call [`Self::clear`] to start over.
    pub fn finalize_sentence(&mut self) -> TranslationResult {
        self.close_word();
        self.update_text();

        let confidence = self.sequence.average_confidence();
        self.sequence.is_complete = true;
        self.sequence.translated_text = Some(self.formatted_text.clone());
        self.sequence.translation_confidence = confidence;

        let capture_duration = self
            .sentence_started_at
            .map_or(0.0, |start| secs_between(start, self.clock.now()));

        tracing::debug!(
            text = %self.formatted_text,
            gestures = self.sequence.len(),
            words = self.words.len(),
            "Sentence finalized"
        );

        TranslationResult {
            text: self.formatted_text.clone(),
            confidence,
            source_sequence: Some(self.sequence.clone()),
            gesture_count: self.sequence.len(),
            capture_duration,
            word_count: self.words.len(),
            average_gesture_confidence: confidence,
            alternatives: Vec::new(),
        }
    }

    /// Drops the word in progress, or else the last finalized word.
    pub fn remove_last_word(&mut self) -> bool {
        let removed = if !self.current_word.is_empty() {
            self.current_word = WordCandidate::default();
            true
        } else {
            self.words.pop().is_some()
        };
        if removed {
            self.update_text();
        }
        removed
    }

    /// Drops one letter. With no word in progress, the last finalized word
    /// is reopened without its final character.
    ///
    /// Only the text is corrected. The gesture stays in [`Self::sequence`],
    /// so [`Self::gesture_count`] and the sentence confidence still count it.
    pub fn remove_last_letter(&mut self) -> bool {
        if !self.current_word.is_empty() {
            self.current_word.letters.pop();
            self.current_word.confidences.pop();
            self.update_text();
            return true;
        }

        let Some(last_word) = self.words.pop() else {
            return false;
        };
        let mut letters: Vec<char> = last_word.chars().collect();
        letters.pop();
        if !letters.is_empty() {
            let confidence = self.sequence.average_confidence();
            self.current_word = WordCandidate {
                confidences: vec![confidence; letters.len()],
                letters,
                start_time: Some(self.clock.now()),
            };
        }
        self.update_text();
        true
    }

    /// Forces a word boundary.
    pub fn insert_space(&mut self) {
        self.close_word();
        self.update_text();
    }

    pub fn current_text(&self) -> &str {
        &self.formatted_text
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// Finalized words plus the bracketed word in progress.
    pub fn preview(&self) -> String {
        let mut parts: Vec<String> = self.words.clone();
        if !self.current_word.is_empty() {
            parts.push(format!("[{}]", self.current_word.text()));
        }
        if parts.is_empty() {
            defaults::PREVIEW_PLACEHOLDER.to_string()
        } else {
            parts.join(" ")
        }
    }

    pub fn gesture_count(&self) -> usize {
        self.sequence.len()
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn current_word(&self) -> &WordCandidate {
        &self.current_word
    }

    pub fn sequence(&self) -> &GestureSequence {
        &self.sequence
    }

    pub fn config(&self) -> &SentenceConfig {
        &self.config
    }

    pub fn set_mode(&mut self, mode: ConstructionMode) {
        self.config.mode = mode;
    }

    pub fn vocabulary(&self) -> &Arc<SignVocabulary> {
        &self.vocabulary
    }

    pub fn set_vocabulary(&mut self, vocabulary: Arc<SignVocabulary>) {
        self.vocabulary = vocabulary;
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// When the last gesture arrived.
    pub fn last_activity(&self) -> Option<Instant> {
        self.last_gesture_at
    }

    /// Resets every buffer and timer.
    pub fn clear(&mut self) {
        self.current_word = WordCandidate::default();
        self.words.clear();
        self.sequence.clear();
        self.last_gesture_at = None;
        self.sentence_started_at = None;
        self.raw_text.clear();
        self.formatted_text.clear();
    }
}

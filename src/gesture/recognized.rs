//! Stabilized gestures and what gets built from them.

use crate::gesture::frame::{ConfidenceLevel, GestureType, clamp_confidence};
use serde::{Deserialize, Serialize};

/// A gesture confirmed by temporal analysis of several frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedGesture {
    pub label: String,
    pub gesture_type: GestureType,
    /// Aggregate confidence over the supporting frames.
    pub confidence: f32,
    pub start_time: f64,
    pub end_time: f64,
    pub frame_count: usize,
    pub supporting_frames: Vec<u64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternative_labels: Vec<(String, f32)>,
    /// Set by consumers when the label maps to a word or phrase.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_meaning: Option<String>,
    #[serde(default)]
    pub is_word_level: bool,
}

impl RecognizedGesture {
    /// Creates a gesture spanning `[start_time, end_time]`.
    ///
    /// The confidence is clamped and an end before the start is pulled up
    /// to the start.
    pub fn new(
        label: impl Into<String>,
        gesture_type: GestureType,
        confidence: f32,
        start_time: f64,
        end_time: f64,
    ) -> Self {
        Self {
            label: label.into(),
            gesture_type,
            confidence: clamp_confidence(confidence),
            start_time,
            end_time: end_time.max(start_time),
            frame_count: 1,
            supporting_frames: Vec::new(),
            alternative_labels: Vec::new(),
            semantic_meaning: None,
            is_word_level: false,
        }
    }

    /// A single-instant gesture, as produced by callers that smooth on their own.
    pub fn instant(label: impl Into<String>, confidence: f32, at: f64) -> Self {
        Self::new(label, GestureType::Static, confidence, at, at)
    }

    /// Marks the gesture as a whole word with the given meaning.
    pub fn as_word(mut self, meaning: impl Into<String>) -> Self {
        self.is_word_level = true;
        self.semantic_meaning = Some(meaning.into());
        self
    }

    /// Duration in seconds.
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    pub fn confidence_level(&self) -> ConfidenceLevel {
        ConfidenceLevel::from_confidence(self.confidence)
    }
}

/// Ordered gestures forming one translation unit (usually a sentence).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GestureSequence {
    pub gestures: Vec<RecognizedGesture>,
    pub start_time: f64,
    pub end_time: f64,
    pub is_complete: bool,
    pub translated_text: Option<String>,
    pub translation_confidence: f32,
}

impl GestureSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a gesture and widens the time span to cover it.
    pub fn add_gesture(&mut self, gesture: RecognizedGesture) {
        if self.gestures.is_empty() {
            self.start_time = gesture.start_time;
        }
        self.end_time = gesture.end_time;
        self.gestures.push(gesture);
    }

    pub fn labels(&self) -> Vec<&str> {
        self.gestures.iter().map(|g| g.label.as_str()).collect()
    }

    /// Labels concatenated, with word-level gestures set off by spaces.
    pub fn raw_text(&self) -> String {
        let mut raw = String::new();
        for gesture in &self.gestures {
            if gesture.is_word_level {
                let word = gesture.semantic_meaning.as_deref().unwrap_or(&gesture.label);
                raw.push(' ');
                raw.push_str(word);
                raw.push(' ');
            } else {
                raw.push_str(&gesture.label);
            }
        }
        raw.trim().to_string()
    }

    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    pub fn average_confidence(&self) -> f32 {
        if self.gestures.is_empty() {
            return 0.0;
        }
        let sum: f32 = self.gestures.iter().map(|g| g.confidence).sum();
        clamp_confidence(sum / self.gestures.len() as f32)
    }

    pub fn len(&self) -> usize {
        self.gestures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gestures.is_empty()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Final output of a sentence finalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub text: String,
    pub confidence: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_sequence: Option<GestureSequence>,
    pub gesture_count: usize,
    /// Seconds from the first gesture of the session to finalization.
    pub capture_duration: f64,
    pub word_count: usize,
    pub average_gesture_confidence: f32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<(String, f32)>,
}

impl TranslationResult {
    /// A result is usable when it has text and a non-zero confidence.
    pub fn is_valid(&self) -> bool {
        !self.text.is_empty() && self.confidence > 0.0
    }
}

impl std::fmt::Display for TranslationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

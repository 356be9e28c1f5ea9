//! Per-frame input types.
//!
//! A [`GestureFrame`] is one sampled instant from the camera or video:
//! optional hand landmarks, optional classifier features, and the
//! classifier's (label, confidence) guess for that instant.

use crate::defaults;
use serde::{Deserialize, Serialize};

/// 21 hand landmarks, each an (x, y, z) triple.
pub type Landmarks = [[f32; 3]; defaults::LANDMARK_COUNT];

/// Kinds of gesture the system distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GestureType {
    /// Static hand pose (letters, numbers).
    Static,
    /// Movement-based gesture (J, Z, wave).
    Dynamic,
    /// A complete word.
    Word,
    /// A multi-word phrase.
    Phrase,
    /// Movement between two gestures.
    Transition,
    #[default]
    Unknown,
}

/// Coarse confidence buckets used for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    Uncertain,
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    /// Buckets a confidence: HIGH ≥ 0.85, MEDIUM ≥ 0.65, LOW ≥ 0.45.
    pub fn from_confidence(confidence: f32) -> Self {
        if confidence >= 0.85 {
            ConfidenceLevel::High
        } else if confidence >= 0.65 {
            ConfidenceLevel::Medium
        } else if confidence >= 0.45 {
            ConfidenceLevel::Low
        } else {
            ConfidenceLevel::Uncertain
        }
    }
}

/// Clamp a confidence into [0, 1]; non-finite values become 0.
pub fn clamp_confidence(confidence: f32) -> f32 {
    if confidence.is_finite() {
        confidence.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Returns true if every landmark coordinate is a finite number.
pub fn landmarks_are_valid(landmarks: &Landmarks) -> bool {
    landmarks.iter().flatten().all(|v| v.is_finite())
}

/// One sampled instant of hand tracking plus the classifier's guess.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureFrame {
    /// Capture time in seconds.
    pub timestamp: f64,
    /// Monotonically increasing frame number.
    pub frame_id: u64,
    pub landmarks: Option<Landmarks>,
    pub features: Option<Vec<f32>>,
    pub predicted_label: Option<String>,
    /// Classifier confidence, always within [0, 1].
    pub confidence: f32,
    pub gesture_type: GestureType,
    pub hand_detected: bool,
}

impl GestureFrame {
    /// Creates a frame with no hand and no prediction.
    pub fn new(frame_id: u64, timestamp: f64) -> Self {
        Self {
            timestamp,
            frame_id,
            landmarks: None,
            features: None,
            predicted_label: None,
            confidence: 0.0,
            gesture_type: GestureType::Unknown,
            hand_detected: false,
        }
    }

    /// Creates a frame with a detected hand and a classifier prediction.
    pub fn with_prediction(
        frame_id: u64,
        timestamp: f64,
        label: impl Into<String>,
        confidence: f32,
    ) -> Self {
        Self {
            predicted_label: Some(label.into()),
            confidence: clamp_confidence(confidence),
            gesture_type: GestureType::Static,
            hand_detected: true,
            ..Self::new(frame_id, timestamp)
        }
    }

    /// Attaches landmarks; invalid (non-finite) landmarks mark the hand as absent.
    pub fn with_landmarks(mut self, landmarks: Landmarks) -> Self {
        self.hand_detected = landmarks_are_valid(&landmarks);
        self.landmarks = Some(landmarks);
        self
    }

    /// Attaches a classifier feature vector.
    pub fn with_features(mut self, features: Vec<f32>) -> Self {
        self.features = Some(features);
        self
    }

    /// Sets the gesture type.
    pub fn with_gesture_type(mut self, gesture_type: GestureType) -> Self {
        self.gesture_type = gesture_type;
        self
    }

    pub fn confidence_level(&self) -> ConfidenceLevel {
        ConfidenceLevel::from_confidence(self.confidence)
    }
}

/// What a frame source hands the pipeline for one frame.
///
/// This is also the line format of recorded frame streams (see
/// [`crate::replay`]), so every field except the confidence is optional.
/// A frame counts as a detected hand only when it carries landmarks or sets
/// `hand_detected`; a bare label is treated as no hand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameInput {
    pub landmarks: Option<Landmarks>,
    pub features: Option<Vec<f32>>,
    #[serde(alias = "label")]
    pub predicted_label: Option<String>,
    pub confidence: f32,
    pub gesture_type: GestureType,
    /// Set by trackers that found a hand but forward no landmarks.
    pub hand_detected: bool,
    /// Seconds; the pipeline fills it in when absent.
    pub timestamp: Option<f64>,
}

impl FrameInput {
    /// A frame where the hand tracker found nothing.
    pub fn no_hand() -> Self {
        Self::default()
    }

    /// A frame with a hand and a classifier prediction.
    ///
    /// Landmarks are zero-filled; the core only checks their presence.
    pub fn prediction(label: impl Into<String>, confidence: f32) -> Self {
        Self {
            landmarks: Some([[0.0; 3]; defaults::LANDMARK_COUNT]),
            predicted_label: Some(label.into()),
            confidence,
            gesture_type: GestureType::Static,
            ..Self::default()
        }
    }

    /// A prediction from a source that reports the hand without landmarks.
    pub fn tracked(label: impl Into<String>, confidence: f32) -> Self {
        Self {
            landmarks: None,
            hand_detected: true,
            ..Self::prediction(label, confidence)
        }
    }

    pub fn at(mut self, timestamp: f64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

//! Gesture data model shared by every stage.
//!
//! ```text
//! GestureFrame ──▶ TemporalAggregator ──▶ RecognizedGesture ──▶ SentenceConstructor ──▶ TranslationResult
//! ```

pub mod frame;
pub mod recognized;

pub use frame::{
    ConfidenceLevel, FrameInput, GestureFrame, GestureType, Landmarks, clamp_confidence,
    landmarks_are_valid,
};
pub use recognized::{GestureSequence, RecognizedGesture, TranslationResult};

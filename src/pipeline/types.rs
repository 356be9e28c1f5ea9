//! Modes, run state and events of the sign pipeline.

use crate::aggregator::AggregatorStatistics;
use crate::error::SigntextError;
use crate::gesture::{RecognizedGesture, TranslationResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Instant;

/// What the pipeline is doing. Exactly one mode is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PipelineMode {
    #[default]
    #[serde(rename = "idle")]
    Idle,
    /// Live camera; every recognized gesture is published.
    #[serde(rename = "live")]
    LiveContinuous,
    /// Live camera; text accumulates until stopped or timed out.
    #[serde(rename = "accumulate")]
    LiveAccumulate,
    /// A finite recording.
    #[serde(rename = "video")]
    VideoProcess,
    /// Reverse direction only; frames are ignored.
    #[serde(rename = "text_to_sign")]
    TextToSign,
}

impl PipelineMode {
    pub fn as_str(self) -> &'static str {
        match self {
            PipelineMode::Idle => "idle",
            PipelineMode::LiveContinuous => "live",
            PipelineMode::LiveAccumulate => "accumulate",
            PipelineMode::VideoProcess => "video",
            PipelineMode::TextToSign => "text_to_sign",
        }
    }

    /// Modes that consume frames and gestures.
    pub fn accepts_input(self) -> bool {
        matches!(
            self,
            PipelineMode::LiveContinuous | PipelineMode::LiveAccumulate | PipelineMode::VideoProcess
        )
    }
}

impl std::fmt::Display for PipelineMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// When text updates are published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslationMode {
    /// After every recognized gesture.
    Instant,
    /// Only through the finished translation.
    #[default]
    Sentence,
    /// Whenever a word completes.
    Word,
}

impl TranslationMode {
    pub fn as_str(self) -> &'static str {
        match self {
            TranslationMode::Instant => "instant",
            TranslationMode::Sentence => "sentence",
            TranslationMode::Word => "word",
        }
    }
}

impl std::fmt::Display for TranslationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TranslationMode {
    type Err = SigntextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "instant" => Ok(TranslationMode::Instant),
            "sentence" => Ok(TranslationMode::Sentence),
            "word" => Ok(TranslationMode::Word),
            other => Err(SigntextError::ConfigInvalidValue {
                key: "translation.mode".to_string(),
                message: format!("unknown mode '{other}' (expected instant, word or sentence)"),
            }),
        }
    }
}

/// Run state of the pipeline, reset by `start` and `clear`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineState {
    pub mode: PipelineMode,
    pub is_processing: bool,
    pub frames_processed: u64,
    pub gestures_recognized: u64,
    pub current_text: String,
    pub current_preview: String,
    /// Most recent predicted label with a non-zero confidence.
    pub last_gesture: Option<String>,
    pub last_confidence: f32,
    pub start_time: Option<Instant>,
    pub last_update_time: Option<Instant>,
}

/// Counters reported by `SignPipeline::statistics`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineStatistics {
    pub mode: PipelineMode,
    pub frames_processed: u64,
    pub gestures_recognized: u64,
    pub current_text: String,
    pub aggregator: AggregatorStatistics,
    pub word_count: usize,
    pub gesture_count: usize,
}

/// Something the pipeline publishes to its sinks.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PipelineEvent {
    GestureRecognized(RecognizedGesture),
    TextUpdated {
        text: String,
        preview: String,
    },
    TranslationComplete(TranslationResult),
    StateChanged {
        mode: PipelineMode,
        is_processing: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translation_mode_parses_case_insensitively() {
        assert_eq!("Word".parse::<TranslationMode>().unwrap(), TranslationMode::Word);
        assert_eq!(
            " instant ".parse::<TranslationMode>().unwrap(),
            TranslationMode::Instant
        );
        let err = "loud".parse::<TranslationMode>().unwrap_err();
        assert!(err.to_string().contains("translation.mode"));
    }

    #[test]
    fn test_only_recognition_modes_accept_input() {
        assert!(PipelineMode::LiveAccumulate.accepts_input());
        assert!(PipelineMode::VideoProcess.accepts_input());
        assert!(!PipelineMode::Idle.accepts_input());
        assert!(!PipelineMode::TextToSign.accepts_input());
    }

    #[test]
    fn test_events_serialize_with_a_type_tag() {
        let event = PipelineEvent::TextUpdated {
            text: "Hi".to_string(),
            preview: "Hi".to_string(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "text_updated");
        assert_eq!(json["text"], "Hi");

        let state = PipelineEvent::StateChanged {
            mode: PipelineMode::LiveAccumulate,
            is_processing: true,
        };
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["mode"], "accumulate");
    }
}

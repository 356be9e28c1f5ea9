//! signtext - Sign language gestures to text, and text back to signs
//!
//! Per-frame classifier output is stabilized into gestures, gestures are
//! assembled into words and sentences, and text can be rendered back into
//! a sequence of signs.

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod aggregator;
#[cfg(feature = "cli")]
pub mod cli;
pub mod clock;
pub mod config;
pub mod defaults;
pub mod error;
pub mod gesture;
pub mod output;
pub mod pipeline;
pub mod replay;
pub mod sentence;
pub mod text_to_sign;
pub mod vocabulary;

// Recognition core
pub use aggregator::{AggregationState, AggregatorConfig, TemporalAggregator};
pub use gesture::{
    FrameInput, GestureFrame, GestureSequence, GestureType, RecognizedGesture, TranslationResult,
};
pub use sentence::{ContinuousSentenceBuilder, SentenceConstructor};
pub use vocabulary::{SignDefinition, SignVocabulary};

// Reverse direction
pub use text_to_sign::{SignAnimator, SignSequenceResult, TextToSignTranslator};

// Pipeline
pub use pipeline::{
    CollectorSink, EventSink, PipelineConfig, PipelineEvent, PipelineMode, SignPipeline,
    TranslationMode,
};

// Error handling
pub use error::{Result, SigntextError};

// Config
pub use config::Config;

/// Build version string with optional git commit hash.
///
/// Returns `"0.1.0+abc1234"` when git hash is available, `"0.1.0"` otherwise.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{}+{}", version, hash),
        _ => version.to_string(),
    }
}

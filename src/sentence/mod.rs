//! Sentence construction from recognized gestures.
//!
//! [`SentenceConstructor`] owns letter accumulation, word boundaries and
//! corrections. [`ContinuousSentenceBuilder`] wraps it for hosts that poll
//! for timeouts and want word and sentence events.

pub mod builder;
pub mod constructor;
pub mod format;

pub use builder::{ContinuousSentenceBuilder, SentenceEvent};
pub use constructor::{
    ConstructionMode, SentenceConfig, SentenceConstructor, TimeoutStatus, WordCandidate,
};
pub use format::{ABBREVIATIONS, expand_abbreviation, format_text};

//! Default configuration constants for signtext.
//!
//! Shared between the TOML config layer and the runtime config structs so
//! that both agree on every default.

/// Number of frames kept for temporal voting.
pub const WINDOW_SIZE: usize = 15;

/// Consecutive matching frames needed before a candidate is emitted.
pub const STABILITY_THRESHOLD: usize = 5;

/// Per-frame predictions below this confidence never enter the vote.
pub const MIN_CONFIDENCE: f32 = 0.5;

/// No-hand frames tolerated before a tracked candidate is finalized.
pub const TRANSITION_FRAMES: usize = 3;

/// Expected camera/video frame rate.
pub const TARGET_FPS: u32 = 30;

/// Fewer history samples than this and the vote abstains.
pub const MIN_VOTE_SAMPLES: usize = 2;

/// Share of the history the winning label must hold for the vote to count.
pub const MIN_VOTE_CONSISTENCY: f32 = 0.4;

/// Seconds of inactivity that close the word in progress.
pub const WORD_TIMEOUT_SECS: f64 = 1.5;

/// Seconds of inactivity that close the sentence.
pub const SENTENCE_TIMEOUT_SECS: f64 = 3.0;

/// How often a host is expected to poll for timeouts.
pub const POLL_INTERVAL_MS: u64 = 500;

/// Suggested display time for a whole-word sign.
pub const WORD_SIGN_DURATION_SECS: f32 = 1.5;

/// Suggested display time for one fingerspelled letter or digit.
pub const LETTER_DURATION_SECS: f32 = 0.5;

/// Shown by previews before anything has been signed.
pub const PREVIEW_PLACEHOLDER: &str = "(waiting...)";

/// Number of hand landmarks produced by the hand tracker.
pub const LANDMARK_COUNT: usize = 21;

/// Recognition floor attached to vocabulary entries.
pub const SIGN_MIN_CONFIDENCE: f32 = 0.6;

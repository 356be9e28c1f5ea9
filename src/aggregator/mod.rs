//! Temporal aggregation of per-frame predictions.
//!
//! Turns a noisy stream of (label, confidence) frames into discrete
//! [`RecognizedGesture`] events using confidence-weighted voting over a
//! sliding window and a transition-tolerant state machine:
//!
//! ```text
//!            vote                same label ≥ threshold
//!   Idle ──────────▶ Tracking ─────────────────────────▶ Stable (emit)
//!    ▲                  │  ▲                               │
//!    │  no hand         │  │ same label                    │ new label
//!    │                  ▼  │                               ▼
//!    └──────────── Transitioning ◀─────────────────── Tracking
//! ```
//!
//! Timing comes from frame timestamps, so the aggregator behaves the same
//! for live streams and recorded video.

pub mod voting;

pub use voting::{LabelTally, Vote, tally, vote};

use crate::defaults;
use crate::gesture::{
    GestureFrame, GestureType, RecognizedGesture, clamp_confidence, landmarks_are_valid,
};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Alternatives kept on an emitted gesture.
const MAX_ALTERNATIVES: usize = 3;

/// States of the aggregation state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationState {
    /// No hand, or nothing accepted yet.
    #[default]
    Idle,
    /// Accumulating frames for a candidate.
    Tracking,
    /// A gesture was just emitted; its label is held until it changes.
    Stable,
    /// The label changed; waiting to confirm the new one.
    Transitioning,
}

impl AggregationState {
    pub fn as_str(self) -> &'static str {
        match self {
            AggregationState::Idle => "idle",
            AggregationState::Tracking => "tracking",
            AggregationState::Stable => "stable",
            AggregationState::Transitioning => "transitioning",
        }
    }
}

impl std::fmt::Display for AggregationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregator tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregatorConfig {
    /// Frames kept for voting.
    pub window_size: usize,
    /// Frames a candidate needs before it is emitted.
    pub stability_threshold: usize,
    /// Predictions below this never vote.
    pub min_confidence: f32,
    /// No-hand frames tolerated before a candidate is finalized.
    pub transition_frames: usize,
    pub target_fps: u32,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            window_size: defaults::WINDOW_SIZE,
            stability_threshold: defaults::STABILITY_THRESHOLD,
            min_confidence: defaults::MIN_CONFIDENCE,
            transition_frames: defaults::TRANSITION_FRAMES,
            target_fps: defaults::TARGET_FPS,
        }
    }
}

/// A gesture hypothesis under construction.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureCandidate {
    pub label: String,
    pub gesture_type: GestureType,
    pub start_frame: u64,
    pub end_frame: u64,
    pub frame_ids: Vec<u64>,
    pub confidences: Vec<f32>,
    pub peak_confidence: f32,
    pub start_time: f64,
    pub last_seen_time: f64,
}

impl GestureCandidate {
    /// Frames spanned, inclusive.
    pub fn duration_frames(&self) -> usize {
        (self.end_frame.saturating_sub(self.start_frame) + 1) as usize
    }

    pub fn average_confidence(&self) -> f32 {
        if self.confidences.is_empty() {
            return 0.0;
        }
        self.confidences.iter().sum::<f32>() / self.confidences.len() as f32
    }

    fn extend(&mut self, frame_id: u64, confidence: f32, timestamp: f64) {
        self.end_frame = frame_id.max(self.end_frame);
        self.frame_ids.push(frame_id);
        self.confidences.push(confidence);
        self.peak_confidence = self.peak_confidence.max(confidence);
        self.last_seen_time = timestamp.max(self.last_seen_time);
    }
}

/// Snapshot of aggregator counters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregatorStatistics {
    pub frames_processed: u64,
    pub gestures_recognized: u64,
    pub state: AggregationState,
    pub buffer_len: usize,
    pub current_candidate: Option<String>,
}

type GestureListener = Box<dyn FnMut(&RecognizedGesture) + Send>;
type StateListener = Box<dyn FnMut(AggregationState) + Send>;

/// The fields of the current frame the state machine needs.
struct FrameMark {
    id: u64,
    timestamp: f64,
    gesture_type: GestureType,
    label_matches_vote: bool,
}

/// Sliding-window gesture stabilizer.
pub struct TemporalAggregator {
    config: AggregatorConfig,
    frames: VecDeque<GestureFrame>,
    history: VecDeque<(String, f32)>,
    state: AggregationState,
    candidate: Option<GestureCandidate>,
    /// Label of the last stability emission while in `Stable`.
    held_label: Option<String>,
    /// Frames up to this id already belong to an emitted gesture.
    claimed_through: Option<u64>,
    last_gesture: Option<RecognizedGesture>,
    frames_processed: u64,
    no_hand_streak: usize,
    gestures_recognized: u64,
    gesture_listeners: Vec<GestureListener>,
    state_listeners: Vec<StateListener>,
}

impl TemporalAggregator {
    pub fn new(config: AggregatorConfig) -> Self {
        let config = AggregatorConfig {
            window_size: config.window_size.max(1),
            stability_threshold: config.stability_threshold.max(1),
            min_confidence: clamp_confidence(config.min_confidence),
            ..config
        };
        Self {
            frames: VecDeque::with_capacity(config.window_size),
            history: VecDeque::with_capacity(config.window_size),
            config,
            state: AggregationState::Idle,
            candidate: None,
            held_label: None,
            claimed_through: None,
            last_gesture: None,
            frames_processed: 0,
            no_hand_streak: 0,
            gestures_recognized: 0,
            gesture_listeners: Vec::new(),
            state_listeners: Vec::new(),
        }
    }

    /// Registers a listener for emitted gestures.
    pub fn on_gesture_recognized<F>(&mut self, listener: F)
    where
        F: FnMut(&RecognizedGesture) + Send + 'static,
    {
        self.gesture_listeners.push(Box::new(listener));
    }

    /// Registers a listener for state transitions.
    pub fn on_state_change<F>(&mut self, listener: F)
    where
        F: FnMut(AggregationState) + Send + 'static,
    {
        self.state_listeners.push(Box::new(listener));
    }

    /// Feeds one frame; returns a gesture when one is confirmed.
    pub fn process_frame(&mut self, mut frame: GestureFrame) -> Option<RecognizedGesture> {
        self.frames_processed += 1;
        frame.confidence = clamp_confidence(frame.confidence);

        if frame.hand_detected
            && frame
                .landmarks
                .as_ref()
                .is_some_and(|l| !landmarks_are_valid(l))
        {
            tracing::warn!(
                frame_id = frame.frame_id,
                "Non-finite landmarks, treating frame as no hand"
            );
            frame.hand_detected = false;
        }

        let hand_detected = frame.hand_detected;
        let accepted = frame
            .predicted_label
            .clone()
            .filter(|_| hand_detected && frame.confidence >= self.config.min_confidence);
        let mark = FrameMark {
            id: frame.frame_id,
            timestamp: frame.timestamp,
            gesture_type: frame.gesture_type,
            label_matches_vote: false,
        };

        if self.frames.len() >= self.config.window_size {
            self.frames.pop_front();
        }
        self.frames.push_back(frame);

        if !hand_detected {
            return self.handle_no_hand();
        }
        self.no_hand_streak = 0;

        if let Some(label) = accepted.as_ref() {
            if self.history.len() >= self.config.window_size {
                self.history.pop_front();
            }
            let confidence = self.frames.back().map_or(0.0, |f| f.confidence);
            self.history.push_back((label.clone(), confidence));
        }

        let winner = vote(&self.history)?;
        let mark = FrameMark {
            label_matches_vote: accepted.as_deref() == Some(winner.label.as_str()),
            ..mark
        };
        self.update_state(winner, mark)
    }

    fn handle_no_hand(&mut self) -> Option<RecognizedGesture> {
        self.no_hand_streak += 1;
        let mut emitted = None;

        if self.no_hand_streak > self.config.transition_frames {
            match self.state {
                AggregationState::Tracking if self.candidate.is_some() => {
                    emitted = self.finalize();
                    self.set_state(AggregationState::Idle);
                }
                AggregationState::Stable => {
                    self.held_label = None;
                    self.set_state(AggregationState::Idle);
                }
                _ => {}
            }
            // Votes from before the hand left must not seed the next gesture.
            self.history.clear();
        }

        if self.no_hand_streak > self.config.window_size / 2 {
            self.held_label = None;
            self.set_state(AggregationState::Idle);
        }

        emitted
    }

    fn update_state(&mut self, vote: Vote, frame: FrameMark) -> Option<RecognizedGesture> {
        match self.state {
            AggregationState::Idle => {
                self.start_candidate(&vote, &frame);
                self.set_state(AggregationState::Tracking);
                self.check_stability()
            }
            AggregationState::Tracking => {
                let Some(candidate) = self.candidate.as_mut() else {
                    self.start_candidate(&vote, &frame);
                    return self.check_stability();
                };

                if candidate.label == vote.label {
                    candidate.extend(frame.id, vote.confidence, frame.timestamp);
                    return self.check_stability();
                }

                let frames = candidate.duration_frames();
                let substantial = frames >= self.config.stability_threshold / 2;
                self.set_state(AggregationState::Transitioning);
                let emitted = if substantial {
                    self.finalize()
                } else {
                    tracing::debug!(frames, "Abandoning short candidate");
                    None
                };
                self.start_candidate(&vote, &frame);
                emitted
            }
            AggregationState::Stable => {
                if self.held_label.as_deref() == Some(vote.label.as_str()) {
                    self.claimed_through = Some(frame.id);
                    return None;
                }
                self.held_label = None;
                self.set_state(AggregationState::Tracking);
                self.start_candidate(&vote, &frame);
                self.check_stability()
            }
            AggregationState::Transitioning => {
                let confirmed = self
                    .candidate
                    .as_ref()
                    .is_some_and(|c| c.label == vote.label);
                if !confirmed {
                    self.start_candidate(&vote, &frame);
                    return None;
                }
                if let Some(candidate) = self.candidate.as_mut() {
                    candidate.extend(frame.id, vote.confidence, frame.timestamp);
                }
                self.set_state(AggregationState::Tracking);
                self.check_stability()
            }
        }
    }

    /// Starts a candidate for the voted label.
    ///
    /// When the current frame itself predicted that label, the unclaimed
    /// run of matching frames just before it joins the candidate.
    fn start_candidate(&mut self, vote: &Vote, frame: &FrameMark) {
        let mut frame_ids = Vec::new();
        let mut confidences = Vec::new();
        let mut start_time = frame.timestamp;

        if frame.label_matches_vote {
            for earlier in self.frames.iter().rev().skip(1) {
                let claimed = self.claimed_through.is_some_and(|id| earlier.frame_id <= id);
                let matches = earlier.hand_detected
                    && earlier.confidence >= self.config.min_confidence
                    && earlier.predicted_label.as_deref() == Some(vote.label.as_str());
                if claimed || !matches {
                    break;
                }
                frame_ids.push(earlier.frame_id);
                confidences.push(earlier.confidence);
                start_time = earlier.timestamp;
            }
            frame_ids.reverse();
            confidences.reverse();
        }

        frame_ids.push(frame.id);
        confidences.push(vote.confidence);

        let start_frame = frame_ids.first().copied().unwrap_or(frame.id);
        let peak_confidence = confidences.iter().copied().fold(0.0f32, f32::max);
        tracing::debug!(
            label = %vote.label,
            backfilled = frame_ids.len() - 1,
            "Tracking candidate"
        );
        self.candidate = Some(GestureCandidate {
            label: vote.label.clone(),
            gesture_type: frame.gesture_type,
            start_frame,
            end_frame: frame.id,
            frame_ids,
            confidences,
            peak_confidence,
            start_time,
            last_seen_time: frame.timestamp,
        });
    }

    fn check_stability(&mut self) -> Option<RecognizedGesture> {
        let candidate = self.candidate.as_ref()?;
        if candidate.duration_frames() < self.config.stability_threshold {
            return None;
        }
        let label = candidate.label.clone();
        self.set_state(AggregationState::Stable);
        let gesture = self.finalize();
        self.held_label = Some(label);
        gesture
    }

    fn finalize(&mut self) -> Option<RecognizedGesture> {
        let candidate = self.candidate.take()?;

        let mut alternatives: Vec<(String, f32, f32)> = tally(&self.history)
            .into_iter()
            .filter(|t| t.label != candidate.label)
            .map(|t| (t.label.to_string(), t.mean_confidence(), t.score()))
            .collect();
        alternatives.sort_by(|a, b| b.2.total_cmp(&a.2));

        let mut gesture = RecognizedGesture::new(
            candidate.label.clone(),
            candidate.gesture_type,
            candidate.average_confidence(),
            candidate.start_time,
            candidate.last_seen_time,
        );
        gesture.frame_count = candidate.duration_frames();
        gesture.supporting_frames = candidate.frame_ids;
        gesture.alternative_labels = alternatives
            .into_iter()
            .take(MAX_ALTERNATIVES)
            .map(|(label, confidence, _)| (label, confidence))
            .collect();
        gesture.is_word_level = matches!(
            candidate.gesture_type,
            GestureType::Word | GestureType::Phrase
        );

        self.gestures_recognized += 1;
        self.claimed_through = Some(candidate.end_frame);
        self.last_gesture = Some(gesture.clone());

        tracing::debug!(
            label = %gesture.label,
            confidence = gesture.confidence,
            frames = gesture.frame_count,
            "Gesture recognized"
        );
        for listener in &mut self.gesture_listeners {
            listener(&gesture);
        }
        Some(gesture)
    }

    fn set_state(&mut self, state: AggregationState) {
        if state == self.state {
            return;
        }
        tracing::debug!(from = %self.state, to = %state, "Aggregation state change");
        self.state = state;
        for listener in &mut self.state_listeners {
            listener(state);
        }
    }

    /// Emits the current candidate if it spans at least two frames.
    ///
    /// Used when the stream ends or the host times out, so a trailing
    /// gesture is not lost.
    pub fn force_finalize(&mut self) -> Option<RecognizedGesture> {
        if self
            .candidate
            .as_ref()
            .is_none_or(|c| c.duration_frames() < 2)
        {
            return None;
        }
        let gesture = self.finalize();
        self.set_state(AggregationState::Idle);
        gesture
    }

    /// The un-stabilized vote over the current history.
    pub fn current_prediction(&self) -> Option<Vote> {
        vote(&self.history)
    }

    pub fn state(&self) -> AggregationState {
        self.state
    }

    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    pub fn candidate(&self) -> Option<&GestureCandidate> {
        self.candidate.as_ref()
    }

    pub fn last_gesture(&self) -> Option<&RecognizedGesture> {
        self.last_gesture.as_ref()
    }

    /// Frames currently in the window.
    pub fn buffer_len(&self) -> usize {
        self.frames.len()
    }

    pub fn statistics(&self) -> AggregatorStatistics {
        AggregatorStatistics {
            frames_processed: self.frames_processed,
            gestures_recognized: self.gestures_recognized,
            state: self.state,
            buffer_len: self.frames.len(),
            current_candidate: self.candidate.as_ref().map(|c| c.label.clone()),
        }
    }

    /// Drops all buffers and returns to `Idle`.
    ///
    /// The recognized-gesture counter survives; see [`Self::reset_statistics`].
    pub fn clear(&mut self) {
        self.frames.clear();
        self.history.clear();
        self.candidate = None;
        self.held_label = None;
        self.claimed_through = None;
        self.frames_processed = 0;
        self.no_hand_streak = 0;
        self.set_state(AggregationState::Idle);
    }

    pub fn reset_statistics(&mut self) {
        self.gestures_recognized = 0;
    }
}

impl Default for TemporalAggregator {
    fn default() -> Self {
        Self::new(AggregatorConfig::default())
    }
}

impl std::fmt::Debug for TemporalAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemporalAggregator")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("candidate", &self.candidate)
            .field("buffer_len", &self.frames.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct Feed {
        aggregator: TemporalAggregator,
        next_id: u64,
        emitted: Vec<RecognizedGesture>,
    }

    impl Feed {
        fn new() -> Self {
            Self::with_config(AggregatorConfig::default())
        }

        fn with_config(config: AggregatorConfig) -> Self {
            Self {
                aggregator: TemporalAggregator::new(config),
                next_id: 0,
                emitted: Vec::new(),
            }
        }

        fn timestamp(&self) -> f64 {
            self.next_id as f64 / 30.0
        }

        fn label(&mut self, label: &str, confidence: f32, count: usize) {
            for _ in 0..count {
                self.next_id += 1;
                let frame =
                    GestureFrame::with_prediction(self.next_id, self.timestamp(), label, confidence);
                if let Some(g) = self.aggregator.process_frame(frame) {
                    self.emitted.push(g);
                }
            }
        }

        fn no_hand(&mut self, count: usize) {
            for _ in 0..count {
                self.next_id += 1;
                let frame = GestureFrame::new(self.next_id, self.timestamp());
                if let Some(g) = self.aggregator.process_frame(frame) {
                    self.emitted.push(g);
                }
            }
        }

        fn labels(&self) -> Vec<&str> {
            self.emitted.iter().map(|g| g.label.as_str()).collect()
        }
    }

    #[test]
    fn test_stable_run_emits_exactly_once() {
        let mut feed = Feed::new();
        feed.label("A", 0.9, 5);

        assert_eq!(feed.labels(), vec!["A"]);
        let g = &feed.emitted[0];
        assert_eq!(g.frame_count, 5);
        assert_eq!(g.supporting_frames, vec![1, 2, 3, 4, 5]);
        assert!(g.end_time >= g.start_time);
        assert!(g.confidence > 0.85 && g.confidence <= 0.9 + 1e-6);

        feed.label("A", 0.9, 10);
        assert_eq!(feed.emitted.len(), 1, "held label must not re-emit");
        assert_eq!(feed.aggregator.state(), AggregationState::Stable);
    }

    #[test]
    fn test_short_flicker_is_abandoned() {
        let mut feed = Feed::new();
        feed.label("A", 0.9, 1);
        feed.label("B", 0.9, 6);

        assert_eq!(feed.labels(), vec!["B"]);
        assert_eq!(feed.emitted[0].frame_count, 5);
    }

    #[test]
    fn test_substantial_candidate_is_emitted_before_switching() {
        let mut feed = Feed::new();
        feed.label("A", 0.9, 2);
        feed.label("B", 0.9, 8);

        assert_eq!(feed.labels(), vec!["A", "B"]);
        let a = &feed.emitted[0];
        let b = &feed.emitted[1];
        assert!(
            a.supporting_frames.iter().max() < b.supporting_frames.iter().min(),
            "emitted gestures must not share frames"
        );
    }

    #[test]
    fn test_no_hand_finalizes_tracked_candidate_once() {
        let mut feed = Feed::new();
        feed.label("A", 0.9, 3);
        assert!(feed.emitted.is_empty());
        assert_eq!(feed.aggregator.state(), AggregationState::Tracking);

        feed.no_hand(defaults::TRANSITION_FRAMES + 1);
        assert_eq!(feed.labels(), vec!["A"]);
        assert_eq!(feed.emitted[0].frame_count, 3);
        assert_eq!(feed.aggregator.state(), AggregationState::Idle);

        feed.no_hand(10);
        assert_eq!(feed.emitted.len(), 1);
    }

    #[test]
    fn test_brief_hand_loss_keeps_candidate() {
        let mut feed = Feed::new();
        feed.label("A", 0.9, 2);
        feed.no_hand(1);
        feed.label("A", 0.9, 1);
        assert!(feed.emitted.is_empty());
        assert_eq!(feed.aggregator.candidate().map(|c| c.label.as_str()), Some("A"));
    }

    #[test]
    fn test_repeated_letter_after_hand_drop_emits_again() {
        let mut feed = Feed::new();
        feed.label("L", 0.9, 5);
        feed.no_hand(defaults::TRANSITION_FRAMES + 1);
        feed.label("L", 0.9, 5);
        assert_eq!(feed.labels(), vec!["L", "L"]);
    }

    #[test]
    fn test_new_letter_after_hand_drop_is_not_outvoted_by_the_old_one() {
        let mut feed = Feed::new();
        feed.label("H", 0.9, 12);
        feed.no_hand(defaults::TRANSITION_FRAMES + 1);
        feed.label("E", 0.9, 12);
        assert_eq!(feed.labels(), vec!["H", "E"]);
    }

    #[test]
    fn test_low_confidence_frames_never_vote() {
        let mut feed = Feed::new();
        feed.label("A", 0.3, 20);
        assert!(feed.emitted.is_empty());
        assert!(feed.aggregator.current_prediction().is_none());
        assert_eq!(feed.aggregator.state(), AggregationState::Idle);
    }

    #[test]
    fn test_force_finalize_requires_two_frames() {
        let mut feed = Feed::new();
        feed.label("A", 0.9, 1);
        feed.label("B", 0.9, 1);
        // Vote picked A on frame 2 from a B frame, so the candidate is one frame.
        assert_eq!(feed.aggregator.candidate().map(|c| c.duration_frames()), Some(1));
        assert!(feed.aggregator.force_finalize().is_none());

        let mut feed = Feed::new();
        feed.label("C", 0.9, 3);
        let g = feed.aggregator.force_finalize().unwrap();
        assert_eq!(g.label, "C");
        assert_eq!(feed.aggregator.state(), AggregationState::Idle);
        assert!(feed.aggregator.force_finalize().is_none());
    }

    #[test]
    fn test_listeners_see_emissions_and_transitions() {
        let gestures = Arc::new(Mutex::new(Vec::new()));
        let states = Arc::new(Mutex::new(Vec::new()));

        let mut feed = Feed::new();
        let g = Arc::clone(&gestures);
        feed.aggregator
            .on_gesture_recognized(move |gesture| g.lock().unwrap().push(gesture.label.clone()));
        let s = Arc::clone(&states);
        feed.aggregator
            .on_state_change(move |state| s.lock().unwrap().push(state));

        feed.label("A", 0.9, 5);

        assert_eq!(*gestures.lock().unwrap(), vec!["A".to_string()]);
        assert_eq!(
            *states.lock().unwrap(),
            vec![AggregationState::Tracking, AggregationState::Stable]
        );
    }

    #[test]
    fn test_non_finite_landmarks_count_as_no_hand() {
        let mut aggregator = TemporalAggregator::default();
        let mut frame = GestureFrame::with_prediction(1, 0.0, "A", 0.9);
        let mut landmarks = [[0.0f32; 3]; defaults::LANDMARK_COUNT];
        landmarks[0][0] = f32::INFINITY;
        frame.landmarks = Some(landmarks);

        assert!(aggregator.process_frame(frame).is_none());
        assert_eq!(aggregator.statistics().frames_processed, 1);
        assert!(aggregator.current_prediction().is_none());
    }

    #[test]
    fn test_statistics_and_clear() {
        let mut feed = Feed::new();
        feed.label("A", 0.9, 5);
        feed.label("B", 0.9, 2);

        let stats = feed.aggregator.statistics();
        assert_eq!(stats.frames_processed, 7);
        assert_eq!(stats.gestures_recognized, 1);
        assert_eq!(stats.buffer_len, 7);

        feed.aggregator.clear();
        let stats = feed.aggregator.statistics();
        assert_eq!(stats.frames_processed, 0);
        assert_eq!(stats.buffer_len, 0);
        assert_eq!(stats.state, AggregationState::Idle);
        assert_eq!(stats.gestures_recognized, 1);

        feed.aggregator.reset_statistics();
        assert_eq!(feed.aggregator.statistics().gestures_recognized, 0);
    }

    #[test]
    fn test_buffer_is_bounded_by_window() {
        let mut feed = Feed::with_config(AggregatorConfig {
            window_size: 4,
            ..AggregatorConfig::default()
        });
        feed.label("A", 0.9, 12);
        assert_eq!(feed.aggregator.buffer_len(), 4);
    }

    #[test]
    fn test_alternatives_are_reported() {
        let mut feed = Feed::new();
        feed.label("A", 0.9, 2);
        feed.label("B", 0.6, 1);
        feed.label("A", 0.9, 3);
        let g = feed.emitted.first().unwrap();
        assert_eq!(g.label, "A");
        assert_eq!(g.alternative_labels.len(), 1);
        assert_eq!(g.alternative_labels[0].0, "B");
    }
}

//! Frames and gestures in, text and events out.

use crate::aggregator::{AggregatorConfig, TemporalAggregator};
use crate::clock::{Clock, SystemClock, secs_between};
use crate::defaults;
use crate::error::Result;
use crate::gesture::{
    FrameInput, GestureFrame, GestureType, RecognizedGesture, TranslationResult, clamp_confidence,
};
use crate::pipeline::sink::{EventSink, FnSink};
use crate::pipeline::types::{
    PipelineEvent, PipelineMode, PipelineState, PipelineStatistics, TranslationMode,
};
use crate::sentence::{ConstructionMode, ContinuousSentenceBuilder, SentenceConfig, SentenceEvent};
use crate::text_to_sign::{SignSequenceResult, TextToSignTranslator};
use crate::vocabulary::SignVocabulary;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Configuration for the sign pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub aggregator: AggregatorConfig,
    /// Silence that closes a word.
    pub word_timeout: Duration,
    /// Silence that closes a sentence.
    pub sentence_timeout: Duration,
    pub translation_mode: TranslationMode,
    /// Finalize the sentence after `sentence_timeout` of inactivity.
    pub auto_translate: bool,
    /// One sign per letter when fingerspelling, instead of one bundled unit.
    pub expand_fingerspelling: bool,
    /// Look up spelled words and abbreviations.
    pub word_recognition: bool,
    /// Accept predictions for gestures that need motion.
    pub dynamic_gestures: bool,
    /// Accept pre-smoothed gestures through `process_gesture`.
    pub heuristics: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            aggregator: AggregatorConfig::default(),
            word_timeout: Duration::from_secs_f64(defaults::WORD_TIMEOUT_SECS),
            sentence_timeout: Duration::from_secs_f64(defaults::SENTENCE_TIMEOUT_SECS),
            translation_mode: TranslationMode::default(),
            auto_translate: true,
            expand_fingerspelling: true,
            word_recognition: true,
            dynamic_gestures: true,
            heuristics: true,
        }
    }
}

impl PipelineConfig {
    pub fn sentence_config(&self) -> SentenceConfig {
        SentenceConfig {
            mode: if self.word_recognition {
                ConstructionMode::Hybrid
            } else {
                ConstructionMode::LetterByLetter
            },
            word_timeout: self.word_timeout,
            sentence_timeout: self.sentence_timeout,
        }
    }
}

/// Owns the recognition components and the run state.
///
/// All calls are synchronous. Events reach the registered sinks before the
/// call that produced them returns.
pub struct SignPipeline<C: Clock + Clone = SystemClock> {
    config: PipelineConfig,
    vocabulary: Arc<SignVocabulary>,
    aggregator: TemporalAggregator,
    builder: ContinuousSentenceBuilder<C>,
    translator: TextToSignTranslator,
    state: PipelineState,
    sinks: Vec<Box<dyn EventSink>>,
    clock: C,
    /// Origin for timestamps synthesized from the clock.
    epoch: Instant,
    next_frame_id: u64,
    last_gesture_at: Option<Instant>,
}

impl SignPipeline<SystemClock> {
    /// Pipeline with the built-in vocabulary.
    pub fn new(config: PipelineConfig) -> Self {
        Self::with_clock(config, Arc::new(SignVocabulary::new()), SystemClock)
    }
}

impl Default for SignPipeline<SystemClock> {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

impl<C: Clock + Clone> SignPipeline<C> {
    pub fn with_clock(config: PipelineConfig, vocabulary: Arc<SignVocabulary>, clock: C) -> Self {
        let builder = ContinuousSentenceBuilder::with_clock(
            Arc::clone(&vocabulary),
            config.sentence_config(),
            clock.clone(),
        );
        Self {
            aggregator: TemporalAggregator::new(config.aggregator),
            translator: TextToSignTranslator::new(Arc::clone(&vocabulary)),
            builder,
            vocabulary,
            state: PipelineState::default(),
            sinks: Vec::new(),
            epoch: clock.now(),
            clock,
            config,
            next_frame_id: 0,
            last_gesture_at: None,
        }
    }

    pub fn add_sink(&mut self, sink: Box<dyn EventSink>) {
        tracing::debug!(sink = sink.name(), "Event sink registered");
        self.sinks.push(sink);
    }

    /// Registers a closure for every event.
    pub fn on_event<F>(&mut self, listener: F)
    where
        F: FnMut(&PipelineEvent) + Send + 'static,
    {
        self.add_sink(Box::new(FnSink(listener)));
    }

    /// Clears everything and begins a session in `mode`.
    pub fn start(&mut self, mode: PipelineMode) {
        self.clear();
        self.state.mode = mode;
        self.state.is_processing = mode.accepts_input();
        self.state.start_time = Some(self.clock.now());
        tracing::debug!(mode = %mode, "Pipeline started");
        self.notify_state_change();
    }

    /// Ends the session without translating.
    pub fn stop(&mut self) {
        self.set_idle();
    }

    /// Ends the session and returns the translation of what was signed.
    ///
    /// A candidate still in the aggregator is flushed first. With nothing
    /// accumulated, or when the sentence was already delivered by a
    /// timeout, the result is empty.
    pub fn stop_and_translate(&mut self) -> TranslationResult {
        if let Some(gesture) = self.aggregator.force_finalize() {
            self.handle_gesture(gesture);
        }

        let result = if self.builder.is_finalized() {
            TranslationResult::default()
        } else {
            self.builder.finalize()
        };
        self.refresh_text();

        if !result.text.is_empty() {
            tracing::debug!(text = %result.text, "Translation complete");
            self.emit(PipelineEvent::TranslationComplete(result.clone()));
        }
        self.set_idle();
        result
    }

    /// Feeds one frame. Returns the current text when a gesture was recognized.
    pub fn process_frame(&mut self, input: FrameInput) -> Option<String> {
        if !self.state.is_processing {
            return None;
        }

        let frame_id = self.next_frame_id;
        self.next_frame_id += 1;
        let now = self.clock.now();
        let timestamp = input
            .timestamp
            .unwrap_or_else(|| self.synthetic_timestamp(frame_id, now));
        let frame = self.build_frame(frame_id, timestamp, input);

        self.state.frames_processed += 1;
        self.state.last_update_time = Some(now);
        if let Some(label) = &frame.predicted_label
            && frame.confidence > 0.0
        {
            self.state.last_gesture = Some(label.clone());
            self.state.last_confidence = frame.confidence;
        }

        let text = match self.aggregator.process_frame(frame) {
            Some(gesture) => {
                self.handle_gesture(gesture);
                Some(self.state.current_text.clone())
            }
            None => None,
        };

        if self.config.auto_translate && self.state.mode == PipelineMode::LiveAccumulate {
            self.check_auto_translate();
        }
        text
    }

    /// Adds a gesture that was already smoothed by the caller.
    ///
    /// Returns `None` when not processing, when the bypass is disabled, or
    /// when the confidence is below the aggregator's minimum.
    pub fn process_gesture(
        &mut self,
        label: &str,
        confidence: f32,
        gesture_type: GestureType,
    ) -> Option<String> {
        if !self.state.is_processing {
            return None;
        }
        if !self.config.heuristics {
            tracing::debug!(label, "Gesture bypass disabled, ignoring");
            return None;
        }
        let confidence = clamp_confidence(confidence);
        if confidence < self.config.aggregator.min_confidence {
            return None;
        }

        let at = secs_between(self.epoch, self.clock.now());
        let gesture = RecognizedGesture::new(label, gesture_type, confidence, at, at);
        self.handle_gesture(gesture);
        Some(self.state.current_text.clone())
    }

    /// Polls the word and sentence timeouts.
    ///
    /// The word boundary is applied before the sentence boundary. Returns
    /// the translation when the sentence timed out.
    pub fn check_timeouts(&mut self) -> Option<TranslationResult> {
        if !self.state.is_processing {
            return None;
        }

        let events = if self.config.auto_translate {
            self.builder.check_timeouts()
        } else {
            let status = self.builder.constructor().check_timeout();
            let word = if status.word {
                self.builder.constructor_mut().finalize_word()
            } else {
                None
            };
            match word {
                Some(word) => vec![SentenceEvent::WordCompleted { word }],
                None => Vec::new(),
            }
        };
        if events.is_empty() {
            return None;
        }

        self.refresh_text();
        let completed = self.publish(&events);
        if completed.is_some() && self.state.mode == PipelineMode::LiveAccumulate {
            tracing::debug!("Auto-translate finished the session");
            self.set_idle();
        }
        completed
    }

    fn check_auto_translate(&mut self) {
        let Some(last) = self.last_gesture_at else {
            return;
        };
        if self.clock.now().saturating_duration_since(last) >= self.config.sentence_timeout {
            self.check_timeouts();
        }
    }

    /// Renders `text` as signs; the run state is untouched.
    pub fn translate_text_to_sign(&self, text: &str) -> SignSequenceResult {
        self.translator
            .translate(text, self.config.expand_fingerspelling)
    }

    /// Forces a word boundary.
    pub fn insert_space(&mut self) {
        self.builder.constructor_mut().insert_space();
        self.after_correction();
    }

    /// Removes the last word, or the last letter. Returns whether anything
    /// was removed.
    pub fn delete_last(&mut self, delete_word: bool) -> bool {
        let constructor = self.builder.constructor_mut();
        let removed = if delete_word {
            constructor.remove_last_word()
        } else {
            constructor.remove_last_letter()
        };
        if removed {
            self.after_correction();
        }
        removed
    }

    /// Registers a custom word sign shared by recognition and text-to-sign.
    pub fn add_custom_word(
        &mut self,
        text: &str,
        gesture_labels: &[&str],
        description: Option<&str>,
        emoji: Option<&str>,
    ) -> Result<String> {
        let id = Arc::make_mut(&mut self.vocabulary).add_custom_word(
            text,
            gesture_labels,
            description,
            emoji,
        )?;
        self.builder
            .constructor_mut()
            .set_vocabulary(Arc::clone(&self.vocabulary));
        self.translator.set_vocabulary(Arc::clone(&self.vocabulary));
        Ok(id)
    }

    /// Resets every buffer and the run state. The mode returns to idle.
    pub fn clear(&mut self) {
        self.aggregator.clear();
        self.aggregator.reset_statistics();
        self.builder.clear();
        self.state = PipelineState::default();
        self.next_frame_id = 0;
        self.last_gesture_at = None;
    }

    pub fn current_text(&self) -> &str {
        self.builder.current_text()
    }

    pub fn preview(&self) -> String {
        self.builder.preview()
    }

    pub fn state(&self) -> &PipelineState {
        &self.state
    }

    pub fn statistics(&self) -> PipelineStatistics {
        let constructor = self.builder.constructor();
        PipelineStatistics {
            mode: self.state.mode,
            frames_processed: self.state.frames_processed,
            gestures_recognized: self.state.gestures_recognized,
            current_text: self.state.current_text.clone(),
            aggregator: self.aggregator.statistics(),
            word_count: constructor.word_count(),
            gesture_count: constructor.gesture_count(),
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn vocabulary(&self) -> &Arc<SignVocabulary> {
        &self.vocabulary
    }

    pub fn translator(&self) -> &TextToSignTranslator {
        &self.translator
    }

    pub fn aggregator(&self) -> &TemporalAggregator {
        &self.aggregator
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn synthetic_timestamp(&self, frame_id: u64, now: Instant) -> f64 {
        if self.state.mode == PipelineMode::VideoProcess {
            frame_id as f64 / f64::from(self.config.aggregator.target_fps.max(1))
        } else {
            secs_between(self.epoch, now)
        }
    }

    fn build_frame(&self, frame_id: u64, timestamp: f64, input: FrameInput) -> GestureFrame {
        let mut frame = GestureFrame::new(frame_id, timestamp);
        frame.predicted_label = input.predicted_label.filter(|l| !l.trim().is_empty());
        frame.confidence = clamp_confidence(input.confidence);
        frame.gesture_type = match input.gesture_type {
            GestureType::Unknown if frame.predicted_label.is_some() => GestureType::Static,
            other => other,
        };
        frame.hand_detected = input.hand_detected || input.landmarks.is_some();
        frame.landmarks = input.landmarks;
        frame.features = input.features;

        if !self.config.dynamic_gestures
            && let Some(label) = frame.predicted_label.as_deref()
            && (frame.gesture_type == GestureType::Dynamic
                || self.vocabulary.is_dynamic_gesture(label))
        {
            tracing::debug!(label, "Dynamic gestures disabled, dropping prediction");
            frame.predicted_label = None;
            frame.confidence = 0.0;
        }
        frame
    }

    fn handle_gesture(&mut self, mut gesture: RecognizedGesture) {
        self.state.gestures_recognized += 1;
        self.last_gesture_at = Some(self.clock.now());

        if let Some(sign) = self
            .vocabulary
            .get_sign_by_gesture(&gesture.label)
            .filter(|s| s.category.is_word_level())
        {
            gesture.is_word_level = true;
            if gesture.semantic_meaning.is_none() {
                gesture.semantic_meaning = Some(sign.text.clone());
            }
        }

        let events = self.builder.add_gesture(gesture.clone());
        self.emit(PipelineEvent::GestureRecognized(gesture));
        self.refresh_text();
        self.publish(&events);
    }

    /// Publishes what the translation mode allows. Returns the completed
    /// sentence, if any.
    fn publish(&mut self, events: &[SentenceEvent]) -> Option<TranslationResult> {
        let word_completed = events
            .iter()
            .any(|e| matches!(e, SentenceEvent::WordCompleted { .. }));
        let text_changed = word_completed
            || events
                .iter()
                .any(|e| matches!(e, SentenceEvent::TextUpdated { .. }));

        if self.publishes_text(text_changed, word_completed) {
            self.emit_text_updated();
        }

        let completed = events.iter().find_map(|e| match e {
            SentenceEvent::SentenceCompleted(result) => Some(result.clone()),
            _ => None,
        });
        if let Some(result) = &completed {
            self.emit(PipelineEvent::TranslationComplete(result.clone()));
        }
        completed
    }

    fn publishes_text(&self, text_changed: bool, word_completed: bool) -> bool {
        if self.state.mode == PipelineMode::LiveContinuous {
            return text_changed;
        }
        match self.config.translation_mode {
            TranslationMode::Instant => text_changed,
            TranslationMode::Word => word_completed,
            TranslationMode::Sentence => false,
        }
    }

    fn after_correction(&mut self) {
        self.refresh_text();
        if self.publishes_text(true, true) {
            self.emit_text_updated();
        }
    }

    fn refresh_text(&mut self) {
        self.state.current_text = self.builder.current_text().to_string();
        self.state.current_preview = self.builder.preview();
    }

    fn emit_text_updated(&mut self) {
        let event = PipelineEvent::TextUpdated {
            text: self.state.current_text.clone(),
            preview: self.state.current_preview.clone(),
        };
        self.emit(event);
    }

    fn set_idle(&mut self) {
        let changed = self.state.mode != PipelineMode::Idle || self.state.is_processing;
        self.state.mode = PipelineMode::Idle;
        self.state.is_processing = false;
        if changed {
            self.notify_state_change();
        }
    }

    fn notify_state_change(&mut self) {
        let event = PipelineEvent::StateChanged {
            mode: self.state.mode,
            is_processing: self.state.is_processing,
        };
        self.emit(event);
    }

    fn emit(&mut self, event: PipelineEvent) {
        for sink in &mut self.sinks {
            if let Err(e) = sink.handle(&event) {
                tracing::warn!(sink = sink.name(), "Event sink failed: {e}");
            }
        }
    }
}

impl<C: Clock + Clone> std::fmt::Debug for SignPipeline<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignPipeline")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("sinks", &self.sinks.len())
            .finish_non_exhaustive()
    }
}

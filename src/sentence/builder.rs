//! Streaming wrapper that turns timeouts into word and sentence events.

use crate::clock::{Clock, SystemClock};
use crate::gesture::{RecognizedGesture, TranslationResult};
use crate::sentence::constructor::{SentenceConfig, SentenceConstructor};
use crate::vocabulary::SignVocabulary;
use std::sync::Arc;

/// Something a [`ContinuousSentenceBuilder`] wants the host to know.
#[derive(Debug, Clone, PartialEq)]
pub enum SentenceEvent {
    TextUpdated { text: String, preview: String },
    WordCompleted { word: String },
    SentenceCompleted(TranslationResult),
}

type Listener = Box<dyn FnMut(&SentenceEvent) + Send>;

/// Sentence constructor driven by a host poll.
///
/// Each call returns the events it produced and also hands them to the
/// registered listeners, in order. Once a sentence completes, the next
/// gesture starts a fresh one.
pub struct ContinuousSentenceBuilder<C: Clock = SystemClock> {
    constructor: SentenceConstructor<C>,
    listeners: Vec<Listener>,
    finalized: bool,
}

impl ContinuousSentenceBuilder<SystemClock> {
    pub fn new(vocabulary: Arc<SignVocabulary>, config: SentenceConfig) -> Self {
        Self::with_clock(vocabulary, config, SystemClock)
    }
}

impl<C: Clock> ContinuousSentenceBuilder<C> {
    pub fn with_clock(vocabulary: Arc<SignVocabulary>, config: SentenceConfig, clock: C) -> Self {
        Self {
            constructor: SentenceConstructor::with_clock(vocabulary, config, clock),
            listeners: Vec::new(),
            finalized: false,
        }
    }

    /// Registers a listener for every event.
    pub fn on_event<F>(&mut self, listener: F)
    where
        F: FnMut(&SentenceEvent) + Send + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn add_gesture(&mut self, gesture: RecognizedGesture) -> Vec<SentenceEvent> {
        if self.finalized {
            self.constructor.clear();
            self.finalized = false;
        }

        let words_before = self.constructor.word_count();
        self.constructor.add_gesture(gesture);

        let mut events: Vec<SentenceEvent> = self.constructor.words()[words_before..]
            .iter()
            .map(|word| SentenceEvent::WordCompleted { word: word.clone() })
            .collect();
        if !self.constructor.current_text().is_empty() {
            events.push(self.text_updated());
        }
        self.dispatch(&events);
        events
    }

    /// Word timeout first, then sentence timeout.
    ///
    /// Does nothing after the sentence has completed.
    pub fn check_timeouts(&mut self) -> Vec<SentenceEvent> {
        if self.finalized {
            return Vec::new();
        }
        let status = self.constructor.check_timeout();
        let mut events = Vec::new();

        if status.word
            && let Some(word) = self.constructor.finalize_word()
        {
            events.push(SentenceEvent::WordCompleted { word });
            events.push(self.text_updated());
        }

        if status.sentence {
            let result = self.constructor.finalize_sentence();
            self.finalized = true;
            if !result.text.is_empty() {
                tracing::debug!(text = %result.text, "Sentence completed by timeout");
                events.push(SentenceEvent::SentenceCompleted(result));
            }
        }

        self.dispatch(&events);
        events
    }

    /// Ends the sentence now, regardless of timeouts.
    pub fn finalize(&mut self) -> TranslationResult {
        let result = self.constructor.finalize_sentence();
        self.finalized = true;
        if !result.text.is_empty() {
            let events = [SentenceEvent::SentenceCompleted(result.clone())];
            self.dispatch(&events);
        }
        result
    }

    fn text_updated(&self) -> SentenceEvent {
        SentenceEvent::TextUpdated {
            text: self.constructor.current_text().to_string(),
            preview: self.constructor.preview(),
        }
    }

    fn dispatch(&mut self, events: &[SentenceEvent]) {
        for event in events {
            for listener in &mut self.listeners {
                listener(event);
            }
        }
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    pub fn current_text(&self) -> &str {
        self.constructor.current_text()
    }

    pub fn preview(&self) -> String {
        self.constructor.preview()
    }

    pub fn constructor(&self) -> &SentenceConstructor<C> {
        &self.constructor
    }

    pub fn constructor_mut(&mut self) -> &mut SentenceConstructor<C> {
        &mut self.constructor
    }

    pub fn clear(&mut self) {
        self.constructor.clear();
        self.finalized = false;
    }
}

impl<C: Clock> std::fmt::Debug for ContinuousSentenceBuilder<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContinuousSentenceBuilder")
            .field("text", &self.constructor.current_text())
            .field("finalized", &self.finalized)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

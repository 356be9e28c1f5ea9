//! Playback cursor over a rendered sign sequence.

use crate::text_to_sign::{SignOutput, SignSequenceResult, TextToSignTranslator};

/// Steps through the signs of one text for display.
///
/// The animator does not keep time; a host advances it after each sign's
/// `duration_hint`.
#[derive(Debug, Clone)]
pub struct SignAnimator {
    translator: TextToSignTranslator,
    sequence: Option<SignSequenceResult>,
    index: usize,
    playing: bool,
}

impl SignAnimator {
    pub fn new(translator: TextToSignTranslator) -> Self {
        Self {
            translator,
            sequence: None,
            index: 0,
            playing: false,
        }
    }

    /// Translates `text` and rewinds. Playback stays stopped.
    pub fn load_text(&mut self, text: &str) {
        self.sequence = Some(self.translator.translate(text, true));
        self.index = 0;
        self.playing = false;
    }

    /// Starts from the first sign. Does nothing without signs to show.
    pub fn start(&mut self) {
        if self.sequence.as_ref().is_some_and(SignSequenceResult::has_signs) {
            self.playing = true;
            self.index = 0;
        }
    }

    pub fn stop(&mut self) {
        self.playing = false;
    }

    /// The sign to show now, while playing.
    pub fn current_sign(&self) -> Option<&SignOutput> {
        if !self.playing {
            return None;
        }
        self.sequence.as_ref()?.signs.get(self.index)
    }

    /// Moves to the next sign. Returns `false`, and stops, at the end.
    pub fn advance(&mut self) -> bool {
        let Some(sequence) = &self.sequence else {
            return false;
        };
        let total = sequence.signs.len();
        self.index = (self.index + 1).min(total);
        if self.index >= total {
            self.playing = false;
            return false;
        }
        true
    }

    /// `(position, total)`, with the position counted from 1.
    pub fn progress(&self) -> (usize, usize) {
        match &self.sequence {
            Some(sequence) => {
                let total = sequence.signs.len();
                ((self.index + 1).min(total), total)
            }
            None => (0, 0),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// True when every sign has been shown, or nothing is loaded.
    pub fn is_complete(&self) -> bool {
        self.sequence
            .as_ref()
            .is_none_or(|s| self.index >= s.signs.len())
    }

    pub fn sequence(&self) -> Option<&SignSequenceResult> {
        self.sequence.as_ref()
    }
}

//! Recorded frame streams.
//!
//! A recording is JSON lines, one [`FrameInput`] per line:
//!
//! ```text
//! {"label": "H", "confidence": 0.92, "hand_detected": true, "timestamp": 0.033}
//! {"confidence": 0.0}
//! ```
//!
//! A line needs `landmarks` or `"hand_detected": true` to count as a hand;
//! a label on its own is a no-hand frame. Blank lines and lines starting with `#` are skipped. Replays run on a
//! [`ManualClock`] that follows the recording's timestamps, so word and
//! sentence timeouts fire at the same media time they would have live.

use crate::clock::{Clock, ManualClock};
use crate::error::{Result, SigntextError};
use crate::gesture::{FrameInput, TranslationResult};
use crate::pipeline::{PipelineMode, SignPipeline};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Parses one recording line. `line` is 1-based and only used for errors.
pub fn parse_frame(text: &str, line: usize) -> Result<FrameInput> {
    serde_json::from_str(text).map_err(|e| SigntextError::Replay {
        line,
        message: e.to_string(),
    })
}

/// Lazily parsed frames of a recording.
pub struct FrameLines<R> {
    lines: std::io::Lines<R>,
    line: usize,
}

impl<R: BufRead> Iterator for FrameLines<R> {
    type Item = Result<FrameInput>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let text = match self.lines.next()? {
                Ok(text) => text,
                Err(e) => return Some(Err(e.into())),
            };
            self.line += 1;
            let trimmed = text.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            return Some(parse_frame(trimmed, self.line));
        }
    }
}

/// Iterates the frames of a recording as lines arrive.
pub fn frame_lines<R: BufRead>(reader: R) -> FrameLines<R> {
    FrameLines {
        lines: reader.lines(),
        line: 0,
    }
}

/// Reads a whole recording, stopping at the first bad line.
pub fn read_frames<R: BufRead>(reader: R) -> Result<Vec<FrameInput>> {
    frame_lines(reader).collect()
}

/// Opens a recording; `-` is stdin.
pub fn open(path: &Path) -> Result<Box<dyn BufRead>> {
    if path.as_os_str() == "-" {
        return Ok(Box::new(BufReader::new(std::io::stdin())));
    }
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            SigntextError::Other(format!("Recording not found: {}", path.display()))
        } else {
            e.into()
        }
    })?;
    Ok(Box::new(BufReader::new(file)))
}

/// What a replay produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplayOutcome {
    pub frames: usize,
    /// Every completed sentence, in order, including the final flush.
    pub translations: Vec<TranslationResult>,
}

impl ReplayOutcome {
    /// All sentences joined with spaces.
    pub fn text(&self) -> String {
        self.translations
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Plays frames through `pipeline` as a video session.
///
/// Frames without a timestamp are spaced at the configured frame rate.
/// Timeouts are polled after every frame and the session ends with
/// [`SignPipeline::stop_and_translate`].
pub fn run<I>(pipeline: &mut SignPipeline<ManualClock>, frames: I) -> ReplayOutcome
where
    I: IntoIterator<Item = FrameInput>,
{
    let clock = pipeline.clock().clone();
    let period = 1.0 / f64::from(pipeline.config().aggregator.target_fps.max(1));
    let origin = clock.now();
    let mut media_time = 0.0f64;
    let mut outcome = ReplayOutcome::default();

    pipeline.start(PipelineMode::VideoProcess);
    for (index, frame) in frames.into_iter().enumerate() {
        let at = frame.timestamp.unwrap_or(index as f64 * period);
        if at > media_time {
            clock.advance_secs(at - media_time);
            media_time = at;
        }

        pipeline.process_frame(frame);
        outcome.frames += 1;
        if let Some(result) = pipeline.check_timeouts() {
            outcome.translations.push(result);
        }
    }

    let last = pipeline.stop_and_translate();
    if !last.text.is_empty() {
        outcome.translations.push(last);
    }
    tracing::debug!(
        frames = outcome.frames,
        sentences = outcome.translations.len(),
        media_secs = crate::clock::secs_between(origin, clock.now()),
        "Replay finished"
    );
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::PipelineConfig;
    use crate::vocabulary::SignVocabulary;
    use std::io::Cursor;
    use std::sync::Arc;

    fn video_pipeline() -> SignPipeline<ManualClock> {
        SignPipeline::with_clock(
            PipelineConfig::default(),
            Arc::new(SignVocabulary::new()),
            ManualClock::new(),
        )
    }

    fn held(label: &str, frames: usize) -> impl Iterator<Item = FrameInput> + '_ {
        (0..frames).map(move |_| FrameInput::prediction(label, 0.9))
    }

    #[test]
    fn test_reads_frames_and_skips_blank_lines() {
        let input = "{\"label\": \"A\", \"confidence\": 0.9}\n\n# comment\n{\"confidence\": 0.0}\n";
        let frames = read_frames(Cursor::new(input)).unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].predicted_label.as_deref(), Some("A"));
        assert!(frames[1].predicted_label.is_none());
    }

    #[test]
    fn test_bad_line_reports_its_number() {
        let input = "{\"label\": \"A\", \"confidence\": 0.9}\n\nnot json\n";
        let err = read_frames(Cursor::new(input)).unwrap_err();
        assert!(
            matches!(err, SigntextError::Replay { line: 3, .. }),
            "expected line 3, got: {err}"
        );
    }

    #[test]
    fn test_frame_lines_is_lazy() {
        let input = "{\"label\": \"A\", \"confidence\": 0.9}\nbroken\n";
        let mut frames = frame_lines(Cursor::new(input));
        assert!(frames.next().unwrap().is_ok());
        assert!(frames.next().unwrap().is_err());
        assert!(frames.next().is_none());
    }

    #[test]
    fn test_replay_spells_a_word() {
        let mut pipeline = video_pipeline();
        let frames = held("H", 8)
            .chain((0..4).map(|_| FrameInput::no_hand()))
            .chain(held("I", 8));

        let outcome = run(&mut pipeline, frames);
        assert_eq!(outcome.frames, 20);
        assert_eq!(outcome.text(), "Hi");
        assert_eq!(pipeline.state().mode, PipelineMode::Idle);
    }

    #[test]
    fn test_long_pause_in_recording_splits_sentences() {
        let mut pipeline = video_pipeline();
        let mut frames: Vec<FrameInput> = held("yes", 8)
            .enumerate()
            .map(|(i, f)| f.at(i as f64 / 30.0))
            .collect();
        frames.extend((0..4).map(|i| FrameInput::no_hand().at(5.0 + f64::from(i) * 0.02)));
        frames.extend(
            held("no", 8)
                .enumerate()
                .map(|(i, f)| f.at(5.1 + i as f64 / 30.0)),
        );

        let outcome = run(&mut pipeline, frames);
        let texts: Vec<&str> = outcome
            .translations
            .iter()
            .map(|t| t.text.as_str())
            .collect();
        assert_eq!(texts, ["Yes", "No"]);
    }
}

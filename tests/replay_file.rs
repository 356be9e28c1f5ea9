//! Recorded frame streams played back from disk.

use signtext::clock::ManualClock;
use signtext::pipeline::{PipelineConfig, SignPipeline};
use signtext::replay;
use signtext::vocabulary::SignVocabulary;
use signtext::SigntextError;
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

fn recording(lines: &[String]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
    file
}

fn held(label: &str, frames: usize, start: f64) -> Vec<String> {
    (0..frames)
        .map(|i| {
            format!(
                r#"{{"label": "{label}", "confidence": 0.9, "hand_detected": true, "timestamp": {:.4}}}"#,
                start + i as f64 / 30.0
            )
        })
        .collect()
}

fn gap(frames: usize, start: f64) -> Vec<String> {
    (0..frames)
        .map(|i| format!(r#"{{"confidence": 0.0, "timestamp": {:.4}}}"#, start + i as f64 / 30.0))
        .collect()
}

fn pipeline() -> SignPipeline<ManualClock> {
    SignPipeline::with_clock(
        PipelineConfig::default(),
        Arc::new(SignVocabulary::new()),
        ManualClock::new(),
    )
}

#[test]
fn test_recording_spells_hello() {
    let mut lines = vec!["# H E L L O".to_string()];
    let mut t = 0.0;
    for letter in ["H", "E", "L", "L", "O"] {
        lines.extend(held(letter, 8, t));
        t += 8.0 / 30.0;
        lines.extend(gap(4, t));
        t += 4.0 / 30.0;
    }
    let file = recording(&lines);

    let frames = replay::read_frames(replay::open(file.path()).unwrap()).unwrap();
    assert_eq!(frames.len(), 60);

    let outcome = replay::run(&mut pipeline(), frames);
    assert_eq!(outcome.text(), "Hello");
    assert_eq!(outcome.translations[0].gesture_count, 5);
}

#[test]
fn test_recording_pauses_split_words() {
    let mut lines = held("N", 8, 0.0);
    lines.extend(gap(4, 0.3));
    lines.extend(held("O", 8, 0.5));
    lines.extend(gap(4, 0.8));
    lines.extend(held("yes", 8, 2.8));
    let file = recording(&lines);

    let frames = replay::read_frames(replay::open(file.path()).unwrap()).unwrap();
    let outcome = replay::run(&mut pipeline(), frames);
    assert_eq!(outcome.translations.len(), 1);
    assert_eq!(outcome.text(), "No Yes");
    assert_eq!(outcome.translations[0].word_count, 2);
}

#[test]
fn test_labels_without_a_hand_are_ignored() {
    let lines: Vec<String> = (0..12)
        .map(|i| format!(r#"{{"label": "A", "confidence": 0.9, "timestamp": {:.4}}}"#, i as f64 / 30.0))
        .collect();
    let file = recording(&lines);

    let frames = replay::read_frames(replay::open(file.path()).unwrap()).unwrap();
    let mut pipeline = pipeline();
    let outcome = replay::run(&mut pipeline, frames);
    assert_eq!(outcome.frames, 12);
    assert!(outcome.translations.is_empty());
    assert_eq!(pipeline.statistics().gestures_recognized, 0);
}

#[test]
fn test_malformed_recording_names_the_line() {
    let mut lines = held("A", 2, 0.0);
    lines.push("{\"label\": \"B\", \"confidence\": }".to_string());
    let file = recording(&lines);

    let err = replay::read_frames(replay::open(file.path()).unwrap()).unwrap_err();
    assert!(matches!(err, SigntextError::Replay { line: 3, .. }));
}

#[test]
fn test_missing_recording_is_an_error() {
    assert!(replay::open(std::path::Path::new("/tmp/no_such_signtext_recording.jsonl")).is_err());
}

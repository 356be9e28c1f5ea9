//! Configuration files driving the pipeline.

use signtext::config::Config;
use signtext::gesture::GestureType;
use signtext::pipeline::{CollectorSink, PipelineMode, SignPipeline, TranslationMode};
use signtext::SigntextError;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_file_settings_reach_the_pipeline() {
    let file = write_config(
        r#"
        [translation]
        mode = "instant"

        [features]
        word_recognition = false
        "#,
    );
    let config = Config::load(file.path()).unwrap();
    config.validate().unwrap();

    let mut pipeline = SignPipeline::new(config.pipeline_config());
    let collector = CollectorSink::new();
    pipeline.add_sink(Box::new(collector.clone()));
    pipeline.start(PipelineMode::LiveAccumulate);

    for letter in ["H", "I"] {
        pipeline.process_gesture(letter, 0.9, GestureType::Static);
    }
    assert_eq!(collector.texts(), ["H", "HI"]);
    assert_eq!(pipeline.config().translation_mode, TranslationMode::Instant);

    // Without word recognition "HI" is not looked up as "Hi".
    let result = pipeline.stop_and_translate();
    assert_eq!(result.text, "HI");
}

#[test]
fn test_strict_confidence_rejects_gestures() {
    let file = write_config("[aggregation]\nmin_confidence = 0.95\n");
    let config = Config::load(file.path()).unwrap();

    let mut pipeline = SignPipeline::new(config.pipeline_config());
    pipeline.start(PipelineMode::LiveAccumulate);
    assert!(pipeline.process_gesture("A", 0.9, GestureType::Static).is_none());
    assert!(pipeline.process_gesture("A", 0.97, GestureType::Static).is_some());
}

#[test]
fn test_inconsistent_timeouts_fail_validation() {
    let file = write_config(
        r#"
        [sentence]
        word_timeout_secs = 4.0
        sentence_timeout_secs = 2.0
        "#,
    );
    let config = Config::load(file.path()).unwrap();
    let err = config.validate().unwrap_err();
    assert!(matches!(err, SigntextError::ConfigInvalidValue { .. }));
}

#[test]
fn test_malformed_file_is_an_error_not_defaults() {
    let file = write_config("[sentence\nword_timeout_secs = ");
    assert!(Config::load_or_default(file.path()).is_err());
}

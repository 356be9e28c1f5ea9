//! Text → sign rendering through the public API.

use signtext::pipeline::{PipelineConfig, SignPipeline};
use signtext::text_to_sign::{SignAnimator, SignOutputType, TextToSignTranslator};
use signtext::vocabulary::SignVocabulary;
use std::sync::Arc;

fn translator() -> TextToSignTranslator {
    TextToSignTranslator::new(Arc::new(SignVocabulary::new()))
}

#[test]
fn test_word_sign_text_maps_back_to_the_same_sign() {
    let vocabulary = SignVocabulary::new();
    let pipeline = SignPipeline::new(PipelineConfig::default());
    let result = pipeline.translate_text_to_sign("Hello");

    let words: Vec<_> = result
        .signs
        .iter()
        .filter(|s| s.output_type == SignOutputType::WordSign)
        .collect();
    assert_eq!(words.len(), 1);

    let text: String = words.iter().map(|s| s.text.as_str()).collect();
    let sign = vocabulary.get_sign_by_text(&text).expect("text should resolve");
    assert_eq!(sign.id, words[0].sign_id);
}

#[test]
fn test_unknown_word_is_fingerspelled_letter_by_letter() {
    let result = translator().translate("Xyzzy", true);

    assert_eq!(result.signs.len(), 5);
    assert_eq!(result.fingerspelled_count, 1);
    assert!(
        result
            .signs
            .iter()
            .all(|s| s.output_type != SignOutputType::WordSign)
    );
    let letters: String = result.signs.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(letters.to_uppercase(), "XYZZY");
}

#[test]
fn test_unknown_word_can_be_bundled() {
    let result = translator().translate("Xyzzy", false);

    assert_eq!(result.signs.len(), 1);
    assert_eq!(result.signs[0].output_type, SignOutputType::Fingerspell);
    assert_eq!(result.signs[0].letters.len(), 5);
}

#[test]
fn test_sentence_mixes_words_numbers_and_spelling() {
    let result = translator().translate("I want 2 tacos!", true);

    assert!(result.has_signs());
    assert!(
        result
            .signs
            .iter()
            .any(|s| s.output_type == SignOutputType::Number && s.text == "2")
    );
    assert!(result.signs.iter().any(|s| s.sign_id == "word_want"));
    assert_eq!(result.fingerspelled_count, 1);
    assert!(result.total_duration() > 0.0);
}

#[test]
fn test_streaming_matches_batch_translation() {
    let t = translator();
    let text = "please help me";
    let batch: Vec<String> = t
        .translate(text, true)
        .signs
        .into_iter()
        .map(|s| s.sign_id)
        .collect();
    let streamed: Vec<String> = t.translate_streaming(text).map(|s| s.sign_id).collect();
    assert_eq!(batch, streamed);
}

#[test]
fn test_custom_phrase_patterns_win_over_words() {
    let mut t = translator();
    t.add_phrase_pattern("good night", ["goodbye"]);
    let result = t.translate("Good night", true);
    let ids: Vec<&str> = result.signs.iter().map(|s| s.sign_id.as_str()).collect();
    assert_eq!(ids, ["word_goodbye"]);
}

#[test]
fn test_animator_walks_the_sequence() {
    let mut animator = SignAnimator::new(translator());
    animator.load_text("thank you");
    animator.start();

    let mut shown = Vec::new();
    while let Some(sign) = animator.current_sign() {
        shown.push(sign.sign_id.clone());
        if !animator.advance() {
            break;
        }
    }
    assert_eq!(shown, ["word_thanks"]);
    assert!(animator.is_complete());
}

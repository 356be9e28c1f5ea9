//! Terminal rendering for pipeline events, translations and sign sequences.
//! Human-facing output goes to stderr; the final text goes to stdout.

use crate::gesture::{ConfidenceLevel, RecognizedGesture, TranslationResult};
use crate::pipeline::PipelineEvent;
use crate::text_to_sign::{SignOutput, SignOutputType, SignSequenceResult};
use std::io::{self, Write};

const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";
const RESET: &str = "\x1b[0m";

/// Clear the current terminal line (replaces the live preview)
pub fn clear_line() {
    eprint!("\r\x1b[2K");
}

/// ANSI color for a confidence bucket; empty means the terminal default.
fn confidence_color(confidence: f32) -> &'static str {
    match ConfidenceLevel::from_confidence(confidence) {
        ConfidenceLevel::High => GREEN,
        ConfidenceLevel::Medium => "",
        ConfidenceLevel::Low => YELLOW,
        ConfidenceLevel::Uncertain => RED,
    }
}

fn percent(confidence: f32) -> String {
    format!("{:.0}%", confidence * 100.0)
}

/// One line describing a recognized gesture.
pub fn format_gesture(gesture: &RecognizedGesture) -> String {
    let color = confidence_color(gesture.confidence);
    let meaning = match gesture.semantic_meaning.as_deref() {
        Some(meaning) if gesture.is_word_level => format!(" → {meaning}"),
        _ => String::new(),
    };
    format!(
        "{color}{}{RESET}{meaning} {DIM}{} · {} frames · {:.2}s{RESET}",
        gesture.label,
        percent(gesture.confidence),
        gesture.frame_count,
        gesture.start_time,
    )
}

/// Summary line for a finished translation.
pub fn format_translation_stats(result: &TranslationResult) -> String {
    format!(
        "{DIM}{} gestures · {} words · {} confidence · {:.1}s{RESET}",
        result.gesture_count,
        result.word_count,
        percent(result.confidence),
        result.capture_duration,
    )
}

/// Render a pipeline event to stderr.
pub fn render_event(event: &PipelineEvent) {
    match event {
        PipelineEvent::GestureRecognized(gesture) => {
            clear_line();
            eprintln!("{}", format_gesture(gesture));
        }
        PipelineEvent::TextUpdated { preview, .. } => {
            eprint!("\r\x1b[2K{BOLD}{preview}{RESET}");
            io::stderr().flush().ok();
        }
        PipelineEvent::TranslationComplete(result) => {
            clear_line();
            eprintln!("{GREEN}{}{RESET} {}", result.text, format_translation_stats(result));
        }
        PipelineEvent::StateChanged {
            mode,
            is_processing,
        } => {
            clear_line();
            let activity = if *is_processing { "processing" } else { "stopped" };
            eprintln!("{DIM}[{mode}] {activity}{RESET}");
        }
    }
}

/// Print the final translation: text on stdout, statistics on stderr.
pub fn render_translation(result: &TranslationResult, quiet: bool) {
    clear_line();
    println!("{}", result.text);
    if !quiet {
        eprintln!("{}", format_translation_stats(result));
    }
}

/// One line describing a sign to perform.
pub fn format_sign(sign: &SignOutput) -> String {
    let marker = match sign.output_type {
        SignOutputType::WordSign => format!("{CYAN}●{RESET}"),
        SignOutputType::Number => format!("{YELLOW}#{RESET}"),
        SignOutputType::LetterSpell | SignOutputType::Fingerspell => format!("{DIM}✋{RESET}"),
    };
    let emoji = sign.emoji().map(|e| format!(" {e}")).unwrap_or_default();
    let description = sign
        .description
        .as_deref()
        .map(|d| format!("  {DIM}{d}{RESET}"))
        .unwrap_or_default();
    format!(
        "{marker} {}{emoji} {DIM}({}, {:.1}s){RESET}{description}",
        sign.display_text,
        sign.output_type.as_str(),
        sign.duration_hint,
    )
}

/// Print a sign sequence, one sign per line, followed by a summary.
pub fn render_sign_sequence(result: &SignSequenceResult, quiet: bool) {
    if !result.has_signs() {
        eprintln!("{YELLOW}No signs for \"{}\"{RESET}", result.original_text);
        return;
    }
    for sign in &result.signs {
        println!("{}", format_sign(sign));
    }
    if !quiet {
        eprintln!(
            "{DIM}{} signs for {} words · {} fingerspelled · {:.1}s{RESET}",
            result.sign_count,
            result.word_count,
            result.fingerspelled_count,
            result.total_duration(),
        );
    }
}

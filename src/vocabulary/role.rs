//! What a gesture label means to sentence construction.

use crate::vocabulary::{SignCategory, SignDefinition};

/// Labels that mark a word boundary.
pub const DELIMITER_LABELS: &[&str] = &["WAVE", "SPACE", "_", "PAUSE"];

/// Role of a gesture label, resolved once per gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureRole {
    /// A single letter, already upper-cased where ASCII.
    Letter(char),
    /// A single digit, from `"7"` or a spelled label like `"seven"`.
    Digit(char),
    /// A whole word or phrase.
    Word,
    /// An explicit word boundary.
    Delimiter,
    /// Anything else; ignored by the sentence constructor.
    Unknown,
}

impl GestureRole {
    /// True for roles that extend the word in progress.
    pub fn is_spelled(self) -> bool {
        matches!(self, GestureRole::Letter(_) | GestureRole::Digit(_))
    }
}

/// Classify a label given its vocabulary entry (if any).
///
/// Priority: word-level sign, then delimiter, then single letter or digit,
/// then spelled-out number.
pub fn classify(label: &str, sign: Option<&SignDefinition>) -> GestureRole {
    if sign.is_some_and(|s| s.category.is_word_level()) {
        return GestureRole::Word;
    }
    if label.is_empty() {
        return GestureRole::Unknown;
    }

    let trimmed = label.trim();
    if trimmed.is_empty() {
        return GestureRole::Delimiter;
    }
    let upper = trimmed.to_uppercase();
    if DELIMITER_LABELS.contains(&upper.as_str()) {
        return GestureRole::Delimiter;
    }

    let mut chars = trimmed.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if c.is_alphabetic() {
            return GestureRole::Letter(c.to_ascii_uppercase());
        }
        if c.is_numeric() {
            return GestureRole::Digit(c);
        }
    }

    match sign {
        Some(s) if s.category == SignCategory::Number => s
            .text
            .chars()
            .next()
            .map_or(GestureRole::Unknown, GestureRole::Digit),
        _ => GestureRole::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_characters_are_spelled() {
        assert_eq!(classify("a", None), GestureRole::Letter('A'));
        assert_eq!(classify("Q", None), GestureRole::Letter('Q'));
        assert_eq!(classify("7", None), GestureRole::Digit('7'));
        assert!(classify("b", None).is_spelled());
    }

    #[test]
    fn test_delimiters_are_case_insensitive() {
        assert_eq!(classify("space", None), GestureRole::Delimiter);
        assert_eq!(classify("Pause", None), GestureRole::Delimiter);
        assert_eq!(classify("_", None), GestureRole::Delimiter);
        assert_eq!(classify(" ", None), GestureRole::Delimiter);
    }

    #[test]
    fn test_word_level_sign_beats_delimiter() {
        let hello = SignDefinition::new("word_hello", "Hello", SignCategory::Word)
            .with_labels(["wave"]);
        assert_eq!(classify("WAVE", Some(&hello)), GestureRole::Word);
        assert_eq!(classify("WAVE", None), GestureRole::Delimiter);
    }

    #[test]
    fn test_spelled_number_resolves_to_digit() {
        let three = SignDefinition::new("number_3", "3", SignCategory::Number)
            .with_labels(["3", "three"]);
        assert_eq!(classify("three", Some(&three)), GestureRole::Digit('3'));
    }

    #[test]
    fn test_control_and_unknown_labels_are_ignored() {
        let backspace =
            SignDefinition::new("ctrl_backspace", "[DELETE]", SignCategory::Control);
        assert_eq!(classify("backspace", Some(&backspace)), GestureRole::Unknown);
        assert_eq!(classify("THUMBS_SIDEWAYS", None), GestureRole::Unknown);
        assert_eq!(classify("", None), GestureRole::Unknown);
    }
}

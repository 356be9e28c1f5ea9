//! Text normalization applied to every sentence update.

use once_cell::sync::Lazy;
use regex::Regex;

/// Spelled abbreviations expanded when a word is finalized.
pub const ABBREVIATIONS: &[(&str, &str)] = &[
    ("TY", "Thank you"),
    ("TYS", "Thank you so much"),
    ("NP", "No problem"),
    ("PLZ", "Please"),
    ("PLS", "Please"),
    ("ILY", "I love you"),
    ("OMG", "Oh my god"),
    ("BTW", "By the way"),
    ("IDK", "I don't know"),
    ("NVM", "Never mind"),
];

const CONTRACTIONS: &[(&str, &str)] = &[
    (r"\bI M\b", "I'm"),
    (r"\bDONT\b", "don't"),
    (r"\bWONT\b", "won't"),
    (r"\bCANT\b", "can't"),
    (r"\bYOURE\b", "you're"),
    (r"\bTHEYRE\b", "they're"),
    (r"\bWERE\b", "we're"),
    (r"\bILL\b", "I'll"),
    (r"\bYOULL\b", "you'll"),
];

#[allow(clippy::expect_used)]
static STANDALONE_I_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bi\b").expect("standalone i regex"));

#[allow(clippy::expect_used)]
static CONTRACTION_RES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    CONTRACTIONS
        .iter()
        .map(|(pattern, replacement)| {
            let re = Regex::new(&format!("(?i){pattern}")).expect("contraction regex");
            (re, *replacement)
        })
        .collect()
});

/// Expansion for a spelled abbreviation, matched case-insensitively.
pub fn expand_abbreviation(letters: &str) -> Option<&'static str> {
    let upper = letters.trim().to_uppercase();
    ABBREVIATIONS
        .iter()
        .find(|(abbrev, _)| *abbrev == upper)
        .map(|(_, expansion)| *expansion)
}

/// Collapses whitespace, capitalizes the first character, upper-cases a
/// standalone "i" and applies the contraction table.
pub fn format_text(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return collapsed;
    }

    let mut chars = collapsed.chars();
    let mut text: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };

    text = STANDALONE_I_RE.replace_all(&text, "I").into_owned();
    for (re, replacement) in CONTRACTION_RES.iter() {
        text = re.replace_all(&text, *replacement).into_owned();
    }
    text
}

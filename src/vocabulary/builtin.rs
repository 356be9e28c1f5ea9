//! Built-in ASL vocabulary tables.
//!
//! Letters and digits are generated; words, controls and letter patterns
//! are listed here so the table can be swapped without touching lookup code.

/// A word or phrase sign.
#[derive(Debug, Clone, Copy)]
pub struct WordEntry {
    pub id: &'static str,
    pub text: &'static str,
    pub phrase: bool,
    pub labels: &'static [&'static str],
    pub is_dynamic: bool,
    pub emoji: Option<&'static str>,
    pub description: &'static str,
}

/// A control sign (space, delete, enter).
#[derive(Debug, Clone, Copy)]
pub struct ControlEntry {
    pub id: &'static str,
    pub text: &'static str,
    pub labels: &'static [&'static str],
    pub display_text: &'static str,
    pub description: &'static str,
}

/// Letters that need motion tracking.
pub const DYNAMIC_LETTERS: &[char] = &['J', 'Z'];

/// Spelled-out digit labels, indexed by value.
pub const NUMBER_WORDS: [&str; 10] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
];

pub const WORDS: &[WordEntry] = &[
    WordEntry {
        id: "word_hello",
        text: "Hello",
        phrase: false,
        labels: &["hello", "wave", "hi"],
        is_dynamic: true,
        emoji: Some("👋"),
        description: "Wave hand for hello",
    },
    WordEntry {
        id: "word_goodbye",
        text: "Goodbye",
        phrase: false,
        labels: &["goodbye", "bye"],
        is_dynamic: true,
        emoji: Some("👋"),
        description: "Wave goodbye",
    },
    WordEntry {
        id: "word_thanks",
        text: "Thank you",
        phrase: false,
        labels: &["thank_you", "thanks", "thankyou"],
        is_dynamic: false,
        emoji: Some("🙏"),
        description: "Touch chin and move forward",
    },
    WordEntry {
        id: "word_please",
        text: "Please",
        phrase: false,
        labels: &["please"],
        is_dynamic: false,
        emoji: None,
        description: "Circular motion on chest",
    },
    WordEntry {
        id: "word_sorry",
        text: "Sorry",
        phrase: false,
        labels: &["sorry"],
        is_dynamic: false,
        emoji: Some("🙇"),
        description: "Fist on chest in circular motion",
    },
    WordEntry {
        id: "word_yes",
        text: "Yes",
        phrase: false,
        labels: &["yes", "thumbs_up"],
        is_dynamic: false,
        emoji: Some("👍"),
        description: "Fist nodding like a head",
    },
    WordEntry {
        id: "word_no",
        text: "No",
        phrase: false,
        labels: &["no", "thumbs_down"],
        is_dynamic: false,
        emoji: Some("👎"),
        description: "Index and middle finger tap thumb",
    },
    WordEntry {
        id: "word_i",
        text: "I",
        phrase: false,
        labels: &["me", "i_point"],
        is_dynamic: false,
        emoji: None,
        description: "Point to self",
    },
    WordEntry {
        id: "word_you",
        text: "You",
        phrase: false,
        labels: &["you", "you_point"],
        is_dynamic: false,
        emoji: None,
        description: "Point to other person",
    },
    WordEntry {
        id: "word_want",
        text: "Want",
        phrase: false,
        labels: &["want"],
        is_dynamic: false,
        emoji: None,
        description: "Hands pull toward body",
    },
    WordEntry {
        id: "word_need",
        text: "Need",
        phrase: false,
        labels: &["need"],
        is_dynamic: false,
        emoji: None,
        description: "X hand moves down",
    },
    WordEntry {
        id: "word_help",
        text: "Help",
        phrase: false,
        labels: &["help"],
        is_dynamic: false,
        emoji: Some("🆘"),
        description: "Thumbs up on flat hand, lift up",
    },
    WordEntry {
        id: "word_stop",
        text: "Stop",
        phrase: false,
        labels: &["stop", "stop_hand"],
        is_dynamic: false,
        emoji: Some("✋"),
        description: "Flat hand chops into other palm",
    },
    WordEntry {
        id: "word_love",
        text: "Love",
        phrase: false,
        labels: &["love", "heart"],
        is_dynamic: false,
        emoji: Some("❤️"),
        description: "Cross arms over chest",
    },
    WordEntry {
        id: "word_iloveyou",
        text: "I love you",
        phrase: true,
        labels: &["i_love_you", "ily"],
        is_dynamic: false,
        emoji: Some("🤟"),
        description: "ILY handshape (thumb, index, pinky)",
    },
    WordEntry {
        id: "word_what",
        text: "What?",
        phrase: false,
        labels: &["what"],
        is_dynamic: false,
        emoji: None,
        description: "Hands palm up, shake slightly",
    },
    WordEntry {
        id: "word_where",
        text: "Where?",
        phrase: false,
        labels: &["where"],
        is_dynamic: false,
        emoji: None,
        description: "Shake pointed index finger",
    },
    WordEntry {
        id: "word_how",
        text: "How?",
        phrase: false,
        labels: &["how"],
        is_dynamic: false,
        emoji: None,
        description: "Backs of hands together, roll forward",
    },
    WordEntry {
        id: "word_name",
        text: "Name",
        phrase: false,
        labels: &["name"],
        is_dynamic: false,
        emoji: None,
        description: "H hands tap each other",
    },
    WordEntry {
        id: "word_water",
        text: "Water",
        phrase: false,
        labels: &["water"],
        is_dynamic: false,
        emoji: Some("💧"),
        description: "W hand taps chin",
    },
    WordEntry {
        id: "word_food",
        text: "Food",
        phrase: false,
        labels: &["food", "eat"],
        is_dynamic: false,
        emoji: Some("🍽️"),
        description: "Flat O to mouth",
    },
];

pub const CONTROLS: &[ControlEntry] = &[
    ControlEntry {
        id: "ctrl_space",
        text: " ",
        labels: &["space", "_"],
        display_text: "[SPACE]",
        description: "Space between words",
    },
    ControlEntry {
        id: "ctrl_backspace",
        text: "[DELETE]",
        labels: &["backspace", "delete"],
        display_text: "[DELETE]",
        description: "Delete last character",
    },
    ControlEntry {
        id: "ctrl_enter",
        text: "[ENTER]",
        labels: &["enter", "newline"],
        display_text: "[ENTER]",
        description: "New line / Confirm",
    },
];

/// Letter sequences recognized as whole words when a word is finalized.
pub const WORD_PATTERNS: &[(&str, &str)] = &[
    ("HI", "Hi"),
    ("BYE", "Bye"),
    ("OK", "OK"),
    ("YES", "Yes"),
    ("NO", "No"),
    ("HELP", "Help"),
    ("STOP", "Stop"),
    ("LOVE", "Love"),
    ("THANK", "Thank"),
    ("THANKS", "Thanks"),
    ("PLEASE", "Please"),
    ("SORRY", "Sorry"),
    ("WATER", "Water"),
    ("FOOD", "Food"),
    ("NAME", "Name"),
    ("HELLO", "Hello"),
    ("GOOD", "Good"),
    ("BAD", "Bad"),
    ("HOW", "How"),
    ("WHAT", "What"),
    ("WHERE", "Where"),
    ("WHEN", "When"),
    ("WHO", "Who"),
    ("WHY", "Why"),
];

//! Command-line interface for signtext
//!
//! Provides argument parsing using clap derive macros.

use crate::pipeline::TranslationMode;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use std::time::Duration;

/// Sign language gestures to text, and text back to signs
#[derive(Parser, Debug)]
#[command(
    name = "signtext",
    version,
    about = "Sign language gestures to text, and text back to signs"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress progress output; only the final text is printed
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose logging (-v: debug, -vv: trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// When text updates are published (instant, word, sentence)
    #[arg(long, global = true, value_name = "MODE")]
    pub mode: Option<TranslationMode>,

    /// Silence that closes a word. Examples: 1500ms, 2s
    #[arg(long, global = true, value_name = "DURATION", value_parser = parse_duration)]
    pub word_timeout: Option<Duration>,

    /// Silence that closes a sentence. Examples: 3s, 4500ms
    #[arg(long, global = true, value_name = "DURATION", value_parser = parse_duration)]
    pub sentence_timeout: Option<Duration>,

    /// Minimum per-frame confidence (0.0 - 1.0)
    #[arg(long, global = true, value_name = "CONF")]
    pub min_confidence: Option<f32>,
}

/// Parse a duration string.
///
/// Supports any duration format accepted by `humantime` (`1500ms`, `2s`,
/// `1m30s`); a bare number is seconds and may be fractional.
pub fn parse_duration(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    // Bare number → seconds
    if let Ok(secs) = s.parse::<f64>() {
        return Duration::try_from_secs_f64(secs).map_err(|e| e.to_string());
    }
    humantime::parse_duration(s).map_err(|e| e.to_string())
}

/// Parse a `LABEL[:CONF]` gesture argument. The confidence defaults to 1.0.
pub fn parse_gesture_arg(s: &str) -> Result<(String, f32), String> {
    let (label, confidence) = match s.rsplit_once(':') {
        Some((label, conf)) => {
            let confidence = conf
                .parse::<f32>()
                .map_err(|_| format!("invalid confidence '{conf}' in '{s}'"))?;
            (label, confidence)
        }
        None => (s, 1.0),
    };
    if label.trim().is_empty() {
        return Err(format!("empty gesture label in '{s}'"));
    }
    Ok((label.trim().to_string(), confidence))
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Translate a recorded frame stream (JSON lines)
    Replay {
        /// Recording to read, or - for stdin
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Emit pipeline events as JSON lines instead of text
        #[arg(long)]
        json: bool,
    },

    /// Translate frames from stdin as they arrive
    Live {
        /// Stop after the first completed sentence
        #[arg(long)]
        once: bool,

        /// Publish every recognized gesture instead of accumulating
        #[arg(long)]
        continuous: bool,

        /// Emit pipeline events as JSON lines instead of text
        #[arg(long)]
        json: bool,
    },

    /// Build text from already-recognized gestures
    Gestures {
        /// Gestures as LABEL or LABEL:CONF (e.g. H:0.9 I thumbs_up)
        #[arg(value_name = "LABEL[:CONF]", required = true, value_parser = parse_gesture_arg)]
        gestures: Vec<(String, f32)>,
    },

    /// Show the signs for a text
    Sign {
        /// Text to translate
        #[arg(value_name = "TEXT", required = true, num_args = 1..)]
        text: Vec<String>,

        /// Spell unknown words as one unit instead of letter by letter
        #[arg(long)]
        bundled: bool,

        /// Print the sequence as JSON
        #[arg(long)]
        json: bool,
    },

    /// List or search the sign vocabulary
    Vocab {
        /// Substring to search for in text, description and labels
        #[arg(value_name = "QUERY")]
        query: Option<String>,

        /// Print the vocabulary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config {
        /// Action to perform
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_replay_command() {
        let cli = Cli::try_parse_from(["signtext", "replay", "session.jsonl"]).unwrap();
        match cli.command {
            Commands::Replay { input, json } => {
                assert_eq!(input, PathBuf::from("session.jsonl"));
                assert!(!json);
            }
            other => panic!("Expected Replay command, got {other:?}"),
        }
        assert!(!cli.quiet);
        assert_eq!(cli.verbose, 0);
        assert!(cli.config.is_none());
        assert!(cli.mode.is_none());
    }

    #[test]
    fn test_parse_replay_from_stdin_with_json() {
        let cli = Cli::try_parse_from(["signtext", "replay", "-", "--json"]).unwrap();
        assert!(matches!(cli.command, Commands::Replay { json: true, .. }));
    }

    #[test]
    fn test_parse_verbose_double() {
        let cli = Cli::try_parse_from(["signtext", "-vv", "vocab"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_parse_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "signtext",
            "live",
            "--quiet",
            "--mode",
            "word",
            "--word-timeout",
            "800ms",
            "--sentence-timeout",
            "4",
            "--min-confidence",
            "0.7",
            "--config",
            "/path/to/config.toml",
        ])
        .unwrap();

        assert!(cli.quiet);
        assert_eq!(cli.mode, Some(TranslationMode::Word));
        assert_eq!(cli.word_timeout, Some(Duration::from_millis(800)));
        assert_eq!(cli.sentence_timeout, Some(Duration::from_secs(4)));
        assert_eq!(cli.min_confidence, Some(0.7));
        assert_eq!(cli.config, Some(PathBuf::from("/path/to/config.toml")));
    }

    #[test]
    fn test_parse_invalid_mode_fails() {
        assert!(Cli::try_parse_from(["signtext", "--mode", "loud", "vocab"]).is_err());
    }

    #[test]
    fn test_parse_gestures() {
        let cli = Cli::try_parse_from(["signtext", "gestures", "H:0.9", "I", "thumbs_up:0.75"])
            .unwrap();
        match cli.command {
            Commands::Gestures { gestures } => {
                assert_eq!(
                    gestures,
                    vec![
                        ("H".to_string(), 0.9),
                        ("I".to_string(), 1.0),
                        ("thumbs_up".to_string(), 0.75),
                    ]
                );
            }
            other => panic!("Expected Gestures command, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_gestures_requires_one() {
        assert!(Cli::try_parse_from(["signtext", "gestures"]).is_err());
    }

    #[test]
    fn test_parse_gesture_arg_rejects_bad_confidence() {
        assert!(parse_gesture_arg("H:high").is_err());
        assert!(parse_gesture_arg(":0.5").is_err());
    }

    #[test]
    fn test_parse_sign_joins_words() {
        let cli = Cli::try_parse_from(["signtext", "sign", "--bundled", "hello", "Xyzzy"]).unwrap();
        match cli.command {
            Commands::Sign {
                text,
                bundled,
                json,
            } => {
                assert_eq!(text, ["hello", "Xyzzy"]);
                assert!(bundled);
                assert!(!json);
            }
            other => panic!("Expected Sign command, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_config_init_force() {
        let cli = Cli::try_parse_from(["signtext", "config", "init", "--force"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Config {
                action: ConfigAction::Init { force: true }
            }
        ));
    }

    #[test]
    fn test_parse_completions() {
        let cli = Cli::try_parse_from(["signtext", "completions", "bash"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Completions { shell: Shell::Bash }
        ));
    }

    #[test]
    fn test_parse_duration_formats() {
        assert_eq!(parse_duration("1500ms"), Ok(Duration::from_millis(1500)));
        assert_eq!(parse_duration("2s"), Ok(Duration::from_secs(2)));
        assert_eq!(parse_duration("1.5"), Ok(Duration::from_millis(1500)));
        assert!(parse_duration("soon").is_err());
        assert!(parse_duration("-1").is_err());
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}

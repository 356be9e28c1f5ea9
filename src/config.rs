use crate::aggregator::AggregatorConfig;
use crate::defaults;
use crate::error::{Result, SigntextError};
use crate::pipeline::{PipelineConfig, TranslationMode};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub aggregation: AggregationConfig,
    pub sentence: SentenceSection,
    pub translation: TranslationSection,
    pub features: FeaturesConfig,
}

/// Temporal aggregation tuning
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AggregationConfig {
    pub window_size: usize,
    pub stability_threshold: usize,
    pub min_confidence: f32,
    pub transition_frames: usize,
    pub target_fps: u32,
}

/// Word and sentence boundaries
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SentenceSection {
    pub word_timeout_secs: f64,
    pub sentence_timeout_secs: f64,
    pub auto_translate: bool,
    /// How often hosts poll for timeouts.
    pub poll_interval_ms: u64,
}

/// Output publication and text-to-sign rendering
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TranslationSection {
    pub mode: TranslationMode,
    pub expand_fingerspelling: bool,
}

/// Feature switches
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FeaturesConfig {
    pub word_recognition: bool,
    pub dynamic_gestures: bool,
    pub heuristics: bool,
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self {
            window_size: defaults::WINDOW_SIZE,
            stability_threshold: defaults::STABILITY_THRESHOLD,
            min_confidence: defaults::MIN_CONFIDENCE,
            transition_frames: defaults::TRANSITION_FRAMES,
            target_fps: defaults::TARGET_FPS,
        }
    }
}

impl Default for SentenceSection {
    fn default() -> Self {
        Self {
            word_timeout_secs: defaults::WORD_TIMEOUT_SECS,
            sentence_timeout_secs: defaults::SENTENCE_TIMEOUT_SECS,
            auto_translate: true,
            poll_interval_ms: defaults::POLL_INTERVAL_MS,
        }
    }
}

impl Default for TranslationSection {
    fn default() -> Self {
        Self {
            mode: TranslationMode::default(),
            expand_fingerspelling: true,
        }
    }
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            word_recognition: true,
            dynamic_gestures: true,
            heuristics: true,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Missing fields use default values. The result is not validated.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SigntextError::ConfigFileNotFound {
                    path: path.display().to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        };
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if file doesn't exist
    ///
    /// Invalid TOML is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Err(SigntextError::ConfigFileNotFound { .. }) => {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - SIGNTEXT_MIN_CONFIDENCE → aggregation.min_confidence
    /// - SIGNTEXT_WORD_TIMEOUT → sentence.word_timeout_secs
    /// - SIGNTEXT_SENTENCE_TIMEOUT → sentence.sentence_timeout_secs
    /// - SIGNTEXT_TRANSLATION_MODE → translation.mode
    ///
    /// Empty or unparseable values are ignored.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(confidence) = env_parsed::<f32>("SIGNTEXT_MIN_CONFIDENCE") {
            self.aggregation.min_confidence = confidence;
        }

        if let Some(secs) = env_parsed::<f64>("SIGNTEXT_WORD_TIMEOUT") {
            self.sentence.word_timeout_secs = secs;
        }

        if let Some(secs) = env_parsed::<f64>("SIGNTEXT_SENTENCE_TIMEOUT") {
            self.sentence.sentence_timeout_secs = secs;
        }

        if let Some(mode) = env_parsed::<TranslationMode>("SIGNTEXT_TRANSLATION_MODE") {
            self.translation.mode = mode;
        }

        self
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/signtext/config.toml on Linux
    pub fn default_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("signtext").join("config.toml"))
            .ok_or_else(|| SigntextError::Other("Could not determine config directory".to_string()))
    }

    /// Checks ranges and cross-field constraints.
    pub fn validate(&self) -> Result<()> {
        let a = &self.aggregation;
        if a.window_size < 2 {
            return Err(invalid("aggregation.window_size", "must be at least 2"));
        }
        if a.stability_threshold < 1 {
            return Err(invalid("aggregation.stability_threshold", "must be at least 1"));
        }
        if !(0.0..=1.0).contains(&a.min_confidence) {
            return Err(invalid(
                "aggregation.min_confidence",
                "must be between 0.0 and 1.0",
            ));
        }
        if a.target_fps == 0 {
            return Err(invalid("aggregation.target_fps", "must be positive"));
        }

        let s = &self.sentence;
        for (key, secs) in [
            ("sentence.word_timeout_secs", s.word_timeout_secs),
            ("sentence.sentence_timeout_secs", s.sentence_timeout_secs),
        ] {
            if !secs.is_finite() || secs <= 0.0 {
                return Err(invalid(key, "must be a positive number of seconds"));
            }
        }
        if s.word_timeout_secs > s.sentence_timeout_secs {
            return Err(invalid(
                "sentence.word_timeout_secs",
                "must not exceed sentence_timeout_secs",
            ));
        }
        if s.poll_interval_ms == 0 {
            return Err(invalid("sentence.poll_interval_ms", "must be positive"));
        }
        Ok(())
    }

    /// Maps the file onto the runtime pipeline configuration.
    ///
    /// Call [`Self::validate`] first; invalid timeouts fall back to defaults.
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            aggregator: AggregatorConfig {
                window_size: self.aggregation.window_size,
                stability_threshold: self.aggregation.stability_threshold,
                min_confidence: self.aggregation.min_confidence,
                transition_frames: self.aggregation.transition_frames,
                target_fps: self.aggregation.target_fps,
            },
            word_timeout: secs_or(self.sentence.word_timeout_secs, defaults::WORD_TIMEOUT_SECS),
            sentence_timeout: secs_or(
                self.sentence.sentence_timeout_secs,
                defaults::SENTENCE_TIMEOUT_SECS,
            ),
            translation_mode: self.translation.mode,
            auto_translate: self.sentence.auto_translate,
            expand_fingerspelling: self.translation.expand_fingerspelling,
            word_recognition: self.features.word_recognition,
            dynamic_gestures: self.features.dynamic_gestures,
            heuristics: self.features.heuristics,
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.sentence.poll_interval_ms.max(1))
    }

    /// Serializes to TOML, as written by `config init`.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| SigntextError::ConfigParse {
            message: e.to_string(),
        })
    }
}

fn env_parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    let value = std::env::var(key).ok()?;
    if value.trim().is_empty() {
        return None;
    }
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            tracing::warn!(key, value = %value, "Ignoring unparseable environment override");
            None
        }
    }
}

fn secs_or(secs: f64, fallback: f64) -> Duration {
    Duration::try_from_secs_f64(secs).unwrap_or_else(|_| Duration::from_secs_f64(fallback))
}

fn invalid(key: &str, message: &str) -> SigntextError {
    SigntextError::ConfigInvalidValue {
        key: key.to_string(),
        message: message.to_string(),
    }
}

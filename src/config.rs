//! Runtime configuration
//!
//! Everything can be overridden with `BUDDY_*` environment variables; the
//! defaults point at a backend running on the local machine.

use crate::{BuddyError, Result};
use reqwest::Url;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/api/chat";

/// Where chat queries are sent
#[derive(Clone, Debug, PartialEq)]
pub struct BackendConfig {
    pub endpoint: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

/// Speech input/output preferences
#[derive(Clone, Debug, PartialEq)]
pub struct VoiceConfig {
    /// Language tag prefix used for recognition and voice fallback
    pub locale: String,

    /// Substring of a voice name that is preferred over everything else
    pub voice_marker: Option<String>,

    /// Speech rate (1.0 = normal)
    pub rate: f32,

    /// Pitch (0.0 to 2.0, 1.0 = normal)
    pub pitch: f32,

    /// Volume (0.0 to 1.0)
    pub volume: f32,

    /// Synthesizer executable; `espeak` is tried when this one is missing
    pub synthesizer_program: String,

    /// Path to the Whisper model used by the `whisper-stt` recognizer
    pub whisper_model: PathBuf,

    /// Whether to probe for speech recognition
    pub enable_input: bool,

    /// Whether to probe for speech synthesis
    pub enable_output: bool,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            locale: "en".to_string(),
            voice_marker: Some("Google".to_string()),
            rate: 1.0,
            pitch: 1.0,
            volume: 1.0,
            synthesizer_program: "espeak-ng".to_string(),
            whisper_model: PathBuf::from("models/ggml-base.en.bin"),
            enable_input: true,
            enable_output: true,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct BuddyConfig {
    pub backend: BackendConfig,
    pub voice: VoiceConfig,
}

impl BuddyConfig {
    /// Build a configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(endpoint) = lookup("BUDDY_BACKEND_URL") {
            config.backend.endpoint = endpoint;
        }
        if let Some(locale) = lookup("BUDDY_VOICE_LOCALE") {
            config.voice.locale = locale;
        }
        if let Some(marker) = lookup("BUDDY_VOICE_MARKER") {
            config.voice.voice_marker = if marker.trim().is_empty() {
                None
            } else {
                Some(marker)
            };
        }
        if let Some(program) = lookup("BUDDY_TTS_PROGRAM") {
            config.voice.synthesizer_program = program;
        }
        if let Some(model) = lookup("BUDDY_WHISPER_MODEL") {
            config.voice.whisper_model = PathBuf::from(model);
        }

        config.voice.rate = parse_or(&lookup, "BUDDY_VOICE_RATE", config.voice.rate)?;
        config.voice.pitch = parse_or(&lookup, "BUDDY_VOICE_PITCH", config.voice.pitch)?;
        config.voice.volume = parse_or(&lookup, "BUDDY_VOICE_VOLUME", config.voice.volume)?;
        config.voice.enable_input =
            parse_or(&lookup, "BUDDY_VOICE_INPUT", config.voice.enable_input)?;
        config.voice.enable_output =
            parse_or(&lookup, "BUDDY_VOICE_OUTPUT", config.voice.enable_output)?;

        Ok(config)
    }

    /// Set the backend endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.backend.endpoint = endpoint.into();
        self
    }

    /// Disable speech recognition (typed input only)
    pub fn without_voice_input(mut self) -> Self {
        self.voice.enable_input = false;
        self
    }

    /// Disable speech synthesis (text-only replies)
    pub fn without_voice_output(mut self) -> Self {
        self.voice.enable_output = false;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.backend.endpoint).map_err(|e| {
            BuddyError::ConfigError(format!(
                "Backend endpoint {:?} is not a valid URL: {}",
                self.backend.endpoint, e
            ))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(BuddyError::ConfigError(format!(
                "Backend endpoint must use http or https, got {}",
                url.scheme()
            )));
        }

        let voice = &self.voice;
        if !(0.1..=10.0).contains(&voice.rate) {
            return Err(BuddyError::ConfigError(format!(
                "Speech rate must be between 0.1 and 10, got {}",
                voice.rate
            )));
        }
        if !(0.0..=2.0).contains(&voice.pitch) {
            return Err(BuddyError::ConfigError(format!(
                "Speech pitch must be between 0 and 2, got {}",
                voice.pitch
            )));
        }
        if !(0.0..=1.0).contains(&voice.volume) {
            return Err(BuddyError::ConfigError(format!(
                "Speech volume must be between 0 and 1, got {}",
                voice.volume
            )));
        }

        Ok(())
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| BuddyError::ConfigError(format!("{} has an invalid value: {:?}", key, raw))),
        None => Ok(default),
    }
}

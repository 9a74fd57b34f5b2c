//! Contracts for host speech capabilities
//!
//! Providers are probed once at startup and handed to the adapter wrapped in
//! [`Capability`], so nothing downstream has to ask the platform whether a
//! feature exists.

use crate::Result;
use crossbeam_channel::Sender;

/// A host capability that may or may not be present
pub enum Capability<T> {
    Available(T),
    Unavailable { reason: String },
}

impl<T> Capability<T> {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Capability::Unavailable {
            reason: reason.into(),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Capability::Available(_))
    }

    pub fn as_mut(&mut self) -> Option<&mut T> {
        match self {
            Capability::Available(inner) => Some(inner),
            Capability::Unavailable { .. } => None,
        }
    }

    pub fn as_ref(&self) -> Option<&T> {
        match self {
            Capability::Available(inner) => Some(inner),
            Capability::Unavailable { .. } => None,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Capability::Available(_) => None,
            Capability::Unavailable { reason } => Some(reason),
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Capability<U> {
        match self {
            Capability::Available(inner) => Capability::Available(f(inner)),
            Capability::Unavailable { reason } => Capability::Unavailable { reason },
        }
    }
}

impl<T> std::fmt::Debug for Capability<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Capability::Available(_) => write!(f, "Available"),
            Capability::Unavailable { reason } => write!(f, "Unavailable({})", reason),
        }
    }
}

/// Notification from a recognizer session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionEvent {
    /// Final transcript of one utterance
    Result(String),
    /// The session failed
    Error(String),
    /// The session is over
    Ended,
}

/// How a recognizer session should behave
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionOptions {
    pub locale: String,
    /// Keep listening after the first utterance
    pub continuous: bool,
    /// Deliver partial transcripts
    pub interim_results: bool,
}

impl RecognitionOptions {
    pub fn single_shot(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            continuous: false,
            interim_results: false,
        }
    }
}

/// A host voice usable by a synthesizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    /// Identifier passed back to the synthesizer
    pub id: String,
    pub name: String,
    /// BCP-47 style language tag, e.g. `en-us`
    pub lang: String,
}

/// One request to speak
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    /// `None` means the host default voice
    pub voice: Option<Voice>,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

/// Speech-to-text provided by the host
pub trait SpeechRecognizer {
    /// Begin a session, delivering its events on `events`
    fn start(&mut self, options: &RecognitionOptions, events: Sender<RecognitionEvent>)
        -> Result<()>;

    /// End the current session, if any
    fn stop(&mut self);
}

/// Text-to-speech provided by the host
pub trait SpeechSynthesizer {
    fn voices(&self) -> Vec<Voice>;

    /// Start playing `utterance` without waiting for it to finish
    fn speak(&mut self, utterance: &Utterance) -> Result<()>;

    /// Stop whatever is playing
    fn cancel(&mut self);
}

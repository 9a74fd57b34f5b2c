//! Voice I/O adapter
//!
//! Wraps whichever recognizer and synthesizer the host offers and exposes the
//! handful of operations the conversation controller needs.

use super::capability::{
    Capability, RecognitionEvent, RecognitionOptions, SpeechRecognizer, SpeechSynthesizer,
    Utterance, Voice,
};
use super::selection::select_voice;
use crate::config::VoiceConfig;
use crate::{BuddyError, Result};
use crossbeam_channel::{bounded, Receiver};
use tracing::{debug, info, warn};

pub type RecognizerCapability = Capability<Box<dyn SpeechRecognizer>>;
pub type SynthesizerCapability = Capability<Box<dyn SpeechSynthesizer>>;

/// Speech in, speech out
pub struct VoiceAdapter {
    recognizer: RecognizerCapability,
    synthesizer: SynthesizerCapability,
    config: VoiceConfig,
    /// Voice picked on first use; `Some(None)` means the host default
    voice: Option<Option<Voice>>,
    /// Events of the active listening session
    session: Option<Receiver<RecognitionEvent>>,
}

impl VoiceAdapter {
    pub fn new(
        recognizer: RecognizerCapability,
        synthesizer: SynthesizerCapability,
        config: VoiceConfig,
    ) -> Self {
        match recognizer.reason() {
            None => info!("Speech recognition available"),
            Some(reason) => info!("Speech recognition not supported: {}", reason),
        }
        match synthesizer.reason() {
            None => info!("Speech synthesis available"),
            Some(reason) => info!("Speech synthesis not supported: {}", reason),
        }

        Self {
            recognizer,
            synthesizer,
            config,
            voice: None,
            session: None,
        }
    }

    /// Adapter with every voice feature switched off
    pub fn disabled() -> Self {
        Self::new(
            Capability::unavailable("voice disabled"),
            Capability::unavailable("voice disabled"),
            VoiceConfig::default(),
        )
    }

    pub fn can_listen(&self) -> bool {
        self.recognizer.is_available()
    }

    pub fn can_speak(&self) -> bool {
        self.synthesizer.is_available()
    }

    pub fn is_listening(&self) -> bool {
        self.session.is_some()
    }

    /// Why listening is not possible, if it is not
    pub fn listen_unavailable_reason(&self) -> Option<&str> {
        self.recognizer.reason()
    }

    /// Start a single-shot recognition session
    pub fn start_listening(&mut self) -> Result<()> {
        let recognizer = self.recognizer.as_mut().ok_or_else(|| {
            BuddyError::CapabilityUnavailable("speech recognition is not supported".into())
        })?;

        if self.session.is_some() {
            debug!("Already listening");
            return Ok(());
        }

        let (tx, rx) = bounded(16);
        recognizer.start(&RecognitionOptions::single_shot(&self.config.locale), tx)?;
        self.session = Some(rx);

        debug!("Listening started");
        Ok(())
    }

    /// End the session; anything it still produces is dropped
    pub fn stop_listening(&mut self) {
        if self.session.take().is_some() {
            if let Some(recognizer) = self.recognizer.as_mut() {
                recognizer.stop();
            }
            debug!("Listening stopped");
        }
    }

    /// Drain events of the active session.
    ///
    /// The session is closed after its first result, error or end notice.
    pub fn poll_recognition(&mut self) -> Vec<RecognitionEvent> {
        let Some(rx) = &self.session else {
            return Vec::new();
        };

        let mut events = Vec::new();
        let mut finished = false;
        while let Ok(event) = rx.try_recv() {
            finished = true;
            events.push(event);
        }

        if finished {
            self.stop_listening();
        }

        events
    }

    /// Speak `text`, interrupting anything already playing
    pub fn speak(&mut self, text: &str) {
        if text.trim().is_empty() {
            return;
        }

        let voice = match &self.voice {
            Some(voice) => voice.clone(),
            None => {
                let chosen = self.choose_voice();
                self.voice = Some(chosen.clone());
                chosen
            }
        };

        let Some(synthesizer) = self.synthesizer.as_mut() else {
            debug!("Speech synthesis unavailable, not speaking");
            return;
        };

        synthesizer.cancel();

        let utterance = Utterance {
            text: text.to_string(),
            voice,
            rate: self.config.rate,
            pitch: self.config.pitch,
            volume: self.config.volume,
        };

        if let Err(e) = synthesizer.speak(&utterance) {
            warn!("Speech synthesis failed: {}", e);
        }
    }

    pub fn cancel_speech(&mut self) {
        if let Some(synthesizer) = self.synthesizer.as_mut() {
            synthesizer.cancel();
        }
    }

    fn choose_voice(&self) -> Option<Voice> {
        let synthesizer = self.synthesizer.as_ref()?;
        let voices = synthesizer.voices();
        let chosen = select_voice(
            &voices,
            self.config.voice_marker.as_deref(),
            &self.config.locale,
        )
        .cloned();

        match &chosen {
            Some(voice) => info!("Using voice {} ({})", voice.name, voice.lang),
            None => info!("No preferred voice among {}, using host default", voices.len()),
        }
        chosen
    }
}

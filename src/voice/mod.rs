//! Speech input and output
//!
//! - **capability**: provider contracts and the available/unavailable wrapper
//! - **adapter**: the voice I/O adapter used by the conversation controller
//! - **selection**: voice preference rules
//! - **espeak**: system synthesizer
//! - **whisper**: on-device recognizer (feature `whisper-stt`)

pub mod adapter;
pub mod capability;
pub mod espeak;
#[cfg(feature = "whisper-stt")]
mod resample;
pub mod selection;
#[cfg(feature = "whisper-stt")]
pub mod whisper;

pub use adapter::{RecognizerCapability, SynthesizerCapability, VoiceAdapter};
pub use capability::{
    Capability, RecognitionEvent, RecognitionOptions, SpeechRecognizer, SpeechSynthesizer,
    Utterance, Voice,
};
pub use espeak::EspeakSynthesizer;
pub use selection::select_voice;

use crate::config::VoiceConfig;

/// Probe the host for the speech capabilities enabled in `config`
pub fn detect(config: &VoiceConfig) -> VoiceAdapter {
    let recognizer = if config.enable_input {
        detect_recognizer(config)
    } else {
        Capability::unavailable("speech input disabled")
    };

    let synthesizer: SynthesizerCapability = if config.enable_output {
        EspeakSynthesizer::probe(&config.synthesizer_program)
            .map(|s| Box::new(s) as Box<dyn SpeechSynthesizer>)
    } else {
        Capability::unavailable("speech output disabled")
    };

    VoiceAdapter::new(recognizer, synthesizer, config.clone())
}

#[cfg(feature = "whisper-stt")]
fn detect_recognizer(config: &VoiceConfig) -> RecognizerCapability {
    whisper::WhisperRecognizer::probe(config).map(|r| Box::new(r) as Box<dyn SpeechRecognizer>)
}

#[cfg(not(feature = "whisper-stt"))]
fn detect_recognizer(_config: &VoiceConfig) -> RecognizerCapability {
    Capability::unavailable("built without the whisper-stt feature")
}

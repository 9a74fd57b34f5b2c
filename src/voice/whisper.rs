//! On-device speech recognizer: microphone capture with `cpal`, transcription
//! with Whisper.
//!
//! Each session records until the speaker falls silent, transcribes once and
//! ends, which gives the single-shot behaviour the adapter expects.

use super::capability::{Capability, RecognitionEvent, RecognitionOptions, SpeechRecognizer};
use super::resample::resample_mono;
use crate::config::VoiceConfig;
use crate::{BuddyError, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossbeam_channel::{bounded, RecvTimeoutError, Sender};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperContextParameters};

const WHISPER_SAMPLE_RATE: u32 = 16000;

/// When a recording counts as finished
#[derive(Clone, Debug)]
pub struct EndpointSettings {
    /// RMS level above which a chunk counts as speech
    pub speech_threshold: f32,
    /// Trailing silence that ends an utterance
    pub silence: Duration,
    /// Give up when nobody speaks for this long
    pub no_speech_timeout: Duration,
    /// Hard cap on one utterance
    pub max_utterance: Duration,
}

impl Default for EndpointSettings {
    fn default() -> Self {
        Self {
            speech_threshold: 0.02,
            silence: Duration::from_millis(900),
            no_speech_timeout: Duration::from_secs(8),
            max_utterance: Duration::from_secs(15),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointState {
    Waiting,
    Speaking,
    Done,
    NoSpeech,
}

/// Energy based end-of-utterance detection
pub struct Endpointer {
    settings: EndpointSettings,
    sample_rate: u32,
    samples: Vec<f32>,
    heard_speech: bool,
    trailing_silence: usize,
}

impl Endpointer {
    pub fn new(settings: EndpointSettings, sample_rate: u32) -> Self {
        Self {
            settings,
            sample_rate,
            samples: Vec::new(),
            heard_speech: false,
            trailing_silence: 0,
        }
    }

    fn samples_for(&self, duration: Duration) -> usize {
        (duration.as_secs_f32() * self.sample_rate as f32) as usize
    }

    pub fn push(&mut self, chunk: &[f32]) -> EndpointState {
        self.samples.extend_from_slice(chunk);

        if rms(chunk) >= self.settings.speech_threshold {
            self.heard_speech = true;
            self.trailing_silence = 0;
        } else if self.heard_speech {
            self.trailing_silence += chunk.len();
        }

        if !self.heard_speech {
            if self.samples.len() >= self.samples_for(self.settings.no_speech_timeout) {
                return EndpointState::NoSpeech;
            }
            return EndpointState::Waiting;
        }

        if self.trailing_silence >= self.samples_for(self.settings.silence)
            || self.samples.len() >= self.samples_for(self.settings.max_utterance)
        {
            return EndpointState::Done;
        }

        EndpointState::Speaking
    }

    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }
}

fn rms(chunk: &[f32]) -> f32 {
    if chunk.is_empty() {
        return 0.0;
    }
    (chunk.iter().map(|s| s * s).sum::<f32>() / chunk.len() as f32).sqrt()
}

struct Session {
    cancelled: Arc<AtomicBool>,
    _worker: JoinHandle<()>,
}

pub struct WhisperRecognizer {
    context: Arc<WhisperContext>,
    settings: EndpointSettings,
    session: Option<Session>,
}

impl WhisperRecognizer {
    /// Load the model and check for a microphone
    pub fn probe(config: &VoiceConfig) -> Capability<Self> {
        match Self::new(&config.whisper_model) {
            Ok(recognizer) => Capability::Available(recognizer),
            Err(e) => Capability::unavailable(e.to_string()),
        }
    }

    pub fn new(model_path: &Path) -> Result<Self> {
        if !model_path.exists() {
            return Err(BuddyError::CapabilityUnavailable(format!(
                "Whisper model not found: {:?}",
                model_path
            )));
        }

        if cpal::default_host().default_input_device().is_none() {
            return Err(BuddyError::AudioDeviceError("No input device available".into()));
        }

        info!("Loading Whisper model from: {:?}", model_path);
        let context = WhisperContext::new_with_params(
            model_path
                .to_str()
                .ok_or_else(|| BuddyError::ConfigError("Invalid model path".to_string()))?,
            WhisperContextParameters::default(),
        )
        .map_err(|e| BuddyError::CapabilityUnavailable(format!("Failed to load Whisper model: {:?}", e)))?;

        Ok(Self {
            context: Arc::new(context),
            settings: EndpointSettings::default(),
            session: None,
        })
    }
}

impl SpeechRecognizer for WhisperRecognizer {
    fn start(&mut self, options: &RecognitionOptions, events: Sender<RecognitionEvent>) -> Result<()> {
        self.stop();

        let cancelled = Arc::new(AtomicBool::new(false));
        let context = Arc::clone(&self.context);
        let settings = self.settings.clone();
        let language = options
            .locale
            .split(['-', '_'])
            .next()
            .unwrap_or("en")
            .to_lowercase();
        let flag = Arc::clone(&cancelled);

        let worker = thread::Builder::new()
            .name("whisper-session".into())
            .spawn(move || {
                let outcome = match record_utterance(&settings, &flag) {
                    Ok(Some((samples, rate))) => {
                        transcribe(&context, &samples, rate, &language).map(Some)
                    }
                    Ok(None) => Ok(None),
                    Err(e) => Err(e),
                };

                if flag.load(Ordering::SeqCst) {
                    debug!("Recognition session cancelled");
                    return;
                }

                let event = match outcome {
                    Ok(Some(text)) if !text.is_empty() => RecognitionEvent::Result(text),
                    Ok(_) => RecognitionEvent::Error("no speech detected".to_string()),
                    Err(e) => {
                        warn!("Recognition failed: {}", e);
                        RecognitionEvent::Error(e.to_string())
                    }
                };
                let _ = events.send(event);
                let _ = events.send(RecognitionEvent::Ended);
            })
            .map_err(|e| BuddyError::RecognitionError(format!("Failed to spawn recognizer: {}", e)))?;

        self.session = Some(Session {
            cancelled,
            _worker: worker,
        });
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(session) = self.session.take() {
            session.cancelled.store(true, Ordering::SeqCst);
        }
    }
}

impl Drop for WhisperRecognizer {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Record from the default microphone until the utterance ends.
///
/// Returns `None` when nobody spoke or the session was cancelled.
fn record_utterance(settings: &EndpointSettings, cancelled: &AtomicBool) -> Result<Option<(Vec<f32>, u32)>> {
    let device = cpal::default_host()
        .default_input_device()
        .ok_or_else(|| BuddyError::AudioDeviceError("No input device available".into()))?;

    let config: cpal::StreamConfig = device
        .default_input_config()
        .map_err(|e| BuddyError::AudioDeviceError(format!("Failed to get input config: {}", e)))?
        .into();

    let sample_rate = config.sample_rate.0;
    let channels = config.channels as usize;
    let (audio_tx, audio_rx) = bounded::<Vec<f32>>(64);

    let stream = device
        .build_input_stream(
            &config,
            move |data: &[f32], _: &cpal::InputCallbackInfo| {
                let samples = if channels == 1 {
                    data.to_vec()
                } else {
                    data.chunks(channels)
                        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
                        .collect()
                };
                let _ = audio_tx.try_send(samples);
            },
            |err| error!("Audio input stream error: {}", err),
            None,
        )
        .map_err(|e| BuddyError::AudioDeviceError(format!("Failed to build input stream: {}", e)))?;

    stream
        .play()
        .map_err(|e| BuddyError::AudioDeviceError(format!("Failed to start input stream: {}", e)))?;

    let started = Instant::now();
    let mut endpointer = Endpointer::new(settings.clone(), sample_rate);

    loop {
        if cancelled.load(Ordering::SeqCst) {
            return Ok(None);
        }

        match audio_rx.recv_timeout(Duration::from_millis(100)) {
            Ok(chunk) => match endpointer.push(&chunk) {
                EndpointState::Done => break,
                EndpointState::NoSpeech => return Ok(None),
                EndpointState::Waiting | EndpointState::Speaking => {}
            },
            Err(RecvTimeoutError::Timeout) => {
                if started.elapsed() > settings.no_speech_timeout + settings.max_utterance {
                    break;
                }
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    drop(stream);
    debug!("Captured {:.2}s of audio", started.elapsed().as_secs_f32());
    Ok(Some((endpointer.into_samples(), sample_rate)))
}

fn transcribe(context: &WhisperContext, samples: &[f32], sample_rate: u32, language: &str) -> Result<String> {
    let samples = resample_mono(samples, sample_rate, WHISPER_SAMPLE_RATE)?;

    let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });
    params.set_translate(false);
    params.set_print_special(false);
    params.set_print_progress(false);
    params.set_print_realtime(false);
    params.set_print_timestamps(false);
    params.set_language(Some(language));

    let mut state = context
        .create_state()
        .map_err(|e| BuddyError::RecognitionError(format!("Failed to create state: {:?}", e)))?;

    state
        .full(params, &samples)
        .map_err(|e| BuddyError::RecognitionError(format!("Transcription failed: {:?}", e)))?;

    let segments = state
        .full_n_segments()
        .map_err(|e| BuddyError::RecognitionError(format!("Failed to get segments: {:?}", e)))?;

    let mut text = String::new();
    for i in 0..segments {
        let segment = state
            .full_get_segment_text(i)
            .map_err(|e| BuddyError::RecognitionError(format!("Failed to get segment text: {:?}", e)))?;
        text.push_str(&segment);
    }

    debug!("Transcription result: '{}'", text.trim());
    Ok(text.trim().to_string())
}

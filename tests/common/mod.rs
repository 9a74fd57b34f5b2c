//! Shared test doubles for the conversation, voice and UI tests

#![allow(dead_code)]

use async_trait::async_trait;
use buddy::backend::{BackendError, ChatBackend};
use buddy::config::VoiceConfig;
use buddy::conversation::ConversationController;
use buddy::voice::{
    Capability, RecognitionEvent, RecognitionOptions, SpeechRecognizer, SpeechSynthesizer,
    Utterance, Voice, VoiceAdapter,
};
use crossbeam_channel::Sender;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;

/// One scripted backend answer
pub struct Step {
    pub delay: Duration,
    pub outcome: Result<String, BackendError>,
    /// Only answer this query
    pub query: Option<String>,
}

impl Step {
    pub fn reply(text: &str) -> Self {
        Self {
            delay: Duration::ZERO,
            outcome: Ok(text.to_string()),
            query: None,
        }
    }

    pub fn fail(error: BackendError) -> Self {
        Self {
            delay: Duration::ZERO,
            outcome: Err(error),
            query: None,
        }
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn when(mut self, query: &str) -> Self {
        self.query = Some(query.to_string());
        self
    }
}

/// Backend that plays back a script; echoes the query when no step matches
#[derive(Default)]
pub struct ScriptedBackend {
    steps: Mutex<VecDeque<Step>>,
    queries: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl ScriptedBackend {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps: Mutex::new(steps.into()),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().clone()
    }
}

#[async_trait]
impl ChatBackend for ScriptedBackend {
    async fn chat(&self, query: &str) -> Result<String, BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().push(query.to_string());

        let step = {
            let mut steps = self.steps.lock();
            let position = steps
                .iter()
                .position(|s| s.query.as_deref() == Some(query))
                .or_else(|| steps.iter().position(|s| s.query.is_none()));
            position.and_then(|i| steps.remove(i))
        };
        match step {
            Some(step) => {
                if !step.delay.is_zero() {
                    tokio::time::sleep(step.delay).await;
                }
                step.outcome
            }
            None => Ok(format!("echo: {}", query)),
        }
    }
}

/// What the fake synthesizer was asked to do
#[derive(Default)]
pub struct SpeechLog {
    pub utterances: Vec<Utterance>,
    pub cancels: usize,
}

impl SpeechLog {
    pub fn texts(&self) -> Vec<String> {
        self.utterances.iter().map(|u| u.text.clone()).collect()
    }
}

pub struct RecordingSynthesizer {
    log: Arc<Mutex<SpeechLog>>,
    voices: Vec<Voice>,
}

impl SpeechSynthesizer for RecordingSynthesizer {
    fn voices(&self) -> Vec<Voice> {
        self.voices.clone()
    }

    fn speak(&mut self, utterance: &Utterance) -> buddy::Result<()> {
        self.log.lock().utterances.push(utterance.clone());
        Ok(())
    }

    fn cancel(&mut self) {
        self.log.lock().cancels += 1;
    }
}

/// Lets a test play the role of the host recognizer
#[derive(Clone, Default)]
pub struct RecognizerRemote {
    sender: Arc<Mutex<Option<Sender<RecognitionEvent>>>>,
    options: Arc<Mutex<Vec<RecognitionOptions>>>,
    stops: Arc<AtomicUsize>,
}

impl RecognizerRemote {
    pub fn emit(&self, event: RecognitionEvent) {
        let sender = self.sender.lock().clone();
        if let Some(sender) = sender {
            let _ = sender.send(event);
        }
    }

    pub fn starts(&self) -> Vec<RecognitionOptions> {
        self.options.lock().clone()
    }

    pub fn stops(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }
}

pub struct RemoteRecognizer {
    remote: RecognizerRemote,
}

impl SpeechRecognizer for RemoteRecognizer {
    fn start(
        &mut self,
        options: &RecognitionOptions,
        events: Sender<RecognitionEvent>,
    ) -> buddy::Result<()> {
        self.remote.options.lock().push(options.clone());
        *self.remote.sender.lock() = Some(events);
        Ok(())
    }

    fn stop(&mut self) {
        self.remote.stops.fetch_add(1, Ordering::SeqCst);
    }
}

pub fn english_voices() -> Vec<Voice> {
    vec![
        Voice {
            id: "fr".into(),
            name: "French".into(),
            lang: "fr-fr".into(),
        },
        Voice {
            id: "en-us".into(),
            name: "English (America)".into(),
            lang: "en-us".into(),
        },
    ]
}

/// A controller wired to test doubles, plus handles to inspect them
pub struct Fixture {
    pub controller: ConversationController,
    pub backend: Arc<ScriptedBackend>,
    pub speech: Arc<Mutex<SpeechLog>>,
    pub recognizer: RecognizerRemote,
    // Dropped last so pending tasks can be aborted first
    pub runtime: Runtime,
}

pub struct FixtureBuilder {
    steps: Vec<Step>,
    recognizer: bool,
    synthesizer: bool,
}

impl Default for FixtureBuilder {
    fn default() -> Self {
        Self {
            steps: Vec::new(),
            recognizer: true,
            synthesizer: true,
        }
    }
}

impl FixtureBuilder {
    pub fn step(mut self, step: Step) -> Self {
        self.steps.push(step);
        self
    }

    pub fn without_recognizer(mut self) -> Self {
        self.recognizer = false;
        self
    }

    pub fn without_synthesizer(mut self) -> Self {
        self.synthesizer = false;
        self
    }

    pub fn build(self) -> Fixture {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .expect("test runtime");

        let backend = Arc::new(ScriptedBackend::new(self.steps));
        let speech = Arc::new(Mutex::new(SpeechLog::default()));
        let recognizer = RecognizerRemote::default();

        let recognizer_capability: Capability<Box<dyn SpeechRecognizer>> = if self.recognizer {
            Capability::Available(Box::new(RemoteRecognizer {
                remote: recognizer.clone(),
            }))
        } else {
            Capability::unavailable("no microphone")
        };

        let synthesizer_capability: Capability<Box<dyn SpeechSynthesizer>> = if self.synthesizer
        {
            Capability::Available(Box::new(RecordingSynthesizer {
                log: Arc::clone(&speech),
                voices: english_voices(),
            }))
        } else {
            Capability::unavailable("no speech engine")
        };

        let voice = VoiceAdapter::new(
            recognizer_capability,
            synthesizer_capability,
            VoiceConfig::default(),
        );

        let controller = ConversationController::new(
            Arc::clone(&backend) as Arc<dyn ChatBackend>,
            voice,
            runtime.handle().clone(),
        );

        Fixture {
            controller,
            backend,
            speech,
            recognizer,
            runtime,
        }
    }
}

pub fn fixture() -> FixtureBuilder {
    FixtureBuilder::default()
}

pub const WAIT: Duration = Duration::from_secs(5);

//! Conversation controller
//!
//! Owns the session state and runs one turn at a time: the user message is
//! appended right away, the backend is queried on the async runtime, and the
//! reply (or an apology) is appended and spoken when it comes back.

use super::state::{SessionState, SessionView};
use crate::backend::{BackendError, ChatBackend};
use crate::messages::Message;
use crate::voice::{RecognitionEvent, VoiceAdapter};
use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Shown and spoken whenever the backend cannot be used
pub const APOLOGY: &str = "Sorry, an error occurred.";

/// A settled backend request
#[derive(Debug)]
struct BackendReply {
    seq: u64,
    outcome: Result<String, BackendError>,
}

/// The request whose reply will be accepted
struct InFlight {
    seq: u64,
    task: JoinHandle<()>,
}

pub struct ConversationController {
    state: SessionState,
    backend: Arc<dyn ChatBackend>,
    runtime: Handle,
    voice: VoiceAdapter,
    reply_tx: Sender<BackendReply>,
    reply_rx: Receiver<BackendReply>,
    next_seq: u64,
    in_flight: Option<InFlight>,
}

impl ConversationController {
    pub fn new(backend: Arc<dyn ChatBackend>, voice: VoiceAdapter, runtime: Handle) -> Self {
        let (reply_tx, reply_rx) = unbounded();

        Self {
            state: SessionState::default(),
            backend,
            runtime,
            voice,
            reply_tx,
            reply_rx,
            next_seq: 0,
            in_flight: None,
        }
    }

    pub fn view(&self) -> SessionView<'_> {
        self.state.view()
    }

    pub fn can_listen(&self) -> bool {
        self.voice.can_listen()
    }

    pub fn listen_unavailable_reason(&self) -> Option<&str> {
        self.voice.listen_unavailable_reason()
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.state.input = text.into();
    }

    /// Submit whatever is in the input box
    pub fn submit_pending(&mut self) -> bool {
        let text = self.state.input.clone();
        self.submit(&text)
    }

    /// Send `text` to the backend.
    ///
    /// Returns `false` without touching anything when `text` is blank. A
    /// request still in flight is aborted; only the newest reply is kept.
    pub fn submit(&mut self, text: &str) -> bool {
        if text.trim().is_empty() {
            debug!("Ignoring blank submission");
            return false;
        }

        if let Some(previous) = self.in_flight.take() {
            debug!("Request {} superseded", previous.seq);
            previous.task.abort();
        }

        self.state.conversation.push(Message::user(text));
        self.state.input.clear();
        self.state.show_welcome = false;
        self.state.typing = true;

        self.next_seq += 1;
        let seq = self.next_seq;
        let backend = Arc::clone(&self.backend);
        let reply_tx = self.reply_tx.clone();
        let query = text.to_string();

        debug!("Dispatching request {}", seq);
        let task = self.runtime.spawn(async move {
            let outcome = backend.chat(&query).await;
            let _ = reply_tx.send(BackendReply { seq, outcome });
        });

        self.in_flight = Some(InFlight { seq, task });
        true
    }

    /// Empty the conversation and go back to the welcome panel
    pub fn clear(&mut self) {
        if let Some(previous) = self.in_flight.take() {
            previous.task.abort();
        }
        self.voice.cancel_speech();

        self.state.conversation.clear();
        self.state.typing = false;
        self.state.show_welcome = true;
        info!("Conversation cleared");
    }

    pub fn dismiss_welcome(&mut self) {
        self.state.show_welcome = false;
    }

    pub fn toggle_sidebar(&mut self) {
        self.state.sidebar_open = !self.state.sidebar_open;
    }

    pub fn toggle_listening(&mut self) {
        if self.state.listening {
            self.voice.stop_listening();
            self.state.listening = false;
            return;
        }

        match self.voice.start_listening() {
            Ok(()) => self.state.listening = true,
            Err(e) => {
                warn!("Cannot start listening: {}", e);
                self.state.listening = false;
            }
        }
    }

    /// Apply everything that arrived since the last call.
    ///
    /// Returns `true` if the state changed.
    pub fn poll_events(&mut self) -> bool {
        let mut changed = false;

        while let Ok(reply) = self.reply_rx.try_recv() {
            changed |= self.apply_reply(reply);
        }

        for event in self.voice.poll_recognition() {
            changed = true;
            self.apply_recognition(event);
        }

        changed
    }

    /// Block until the outstanding request settles or `timeout` passes.
    ///
    /// Returns `true` if nothing is left in flight.
    pub fn wait_for_reply(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;

        self.poll_events();
        while self.in_flight.is_some() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.reply_rx.recv_timeout(remaining) {
                Ok(reply) => {
                    self.apply_reply(reply);
                }
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => break,
            }
        }

        self.in_flight.is_none()
    }

    fn apply_reply(&mut self, reply: BackendReply) -> bool {
        match &self.in_flight {
            Some(current) if current.seq == reply.seq => {}
            _ => {
                debug!("Discarding stale reply {}", reply.seq);
                return false;
            }
        }

        self.in_flight = None;
        self.state.typing = false;

        match reply.outcome {
            Ok(text) => {
                debug!("Reply {} received", reply.seq);
                self.state.conversation.push(Message::ai(text.clone()));
                self.state.connected = true;
                self.voice.speak(&text);
            }
            Err(e) => {
                warn!("Request {} failed: {}", reply.seq, e);
                self.state.conversation.push(Message::ai(APOLOGY));
                self.state.connected = false;
                self.voice.speak(APOLOGY);
            }
        }

        true
    }

    fn apply_recognition(&mut self, event: RecognitionEvent) {
        self.state.listening = false;

        match event {
            RecognitionEvent::Result(transcript) => {
                info!("Heard: {}", transcript);
                self.state.input = transcript.clone();
                self.submit(&transcript);
            }
            RecognitionEvent::Error(e) => {
                warn!("Speech recognition error: {}", e);
            }
            RecognitionEvent::Ended => {
                debug!("Recognition ended");
            }
        }
    }
}

impl Drop for ConversationController {
    fn drop(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.task.abort();
        }
        self.voice.stop_listening();
        self.voice.cancel_speech();
    }
}

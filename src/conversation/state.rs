//! Session state owned by the conversation controller

use crate::messages::{Conversation, Message};

/// Mutable session state; only the controller holds it mutably
#[derive(Debug, Clone)]
pub struct SessionState {
    pub conversation: Conversation,
    /// Pending input text
    pub input: String,
    pub listening: bool,
    /// A reply is being awaited
    pub typing: bool,
    /// Outcome of the last backend exchange
    pub connected: bool,
    pub sidebar_open: bool,
    pub show_welcome: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            conversation: Conversation::new(),
            input: String::new(),
            listening: false,
            typing: false,
            connected: true,
            sidebar_open: true,
            show_welcome: true,
        }
    }
}

impl SessionState {
    pub fn view(&self) -> SessionView<'_> {
        SessionView { state: self }
    }
}

/// Read-only projection handed to the views
#[derive(Debug, Clone, Copy)]
pub struct SessionView<'a> {
    state: &'a SessionState,
}

impl<'a> SessionView<'a> {
    pub fn messages(&self) -> &'a [Message] {
        self.state.conversation.messages()
    }

    pub fn conversation(&self) -> &'a Conversation {
        &self.state.conversation
    }

    pub fn input(&self) -> &'a str {
        &self.state.input
    }

    pub fn is_listening(&self) -> bool {
        self.state.listening
    }

    pub fn is_typing(&self) -> bool {
        self.state.typing
    }

    pub fn is_connected(&self) -> bool {
        self.state.connected
    }

    pub fn sidebar_open(&self) -> bool {
        self.state.sidebar_open
    }

    pub fn show_welcome(&self) -> bool {
        self.state.show_welcome
    }
}

//! Conversation controller and its session state

mod controller;
mod state;

pub use controller::{ConversationController, APOLOGY};
pub use state::{SessionState, SessionView};

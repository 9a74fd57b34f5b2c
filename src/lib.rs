pub mod backend;
pub mod config;
pub mod conversation;
pub mod messages;
pub mod ui;
pub mod voice;

use thiserror::Error;

pub use backend::BackendError;

#[derive(Error, Debug, Clone)]
pub enum BuddyError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Backend error: {0}")]
    BackendError(#[from] BackendError),

    #[error("Speech recognition error: {0}")]
    RecognitionError(String),

    #[error("Speech synthesis error: {0}")]
    SynthesisError(String),

    #[error("Capability unavailable: {0}")]
    CapabilityUnavailable(String),

    #[error("Audio device error: {0}")]
    AudioDeviceError(String),

    #[error("IO error: {0}")]
    IOError(String),
}

impl From<std::io::Error> for BuddyError {
    fn from(e: std::io::Error) -> Self {
        BuddyError::IOError(e.to_string())
    }
}

impl BuddyError {
    /// Check if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            BuddyError::ConfigError(_) => false,
            // The next submission may well succeed
            BuddyError::BackendError(_) => true,
            BuddyError::RecognitionError(_) => true,
            BuddyError::SynthesisError(_) => true,
            // Host capabilities do not appear mid-session
            BuddyError::CapabilityUnavailable(_) => false,
            BuddyError::AudioDeviceError(_) => false,
            BuddyError::IOError(_) => false,
        }
    }

    /// Get a user-friendly description
    pub fn user_message(&self) -> String {
        match self {
            BuddyError::ConfigError(_) => {
                "Configuration error. Please check settings.".to_string()
            }
            BuddyError::BackendError(_) => {
                "Could not reach the assistant. Please try again.".to_string()
            }
            BuddyError::RecognitionError(_) => {
                "Speech recognition failed. Please type your message instead.".to_string()
            }
            BuddyError::SynthesisError(_) => {
                "Text-to-speech failed. Responses will be shown as text.".to_string()
            }
            BuddyError::CapabilityUnavailable(_) => {
                "Voice features are not available on this system.".to_string()
            }
            BuddyError::AudioDeviceError(_) => {
                "Audio device error. Please check your microphone.".to_string()
            }
            BuddyError::IOError(_) => "File system error occurred.".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BuddyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_errors_are_recoverable() {
        let err = BuddyError::from(BackendError::Transport("connection refused".into()));
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_unavailable_capability_is_not_recoverable() {
        let err = BuddyError::CapabilityUnavailable("no synthesizer".into());
        assert!(!err.is_recoverable());
        assert_eq!(
            err.user_message(),
            "Voice features are not available on this system."
        );
    }
}

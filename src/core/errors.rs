use reqwest::StatusCode;
use thiserror::Error;

use super::models::NoteId;

#[derive(Error, Debug)]
pub enum NoteAppError {
    #[error("Transport error: {0}")]
    Transport(Box<reqwest::Error>),

    #[error("HTTP error {status} from {url}")]
    Status { status: StatusCode, url: String },

    #[error("Invalid credentials")]
    Auth,

    #[error("Note {0} no longer exists on the server")]
    NotFound(NoteId),

    #[error("Rejected: {0}")]
    Validation(String),

    #[error("Note {0} is not in the local collection")]
    MissingNote(NoteId),

    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl NoteAppError {
    /// Network-level failures, as opposed to the service answering "no".
    pub fn is_transport(&self) -> bool {
        matches!(self, NoteAppError::Transport(_) | NoteAppError::Status { .. })
    }
}

impl From<std::io::Error> for NoteAppError {
    fn from(error: std::io::Error) -> Self {
        NoteAppError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for NoteAppError {
    fn from(error: reqwest::Error) -> Self {
        NoteAppError::Transport(Box::new(error))
    }
}

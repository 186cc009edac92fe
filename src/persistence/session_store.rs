use std::sync::{
    Mutex,
    PoisonError,
};

use log::warn;

use super::DataDir;
use crate::core::{
    NoteAppError,
    Session,
};

/// The single persistent slot holding the logged-in user's session.
pub trait SessionStore: Send + Sync {
    /// Soft-fails: an empty or unreadable slot is simply no session.
    fn restore(&self) -> Option<Session>;

    fn persist(&self, session: &Session) -> Result<(), NoteAppError>;

    fn clear(&self) -> Result<(), NoteAppError>;
}

pub struct FileSessionStore {
    data_dir: DataDir,
    filename: String,
}

impl FileSessionStore {
    pub fn new(data_dir: DataDir, filename: impl Into<String>) -> Self {
        Self { data_dir, filename: filename.into() }
    }
}

impl SessionStore for FileSessionStore {
    fn restore(&self) -> Option<Session> {
        match self.data_dir.load_json::<Session>(&self.filename) {
            Ok(session) => session,
            Err(e) => {
                warn!("Ignoring unreadable session file {}: {}", self.filename, e);
                None
            }
        }
    }

    fn persist(&self, session: &Session) -> Result<(), NoteAppError> {
        self.data_dir.save_json(session, &self.filename)
    }

    fn clear(&self) -> Result<(), NoteAppError> {
        self.data_dir.delete_file(&self.filename)
    }
}

/// Keeps the serialized session in memory. The slot holds raw JSON so a
/// corrupt value behaves the same way a corrupt file would.
#[derive(Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self { slot: Mutex::new(Some(raw.into())) }
    }

    pub fn raw(&self) -> Option<String> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl SessionStore for MemorySessionStore {
    fn restore(&self) -> Option<Session> {
        let raw = self.raw()?;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                warn!("Ignoring unreadable stored session: {}", e);
                None
            }
        }
    }

    fn persist(&self, session: &Session) -> Result<(), NoteAppError> {
        let json = serde_json::to_string(session)?;
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(json);
        Ok(())
    }

    fn clear(&self) -> Result<(), NoteAppError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

use crate::core::{
    Note,
    NoteAppError,
    NoteId,
    Session,
};

/// Outcome of a background service call, delivered back to the UI thread.
///
/// Login results carry their attempt number so only the latest one is applied.
#[derive(Debug)]
pub enum TaskResult {
    NotesLoaded { initial: bool, result: Result<Vec<Note>, NoteAppError> },
    NoteCreated { result: Result<Note, NoteAppError> },
    NoteUpdated { id: NoteId, content: String, result: Result<Note, NoteAppError> },
    LoggedIn { attempt: u64, result: Result<Session, NoteAppError> },
}

impl TaskResult {
    pub fn task_type(&self) -> &'static str {
        match self {
            TaskResult::NotesLoaded { initial: true, .. } => "initial_notes_load",
            TaskResult::NotesLoaded { initial: false, .. } => "notes_reload",
            TaskResult::NoteCreated { .. } => "note_create",
            TaskResult::NoteUpdated { .. } => "note_update",
            TaskResult::LoggedIn { .. } => "login",
        }
    }

    pub fn is_ok(&self) -> bool {
        match self {
            TaskResult::NotesLoaded { result, .. } => result.is_ok(),
            TaskResult::NoteCreated { result, .. } => result.is_ok(),
            TaskResult::NoteUpdated { result, .. } => result.is_ok(),
            TaskResult::LoggedIn { result, .. } => result.is_ok(),
        }
    }
}

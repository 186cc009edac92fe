use std::fmt;

use chrono::{
    DateTime,
    Utc,
};
use serde::{
    Deserialize,
    Serialize,
};
use serde_json::{
    Map,
    Value,
};

/// Identifier assigned by the note service.
///
/// Services disagree on whether ids are numbers or strings, so both are
/// accepted and written back in the form they arrived in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NoteId {
    Number(u64),
    Text(String),
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NoteId::Number(id) => write!(f, "{id}"),
            NoteId::Text(id) => f.write_str(id),
        }
    }
}

impl From<u64> for NoteId {
    fn from(id: u64) -> Self {
        NoteId::Number(id)
    }
}

impl From<&str> for NoteId {
    fn from(id: &str) -> Self {
        NoteId::Text(id.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub content: String,
    #[serde(default)]
    pub important: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    /// Fields this client doesn't model (e.g. `user`). Sent back untouched on update.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Note {
    /// Full replacement record with the importance flag inverted.
    pub fn with_importance_toggled(&self) -> Note {
        Note { important: !self.important, ..self.clone() }
    }
}

/// A note that has not been through the service yet, so it has no id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoteDraft {
    pub content: String,
    pub important: bool,
    pub date: DateTime<Utc>,
}

impl NoteDraft {
    pub fn new(content: impl Into<String>, important: bool) -> Self {
        Self { content: content.into(), important, date: Utc::now() }
    }
}

/// The record proving a logged-in user. Stored as-is in the session file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub username: String,
    pub name: String,
    pub token: String,
}

#[derive(Clone, Default, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

pub mod config;
pub mod errors;
pub mod http;
pub mod models;
pub mod tasks;

pub use config::AppConfig;
pub use errors::NoteAppError;
pub use models::{
    Credentials,
    Note,
    NoteDraft,
    NoteId,
    Session,
};

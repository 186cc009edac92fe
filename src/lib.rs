pub mod cli;
pub mod controller;
pub mod core;
pub mod gui;
pub mod logging;
pub mod persistence;
pub mod services;
pub mod setup;

pub use crate::controller::NoteApp;
pub use crate::core::{
    AppConfig,
    NoteAppError,
};

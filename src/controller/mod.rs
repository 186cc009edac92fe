pub mod notification;

#[cfg(test)]
mod tests;

use std::{
    sync::Arc,
    time::{
        Duration,
        Instant,
    },
};

use log::{
    debug,
    error,
    info,
    warn,
};
pub use notification::Notification;

use crate::{
    core::{
        tasks::{
            TaskManager,
            TaskResult,
        },
        AppConfig,
        Credentials,
        Note,
        NoteAppError,
        NoteDraft,
        NoteId,
        Session,
    },
    persistence::SessionStore,
    services::{
        LoginService,
        NoteService,
    },
};

/// The outside world the controller talks to.
#[derive(Clone)]
pub struct Capabilities {
    pub notes: Arc<dyn NoteService>,
    pub login: Arc<dyn LoginService>,
    pub sessions: Arc<dyn SessionStore>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerOptions {
    pub notification_delay: Duration,
    pub notify_on_initial_load_failure: bool,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for ControllerOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            notification_delay: config.notification_delay(),
            notify_on_initial_load_failure: config.notify_on_initial_load_failure,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Anonymous,
    Authenticated,
}

/// Form fields edited directly by the UI.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub username: String,
    pub password: String,
    pub new_note: String,
    pub new_note_important: bool,
    pub login_visible: bool,
    pub note_form_visible: bool,
}

/// All application state, plus the operations that change it.
///
/// Service calls run in the background; their results come back through
/// [`NoteApp::poll`] and are applied on the calling thread.
pub struct NoteApp {
    notes: Vec<Note>,
    show_all: bool,
    session: Option<Session>,
    notification: Notification,
    pub form: FormState,

    options: ControllerOptions,
    login_attempt: u64,
    in_flight: usize,

    capabilities: Capabilities,
    tasks: TaskManager,
}

impl NoteApp {
    pub fn new(capabilities: Capabilities, tasks: TaskManager, options: ControllerOptions) -> Self {
        Self {
            notes: Vec::new(),
            show_all: false,
            session: None,
            notification: Notification::new(options.notification_delay),
            form: FormState::default(),
            options,
            login_attempt: 0,
            in_flight: 0,
            capabilities,
            tasks,
        }
    }

    pub fn tasks_mut(&mut self) -> &mut TaskManager {
        &mut self.tasks
    }

    /// Startup: fetch the collection and restore a saved session.
    pub fn start(&mut self) {
        self.dispatch_fetch(true);

        if let Some(session) = self.capabilities.sessions.restore() {
            info!("Restored session for {}", session.username);
            self.capabilities.notes.set_token(&session.token);
            self.session = Some(session);
        }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// The rendered subset: everything, or only important notes.
    pub fn notes_to_show(&self) -> Vec<&Note> {
        self.notes.iter().filter(|note| self.show_all || note.important).collect()
    }

    pub fn show_all(&self) -> bool {
        self.show_all
    }

    pub fn set_visibility_filter(&mut self, show_all: bool) {
        self.show_all = show_all;
    }

    pub fn toggle_visibility_filter(&mut self) {
        self.show_all = !self.show_all;
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn session_status(&self) -> SessionStatus {
        match self.session {
            Some(_) => SessionStatus::Authenticated,
            None => SessionStatus::Anonymous,
        }
    }

    pub fn notification(&self) -> Option<&str> {
        self.notification.message()
    }

    /// Expires the notification. Returns the time until it should be checked again.
    pub fn tick_notification(&mut self, now: Instant) -> Option<Duration> {
        self.notification.tick(now)
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    fn notify(&mut self, message: impl Into<String>) {
        self.notification.show(Some(message.into()));
    }

    fn dispatch_fetch(&mut self, initial: bool) {
        self.in_flight += 1;
        self.tasks.fetch_notes(self.capabilities.notes.clone(), initial);
    }

    pub fn reload_notes(&mut self) {
        self.dispatch_fetch(false);
    }

    pub fn toggle_importance(&mut self, id: &NoteId) -> Result<(), NoteAppError> {
        let Some(note) = self.notes.iter().find(|note| &note.id == id) else {
            error!("Asked to toggle note {id}, which is not in the collection");
            return Err(NoteAppError::MissingNote(id.clone()));
        };

        let changed = note.with_importance_toggled();
        debug!("Toggling importance of note {id} to {}", changed.important);

        self.in_flight += 1;
        self.tasks.update_note(self.capabilities.notes.clone(), changed);
        Ok(())
    }

    pub fn add_note(&mut self, content: &str, important: bool) -> Result<(), NoteAppError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(NoteAppError::Validation("note content is empty".to_string()));
        }

        self.in_flight += 1;
        self.tasks.create_note(self.capabilities.notes.clone(), NoteDraft::new(content, important));
        Ok(())
    }

    /// Submits the new-note form. Empty input is ignored.
    pub fn submit_note_form(&mut self) {
        let content = self.form.new_note.clone();
        if let Err(e) = self.add_note(&content, self.form.new_note_important) {
            debug!("Note form not submitted: {e}");
        }
    }

    pub fn login(&mut self, username: &str, password: &str) {
        self.login_attempt += 1;
        self.in_flight += 1;
        info!("Logging in as {username}");
        self.tasks.login(
            self.capabilities.login.clone(),
            Credentials::new(username, password),
            self.login_attempt,
        );
    }

    pub fn submit_login_form(&mut self) {
        let (username, password) = (self.form.username.clone(), self.form.password.clone());
        self.login(&username, &password);
    }

    /// Forgets the session everywhere: state, service token and storage.
    /// The note collection stays, as does any call already sent.
    pub fn logout(&mut self) {
        if let Some(session) = self.session.take() {
            info!("{} logged out", session.username);
        }
        self.capabilities.notes.clear_token();
        if let Err(e) = self.capabilities.sessions.clear() {
            warn!("Failed to clear saved session: {e}");
        }
        self.login_attempt += 1;
    }

    /// Applies every result that has arrived since the last call.
    pub fn poll(&mut self) {
        for result in self.tasks.poll_results() {
            self.apply(result);
        }
    }

    /// Blocks until nothing is in flight or `timeout` passes. Returns whether
    /// everything settled.
    pub fn wait_idle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.in_flight > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.tasks.wait_result(remaining) {
                Some(result) => self.apply(result),
                None => return false,
            }
        }
        true
    }

    pub fn apply(&mut self, result: TaskResult) {
        self.in_flight = self.in_flight.saturating_sub(1);

        match result {
            TaskResult::NotesLoaded { initial, result } => match result {
                Ok(notes) => {
                    info!("Loaded {} notes", notes.len());
                    self.notes = notes;
                }
                Err(e) => {
                    warn!("Failed to load notes: {e}");
                    if !initial || self.options.notify_on_initial_load_failure {
                        self.notify(format!("Failed to load notes: {e}"));
                    }
                }
            },

            TaskResult::NoteCreated { result } => match result {
                Ok(note) => {
                    debug!("Created note {}", note.id);
                    self.notes.push(note);
                    self.form.new_note.clear();
                    self.form.new_note_important = false;
                    self.form.note_form_visible = false;
                }
                Err(e) => {
                    warn!("Failed to add note: {e}");
                    self.notify(format!("Failed to add note: {e}"));
                }
            },

            TaskResult::NoteUpdated { id, content, result } => {
                let Some(position) = self.notes.iter().position(|note| note.id == id) else {
                    debug!("Note {id} is no longer listed, dropping its update");
                    return;
                };
                match result {
                    Ok(updated) => self.notes[position] = updated,
                    Err(NoteAppError::NotFound(_)) => {
                        info!("Note {id} was removed from server, dropping it locally");
                        self.notes.remove(position);
                        self.notify(format!("Note '{content}' was removed from server"));
                    }
                    Err(e) => {
                        warn!("Failed to update note {id}: {e}");
                        self.notify(format!("Failed to update note: {e}"));
                    }
                }
            }

            TaskResult::LoggedIn { attempt, result } => {
                if attempt != self.login_attempt {
                    debug!("Dropping superseded login attempt {attempt}");
                    return;
                }
                match result {
                    Ok(session) => {
                        info!("{} logged in", session.username);
                        self.capabilities.notes.set_token(&session.token);
                        if let Err(e) = self.capabilities.sessions.persist(&session) {
                            warn!("Failed to save session: {e}");
                        }
                        self.session = Some(session);
                        self.form.username.clear();
                        self.form.password.clear();
                        self.form.login_visible = false;
                    }
                    Err(e) => {
                        if e.is_transport() {
                            warn!("Login failed: {e}");
                        } else {
                            info!("Login rejected: {e}");
                        }
                        self.session = None;
                        self.capabilities.notes.clear_token();
                        self.notify("Invalid credentials");
                    }
                }
            }
        }
    }
}

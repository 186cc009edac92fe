use std::sync::{
    atomic::{
        AtomicBool,
        AtomicU64,
        AtomicUsize,
        Ordering,
    },
    Mutex,
};

use async_trait::async_trait;
use chrono::Utc;

use super::*;
use crate::persistence::MemorySessionStore;

const WAIT: Duration = Duration::from_secs(5);

/// In-memory stand-in for the remote note collection.
#[derive(Default)]
struct FakeNoteService {
    notes: Mutex<Vec<Note>>,
    next_id: AtomicU64,
    token: Mutex<Option<String>>,
    calls: AtomicUsize,
    fail_list: AtomicBool,
    fail_updates: AtomicBool,
}

impl FakeNoteService {
    fn with_notes(notes: Vec<Note>, next_id: u64) -> Self {
        Self { notes: Mutex::new(notes), next_id: AtomicU64::new(next_id), ..Default::default() }
    }

    fn remove(&self, id: &NoteId) {
        self.notes.lock().unwrap().retain(|note| &note.id != id);
    }

    fn token(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NoteService for FakeNoteService {
    fn set_token(&self, token: &str) {
        *self.token.lock().unwrap() = Some(token.to_string());
    }

    fn clear_token(&self) {
        *self.token.lock().unwrap() = None;
    }

    async fn list_all(&self) -> Result<Vec<Note>, NoteAppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(NoteAppError::Status {
                status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
                url: "http://fake/notes".to_string(),
            });
        }
        Ok(self.notes.lock().unwrap().clone())
    }

    async fn create(&self, draft: &NoteDraft) -> Result<Note, NoteAppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.token().is_none() {
            return Err(NoteAppError::Validation("token missing".to_string()));
        }
        let note = Note {
            id: NoteId::Number(self.next_id.fetch_add(1, Ordering::SeqCst)),
            content: draft.content.clone(),
            important: draft.important,
            date: Some(draft.date),
            extra: Default::default(),
        };
        self.notes.lock().unwrap().push(note.clone());
        Ok(note)
    }

    async fn update(&self, id: &NoteId, note: &Note) -> Result<Note, NoteAppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(NoteAppError::Status {
                status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                url: format!("http://fake/notes/{id}"),
            });
        }
        let mut notes = self.notes.lock().unwrap();
        match notes.iter_mut().find(|stored| &stored.id == id) {
            Some(stored) => {
                *stored = note.clone();
                Ok(note.clone())
            }
            None => Err(NoteAppError::NotFound(id.clone())),
        }
    }
}

#[derive(Default)]
struct FakeLoginService {
    unreachable: AtomicBool,
}

#[async_trait]
impl LoginService for FakeLoginService {
    async fn login(&self, credentials: &Credentials) -> Result<Session, NoteAppError> {
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(NoteAppError::Status {
                status: reqwest::StatusCode::BAD_GATEWAY,
                url: "http://fake/login".to_string(),
            });
        }
        if credentials.username == "mluukkai" && credentials.password == "salainen" {
            Ok(session())
        } else {
            Err(NoteAppError::Auth)
        }
    }
}

fn session() -> Session {
    Session {
        username: "mluukkai".to_string(),
        name: "Matti Luukkainen".to_string(),
        token: "token-mluukkai".to_string(),
    }
}

fn note(id: u64, content: &str, important: bool) -> Note {
    Note {
        id: NoteId::Number(id),
        content: content.to_string(),
        important,
        date: Some(Utc::now()),
        extra: Default::default(),
    }
}

struct Harness {
    app: NoteApp,
    notes: Arc<FakeNoteService>,
    login: Arc<FakeLoginService>,
    sessions: Arc<MemorySessionStore>,
}

impl Harness {
    fn new(remote: FakeNoteService, sessions: MemorySessionStore) -> Self {
        Self::with_options(remote, sessions, ControllerOptions::default())
    }

    fn with_options(
        remote: FakeNoteService,
        sessions: MemorySessionStore,
        options: ControllerOptions,
    ) -> Self {
        let notes = Arc::new(remote);
        let login = Arc::new(FakeLoginService::default());
        let sessions = Arc::new(sessions);
        let capabilities = Capabilities {
            notes: notes.clone(),
            login: login.clone(),
            sessions: sessions.clone(),
        };
        let app = NoteApp::new(capabilities, TaskManager::new().unwrap(), options);
        Self { app, notes, login, sessions }
    }

    /// Runs startup and waits for the initial fetch.
    fn started(mut self) -> Self {
        self.app.start();
        assert!(self.app.wait_idle(WAIT), "startup did not settle");
        self
    }

    fn settle(&mut self) {
        assert!(self.app.wait_idle(WAIT), "tasks did not settle");
    }
}

fn logged_in_store() -> MemorySessionStore {
    MemorySessionStore::with_raw(serde_json::to_string(&session()).unwrap())
}

fn contents(notes: &[Note]) -> Vec<(&str, bool)> {
    notes.iter().map(|n| (n.content.as_str(), n.important)).collect()
}

#[test]
fn test_startup_loads_notes_and_stays_anonymous() {
    let remote = FakeNoteService::with_notes(vec![note(1, "a", false), note(2, "b", true)], 3);
    let h = Harness::new(remote, MemorySessionStore::new()).started();

    assert_eq!(contents(h.app.notes()), vec![("a", false), ("b", true)]);
    assert_eq!(h.app.session_status(), SessionStatus::Anonymous);
    assert_eq!(h.notes.token(), None);
}

#[test]
fn test_startup_restores_session_and_token() {
    let h = Harness::new(FakeNoteService::default(), logged_in_store()).started();

    assert_eq!(h.app.session_status(), SessionStatus::Authenticated);
    assert_eq!(h.app.session(), Some(&session()));
    assert_eq!(h.notes.token().as_deref(), Some("token-mluukkai"));
}

#[test]
fn test_startup_with_corrupt_session_is_anonymous() {
    let h = Harness::new(FakeNoteService::default(), MemorySessionStore::with_raw("{oops")).started();

    assert_eq!(h.app.session_status(), SessionStatus::Anonymous);
    assert_eq!(h.notes.token(), None);
}

#[test]
fn test_startup_fetch_failure_is_silent_by_default() {
    let remote = FakeNoteService::default();
    remote.fail_list.store(true, Ordering::SeqCst);
    let h = Harness::new(remote, MemorySessionStore::new()).started();

    assert!(h.app.notes().is_empty());
    assert_eq!(h.app.notification(), None);
}

#[test]
fn test_startup_fetch_failure_can_notify() {
    let remote = FakeNoteService::default();
    remote.fail_list.store(true, Ordering::SeqCst);
    let options = ControllerOptions { notify_on_initial_load_failure: true, ..Default::default() };
    let h = Harness::with_options(remote, MemorySessionStore::new(), options).started();

    assert!(h.app.notes().is_empty());
    assert!(h.app.notification().unwrap().starts_with("Failed to load notes"));
}

#[test]
fn test_toggle_importance_replaces_in_place() {
    let remote = FakeNoteService::with_notes(vec![note(1, "a", false)], 2);
    let mut h = Harness::new(remote, logged_in_store()).started();

    h.app.toggle_importance(&NoteId::Number(1)).unwrap();
    h.settle();

    assert_eq!(contents(h.app.notes()), vec![("a", true)]);
    assert_eq!(h.app.notes()[0].id, NoteId::Number(1));
}

#[test]
fn test_toggle_distinct_ids_preserves_order() {
    let remote = FakeNoteService::with_notes(
        vec![note(1, "a", false), note(2, "b", true), note(3, "c", false), note(4, "d", true)],
        5,
    );
    let mut h = Harness::new(remote, logged_in_store()).started();

    for id in [4, 1, 2] {
        h.app.toggle_importance(&NoteId::Number(id)).unwrap();
    }
    h.settle();

    assert_eq!(
        contents(h.app.notes()),
        vec![("a", true), ("b", false), ("c", false), ("d", false)]
    );
}

#[test]
fn test_toggle_vanished_note_removes_only_it() {
    let remote =
        FakeNoteService::with_notes(vec![note(1, "a", false), note(2, "b", true), note(3, "c", false)], 4);
    let mut h = Harness::new(remote, logged_in_store()).started();

    h.notes.remove(&NoteId::Number(2));
    h.app.toggle_importance(&NoteId::Number(2)).unwrap();
    h.settle();

    assert_eq!(contents(h.app.notes()), vec![("a", false), ("c", false)]);
    assert_eq!(h.app.notification(), Some("Note 'b' was removed from server"));

    let later = Instant::now() + Duration::from_secs(5) + Duration::from_millis(1);
    assert_eq!(h.app.tick_notification(later), None);
    assert_eq!(h.app.notification(), None);
}

#[test]
fn test_toggle_other_failure_keeps_note() {
    let remote = FakeNoteService::with_notes(vec![note(1, "a", false)], 2);
    let mut h = Harness::new(remote, logged_in_store()).started();

    h.notes.fail_updates.store(true, Ordering::SeqCst);
    h.app.toggle_importance(&NoteId::Number(1)).unwrap();
    h.settle();

    assert_eq!(contents(h.app.notes()), vec![("a", false)]);
    assert!(h.app.notification().unwrap().starts_with("Failed to update note"));
}

#[test]
fn test_toggle_unknown_id_is_rejected_locally() {
    let mut h = Harness::new(FakeNoteService::default(), logged_in_store()).started();
    let calls = h.notes.calls();

    let err = h.app.toggle_importance(&NoteId::Number(42)).expect_err("should fail");
    assert!(matches!(err, NoteAppError::MissingNote(NoteId::Number(42))), "wrong error: {err:#?}");
    assert_eq!(h.app.in_flight(), 0);
    assert_eq!(h.notes.calls(), calls);
}

#[test]
fn test_add_note_appends_and_clears_input() {
    let mut h = Harness::new(FakeNoteService::with_notes(Vec::new(), 5), logged_in_store()).started();

    h.app.form.note_form_visible = true;
    h.app.form.new_note = "buy milk".to_string();
    h.app.submit_note_form();
    h.settle();

    assert_eq!(h.app.notes().len(), 1);
    assert_eq!(h.app.notes()[0].id, NoteId::Number(5));
    assert_eq!(contents(h.app.notes()), vec![("buy milk", false)]);
    assert_eq!(h.app.form.new_note, "");
    assert!(!h.app.form.note_form_visible);
}

#[test]
fn test_add_note_keeps_insertion_order() {
    let remote = FakeNoteService::with_notes(vec![note(1, "first", false)], 2);
    let mut h = Harness::new(remote, logged_in_store()).started();

    h.app.add_note("second", true).unwrap();
    h.settle();
    h.app.add_note("third", false).unwrap();
    h.settle();

    assert_eq!(
        contents(h.app.notes()),
        vec![("first", false), ("second", true), ("third", false)]
    );
}

#[test]
fn test_add_blank_note_makes_no_call() {
    let mut h = Harness::new(FakeNoteService::default(), logged_in_store()).started();
    let calls = h.notes.calls();

    assert!(matches!(h.app.add_note("   \n\t", false), Err(NoteAppError::Validation(_))));
    h.app.form.new_note = "  ".to_string();
    h.app.submit_note_form();

    assert_eq!(h.app.in_flight(), 0);
    assert_eq!(h.notes.calls(), calls);
    assert!(h.app.notes().is_empty());
    assert_eq!(h.app.form.new_note, "  ");
}

#[test]
fn test_add_note_rejected_keeps_input() {
    // No session, so the fake refuses the create.
    let mut h = Harness::new(FakeNoteService::default(), MemorySessionStore::new()).started();

    h.app.form.new_note = "draft".to_string();
    h.app.submit_note_form();
    h.settle();

    assert!(h.app.notes().is_empty());
    assert_eq!(h.app.form.new_note, "draft");
    assert!(h.app.notification().unwrap().starts_with("Failed to add note"));
}

#[test]
fn test_login_success() {
    let mut h = Harness::new(FakeNoteService::default(), MemorySessionStore::new()).started();

    h.app.form.login_visible = true;
    h.app.form.username = "mluukkai".to_string();
    h.app.form.password = "salainen".to_string();
    h.app.submit_login_form();
    h.settle();

    assert_eq!(h.app.session_status(), SessionStatus::Authenticated);
    assert_eq!(h.notes.token().as_deref(), Some("token-mluukkai"));
    assert_eq!(h.sessions.restore(), Some(session()));
    assert_eq!(h.app.form.username, "");
    assert_eq!(h.app.form.password, "");
    assert!(!h.app.form.login_visible);
    assert_eq!(h.app.notification(), None);
}

#[test]
fn test_login_failure_keeps_fields_and_notifies() {
    let mut h = Harness::new(FakeNoteService::default(), MemorySessionStore::new()).started();

    h.app.form.username = "mluukkai".to_string();
    h.app.form.password = "wrong".to_string();
    h.app.submit_login_form();
    h.settle();

    assert_eq!(h.app.session_status(), SessionStatus::Anonymous);
    assert_eq!(h.sessions.raw(), None);
    assert_eq!(h.app.form.username, "mluukkai");
    assert_eq!(h.app.form.password, "wrong");
    assert_eq!(h.app.notification(), Some("Invalid credentials"));

    let later = Instant::now() + Duration::from_secs(5);
    h.app.tick_notification(later);
    assert_eq!(h.app.notification(), None);
}

#[test]
fn test_login_service_down_reads_as_invalid_credentials() {
    let mut h = Harness::new(FakeNoteService::default(), MemorySessionStore::new()).started();

    h.login.unreachable.store(true, Ordering::SeqCst);
    h.app.form.login_visible = true;
    h.app.form.username = "mluukkai".to_string();
    h.app.form.password = "salainen".to_string();
    h.app.submit_login_form();
    h.settle();

    assert_eq!(h.app.session_status(), SessionStatus::Anonymous);
    assert_eq!(h.notes.token(), None);
    assert_eq!(h.sessions.raw(), None);
    assert_eq!(h.app.form.username, "mluukkai");
    assert_eq!(h.app.form.password, "salainen");
    assert!(h.app.form.login_visible);
    assert_eq!(h.app.notification(), Some("Invalid credentials"));
}

#[test]
fn test_only_latest_login_attempt_applies() {
    let mut h = Harness::new(FakeNoteService::default(), MemorySessionStore::new()).started();

    h.app.login("mluukkai", "salainen");
    h.app.login("mluukkai", "wrong");
    h.settle();

    assert_eq!(h.app.session_status(), SessionStatus::Anonymous);
    assert_eq!(h.app.notification(), Some("Invalid credentials"));
}

#[test]
fn test_logout_clears_everything() {
    let mut h = Harness::new(FakeNoteService::default(), logged_in_store()).started();

    h.app.logout();

    assert_eq!(h.app.session_status(), SessionStatus::Anonymous);
    assert_eq!(h.notes.token(), None);
    assert_eq!(h.sessions.raw(), None);
}

#[test]
fn test_logout_during_startup_still_loads_notes() {
    let remote = FakeNoteService::with_notes(vec![note(1, "a", false), note(2, "b", true)], 3);
    let mut h = Harness::new(remote, logged_in_store());

    h.app.start();
    h.app.logout();
    h.settle();

    assert_eq!(h.app.session_status(), SessionStatus::Anonymous);
    assert_eq!(contents(h.app.notes()), vec![("a", false), ("b", true)]);
}

#[test]
fn test_update_accepted_before_logout_is_applied() {
    let remote = FakeNoteService::with_notes(vec![note(1, "a", false)], 2);
    let mut h = Harness::new(remote, logged_in_store()).started();

    h.app.toggle_importance(&NoteId::Number(1)).unwrap();
    h.app.logout();
    h.settle();

    let server = h.notes.notes.lock().unwrap().clone();
    assert_eq!(contents(&server), vec![("a", true)]);
    assert_eq!(contents(h.app.notes()), contents(&server));
    assert_eq!(h.app.in_flight(), 0);
}

#[test]
fn test_login_in_flight_is_superseded_by_logout() {
    let mut h = Harness::new(FakeNoteService::default(), MemorySessionStore::new()).started();

    h.app.login("mluukkai", "salainen");
    h.app.logout();
    h.settle();

    assert_eq!(h.app.session_status(), SessionStatus::Anonymous);
    assert_eq!(h.notes.token(), None);
    assert_eq!(h.sessions.raw(), None);
}

#[test]
fn test_reload_replaces_collection() {
    let remote = FakeNoteService::with_notes(vec![note(1, "a", false)], 2);
    let mut h = Harness::new(remote, logged_in_store()).started();

    h.notes.notes.lock().unwrap().push(note(9, "from elsewhere", true));
    h.app.reload_notes();
    h.settle();

    assert_eq!(contents(h.app.notes()), vec![("a", false), ("from elsewhere", true)]);
}

#[test]
fn test_reload_failure_notifies() {
    let mut h = Harness::new(FakeNoteService::default(), logged_in_store()).started();

    h.notes.fail_list.store(true, Ordering::SeqCst);
    h.app.reload_notes();
    h.settle();

    assert!(h.app.notification().unwrap().starts_with("Failed to load notes"));
}

#[test]
fn test_visibility_filter() {
    let remote = FakeNoteService::with_notes(
        vec![note(1, "a", true), note(2, "b", false), note(3, "c", true)],
        4,
    );
    let mut h = Harness::new(remote, MemorySessionStore::new()).started();

    h.app.set_visibility_filter(false);
    let visible: Vec<&str> = h.app.notes_to_show().iter().map(|n| n.content.as_str()).collect();
    assert_eq!(visible, vec!["a", "c"]);

    h.app.set_visibility_filter(true);
    assert_eq!(h.app.notes_to_show().len(), 3);

    h.app.toggle_visibility_filter();
    assert!(!h.app.show_all());
    assert_eq!(h.app.notes().len(), 3);
}

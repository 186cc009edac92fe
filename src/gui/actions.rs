use crate::core::NoteId;

// A simple ui action queue so widgets don't need the whole controller
#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    // Notes
    ToggleImportance(NoteId),
    SubmitNote,
    SetShowAll(bool),
    Reload,

    // Session
    SubmitLogin,
    Logout,

    // Toggle-reveal forms
    SetLoginVisible(bool),
    SetNoteFormVisible(bool),
}

pub struct ActionQueue {
    actions: Vec<UiAction>,
}

impl ActionQueue {
    pub fn new() -> Self {
        Self { actions: Vec::new() }
    }

    pub fn push(&mut self, action: UiAction) {
        self.actions.push(action);
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, UiAction> {
        self.actions.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl Default for ActionQueue {
    fn default() -> Self {
        Self::new()
    }
}

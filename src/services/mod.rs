pub mod login;
pub mod notes;

#[cfg(test)]
pub(crate) mod stub_server;

pub use login::{
    HttpLoginService,
    LoginService,
};
pub use notes::{
    HttpNoteService,
    NoteService,
};

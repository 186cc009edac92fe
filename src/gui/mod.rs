pub mod actions;
pub mod app;
pub mod login_form;
pub mod note_form;
pub mod note_list;
pub mod notification_banner;
pub mod theme;
pub mod top_bar;

pub use app::NoteWindow;

use eframe::egui;

use crate::{
    controller::FormState,
    gui::actions::{
        ActionQueue,
        UiAction,
    },
};

/// The "new note" form, hidden behind a button until asked for.
pub struct NoteForm;

impl NoteForm {
    pub fn show(ui: &mut egui::Ui, form: &mut FormState, actions: &mut ActionQueue) {
        if !form.note_form_visible {
            if ui.button("new note").clicked() {
                actions.push(UiAction::SetNoteFormVisible(true));
            }
            return;
        }

        ui.label(egui::RichText::new("Create a new note").strong());
        ui.horizontal(|ui| {
            let input = ui.add(
                egui::TextEdit::singleline(&mut form.new_note)
                    .hint_text("a new note...")
                    .desired_width(280.0),
            );
            let enter_pressed = input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

            ui.checkbox(&mut form.new_note_important, "important");

            let can_save = !form.new_note.trim().is_empty();
            if ui.add_enabled(can_save, egui::Button::new("save")).clicked()
                || (enter_pressed && can_save)
            {
                actions.push(UiAction::SubmitNote);
            }
        });

        if ui.button("cancel").clicked() {
            actions.push(UiAction::SetNoteFormVisible(false));
        }
    }
}

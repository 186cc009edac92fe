use eframe::egui;

use crate::{
    core::Note,
    gui::{
        actions::{
            ActionQueue,
            UiAction,
        },
        theme::Theme,
    },
};

pub struct NoteList;

impl NoteList {
    pub fn show(ui: &mut egui::Ui, notes: &[&Note], theme: &Theme, actions: &mut ActionQueue) {
        egui::ScrollArea::vertical().auto_shrink([false, true]).show(ui, |ui| {
            if notes.is_empty() {
                ui.weak("No notes to show");
                return;
            }

            for note in notes {
                let text = if note.important {
                    theme.important(ui.ctx(), &note.content)
                } else {
                    egui::RichText::new(&note.content)
                };

                ui.horizontal(|ui| {
                    ui.label("•");
                    let response = ui.label(text);
                    if let Some(date) = note.date {
                        response.on_hover_text(date.format("%Y-%m-%d %H:%M UTC").to_string());
                    }

                    let label = if note.important { "make not important" } else { "make important" };
                    if ui.small_button(label).clicked() {
                        actions.push(UiAction::ToggleImportance(note.id.clone()));
                    }
                });
            }
        });
    }
}

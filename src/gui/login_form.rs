use eframe::egui;

use crate::{
    controller::FormState,
    gui::actions::{
        ActionQueue,
        UiAction,
    },
};

pub struct LoginForm;

impl LoginForm {
    pub fn show(ui: &mut egui::Ui, form: &mut FormState, actions: &mut ActionQueue) {
        if !form.login_visible {
            if ui.button("log in").clicked() {
                actions.push(UiAction::SetLoginVisible(true));
            }
            return;
        }

        let enter_pressed = egui::Grid::new("login_form")
            .num_columns(2)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                ui.label("username");
                let username = ui.text_edit_singleline(&mut form.username);
                ui.end_row();

                ui.label("password");
                let password = ui.add(egui::TextEdit::singleline(&mut form.password).password(true));
                ui.end_row();

                (username.lost_focus() || password.lost_focus())
                    && ui.input(|i| i.key_pressed(egui::Key::Enter))
            })
            .inner;

        ui.horizontal(|ui| {
            if ui.button("login").clicked() || enter_pressed {
                actions.push(UiAction::SubmitLogin);
            }
            if ui.button("cancel").clicked() {
                actions.push(UiAction::SetLoginVisible(false));
            }
        });
    }
}

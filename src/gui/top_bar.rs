use eframe::egui::{
    self,
    containers,
};

use crate::{
    core::Session,
    gui::{
        actions::{
            ActionQueue,
            UiAction,
        },
        theme::Theme,
    },
};

pub struct TopBar;

impl TopBar {
    pub fn show(
        ctx: &egui::Context,
        session: Option<&Session>,
        in_flight: usize,
        theme: &Theme,
        actions: &mut ActionQueue,
    ) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            containers::menu::Bar::new().ui(ui, |ui| {
                egui::widgets::global_theme_preference_switch(ui);
                ui.menu_button("File", |ui| {
                    if ui.button("Reload Notes").clicked() {
                        actions.push(UiAction::Reload);
                    }
                    if session.is_some() && ui.button("Log Out").clicked() {
                        actions.push(UiAction::Logout);
                    }
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    Self::show_status_indicators(ui, session, in_flight, theme);
                });
            });
        });
    }

    fn show_status_indicators(
        ui: &mut egui::Ui,
        session: Option<&Session>,
        in_flight: usize,
        theme: &Theme,
    ) {
        let (color, tooltip) = match session {
            Some(session) => (theme.green(ui.ctx()), format!("Logged in as {}", session.username)),
            None => (theme.red(ui.ctx()), "Not logged in".to_string()),
        };

        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 2.0;
            ui.small("Session").on_hover_text(&tooltip);
            ui.small(egui::RichText::new("●").color(color)).on_hover_text(&tooltip);
        });

        if in_flight > 0 {
            ui.add_space(6.0);
            ui.add(egui::Spinner::new().size(10.0));
        }
    }
}

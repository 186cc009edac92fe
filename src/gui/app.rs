use std::time::Instant;

use eframe::egui;
use log::debug;

use super::{
    actions::{
        ActionQueue,
        UiAction,
    },
    login_form::LoginForm,
    note_form::NoteForm,
    note_list::NoteList,
    notification_banner::NotificationBanner,
    theme::{
        set_theme,
        Theme,
    },
    top_bar::TopBar,
};
use crate::controller::NoteApp;

pub(crate) const FOOTER: &str = "Note app, Department of Computer Science, University of Helsinki 2019";

pub struct NoteWindow {
    app: NoteApp,
    actions: ActionQueue,
    theme: Theme,
}

impl NoteWindow {
    pub fn new(cc: &eframe::CreationContext<'_>, mut app: NoteApp) -> Self {
        let theme = Theme::default();
        set_theme(&cc.egui_ctx, &theme);
        cc.egui_ctx.set_zoom_factor(cc.egui_ctx.zoom_factor() + 0.2);

        app.tasks_mut().set_repaint_context(cc.egui_ctx.clone());
        app.start();

        Self { app, actions: ActionQueue::new(), theme }
    }

    fn apply_actions(&mut self) {
        for action in self.actions.drain() {
            debug!("UI action: {action:?}");
            match action {
                UiAction::ToggleImportance(id) => {
                    if let Err(e) = self.app.toggle_importance(&id) {
                        debug!("Toggle not sent: {e}");
                    }
                }
                UiAction::SubmitNote => self.app.submit_note_form(),
                UiAction::SetShowAll(show_all) => self.app.set_visibility_filter(show_all),
                UiAction::Reload => self.app.reload_notes(),
                UiAction::SubmitLogin => self.app.submit_login_form(),
                UiAction::Logout => self.app.logout(),
                UiAction::SetLoginVisible(visible) => self.app.form.login_visible = visible,
                UiAction::SetNoteFormVisible(visible) => self.app.form.note_form_visible = visible,
            }
        }
    }

    fn show_session_section(&mut self, ui: &mut egui::Ui) {
        let logged_in_as = self.app.session().map(|session| session.name.clone());

        match logged_in_as {
            None => LoginForm::show(ui, &mut self.app.form, &mut self.actions),
            Some(name) => {
                ui.horizontal(|ui| {
                    ui.label(format!("{name} logged in"));
                    if ui.small_button("logout").clicked() {
                        self.actions.push(UiAction::Logout);
                    }
                });
                ui.add_space(4.0);
                NoteForm::show(ui, &mut self.app.form, &mut self.actions);
            }
        }
    }
}

impl eframe::App for NoteWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.app.poll();

        if let Some(remaining) = self.app.tick_notification(Instant::now()) {
            ctx.request_repaint_after(remaining);
        }

        TopBar::show(ctx, self.app.session(), self.app.in_flight(), &self.theme, &mut self.actions);

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.label(self.theme.footer(ui.ctx(), FOOTER));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(self.theme.heading(ui.ctx(), "Notes"));
            ui.add_space(6.0);

            NotificationBanner::show(ui, self.app.notification(), &self.theme);

            self.show_session_section(ui);
            ui.separator();

            let show_all = self.app.show_all();
            let label = if show_all { "show important" } else { "show all" };
            if ui.button(label).clicked() {
                self.actions.push(UiAction::SetShowAll(!show_all));
            }
            ui.add_space(4.0);

            NoteList::show(ui, &self.app.notes_to_show(), &self.theme, &mut self.actions);
        });

        self.apply_actions();
    }
}

use eframe::egui;

use crate::gui::theme::Theme;

pub struct NotificationBanner;

impl NotificationBanner {
    pub fn show(ui: &mut egui::Ui, message: Option<&str>, theme: &Theme) {
        let Some(message) = message else {
            return;
        };

        let red = theme.red(ui.ctx());
        egui::Frame::new()
            .fill(red.linear_multiply(0.15))
            .stroke(egui::Stroke::new(2.0, red))
            .corner_radius(5.0)
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(egui::RichText::new(message).size(16.0).color(red));
            });
        ui.add_space(8.0);
    }
}

use eframe::egui;

use super::theme::Theme;
use crate::tracker::Toast;

/// Bottom-right notice for validation messages. Expiry is driven by the tracker.
pub fn show_toast(ctx: &egui::Context, toast: Option<&Toast>, theme: &Theme) {
    let Some(toast) = toast else {
        return;
    };

    egui::Area::new(egui::Id::new("toast"))
        .order(egui::Order::Foreground)
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-24.0, -72.0))
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style())
                .stroke(egui::Stroke::new(1.5, theme.danger(ctx)))
                .inner_margin(egui::Margin::symmetric(14, 10))
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new("⚠").color(theme.danger(ctx)));
                        ui.label(toast.message.as_str());
                    });
                });
        });
}

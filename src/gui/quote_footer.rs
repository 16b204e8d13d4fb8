use eframe::egui::{
    self,
    RichText,
};

use super::{
    actions::{
        ActionQueue,
        UiAction,
    },
    theme::Theme,
};
use crate::core::quotes::QuoteRotation;

pub fn show_quote_footer(
    ctx: &egui::Context,
    quotes: &QuoteRotation,
    theme: &Theme,
    actions: &mut ActionQueue,
) {
    egui::TopBottomPanel::bottom("quote_footer").show_separator_line(false).show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(8.0);
            let label = egui::Label::new(
                RichText::new(quotes.current()).size(12.0).color(theme.muted(ctx)),
            )
            .sense(egui::Sense::click());

            let response = ui.add(label).on_hover_cursor(egui::CursorIcon::PointingHand);
            if response.clicked() {
                actions.push(UiAction::NextQuote);
            }
            ui.add_space(8.0);
        });
    });
}

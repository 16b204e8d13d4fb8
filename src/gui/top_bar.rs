use eframe::egui::{
    self,
    RichText,
};

use super::{
    actions::{
        ActionQueue,
        Tab,
        UiAction,
    },
    theme::Theme,
};
use crate::tracker::SaveStatus;

pub struct TopBar;

impl TopBar {
    pub fn show(
        ctx: &egui::Context,
        theme: &Theme,
        active_tab: Tab,
        save_status: SaveStatus,
        display_name: Option<&str>,
        actions: &mut ActionQueue,
    ) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.label(RichText::new("Job").size(18.0));
                ui.label(RichText::new("Tracker").size(18.0).color(theme.accent(ctx)));

                ui.add_space(24.0);

                for tab in [Tab::Applications, Tab::Statistics] {
                    if ui.selectable_label(tab == active_tab, tab.label()).clicked() {
                        actions.push(UiAction::SelectTab(tab));
                    }
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    egui::widgets::global_theme_preference_switch(ui);
                    if let Some(name) = display_name {
                        ui.label(
                            RichText::new(format!("Welcome, {}!", name))
                                .size(12.0)
                                .color(theme.muted(ctx)),
                        );
                    }
                    Self::show_save_status(ui, theme, save_status);
                });
            });
        });
    }

    fn show_save_status(ui: &mut egui::Ui, theme: &Theme, save_status: SaveStatus) {
        let Some(label) = save_status.label() else {
            return;
        };

        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 4.0;
            match save_status {
                SaveStatus::Saving => {
                    ui.small(label);
                    ui.add(egui::Spinner::new().size(10.0));
                }
                _ => {
                    ui.small(RichText::new(label).color(theme.success(ui.ctx())));
                    ui.small(RichText::new("✔").color(theme.success(ui.ctx())));
                }
            }
        });
    }
}

use eframe::egui::{
    self,
    RichText,
};
use tracing::error;

use super::theme::Theme;
use crate::{
    core::columns::CoreColumn,
    tracker::Tracker,
};

enum ColumnAction {
    Add(String),
    Rename { id: String, name: String },
    Delete(String),
    Reorder { dragged: String, target: String },
    Save,
}

/// "Customize Columns" dialog. Edits apply to the registry right away; Save persists them.
pub struct ColumnsModal {
    open: bool,
    new_name: String,
}

impl ColumnsModal {
    pub fn new() -> Self {
        Self { open: false, new_name: String::new() }
    }

    pub fn open_modal(&mut self) {
        self.open = true;
        self.new_name.clear();
    }

    pub fn show(&mut self, ctx: &egui::Context, tracker: &mut Tracker, theme: &Theme) {
        if !self.open {
            return;
        }

        let mut actions = Vec::new();
        let custom = tracker.columns().custom_columns().to_vec();

        let modal = egui::Modal::new(egui::Id::new("columns_modal")).show(ctx, |ui| {
            ui.set_width(460.0);

            ui.label(RichText::new("Customize Columns").size(20.0).strong());
            ui.label(RichText::new("Manage your table layout").size(12.0).color(theme.muted(ctx)));

            ui.add_space(12.0);

            for column in CoreColumn::ALL {
                ui.horizontal(|ui| {
                    ui.label(column.header());
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.small(RichText::new("Required").color(theme.muted(ctx)));
                    });
                });
            }

            ui.separator();

            if custom.is_empty() {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("No custom columns yet").color(theme.muted(ctx)));
                    ui.small(
                        RichText::new("Add one below to get started").color(theme.muted(ctx)),
                    );
                });
            }

            for column in &custom {
                let drag_id = egui::Id::new(("custom_column", column.id.as_str()));
                let row = ui.dnd_drag_source(drag_id, column.id.clone(), |ui| {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new("☰").color(theme.muted(ctx)));
                        let mut name = column.name.clone();
                        let response = ui.add(
                            egui::TextEdit::singleline(&mut name)
                                .hint_text("Column name")
                                .desired_width(300.0),
                        );
                        if response.changed() {
                            actions.push(ColumnAction::Rename { id: column.id.clone(), name });
                        }
                        if ui.button(RichText::new("🗑").color(theme.danger(ctx))).clicked() {
                            actions.push(ColumnAction::Delete(column.id.clone()));
                        }
                    });
                });

                if let Some(dragged) = row.response.dnd_release_payload::<String>() {
                    actions.push(ColumnAction::Reorder {
                        dragged: dragged.as_ref().clone(),
                        target: column.id.clone(),
                    });
                }
            }

            ui.add_space(12.0);

            ui.horizontal(|ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.new_name)
                        .hint_text("New column name")
                        .desired_width(300.0),
                );
                let submitted =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if ui.button("Add").clicked() || submitted {
                    actions.push(ColumnAction::Add(std::mem::take(&mut self.new_name)));
                }
            });

            ui.add_space(15.0);

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Save").clicked() {
                    actions.push(ColumnAction::Save);
                    ui.close();
                }
                if ui.button("Close").clicked() {
                    ui.close();
                }
            });
        });

        for action in actions {
            match action {
                ColumnAction::Add(name) => {
                    tracker.columns_mut().add_column(&name);
                }
                ColumnAction::Rename { id, name } => {
                    tracker.columns_mut().rename_column(&id, &name);
                }
                ColumnAction::Delete(id) => {
                    tracker.columns_mut().delete_column(&id);
                }
                ColumnAction::Reorder { dragged, target } => {
                    tracker.columns_mut().reorder_column(&dragged, &target);
                }
                ColumnAction::Save => {
                    if let Err(e) = tracker.save_columns() {
                        error!("Failed to save columns: {}", e);
                    }
                }
            }
        }

        if modal.should_close() {
            self.open = false;
        }
    }
}

impl Default for ColumnsModal {
    fn default() -> Self {
        Self::new()
    }
}

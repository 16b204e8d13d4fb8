use eframe::egui::{
    self,
    RichText,
};

use super::theme::Theme;
use crate::tracker::Tracker;

enum NotesAction {
    Edit,
    CancelEdit,
    Save,
}

/// Notes for one row. Reads and writes the tracker's notes editor directly.
pub fn show_notes_modal(ctx: &egui::Context, tracker: &mut Tracker, theme: &Theme) {
    let mut action = None;

    let Some(notes) = tracker.notes_mut() else {
        return;
    };

    let modal = egui::Modal::new(egui::Id::new("notes_modal")).show(ctx, |ui| {
        ui.set_width(520.0);

        ui.horizontal(|ui| {
            ui.label(RichText::new("Notes").size(18.0).color(theme.accent(ctx)).strong());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("✖").clicked() {
                    ui.close();
                }
                if !notes.editing && ui.button("✏ Edit").clicked() {
                    action = Some(NotesAction::Edit);
                }
            });
        });
        ui.label(
            RichText::new(format!("{} • {}", notes.company, notes.role))
                .size(11.0)
                .color(theme.muted(ctx)),
        );

        ui.add_space(10.0);

        if notes.editing {
            ui.add(
                egui::TextEdit::multiline(&mut notes.text)
                    .hint_text("Enter your notes...")
                    .desired_width(f32::INFINITY)
                    .desired_rows(10),
            );

            ui.add_space(10.0);

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Save").clicked() {
                    action = Some(NotesAction::Save);
                }
                if ui.button("Cancel").clicked() {
                    action = Some(NotesAction::CancelEdit);
                }
            });
        } else {
            egui::ScrollArea::vertical().max_height(320.0).show(ui, |ui| {
                if notes.text.is_empty() {
                    ui.label(RichText::new("No notes yet").italics().color(theme.muted(ctx)));
                } else {
                    ui.label(notes.text.as_str());
                }
            });
        }
    });

    if modal.should_close() {
        tracker.close_notes();
        return;
    }

    match action {
        Some(NotesAction::Edit) => {
            if let Some(notes) = tracker.notes_mut() {
                notes.editing = true;
            }
        }
        Some(NotesAction::CancelEdit) => {
            // Drop the typed text, back to what the row holds.
            if let Some(id) = tracker.notes().map(|notes| notes.id.clone()) {
                tracker.open_notes(&id);
            }
        }
        Some(NotesAction::Save) => tracker.save_notes(),
        None => {}
    }
}

use std::collections::HashMap;

use eframe::egui::{
    self,
    RichText,
    Ui,
};
use egui_extras::{
    Column,
    TableBuilder,
    TableRow,
};

use super::{
    actions::{
        ActionQueue,
        UiAction,
    },
    theme::Theme,
};
use crate::{
    core::{
        columns::{
            CellKind,
            ColumnDescriptor,
            CoreColumn,
        },
        models::{
            parse_date,
            Application,
            ApplicationStatus,
            FieldEdit,
            RowId,
            DATE_FORMAT,
        },
    },
    tracker::Tracker,
};

const ROW_HEIGHT: f32 = 30.0;
const ACTIONS_WIDTH: f32 = 60.0;
const NOTES_PREVIEW_CHARS: usize = 28;

/// Text typed into date cells that does not parse yet. Keyed by row id.
#[derive(Default)]
pub struct TableState {
    date_inputs: HashMap<RowId, String>,
    draft_date: Option<String>,
}

impl TableState {
    pub fn forget_row(&mut self, id: &str) {
        self.date_inputs.remove(id);
    }

    pub fn reset_draft(&mut self) {
        self.draft_date = None;
    }
}

pub fn ui_toolbar(ui: &mut Ui, tracker: &Tracker, theme: &Theme, actions: &mut ActionQueue) {
    ui.horizontal(|ui| {
        ui.heading(theme.heading(ui.ctx(), "Applications"));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(
                RichText::new(format!("{} applications", tracker.rows().len()))
                    .color(theme.muted(ui.ctx())),
            );
            if ui.button("Insert Entry").clicked() {
                actions.push(UiAction::BeginNewRow);
            }
            if ui.button("Customize").clicked() {
                actions.push(UiAction::OpenColumns);
            }
        });
    });
}

pub fn application_table(
    ui: &mut Ui,
    tracker: &Tracker,
    state: &mut TableState,
    theme: &Theme,
    actions: &mut ActionQueue,
) {
    let columns = tracker.columns().columns();
    let rows = tracker.display_rows();

    if !tracker.is_loaded() {
        ui.vertical_centered(|ui| {
            ui.add_space(60.0);
            ui.add(egui::Spinner::new());
        });
        return;
    }

    egui::ScrollArea::horizontal().id_salt("application_table_scroll").show(ui, |ui| {
        let max_height = (ui.available_height() - 80.0).max(0.0);
        let mut table = TableBuilder::new(ui)
            .striped(true)
            .resizable(false)
            .vscroll(true)
            .max_scroll_height(max_height)
            .cell_layout(egui::Layout::left_to_right(egui::Align::Center));

        for column in &columns {
            table = table.column(Column::exact(column.width()));
        }
        table = table.column(Column::exact(ACTIONS_WIDTH));

        table
            .header(25.0, |mut header| {
                for column in &columns {
                    header.col(|ui| {
                        ui.label(theme.heading(ui.ctx(), column.header()));
                    });
                }
                header.col(|ui| {
                    ui.label(theme.heading(ui.ctx(), "Actions"));
                });
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                    let application = &rows[row.index()];
                    for column in &columns {
                        ui_cell(&mut row, column, application, state, theme, actions);
                    }
                    row.col(|ui| {
                        let delete = egui::Button::new(
                            RichText::new("🗑").color(theme.danger(ui.ctx())),
                        )
                        .frame(false);
                        if ui.add(delete).on_hover_text("Delete").clicked() {
                            actions.push(UiAction::Remove(application.id.clone()));
                        }
                    });
                });
            });
    });

    if rows.is_empty() && tracker.draft().is_none() {
        ui.vertical_centered(|ui| {
            ui.add_space(24.0);
            ui.label(
                RichText::new("No applications yet. Start by adding one above!")
                    .color(theme.muted(ui.ctx())),
            );
        });
    }
}

fn ui_cell(
    row: &mut TableRow,
    column: &ColumnDescriptor,
    application: &Application,
    state: &mut TableState,
    theme: &Theme,
    actions: &mut ActionQueue,
) {
    let id = &application.id;

    row.col(|ui| match column.cell_kind() {
        CellKind::Text => {
            let mut value = column.display_value(application);
            let response = ui.add(
                egui::TextEdit::singleline(&mut value)
                    .id_salt((id, column.id()))
                    .frame(false)
                    .desired_width(f32::INFINITY),
            );
            if response.changed() {
                if let Some(edit) = text_edit_for(column, value) {
                    actions.push(UiAction::Edit { id: id.clone(), edit });
                }
            }
        }
        CellKind::Enum => {
            if let Some(status) = status_combo(ui, ("status", id), application.status, theme) {
                actions.push(UiAction::Edit { id: id.clone(), edit: FieldEdit::Status(status) });
            }
        }
        CellKind::Date => {
            let mut text = state
                .date_inputs
                .get(id)
                .cloned()
                .unwrap_or_else(|| application.applied_at_text());
            let response = ui.add(
                egui::TextEdit::singleline(&mut text)
                    .id_salt(("applied_at", id))
                    .hint_text(DATE_FORMAT_HINT)
                    .frame(false)
                    .desired_width(f32::INFINITY),
            );
            if response.changed() {
                if let Some(edit) = date_edit_for(&text) {
                    actions.push(UiAction::Edit { id: id.clone(), edit });
                }
                state.date_inputs.insert(id.clone(), text);
            }
            if response.lost_focus() {
                state.date_inputs.remove(id);
            }
        }
        CellKind::LongText => {
            let preview = notes_preview(&application.notes);
            let label = if preview.is_empty() {
                RichText::new("Add notes").italics().color(theme.muted(ui.ctx()))
            } else {
                RichText::new(preview)
            };
            let response = ui
                .add(egui::Label::new(label).sense(egui::Sense::click()).truncate())
                .on_hover_cursor(egui::CursorIcon::PointingHand);
            if response.clicked() {
                actions.push(UiAction::OpenNotes(id.clone()));
            }
        }
    });
}

const DATE_FORMAT_HINT: &str = "YYYY-MM-DD";

fn text_edit_for(column: &ColumnDescriptor, value: String) -> Option<FieldEdit> {
    match column {
        ColumnDescriptor::Fixed(CoreColumn::Company) => Some(FieldEdit::Company(value)),
        ColumnDescriptor::Fixed(CoreColumn::Role) => Some(FieldEdit::Role(value)),
        ColumnDescriptor::Fixed(CoreColumn::Notes) => Some(FieldEdit::Notes(value)),
        ColumnDescriptor::Custom(definition) => {
            Some(FieldEdit::Custom { column_id: definition.id.clone(), value })
        }
        ColumnDescriptor::Fixed(_) => None,
    }
}

/// Only complete dates (or a cleared field) become edits.
fn date_edit_for(text: &str) -> Option<FieldEdit> {
    if text.trim().is_empty() {
        return Some(FieldEdit::AppliedAt(None));
    }
    parse_date(text).map(|date| FieldEdit::AppliedAt(Some(date)))
}

fn notes_preview(notes: &str) -> String {
    let first_line = notes.lines().next().unwrap_or_default();
    if first_line.chars().count() > NOTES_PREVIEW_CHARS || notes.lines().nth(1).is_some() {
        let short: String = first_line.chars().take(NOTES_PREVIEW_CHARS).collect();
        format!("{}…", short.trim_end())
    } else {
        first_line.to_string()
    }
}

fn status_combo(
    ui: &mut Ui,
    id_salt: impl std::hash::Hash,
    current: ApplicationStatus,
    theme: &Theme,
) -> Option<ApplicationStatus> {
    let mut selected = current;
    egui::ComboBox::from_id_salt(id_salt)
        .selected_text(RichText::new(current.as_str()).color(theme.status_color(current)))
        .show_ui(ui, |ui| {
            for status in ApplicationStatus::ALL {
                ui.selectable_value(
                    &mut selected,
                    status,
                    RichText::new(status.as_str()).color(theme.status_color(status)),
                );
            }
        });

    (selected != current).then_some(selected)
}

/// The "new row" strip shown under the table while a draft exists.
pub fn ui_new_row(
    ui: &mut Ui,
    tracker: &mut Tracker,
    state: &mut TableState,
    theme: &Theme,
    actions: &mut ActionQueue,
) {
    let custom_columns = tracker.columns().custom_columns().to_vec();
    let Some(draft) = tracker.draft_mut() else {
        return;
    };

    egui::Frame::group(ui.style())
        .stroke(egui::Stroke::new(1.0, theme.accent(ui.ctx())))
        .show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut draft.company)
                        .hint_text("Company name")
                        .desired_width(CoreColumn::Company.width()),
                );
                ui.add(
                    egui::TextEdit::singleline(&mut draft.role)
                        .hint_text("Position")
                        .desired_width(CoreColumn::Role.width()),
                );

                if let Some(status) = status_combo(ui, "new_row_status", draft.status, theme) {
                    draft.status = status;
                }

                let date_text = state.draft_date.get_or_insert_with(|| {
                    draft.applied_at.map(|d| d.format(DATE_FORMAT).to_string()).unwrap_or_default()
                });
                let response = ui.add(
                    egui::TextEdit::singleline(date_text)
                        .hint_text(DATE_FORMAT_HINT)
                        .desired_width(CoreColumn::AppliedAt.width()),
                );
                if response.changed() {
                    if let Some(FieldEdit::AppliedAt(date)) = date_edit_for(date_text) {
                        draft.applied_at = date;
                    }
                }

                ui.add(
                    egui::TextEdit::singleline(&mut draft.notes)
                        .hint_text("Notes")
                        .desired_width(CoreColumn::Notes.width()),
                );

                for column in &custom_columns {
                    let mut value = draft.custom_value(&column.id).to_string();
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut value)
                            .hint_text(column.name.as_str())
                            .desired_width(160.0),
                    );
                    if response.changed() {
                        draft.set_custom_value(&column.id, value);
                    }
                }

                if ui.button("Save").clicked() {
                    actions.push(UiAction::InsertNewRow);
                }
                if ui.button("✖").on_hover_text("Discard draft entry").clicked() {
                    actions.push(UiAction::CancelNewRow);
                }
            });
        });
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::core::columns::ColumnDefinition;

    #[test]
    fn test_date_edit_needs_a_full_date() {
        assert_eq!(date_edit_for("2024-03"), None);
        assert_eq!(date_edit_for("  "), Some(FieldEdit::AppliedAt(None)));
        assert_eq!(
            date_edit_for("2024-03-09"),
            Some(FieldEdit::AppliedAt(NaiveDate::from_ymd_opt(2024, 3, 9)))
        );
    }

    #[test]
    fn test_text_edit_targets_column() {
        let custom = ColumnDescriptor::Custom(ColumnDefinition {
            id: "c1".to_string(),
            name: "Salary".to_string(),
        });
        assert_eq!(
            text_edit_for(&custom, "90k".to_string()),
            Some(FieldEdit::Custom { column_id: "c1".to_string(), value: "90k".to_string() })
        );
        assert_eq!(
            text_edit_for(&ColumnDescriptor::Fixed(CoreColumn::Role), "SRE".to_string()),
            Some(FieldEdit::Role("SRE".to_string()))
        );
        assert_eq!(
            text_edit_for(&ColumnDescriptor::Fixed(CoreColumn::Status), "x".to_string()),
            None
        );
    }

    #[test]
    fn test_notes_preview_truncates() {
        assert_eq!(notes_preview(""), "");
        assert_eq!(notes_preview("short"), "short");
        assert_eq!(notes_preview("line one\nline two"), "line one…");
        let long = "a".repeat(40);
        assert_eq!(notes_preview(&long).chars().count(), NOTES_PREVIEW_CHARS + 1);
    }
}

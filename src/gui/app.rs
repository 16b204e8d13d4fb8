use std::time::Duration;

use eframe::egui;
use tracing::debug;

use super::{
    actions::{
        ActionQueue,
        Tab,
        UiAction,
    },
    columns_modal::ColumnsModal,
    notes_modal::show_notes_modal,
    quote_footer::show_quote_footer,
    stats_panel::ui_statistics,
    table::{
        application_table,
        ui_new_row,
        ui_toolbar,
        TableState,
    },
    theme::{
        set_theme,
        Theme,
    },
    toast::show_toast,
    top_bar::TopBar,
};
use crate::{
    core::quotes::QuoteRotation,
    tracker::Tracker,
};

// Keeps timers and in-flight calls moving when nothing else asks for a frame.
const BUSY_REPAINT: Duration = Duration::from_millis(100);

pub struct JobTrackApp {
    pub tracker: Tracker,

    // UI State
    pub theme: Theme,
    pub tab: Tab,
    pub table_state: TableState,
    pub quotes: QuoteRotation,
    pub display_name: Option<String>,

    // Modals
    pub columns_modal: ColumnsModal,
}

impl JobTrackApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        tracker: Tracker,
        display_name: Option<String>,
    ) -> Self {
        let theme = Theme::midnight();
        set_theme(&cc.egui_ctx, &theme);
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        Self {
            tracker,
            theme,
            tab: Tab::default(),
            table_state: TableState::default(),
            quotes: QuoteRotation::today(),
            display_name,
            columns_modal: ColumnsModal::new(),
        }
    }

    fn execute_actions(&mut self, actions: &mut ActionQueue) {
        for action in actions.drain() {
            match action {
                UiAction::Edit { id, edit } => {
                    self.tracker.record_edit(&id, edit);
                }
                UiAction::Remove(id) => {
                    self.table_state.forget_row(&id);
                    self.tracker.remove(&id);
                }
                UiAction::BeginNewRow => {
                    self.tab = Tab::Applications;
                    self.tracker.begin_new_row();
                }
                UiAction::InsertNewRow => {
                    if let Err(e) = self.tracker.insert() {
                        debug!("Insert rejected: {}", e);
                    }
                }
                UiAction::CancelNewRow => {
                    self.tracker.cancel_new_row();
                }
                UiAction::OpenNotes(id) => {
                    self.tracker.open_notes(&id);
                }
                UiAction::OpenColumns => self.columns_modal.open_modal(),
                UiAction::SelectTab(tab) => self.tab = tab,
                UiAction::NextQuote => self.quotes.advance(),
            }
        }
    }
}

impl eframe::App for JobTrackApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.tracker.poll() > 0 {
            ctx.request_repaint();
        }

        let mut actions = ActionQueue::new();

        TopBar::show(
            ctx,
            &self.theme,
            self.tab,
            self.tracker.save_status(),
            self.display_name.as_deref(),
            &mut actions,
        );
        show_quote_footer(ctx, &self.quotes, &self.theme, &mut actions);

        egui::CentralPanel::default().show(ctx, |ui| match self.tab {
            Tab::Applications => {
                ui_toolbar(ui, &self.tracker, &self.theme, &mut actions);
                ui.add_space(10.0);
                application_table(
                    ui,
                    &self.tracker,
                    &mut self.table_state,
                    &self.theme,
                    &mut actions,
                );
                ui.add_space(10.0);
                ui_new_row(
                    ui,
                    &mut self.tracker,
                    &mut self.table_state,
                    &self.theme,
                    &mut actions,
                );
            }
            Tab::Statistics => ui_statistics(ui, &self.tracker.stats(), &self.theme),
        });

        show_notes_modal(ctx, &mut self.tracker, &self.theme);
        self.columns_modal.show(ctx, &mut self.tracker, &self.theme);
        show_toast(ctx, self.tracker.toast(), &self.theme);

        let had_actions = !actions.is_empty();
        self.execute_actions(&mut actions);

        if self.tracker.draft().is_none() {
            self.table_state.reset_draft();
        }

        if had_actions {
            ctx.request_repaint();
        } else if self.tracker.is_busy() {
            ctx.request_repaint_after(BUSY_REPAINT);
        }
    }
}

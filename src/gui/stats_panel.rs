use std::f32::consts::{
    FRAC_PI_2,
    TAU,
};

use eframe::egui::{
    self,
    Pos2,
    RichText,
    Shape,
    Stroke,
    Ui,
};

use super::theme::Theme;
use crate::core::{
    models::ApplicationStatus,
    stats::{
        ArcSegment,
        StatusStats,
        RING_RADIUS,
    },
};

const RING_WIDTH: f32 = 40.0;
const CHART_SIZE: f32 = 320.0;
// Chart coordinates are a 200x200 box scaled to CHART_SIZE.
const CHART_UNITS: f32 = 200.0;
const DIMMED: f32 = 0.3;

pub fn ui_statistics(ui: &mut Ui, stats: &StatusStats, theme: &Theme) {
    ui.heading(RichText::new("Application Statistics").size(22.0).strong());
    ui.add_space(16.0);

    if stats.total() == 0 {
        ui.vertical_centered(|ui| {
            ui.add_space(60.0);
            ui.label(RichText::new("No applications yet").color(theme.muted(ui.ctx())));
        });
        return;
    }

    let arcs = stats.arcs();
    let mut legend_hover = None;

    ui.horizontal(|ui| {
        let (rect, response) =
            ui.allocate_exact_size(egui::vec2(CHART_SIZE, CHART_SIZE), egui::Sense::hover());
        let scale = CHART_SIZE / CHART_UNITS;
        let center = rect.center();

        let ring_hover = response
            .hover_pos()
            .and_then(|pos| status_at(&arcs, center, pos, RING_RADIUS as f32 * scale, scale));

        ui.add_space(32.0);

        ui.vertical(|ui| {
            ui.add_space(CHART_SIZE / 2.0 - 60.0);
            for status in ApplicationStatus::ALL {
                let row = ui.horizontal(|ui| {
                    ui.label(RichText::new("●").color(theme.status_color(status)).size(16.0));
                    ui.label(status.as_str());
                    ui.label(
                        RichText::new(stats.count(status).to_string())
                            .strong()
                            .color(theme.muted(ui.ctx())),
                    );
                });
                if row.response.hovered() {
                    legend_hover = Some(status);
                }
            }
        });

        let hovered = ring_hover.or(legend_hover);
        paint_ring(ui, &arcs, center, scale, hovered, theme);

        let painter = ui.painter();
        painter.text(
            center - egui::vec2(0.0, 10.0),
            egui::Align2::CENTER_CENTER,
            stats.total().to_string(),
            egui::FontId::proportional(36.0),
            ui.visuals().strong_text_color(),
        );
        painter.text(
            center + egui::vec2(0.0, 22.0),
            egui::Align2::CENTER_CENTER,
            "Total",
            egui::FontId::proportional(13.0),
            theme.muted(ui.ctx()),
        );

        if let Some(status) = ring_hover {
            response.on_hover_text(format!(
                "{}: {} ({:.0}%)",
                status,
                stats.count(status),
                stats.fraction(status) * 100.0
            ));
        }
    });
}

fn paint_ring(
    ui: &Ui,
    arcs: &[ArcSegment],
    center: Pos2,
    scale: f32,
    hovered: Option<ApplicationStatus>,
    theme: &Theme,
) {
    let radius = RING_RADIUS as f32 * scale;
    for arc in arcs {
        let (start, sweep) = arc.turns();
        let mut color = theme.status_color(arc.status);
        if hovered.is_some_and(|status| status != arc.status) {
            color = color.gamma_multiply(DIMMED);
        }

        let points = arc_points(center, radius, start as f32, sweep as f32);
        ui.painter().add(Shape::line(points, Stroke::new(RING_WIDTH * scale, color)));
    }
}

/// Points along an arc that starts at twelve o'clock and runs clockwise.
fn arc_points(center: Pos2, radius: f32, start_turns: f32, sweep_turns: f32) -> Vec<Pos2> {
    let steps = ((sweep_turns * 128.0).ceil() as usize).max(2);
    (0..=steps)
        .map(|i| {
            let turns = start_turns + sweep_turns * i as f32 / steps as f32;
            let angle = turns * TAU - FRAC_PI_2;
            center + radius * egui::vec2(angle.cos(), angle.sin())
        })
        .collect()
}

/// The status whose slice lies under `pos`, if `pos` is on the ring.
fn status_at(
    arcs: &[ArcSegment],
    center: Pos2,
    pos: Pos2,
    radius: f32,
    scale: f32,
) -> Option<ApplicationStatus> {
    let delta = pos - center;
    let half_width = RING_WIDTH * scale / 2.0;
    if (delta.length() - radius).abs() > half_width {
        return None;
    }

    let turns = ((delta.y.atan2(delta.x) + FRAC_PI_2) / TAU).rem_euclid(1.0) as f64;
    arcs.iter()
        .find(|arc| {
            let (start, sweep) = arc.turns();
            turns >= start && turns < start + sweep
        })
        .map(|arc| arc.status)
}

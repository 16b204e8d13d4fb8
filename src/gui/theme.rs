use eframe::egui::{
    self,
    Color32,
    RichText,
    Stroke,
    Visuals,
};

use crate::core::models::ApplicationStatus;

#[derive(Clone)]
pub struct Theme {
    dark: Palette,
    light: Palette,
}

impl Default for Theme {
    fn default() -> Self {
        Self::midnight()
    }
}

impl Theme {
    pub fn midnight() -> Self {
        Theme { dark: Palette::midnight(), light: Palette::daylight() }
    }

    fn palette(&self, ctx: &egui::Context) -> &Palette {
        if ctx.style().visuals.dark_mode {
            &self.dark
        } else {
            &self.light
        }
    }

    pub fn accent(&self, ctx: &egui::Context) -> Color32 {
        self.palette(ctx).accent
    }

    pub fn muted(&self, ctx: &egui::Context) -> Color32 {
        self.palette(ctx).muted
    }

    pub fn success(&self, ctx: &egui::Context) -> Color32 {
        self.palette(ctx).success
    }

    pub fn danger(&self, ctx: &egui::Context) -> Color32 {
        self.palette(ctx).danger
    }

    pub fn heading(&self, ctx: &egui::Context, content: &str) -> RichText {
        RichText::new(content).color(self.accent(ctx)).strong()
    }

    /// Ring and legend colour for a status. Same in both variants.
    pub fn status_color(&self, status: ApplicationStatus) -> Color32 {
        match status {
            ApplicationStatus::Applied => Color32::from_rgb(107, 114, 128),
            ApplicationStatus::Interview => Color32::from_rgb(168, 85, 247),
            ApplicationStatus::Offer => Color32::from_rgb(34, 197, 94),
            ApplicationStatus::Rejected => Color32::from_rgb(244, 114, 182),
        }
    }
}

#[derive(Clone)]
struct Palette {
    background: Color32,
    panel: Color32,
    raised: Color32,
    foreground: Color32,
    muted: Color32,
    accent: Color32,
    success: Color32,
    danger: Color32,
}

impl Palette {
    fn midnight() -> Self {
        Self {
            background: Color32::from_rgb(10, 10, 12),
            panel: Color32::from_rgb(18, 18, 22),
            raised: Color32::from_rgb(34, 32, 44),
            foreground: Color32::from_rgb(229, 231, 235),
            muted: Color32::from_rgb(107, 114, 128),
            accent: Color32::from_rgb(168, 85, 247),
            success: Color32::from_rgb(74, 222, 128),
            danger: Color32::from_rgb(248, 113, 113),
        }
    }

    fn daylight() -> Self {
        Self {
            background: Color32::from_rgb(250, 250, 252),
            panel: Color32::from_rgb(243, 242, 248),
            raised: Color32::from_rgb(228, 224, 240),
            foreground: Color32::from_rgb(31, 41, 55),
            muted: Color32::from_rgb(120, 126, 140),
            accent: Color32::from_rgb(126, 34, 206),
            success: Color32::from_rgb(22, 163, 74),
            danger: Color32::from_rgb(220, 38, 38),
        }
    }
}

pub fn set_theme(ctx: &egui::Context, theme: &Theme) {
    set_theme_variant(ctx, &theme.dark, true);
    set_theme_variant(ctx, &theme.light, false);
}

fn set_theme_variant(ctx: &egui::Context, palette: &Palette, is_dark: bool) {
    let (mut visuals, variant) = match is_dark {
        true => (Visuals::dark(), egui::Theme::Dark),
        false => (Visuals::light(), egui::Theme::Light),
    };

    visuals.panel_fill = palette.panel;
    visuals.window_fill = palette.background;
    visuals.extreme_bg_color = palette.background;
    visuals.faint_bg_color = palette.raised.linear_multiply(0.35);
    visuals.selection.bg_fill = palette.accent.linear_multiply(0.45);
    visuals.hyperlink_color = palette.accent;
    visuals.error_fg_color = palette.danger;
    visuals.window_stroke = Stroke { color: palette.accent.linear_multiply(0.3), ..visuals.window_stroke };
    visuals.widgets.noninteractive.fg_stroke.color = palette.foreground;
    visuals.widgets.inactive.bg_fill = palette.raised;
    visuals.widgets.hovered.bg_stroke.color = palette.accent;
    visuals.widgets.active.bg_stroke.color = palette.accent;

    ctx.set_visuals_of(variant, visuals);

    ctx.all_styles_mut(|style| {
        style.interaction.tooltip_delay = 0.0;
        style.interaction.show_tooltips_only_when_still = false;
    });
}

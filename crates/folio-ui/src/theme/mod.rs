use egui::{Context, Visuals, Style, Color32, Rounding, Stroke, FontId, FontFamily, TextStyle, Ui};
use folio_core::{ThemeMode, ThemeState};
use std::collections::BTreeMap;

/// Palette for one theme mode
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub background: Color32,
    pub panel: Color32,
    pub widget: Color32,
    pub hover: Color32,
    pub active: Color32,
    pub text: Color32,
    pub text_secondary: Color32,
    pub border: Color32,
}

impl Palette {
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self {
                background: Color32::from_rgb(23, 23, 23),
                panel: Color32::from_rgb(31, 31, 31),
                widget: Color32::from_rgb(40, 40, 40),
                hover: Color32::from_rgb(50, 50, 50),
                active: Color32::from_rgb(60, 60, 60),
                text: Color32::from_rgb(220, 220, 220),
                text_secondary: Color32::from_rgb(160, 160, 160),
                border: Color32::from_rgb(70, 70, 70),
            },
            ThemeMode::Light => Self {
                background: Color32::from_rgb(250, 250, 250),
                panel: Color32::from_rgb(255, 255, 255),
                widget: Color32::from_rgb(238, 238, 238),
                hover: Color32::from_rgb(225, 225, 225),
                active: Color32::from_rgb(210, 210, 210),
                text: Color32::from_rgb(34, 34, 34),
                text_secondary: Color32::from_rgb(110, 110, 110),
                border: Color32::from_rgb(200, 200, 200),
            },
        }
    }
}

/// Apply global visuals and text styles for `mode`
pub fn apply_theme(ctx: &Context, mode: ThemeMode) {
    let palette = Palette::for_mode(mode);
    let mut style = Style::default();
    let mut visuals = if mode.is_dark() { Visuals::dark() } else { Visuals::light() };

    visuals.window_fill = palette.panel;
    visuals.panel_fill = palette.panel;
    visuals.extreme_bg_color = palette.background;
    visuals.faint_bg_color = palette.widget;

    let widgets = [
        (&mut visuals.widgets.noninteractive, palette.widget),
        (&mut visuals.widgets.inactive, palette.widget),
        (&mut visuals.widgets.hovered, palette.hover),
        (&mut visuals.widgets.active, palette.active),
    ];
    for (widget, fill) in widgets {
        widget.bg_fill = fill;
        widget.bg_stroke = Stroke::new(1.0, palette.border);
        widget.fg_stroke = Stroke::new(1.0, palette.text);
        widget.rounding = Rounding::same(4.0);
    }
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, accent_color());

    visuals.selection.bg_fill = accent_color().linear_multiply(0.3);
    visuals.selection.stroke = Stroke::new(1.0, accent_color());
    visuals.hyperlink_color = accent_color();

    style.spacing.item_spacing = egui::vec2(8.0, 4.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);

    let mut font_sizes = BTreeMap::new();
    font_sizes.insert(TextStyle::Small, FontId::new(11.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Body, FontId::new(14.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Button, FontId::new(14.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Heading, FontId::new(22.0, FontFamily::Proportional));
    font_sizes.insert(TextStyle::Monospace, FontId::new(12.0, FontFamily::Monospace));
    style.text_styles = font_sizes;

    ctx.set_style(style);
    ctx.set_visuals(visuals);
}

/// Label shown on the toggle: offers the mode you would switch to
pub fn toggle_label(mode: ThemeMode) -> &'static str {
    match mode {
        ThemeMode::Light => "🌙 Dark mode",
        ThemeMode::Dark => "☀ Light mode",
    }
}

/// Theme toggle button. Re-applies the theme when clicked.
pub fn theme_toggle(ui: &mut Ui, theme: &mut ThemeState) -> bool {
    let clicked = ui.button(toggle_label(theme.mode())).clicked();
    if clicked {
        let mode = theme.toggle();
        apply_theme(ui.ctx(), mode);
    }
    clicked
}

/// Get the accent color for the theme
pub fn accent_color() -> Color32 {
    Color32::from_rgb(0x00, 0x7b, 0xff)
}

//! Page sections
//!
//! Each section is a direct mapping from fixed content to widgets. The hero
//! section hosts the carousel; state beyond that is limited to fade-in timing.

use egui::{Color32, RichText, Rounding, Stroke, Ui};
use folio_core::{ContactConfig, ContactEntry};

use crate::carousel::Carousel;

/// Projects panel colour
pub const PROJECTS_BACKGROUND: Color32 = Color32::from_rgb(0x5a, 0xd7, 0x96);

/// Opacity that ramps from 0 to 1 over a duration after being started
#[derive(Debug, Clone)]
pub struct FadeIn {
    duration: f64,
    started_at: Option<f64>,
}

impl FadeIn {
    pub fn new(duration_secs: f64) -> Self {
        Self {
            duration: duration_secs,
            started_at: None,
        }
    }

    /// Opacity at `now` (seconds, as reported by egui input)
    pub fn opacity(&mut self, now: f64) -> f32 {
        let start = *self.started_at.get_or_insert(now);
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - start) / self.duration).clamp(0.0, 1.0) as f32
    }

    pub fn reset(&mut self) {
        self.started_at = None;
    }
}

/// Hero section: the carousel filling the page
pub fn hero(ui: &mut Ui, carousel: &mut Carousel<String>) {
    carousel.ui(ui);
}

/// Projects section: a plain panel fading in
pub fn projects(ui: &mut Ui, fade: &mut FadeIn) {
    let now = ui.input(|i| i.time);
    let opacity = fade.opacity(now);
    let rect = ui.available_rect_before_wrap();
    ui.painter().rect_filled(rect, Rounding::ZERO, PROJECTS_BACKGROUND.linear_multiply(opacity));
    ui.allocate_rect(rect, egui::Sense::hover());

    if opacity < 1.0 {
        ui.ctx().request_repaint();
    }
}

/// Contact section: section tag, contact rows and a notice banner
pub fn contact(ui: &mut Ui, config: &ContactConfig) {
    ui.add_space(24.0);
    section_tag(ui, "CONTACT");
    ui.add_space(16.0);

    ui.columns(2, |columns| {
        columns[0].vertical_centered(|ui| {
            for entry in &config.entries {
                contact_row(ui, entry);
                ui.add_space(12.0);
            }
        });
        columns[1].vertical_centered(|ui| {
            notice_banner(ui, &config.notice);
        });
    });
}

fn section_tag(ui: &mut Ui, label: &str) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(label).strong());
        let width = ui.available_width().min(120.0);
        let (rect, _) = ui.allocate_exact_size(egui::vec2(width, 1.0), egui::Sense::hover());
        ui.painter().hline(rect.x_range(), rect.center().y, Stroke::new(1.0, ui.visuals().text_color()));
    });
}

fn contact_row(ui: &mut Ui, entry: &ContactEntry) {
    ui.label(RichText::new(&entry.title).small().weak());
    ui.hyperlink_to(&entry.content, &entry.link);
}

/// Highlighted banner with a single message
pub fn notice_banner(ui: &mut Ui, title: &str) {
    egui::Frame::group(ui.style())
        .fill(crate::theme::accent_color().linear_multiply(0.15))
        .stroke(Stroke::new(1.0, crate::theme::accent_color()))
        .show(ui, |ui| {
            ui.label(RichText::new(title).strong());
        });
}

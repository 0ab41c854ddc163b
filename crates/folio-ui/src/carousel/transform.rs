//! Visual transform derived from an item's offset

use egui::{pos2, vec2, Rect};
use folio_core::CarouselConfig;

/// How one carousel item is drawn
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemTransform {
    pub scale: f32,
    pub translate_y: f32,
    pub rotate_deg: f32,
    pub opacity: f32,
    pub z_order: i32,
}

impl ItemTransform {
    /// Transform for an item `offset` steps from the active one.
    /// `offset` may be fractional while a transition is running.
    pub fn for_offset(offset: f32, config: &CarouselConfig) -> Self {
        let distance = offset.abs();

        let opacity = if distance < config.visibility_radius as f32 {
            (1.0 - distance * config.opacity_step).clamp(0.0, 1.0)
        } else {
            0.0
        };

        Self {
            scale: (1.0 - distance * config.scale_step).max(0.0),
            translate_y: offset * config.translate_step,
            rotate_deg: -offset * config.rotate_step_deg,
            opacity,
            z_order: config.z_base - distance.round() as i32,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0 && self.scale > 0.0
    }

    /// Screen rect of the item inside `container`.
    /// Rotation about the x axis is drawn as vertical foreshortening.
    pub fn item_rect(&self, container: Rect, item_height: f32) -> Rect {
        let width = container.width() * self.scale;
        let height = item_height * self.scale * self.rotate_deg.to_radians().cos().abs();
        let center = container.center() + vec2(0.0, self.translate_y);
        Rect::from_center_size(pos2(center.x, center.y), vec2(width, height))
    }
}

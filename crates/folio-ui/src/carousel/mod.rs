//! Carousel widget
//! Paints a navigator's items stacked around the active one and feeds
//! wheel and button input back into it.

use std::fmt::Display;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};
use egui::{Align2, Color32, FontId, Id, Rect, Response, Rounding, Sense, Ui, Vec2, pos2, vec2};
use folio_core::{CarouselConfig, CarouselNavigator, EventBus, Transition, WheelAdapter};
use tracing::debug;

mod transform;

pub use transform::ItemTransform;

const NAV_BUTTON_SIZE: f32 = 20.0;
const NAV_BUTTON_GAP: f32 = 10.0;
const NAV_BOTTOM_MARGIN: f32 = 100.0;

/// Colours used by the carousel
#[derive(Debug, Clone)]
struct CarouselStyle {
    background: Color32,
    item_fill: Color32,
    item_text: Color32,
    nav_active: Color32,
    nav_inactive: Color32,
}

impl Default for CarouselStyle {
    fn default() -> Self {
        Self {
            background: Color32::from_rgb(0xff, 0xb1, 0xb1),
            item_fill: Color32::from_rgb(68, 68, 68),
            item_text: Color32::WHITE,
            nav_active: Color32::from_rgb(0x00, 0x7b, 0xff),
            nav_inactive: Color32::from_rgb(0xdd, 0xdd, 0xdd),
        }
    }
}

/// Carousel widget state. Lives while the carousel is on screen.
pub struct Carousel<T> {
    id: Id,
    navigator: CarouselNavigator<T>,
    wheel: WheelAdapter,
    config: CarouselConfig,
    style: CarouselStyle,
}

impl<T: Display> Carousel<T> {
    /// Mount a carousel over `items`; boundary events go to `bus`
    pub fn new(id_source: impl Hash, items: Vec<T>, config: CarouselConfig, bus: Arc<EventBus>) -> Self {
        let navigator = CarouselNavigator::with_initial_index(items, config.initial_index)
            .with_event_bus(bus);
        let wheel = WheelAdapter::new(Duration::from_millis(config.wheel_cooldown_ms));

        Self {
            id: Id::new(id_source),
            navigator,
            wheel,
            config,
            style: CarouselStyle::default(),
        }
    }

    /// Ignore wheel input for one cooldown from `now`
    pub fn hold_input(&mut self, now: Instant) {
        self.wheel.hold(now);
    }

    pub fn navigator(&self) -> &CarouselNavigator<T> {
        &self.navigator
    }

    /// Show the carousel filling the available space
    pub fn ui(&mut self, ui: &mut Ui) -> Response {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::hover());

        self.handle_wheel(ui, rect);

        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, Rounding::ZERO, self.style.background);

        let animating = self.paint_items(ui, rect);
        self.show_navigation(ui, rect);

        if animating {
            ui.ctx().request_repaint();
        }

        response
    }

    /// Wheel input is only taken while the pointer is over the carousel, and
    /// is swallowed so enclosing scroll areas do not also react.
    fn handle_wheel(&mut self, ui: &mut Ui, rect: Rect) {
        if !ui.rect_contains_pointer(rect) {
            return;
        }

        let delta = ui.input(|i| i.scroll_delta.y);
        if delta == 0.0 {
            return;
        }
        ui.input_mut(|i| i.scroll_delta = Vec2::ZERO);

        // egui reports wheel-down as a negative delta
        if let Some(transition) = self.wheel.on_wheel(-delta, Instant::now(), &mut self.navigator) {
            debug!(?transition, "Carousel wheel step");
        }
    }

    fn paint_items(&self, ui: &Ui, rect: Rect) -> bool {
        let ctx = ui.ctx();
        let painter = ui.painter_at(rect);

        let mut animating = false;
        let mut layers: Vec<(ItemTransform, String)> = self
            .navigator
            .offsets_snapshot()
            .into_iter()
            .map(|entry| {
                let target = entry.offset as f32;
                let animated = ctx.animate_value_with_time(
                    self.id.with(entry.index),
                    target,
                    self.config.transition_secs,
                );
                animating |= (animated - target).abs() > f32::EPSILON;
                (ItemTransform::for_offset(animated, &self.config), entry.item.to_string())
            })
            .collect();

        // Lowest stacking order first so the active item ends up on top
        layers.sort_by_key(|(t, _)| t.z_order);

        for (transform, label) in layers.iter().filter(|(t, _)| t.is_visible()) {
            let item_rect = transform.item_rect(rect, self.config.item_height);
            painter.rect_filled(
                item_rect,
                Rounding::same(10.0),
                self.style.item_fill.linear_multiply(transform.opacity),
            );
            painter.text(
                item_rect.center(),
                Align2::CENTER_CENTER,
                label,
                FontId::proportional(18.0 * transform.scale.max(0.1)),
                self.style.item_text.linear_multiply(transform.opacity),
            );
        }

        animating
    }

    fn show_navigation(&mut self, ui: &mut Ui, rect: Rect) {
        let count = self.navigator.len();
        if count == 0 {
            return;
        }

        let width = count as f32 * NAV_BUTTON_SIZE + (count - 1) as f32 * NAV_BUTTON_GAP;
        let nav_rect = Rect::from_center_size(
            pos2(rect.center().x, rect.bottom() - NAV_BOTTOM_MARGIN),
            vec2(width, NAV_BUTTON_SIZE),
        );

        let mut clicked = None;
        ui.allocate_ui_at_rect(nav_rect, |ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = NAV_BUTTON_GAP;
                for index in 0..count {
                    let fill = if self.navigator.is_active(index) {
                        self.style.nav_active
                    } else {
                        self.style.nav_inactive
                    };
                    let button = egui::Button::new(format!("{}", index + 1))
                        .fill(fill)
                        .rounding(Rounding::same(NAV_BUTTON_SIZE / 2.0));
                    if ui.add_sized([NAV_BUTTON_SIZE, NAV_BUTTON_SIZE], button).clicked() {
                        clicked = Some(index);
                    }
                }
            });
        });

        if let Some(index) = clicked {
            if let Transition::Moved { from, to } = self.navigator.jump_to(index) {
                debug!(from, to, "Carousel navigation button");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{CentralPanel, Context, Event, Modifiers, PointerButton, Pos2, RawInput};
    use folio_core::events::events::ScrollEnd;
    use folio_core::Direction;
    use parking_lot::Mutex;

    const SCREEN: Vec2 = vec2(800.0, 600.0);
    // CentralPanel inner margin
    const PANEL_MARGIN: f32 = 8.0;

    fn carousel(bus: Arc<EventBus>) -> Carousel<String> {
        let config = CarouselConfig {
            wheel_cooldown_ms: 0,
            ..CarouselConfig::default()
        };
        let items = (1..=5).map(|i| format!("Item {}", i)).collect();
        Carousel::new("test_carousel", items, config, bus)
    }

    /// Run one frame with the carousel filling the central panel.
    /// Returns the scroll delta left over for the rest of the frame.
    fn run_frame(ctx: &Context, carousel: &mut Carousel<String>, events: Vec<Event>) -> Vec2 {
        let input = RawInput {
            screen_rect: Some(Rect::from_min_size(Pos2::ZERO, SCREEN)),
            events,
            ..Default::default()
        };
        let mut remaining = Vec2::ZERO;
        let _ = ctx.run(input, |ctx| {
            CentralPanel::default().show(ctx, |ui| {
                carousel.ui(ui);
            });
            remaining = ctx.input(|i| i.scroll_delta);
        });
        remaining
    }

    fn nav_button_center(index: usize, count: usize) -> Pos2 {
        let rect = Rect::from_min_size(Pos2::ZERO, SCREEN).shrink(PANEL_MARGIN);
        let width = count as f32 * NAV_BUTTON_SIZE + (count - 1) as f32 * NAV_BUTTON_GAP;
        let left = rect.center().x - width / 2.0;
        pos2(
            left + index as f32 * (NAV_BUTTON_SIZE + NAV_BUTTON_GAP) + NAV_BUTTON_SIZE / 2.0,
            rect.bottom() - NAV_BOTTOM_MARGIN,
        )
    }

    fn wheel_over(pos: Pos2, dy: f32) -> Vec<Event> {
        vec![Event::PointerMoved(pos), Event::Scroll(vec2(0.0, dy))]
    }

    fn click(ctx: &Context, carousel: &mut Carousel<String>, pos: Pos2) {
        let button = |pressed| Event::PointerButton {
            pos,
            button: PointerButton::Primary,
            pressed,
            modifiers: Modifiers::default(),
        };
        run_frame(ctx, carousel, vec![Event::PointerMoved(pos)]);
        run_frame(ctx, carousel, vec![button(true)]);
        run_frame(ctx, carousel, vec![button(false)]);
    }

    #[test]
    fn test_wheel_down_over_carousel_advances_and_is_consumed() {
        let ctx = Context::default();
        let mut carousel = carousel(Arc::new(EventBus::new()));

        let remaining = run_frame(&ctx, &mut carousel, wheel_over(pos2(400.0, 300.0), -40.0));

        assert_eq!(carousel.navigator().active_index(), Some(1));
        assert_eq!(remaining, Vec2::ZERO);
    }

    #[test]
    fn test_wheel_up_at_first_item_signals_scroll_end() {
        let ctx = Context::default();
        let bus = Arc::new(EventBus::new());
        let ends = Arc::new(Mutex::new(Vec::new()));
        let sink = ends.clone();
        bus.on::<ScrollEnd, _>(move |e| sink.lock().push(e.direction));
        let mut carousel = carousel(bus);

        run_frame(&ctx, &mut carousel, wheel_over(pos2(400.0, 300.0), 40.0));

        assert_eq!(carousel.navigator().active_index(), Some(0));
        assert_eq!(*ends.lock(), vec![Direction::Backward]);
    }

    #[test]
    fn test_wheel_outside_carousel_is_left_alone() {
        let ctx = Context::default();
        let mut carousel = carousel(Arc::new(EventBus::new()));

        // Inside the panel margin, outside the carousel rect
        let remaining = run_frame(&ctx, &mut carousel, wheel_over(pos2(2.0, 2.0), -40.0));

        assert_eq!(carousel.navigator().active_index(), Some(0));
        assert_eq!(remaining, vec2(0.0, -40.0));
    }

    #[test]
    fn test_held_input_drops_wheel_within_cooldown() {
        let ctx = Context::default();
        let config = CarouselConfig {
            wheel_cooldown_ms: 60_000,
            ..CarouselConfig::default()
        };
        let items = vec!["a".to_string(), "b".to_string()];
        let mut carousel = Carousel::new("held", items, config, Arc::new(EventBus::new()));
        carousel.hold_input(Instant::now());

        run_frame(&ctx, &mut carousel, wheel_over(pos2(400.0, 300.0), -40.0));

        assert_eq!(carousel.navigator().active_index(), Some(0));
    }

    #[test]
    fn test_nav_button_click_jumps_to_item() {
        let ctx = Context::default();
        let mut carousel = carousel(Arc::new(EventBus::new()));
        run_frame(&ctx, &mut carousel, Vec::new());

        click(&ctx, &mut carousel, nav_button_center(3, 5));
        assert_eq!(carousel.navigator().active_index(), Some(3));

        click(&ctx, &mut carousel, nav_button_center(0, 5));
        assert_eq!(carousel.navigator().active_index(), Some(0));
    }
}

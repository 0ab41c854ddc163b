//! Wheel input adapter
//!
//! Translates continuous wheel deltas into discrete single-step advances.
//! Deltas follow the browser convention: positive means the wheel moved down.

use std::time::{Duration, Instant};
use tracing::debug;

use super::{CarouselNavigator, Direction, Transition};

/// Maps wheel deltas onto navigator steps, with an optional cooldown
#[derive(Debug, Clone)]
pub struct WheelAdapter {
    cooldown: Duration,
    last_step: Option<Instant>,
}

impl WheelAdapter {
    /// Create an adapter that drops events arriving within `cooldown` of the last step
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_step: None,
        }
    }

    /// Adapter that forwards every non-zero delta
    pub fn unthrottled() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Direction for a wheel delta; magnitude is ignored
    pub fn direction_for(delta: f32) -> Option<Direction> {
        if delta > 0.0 {
            Some(Direction::Forward)
        } else if delta < 0.0 {
            Some(Direction::Backward)
        } else {
            // Zero and NaN
            None
        }
    }

    /// Throttle one wheel event. Returns the direction to step, if any.
    pub fn accept(&mut self, delta: f32, now: Instant) -> Option<Direction> {
        let direction = Self::direction_for(delta)?;

        if let Some(last) = self.last_step {
            if now.saturating_duration_since(last) < self.cooldown {
                debug!(delta, "Wheel event dropped during cooldown");
                return None;
            }
        }

        // Boundary refusals also restart the cooldown so a long fling
        // produces a single ScrollEnd.
        self.last_step = Some(now);
        Some(direction)
    }

    /// Feed one wheel event. Returns the transition if the event was dispatched.
    pub fn on_wheel<T>(
        &mut self,
        delta: f32,
        now: Instant,
        navigator: &mut CarouselNavigator<T>,
    ) -> Option<Transition> {
        self.accept(delta, now).map(|direction| navigator.advance(direction))
    }

    /// Start a cooldown at `now` without stepping, so input still in flight
    /// from an earlier surface is dropped
    pub fn hold(&mut self, now: Instant) {
        self.last_step = Some(now);
    }

    /// Forget the last step
    pub fn reset(&mut self) {
        self.last_step = None;
    }
}

impl Default for WheelAdapter {
    fn default() -> Self {
        Self::unthrottled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_mapping_ignores_magnitude() {
        assert_eq!(WheelAdapter::direction_for(0.01), Some(Direction::Forward));
        assert_eq!(WheelAdapter::direction_for(5000.0), Some(Direction::Forward));
        assert_eq!(WheelAdapter::direction_for(-120.0), Some(Direction::Backward));
        assert_eq!(WheelAdapter::direction_for(0.0), None);
        assert_eq!(WheelAdapter::direction_for(f32::NAN), None);
    }

    #[test]
    fn test_large_delta_is_one_step() {
        let mut nav = CarouselNavigator::new(vec![0; 10]);
        let mut wheel = WheelAdapter::unthrottled();
        let now = Instant::now();

        let transition = wheel.on_wheel(10_000.0, now, &mut nav);
        assert_eq!(transition, Some(Transition::Moved { from: 0, to: 1 }));
    }

    #[test]
    fn test_zero_delta_is_ignored() {
        let mut nav = CarouselNavigator::new(vec![0; 3]);
        let mut wheel = WheelAdapter::unthrottled();
        assert_eq!(wheel.on_wheel(0.0, Instant::now(), &mut nav), None);
        assert_eq!(nav.active_index(), Some(0));
    }

    #[test]
    fn test_cooldown_drops_rapid_events() {
        let mut nav = CarouselNavigator::new(vec![0; 10]);
        let mut wheel = WheelAdapter::new(Duration::from_millis(300));
        let start = Instant::now();

        assert!(wheel.on_wheel(1.0, start, &mut nav).is_some());
        assert!(wheel.on_wheel(1.0, start + Duration::from_millis(100), &mut nav).is_none());
        assert!(wheel.on_wheel(1.0, start + Duration::from_millis(299), &mut nav).is_none());
        assert!(wheel.on_wheel(1.0, start + Duration::from_millis(300), &mut nav).is_some());

        assert_eq!(nav.active_index(), Some(2));
    }

    #[test]
    fn test_boundary_restarts_cooldown() {
        let mut nav = CarouselNavigator::new(vec![0; 2]);
        let mut wheel = WheelAdapter::new(Duration::from_millis(200));
        let start = Instant::now();

        wheel.on_wheel(-1.0, start, &mut nav);
        assert_eq!(
            wheel.on_wheel(-1.0, start + Duration::from_millis(50), &mut nav),
            None
        );

        wheel.reset();
        assert_eq!(
            wheel.on_wheel(-1.0, start + Duration::from_millis(60), &mut nav),
            Some(Transition::BoundaryReached(Direction::Backward))
        );
    }

    #[test]
    fn test_hold_starts_cooldown_without_stepping() {
        let mut nav = CarouselNavigator::new(vec![0; 4]);
        let mut wheel = WheelAdapter::new(Duration::from_millis(300));
        let start = Instant::now();

        wheel.hold(start);
        assert_eq!(nav.active_index(), Some(0));
        assert!(wheel.on_wheel(1.0, start + Duration::from_millis(16), &mut nav).is_none());
        assert!(wheel.on_wheel(1.0, start + Duration::from_millis(290), &mut nav).is_none());
        assert_eq!(
            wheel.on_wheel(1.0, start + Duration::from_millis(300), &mut nav),
            Some(Transition::Moved { from: 0, to: 1 })
        );
    }
}

//! Page sections and the pager that moves between them

use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

use crate::events::{events::SectionChanged, EventBus};
use crate::navigation::{CarouselNavigator, Direction, Transition, WheelAdapter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Hero,
    Projects,
    Contact,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Hero, Section::Projects, Section::Contact];

    pub fn title(self) -> &'static str {
        match self {
            Section::Hero => "Home",
            Section::Projects => "Projects",
            Section::Contact => "Contact",
        }
    }
}

/// Navigator over the page sections
///
/// Carousel boundary signals are chained here: a `ScrollEnd` from the hero
/// carousel moves the page one section in the same direction. The pager owns
/// the page-level wheel throttle, and every section change restarts it, so
/// the rest of a fling that just changed sections cannot change them again.
pub struct SectionPager {
    sections: CarouselNavigator<Section>,
    wheel: WheelAdapter,
    arrived_from: Option<Direction>,
    events: Option<Arc<EventBus>>,
}

impl SectionPager {
    pub fn new() -> Self {
        Self {
            sections: CarouselNavigator::new(Section::ALL.to_vec()),
            wheel: WheelAdapter::unthrottled(),
            arrived_from: None,
            events: None,
        }
    }

    /// Drop page-level wheel events arriving within `cooldown` of a section change
    pub fn with_wheel_cooldown(mut self, cooldown: Duration) -> Self {
        self.wheel = WheelAdapter::new(cooldown);
        self
    }

    pub fn with_event_bus(mut self, bus: Arc<EventBus>) -> Self {
        self.events = Some(bus);
        self
    }

    pub fn current(&self) -> Section {
        self.sections.active_item().copied().unwrap_or(Section::Hero)
    }

    pub fn sections(&self) -> &[Section] {
        self.sections.items()
    }

    /// Direction of the step that brought the page to the current section.
    /// `None` after a direct selection.
    pub fn arrived_from(&self) -> Option<Direction> {
        self.arrived_from
    }

    /// Move one section; stays put at the first or last section
    pub fn step(&mut self, direction: Direction) -> Transition {
        let transition = self.sections.advance(direction);
        if transition.moved() {
            self.arrived_from = Some(direction);
        }
        self.announce(transition);
        transition
    }

    /// Wheel input not consumed by a section's own content
    pub fn on_wheel(&mut self, delta: f32, now: Instant) -> Option<Transition> {
        self.wheel.accept(delta, now).map(|direction| self.step(direction))
    }

    /// Step on behalf of a carousel that ran past its end
    pub fn chain(&mut self, direction: Direction, now: Instant) -> Transition {
        let transition = self.step(direction);
        if transition.moved() {
            self.wheel.hold(now);
        }
        transition
    }

    pub fn show(&mut self, section: Section, now: Instant) -> Transition {
        let index = Section::ALL.iter().position(|s| *s == section).unwrap_or(0);
        let transition = self.sections.jump_to(index);
        if transition.moved() {
            self.arrived_from = None;
            self.wheel.hold(now);
        }
        self.announce(transition);
        transition
    }

    fn announce(&self, transition: Transition) {
        if let Transition::Moved { from, to } = transition {
            info!(section = ?self.current(), "Section changed");
            if let Some(bus) = &self.events {
                bus.publish(SectionChanged { from, to });
            }
        }
    }
}

impl Default for SectionPager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::events::ScrollEnd;
    use parking_lot::Mutex;
    use std::collections::VecDeque;

    #[test]
    fn test_pager_steps_and_clamps() {
        let mut pager = SectionPager::new();
        assert_eq!(pager.current(), Section::Hero);

        pager.step(Direction::Forward);
        pager.step(Direction::Forward);
        assert_eq!(pager.current(), Section::Contact);

        assert_eq!(pager.step(Direction::Forward), Transition::BoundaryReached(Direction::Forward));
        assert_eq!(pager.current(), Section::Contact);
    }

    #[test]
    fn test_show_publishes_section_changed() {
        let bus = Arc::new(EventBus::new());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        bus.on::<SectionChanged, _>(move |e| sink.lock().push((e.from, e.to)));

        let mut pager = SectionPager::new().with_event_bus(bus);
        pager.show(Section::Contact, Instant::now());
        pager.show(Section::Contact, Instant::now());
        pager.step(Direction::Backward);

        assert_eq!(*seen.lock(), vec![(0, 2), (2, 1)]);
    }

    #[test]
    fn test_fling_off_the_carousel_moves_one_section() {
        let cooldown = Duration::from_millis(300);
        let bus = Arc::new(EventBus::new());
        let pending = Arc::new(Mutex::new(VecDeque::new()));
        let queue = pending.clone();
        let _chained = bus.subscribe_scoped::<ScrollEnd, _>(move |e| queue.lock().push_back(e.direction));

        let mut pager = SectionPager::new().with_wheel_cooldown(cooldown);
        let mut hero = CarouselNavigator::with_initial_index(vec!["a", "b", "c"], 2).with_event_bus(bus);
        let mut hero_wheel = WheelAdapter::new(cooldown);
        let start = Instant::now();

        // First frame of the fling hits the end of the carousel
        hero_wheel.on_wheel(1.0, start, &mut hero);
        let directions: Vec<Direction> = pending.lock().drain(..).collect();
        for direction in directions {
            pager.chain(direction, start);
        }
        assert_eq!(pager.current(), Section::Projects);

        // The rest of the fling lands on the projects page, one event per frame
        for frame in 1..18 {
            pager.on_wheel(1.0, start + Duration::from_millis(16 * frame));
        }
        assert_eq!(pager.current(), Section::Projects);

        pager.on_wheel(1.0, start + cooldown);
        assert_eq!(pager.current(), Section::Contact);
    }

    #[test]
    fn test_show_restarts_wheel_cooldown() {
        let start = Instant::now();
        let mut pager = SectionPager::new().with_wheel_cooldown(Duration::from_millis(300));

        pager.show(Section::Projects, start);
        assert_eq!(pager.on_wheel(1.0, start + Duration::from_millis(10)), None);
        assert_eq!(
            pager.on_wheel(1.0, start + Duration::from_millis(300)),
            Some(Transition::Moved { from: 1, to: 2 })
        );
    }

    #[test]
    fn test_arrived_from_tracks_last_step() {
        let now = Instant::now();
        let mut pager = SectionPager::new();
        assert_eq!(pager.arrived_from(), None);

        pager.step(Direction::Forward);
        pager.step(Direction::Forward);
        pager.chain(Direction::Backward, now);
        assert_eq!(pager.current(), Section::Projects);
        assert_eq!(pager.arrived_from(), Some(Direction::Backward));

        // A refused step keeps the previous arrival
        pager.step(Direction::Backward);
        pager.step(Direction::Backward);
        assert_eq!(pager.current(), Section::Hero);
        assert_eq!(pager.arrived_from(), Some(Direction::Backward));

        pager.show(Section::Contact, now);
        assert_eq!(pager.arrived_from(), None);
    }
}

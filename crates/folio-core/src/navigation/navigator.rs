//! Carousel navigator implementation

use std::sync::Arc;
use tracing::{debug, info, warn};

use super::{Direction, Transition};
use crate::error::NavigationError;
use crate::events::events::{IndexChanged, ScrollEnd};
use crate::events::EventBus;

/// An item paired with its signed distance from the active index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemOffset<'a, T> {
    pub index: usize,
    pub item: &'a T,
    pub offset: isize,
}

/// Cursor over a fixed, ordered sequence of items
///
/// The navigator never touches the items themselves; it only tracks which one
/// is active. Every operation is total: out-of-range input is clamped and
/// steps past either end are refused, never wrapped.
pub struct CarouselNavigator<T> {
    items: Vec<T>,
    active_index: Option<usize>,
    events: Option<Arc<EventBus>>,
}

impl<T> CarouselNavigator<T> {
    /// Create a navigator positioned on the first item
    pub fn new(items: Vec<T>) -> Self {
        Self::with_initial_index(items, 0)
    }

    /// Create a navigator positioned on `initial` (clamped)
    pub fn with_initial_index(items: Vec<T>, initial: usize) -> Self {
        let active_index = clamp_index(initial, items.len());
        Self {
            items,
            active_index,
            events: None,
        }
    }

    /// Publish `ScrollEnd` and `IndexChanged` on the given bus
    pub fn with_event_bus(mut self, bus: Arc<EventBus>) -> Self {
        self.events = Some(bus);
        self
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Active index, `None` when there are no items
    pub fn active_index(&self) -> Option<usize> {
        self.active_index
    }

    pub fn active_item(&self) -> Option<&T> {
        self.active_index.and_then(|idx| self.items.get(idx))
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active_index == Some(index)
    }

    /// Move one step in `direction`
    pub fn advance(&mut self, direction: Direction) -> Transition {
        let Some(current) = self.active_index else {
            return Transition::Inactive;
        };

        let target = match direction {
            Direction::Forward if current + 1 < self.items.len() => current + 1,
            Direction::Backward if current > 0 => current - 1,
            _ => {
                info!(%direction, index = current, "Carousel boundary reached");
                if let Some(bus) = &self.events {
                    bus.publish(ScrollEnd { direction });
                }
                return Transition::BoundaryReached(direction);
            }
        };

        self.set_active(current, target)
    }

    /// Advance using an external direction name such as `"up"` or `"forward"`.
    /// Unknown names are rejected without touching the state.
    pub fn try_advance(&mut self, direction: &str) -> Result<Transition, NavigationError> {
        let direction = direction.parse::<Direction>().map_err(|e| {
            warn!(%e, "Rejected carousel input");
            e
        })?;
        Ok(self.advance(direction))
    }

    /// Select an item directly. Stale or out-of-range indices are clamped.
    pub fn jump_to(&mut self, index: usize) -> Transition {
        let Some(current) = self.active_index else {
            return Transition::Inactive;
        };

        let target = index.min(self.items.len() - 1);
        if target == current {
            return Transition::Unchanged;
        }

        self.set_active(current, target)
    }

    /// Every item with its offset from the active index
    pub fn offsets_snapshot(&self) -> Vec<ItemOffset<'_, T>> {
        let Some(active) = self.active_index else {
            return Vec::new();
        };

        self.items
            .iter()
            .enumerate()
            .map(|(index, item)| ItemOffset {
                index,
                item,
                offset: index as isize - active as isize,
            })
            .collect()
    }

    fn set_active(&mut self, from: usize, to: usize) -> Transition {
        self.active_index = Some(to);
        debug!(from, to, "Carousel index changed");

        if let Some(bus) = &self.events {
            bus.publish(IndexChanged { from, to });
        }

        Transition::Moved { from, to }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for CarouselNavigator<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CarouselNavigator")
            .field("items", &self.items)
            .field("active_index", &self.active_index)
            .field("has_event_bus", &self.events.is_some())
            .finish()
    }
}

fn clamp_index(index: usize, len: usize) -> Option<usize> {
    (len > 0).then(|| index.min(len - 1))
}

//! Light/dark theme mode

use serde::{Serialize, Deserialize};
use std::sync::Arc;
use tracing::info;

use crate::events::{events::ThemeChanged, EventBus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == ThemeMode::Dark
    }
}

/// Holds the current theme mode for the lifetime of the app. Not persisted.
#[derive(Debug)]
pub struct ThemeState {
    mode: ThemeMode,
    events: Option<Arc<EventBus>>,
}

impl ThemeState {
    pub fn new(mode: ThemeMode) -> Self {
        Self { mode, events: None }
    }

    pub fn with_event_bus(mut self, bus: Arc<EventBus>) -> Self {
        self.events = Some(bus);
        self
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// Flip between light and dark, returning the new mode
    pub fn toggle(&mut self) -> ThemeMode {
        self.mode = self.mode.toggled();
        info!(mode = ?self.mode, "Theme toggled");
        if let Some(bus) = &self.events {
            bus.publish(ThemeChanged { mode: self.mode });
        }
        self.mode
    }
}

impl Default for ThemeState {
    fn default() -> Self {
        Self::new(ThemeMode::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn test_toggle_round_trips() {
        let mut theme = ThemeState::default();
        assert_eq!(theme.mode(), ThemeMode::Light);
        assert_eq!(theme.toggle(), ThemeMode::Dark);
        assert!(theme.mode().is_dark());
        assert_eq!(theme.toggle(), ThemeMode::Light);
    }

    #[test]
    fn test_toggle_publishes_theme_changed() {
        let bus = Arc::new(EventBus::new());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        bus.on::<ThemeChanged, _>(move |e| sink.lock().push(e.mode));

        let mut theme = ThemeState::new(ThemeMode::Dark).with_event_bus(bus);
        theme.toggle();

        assert_eq!(*seen.lock(), vec![ThemeMode::Light]);
    }
}

//! Core state for the portfolio
//!
//! This crate provides the carousel navigator, its input adapter, the event
//! bus used to observe it, and the shared configuration. It has no UI
//! dependencies; rendering surfaces consume its state.

pub mod config;
pub mod error;
pub mod events;
pub mod navigation;
pub mod section;
pub mod theme;

// Re-export commonly used types
pub use config::{CarouselConfig, ContactConfig, ContactEntry, HeroConfig, PortfolioConfig, WindowConfig};
pub use error::{ConfigError, NavigationError};
pub use events::{EventBus, Subscription, SubscriptionId};
pub use navigation::{CarouselNavigator, Direction, ItemOffset, Transition, WheelAdapter};
pub use section::{Section, SectionPager};
pub use theme::{ThemeMode, ThemeState};

//! User interface components for the portfolio
//!
//! This crate is the egui rendering surface: it paints the navigator state
//! from `folio-core` and feeds pointer input back into it.

pub mod carousel;
pub mod sections;
pub mod theme;

/// Re-export commonly used types
pub use carousel::{Carousel, ItemTransform};
pub use sections::FadeIn;
pub use theme::{apply_theme, theme_toggle, toggle_label, Palette};

//! Portfolio configuration

use std::path::Path;
use serde::{Serialize, Deserialize};
use tracing::{info, warn};

use crate::error::ConfigError;
use crate::theme::ThemeMode;

/// Top-level configuration, loaded from JSON
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PortfolioConfig {
    /// Window settings
    pub window: WindowConfig,

    /// Theme mode at startup
    pub theme: ThemeMode,

    /// Carousel transform and input settings
    pub carousel: CarouselConfig,

    /// Hero section content
    pub hero: HeroConfig,

    /// Contact section content
    pub contact: ContactConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Portfolio".to_string(),
            width: 1200.0,
            height: 800.0,
        }
    }
}

/// Carousel rendering policy and input settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Scale lost per step of distance from the active item
    pub scale_step: f32,

    /// Vertical displacement per step, in points
    pub translate_step: f32,

    /// Rotation per step, in degrees
    pub rotate_step_deg: f32,

    /// Opacity lost per step of distance
    pub opacity_step: f32,

    /// Items at or beyond this distance are fully transparent
    pub visibility_radius: usize,

    /// Stacking order of the active item
    pub z_base: i32,

    /// Duration of the transform transition, in seconds
    pub transition_secs: f32,

    /// Minimum time between two wheel-driven steps, in milliseconds
    pub wheel_cooldown_ms: u64,

    /// Index selected when the carousel is mounted
    pub initial_index: usize,

    /// Height of one carousel item, in points
    pub item_height: f32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            scale_step: 0.3,
            translate_step: 300.0,
            rotate_step_deg: 10.0,
            opacity_step: 1.0,
            visibility_radius: 5,
            z_base: 100,
            transition_secs: 1.0,
            wheel_cooldown_ms: 300,
            initial_index: 0,
            item_height: 350.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeroConfig {
    pub items: Vec<String>,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            items: vec![
                "Hello".to_string(),
                "I build things for the web".to_string(),
                "Frontend".to_string(),
                "Design systems".to_string(),
                "Let's talk".to_string(),
            ],
        }
    }
}

/// One contact row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactEntry {
    pub title: String,
    pub content: String,
    pub link: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub entries: Vec<ContactEntry>,
    pub notice: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            entries: vec![
                ContactEntry {
                    title: "Email".to_string(),
                    content: "hello@example.com".to_string(),
                    link: "mailto:hello@example.com".to_string(),
                },
                ContactEntry {
                    title: "GitHub".to_string(),
                    content: "github.com/example".to_string(),
                    link: "https://github.com/example".to_string(),
                },
                ContactEntry {
                    title: "Blog".to_string(),
                    content: "example.dev".to_string(),
                    link: "https://example.dev".to_string(),
                },
            ],
            notice: "Thanks for visiting my portfolio".to_string(),
        }
    }
}

impl PortfolioConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Load from `path` if given, falling back to defaults when the file is missing
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        match Self::load(path) {
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "Config file not found, using defaults");
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        let carousel = &self.carousel;
        let non_negative = [
            ("carousel.scale_step", carousel.scale_step),
            ("carousel.opacity_step", carousel.opacity_step),
            ("carousel.transition_secs", carousel.transition_secs),
            ("carousel.item_height", carousel.item_height),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!("{} must be a non-negative number, got {}", name, value)));
            }
        }

        if carousel.visibility_radius == 0 {
            return Err(ConfigError::Invalid("carousel.visibility_radius must be at least 1".to_string()));
        }

        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            return Err(ConfigError::Invalid("window size must be positive".to_string()));
        }

        Ok(())
    }
}

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};

use crate::error::NavigationError;

mod navigator;
mod wheel;

pub use navigator::{CarouselNavigator, ItemOffset};
pub use wheel::WheelAdapter;

/// Direction of a single-step transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Towards the last item (wheel down)
    Forward,
    /// Towards the first item (wheel up)
    Backward,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Forward => f.write_str("forward"),
            Direction::Backward => f.write_str("backward"),
        }
    }
}

impl FromStr for Direction {
    type Err = NavigationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "forward" | "down" | "next" => Ok(Direction::Forward),
            "backward" | "up" | "previous" | "prev" => Ok(Direction::Backward),
            _ => Err(NavigationError::InvalidDirection(s.to_string())),
        }
    }
}

/// Outcome of a navigator operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The active index changed
    Moved { from: usize, to: usize },
    /// The target was already active
    Unchanged,
    /// A step past the first or last item was refused
    BoundaryReached(Direction),
    /// There are no items to navigate
    Inactive,
}

impl Transition {
    pub fn moved(&self) -> bool {
        matches!(self, Transition::Moved { .. })
    }
}

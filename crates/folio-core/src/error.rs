use thiserror::Error;

/// Errors from parsing navigation input
#[derive(Error, Debug)]
pub enum NavigationError {
    #[error("Invalid direction: {0:?}")]
    InvalidDirection(String),
}

/// Errors that can occur while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

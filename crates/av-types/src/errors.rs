use thiserror::Error;

/// Main error type for the AvaTaR runner
#[derive(Error, Debug)]
pub enum AvError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Launch error: {0}")]
    Launch(#[from] LaunchError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Launch-configuration validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Field '{field}' must not be empty")]
    EmptyField { field: &'static str },

    #[error("Duplicate device index {index} in visible_devices")]
    DuplicateDevice { index: u32 },
}

/// Errors surfaced by the launcher itself
#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("Invalid launch configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed waiting on child process: {0}")]
    Wait(std::io::Error),

    #[error("Optimizer exceeded timeout of {timeout_secs} seconds and was killed")]
    TimedOut { timeout_secs: u64 },

    #[error("Optimizer exited with non-zero status {code}")]
    Propagated { code: i32 },
}

/// Result type alias for AvaTaR runner operations
pub type AvResult<T> = Result<T, AvError>;

/// Macro for creating internal errors
#[macro_export]
macro_rules! internal_error {
    ($($arg:tt)*) => {
        $crate::AvError::Internal(format!($($arg)*))
    };
}

use thiserror::Error;

/// Application error types
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
    /// Input rejected at the boundary before reaching the calculator
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl AppError {
    /// Short machine-readable name, used in JSON output
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::ConfigError(_) => "config_error",
            Self::InvalidInput(_) => "invalid_input",
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::ConfigError(err.to_string())
    }
}

impl From<toml::ser::Error> for AppError {
    fn from(err: toml::ser::Error) -> Self {
        Self::ConfigError(format!("TOML error: {}", err))
    }
}

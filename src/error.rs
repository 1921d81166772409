//! Error types and handling for the ASOS dashboard

use thiserror::Error;

/// Main error type for the dashboard and the weather proxy
#[derive(Error, Debug)]
pub enum WeatherError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The upstream ASOS API could not be reached or returned an unreadable body
    #[error("Upstream error: {message}")]
    Upstream { message: String },

    /// The dashboard could not reach the proxy endpoint
    #[error("{message}")]
    Fetch { message: String },

    /// The proxy endpoint answered with a non-OK status
    #[error("{message} (status {status})")]
    Status { status: u16, message: String },

    /// The dashboard page could not be rendered
    #[error("Render error: {message}")]
    Render { message: String },
}

impl WeatherError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new upstream error
    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    /// Create a new fetch error
    pub fn fetch<S: Into<String>>(message: S) -> Self {
        Self::Fetch {
            message: message.into(),
        }
    }

    /// Create a new status error
    pub fn status<S: Into<String>>(status: u16, message: S) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Create a new render error
    pub fn render<S: Into<String>>(message: S) -> Self {
        Self::Render {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            WeatherError::Config { .. } => {
                "Configuration error. Please check your environment and API key.".to_string()
            }
            WeatherError::Upstream { .. } => {
                "Unable to reach the weather service. Please try again later.".to_string()
            }
            WeatherError::Fetch { message } => message.clone(),
            WeatherError::Status { message, .. } => message.clone(),
            WeatherError::Render { .. } => "The page could not be displayed.".to_string(),
        }
    }
}

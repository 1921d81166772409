//! `asos-dashboard` - daily ASOS weather proxy and chart dashboard
//!
//! The web server exposes `POST /api/v0`, which forwards a fixed query to the
//! ASOS daily-observation service, and a server-rendered page at `/` that
//! loads those observations and draws temperature or rainfall charts.

pub mod api;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod weather;
pub mod web;

// Re-export core types for public API
pub use config::Config;
pub use dashboard::{Dashboard, ViewMode};
pub use error::WeatherError;
pub use models::WeatherObservation;
pub use weather::{AsosClient, AsosQuery, AsosResponse};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WeatherError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}

//! Data models for the ASOS dashboard
//!
//! - Weather: daily observation records as delivered by the ASOS service

pub mod weather;

pub use weather::{WeatherObservation, parse_float};

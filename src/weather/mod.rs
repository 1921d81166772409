//! Upstream weather services
//!
//! Only the ASOS daily-observation service is wired in.

pub mod asos;

pub use asos::{AsosClient, AsosQuery, AsosResponse, SUCCESS_RESULT_CODE};

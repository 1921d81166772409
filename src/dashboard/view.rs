//! View selection for the dashboard.
//!
//! The mode only changes on a click: the two side-menu entries select a
//! chart and the page title goes back to the empty view.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    None,
    Temperature,
    Rainfall,
}

/// Clickable elements of the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Title,
    Temperature,
    Rainfall,
}

impl ViewMode {
    /// State after `control` was clicked. The previous mode never matters.
    #[must_use]
    pub fn on_click(self, control: Control) -> Self {
        match control {
            Control::Title => ViewMode::None,
            Control::Temperature => ViewMode::Temperature,
            Control::Rainfall => ViewMode::Rainfall,
        }
    }

    /// Value of the `view` query parameter; unknown values fall back to `None`.
    #[must_use]
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("temperature") => ViewMode::Temperature,
            Some("rainfall") => ViewMode::Rainfall,
            _ => ViewMode::None,
        }
    }
}

impl Control {
    /// The click that leads to `mode` from any state
    #[must_use]
    pub fn selecting(mode: ViewMode) -> Self {
        match mode {
            ViewMode::None => Control::Title,
            ViewMode::Temperature => Control::Temperature,
            ViewMode::Rainfall => Control::Rainfall,
        }
    }

    /// Link target used by the rendered page
    #[must_use]
    pub fn href(self) -> &'static str {
        match self {
            Control::Title => "/",
            Control::Temperature => "/?view=temperature",
            Control::Rainfall => "/?view=rainfall",
        }
    }
}

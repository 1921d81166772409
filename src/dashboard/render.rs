//! HTML output for the dashboard page.
//!
//! Markup lives in askama templates under `templates/`; only the Chart.js
//! config and alert messages are inlined as JSON.

use askama::Template;

use crate::models::WeatherObservation;
use crate::{Result, WeatherError};

use super::chart::chart_config;
use super::view::{Control, ViewMode};

pub const PAGE_TITLE: &str = "Daejeon temperature and rainfall";
pub const PROMPT: &str = "Select a chart to view.";

const CHART_JS_CDN: &str = "https://cdn.jsdelivr.net/npm/chart.js";

/// Blocking notification shown to the user when loading fails
pub trait Alert {
    fn alert(&mut self, message: &str);
}

/// Collects alerts so they can be replayed by the browser with `alert()`
#[derive(Debug, Default)]
pub struct HtmlAlert {
    messages: Vec<String>,
}

impl HtmlAlert {
    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

impl Alert for HtmlAlert {
    fn alert(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}

#[must_use]
pub fn failure_message(error: &str) -> String {
    format!("Failed to load data.{error}")
}

struct MenuEntry {
    label: &'static str,
    href: &'static str,
    active: bool,
}

impl MenuEntry {
    fn new(control: Control, label: &'static str, view: ViewMode) -> Self {
        Self {
            label,
            href: control.href(),
            active: ViewMode::default().on_click(control) == view,
        }
    }
}

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate {
    title: &'static str,
    title_href: &'static str,
    menu: Vec<MenuEntry>,
    show_prompt: bool,
    prompt: &'static str,
    chart_json: Option<String>,
}

#[derive(Template)]
#[template(source = "<div>Loading ...</div>", ext = "html")]
struct LoadingTemplate;

#[derive(Template)]
#[template(path = "page.html")]
struct PageTemplate<'a> {
    title: &'static str,
    chart_js_cdn: &'static str,
    body: &'a str,
    alerts: Vec<String>,
}

/// JSON that is safe to inline in a `<script>` element
fn script_json<T: serde::Serialize>(value: &T) -> Result<String> {
    let json = serde_json::to_string(value)
        .map_err(|e| WeatherError::render(format!("cannot serialize script data: {e}")))?;
    Ok(json
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026"))
}

fn render_template<T: Template>(template: &T) -> Result<String> {
    template
        .render()
        .map_err(|e| WeatherError::render(e.to_string()))
}

/// Page content for loaded data
pub fn loaded(items: &[WeatherObservation], view: ViewMode) -> Result<String> {
    let chart_json = chart_config(items, view)
        .map(|config| script_json(&config))
        .transpose()?;

    render_template(&DashboardTemplate {
        title: PAGE_TITLE,
        title_href: Control::Title.href(),
        menu: vec![
            MenuEntry::new(Control::Temperature, "Temperature", view),
            MenuEntry::new(Control::Rainfall, "Rainfall", view),
        ],
        show_prompt: view == ViewMode::None,
        prompt: PROMPT,
        chart_json,
    })
}

pub fn loading() -> Result<String> {
    render_template(&LoadingTemplate)
}

/// Wrap page content into a full document and replay any alerts.
pub fn document(body: &str, alerts: &HtmlAlert) -> Result<String> {
    let alerts = alerts
        .messages()
        .iter()
        .map(|message| script_json(message))
        .collect::<Result<Vec<_>>>()?;

    render_template(&PageTemplate {
        title: PAGE_TITLE,
        chart_js_cdn: CHART_JS_CDN,
        body,
        alerts,
    })
}

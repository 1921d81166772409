//! Dashboard page
//!
//! Each `GET /` mounts a fresh [`Dashboard`]: it posts once to the weather
//! proxy, replays the click carried in the `view` query parameter and renders
//! the chart for the resulting view.

pub mod chart;
pub mod query;
pub mod render;
pub mod view;

use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    routing::get,
};
use serde::Deserialize;

pub use chart::{
    ChartConfig, ChartData, ChartOptions, Dataset, chart_config, chart_data, chart_options,
};
pub use query::{HttpProxyFetcher, ProxyFetcher, QueryClient, QueryState, WEATHER_QUERY_KEY};
pub use render::{Alert, HtmlAlert};
pub use view::{Control, ViewMode};

use crate::Result;
use crate::web::AppState;

/// State of one page view
pub struct Dashboard {
    fetcher: Arc<dyn ProxyFetcher>,
    queries: QueryClient,
    view: ViewMode,
}

impl Dashboard {
    pub fn mount(fetcher: Arc<dyn ProxyFetcher>) -> Self {
        Self {
            fetcher,
            queries: QueryClient::new(),
            view: ViewMode::default(),
        }
    }

    #[must_use]
    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn click(&mut self, control: Control) {
        self.view = self.view.on_click(control);
    }

    /// Load the observations; later calls reuse the first result.
    pub async fn load(&self) -> QueryState {
        let fetcher = Arc::clone(&self.fetcher);
        self.queries
            .fetch(WEATHER_QUERY_KEY, || async move { fetcher.fetch_weather().await })
            .await
    }

    #[must_use]
    pub fn state(&self) -> QueryState {
        self.queries.state(WEATHER_QUERY_KEY)
    }

    /// Page content for the current state. A failed load goes to `alert`
    /// and leaves the page empty.
    pub fn render(&self, alert: &mut dyn Alert) -> Result<String> {
        match self.state() {
            QueryState::Pending => render::loading(),
            QueryState::Error(message) => {
                alert.alert(&render::failure_message(&message));
                Ok(String::new())
            }
            QueryState::Success(items) => render::loaded(&items, self.view),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub view: Option<String>,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(get_dashboard))
}

async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PageParams>,
) -> std::result::Result<Html<String>, StatusCode> {
    let mut dashboard = Dashboard::mount(Arc::clone(&state.fetcher));
    let selected = ViewMode::from_param(params.view.as_deref());
    dashboard.click(Control::selecting(selected));

    dashboard.load().await;

    let mut alerts = HtmlAlert::default();
    let page = dashboard
        .render(&mut alerts)
        .and_then(|body| render::document(&body, &alerts))
        .map_err(|e| {
            tracing::error!("Failed to render dashboard: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
    Ok(Html(page))
}

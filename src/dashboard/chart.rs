//! Chart.js data and options built from the observation list.

use serde::Serialize;

use crate::models::WeatherObservation;

use super::view::ViewMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    /// `None` marks a value that could not be read and is drawn as a gap
    pub data: Vec<Option<f64>>,
    pub border_color: String,
    pub background_color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartOptions {
    pub responsive: bool,
    pub plugins: Plugins,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plugins {
    pub legend: Legend,
    pub title: Title,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub position: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub display: bool,
    pub text: String,
}

/// Everything `new Chart(canvas, config)` needs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

fn dataset<F>(
    items: &[WeatherObservation],
    label: &str,
    border: &str,
    background: &str,
    value: F,
) -> Dataset
where
    F: Fn(&WeatherObservation) -> Option<f64>,
{
    Dataset {
        label: label.to_string(),
        data: items.iter().map(value).collect(),
        border_color: border.to_string(),
        background_color: background.to_string(),
    }
}

/// Reshape the observations for the selected view. `ViewMode::None` has no chart.
#[must_use]
pub fn chart_data(items: &[WeatherObservation], mode: ViewMode) -> Option<ChartData> {
    let datasets = match mode {
        ViewMode::None => return None,
        ViewMode::Temperature => vec![
            dataset(items, "Average temperature", "green", "green", |item| {
                item.average_temperature()
            }),
            dataset(items, "Minimum temperature", "skyblue", "skyblue", |item| {
                item.minimum_temperature()
            }),
            dataset(items, "Maximum temperature", "orange", "orange", |item| {
                item.maximum_temperature()
            }),
        ],
        ViewMode::Rainfall => vec![dataset(
            items,
            "Precipitation",
            "rgb(153, 102, 255)",
            "rgba(153, 102, 255, 0.5)",
            |item| item.precipitation(),
        )],
    };

    Some(ChartData {
        labels: items.iter().map(|item| item.tm.clone()).collect(),
        datasets,
    })
}

#[must_use]
pub fn chart_title(mode: ViewMode) -> &'static str {
    match mode {
        ViewMode::None => "",
        ViewMode::Temperature => "Temperature by date",
        ViewMode::Rainfall => "Rainfall by date",
    }
}

#[must_use]
pub fn chart_options(mode: ViewMode) -> ChartOptions {
    ChartOptions {
        responsive: true,
        plugins: Plugins {
            legend: Legend {
                position: "top".to_string(),
            },
            title: Title {
                display: true,
                text: chart_title(mode).to_string(),
            },
        },
    }
}

/// Both views are drawn as bar charts.
#[must_use]
pub fn chart_config(items: &[WeatherObservation], mode: ViewMode) -> Option<ChartConfig> {
    chart_data(items, mode).map(|data| ChartConfig {
        kind: ChartKind::Bar,
        data,
        options: chart_options(mode),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record() -> WeatherObservation {
        WeatherObservation {
            tm: "20250301".into(),
            avg_ta: "5.0".into(),
            min_ta: "1.0".into(),
            max_ta: "9.0".into(),
            sum_rn: "0".into(),
            ..WeatherObservation::default()
        }
    }

    #[test]
    fn test_no_chart_for_none() {
        assert_eq!(chart_data(&[record()], ViewMode::None), None);
        assert_eq!(chart_config(&[record()], ViewMode::None), None);
    }

    #[test]
    fn test_temperature_chart() {
        let data = chart_data(&[record()], ViewMode::Temperature).unwrap();
        assert_eq!(data.labels, vec!["20250301"]);
        assert_eq!(data.datasets.len(), 3);
        assert_eq!(data.datasets[0].data, vec![Some(5.0)]);
        assert_eq!(data.datasets[1].data, vec![Some(1.0)]);
        assert_eq!(data.datasets[2].data, vec![Some(9.0)]);
        assert_eq!(data.datasets[0].border_color, "green");
        assert_eq!(data.datasets[1].border_color, "skyblue");
        assert_eq!(data.datasets[2].border_color, "orange");
    }

    #[test]
    fn test_rainfall_chart() {
        let data = chart_data(&[record()], ViewMode::Rainfall).unwrap();
        assert_eq!(data.labels, vec!["20250301"]);
        assert_eq!(data.datasets.len(), 1);
        assert_eq!(data.datasets[0].data, vec![Some(0.0)]);
        assert_eq!(data.datasets[0].background_color, "rgba(153, 102, 255, 0.5)");
    }

    #[test]
    fn test_order_follows_input() {
        let mut second = record();
        second.tm = "20250302".into();
        second.sum_rn = "3.5".into();
        let mut first = record();
        first.sum_rn = String::new();

        let data = chart_data(&[first, second], ViewMode::Rainfall).unwrap();
        assert_eq!(data.labels, vec!["20250301", "20250302"]);
        assert_eq!(data.datasets[0].data, vec![None, Some(3.5)]);
    }

    #[test]
    fn test_empty_items_give_empty_series() {
        let data = chart_data(&[], ViewMode::Temperature).unwrap();
        assert!(data.labels.is_empty());
        assert!(data.datasets.iter().all(|d| d.data.is_empty()));
    }

    #[test]
    fn test_options_title() {
        assert_eq!(chart_options(ViewMode::Temperature).plugins.title.text, "Temperature by date");
        assert_eq!(chart_options(ViewMode::Rainfall).plugins.title.text, "Rainfall by date");
        assert_eq!(chart_options(ViewMode::None).plugins.title.text, "");
    }

    #[test]
    fn test_config_serializes_for_chart_js() {
        let mut item = record();
        item.sum_rn = String::new();
        let config = chart_config(&[item], ViewMode::Rainfall).unwrap();
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["type"], "bar");
        assert_eq!(value["data"]["datasets"][0]["data"], json!([null]));
        assert_eq!(value["data"]["datasets"][0]["borderColor"], "rgb(153, 102, 255)");
        assert_eq!(value["options"]["plugins"]["legend"]["position"], "top");
        assert_eq!(value["options"]["responsive"], true);
    }
}

//! Chart.js configurations and the per-canvas chart registry.
//!
//! Configurations are plain serde structs serialised to the JSON shape
//! Chart.js expects. The registry owns at most one live chart per canvas and
//! always destroys the previous instance before constructing a new one.

use std::collections::HashMap;

use serde::Serialize;
use wasm_bindgen::{prelude::*, JsCast};
use web_sys::HtmlCanvasElement;

use crate::{config::CURRENCY_SYMBOL, error::Error};

const BAR_COLORS: [&str; 2] = ["#667eea", "#764ba2"];
const PIE_PALETTE: [&str; 6] = [
    "#ff6384", "#36a2eb", "#ffce56", "#4bc0c0", "#9966ff", "#ff9f40",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Pie,
    Line,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: Vec<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub background_color: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub border_dash: Vec<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scales: Option<Scales>,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            responsive: true,
            maintain_aspect_ratio: false,
            scales: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Scales {
    pub y: Axis,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    pub begin_at_zero: bool,
}

fn colors(palette: &[&str]) -> Vec<String> {
    palette.iter().map(|color| color.to_string()).collect()
}

/// Weekly against monthly spend.
pub fn expense_bar(weekly: f64, monthly: f64) -> ChartConfig {
    ChartConfig {
        kind: ChartKind::Bar,
        data: ChartData {
            labels: vec!["Weekly".to_string(), "Monthly".to_string()],
            datasets: vec![Dataset {
                label: Some(format!("Expenses ({CURRENCY_SYMBOL})")),
                data: vec![weekly, monthly],
                background_color: colors(&BAR_COLORS),
                ..Dataset::default()
            }],
        },
        options: ChartOptions::default(),
    }
}

/// Spend per category. Returns `None` when there is nothing to plot.
pub fn category_pie(categories: &[String], amounts: &[f64]) -> Option<ChartConfig> {
    if categories.is_empty() {
        return None;
    }

    Some(ChartConfig {
        kind: ChartKind::Pie,
        data: ChartData {
            labels: categories.to_vec(),
            datasets: vec![Dataset {
                data: amounts.to_vec(),
                background_color: colors(&PIE_PALETTE),
                ..Dataset::default()
            }],
        },
        options: ChartOptions::default(),
    })
}

/// Actual daily spend against the fitted trend, one label per point.
pub fn trend_line(labels: &[String], actual: &[f64], predicted: &[f64]) -> ChartConfig {
    ChartConfig {
        kind: ChartKind::Line,
        data: ChartData {
            labels: labels.to_vec(),
            datasets: vec![
                Dataset {
                    label: Some("Actual Spend".to_string()),
                    data: actual.to_vec(),
                    border_width: Some(2),
                    tension: Some(0.3),
                    ..Dataset::default()
                },
                Dataset {
                    label: Some("ML Trend".to_string()),
                    data: predicted.to_vec(),
                    border_width: Some(2),
                    border_dash: vec![6, 6],
                    tension: Some(0.3),
                    ..Dataset::default()
                },
            ],
        },
        options: ChartOptions {
            scales: Some(Scales {
                y: Axis {
                    begin_at_zero: true,
                },
            }),
            ..ChartOptions::default()
        },
    }
}

/// Something that can draw charts onto canvases.
pub trait ChartBackend {
    type Canvas;
    type Instance;

    /// Finds the canvas with the given element id, if the page has one.
    fn locate(&self, canvas_id: &str) -> Option<Self::Canvas>;
    fn create(&mut self, canvas: Self::Canvas, config: &ChartConfig)
        -> Result<Self::Instance, Error>;
    fn destroy(&mut self, instance: Self::Instance);
}

/// Maps each canvas id to the single chart currently drawn on it.
pub struct ChartRegistry<B: ChartBackend> {
    backend: B,
    live: HashMap<String, B::Instance>,
}

impl<B: ChartBackend> ChartRegistry<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            live: HashMap::new(),
        }
    }

    /// Draws `config` on `canvas_id`, destroying whatever was there first.
    ///
    /// Returns `Ok(false)` without touching the existing chart when the page
    /// has no such canvas.
    pub fn replace(&mut self, canvas_id: &str, config: &ChartConfig) -> Result<bool, Error> {
        let Some(canvas) = self.backend.locate(canvas_id) else {
            log::debug!("no canvas #{canvas_id}, skipping chart");
            return Ok(false);
        };

        if let Some(previous) = self.live.remove(canvas_id) {
            self.backend.destroy(previous);
        }

        let instance = self.backend.create(canvas, config)?;
        self.live.insert(canvas_id.to_string(), instance);
        log::debug!("rendered {:?} chart on #{canvas_id}", config.kind);
        Ok(true)
    }

    #[cfg(test)]
    pub fn is_live(&self, canvas_id: &str) -> bool {
        self.live.contains_key(canvas_id)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Destroys every chart, e.g. when the page holding the canvases goes
    /// away.
    pub fn clear(&mut self) {
        log::debug!("destroying {} charts", self.live_count());
        for (_, instance) in self.live.drain() {
            self.backend.destroy(instance);
        }
    }

    #[cfg(test)]
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

#[wasm_bindgen]
extern "C" {
    /// A Chart.js chart instance.
    #[wasm_bindgen(js_name = Chart)]
    pub type JsChart;

    #[wasm_bindgen(catch, constructor, js_class = "Chart")]
    fn new(canvas: &HtmlCanvasElement, config: &JsValue) -> Result<JsChart, JsValue>;

    #[wasm_bindgen(method)]
    fn destroy(this: &JsChart);
}

/// The global `Chart` constructor loaded by `index.html`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChartJs;

impl ChartBackend for ChartJs {
    type Canvas = HtmlCanvasElement;
    type Instance = JsChart;

    fn locate(&self, canvas_id: &str) -> Option<HtmlCanvasElement> {
        web_sys::window()?
            .document()?
            .get_element_by_id(canvas_id)?
            .dyn_into::<HtmlCanvasElement>()
            .ok()
    }

    fn create(
        &mut self,
        canvas: HtmlCanvasElement,
        config: &ChartConfig,
    ) -> Result<JsChart, Error> {
        let json = serde_json::to_string(config).map_err(|err| Error::Chart(err.to_string()))?;
        let options =
            js_sys::JSON::parse(&json).map_err(|err| Error::Chart(format!("{err:?}")))?;
        JsChart::new(&canvas, &options).map_err(|err| Error::Chart(format!("{err:?}")))
    }

    fn destroy(&mut self, instance: JsChart) {
        instance.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{ChartEvent, RecordingBackend};

    #[test]
    fn second_render_destroys_first() {
        let mut registry = ChartRegistry::new(RecordingBackend::with_canvases(&["mlChart"]));
        let config = trend_line(&["2024-05-01".to_string()], &[10.0], &[9.5]);

        registry.replace("mlChart", &config).unwrap();
        registry.replace("mlChart", &config).unwrap();

        assert_eq!(registry.live_count(), 1);
        assert_eq!(
            registry.backend().events(),
            vec![
                ChartEvent::Created("mlChart", 0),
                ChartEvent::Destroyed(0),
                ChartEvent::Created("mlChart", 1),
            ]
        );
        assert_eq!(registry.backend().alive(), vec![1]);
    }

    #[test]
    fn missing_canvas_is_a_no_op() {
        let mut registry =
            ChartRegistry::new(RecordingBackend::with_canvases(&["expenseChart"]));

        let drawn = registry
            .replace("categoryChart", &expense_bar(10.0, 40.0))
            .unwrap();

        assert!(!drawn);
        assert!(!registry.is_live("categoryChart"));
        assert!(registry.backend().events().is_empty());
    }

    #[test]
    fn canvases_are_independent() {
        let mut registry = ChartRegistry::new(RecordingBackend::with_canvases(&[
            "expenseChart",
            "categoryChart",
        ]));

        registry
            .replace("expenseChart", &expense_bar(1.0, 2.0))
            .unwrap();
        registry
            .replace(
                "categoryChart",
                &category_pie(&["Food".to_string()], &[5.0]).unwrap(),
            )
            .unwrap();
        registry.clear();

        assert_eq!(registry.live_count(), 0);
        assert!(registry.backend().alive().is_empty());
    }

    #[test]
    fn bar_config_matches_chart_js_shape() {
        let json = serde_json::to_value(expense_bar(120.0, 480.5)).unwrap();

        assert_eq!(json["type"], "bar");
        assert_eq!(json["data"]["labels"][1], "Monthly");
        assert_eq!(json["data"]["datasets"][0]["label"], "Expenses (₹)");
        assert_eq!(json["data"]["datasets"][0]["backgroundColor"][0], "#667eea");
        assert_eq!(json["options"]["maintainAspectRatio"], false);
        assert!(json["options"].get("scales").is_none());
    }

    #[test]
    fn trend_line_starts_at_zero_with_dashed_prediction() {
        let labels = vec!["d1".to_string(), "d2".to_string()];
        let json = serde_json::to_value(trend_line(&labels, &[3.0, 4.0], &[3.1, 3.9])).unwrap();

        assert_eq!(json["options"]["scales"]["y"]["beginAtZero"], true);
        assert_eq!(json["data"]["datasets"][1]["label"], "ML Trend");
        assert_eq!(json["data"]["datasets"][1]["borderDash"][0], 6);
        assert!(json["data"]["datasets"][0].get("borderDash").is_none());
    }

    #[test]
    fn empty_categories_produce_no_pie() {
        assert_eq!(category_pie(&[], &[]), None);
    }
}

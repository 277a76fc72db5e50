//! Chart.js configurations for the price and dividend charts.

use finanalyse_core::{DividendData, PriceHistory};
use serde::Serialize;
use serde_json::{json, Value};

use crate::html::escape_html;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub label: String,
    pub data: Vec<f64>,
    pub color: &'static str,
    pub fill: Option<&'static str>,
    pub begin_at_zero: bool,
}

impl ChartSpec {
    pub fn price(history: &PriceHistory) -> Self {
        Self {
            kind: ChartKind::Line,
            labels: history.dates.clone(),
            label: "Price ($)".to_string(),
            data: history.prices.clone(),
            color: "#3b82f6",
            fill: Some("rgba(59, 130, 246, 0.1)"),
            begin_at_zero: false,
        }
    }

    pub fn dividends(dividends: &DividendData) -> Self {
        let history = &dividends.dividend_history;
        Self {
            kind: ChartKind::Bar,
            labels: history.years.iter().map(|y| y.to_string()).collect(),
            label: "Annual dividend ($)".to_string(),
            data: history.amounts.clone(),
            color: "#10b981",
            fill: None,
            begin_at_zero: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Chart.js `{type, data, options}` object.
    pub fn config(&self) -> Value {
        let mut dataset = json!({
            "label": self.label,
            "data": self.data,
        });
        match (self.kind, self.fill) {
            (ChartKind::Line, Some(fill)) => {
                dataset["borderColor"] = json!(self.color);
                dataset["fill"] = json!(true);
                dataset["backgroundColor"] = json!(fill);
            }
            (ChartKind::Line, None) => dataset["borderColor"] = json!(self.color),
            (ChartKind::Bar, _) => dataset["backgroundColor"] = json!(self.color),
        }

        let mut options = json!({ "responsive": true, "maintainAspectRatio": false });
        if self.begin_at_zero {
            options["scales"] = json!({ "y": { "beginAtZero": true } });
        }

        json!({
            "type": self.kind,
            "data": { "labels": self.labels, "datasets": [dataset] },
            "options": options,
        })
    }

    /// Canvas plus the script that draws on it. `</` is escaped so label text
    /// cannot close the script element.
    pub fn render(&self, canvas_id: &str, title: &str) -> String {
        let body = if self.is_empty() {
            r#"<p class="text-sm text-gray-500">No data available.</p>"#.to_string()
        } else {
            let config = self.config().to_string().replace("</", "<\\/");
            format!(
                r#"<div class="h-64"><canvas id="{id}"></canvas></div><script>new Chart(document.getElementById("{id}"), {config});</script>"#,
                id = escape_html(canvas_id),
                config = config
            )
        };
        format!(
            r#"<div class="bg-white p-6 rounded-xl shadow"><h3 class="text-lg font-semibold text-gray-800 mb-4">{}</h3>{}</div>"#,
            escape_html(title),
            body
        )
    }
}

//! Vega-Lite chart rendering
//!
//! Charts are written as self-contained Vega-Lite v5 documents with inline
//! data, viewable in any Vega-Lite capable viewer or convertible to PNG/SVG
//! with the standard `vl2png`/`vl2svg` tools.

use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde_json::{Map, Value, json};

use crate::error::util::safe_create_file;
use crate::error::{AnalysisError, Result};
use crate::report::chart::{Axis, Channel, ChartSpec, Mark};
use crate::report::ChartRenderer;

/// Vega-Lite schema URL written into every document
pub const VEGA_LITE_SCHEMA: &str = "https://vega.github.io/schema/vega-lite/v5.json";

/// Writes charts as Vega-Lite JSON
#[derive(Debug, Clone)]
pub struct VegaLiteRenderer {
    /// Indent the JSON output
    pub pretty: bool,
    pub width: u32,
    pub height: u32,
}

impl Default for VegaLiteRenderer {
    fn default() -> Self {
        Self {
            pretty: true,
            width: 640,
            height: 400,
        }
    }
}

fn encode_channel(channel: &Channel) -> Value {
    let mut encoding = Map::new();
    encoding.insert("field".into(), json!(channel.field));
    encoding.insert("type".into(), json!(channel.kind));
    encoding.insert("title".into(), json!(channel.title));
    if let Some(sort_field) = &channel.sort_by {
        encoding.insert("sort".into(), json!({ "field": sort_field }));
    }
    Value::Object(encoding)
}

fn mark_type(mark: Mark) -> Value {
    match mark {
        Mark::Line => json!({ "type": "line", "point": true }),
        Mark::Bar => json!({ "type": "bar" }),
        Mark::Point => json!({ "type": "point", "filled": true, "size": 60 }),
    }
}

fn rule_layer(axis: Axis, value: f64, label: &str) -> Value {
    let channel = match axis {
        Axis::X => "x",
        Axis::Y => "y",
    };
    json!({
        "mark": { "type": "rule", "strokeDash": [4, 4], "color": "gray" },
        "encoding": { channel: { "datum": value } },
        "description": label,
    })
}

impl VegaLiteRenderer {
    /// Build the Vega-Lite document for a chart
    #[must_use]
    pub fn document(&self, chart: &ChartSpec) -> Value {
        let mut encoding = Map::new();
        encoding.insert("x".into(), encode_channel(&chart.x));
        encoding.insert("y".into(), encode_channel(&chart.y));
        if let Some(color) = &chart.color {
            encoding.insert("color".into(), encode_channel(color));
        }
        if let Some(offset) = &chart.offset {
            encoding.insert("xOffset".into(), encode_channel(offset));
        }
        if let Some(column) = &chart.column {
            encoding.insert("column".into(), encode_channel(column));
        }
        if !chart.tooltip.is_empty() {
            let tooltip: Vec<Value> = chart
                .tooltip
                .iter()
                .map(|field| json!({ "field": field }))
                .collect();
            encoding.insert("tooltip".into(), Value::Array(tooltip));
        }

        let mut document = Map::new();
        document.insert("$schema".into(), json!(VEGA_LITE_SCHEMA));
        document.insert("title".into(), json!(chart.title));
        document.insert("data".into(), json!({ "values": chart.rows }));

        if chart.column.is_none() {
            document.insert("width".into(), json!(self.width));
            document.insert("height".into(), json!(self.height));
        }

        let main = json!({ "mark": mark_type(chart.mark), "encoding": encoding });
        if chart.annotations.is_empty() {
            if let Value::Object(view) = main {
                document.extend(view);
            }
        } else {
            let mut layers = vec![main];
            layers.extend(
                chart
                    .annotations
                    .iter()
                    .map(|a| rule_layer(a.axis, a.value, &a.label)),
            );
            document.insert("layer".into(), Value::Array(layers));
        }

        Value::Object(document)
    }
}

impl ChartRenderer for VegaLiteRenderer {
    fn render(&self, chart: &ChartSpec, target: &Path) -> Result<PathBuf> {
        let document = self.document(chart);
        let mut writer = BufWriter::new(safe_create_file(target)?);
        if self.pretty {
            serde_json::to_writer_pretty(&mut writer, &document)?;
        } else {
            serde_json::to_writer(&mut writer, &document)?;
        }
        writer.flush().map_err(|e| AnalysisError::io(target, e))?;
        log::info!("Wrote chart '{}' to {}", chart.title, target.display());
        Ok(target.to_path_buf())
    }
}

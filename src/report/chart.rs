//! Chart specifications built from analysis results
//!
//! A [`ChartSpec`] is renderer-neutral: plain rows plus the fields each
//! visual channel reads.

use serde::Serialize;
use serde_json::{Value, json};

use crate::algorithm::{MacroSeries, MicroProfile, Prioritization};
use crate::models::AgeBand;

/// Primary mark of a chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    Line,
    Bar,
    Point,
}

/// How a channel's field is measured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Quantitative,
    Ordinal,
    Nominal,
}

/// One visual channel (axis, colour, offset, facet)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Channel {
    pub field: String,
    pub title: String,
    pub kind: FieldKind,
    /// Field whose values order this channel, when not the field itself
    pub sort_by: Option<String>,
}

impl Channel {
    #[must_use]
    pub fn new(field: &str, title: &str, kind: FieldKind) -> Self {
        Self {
            field: field.to_string(),
            title: title.to_string(),
            kind,
            sort_by: None,
        }
    }

    #[must_use]
    pub fn sorted_by(mut self, field: &str) -> Self {
        self.sort_by = Some(field.to_string());
        self
    }
}

/// Axis a reference line is drawn across
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Axis {
    X,
    Y,
}

/// Dashed reference line at a fixed value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub axis: Axis,
    pub value: f64,
    pub label: String,
}

/// A renderer-neutral chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub mark: Mark,
    pub x: Channel,
    pub y: Channel,
    pub color: Option<Channel>,
    /// Grouping within one x position (grouped bars)
    pub offset: Option<Channel>,
    /// Small multiples, one panel per value
    pub column: Option<Channel>,
    pub tooltip: Vec<String>,
    pub rows: Vec<Value>,
    pub annotations: Vec<Annotation>,
}

impl ChartSpec {
    fn new(title: String, mark: Mark, x: Channel, y: Channel) -> Self {
        Self {
            title,
            mark,
            x,
            y,
            color: None,
            offset: None,
            column: None,
            tooltip: Vec::new(),
            rows: Vec::new(),
            annotations: Vec::new(),
        }
    }
}

/// Headline prevalence over time, one line per location
#[must_use]
pub fn macro_trend_chart(series: &[MacroSeries]) -> ChartSpec {
    let mut chart = ChartSpec::new(
        "Depression prevalence over time".to_string(),
        Mark::Line,
        Channel::new("year", "Year", FieldKind::Ordinal),
        Channel::new("value", "Prevalence (%)", FieldKind::Quantitative),
    );
    chart.color = Some(Channel::new("location", "Location", FieldKind::Nominal));
    chart.tooltip = ["location", "year", "value", "lower", "upper"]
        .map(String::from)
        .to_vec();
    chart.rows = series
        .iter()
        .flat_map(|s| {
            s.points.iter().map(|p| {
                json!({
                    "location": s.location,
                    "year": p.year,
                    "value": p.value,
                    "lower": p.lower,
                    "upper": p.upper,
                })
            })
        })
        .collect();
    chart
}

/// Male versus female prevalence by age band, one panel per location
#[must_use]
pub fn micro_profile_chart(profiles: &[MicroProfile]) -> ChartSpec {
    let year = profiles.first().map(|p| p.year);
    let title = match year {
        Some(year) => format!("Depression prevalence by age and sex ({year})"),
        None => "Depression prevalence by age and sex".to_string(),
    };

    let mut chart = ChartSpec::new(
        title,
        Mark::Bar,
        Channel::new("age", "Age group", FieldKind::Nominal).sorted_by("age_order"),
        Channel::new("value", "Prevalence (%)", FieldKind::Quantitative),
    );
    chart.color = Some(Channel::new("sex", "Sex", FieldKind::Nominal));
    chart.offset = Some(Channel::new("sex", "Sex", FieldKind::Nominal));
    chart.column = Some(Channel::new("location", "Location", FieldKind::Nominal));
    chart.tooltip = ["location", "age", "sex", "value"].map(String::from).to_vec();

    for profile in profiles {
        for (order, band) in profile.bands.iter().enumerate() {
            let start = AgeBand::new(&band.age).start();
            for (sex, value) in [("Male", band.male), ("Female", band.female)] {
                let Some(value) = value else { continue };
                chart.rows.push(json!({
                    "location": profile.location,
                    "age": band.age,
                    "age_order": order,
                    "age_start": start,
                    "sex": sex,
                    "value": value,
                }));
            }
        }
    }
    chart
}

/// Need against capacity for every joined location, thresholds drawn as rules
#[must_use]
pub fn actionable_scatter_chart(prioritization: &Prioritization) -> ChartSpec {
    let mut chart = ChartSpec::new(
        format!(
            "Depression prevalence vs psychiatrists per 100k ({})",
            prioritization.year
        ),
        Mark::Point,
        Channel::new("capacity_value", "Psychiatrists per 100k", FieldKind::Quantitative),
        Channel::new("need_value", "Prevalence (%)", FieldKind::Quantitative),
    );
    chart.color = Some(Channel::new(
        "critical",
        "High need, low capacity",
        FieldKind::Nominal,
    ));
    chart.tooltip = ["location", "need_value", "capacity_value", "priority_index"]
        .map(String::from)
        .to_vec();
    chart.rows = prioritization
        .joined
        .iter()
        .map(|r| {
            json!({
                "location": r.location,
                "need_value": r.need_value,
                "capacity_value": r.capacity_value,
                "priority_index": r.priority_index,
                "critical": r.critical,
            })
        })
        .collect();

    if let Some(value) = prioritization.capacity_p25 {
        chart.annotations.push(Annotation {
            axis: Axis::X,
            value,
            label: "Capacity 25th percentile".to_string(),
        });
    }
    if let Some(value) = prioritization.need_p75 {
        chart.annotations.push(Annotation {
            axis: Axis::Y,
            value,
            label: "Prevalence 75th percentile".to_string(),
        });
    }
    chart
}

/// Shortlist ranked by priority index
///
/// The title counts the records actually shown.
#[must_use]
pub fn actionable_bar_chart(prioritization: &Prioritization) -> ChartSpec {
    let mut chart = ChartSpec::new(
        format!(
            "Top {} priority locations: prevalence per psychiatrist capacity ({})",
            prioritization.top.len(),
            prioritization.year
        ),
        Mark::Bar,
        Channel::new("priority_index", "Priority index", FieldKind::Quantitative),
        Channel::new("location", "Location", FieldKind::Nominal).sorted_by("rank"),
    );
    chart.tooltip = ["rank", "location", "priority_index", "need_value", "capacity_value"]
        .map(String::from)
        .to_vec();
    chart.rows = prioritization
        .top
        .iter()
        .enumerate()
        .map(|(idx, r)| {
            json!({
                "rank": idx + 1,
                "location": r.location,
                "priority_index": r.priority_index,
                "need_value": r.need_value,
                "capacity_value": r.capacity_value,
            })
        })
        .collect();
    chart
}

//! Chart model, visual type cycle, and the handle trait the cycler drives

use std::fmt;

use serde::Serialize;

use super::payload::{ChartPayload, Series};

/// Visual representation of a chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    Bar,
    Doughnut,
    Pie,
    Line,
}

impl ChartType {
    pub const ALL: [ChartType; 4] = [
        ChartType::Bar,
        ChartType::Doughnut,
        ChartType::Pie,
        ChartType::Line,
    ];

    /// Successor in the click cycle: bar → doughnut → pie → line → bar
    pub fn next(self) -> Self {
        match self {
            ChartType::Bar => ChartType::Doughnut,
            ChartType::Doughnut => ChartType::Pie,
            ChartType::Pie => ChartType::Line,
            ChartType::Line => ChartType::Bar,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartType::Bar => "bar",
            ChartType::Doughnut => "doughnut",
            ChartType::Pie => "pie",
            ChartType::Line => "line",
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Library-neutral interface to a rendered chart
pub trait ChartHandle {
    fn chart_type(&self) -> ChartType;
    fn set_chart_type(&mut self, chart_type: ChartType);
    /// Mark the chart for redraw on the next frame
    fn redraw(&mut self);
}

/// A chart bound to a display region
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedChart {
    pub region: &'static str,
    pub chart_type: ChartType,
    pub labels: Vec<String>,
    pub series: Vec<Series>,
    /// Bumped on every redraw request
    pub revision: u64,
}

impl RenderedChart {
    pub fn new(region: &'static str, chart_type: ChartType, payload: ChartPayload) -> Self {
        Self {
            region,
            chart_type,
            labels: payload.labels,
            series: payload.data_set,
            revision: 0,
        }
    }

    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    pub fn series_count(&self) -> usize {
        self.series.len()
    }

    /// Largest value across all series (0 for an empty chart)
    pub fn max_value(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.data.iter().copied())
            .fold(0.0, f64::max)
    }

    /// Values at a label index, one per series
    pub fn column(&self, index: usize) -> Vec<f64> {
        self.series
            .iter()
            .map(|s| s.data.get(index).copied().unwrap_or(0.0))
            .collect()
    }
}

impl ChartHandle for RenderedChart {
    fn chart_type(&self) -> ChartType {
        self.chart_type
    }

    fn set_chart_type(&mut self, chart_type: ChartType) {
        self.chart_type = chart_type;
    }

    fn redraw(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

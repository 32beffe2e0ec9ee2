//! JSON Export
//!
//! Writes a snapshot of a page: rendered charts plus count regions.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use super::ExportError;
use crate::domain::{ChartType, PageState, RenderedChart, Series, COUNT_REGIONS};

#[derive(Serialize)]
struct ExportableChart<'a> {
    region: &'a str,
    chart_type: ChartType,
    labels: &'a [String],
    #[serde(rename = "dataSet")]
    data_set: &'a [Series],
}

impl<'a> From<&'a RenderedChart> for ExportableChart<'a> {
    fn from(chart: &'a RenderedChart) -> Self {
        Self {
            region: chart.region,
            chart_type: chart.chart_type,
            labels: &chart.labels,
            data_set: &chart.series,
        }
    }
}

#[derive(Serialize)]
struct ExportablePage<'a> {
    page: &'a str,
    exported_at: String,
    charts: Vec<ExportableChart<'a>>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    counts: BTreeMap<&'static str, &'a str>,
}

/// Write the page snapshot, returns the number of charts written
pub fn write_page(path: &Path, state: &PageState) -> Result<usize, ExportError> {
    let counts = COUNT_REGIONS
        .into_iter()
        .filter_map(|region| state.region_text(region).map(|text| (region, text)))
        .collect();

    let snapshot = ExportablePage {
        page: state.page.title(),
        exported_at: chrono::Local::now().to_rfc3339(),
        charts: state.charts().map(ExportableChart::from).collect(),
        counts,
    };

    let json = serde_json::to_string_pretty(&snapshot)?;
    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;
    Ok(snapshot.charts.len())
}

//! CSV Export
//!
//! One row per (chart, series, label) value.

use std::path::Path;

use super::ExportError;
use crate::domain::RenderedChart;

/// Write chart values to a CSV file, returns the number of data rows
pub fn write_charts(path: &Path, charts: &[&RenderedChart]) -> Result<usize, ExportError> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["region", "chart_type", "series", "label", "value"])?;

    let mut rows = 0;
    for chart in charts {
        for series in &chart.series {
            for (label, value) in chart.labels.iter().zip(&series.data) {
                wtr.write_record([
                    chart.region,
                    chart.chart_type.as_str(),
                    series.label.as_str(),
                    label.as_str(),
                    value.to_string().as_str(),
                ])?;
                rows += 1;
            }
        }
    }

    wtr.flush()?;
    Ok(rows)
}

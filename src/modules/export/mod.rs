//! Export Module
//!
//! 'e' writes the active page to the export directory:
//! - `<page>-<timestamp>.json`: charts with their current type, plus count tiles
//! - `<page>-<timestamp>.csv`: one row per chart value

mod csv_export;
mod json_export;

use std::fs;
use std::path::Path;

use chrono::Local;
use thiserror::Error;

use crate::core::{Action, NotifyLevel};
use crate::domain::PageState;

pub use csv_export::write_charts;
pub use json_export::write_page;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Timestamped file stem shared by the JSON and CSV of one export.
/// A numeric suffix keeps a second export in the same second from overwriting the first.
fn export_stem(export_dir: &Path, prefix: &str) -> String {
    let base = format!("{}-{}", prefix, Local::now().format("%Y-%m-%d-%H%M%S"));
    let taken = |stem: &str| {
        ["json", "csv"]
            .iter()
            .any(|ext| export_dir.join(format!("{stem}.{ext}")).exists())
    };
    if !taken(&base) {
        return base;
    }
    let mut n = 2;
    loop {
        let stem = format!("{base}-{n}");
        if !taken(&stem) {
            return stem;
        }
        n += 1;
    }
}

/// Export a page's rendered data into `export_dir`
pub fn export_page(state: &PageState, export_dir: &Path) -> Action {
    let charts: Vec<_> = state.charts().collect();
    if charts.is_empty() && state.region_text(crate::domain::COUNT_REGIONS[0]).is_none() {
        return Action::Notify(
            format!("Nothing rendered on the {} page yet", state.page),
            NotifyLevel::Warn,
        );
    }

    if let Err(e) = fs::create_dir_all(export_dir) {
        return Action::Notify(
            format!("Failed to create export directory: {}", e),
            NotifyLevel::Error,
        );
    }

    let prefix = state.page.title().to_lowercase();
    let stem = export_stem(export_dir, &prefix);
    let json_name = format!("{stem}.json");
    let csv_name = format!("{stem}.csv");

    let result = write_page(&export_dir.join(&json_name), state)
        .and_then(|count| write_charts(&export_dir.join(&csv_name), &charts).map(|rows| (count, rows)));

    match result {
        Ok((count, rows)) => {
            tracing::info!(dir = %export_dir.display(), charts = count, rows, "page exported");
            Action::Notify(
                format!(
                    "Exported {} charts ({} values) to {}",
                    count,
                    rows,
                    export_dir.join(&json_name).display()
                ),
                NotifyLevel::Info,
            )
        }
        Err(e) => {
            tracing::warn!(error = %e, "export failed");
            Action::Notify(format!("Export failed: {}", e), NotifyLevel::Error)
        }
    }
}

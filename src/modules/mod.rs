//! UI Modules
//!
//! - dashboard: key/mouse bindings for the chart grid
//! - export: JSON and CSV snapshots of the active page

pub mod dashboard;
pub mod export;

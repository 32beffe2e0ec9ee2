//! hrdash: terminal rendition of the HR employee and recruitment dashboards
//!
//! Charts are fetched as JSON from the HR server, drawn with ratatui, and
//! cycled between bar, doughnut, pie and line by clicking a card title.

pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod infrastructure;
pub mod logging;
pub mod modules;
pub mod ui;

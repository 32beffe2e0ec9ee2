use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::domain::{Page, WidgetKind};

#[derive(Debug, Clone)]
pub struct UiAreas {
    pub size: Rect,
    pub header: Rect,
    /// Count tile strip, only on pages that have one
    pub tiles: Option<Rect>,
    /// One card per chart, in `Page::charts` order
    pub charts: Vec<Rect>,
    pub status_line: Rect,
    pub key_line: Rect,
}

pub fn areas(size: Rect, page: Page) -> UiAreas {
    let has_tiles = page
        .widgets()
        .iter()
        .any(|w| w.kind() == WidgetKind::Counts);
    let chart_count = page.charts().len().max(1) as u32;

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(if has_tiles { 3 } else { 0 }),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(size);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, chart_count); chart_count as usize])
        .split(vertical[2])
        .to_vec();

    let footer_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(vertical[3]);

    UiAreas {
        size,
        header: vertical[0],
        tiles: has_tiles.then_some(vertical[1]),
        charts,
        status_line: footer_chunks[0],
        key_line: footer_chunks[1],
    }
}

//! Dashboard module - key and mouse bindings for the chart grid

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::core::{Action, Module};
use crate::domain::{Page, WidgetId};

/// Input state of the dashboard view.
///
/// Card title rows are recorded on every draw so a later click can be matched
/// against what is actually on screen.
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    title_areas: Vec<(WidgetId, Rect)>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_title_areas(&mut self) {
        self.title_areas.clear();
    }

    pub fn push_title_area(&mut self, widget: WidgetId, area: Rect) {
        self.title_areas.push((widget, area));
    }

    /// Card whose title row contains the cell
    pub fn title_at(&self, column: u16, row: u16) -> Option<WidgetId> {
        self.title_areas
            .iter()
            .find(|(_, area)| {
                row == area.y && column >= area.x && column < area.x.saturating_add(area.width)
            })
            .map(|(widget, _)| *widget)
    }
}

impl Module for Dashboard {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Action::Quit;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Char('t') | KeyCode::Enter | KeyCode::Char(' ') => Action::CycleChart,
            KeyCode::Tab | KeyCode::BackTab => Action::NextPage,
            KeyCode::Char(c) if c == Page::Employee.shortcut() => {
                Action::SwitchPage(Page::Employee)
            }
            KeyCode::Char(c) if c == Page::Recruitment.shortcut() => {
                Action::SwitchPage(Page::Recruitment)
            }
            KeyCode::Char('r') => Action::Reload,
            KeyCode::Char('e') => Action::Export,
            KeyCode::Char('?') => Action::ToggleHelp,
            _ => Action::None,
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Action {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Action::None;
        }
        // Any card title cycles the page's first chart, whichever card it sits on
        match self.title_at(mouse.column, mouse.row) {
            Some(widget) => {
                tracing::debug!(clicked = widget.region(), "chart title clicked");
                Action::CycleChart
            }
            None => Action::None,
        }
    }
}

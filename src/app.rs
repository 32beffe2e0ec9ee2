use std::path::PathBuf;

use crate::core::{Action, NotifyLevel};
use crate::domain::{Page, PageState, WidgetId, WidgetKind};
use crate::infrastructure::{RuntimeCommand, RuntimeEvent};
use crate::modules::dashboard::Dashboard;
use crate::modules::export;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warn,
    Error,
}

impl From<NotifyLevel> for StatusLevel {
    fn from(level: NotifyLevel) -> Self {
        match level {
            NotifyLevel::Info => StatusLevel::Info,
            NotifyLevel::Warn => StatusLevel::Warn,
            NotifyLevel::Error => StatusLevel::Error,
        }
    }
}

/// Page controller: owns both pages' widget state and the UI flags around them
pub struct App {
    pub active_page: Page,
    pages: Vec<PageState>,
    pub dashboard: Dashboard,
    pub base_url: String,
    pub export_dir: PathBuf,
    pub help_open: bool,
    pub should_quit: bool,
    pub status: String,
    pub status_level: StatusLevel,
    load_request: Option<Vec<WidgetId>>,
    /// Bumped on every load; results from older loads are dropped
    generation: u64,
    in_flight: usize,
}

impl App {
    pub fn new(start_page: Page, base_url: impl Into<String>, export_dir: PathBuf) -> Self {
        Self {
            active_page: start_page,
            pages: Page::ALL.into_iter().map(PageState::new).collect(),
            dashboard: Dashboard::new(),
            base_url: base_url.into(),
            export_dir,
            help_open: false,
            should_quit: false,
            status: String::new(),
            status_level: StatusLevel::Info,
            load_request: None,
            generation: 0,
            in_flight: 0,
        }
    }

    pub fn page(&self, page: Page) -> &PageState {
        self.pages
            .iter()
            .find(|state| state.page == page)
            .unwrap_or(&self.pages[0])
    }

    fn page_mut(&mut self, page: Page) -> &mut PageState {
        let index = self
            .pages
            .iter()
            .position(|state| state.page == page)
            .unwrap_or(0);
        &mut self.pages[index]
    }

    pub fn current(&self) -> &PageState {
        self.page(self.active_page)
    }

    pub fn set_status(&mut self, message: impl Into<String>, level: StatusLevel) {
        self.status = message.into();
        self.status_level = level;
    }

    /// Queue a fetch of every widget on every page, superseding any load in flight
    pub fn request_load(&mut self) {
        let widgets: Vec<WidgetId> = WidgetId::ALL.to_vec();
        self.generation += 1;
        for state in &mut self.pages {
            state.mark_all_pending();
        }
        self.in_flight = widgets.len();
        self.load_request = Some(widgets);
        self.set_status(format!("Loading from {}…", self.base_url), StatusLevel::Info);
    }

    /// The queued load as a worker command
    pub fn take_load_request(&mut self) -> Option<RuntimeCommand> {
        self.load_request.take().map(|widgets| RuntimeCommand::Load {
            generation: self.generation,
            widgets,
        })
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn loading(&self) -> bool {
        self.in_flight > 0
    }

    /// Apply a fetch outcome from the runtime worker
    pub fn apply_runtime_event(&mut self, event: RuntimeEvent) {
        if let Some(generation) = event.generation() {
            if generation != self.generation {
                tracing::debug!(
                    generation,
                    current = self.generation,
                    "dropping result of a superseded load"
                );
                return;
            }
        }

        match event {
            RuntimeEvent::ChartReady {
                widget, payload, ..
            } => {
                let WidgetKind::Chart(initial) = widget.kind() else {
                    tracing::warn!(region = widget.region(), "chart payload for a count widget");
                    self.page_mut(widget.page())
                        .mark_failed(widget, "not a chart endpoint");
                    self.finish_one();
                    return;
                };
                let chart = self
                    .page_mut(widget.page())
                    .render_chart(widget, initial, payload);
                tracing::info!(
                    region = chart.region,
                    chart_type = %chart.chart_type,
                    labels = chart.label_count(),
                    series = chart.series_count(),
                    "chart rendered"
                );
                self.finish_one();
            }
            RuntimeEvent::CountsReady { payload, .. } => {
                self.page_mut(WidgetId::EmployeeCount.page())
                    .render_counts(&payload);
                self.finish_one();
            }
            RuntimeEvent::FetchFailed {
                widget, message, ..
            } => {
                self.page_mut(widget.page()).mark_failed(widget, message.clone());
                self.set_status(
                    format!("{} unavailable: {}", widget.title(), message),
                    StatusLevel::Warn,
                );
                self.finish_one();
            }
            RuntimeEvent::Error { message } => {
                self.in_flight = 0;
                self.set_status(message, StatusLevel::Error);
            }
        }
    }

    fn finish_one(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
        if self.in_flight == 0 && self.status_level == StatusLevel::Info {
            self.set_status("Dashboard loaded", StatusLevel::Info);
        }
    }

    /// Carry out an action returned by a module
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::CycleChart => {
                let page = self.active_page;
                match self.page_mut(page).cycle() {
                    Ok(chart_type) => {
                        tracing::debug!(%chart_type, "chart type cycled");
                        self.set_status(format!("Chart type: {chart_type}"), StatusLevel::Info);
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "cycle ignored");
                        self.set_status(err.to_string(), StatusLevel::Warn);
                    }
                }
            }
            Action::SwitchPage(page) => self.active_page = page,
            Action::NextPage => self.active_page = self.active_page.next(),
            Action::Reload => self.request_load(),
            Action::Export => {
                let action = export::export_page(self.current(), &self.export_dir);
                self.apply(action);
            }
            Action::ToggleHelp => self.help_open = !self.help_open,
            Action::Notify(message, level) => self.set_status(message, level.into()),
            Action::Quit => self.should_quit = true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChartPayload, ChartType, Series, WidgetStatus};

    fn app() -> App {
        App::new(Page::Employee, "http://hr.local", PathBuf::from("/nonexistent"))
    }

    fn doughnut_payload() -> ChartPayload {
        ChartPayload {
            data_set: vec![Series {
                label: "Employees".into(),
                data: vec![10.0, 4.0],
            }],
            labels: vec!["Active".into(), "Inactive".into()],
        }
    }

    #[test]
    fn test_load_request_covers_every_widget() {
        let mut app = app();
        app.request_load();
        assert!(app.loading());
        match app.take_load_request() {
            Some(RuntimeCommand::Load { generation, widgets }) => {
                assert_eq!(generation, app.generation());
                assert_eq!(widgets.len(), 5);
            }
            other => panic!("expected a load, got {other:?}"),
        }
        assert!(app.take_load_request().is_none());
    }

    #[test]
    fn test_cycle_before_render_warns() {
        let mut app = app();
        app.apply(Action::CycleChart);
        assert_eq!(app.status_level, StatusLevel::Warn);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_events_render_into_owning_page() {
        let mut app = app();
        app.request_load();
        app.apply_runtime_event(RuntimeEvent::ChartReady {
            generation: app.generation(),
            widget: WidgetId::Employees,
            payload: doughnut_payload(),
        });
        app.apply_runtime_event(RuntimeEvent::FetchFailed {
            generation: app.generation(),
            widget: WidgetId::Pipeline,
            message: "HTTP 500".into(),
        });

        let chart = app.page(Page::Employee).chart("totalEmployees").unwrap();
        assert_eq!(chart.chart_type, ChartType::Doughnut);
        assert!(matches!(
            app.page(Page::Recruitment).status(WidgetId::Pipeline),
            Some(WidgetStatus::Failed(_))
        ));
        assert_eq!(app.status_level, StatusLevel::Warn);
    }

    #[test]
    fn test_cycle_targets_active_page() {
        let mut app = app();
        app.apply_runtime_event(RuntimeEvent::ChartReady {
            generation: app.generation(),
            widget: WidgetId::Employees,
            payload: doughnut_payload(),
        });
        app.apply(Action::CycleChart);
        assert_eq!(
            app.current().chart("totalEmployees").unwrap().chart_type,
            ChartType::Pie
        );

        app.apply(Action::NextPage);
        app.apply(Action::CycleChart);
        assert_eq!(app.status_level, StatusLevel::Warn);
        assert_eq!(
            app.page(Page::Employee).chart("totalEmployees").unwrap().chart_type,
            ChartType::Pie
        );
    }

    #[test]
    fn test_all_widgets_done_clears_loading() {
        let mut app = app();
        app.request_load();
        for widget in WidgetId::ALL {
            app.apply_runtime_event(RuntimeEvent::FetchFailed {
                generation: app.generation(),
                widget,
                message: "connection refused".into(),
            });
        }
        assert!(!app.loading());
    }

    #[test]
    fn test_reload_drops_superseded_batch() {
        let mut app = app();
        app.request_load();
        let first = app.generation();
        assert!(app.take_load_request().is_some());
        app.apply(Action::Reload);
        assert!(app.take_load_request().is_some());

        for widget in WidgetId::ALL {
            app.apply_runtime_event(RuntimeEvent::FetchFailed {
                generation: first,
                widget,
                message: "stale".into(),
            });
        }
        assert!(app.loading());
        assert_eq!(
            app.page(Page::Recruitment).status(WidgetId::Pipeline),
            Some(&WidgetStatus::Pending)
        );
        assert!(!app.status.contains("stale"));

        app.apply_runtime_event(RuntimeEvent::ChartReady {
            generation: first,
            widget: WidgetId::Employees,
            payload: doughnut_payload(),
        });
        assert!(app.page(Page::Employee).chart("totalEmployees").is_none());

        for widget in WidgetId::ALL {
            app.apply_runtime_event(RuntimeEvent::FetchFailed {
                generation: app.generation(),
                widget,
                message: "connection refused".into(),
            });
        }
        assert!(!app.loading());
    }

    #[test]
    fn test_chart_payload_for_count_widget_is_not_drawn() {
        let mut app = app();
        app.request_load();
        app.apply_runtime_event(RuntimeEvent::ChartReady {
            generation: app.generation(),
            widget: WidgetId::EmployeeCount,
            payload: doughnut_payload(),
        });
        let page = app.page(Page::Employee);
        assert_eq!(page.charts().count(), 0);
        assert!(matches!(
            page.status(WidgetId::EmployeeCount),
            Some(WidgetStatus::Failed(_))
        ));
    }
}

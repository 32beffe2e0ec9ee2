//! Per-page widget state: rendered chart handles, count regions, the type cycler

use std::collections::BTreeMap;

use thiserror::Error;

use super::chart::{ChartHandle, ChartType, RenderedChart};
use super::payload::{ChartPayload, CountPayload};
use super::widget::{Page, WidgetId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CycleError {
    #[error("no chart rendered in '{region}' yet")]
    NoChart { region: &'static str },
}

/// Load status of a single widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetStatus {
    Pending,
    Ready,
    Failed(String),
}

/// State owned by the app for one dashboard page
#[derive(Debug, Clone)]
pub struct PageState {
    pub page: Page,
    charts: BTreeMap<&'static str, RenderedChart>,
    regions: BTreeMap<&'static str, String>,
    status: BTreeMap<WidgetId, WidgetStatus>,
}

impl PageState {
    pub fn new(page: Page) -> Self {
        let status = page
            .widgets()
            .into_iter()
            .map(|w| (w, WidgetStatus::Pending))
            .collect();
        Self {
            page,
            charts: BTreeMap::new(),
            regions: BTreeMap::new(),
            status,
        }
    }

    /// Build a chart of `chart_type` and bind it to the widget's region.
    /// Any previous chart in that region is dropped.
    pub fn render_chart(
        &mut self,
        widget: WidgetId,
        chart_type: ChartType,
        payload: ChartPayload,
    ) -> &RenderedChart {
        let region = widget.region();
        self.status.insert(widget, WidgetStatus::Ready);
        self.charts.insert(region, RenderedChart::new(region, chart_type, payload));
        &self.charts[region]
    }

    /// Write each count field into its region as text
    pub fn render_counts(&mut self, counts: &CountPayload) {
        for (region, value) in counts.regions() {
            self.regions.insert(region, value.to_string());
        }
        self.status.insert(WidgetId::EmployeeCount, WidgetStatus::Ready);
    }

    pub fn mark_failed(&mut self, widget: WidgetId, message: impl Into<String>) {
        self.status.insert(widget, WidgetStatus::Failed(message.into()));
    }

    /// Put every widget back to pending; rendered content stays until replaced
    pub fn mark_all_pending(&mut self) {
        for status in self.status.values_mut() {
            *status = WidgetStatus::Pending;
        }
    }

    pub fn chart(&self, region: &str) -> Option<&RenderedChart> {
        self.charts.get(region)
    }

    pub fn charts(&self) -> impl Iterator<Item = &RenderedChart> {
        self.charts.values()
    }

    pub fn region_text(&self, region: &str) -> Option<&str> {
        self.regions.get(region).map(|s| s.as_str())
    }

    pub fn status(&self, widget: WidgetId) -> Option<&WidgetStatus> {
        self.status.get(&widget)
    }

    /// Advance the page's cyclable chart to the next visual type
    pub fn cycle(&mut self) -> Result<ChartType, CycleError> {
        let region = self.page.cyclable().region();
        match self.charts.get_mut(region) {
            Some(chart) => Ok(cycle_chart(chart)),
            None => Err(CycleError::NoChart { region }),
        }
    }
}

/// Read the handle's type, map it through the cycle, set it, redraw
pub fn cycle_chart(handle: &mut dyn ChartHandle) -> ChartType {
    let next = handle.chart_type().next();
    handle.set_chart_type(next);
    handle.redraw();
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payload::Series;

    fn pipeline() -> ChartPayload {
        ChartPayload {
            data_set: vec![Series {
                label: "Odoo developer 2023-03-30".into(),
                data: vec![3.0, 0.0, 5.0, 3.0],
            }],
            labels: vec![
                "Initial".into(),
                "Test".into(),
                "Interview".into(),
                "Hired".into(),
            ],
        }
    }

    #[test]
    fn test_render_pipeline_as_bar() {
        let mut state = PageState::new(Page::Recruitment);
        let chart = state.render_chart(WidgetId::Pipeline, ChartType::Bar, pipeline());
        assert_eq!(chart.chart_type, ChartType::Bar);
        assert_eq!(chart.label_count(), 4);
        assert_eq!(chart.series_count(), 1);
        assert_eq!(chart.series[0].data.len(), 4);
        assert_eq!(state.status(WidgetId::Pipeline), Some(&WidgetStatus::Ready));
    }

    #[test]
    fn test_render_counts_into_regions() {
        let mut state = PageState::new(Page::Employee);
        let counts = CountPayload {
            total_employees: 42.into(),
            newbies_week: 3.into(),
            newbies_week_percentage: "7%".into(),
            newbies_today: 1.into(),
            newbies_today_percentage: "2%".into(),
        };
        state.render_counts(&counts);
        let shown: Vec<Option<&str>> = [
            "totalEmployeesCount",
            "newbie",
            "newbiePerc",
            "newbieToday",
            "newbieTodayPerc",
        ]
        .iter()
        .map(|r| state.region_text(r))
        .collect();
        assert_eq!(
            shown,
            vec![Some("42"), Some("3"), Some("7%"), Some("1"), Some("2%")]
        );
    }

    #[test]
    fn test_cycle_without_chart_is_an_error() {
        let mut state = PageState::new(Page::Employee);
        assert_eq!(
            state.cycle(),
            Err(CycleError::NoChart {
                region: "totalEmployees"
            })
        );
    }

    #[test]
    fn test_cycle_only_moves_the_first_chart() {
        let mut state = PageState::new(Page::Employee);
        state.render_chart(WidgetId::Employees, ChartType::Doughnut, pipeline());
        state.render_chart(WidgetId::Gender, ChartType::Doughnut, pipeline());
        assert_eq!(state.cycle(), Ok(ChartType::Pie));
        assert_eq!(state.cycle(), Ok(ChartType::Line));
        assert_eq!(state.chart("totalEmployees").unwrap().revision, 2);
        assert_eq!(state.chart("genderChart").unwrap().chart_type, ChartType::Doughnut);
    }

    #[test]
    fn test_rerender_replaces_handle() {
        let mut state = PageState::new(Page::Recruitment);
        state.render_chart(WidgetId::Pipeline, ChartType::Bar, pipeline());
        state.cycle().unwrap();
        let mut smaller = pipeline();
        smaller.labels.truncate(2);
        smaller.data_set[0].data.truncate(2);
        let chart = state.render_chart(WidgetId::Pipeline, ChartType::Bar, smaller);
        assert_eq!(chart.chart_type, ChartType::Bar);
        assert_eq!(chart.label_count(), 2);
        assert_eq!(state.charts().count(), 1);
    }

    #[test]
    fn test_failed_widget_keeps_region_blank() {
        let mut state = PageState::new(Page::Employee);
        state.mark_failed(WidgetId::Gender, "connection refused");
        assert!(state.chart("genderChart").is_none());
        assert_eq!(
            state.status(WidgetId::Gender),
            Some(&WidgetStatus::Failed("connection refused".into()))
        );
    }
}

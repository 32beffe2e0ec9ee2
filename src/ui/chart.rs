//! Draws a rendered chart in whichever visual type it currently has

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Bar, BarChart, BarGroup, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use crate::domain::{ChartType, RenderedChart};
use crate::ui::widgets::palette;
use crate::ui::widgets::pie::PieChart;

/// Inner radius of a doughnut relative to its outer radius
const DOUGHNUT_CUTOUT: f64 = 0.5;

pub fn draw_chart(f: &mut Frame, area: Rect, chart: &RenderedChart) {
    if chart.label_count() == 0 || chart.series_count() == 0 {
        let empty = Paragraph::new("No data").style(Style::default().fg(Color::DarkGray));
        f.render_widget(empty, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(area);

    match chart.chart_type {
        ChartType::Bar => draw_bar(f, chunks[0], chart),
        ChartType::Line => draw_line(f, chunks[0], chart),
        ChartType::Pie => draw_pie(f, chunks[0], chart, 0.0),
        ChartType::Doughnut => draw_pie(f, chunks[0], chart, DOUGHNUT_CUTOUT),
    }
    f.render_widget(Paragraph::new(legend(chart)), chunks[1]);
}

/// Pie and doughnut colour by label, bar and line colour by series
pub fn legend(chart: &RenderedChart) -> Line<'static> {
    let names: Vec<&str> = match chart.chart_type {
        ChartType::Pie | ChartType::Doughnut => chart.labels.iter().map(|l| l.as_str()).collect(),
        ChartType::Bar | ChartType::Line => chart.series.iter().map(|s| s.label.as_str()).collect(),
    };
    let mut spans = Vec::with_capacity(names.len() * 2);
    for (index, name) in names.into_iter().enumerate() {
        spans.push(Span::styled("■ ", Style::default().fg(palette::color(index))));
        spans.push(Span::raw(format!("{name}  ")));
    }
    Line::from(spans)
}

fn draw_bar(f: &mut Frame, area: Rect, chart: &RenderedChart) {
    let groups = chart.label_count() as u16;
    let per_group = chart.series_count() as u16;
    let group_gap = 1;
    let group_width = (area.width / groups.max(1)).saturating_sub(group_gap);
    let bar_width = (group_width / per_group.max(1)).max(1);

    let mut widget = BarChart::default()
        .bar_width(bar_width)
        .bar_gap(0)
        .group_gap(group_gap)
        .max(chart.max_value().ceil().max(1.0) as u64);

    for (index, label) in chart.labels.iter().enumerate() {
        let bars: Vec<Bar> = chart
            .column(index)
            .into_iter()
            .enumerate()
            .map(|(series, value)| {
                Bar::default()
                    .value(value.max(0.0).round() as u64)
                    .text_value(format_value(value))
                    .style(Style::default().fg(palette::color(series)))
            })
            .collect();
        widget = widget.data(
            BarGroup::default()
                .label(Line::from(label.as_str()))
                .bars(&bars),
        );
    }

    f.render_widget(widget, area);
}

fn draw_line(f: &mut Frame, area: Rect, chart: &RenderedChart) {
    let points: Vec<Vec<(f64, f64)>> = chart
        .series
        .iter()
        .map(|s| {
            s.data
                .iter()
                .enumerate()
                .map(|(i, v)| (i as f64, *v))
                .collect()
        })
        .collect();

    let datasets: Vec<Dataset> = chart
        .series
        .iter()
        .zip(&points)
        .enumerate()
        .map(|(index, (series, data))| {
            Dataset::default()
                .name(series.label.clone())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(palette::color(index)))
                .data(data)
        })
        .collect();

    let x_max = (chart.label_count().saturating_sub(1)).max(1) as f64;
    let y_max = (chart.max_value() * 1.1).max(1.0);
    let x_labels: Vec<Span> = chart
        .labels
        .iter()
        .map(|l| Span::raw(l.clone()))
        .collect();

    let widget = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .bounds([0.0, x_max])
                .labels(x_labels)
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([0.0, y_max])
                .labels(vec![
                    Span::raw("0"),
                    Span::raw(format_value(y_max / 2.0)),
                    Span::raw(format_value(y_max)),
                ])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .hidden_legend_constraints((Constraint::Ratio(0, 1), Constraint::Ratio(0, 1)));

    f.render_widget(widget, area);
}

fn draw_pie(f: &mut Frame, area: Rect, chart: &RenderedChart, cutout: f64) {
    let rings: Vec<&[f64]> = chart.series.iter().map(|s| s.data.as_slice()).collect();
    f.render_widget(PieChart::new(rings).cutout(cutout), area);
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value:.1}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChartPayload, Series};

    fn chart(chart_type: ChartType) -> RenderedChart {
        RenderedChart::new(
            "genderChart",
            chart_type,
            ChartPayload {
                data_set: vec![Series {
                    label: "Employees".into(),
                    data: vec![7.0, 5.0],
                }],
                labels: vec!["Male".into(), "Female".into()],
            },
        )
    }

    #[test]
    fn test_legend_by_label_for_pie() {
        let line = legend(&chart(ChartType::Doughnut));
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.contains("Male") && text.contains("Female"));
        assert!(!text.contains("Employees"));
    }

    #[test]
    fn test_legend_by_series_for_bar() {
        let line = legend(&chart(ChartType::Bar));
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.contains("Employees"));
        assert!(!text.contains("Male"));
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(3.0), "3");
        assert_eq!(format_value(2.24), "2.2");
    }
}

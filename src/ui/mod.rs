use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap};
use ratatui::Frame;

pub mod chart;
pub mod layout;
pub mod widgets;

use crate::app::{App, StatusLevel};
use crate::domain::{Page, PageState, WidgetId, WidgetStatus, COUNT_REGIONS};

/// Tile captions for the count regions, in `COUNT_REGIONS` order
const COUNT_CAPTIONS: [&str; 5] = [
    "Total Employees",
    "New This Week",
    "Week %",
    "New Today",
    "Today %",
];

pub fn draw(f: &mut Frame, app: &mut App) {
    let areas = layout::areas(f.size(), app.active_page);

    draw_header(f, areas.header, app);
    if let Some(tiles) = areas.tiles {
        draw_count_tiles(f, tiles, app.current());
    }

    app.dashboard.clear_title_areas();
    let charts = app.active_page.charts();
    for (widget, area) in charts.into_iter().zip(areas.charts.iter().copied()) {
        draw_chart_card(f, area, app.current(), widget);
        // Title row minus the corner glyphs
        let title_row = Rect::new(area.x + 1, area.y, area.width.saturating_sub(2), 1);
        app.dashboard.push_title_area(widget, title_row);
    }

    draw_status_line(f, areas.status_line, app);
    draw_key_line(f, areas.key_line);

    if app.help_open {
        draw_help_popup(f, areas.size);
    }
}

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let titles: Vec<Line> = Page::ALL
        .iter()
        .map(|page| {
            Line::from(vec![
                Span::styled(
                    format!("{}:", page.shortcut()),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(page.title()),
            ])
        })
        .collect();
    let selected = Page::ALL
        .iter()
        .position(|p| *p == app.active_page)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(
                    "HR Dashboard",
                    Style::default()
                        .fg(Color::LightCyan)
                        .add_modifier(Modifier::BOLD),
                )),
        )
        .select(selected)
        .style(Style::default().fg(Color::White))
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .divider(" │ ");
    f.render_widget(tabs, chunks[0]);

    let state = if app.loading() { "loading" } else { "idle" };
    let server = Line::from(vec![
        Span::styled("Server ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{}  ", app.base_url)),
        Span::styled("State ", Style::default().fg(Color::DarkGray)),
        Span::raw(state),
    ]);
    let right = Paragraph::new(server)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Right);
    f.render_widget(right, chunks[1]);
}

fn draw_count_tiles(f: &mut Frame, area: Rect, state: &PageState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, COUNT_REGIONS.len() as u32); COUNT_REGIONS.len()])
        .split(area);

    for ((region, caption), tile) in COUNT_REGIONS.iter().zip(COUNT_CAPTIONS).zip(chunks.iter()) {
        let value = state.region_text(region).unwrap_or("-");
        let paragraph = Paragraph::new(Span::styled(
            value.to_string(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(caption)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        f.render_widget(paragraph, *tile);
    }
}

fn draw_chart_card(f: &mut Frame, area: Rect, state: &PageState, widget: WidgetId) {
    let chart = state.chart(widget.region());
    let mut title = vec![Span::styled(
        widget.title(),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if let Some(chart) = chart {
        title.push(Span::styled(
            format!(" [{}]", chart.chart_type),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let cyclable = state.page.cyclable() == widget;
    let border_style = if cyclable {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Line::from(title))
        .border_style(border_style);
    let inner = block.inner(area);
    f.render_widget(block, area);

    match (chart, state.status(widget)) {
        (Some(chart), _) => chart::draw_chart(f, inner, chart),
        (None, Some(WidgetStatus::Failed(_))) => {
            let note = Paragraph::new("No data").style(Style::default().fg(Color::DarkGray));
            f.render_widget(note, inner);
        }
        _ => {
            let note = Paragraph::new("Loading…").style(Style::default().fg(Color::DarkGray));
            f.render_widget(note, inner);
        }
    }
}

fn draw_status_line(f: &mut Frame, area: Rect, app: &App) {
    let color = match app.status_level {
        StatusLevel::Info => Color::Green,
        StatusLevel::Warn => Color::Yellow,
        StatusLevel::Error => Color::Red,
    };
    let line = Line::from(vec![
        Span::styled("Page ", Style::default().fg(Color::DarkGray)),
        Span::raw(format!("{}  ", app.active_page)),
        Span::styled(app.status.clone(), Style::default().fg(color)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn draw_key_line(f: &mut Frame, area: Rect) {
    let hints = Line::from(Span::styled(
        "click title / t: chart type  Tab: page  r: reload  e: export  ?: help  q: quit",
        Style::default().fg(Color::DarkGray),
    ));
    f.render_widget(Paragraph::new(hints), area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 50, area);
    f.render_widget(Clear, popup_area);

    let lines = vec![
        Line::from("Charts"),
        Line::from("  Click a card title  Cycle chart type (bar → doughnut → pie → line)"),
        Line::from("  t / Enter / Space   Same as clicking a title"),
        Line::from(""),
        Line::from("Pages"),
        Line::from("  Tab                 Next page"),
        Line::from("  1 / 2               Employee / Recruitment"),
        Line::from(""),
        Line::from("Actions"),
        Line::from("  r                   Reload every chart"),
        Line::from("  e                   Export the page to JSON + CSV"),
        Line::from("  ?                   Toggle help"),
        Line::from("  q / Esc             Quit"),
    ];

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Help"))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Action;
    use crate::domain::{ChartPayload, CountPayload, Series};
    use crate::infrastructure::RuntimeEvent;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use ratatui::Terminal;
    use std::path::PathBuf;

    fn buffer_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut text = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                text.push_str(buffer.get(x, y).symbol());
            }
            text.push('\n');
        }
        text
    }

    fn render(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 36)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    #[test]
    fn test_count_tiles_show_values_verbatim() {
        let mut app = App::new(Page::Employee, "http://hr.local", PathBuf::from("/tmp"));
        app.apply_runtime_event(RuntimeEvent::CountsReady {
            generation: app.generation(),
            payload: CountPayload {
                total_employees: 42.into(),
                newbies_week: 3.into(),
                newbies_week_percentage: "7%".into(),
                newbies_today: 1.into(),
                newbies_today_percentage: "2%".into(),
            },
        });
        let screen = render(&mut app);
        for value in ["42", "7%", "2%"] {
            assert!(screen.contains(value), "missing {value} in\n{screen}");
        }
    }

    #[test]
    fn test_card_titles_are_clickable_after_draw() {
        let mut app = App::new(Page::Recruitment, "http://hr.local", PathBuf::from("/tmp"));
        app.apply_runtime_event(RuntimeEvent::ChartReady {
            generation: app.generation(),
            widget: WidgetId::Pipeline,
            payload: ChartPayload {
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
            },
        });
        let screen = render(&mut app);
        assert!(screen.contains("Recruitment Pipeline [bar]"));
        assert!(screen.contains("Interview"));

        let title_row = layout::areas(Rect::new(0, 0, 120, 36), Page::Recruitment).charts[0].y;
        assert_eq!(app.dashboard.title_at(10, title_row), Some(WidgetId::Pipeline));

        app.apply(Action::CycleChart);
        let screen = render(&mut app);
        assert!(screen.contains("Recruitment Pipeline [doughnut]"));
    }

    #[test]
    fn test_failed_chart_shows_no_data() {
        let mut app = App::new(Page::Employee, "http://hr.local", PathBuf::from("/tmp"));
        app.apply_runtime_event(RuntimeEvent::FetchFailed {
            generation: app.generation(),
            widget: WidgetId::Gender,
            message: "HTTP 500".into(),
        });
        let screen = render(&mut app);
        assert!(screen.contains("No data"));
        assert!(screen.contains("Loading…"));
    }
}

//! Draws a whole frame from a `ViewState`.
//!
//! Rendering is a pure function of the snapshot, the display settings and
//! (for the debug overlay) the recent log entries.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::config::config::{DisplayConfig, Icons};
use crate::data::datatable::is_null;
use crate::help_text::HelpText;
use crate::logging::LogEntry;
use crate::selection_model::DetailSnapshot;
use crate::state::focus::FocusState;
use crate::state::view_state::{BrowseView, ViewState};
use crate::ui::rendering::TableRenderContext;
use crate::ui::table_renderer::render_table;

/// Title, badge, divider and hint lines above the body
const HEADER_HEIGHT: u16 = 4;

pub fn render(f: &mut Frame, view: &ViewState, display: &DisplayConfig, logs: Option<&[LogEntry]>) {
    let icons = display.icons();

    let mut constraints = vec![Constraint::Length(HEADER_HEIGHT), Constraint::Min(3)];
    if view.error.is_some() {
        constraints.push(Constraint::Length(3));
    }
    if view.show_help {
        constraints.push(Constraint::Length(HelpText::height(view.focus)));
    }
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());

    render_header(f, chunks[0], view, &icons);

    match (&view.detail, view.focus) {
        (Some(detail), FocusState::RowDetail) => render_detail(f, chunks[1], detail),
        _ => render_browser(f, chunks[1], view, display, &icons),
    }

    let mut next = 2;
    if let Some(error) = &view.error {
        let banner = Paragraph::new(format!("{} {}", icons.error, error))
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Error (Esc to dismiss, r to retry)"),
            );
        f.render_widget(banner, chunks[next]);
        next += 1;
    }
    if view.show_help {
        let help = Paragraph::new(HelpText::for_focus(view.focus))
            .block(Block::default().borders(Borders::ALL).title("Help"));
        f.render_widget(help, chunks[next]);
    }

    if let Some(entries) = logs {
        render_debug_overlay(f, entries);
    }
}

fn render_header(f: &mut Frame, area: Rect, view: &ViewState, icons: &Icons) {
    let width = area.width as usize;
    let lines = vec![
        Line::from(Span::styled(
            "pg-explorer",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("{} Connected to: {}", icons.database, view.connection),
            Style::default().fg(Color::Green),
        )),
        Line::from(Span::styled(
            "─".repeat(width),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(Span::styled(
            view.context_hint(),
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),
        )),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn render_browser(
    f: &mut Frame,
    area: Rect,
    view: &ViewState,
    display: &DisplayConfig,
    icons: &Icons,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(display.table_list_width), Constraint::Min(10)])
        .split(area);

    render_table_list(f, chunks[0], view, icons);

    match &view.browse {
        Some(browse) => render_rows(f, chunks[1], browse, display, icons),
        None => {
            let placeholder = Paragraph::new("Select a table to view its data")
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().borders(Borders::ALL).title("Data"));
            f.render_widget(placeholder, chunks[1]);
        }
    }
}

fn render_table_list(f: &mut Frame, area: Rect, view: &ViewState, icons: &Icons) {
    let selected = view.selected_table();
    let items: Vec<ListItem> = view
        .tables
        .iter()
        .map(|name| {
            let style = if Some(name.as_str()) == selected {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(format!("{} {}", icons.table, name)).style(style)
        })
        .collect();

    let focused = view.focus == FocusState::TableSelect;
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(format!("Tables ({})", view.tables.len())),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol(icons.selected);

    let mut state = ListState::default();
    state.select(view.table_cursor);
    f.render_stateful_widget(list, area, &mut state);
}

fn render_rows(f: &mut Frame, area: Rect, browse: &BrowseView, display: &DisplayConfig, icons: &Icons) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(3),
        ])
        .split(area);

    let title = format!(
        "TABLE: {} {}",
        browse.table.to_uppercase(),
        browse.row_count_label()
    );
    f.render_widget(
        Paragraph::new(Span::styled(
            title,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        chunks[0],
    );

    render_search_line(f, chunks[1], browse, icons);

    if let Some(status) = browse.status_message() {
        f.render_widget(
            Paragraph::new(Span::styled(status, Style::default().fg(Color::Yellow))),
            chunks[2],
        );
    }

    // borders and header row
    let body_height = chunks[3].height.saturating_sub(3) as usize;
    let ctx = TableRenderContext::from_browse(browse, body_height, display.max_cell_width);
    let grid_title = if browse.column_count > browse.columns.len() {
        format!(
            "Columns {}-{} of {}",
            browse.scroll_offset + 1,
            browse.column_count,
            browse.column_count
        )
    } else {
        "Rows".to_string()
    };
    render_table(f, chunks[3], &ctx, &grid_title);
}

fn render_search_line(f: &mut Frame, area: Rect, browse: &BrowseView, icons: &Icons) {
    let search = &browse.search;
    let prefix = format!("{} Search: ", icons.search);

    if search.is_editing() {
        let line = Line::from(vec![
            Span::styled(prefix.clone(), Style::default().fg(Color::Yellow)),
            Span::raw(search.pending.clone()),
        ]);
        f.render_widget(Paragraph::new(line), area);
        let prefix_width = Span::raw(prefix).width() as u16;
        let x = area.x + prefix_width + search.pending_cursor as u16;
        f.set_cursor_position((x.min(area.right().saturating_sub(1)), area.y));
        return;
    }

    let line = match browse.filter_label() {
        Some(label) => Line::from(vec![
            Span::styled(prefix, Style::default().fg(Color::Gray)),
            Span::styled(search.query.clone(), Style::default().fg(Color::Yellow)),
            Span::raw(" "),
            Span::styled(label, Style::default().fg(Color::DarkGray)),
        ]),
        None => Line::from(Span::styled(
            "Press / to search",
            Style::default().fg(Color::DarkGray),
        )),
    };
    f.render_widget(Paragraph::new(line), area);
}

fn render_detail(f: &mut Frame, area: Rect, detail: &DetailSnapshot) {
    let label_width = detail.max_name_width();
    let lines: Vec<Line> = detail
        .fields()
        .iter()
        .map(|(name, value)| {
            let value_style = if is_null(value) {
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::styled(
                    format!("{:>width$}: ", name, width = label_width),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ),
                Span::styled(value.clone(), value_style),
            ])
        })
        .collect();

    let card = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Magenta))
                .title(format!(
                    "ROW DETAILS (Row #{}) - {}",
                    detail.row_index() + 1,
                    detail.table()
                )),
        );
    f.render_widget(card, area);
}

fn render_debug_overlay(f: &mut Frame, entries: &[LogEntry]) {
    let area = centered_rect(f.area(), 90, 80);
    let visible = area.height.saturating_sub(2) as usize;
    let start = entries.len().saturating_sub(visible);
    let lines: Vec<Line> = entries[start..]
        .iter()
        .map(|entry| {
            let style = match entry.level.as_str() {
                "ERROR" => Style::default().fg(Color::Red),
                "WARN" => Style::default().fg(Color::Yellow),
                "DEBUG" | "TRACE" => Style::default().fg(Color::DarkGray),
                _ => Style::default(),
            };
            Line::from(Span::styled(entry.format_for_display(), style))
        })
        .collect();

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Debug log (F5 to close)"),
        ),
        area,
    );
}

/// Rectangle of `percent_x` by `percent_y` centered in `area`
fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

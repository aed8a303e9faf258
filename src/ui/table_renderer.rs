// Pure grid rendering function that depends only on TableRenderContext

use crate::ui::rendering::TableRenderContext;
use ratatui::{
    layout::Constraint,
    prelude::*,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};

/// Render the row grid using only the provided context
pub fn render_table(f: &mut Frame, area: Rect, ctx: &TableRenderContext, title: &str) {
    if ctx.column_headers.is_empty() {
        let empty = Paragraph::new("Table has no columns")
            .block(Block::default().borders(Borders::ALL).title(title))
            .style(Style::default().fg(Color::Yellow));
        f.render_widget(empty, area);
        return;
    }

    let header = build_header_row(ctx);
    let rows = build_data_rows(ctx);
    let widths: Vec<Constraint> = ctx
        .column_widths
        .iter()
        .map(|w| Constraint::Length(*w))
        .collect();

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .column_spacing(1)
        .row_highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = TableState::default();
    state.select(ctx.selected_viewport_row());
    f.render_stateful_widget(table, area, &mut state);
}

fn build_header_row(ctx: &TableRenderContext) -> Row<'static> {
    let cells: Vec<Cell> = ctx
        .column_headers
        .iter()
        .map(|header| {
            Cell::from(header.clone()).style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
        })
        .collect();
    Row::new(cells).height(1)
}

fn build_data_rows(ctx: &TableRenderContext) -> Vec<Row<'static>> {
    ctx.data_rows
        .iter()
        .map(|row| {
            let cells: Vec<Cell> = row
                .iter()
                .map(|value| {
                    let style = if ctx.is_null_cell(value) {
                        Style::default()
                            .fg(Color::DarkGray)
                            .add_modifier(Modifier::ITALIC)
                    } else if ctx.cell_matches_query(value) {
                        Style::default().fg(Color::Yellow)
                    } else {
                        Style::default()
                    };
                    Cell::from(value.clone()).style(style)
                })
                .collect();
            Row::new(cells)
        })
        .collect()
}

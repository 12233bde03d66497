use chrono::Local;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::ui::app::{App, Focus};
use crate::ui::theme;
use crate::ui::util::{
    filter_label, format_long_datetime, format_rupiah, truncate, EMPTY_LIST_MESSAGE,
};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Filter + total
            Constraint::Min(3),    // List
        ])
        .split(area);

    render_summary(f, chunks[0], app);
    render_list(f, chunks[1], app);
}

fn render_summary(f: &mut Frame, area: Rect, app: &App) {
    let options = app.view.options();
    let position = options
        .iter()
        .position(|o| *o == app.view.filter)
        .unwrap_or(0);

    let line = Line::from(vec![
        Span::styled(" Bulan: ", theme::dim_style()),
        Span::styled("◀ ", theme::dim_style()),
        Span::styled(
            filter_label(app.view.filter),
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ▶", theme::dim_style()),
        Span::styled(
            format!("  ({}/{})", position + 1, options.len()),
            theme::dim_style(),
        ),
        Span::styled("   Total: ", theme::dim_style()),
        Span::styled(format_rupiah(app.view.total), theme::total_style()),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY));
    f.render_widget(Paragraph::new(line).block(block), area);
}

fn render_list(f: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::List;

    if app.view.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled(EMPTY_LIST_MESSAGE, theme::dim_style())),
        ];
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::pane_border(focused))
            .title(Span::styled(
                " Pengeluaran (0) ",
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            ));
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = ["Tanggal", "Deskripsi", "Harga"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .view
        .entries
        .iter()
        .enumerate()
        .skip(app.expense_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, expense)| {
            let style = if focused && i == app.expense_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            Row::new(vec![
                Cell::from(format_long_datetime(&expense.date.with_timezone(&Local))),
                Cell::from(truncate(&expense.description, 40)),
                Cell::from(Span::styled(
                    format_rupiah(expense.price),
                    theme::price_style(),
                )),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(28),
        Constraint::Min(16),
        Constraint::Length(16),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme::pane_border(focused))
            .title(Span::styled(
                format!(" Pengeluaran ({}) ", app.view.entries.len()),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );

    f.render_widget(table, area);
}

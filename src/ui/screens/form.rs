use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ledger::FormField;
use crate::ui::app::{App, Focus, InputMode};
use crate::ui::theme;

const PROMPT: &str = "> ";

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let form = &app.form;
    let focused = app.focus == Focus::Form;
    let active = |field: FormField| focused && form.focus == field;

    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut cursor: Option<(u16, u16)> = None;

    let mut text_field = |lines: &mut Vec<Line<'static>>,
                          field: FormField,
                          label: &str,
                          value: &str| {
        lines.push(Line::from(Span::styled(
            label.to_string(),
            theme::field_label_style(active(field)),
        )));
        if active(field) {
            cursor = Some((
                (PROMPT.len() + value.chars().count()) as u16,
                lines.len() as u16,
            ));
        }
        lines.push(Line::from(vec![
            Span::styled(PROMPT, theme::dim_style()),
            Span::styled(value.to_string(), theme::normal_style()),
        ]));
        lines.push(Line::from(""));
    };

    text_field(&mut lines, FormField::Description, "Deskripsi", &form.description);
    text_field(&mut lines, FormField::Price, "Harga (Rp)", &form.price);

    let checkbox = if form.custom_date { "[x]" } else { "[ ]" };
    lines.push(Line::from(vec![
        Span::styled(
            format!("{checkbox} "),
            theme::field_label_style(active(FormField::CustomDate)),
        ),
        Span::styled(
            FormField::CustomDate.to_string(),
            theme::field_label_style(active(FormField::CustomDate)),
        ),
    ]));
    lines.push(Line::from(""));

    if form.custom_date {
        text_field(&mut lines, FormField::Date, "Tanggal (YYYY-MM-DD)", &form.date);
        text_field(&mut lines, FormField::Time, "Waktu (HH:MM)", &form.time);
    }

    lines.push(Line::from(Span::styled(
        "Enter simpan  Tab pindah  Spasi centang",
        theme::dim_style(),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::pane_border(focused))
        .title(Span::styled(
            " Tambah Pengeluaran ",
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    f.render_widget(Paragraph::new(lines).block(block), area);

    if app.input_mode == InputMode::Normal {
        if let Some((col, row)) = cursor {
            if row < inner.height && col < inner.width {
                f.set_cursor_position((inner.x + col, inner.y + row));
            }
        }
    }
}

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::app::{App, Focus, InputMode};
use super::commands;
use super::theme;

pub(crate) fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title + clock
            Constraint::Min(5),    // Main content
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Command bar
        ])
        .split(f.area());

    render_title_bar(f, chunks[0], app);
    render_main(f, chunks[1], app);
    render_status_bar(f, chunks[2], app);
    render_command_bar(f, chunks[3], app);

    if app.show_help {
        render_help_overlay(f, f.area());
    }
    if app.input_mode == InputMode::Alert {
        render_alert(f, f.area(), &app.alert_message);
    }
}

fn render_title_bar(f: &mut Frame, area: Rect, app: &App) {
    let title = " ExpenseTUI ";
    let clock = format!("{} ", app.clock);
    let pad = (area.width as usize).saturating_sub(title.len() + clock.chars().count());

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(
            title,
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" ".repeat(pad)),
        Span::styled(clock, Style::default().fg(theme::HEADER_FG)),
    ]))
    .style(Style::default().bg(theme::HEADER_BG));
    f.render_widget(bar, area);
}

fn render_main(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(40), Constraint::Min(30)])
        .split(area);

    super::screens::form::render(f, chunks[0], app);
    super::screens::expenses::render(f, chunks[1], app);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mode_label = format!(" {} ", app.input_mode);
    let mode_bg = match app.input_mode {
        InputMode::Normal => theme::ACCENT,
        InputMode::Command => theme::GREEN,
        InputMode::Confirm | InputMode::Alert => theme::RED,
    };
    let mode_style = Style::default()
        .fg(theme::HEADER_BG)
        .bg(mode_bg)
        .add_modifier(Modifier::BOLD);

    let info = format!(" {} pengeluaran tersimpan", app.ledger.len());

    let right = match app.focus {
        Focus::Form => " Tab next field | Enter save | Esc list | F1 help ",
        Focus::List => " D delete | H/L month | a add | : cmd | ? help ",
    };

    let available = area.width as usize;
    let used = mode_label.len() + info.chars().count() + right.len();
    let pad = available.saturating_sub(used);

    let bar = Paragraph::new(Line::from(vec![
        Span::styled(&mode_label, mode_style),
        Span::styled(&info, theme::status_bar_style()),
        Span::styled(" ".repeat(pad), theme::status_bar_style()),
        Span::styled(right, theme::status_bar_style()),
    ]));
    f.render_widget(bar, area);
}

fn render_command_bar(f: &mut Frame, area: Rect, app: &App) {
    let (content, cursor_offset) = match app.input_mode {
        InputMode::Command => (
            Line::from(vec![
                Span::styled(":", Style::default().fg(theme::ACCENT)),
                Span::styled(&app.command_input, theme::command_bar_style()),
            ]),
            Some(1 + app.command_input.chars().count() as u16),
        ),
        InputMode::Confirm => (
            Line::from(vec![
                Span::styled(&app.confirm_message, Style::default().fg(theme::YELLOW)),
                Span::styled(" [y/N] ", Style::default().fg(theme::RED)),
            ]),
            None,
        ),
        InputMode::Normal | InputMode::Alert => (
            if app.status_message.is_empty() {
                Line::from(Span::styled(
                    " Press Esc for the list, : for commands, ? for help",
                    theme::dim_style(),
                ))
            } else {
                Line::from(Span::styled(
                    &app.status_message,
                    theme::command_bar_style(),
                ))
            },
            None,
        ),
    };

    let bar = Paragraph::new(content).style(Style::default().bg(theme::COMMAND_BG));
    f.render_widget(bar, area);

    if let Some(offset) = cursor_offset {
        f.set_cursor_position((area.x + offset, area.y));
    }
}

fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let height = height.min(area.height.saturating_sub(2));
    let width = width.min(area.width.saturating_sub(4));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

fn render_alert(f: &mut Frame, area: Rect, message: &str) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(message, theme::normal_style())),
        Line::from(""),
        Line::from(Span::styled(" Press any key ", theme::dim_style())),
    ];

    let popup_area = centered_popup(area, 56, text.len() as u16 + 2);
    f.render_widget(Clear, popup_area);
    let alert = Paragraph::new(text)
        .centered()
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::RED))
                .title(Span::styled(
                    " Peringatan ",
                    Style::default().fg(theme::RED).add_modifier(Modifier::BOLD),
                ))
                .style(Style::default().bg(theme::HEADER_BG)),
        );
    f.render_widget(alert, popup_area);
}

fn render_help_overlay(f: &mut Frame, area: Rect) {
    let section = |title: &'static str| {
        Line::from(Span::styled(
            title,
            Style::default()
                .fg(theme::YELLOW)
                .add_modifier(Modifier::BOLD),
        ))
    };

    let mut help_text = vec![
        Line::from(Span::styled(
            " ExpenseTUI Help ",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        section(" Form"),
        Line::from(Span::styled(
            "  Tab/Shift-Tab    Next/Prev field       Enter      Save expense",
            theme::normal_style(),
        )),
        Line::from(Span::styled(
            "  Space (toggle)   Custom date on/off    Esc        Go to list",
            theme::normal_style(),
        )),
        Line::from(""),
        section(" List"),
        Line::from(Span::styled(
            "  j/k or Up/Down   Move cursor           g/G        Top/Bottom",
            theme::normal_style(),
        )),
        Line::from(Span::styled(
            "  H/L or [/]       Prev/Next month       D/Delete   Delete expense",
            theme::normal_style(),
        )),
        Line::from(Span::styled(
            "  a or Tab         Back to form          Ctrl-q     Quit",
            theme::normal_style(),
        )),
        Line::from(""),
        section(" Commands"),
    ];

    // Build command list dynamically from COMMANDS registry
    let mut seen = std::collections::HashSet::new();
    let mut cmd_lines: Vec<(&str, &str)> = Vec::new();
    for (&name, cmd) in commands::COMMANDS.iter() {
        if name.len() <= 2 {
            continue;
        }
        if seen.insert(cmd.description) {
            cmd_lines.push((name, cmd.description));
        }
    }
    cmd_lines.sort_by_key(|(name, _)| *name);
    for (name, desc) in &cmd_lines {
        help_text.push(Line::from(Span::styled(
            format!("  :{name:<12} {desc}"),
            theme::normal_style(),
        )));
    }

    help_text.push(Line::from(""));
    help_text.push(Line::from(Span::styled(
        " Press any key to close ",
        Style::default().fg(theme::TEXT_DIM),
    )));

    let popup_area = centered_popup(area, 72, help_text.len() as u16 + 2);
    f.render_widget(Clear, popup_area);
    let help = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::ACCENT))
            .style(Style::default().bg(theme::HEADER_BG)),
    );
    f.render_widget(help, popup_area);
}

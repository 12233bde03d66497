use anyhow::Result;
use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::{Duration, Instant};

use crate::db::Database;
use crate::ledger::{FormField, Ledger};
use crate::ui::app::{App, Focus, InputMode};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

const CLOCK_TICK: Duration = Duration::from_secs(1);

pub(crate) fn as_tui(ledger: Ledger, db: &mut Database) -> Result<()> {
    let mut app = App::new(ledger);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, db);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = ?e, "tui exited with error");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    db: &mut Database,
) -> Result<()> {
    let mut last_tick = Instant::now();

    while app.running {
        terminal.draw(|f| {
            let content_height = f.area().height.saturating_sub(9) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        let timeout = CLOCK_TICK.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(key, app, db)?;
                }
            }
        }

        if last_tick.elapsed() >= CLOCK_TICK {
            app.tick_clock(Local::now());
            last_tick = Instant::now();
        }
    }
    Ok(())
}

fn handle_key(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c'))
    {
        app.running = false;
        return Ok(());
    }
    if app.show_help {
        app.show_help = false;
        return Ok(());
    }
    match app.input_mode {
        InputMode::Alert => app.dismiss_alert(),
        InputMode::Confirm => handle_confirm_input(key, app, db),
        InputMode::Command => handle_command_input(key, app, db)?,
        InputMode::Normal => match app.focus {
            Focus::Form => handle_form_input(key, app, db),
            Focus::List => handle_list_input(key, app, db)?,
        },
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_form_input(key: event::KeyEvent, app: &mut App, db: &mut Database) {
    match key.code {
        KeyCode::F(1) => app.show_help = true,
        KeyCode::Enter => app.submit_form(db),
        KeyCode::Esc => app.focus = Focus::List,
        KeyCode::Tab | KeyCode::Down => {
            if !app.form.focus_next() {
                app.focus = Focus::List;
            }
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.form.focus_prev();
        }
        KeyCode::Backspace => app.form.pop_char(),
        KeyCode::Char(c) => app.form.push_char(c),
        _ => {}
    }
}

fn handle_list_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    let len = app.view.entries.len();
    let page = app.visible_rows.max(1);
    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('?') | KeyCode::F(1) => app.show_help = true,
        KeyCode::Char('j') | KeyCode::Down => {
            scroll_down(&mut app.expense_index, &mut app.expense_scroll, len, page);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            scroll_up(&mut app.expense_index, &mut app.expense_scroll);
        }
        KeyCode::Char('g') | KeyCode::Home => {
            scroll_to_top(&mut app.expense_index, &mut app.expense_scroll);
        }
        KeyCode::Char('G') | KeyCode::End => {
            scroll_to_bottom(&mut app.expense_index, &mut app.expense_scroll, len, page);
        }
        KeyCode::Char('H') | KeyCode::Char('[') | KeyCode::Left => app.cycle_filter(-1, db)?,
        KeyCode::Char('L') | KeyCode::Char(']') | KeyCode::Right => app.cycle_filter(1, db)?,
        KeyCode::Char('D') | KeyCode::Delete => app.request_delete(),
        KeyCode::Char('a') | KeyCode::Char('i') | KeyCode::Tab => {
            app.focus = Focus::Form;
            app.form.focus = FormField::Description;
        }
        KeyCode::BackTab => {
            app.focus = Focus::Form;
            app.form.focus = *app
                .form
                .visible_fields()
                .last()
                .unwrap_or(&FormField::Description);
        }
        KeyCode::Esc => app.status_message.clear(),
        _ => {}
    }
    Ok(())
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, db)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App, db: &mut Database) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_pending(db),
        // Any other key = cancel
        _ => app.cancel_pending(),
    }
}

use std::collections::HashMap;
use std::sync::LazyLock;

use chrono::Local;

use super::app::{App, Focus};
use crate::db::Database;
use crate::export::CsvExporter;
use crate::models::MonthFilter;
use crate::run::shellexpand;
use crate::ui::util::{filter_label, format_rupiah};

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut Database) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit ExpenseTUI", cmd_quit, r);
    register_command!("quit", "Quit ExpenseTUI", cmd_quit, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!(
        "month",
        "Filter by month (e.g. :month 2024-01, :month all)",
        cmd_month,
        r
    );
    register_command!("m", "Filter by month (e.g. :m 2024-01)", cmd_month, r);
    register_command!("all", "Show all months", cmd_all, r);
    register_command!("add", "Focus the add-expense form", cmd_add, r);
    register_command!("a", "Focus the add-expense form", cmd_add, r);
    register_command!("delete", "Delete selected expense", cmd_delete, r);
    register_command!("d", "Delete selected expense", cmd_delete, r);
    register_command!(
        "export",
        "Export shown expenses to CSV (e.g. :export ~/expenses.csv)",
        cmd_export,
        r
    );
    register_command!("total", "Show the total for the current filter", cmd_total, r);

    r
});

pub(crate) fn handle_command(input: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if cmd_name.is_empty() {
        return Ok(());
    }

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, db)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| (levenshtein(input, k), **k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_month(args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    if args.is_empty() {
        return cmd_all(args, app, db);
    }
    let filter: MonthFilter = match args.parse() {
        Ok(f) => f,
        Err(e) => {
            app.set_status(format!("{e}"));
            return Ok(());
        }
    };
    app.select_filter(filter, db)?;
    if app.view.filter == filter {
        app.set_status(format!("Menampilkan {}", filter_label(filter)));
    } else {
        app.set_status(format!("Tidak ada pengeluaran di {filter}"));
    }
    Ok(())
}

fn cmd_all(_args: &str, app: &mut App, db: &mut Database) -> anyhow::Result<()> {
    app.select_filter(MonthFilter::All, db)?;
    app.set_status(format!("Menampilkan {}", filter_label(MonthFilter::All)));
    Ok(())
}

fn cmd_add(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.focus = Focus::Form;
    Ok(())
}

fn cmd_delete(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.request_delete();
    Ok(())
}

fn cmd_total(_args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    app.set_status(format!(
        "Total {}: {} ({} pengeluaran)",
        filter_label(app.view.filter),
        format_rupiah(app.view.total),
        app.view.entries.len()
    ));
    Ok(())
}

fn cmd_export(args: &str, app: &mut App, _db: &mut Database) -> anyhow::Result<()> {
    let path = if args.is_empty() {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/expensetui-export-{}.csv", app.view.filter)
    } else {
        shellexpand(args)
    };

    match CsvExporter::write_to_path(std::path::Path::new(&path), &app.view.entries, &Local) {
        Ok(count) => app.set_status(format!("Exported {count} expenses to {path}")),
        Err(e) => {
            tracing::error!(error = ?e, "export failed");
            app.set_status(format!("Export failed: {e:#}"));
        }
    }
    Ok(())
}

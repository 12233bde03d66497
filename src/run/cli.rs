use anyhow::{Context, Result};
use chrono::{Local, Utc};
use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::db::Database;
use crate::export::CsvExporter;
use crate::ledger::{compute_view, sum_prices, Command, Effect, ExpenseForm, Ledger};
use crate::models::{MonthFilter, MonthKey};
use crate::ui::util::{filter_label, format_long_datetime, format_rupiah, month_label, truncate};

pub(crate) fn as_cli(args: &[String], mut ledger: Ledger, db: &mut Database) -> Result<()> {
    match args[1].as_str() {
        "add" | "a" => cli_add(&args[2..], &mut ledger, db),
        "list" | "ls" => cli_list(&args[2..], &ledger),
        "summary" | "s" => cli_summary(&args[2..], &ledger),
        "months" => cli_months(&ledger),
        "delete" | "rm" => cli_delete(&args[2..], &mut ledger, db),
        "export" => cli_export(&args[2..], &ledger),
        "clear" => cli_clear(&args[2..], db),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("expensetui {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("ExpenseTUI - local-only personal expense tracker");
    println!();
    println!("Usage: expensetui [command]");
    println!();
    println!("Commands:");
    println!("  (none)                          Launch interactive TUI");
    println!("  add <description> <price>       Record an expense (price in whole rupiah)");
    println!("    --at <YYYY-MM-DDTHH:MM>       Local date and time (default: now)");
    println!("  list [YYYY-MM|all]              List expenses, newest first");
    println!("  summary [YYYY-MM|all]           Print total and per-month breakdown");
    println!("  months                          List months that have expenses");
    println!("  delete <id> [--yes]             Delete an expense by id");
    println!("  export [path]                   Export expenses to CSV");
    println!("    --month <YYYY-MM>             Month to export (default: all)");
    println!("  clear [--yes]                   Delete every stored expense");
    println!("  --help, -h                      Show this help");
    println!("  --version, -V                   Show version");
    println!();
    println!("Environment:");
    println!("  EXPENSETUI_DB                   Database path override");
    println!("  EXPENSETUI_LOG                  Log filter (default: info)");
}

/// Value following `flag` in `args`, if present.
fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

/// Arguments that are neither flags nor flag values.
fn positional(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--at" | "--month" => {
                iter.next();
            }
            a if a.starts_with("--") => {}
            a => out.push(a),
        }
    }
    out
}

fn parse_filter(arg: Option<&str>) -> Result<MonthFilter> {
    arg.map_or(Ok(MonthFilter::All), str::parse)
}

fn persist(effects: &[Effect], ledger: &Ledger, db: &Database) -> Result<()> {
    if effects.contains(&Effect::Persist) {
        db.save_expenses(ledger.expenses())?;
    }
    Ok(())
}

fn cli_add(args: &[String], ledger: &mut Ledger, db: &mut Database) -> Result<()> {
    let pos = positional(args);
    let [description, price] = pos[..] else {
        anyhow::bail!("Usage: expensetui add <description> <price> [--at YYYY-MM-DDTHH:MM]");
    };

    let mut form = ExpenseForm::new(Local::now().naive_local());
    form.description = description.to_string();
    form.price = price.to_string();
    if let Some(at) = flag_value(args, "--at") {
        let (date, time) = at
            .split_once('T')
            .or_else(|| at.split_once(' '))
            .with_context(|| format!("Invalid --at '{at}', expected YYYY-MM-DDTHH:MM"))?;
        form.custom_date = true;
        form.date = date.to_string();
        form.time = time.to_string();
    }

    let expense = form.validate(Utc::now(), &Local)?;
    let summary = format!(
        "Saved #{}: {} {} ({})",
        expense.id,
        expense.description,
        format_rupiah(expense.price),
        format_long_datetime(&expense.date.with_timezone(&Local)),
    );
    let effects = ledger.apply(Command::Add(expense));
    persist(&effects, ledger, db)?;
    println!("{summary}");
    Ok(())
}

fn cli_list(args: &[String], ledger: &Ledger) -> Result<()> {
    let filter = parse_filter(positional(args).first().copied())?;
    let view = compute_view(ledger.expenses(), filter, &Local);

    if view.is_empty() {
        println!("{}", crate::ui::util::EMPTY_LIST_MESSAGE);
        return Ok(());
    }

    println!(
        "{:<14} {:<28} {:<30} {:>14}",
        "ID", "Tanggal", "Deskripsi", "Harga"
    );
    println!("{}", "─".repeat(89));
    for expense in &view.entries {
        println!(
            "{:<14} {:<28} {:<30} {:>14}",
            expense.id,
            format_long_datetime(&expense.date.with_timezone(&Local)),
            truncate(&expense.description, 30),
            format_rupiah(expense.price),
        );
    }
    println!("{}", "─".repeat(89));
    println!(
        "Total {}: {}",
        filter_label(view.filter),
        format_rupiah(view.total)
    );
    Ok(())
}

fn cli_summary(args: &[String], ledger: &Ledger) -> Result<()> {
    let filter = parse_filter(positional(args).first().copied())?;
    let view = compute_view(ledger.expenses(), filter, &Local);

    println!("ExpenseTUI - {}", filter_label(view.filter));
    println!("{}", "─".repeat(40));
    println!("  Total:        {}", format_rupiah(view.total));
    println!("  Pengeluaran:  {}", view.entries.len());

    let mut by_month: BTreeMap<MonthKey, Vec<rust_decimal::Decimal>> = BTreeMap::new();
    for expense in &view.entries {
        by_month
            .entry(expense.month_key(&Local))
            .or_default()
            .push(expense.price);
    }

    if by_month.len() > 1 {
        println!();
        println!("Per Bulan:");
        for (key, prices) in by_month.iter().rev() {
            println!(
                "  {:<20} {:>14}  ({})",
                month_label(*key),
                format_rupiah(sum_prices(prices.iter().copied())),
                prices.len()
            );
        }
    }
    Ok(())
}

fn cli_months(ledger: &Ledger) -> Result<()> {
    if ledger.is_empty() {
        println!("No expenses");
        return Ok(());
    }
    for key in &ledger.view(&Local).months {
        println!("{key}  {}", month_label(*key));
    }
    Ok(())
}

fn cli_delete(args: &[String], ledger: &mut Ledger, db: &mut Database) -> Result<()> {
    let id: i64 = positional(args)
        .first()
        .context("Usage: expensetui delete <id> [--yes]")?
        .parse()
        .context("Expense id must be a number")?;

    let Some(expense) = ledger.find(id) else {
        println!("No expense with id {id}");
        return Ok(());
    };
    let description = expense.description.clone();

    if !args.iter().any(|a| a == "--yes" || a == "-y") && !confirm(&description)? {
        println!("Dibatalkan");
        return Ok(());
    }

    let effects = ledger.apply(Command::Delete(id));
    persist(&effects, ledger, db)?;
    println!("Dihapus: {description}");
    Ok(())
}

fn cli_clear(args: &[String], db: &mut Database) -> Result<()> {
    if !args.iter().any(|a| a == "--yes" || a == "-y") && !confirm("semua pengeluaran")? {
        println!("Dibatalkan");
        return Ok(());
    }
    if db.clear_slot(crate::db::EXPENSES_SLOT)? {
        tracing::info!("cleared expenses slot");
        println!("Semua pengeluaran dihapus");
    } else {
        println!("No expenses");
    }
    Ok(())
}

fn confirm(description: &str) -> Result<bool> {
    print!("Yakin hapus '{description}'? [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y"))
}

fn cli_export(args: &[String], ledger: &Ledger) -> Result<()> {
    let filter = parse_filter(flag_value(args, "--month"))?;
    let view = compute_view(ledger.expenses(), filter, &Local);

    // Output path is the first non-flag argument
    let output_path = positional(args)
        .first()
        .map(|a| shellexpand(a))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            format!("{home}/expensetui-export-{}.csv", view.filter)
        });

    let count = CsvExporter::write_to_path(Path::new(&output_path), &view.entries, &Local)?;
    if count == 0 {
        println!("No expenses for {}", filter_label(view.filter));
    } else {
        println!("Exported {count} expenses to {output_path}");
    }
    Ok(())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

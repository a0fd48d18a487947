use anyhow::Result;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::ledger::Ledger;
use crate::models::{
    allowed_categories, is_supported_currency, Direction, CURRENCIES, EXPENSE_CATEGORIES,
    INCOME_CATEGORIES,
};
use crate::store::SqliteStore;
use crate::summary;
use crate::ui::util::{format_amount, format_date};

pub(crate) fn as_cli(args: &[String], ledger: &mut Ledger<SqliteStore>) -> Result<()> {
    match args[1].as_str() {
        "add-income" | "income" => cli_add(&args[2..], Direction::Credit, ledger),
        "add-expense" | "expense" => cli_add(&args[2..], Direction::Debit, ledger),
        "delete" | "rm" => cli_delete(&args[2..], ledger),
        "list" | "ls" => cli_list(ledger),
        "summary" | "s" => cli_summary(ledger),
        "balance" | "b" => cli_balance(ledger),
        "currency" => cli_currency(&args[2..], ledger),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("tally {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("Tally — local-only income and expense tracker");
    println!();
    println!("Usage: tally [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!(
        "  add-income <amount> <cat>     Record an income ({})",
        INCOME_CATEGORIES.join(", ")
    );
    println!(
        "  add-expense <amount> <cat>    Record an expense ({})",
        EXPENSE_CATEGORIES.join(", ")
    );
    println!("  delete <id>                   Delete a transaction by id");
    println!("  list                          Print the transaction feed, most recent first");
    println!("  summary                       Print balance and per-category expense shares");
    println!("  balance                       Print the current balance");
    println!("  currency [symbol]             Show or set the display currency");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("Set TALLY_ANY_CATEGORY=1 to allow free-form category labels.");
}

fn cli_add(args: &[String], direction: Direction, ledger: &mut Ledger<SqliteStore>) -> Result<()> {
    let (Some(amount_arg), Some(category)) = (args.first(), args.get(1)) else {
        anyhow::bail!(
            "Usage: tally add-{} <amount> <category>\nCategories: {}",
            direction.label(),
            allowed_categories(direction).join(", ")
        );
    };

    let amount = Decimal::from_str(amount_arg)
        .map_err(|_| anyhow::anyhow!("Not a number: '{amount_arg}'"))?;

    let id = match direction {
        Direction::Credit => ledger.add_income(amount, category)?,
        Direction::Debit => ledger.add_expense(amount, category)?,
    };

    let currency = super::current_currency(ledger);
    println!(
        "Added {} of {} ({category}) with id {id}",
        direction.label(),
        format_amount(amount, &currency)
    );
    println!("Balance: {}", format_amount(ledger.balance(), &currency));
    Ok(())
}

fn cli_delete(args: &[String], ledger: &mut Ledger<SqliteStore>) -> Result<()> {
    let Some(id_arg) = args.first() else {
        anyhow::bail!("Usage: tally delete <id>");
    };
    let id: i64 = id_arg
        .parse()
        .map_err(|_| anyhow::anyhow!("Not an id: '{id_arg}'"))?;

    ledger.delete_transaction(id)?;

    let currency = super::current_currency(ledger);
    println!("Deleted transaction {id}");
    println!("Balance: {}", format_amount(ledger.balance(), &currency));
    Ok(())
}

fn cli_list(ledger: &mut Ledger<SqliteStore>) -> Result<()> {
    let feed = ledger.list_transactions()?;
    if feed.is_empty() {
        println!("No transactions");
        return Ok(());
    }

    let currency = super::current_currency(ledger);
    println!("{:<6} {:<17} {:<8} {:<15} Amount", "ID", "Date", "Type", "Category");
    println!("{}", "─".repeat(62));
    for txn in &feed {
        let sign = if txn.is_expense() { "-" } else { "+" };
        println!(
            "{:<6} {:<17} {:<8} {:<15} {sign}{}",
            txn.id.unwrap_or(0),
            format_date(&txn.date),
            txn.direction.label(),
            txn.category,
            format_amount(txn.amount, &currency),
        );
    }
    Ok(())
}

fn cli_summary(ledger: &mut Ledger<SqliteStore>) -> Result<()> {
    let currency = super::current_currency(ledger);
    let expenses = ledger.expenses()?;
    let totals = summary::category_totals(&expenses);
    let percentages = summary::category_percentages(&expenses);

    println!("Tally");
    println!("{}", "─".repeat(40));
    println!("  Balance:    {}", format_amount(ledger.balance(), &currency));
    println!("  Total Txns: {}", ledger.list_transactions()?.len());

    if !totals.is_empty() {
        println!();
        println!("Expenses by category:");
        let mut rows: Vec<_> = totals.iter().collect();
        rows.sort_by(|a, b| b.1.cmp(a.1));
        for (category, total) in rows {
            let share = percentages.get(category).copied().unwrap_or_default();
            println!(
                "  {category:<16} {:>12} {share:>7}%",
                format_amount(*total, &currency)
            );
        }
    }

    Ok(())
}

fn cli_balance(ledger: &mut Ledger<SqliteStore>) -> Result<()> {
    let currency = super::current_currency(ledger);
    println!("{}", format_amount(ledger.balance(), &currency));
    Ok(())
}

fn cli_currency(args: &[String], ledger: &mut Ledger<SqliteStore>) -> Result<()> {
    match args.first() {
        Some(symbol) => {
            if !is_supported_currency(symbol) {
                anyhow::bail!(
                    "Unsupported currency '{symbol}'. Supported: {}",
                    CURRENCIES
                        .iter()
                        .map(|(s, _)| *s)
                        .collect::<Vec<_>>()
                        .join(", ")
                );
            }
            ledger.store_mut().set_setting("currency", symbol)?;
            println!("Display currency set to {symbol}");
        }
        None => {
            let current = super::current_currency(ledger);
            for (symbol, name) in CURRENCIES {
                let marker = if *symbol == current { "*" } else { " " };
                println!("{marker} {symbol:<4} {name}");
            }
        }
    }
    Ok(())
}

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::ledger::Ledger;
use crate::models::{Direction, CURRENCIES};
use crate::store::SqliteStore;
use crate::ui::app::{App, InputMode, PendingAction, Screen};
use crate::ui::render;
use crate::ui::util::{format_amount, scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(ledger: &mut Ledger<SqliteStore>) -> Result<()> {
    let mut app = App::new(super::current_currency(ledger));
    app.refresh(ledger)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, ledger);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    ledger: &mut Ledger<SqliteStore>,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // Rows available for the feed table (tab, status, input bars + borders/header)
            let content_height = f.area().height.saturating_sub(6) as usize;
            app.visible_rows = content_height.max(1);
            render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, ledger)?,
                InputMode::Adding => handle_adding_input(key, app, ledger)?,
                InputMode::Confirm => handle_confirm_input(key, app, ledger)?,
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(
    key: event::KeyEvent,
    app: &mut App,
    ledger: &mut Ledger<SqliteStore>,
) -> Result<()> {
    match key.code {
        KeyCode::Char('q') => {
            app.running = false;
        }
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
        }
        KeyCode::Char('1') => app.screen = Screen::Feed,
        KeyCode::Char('2') => app.screen = Screen::Summary,
        KeyCode::Tab | KeyCode::BackTab => {
            app.screen = match app.screen {
                Screen::Feed => Screen::Summary,
                Screen::Summary => Screen::Feed,
            };
        }
        KeyCode::Char('j') | KeyCode::Down => {
            scroll_down(
                &mut app.feed_index,
                &mut app.feed_scroll,
                app.feed.len(),
                app.visible_rows,
            );
        }
        KeyCode::Char('k') | KeyCode::Up => {
            scroll_up(&mut app.feed_index, &mut app.feed_scroll);
        }
        KeyCode::Char('g') => scroll_to_top(&mut app.feed_index, &mut app.feed_scroll),
        KeyCode::Char('G') => scroll_to_bottom(
            &mut app.feed_index,
            &mut app.feed_scroll,
            app.feed.len(),
            app.visible_rows,
        ),
        KeyCode::Char('i') => app.begin_add(Direction::Credit),
        KeyCode::Char('e') => app.begin_add(Direction::Debit),
        KeyCode::Char('D') => {
            let target = app.selected_transaction().and_then(|txn| {
                let label = format!(
                    "{} {} ({})",
                    txn.direction.label(),
                    format_amount(txn.amount, &app.currency),
                    txn.category
                );
                txn.id.map(|id| (id, label))
            });
            match target {
                Some((id, label)) => {
                    app.confirm_message = format!("Delete {label}?");
                    app.pending_action = Some(PendingAction::DeleteTransaction { id, label });
                    app.input_mode = InputMode::Confirm;
                }
                None => app.set_status("Nothing to delete"),
            }
        }
        KeyCode::Char('c') => cycle_currency(app, ledger),
        _ => {}
    }
    Ok(())
}

fn handle_adding_input(
    key: event::KeyEvent,
    app: &mut App,
    ledger: &mut Ledger<SqliteStore>,
) -> Result<()> {
    match key.code {
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.set_status("Cancelled");
        }
        KeyCode::Tab | KeyCode::Right => {
            app.add_category_index = (app.add_category_index + 1) % app.add_categories().len();
        }
        KeyCode::BackTab | KeyCode::Left => {
            let len = app.add_categories().len();
            app.add_category_index = (app.add_category_index + len - 1) % len;
        }
        KeyCode::Backspace => {
            app.add_amount.pop();
        }
        KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => {
            app.add_amount.push(c);
        }
        KeyCode::Enter => submit_add(app, ledger)?,
        _ => {}
    }
    Ok(())
}

fn submit_add(app: &mut App, ledger: &mut Ledger<SqliteStore>) -> Result<()> {
    let amount = match app.add_amount.parse() {
        Ok(a) => a,
        Err(_) => {
            app.set_status(format!("Not a number: '{}'", app.add_amount));
            return Ok(());
        }
    };

    let category = app.add_category();
    let result = match app.add_direction {
        Direction::Credit => ledger.add_income(amount, category),
        Direction::Debit => ledger.add_expense(amount, category),
    };

    match result {
        Ok(_) => {
            app.set_status(format!(
                "Added {} of {} ({category})",
                app.add_direction.label(),
                format_amount(amount, &app.currency),
            ));
            app.input_mode = InputMode::Normal;
            app.refresh(ledger)?;
        }
        // Rejected input: keep the form open so it can be corrected.
        Err(e) if e.is_validation() => app.set_status(format!("Invalid input: {e}")),
        // Storage failure: nothing was recorded, balance unchanged.
        Err(e) => {
            app.set_status(format!("Error: {e}"));
            app.input_mode = InputMode::Normal;
        }
    }
    Ok(())
}

fn handle_confirm_input(
    key: event::KeyEvent,
    app: &mut App,
    ledger: &mut Ledger<SqliteStore>,
) -> Result<()> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            if let Some(PendingAction::DeleteTransaction { id, label }) = app.pending_action.take()
            {
                match ledger.delete_transaction(id) {
                    Ok(()) => {
                        app.set_status(format!("Deleted {label}"));
                        app.refresh(ledger)?;
                    }
                    // Stale row in the view: resync with the store.
                    Err(e) if e.is_not_found() => {
                        app.set_status(format!("Error: {e}"));
                        app.refresh(ledger)?;
                    }
                    Err(e) => app.set_status(format!("Error: {e}")),
                }
            }
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.pending_action = None;
            app.input_mode = InputMode::Normal;
            app.set_status("Cancelled");
        }
        _ => {}
    }
    Ok(())
}

/// Step to the next display currency and persist the choice.
fn cycle_currency(app: &mut App, ledger: &mut Ledger<SqliteStore>) {
    let current = CURRENCIES
        .iter()
        .position(|(s, _)| *s == app.currency)
        .unwrap_or(0);
    let (symbol, name) = CURRENCIES[(current + 1) % CURRENCIES.len()];

    match ledger.store_mut().set_setting("currency", symbol) {
        Ok(()) => {
            app.currency = symbol.to_string();
            app.set_status(format!("Currency: {name} ({symbol})"));
        }
        Err(e) => app.set_status(format!("Error: {e}")),
    }
}

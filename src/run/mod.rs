mod cli;
mod tui;

pub(crate) use cli::as_cli;
pub(crate) use tui::as_tui;

use crate::ledger::Ledger;
use crate::models::DEFAULT_CURRENCY;
use crate::store::SqliteStore;

/// The persisted display currency, falling back to the default.
fn current_currency(ledger: &Ledger<SqliteStore>) -> String {
    ledger
        .store()
        .get_setting("currency")
        .ok()
        .flatten()
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_string())
}

use anyhow::Result;
use rust_decimal::Decimal;

use crate::ledger::Ledger;
use crate::models::{allowed_categories, Direction, Transaction};
use crate::store::Store;
use crate::summary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Feed,
    Summary,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[Self::Feed, Self::Summary]
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Feed => write!(f, "Feed"),
            Self::Summary => write!(f, "Summary"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Adding,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Adding => write!(f, "ADD"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Pending action that requires user confirmation.
#[derive(Debug, Clone)]
pub(crate) enum PendingAction {
    DeleteTransaction { id: i64, label: String },
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) status_message: String,
    pub(crate) currency: String,

    // Ledger snapshot (read-only mirror; the ledger owns the truth)
    pub(crate) balance: Decimal,
    pub(crate) feed: Vec<Transaction>,
    pub(crate) feed_index: usize,
    pub(crate) feed_scroll: usize,

    // Summary rows: (category, total, share of grand total in %)
    pub(crate) summary_rows: Vec<(String, Decimal, Decimal)>,

    // Add form
    pub(crate) add_direction: Direction,
    pub(crate) add_amount: String,
    pub(crate) add_category_index: usize,

    // Confirmation
    pub(crate) pending_action: Option<PendingAction>,
    pub(crate) confirm_message: String,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(currency: String) -> Self {
        Self {
            running: true,
            screen: Screen::Feed,
            input_mode: InputMode::Normal,
            status_message: String::new(),
            currency,

            balance: Decimal::ZERO,
            feed: Vec::new(),
            feed_index: 0,
            feed_scroll: 0,

            summary_rows: Vec::new(),

            add_direction: Direction::Debit,
            add_amount: String::new(),
            add_category_index: 0,

            pending_action: None,
            confirm_message: String::new(),

            visible_rows: 20,
        }
    }

    /// Pull a fresh snapshot of the ledger: feed, balance, and summary.
    pub(crate) fn refresh<S: Store>(&mut self, ledger: &Ledger<S>) -> Result<()> {
        self.feed = ledger.list_transactions()?;
        self.balance = ledger.balance();

        let expenses = ledger.expenses()?;
        let totals = summary::category_totals(&expenses);
        let percentages = summary::category_percentages(&expenses);
        let mut rows: Vec<(String, Decimal, Decimal)> = totals
            .into_iter()
            .map(|(category, total)| {
                let share = percentages.get(&category).copied().unwrap_or_default();
                (category, total, share)
            })
            .collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1));
        self.summary_rows = rows;

        if self.feed_index >= self.feed.len() && !self.feed.is_empty() {
            self.feed_index = self.feed.len() - 1;
        }
        Ok(())
    }

    pub(crate) fn begin_add(&mut self, direction: Direction) {
        self.input_mode = InputMode::Adding;
        self.add_direction = direction;
        self.add_amount.clear();
        self.add_category_index = 0;
    }

    /// The category set offered by the add form.
    pub(crate) fn add_categories(&self) -> &'static [&'static str] {
        allowed_categories(self.add_direction)
    }

    pub(crate) fn add_category(&self) -> &'static str {
        let categories = self.add_categories();
        categories[self.add_category_index % categories.len()]
    }

    pub(crate) fn selected_transaction(&self) -> Option<&Transaction> {
        self.feed.get(self.feed_index)
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}

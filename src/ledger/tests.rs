#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::error::StoreError;
use crate::store::SqliteStore;

fn new_ledger() -> Ledger<SqliteStore> {
    Ledger::open(SqliteStore::open_in_memory().unwrap(), CategoryPolicy::Closed).unwrap()
}

fn dated(direction: Direction, amount: Decimal, category: &str, date: &str) -> Transaction {
    Transaction {
        id: None,
        direction,
        amount,
        category: category.into(),
        date: date.into(),
    }
}

/// Store double whose writes can be made to fail while reads keep working.
struct FlakyStore {
    inner: SqliteStore,
    fail_writes: bool,
}

impl FlakyStore {
    fn new() -> Self {
        Self {
            inner: SqliteStore::open_in_memory().unwrap(),
            fail_writes: false,
        }
    }
}

impl Store for FlakyStore {
    fn insert(&mut self, txn: &Transaction) -> Result<i64, StoreError> {
        if self.fail_writes {
            return Err(StoreError::Sqlite(rusqlite::Error::InvalidQuery));
        }
        self.inner.insert(txn)
    }

    fn delete(&mut self, id: i64) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Sqlite(rusqlite::Error::InvalidQuery));
        }
        self.inner.delete(id)
    }

    fn get(&self, id: i64) -> Result<Option<Transaction>, StoreError> {
        self.inner.get(id)
    }

    fn query_all(&self, direction: Option<Direction>) -> Result<Vec<Transaction>, StoreError> {
        self.inner.query_all(direction)
    }
}

// ── Empty state ───────────────────────────────────────────────

#[test]
fn test_fresh_ledger_is_empty() {
    let ledger = new_ledger();
    assert_eq!(ledger.balance(), Decimal::ZERO);
    assert!(ledger.list_transactions().unwrap().is_empty());
}

// ── Balance rules ─────────────────────────────────────────────

#[test]
fn test_income_increases_balance() {
    let mut ledger = new_ledger();
    ledger.add_income(dec!(100), "salary").unwrap();
    assert_eq!(ledger.balance(), dec!(100));
}

#[test]
fn test_expense_decreases_balance() {
    let mut ledger = new_ledger();
    ledger.add_income(dec!(100), "salary").unwrap();
    ledger.add_expense(dec!(30.50), "food").unwrap();
    assert_eq!(ledger.balance(), dec!(69.50));
}

#[test]
fn test_balance_may_go_negative() {
    let mut ledger = new_ledger();
    ledger.add_expense(dec!(25), "rent").unwrap();
    assert_eq!(ledger.balance(), dec!(-25));
}

#[test]
fn test_balance_matches_recomputation() {
    let mut ledger = new_ledger();
    ledger.add_income(dec!(1000), "salary").unwrap();
    ledger.add_expense(dec!(12.34), "food").unwrap();
    let id = ledger.add_expense(dec!(0.01), "other").unwrap();
    ledger.add_income(dec!(5), "transfers").unwrap();
    ledger.delete_transaction(id).unwrap();

    let recomputed = recompute_balance(ledger.store()).unwrap();
    assert_eq!(ledger.balance(), recomputed);
    assert_eq!(ledger.balance(), dec!(992.66));
}

#[test]
fn test_open_recomputes_from_store() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    store
        .insert(&dated(Direction::Credit, dec!(200), "salary", "2024-01-01T00:00:00+00:00"))
        .unwrap();
    store
        .insert(&dated(Direction::Debit, dec!(75.25), "rent", "2024-01-02T00:00:00+00:00"))
        .unwrap();

    let ledger = Ledger::open(store, CategoryPolicy::Closed).unwrap();
    assert_eq!(ledger.balance(), dec!(124.75));
}

// ── Round-trip ────────────────────────────────────────────────

#[test]
fn test_add_then_delete_restores_state() {
    let mut ledger = new_ledger();
    ledger.add_income(dec!(500), "salary").unwrap();

    let before_balance = ledger.balance();
    let before_feed = ledger.list_transactions().unwrap();

    let id = ledger.add_expense(dec!(50), "food").unwrap();
    ledger.delete_transaction(id).unwrap();

    assert_eq!(ledger.balance(), before_balance);
    assert_eq!(ledger.list_transactions().unwrap(), before_feed);
}

#[test]
fn test_delete_income_subtracts() {
    let mut ledger = new_ledger();
    let id = ledger.add_income(dec!(80), "salary").unwrap();
    ledger.add_income(dec!(20), "transfers").unwrap();
    ledger.delete_transaction(id).unwrap();
    assert_eq!(ledger.balance(), dec!(20));
}

// ── Deletion errors ───────────────────────────────────────────

#[test]
fn test_delete_unknown_id() {
    let mut ledger = new_ledger();
    let err = ledger.delete_transaction(12345).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_double_delete_is_not_found() {
    let mut ledger = new_ledger();
    let id = ledger.add_expense(dec!(10), "food").unwrap();
    ledger.delete_transaction(id).unwrap();
    let err = ledger.delete_transaction(id).unwrap_err();
    assert!(err.is_not_found());
}

// ── Validation ────────────────────────────────────────────────

#[test]
fn test_rejects_negative_amount() {
    let mut ledger = new_ledger();
    let err = ledger.add_expense(dec!(-5), "food").unwrap_err();
    assert!(err.is_validation());
    assert_eq!(ledger.balance(), Decimal::ZERO);
    assert!(ledger.list_transactions().unwrap().is_empty());
}

#[test]
fn test_rejects_zero_amount() {
    let mut ledger = new_ledger();
    assert!(ledger.add_expense(dec!(0), "food").unwrap_err().is_validation());
    assert!(ledger.add_income(dec!(0), "salary").unwrap_err().is_validation());
}

#[test]
fn test_closed_policy_rejects_unknown_category() {
    let mut ledger = new_ledger();
    let err = ledger.add_expense(dec!(100), "unknown_category").unwrap_err();
    assert!(err.is_validation());

    // Income and expense sets are separate: "food" is not an income category.
    let err = ledger.add_income(dec!(100), "food").unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn test_open_policy_accepts_any_label() {
    let mut ledger =
        Ledger::open(SqliteStore::open_in_memory().unwrap(), CategoryPolicy::Open).unwrap();
    ledger.add_expense(dec!(10), "llama grooming").unwrap();
    assert_eq!(ledger.balance(), dec!(-10));

    // Blank labels are still rejected.
    assert!(ledger.add_expense(dec!(10), "  ").unwrap_err().is_validation());
}

// ── Feed ordering ─────────────────────────────────────────────

#[test]
fn test_feed_is_most_recent_first() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    store
        .insert(&dated(Direction::Credit, dec!(1), "salary", "2024-01-01T09:00:00+00:00"))
        .unwrap();
    store
        .insert(&dated(Direction::Debit, dec!(2), "food", "2024-01-02T09:00:00+00:00"))
        .unwrap();
    store
        .insert(&dated(Direction::Debit, dec!(3), "rent", "2024-01-03T09:00:00+00:00"))
        .unwrap();

    let ledger = Ledger::open(store, CategoryPolicy::Closed).unwrap();
    let feed = ledger.list_transactions().unwrap();
    let dates: Vec<&str> = feed.iter().map(|t| t.date.as_str()).collect();
    assert_eq!(
        dates,
        vec![
            "2024-01-03T09:00:00+00:00",
            "2024-01-02T09:00:00+00:00",
            "2024-01-01T09:00:00+00:00",
        ]
    );
}

#[test]
fn test_feed_ties_break_by_insertion_order() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    let same = "2024-01-05T12:00:00+00:00";
    let first = store
        .insert(&dated(Direction::Debit, dec!(1), "food", same))
        .unwrap();
    let second = store
        .insert(&dated(Direction::Credit, dec!(2), "salary", same))
        .unwrap();
    let third = store
        .insert(&dated(Direction::Debit, dec!(3), "rent", same))
        .unwrap();

    let ledger = Ledger::open(store, CategoryPolicy::Closed).unwrap();
    let feed = ledger.list_transactions().unwrap();
    let ids: Vec<i64> = feed.iter().filter_map(|t| t.id).collect();
    assert_eq!(ids, vec![first, second, third]);
}

#[test]
fn test_feed_merges_both_directions() {
    let mut ledger = new_ledger();
    ledger.add_income(dec!(100), "salary").unwrap();
    ledger.add_expense(dec!(40), "food").unwrap();
    ledger.add_expense(dec!(10), "transport").unwrap();

    let feed = ledger.list_transactions().unwrap();
    assert_eq!(feed.len(), 3);
    assert_eq!(feed.iter().filter(|t| t.is_income()).count(), 1);
    assert_eq!(feed.iter().filter(|t| t.is_expense()).count(), 2);
}

#[test]
fn test_expenses_excludes_incomes() {
    let mut ledger = new_ledger();
    ledger.add_income(dec!(100), "salary").unwrap();
    ledger.add_expense(dec!(40), "food").unwrap();

    let expenses = ledger.expenses().unwrap();
    assert_eq!(expenses.len(), 1);
    assert!(expenses[0].is_expense());
}

// ── Persistence failure ───────────────────────────────────────

#[test]
fn test_failed_insert_leaves_balance_unchanged() {
    let mut ledger = Ledger::open(FlakyStore::new(), CategoryPolicy::Closed).unwrap();
    ledger.add_income(dec!(100), "salary").unwrap();

    ledger.store_mut().fail_writes = true;
    let err = ledger.add_expense(dec!(40), "food").unwrap_err();
    assert!(matches!(err, LedgerError::Store(_)));
    assert_eq!(ledger.balance(), dec!(100));

    ledger.store_mut().fail_writes = false;
    assert_eq!(ledger.list_transactions().unwrap().len(), 1);
}

#[test]
fn test_failed_delete_leaves_balance_unchanged() {
    let mut ledger = Ledger::open(FlakyStore::new(), CategoryPolicy::Closed).unwrap();
    let id = ledger.add_income(dec!(100), "salary").unwrap();

    ledger.store_mut().fail_writes = true;
    let err = ledger.delete_transaction(id).unwrap_err();
    assert!(matches!(err, LedgerError::Store(_)));
    assert_eq!(ledger.balance(), dec!(100));

    // The record is still there and deletable once the store recovers.
    ledger.store_mut().fail_writes = false;
    ledger.delete_transaction(id).unwrap();
    assert_eq!(ledger.balance(), Decimal::ZERO);
}

#![allow(clippy::unwrap_used)]

use super::*;
use rust_decimal_macros::dec;

fn txn(direction: Direction, amount: Decimal, category: &str, date: &str) -> Transaction {
    Transaction {
        id: None,
        direction,
        amount,
        category: category.into(),
        date: date.into(),
    }
}

// ── CRUD ──────────────────────────────────────────────────────

#[test]
fn test_insert_and_get() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    let id = store
        .insert(&txn(
            Direction::Debit,
            dec!(5.25),
            "food",
            "2024-05-21T10:00:00+00:00",
        ))
        .unwrap();

    let fetched = store.get(id).unwrap().unwrap();
    assert_eq!(fetched.id, Some(id));
    assert_eq!(fetched.direction, Direction::Debit);
    assert_eq!(fetched.amount, dec!(5.25));
    assert_eq!(fetched.category, "food");
    assert_eq!(fetched.date, "2024-05-21T10:00:00+00:00");
}

#[test]
fn test_get_unknown_id() {
    let store = SqliteStore::open_in_memory().unwrap();
    assert!(store.get(99999).unwrap().is_none());
}

#[test]
fn test_ids_unique_across_directions() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    let a = store
        .insert(&txn(Direction::Credit, dec!(1), "salary", "2024-01-01T00:00:00+00:00"))
        .unwrap();
    let b = store
        .insert(&txn(Direction::Debit, dec!(1), "food", "2024-01-01T00:00:00+00:00"))
        .unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_delete() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    let id = store
        .insert(&txn(Direction::Credit, dec!(10), "salary", "2024-01-01T00:00:00+00:00"))
        .unwrap();
    store.delete(id).unwrap();
    assert!(store.get(id).unwrap().is_none());
    assert!(store.query_all(None).unwrap().is_empty());
}

#[test]
fn test_amount_text_roundtrip() {
    // Stored as TEXT; must come back without binary-float drift.
    let mut store = SqliteStore::open_in_memory().unwrap();
    for amount in [dec!(0.01), dec!(1234567.89), dec!(0.1)] {
        let id = store
            .insert(&txn(Direction::Debit, amount, "other", "2024-01-01T00:00:00+00:00"))
            .unwrap();
        assert_eq!(store.get(id).unwrap().unwrap().amount, amount);
    }
}

// ── Queries ───────────────────────────────────────────────────

#[test]
fn test_query_all_by_direction() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    store
        .insert(&txn(Direction::Credit, dec!(100), "salary", "2024-01-01T00:00:00+00:00"))
        .unwrap();
    store
        .insert(&txn(Direction::Debit, dec!(30), "food", "2024-01-02T00:00:00+00:00"))
        .unwrap();
    store
        .insert(&txn(Direction::Debit, dec!(20), "transport", "2024-01-03T00:00:00+00:00"))
        .unwrap();

    let incomes = store.query_all(Some(Direction::Credit)).unwrap();
    assert_eq!(incomes.len(), 1);
    assert_eq!(incomes[0].category, "salary");

    let expenses = store.query_all(Some(Direction::Debit)).unwrap();
    assert_eq!(expenses.len(), 2);

    let all = store.query_all(None).unwrap();
    assert_eq!(all.len(), 3);
}

#[test]
fn test_query_all_insertion_order() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    let ids: Vec<i64> = (1..=5)
        .map(|i| {
            store
                .insert(&txn(
                    Direction::Debit,
                    Decimal::from(i),
                    "other",
                    "2024-01-01T00:00:00+00:00",
                ))
                .unwrap()
        })
        .collect();

    let all = store.query_all(None).unwrap();
    let got: Vec<i64> = all.iter().filter_map(|t| t.id).collect();
    assert_eq!(got, ids);
}

// ── Settings ──────────────────────────────────────────────────

#[test]
fn test_settings_roundtrip() {
    let mut store = SqliteStore::open_in_memory().unwrap();
    assert!(store.get_setting("currency").unwrap().is_none());

    store.set_setting("currency", "€").unwrap();
    assert_eq!(store.get_setting("currency").unwrap().as_deref(), Some("€"));

    // Upsert overwrites
    store.set_setting("currency", "£").unwrap();
    assert_eq!(store.get_setting("currency").unwrap().as_deref(), Some("£"));
}

// ── Durability ────────────────────────────────────────────────

#[test]
fn test_reopen_preserves_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tally.db");

    let id = {
        let mut store = SqliteStore::open(&path).unwrap();
        store
            .insert(&txn(Direction::Credit, dec!(55.50), "salary", "2024-01-01T00:00:00+00:00"))
            .unwrap()
    };

    let store = SqliteStore::open(&path).unwrap();
    let fetched = store.get(id).unwrap().unwrap();
    assert_eq!(fetched.amount, dec!(55.50));
}

#[test]
fn test_migrate_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tally.db");
    // Opening twice runs migrate twice against the same file.
    SqliteStore::open(&path).unwrap();
    let store = SqliteStore::open(&path).unwrap();
    assert!(store.query_all(None).unwrap().is_empty());
}

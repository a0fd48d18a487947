mod schema;

use rusqlite::{params, Connection};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::error::StoreError;
use crate::models::{Direction, Transaction};

/// Durable keyed storage of transactions. The ledger owns a store and is the
/// only writer; existence checks for deletes happen at the ledger level, so
/// every error out of here is a genuine storage failure.
pub(crate) trait Store {
    /// Persist a new transaction, returning its fresh id.
    fn insert(&mut self, txn: &Transaction) -> Result<i64, StoreError>;

    /// Remove a persisted transaction by id.
    fn delete(&mut self, id: i64) -> Result<(), StoreError>;

    /// Fetch a single transaction, `None` if the id is unknown.
    fn get(&self, id: i64) -> Result<Option<Transaction>, StoreError>;

    /// All transactions of one direction, or of both when `direction` is
    /// `None`. Returned in insertion order (id ascending).
    fn query_all(&self, direction: Option<Direction>) -> Result<Vec<Transaction>, StoreError>;
}

pub(crate) struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub(crate) fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
        let mut store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let mut store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&mut self) -> Result<(), StoreError> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            // Fresh database - apply full schema
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    // ── Settings ──────────────────────────────────────────────

    pub(crate) fn get_setting(&self, key: &str) -> Result<Option<String>, StoreError> {
        let result = self.conn.query_row(
            "SELECT value FROM settings WHERE key = ?1",
            params![key],
            |row| row.get(0),
        );
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub(crate) fn set_setting(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO settings (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = ?2",
            params![key, value],
        )?;
        Ok(())
    }
}

impl Store for SqliteStore {
    fn insert(&mut self, txn: &Transaction) -> Result<i64, StoreError> {
        self.conn.execute(
            "INSERT INTO transactions (direction, amount, category, date)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                txn.direction.as_str(),
                txn.amount.to_string(),
                txn.category,
                txn.date,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn delete(&mut self, id: i64) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM transactions WHERE id = ?1", params![id])?;
        Ok(())
    }

    fn get(&self, id: i64) -> Result<Option<Transaction>, StoreError> {
        let result = self.conn.query_row(
            "SELECT id, direction, amount, category, date FROM transactions WHERE id = ?1",
            params![id],
            decode_row,
        );
        match result {
            Ok(txn) => Ok(Some(txn)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn query_all(&self, direction: Option<Direction>) -> Result<Vec<Transaction>, StoreError> {
        let rows = match direction {
            Some(d) => {
                let mut stmt = self.conn.prepare(
                    "SELECT id, direction, amount, category, date FROM transactions
                     WHERE direction = ?1 ORDER BY id",
                )?;
                let rows = stmt.query_map(params![d.as_str()], decode_row)?;
                rows.collect::<std::result::Result<Vec<_>, _>>()?
            }
            None => {
                let mut stmt = self.conn.prepare(
                    "SELECT id, direction, amount, category, date FROM transactions ORDER BY id",
                )?;
                let rows = stmt.query_map([], decode_row)?;
                rows.collect::<std::result::Result<Vec<_>, _>>()?
            }
        };
        Ok(rows)
    }
}

fn decode_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Transaction> {
    let direction_str: String = row.get(1)?;
    let direction = Direction::parse(&direction_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            1,
            rusqlite::types::Type::Text,
            format!("unknown direction tag: '{direction_str}'").into(),
        )
    })?;
    let amount_str: String = row.get(2)?;
    let amount = Decimal::from_str(&amount_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(Transaction {
        id: Some(row.get(0)?),
        direction,
        amount,
        category: row.get(3)?,
        date: row.get(4)?,
    })
}

#[cfg(test)]
mod tests;

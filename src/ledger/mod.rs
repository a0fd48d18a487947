use rust_decimal::Decimal;

use crate::error::LedgerError;
use crate::models::{is_known_category, CategoryPolicy, Direction, Transaction};
use crate::store::Store;

/// The ledger: persisted incomes and expenses plus the running balance.
///
/// Owns its store (no shared global state) and is the only writer to it.
/// Mutations take `&mut self`, so the single-writer invariant is enforced by
/// the borrow checker rather than assumed. The balance is maintained
/// incrementally and always equals the full recomputation from the store:
/// persistence happens first, and the balance is only touched once the store
/// write has succeeded.
pub(crate) struct Ledger<S: Store> {
    store: S,
    policy: CategoryPolicy,
    balance: Decimal,
}

impl<S: Store> Ledger<S> {
    /// Open a ledger over a store, recomputing the balance by full scan.
    pub(crate) fn open(store: S, policy: CategoryPolicy) -> Result<Self, LedgerError> {
        let balance = recompute_balance(&store)?;
        Ok(Self {
            store,
            policy,
            balance,
        })
    }

    /// Record an income. Returns the new transaction's id.
    pub(crate) fn add_income(
        &mut self,
        amount: Decimal,
        category: &str,
    ) -> Result<i64, LedgerError> {
        self.add(Direction::Credit, amount, category)
    }

    /// Record an expense. Returns the new transaction's id.
    pub(crate) fn add_expense(
        &mut self,
        amount: Decimal,
        category: &str,
    ) -> Result<i64, LedgerError> {
        self.add(Direction::Debit, amount, category)
    }

    fn add(
        &mut self,
        direction: Direction,
        amount: Decimal,
        category: &str,
    ) -> Result<i64, LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(amount));
        }
        self.validate_category(direction, category)?;

        let txn = Transaction::new(direction, amount, category.to_string());
        let id = self.store.insert(&txn)?;
        self.balance += txn.signed_amount();
        Ok(id)
    }

    fn validate_category(
        &self,
        direction: Direction,
        category: &str,
    ) -> Result<(), LedgerError> {
        match self.policy {
            CategoryPolicy::Closed => {
                if !is_known_category(direction, category) {
                    return Err(LedgerError::UnknownCategory {
                        direction,
                        category: category.to_string(),
                    });
                }
            }
            CategoryPolicy::Open => {
                if category.trim().is_empty() {
                    return Err(LedgerError::BlankCategory);
                }
            }
        }
        Ok(())
    }

    /// Remove a transaction and reverse its balance effect exactly.
    /// A second delete for the same id is an error, not a no-op; silently
    /// swallowing it would hide stale references in the caller.
    pub(crate) fn delete_transaction(&mut self, id: i64) -> Result<(), LedgerError> {
        let txn = self.store.get(id)?.ok_or(LedgerError::NotFound(id))?;
        self.store.delete(id)?;
        self.balance -= txn.signed_amount();
        Ok(())
    }

    /// The merged feed: incomes and expenses together, most recent first.
    /// Equal timestamps keep insertion order, oldest inserted first.
    /// A fresh snapshot of the store on every call.
    pub(crate) fn list_transactions(&self) -> Result<Vec<Transaction>, LedgerError> {
        let mut feed = self.store.query_all(Some(Direction::Credit))?;
        feed.extend(self.store.query_all(Some(Direction::Debit))?);
        feed.sort_by(|a, b| b.date.cmp(&a.date).then(a.id.cmp(&b.id)));
        Ok(feed)
    }

    /// All expenses in insertion order, for category summaries.
    pub(crate) fn expenses(&self) -> Result<Vec<Transaction>, LedgerError> {
        Ok(self.store.query_all(Some(Direction::Debit))?)
    }

    /// The incrementally maintained balance.
    pub(crate) fn balance(&self) -> Decimal {
        self.balance
    }

    pub(crate) fn store(&self) -> &S {
        &self.store
    }

    pub(crate) fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

/// Balance from scratch: sum of incomes minus sum of expenses.
fn recompute_balance<S: Store>(store: &S) -> Result<Decimal, LedgerError> {
    let total = store
        .query_all(None)?
        .iter()
        .map(Transaction::signed_amount)
        .sum();
    Ok(total)
}

#[cfg(test)]
mod tests;

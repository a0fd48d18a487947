//! Category summaries: pure functions over an expense snapshot.
//! Nothing here is persisted; callers recompute on demand.

use rust_decimal::Decimal;
use std::collections::BTreeMap;

use crate::models::Transaction;

/// Partition expenses by category label. Keys are the labels present in the
/// input; within a group, input order is preserved.
pub(crate) fn group_by_category(
    expenses: &[Transaction],
) -> BTreeMap<String, Vec<&Transaction>> {
    let mut groups: BTreeMap<String, Vec<&Transaction>> = BTreeMap::new();
    for txn in expenses {
        groups.entry(txn.category.clone()).or_default().push(txn);
    }
    groups
}

/// Sum of amounts per category.
pub(crate) fn category_totals(expenses: &[Transaction]) -> BTreeMap<String, Decimal> {
    let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();
    for txn in expenses {
        *totals.entry(txn.category.clone()).or_default() += txn.amount;
    }
    totals
}

/// Each category's share of the grand total, in percent, rounded to two
/// decimal places. An empty input has no grand total to divide by and
/// yields an empty map rather than an error.
pub(crate) fn category_percentages(expenses: &[Transaction]) -> BTreeMap<String, Decimal> {
    let totals = category_totals(expenses);
    let grand_total: Decimal = totals.values().copied().sum();
    if grand_total.is_zero() {
        return BTreeMap::new();
    }
    totals
        .into_iter()
        .map(|(category, total)| {
            (category, (total / grand_total * Decimal::ONE_HUNDRED).round_dp(2))
        })
        .collect()
}

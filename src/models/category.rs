use super::Direction;

pub(crate) const INCOME_CATEGORIES: &[&str] = &["salary", "transfers"];

pub(crate) const EXPENSE_CATEGORIES: &[&str] = &[
    "transport",
    "food",
    "subscriptions",
    "entertainment",
    "bills",
    "rent",
    "tax",
    "tickets",
    "clothes",
    "transfers",
    "other",
];

/// Whether category labels are restricted to the built-in sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum CategoryPolicy {
    /// Only labels from the built-in set for the direction are accepted.
    #[default]
    Closed,
    /// Any non-blank label is accepted.
    Open,
}

/// The built-in category set for a direction.
pub(crate) fn allowed_categories(direction: Direction) -> &'static [&'static str] {
    match direction {
        Direction::Credit => INCOME_CATEGORIES,
        Direction::Debit => EXPENSE_CATEGORIES,
    }
}

pub(crate) fn is_known_category(direction: Direction, category: &str) -> bool {
    allowed_categories(direction).contains(&category)
}

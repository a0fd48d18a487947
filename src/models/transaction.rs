use rust_decimal::Decimal;

/// Which way a transaction moves the balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    /// Income: adds to the balance.
    Credit,
    /// Expense: subtracts from the balance.
    Debit,
}

impl Direction {
    /// Storage tag. Stable, never shown to the user.
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Credit => "credit",
            Self::Debit => "debit",
        }
    }

    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s {
            "credit" => Some(Self::Credit),
            "debit" => Some(Self::Debit),
            _ => None,
        }
    }

    /// User-facing name.
    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::Credit => "income",
            Self::Debit => "expense",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A single ledger entry. `amount` is always a positive magnitude;
/// the direction tag carries the sign.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Transaction {
    pub id: Option<i64>,
    pub direction: Direction,
    pub amount: Decimal,
    pub category: String,
    pub date: String,
}

impl Transaction {
    /// A fresh, not-yet-persisted entry stamped with the current UTC time.
    pub(crate) fn new(direction: Direction, amount: Decimal, category: String) -> Self {
        Self {
            id: None,
            direction,
            amount,
            category,
            date: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub(crate) fn is_income(&self) -> bool {
        self.direction == Direction::Credit
    }

    pub(crate) fn is_expense(&self) -> bool {
        self.direction == Direction::Debit
    }

    /// The amount with its balance effect applied: positive for income,
    /// negative for expense.
    pub(crate) fn signed_amount(&self) -> Decimal {
        match self.direction {
            Direction::Credit => self.amount,
            Direction::Debit => -self.amount,
        }
    }
}

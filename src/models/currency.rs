/// Display currencies: (symbol, full name). The symbol is a label only,
/// never a conversion rate.
pub(crate) const CURRENCIES: &[(&str, &str)] = &[
    ("$", "US Dollar"),
    ("€", "Euro"),
    ("£", "British Pound"),
    ("CHF", "Swiss Franc"),
    ("¥", "Chinese Yuan"),
    ("kr", "Swedish Krona"),
    ("₩", "South Korean Won"),
    ("₺", "Turkish Lira"),
    ("₹", "Indian Rupee"),
    ("₽", "Russian Ruble"),
    ("₪", "New Israeli Shekel"),
    ("₴", "Ukrainian Hryvnia"),
    ("د.إ", "UAE Dirham"),
];

pub(crate) const DEFAULT_CURRENCY: &str = "$";

pub(crate) fn is_supported_currency(symbol: &str) -> bool {
    CURRENCIES.iter().any(|(s, _)| *s == symbol)
}

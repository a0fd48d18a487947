mod category;
mod currency;
mod transaction;

pub(crate) use category::{
    allowed_categories, is_known_category, CategoryPolicy, EXPENSE_CATEGORIES, INCOME_CATEGORIES,
};
pub(crate) use currency::{is_supported_currency, CURRENCIES, DEFAULT_CURRENCY};
pub(crate) use transaction::{Direction, Transaction};

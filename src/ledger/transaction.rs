//! Transaction records and their category labels.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use super::month::MonthKey;

/// One ledger entry. The sign of `amount` is the sole income/expense
/// discriminator: positive is income, negative is expense, zero is a no-op.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// Session-scoped identity, assigned at construction and never persisted.
    /// The backing file addresses rows purely by position.
    pub id: Uuid,
    pub date: NaiveDate,
    pub category: Category,
    pub description: String,
    pub amount: Decimal,
}

impl Transaction {
    pub fn new(
        date: NaiveDate,
        category: Category,
        description: impl Into<String>,
        amount: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            category,
            description: description.into(),
            amount,
        }
    }

    /// The month bucket this entry falls into.
    pub fn month_key(&self) -> MonthKey {
        MonthKey::from_date(self.date)
    }

    pub fn is_income(&self) -> bool {
        self.amount > Decimal::ZERO
    }

    pub fn is_expense(&self) -> bool {
        self.amount < Decimal::ZERO
    }
}

/// Label classifying a transaction for rollup reporting.
///
/// The input form offers the fixed set below, but the store accepts any
/// label: unknown strings survive load and save as [`Category::Custom`] so
/// externally edited files keep working.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    Income,
    Food,
    Transport,
    Shopping,
    Bills,
    Other,
    Custom(String),
}

impl Category {
    /// The fixed set offered by the input form.
    pub const FIXED: [Category; 6] = [
        Category::Income,
        Category::Food,
        Category::Transport,
        Category::Shopping,
        Category::Bills,
        Category::Other,
    ];

    /// Maps a label to its category; never fails. Unknown labels become
    /// [`Category::Custom`] with the original text preserved.
    pub fn from_label(label: &str) -> Self {
        let trimmed = label.trim();
        for known in &Self::FIXED {
            if trimmed.eq_ignore_ascii_case(known.as_label()) {
                return known.clone();
            }
        }
        Category::Custom(trimmed.to_string())
    }

    pub fn as_label(&self) -> &str {
        match self {
            Category::Income => "Income",
            Category::Food => "Food",
            Category::Transport => "Transport",
            Category::Shopping => "Shopping",
            Category::Bills => "Bills",
            Category::Other => "Other",
            Category::Custom(label) => label,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

impl FromStr for Category {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Category::from_label(s))
    }
}

impl Serialize for Category {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_label())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        Ok(Category::from_label(&label))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_labels_map_to_fixed_categories() {
        assert_eq!(Category::from_label("Food"), Category::Food);
        assert_eq!(Category::from_label("income"), Category::Income);
        assert_eq!(Category::from_label(" Bills "), Category::Bills);
    }

    #[test]
    fn unknown_labels_round_trip_as_custom() {
        let category = Category::from_label("Vet");
        assert_eq!(category, Category::Custom("Vet".into()));
        assert_eq!(category.as_label(), "Vet");
    }

    #[test]
    fn sign_classifies_income_and_expense() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let income = Transaction::new(date, Category::Income, "Salary", Decimal::from(52000));
        let expense = Transaction::new(date, Category::Food, "Groceries", Decimal::from(-1200));
        let zero = Transaction::new(date, Category::Other, "", Decimal::ZERO);
        assert!(income.is_income() && !income.is_expense());
        assert!(expense.is_expense() && !expense.is_income());
        assert!(!zero.is_income() && !zero.is_expense());
    }
}

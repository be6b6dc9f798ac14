//! Pure derived views over a ledger snapshot.
//!
//! Nothing here mutates the store or observes process state; every function
//! is a deterministic projection of its input.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::ledger::{Category, Ledger, MonthKey, Transaction};

/// Income, expense, and balance totals for a set of transactions.
///
/// `expenses` is kept negative; callers display the magnitude. The identity
/// `balance == income + expenses` holds exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PeriodSummary {
    pub income: Decimal,
    pub expenses: Decimal,
    pub balance: Decimal,
}

pub struct ReportService;

impl ReportService {
    /// Distinct months present in the ledger, sorted ascending.
    pub fn available_months(ledger: &Ledger) -> Vec<MonthKey> {
        let mut months: Vec<MonthKey> = ledger.iter().map(Transaction::month_key).collect();
        months.sort_unstable();
        months.dedup();
        months
    }

    /// The subsequence of transactions in the given month. With no month
    /// selected the full ledger is returned unfiltered.
    pub fn filter_by_month(ledger: &Ledger, month: Option<&MonthKey>) -> Ledger {
        match month {
            None => ledger.clone(),
            Some(key) => Ledger::from_entries(
                ledger
                    .iter()
                    .filter(|txn| txn.month_key() == *key)
                    .cloned()
                    .collect(),
            ),
        }
    }

    /// Sums positive amounts into `income` and negative amounts into
    /// `expenses`; zero amounts contribute to neither side.
    pub fn aggregate(ledger: &Ledger) -> PeriodSummary {
        let mut summary = PeriodSummary::default();
        for txn in ledger {
            if txn.amount > Decimal::ZERO {
                summary.income += txn.amount;
            } else if txn.amount < Decimal::ZERO {
                summary.expenses += txn.amount;
            }
        }
        summary.balance = summary.income + summary.expenses;
        summary
    }

    /// The most negative amount in the ledger, or `None` without expenses.
    ///
    /// Always computed over the full, unfiltered ledger — unlike the other
    /// metrics this one is not month-scoped.
    pub fn largest_expense(ledger: &Ledger) -> Option<Decimal> {
        ledger
            .iter()
            .map(|txn| txn.amount)
            .filter(|amount| *amount < Decimal::ZERO)
            .min()
    }

    /// Expense magnitude per category. Categories with no expenses are
    /// absent rather than present with zero; iteration order is not part of
    /// the contract.
    pub fn category_totals(ledger: &Ledger) -> HashMap<Category, Decimal> {
        let mut totals: HashMap<Category, Decimal> = HashMap::new();
        for txn in ledger.iter().filter(|txn| txn.is_expense()) {
            *totals.entry(txn.category.clone()).or_insert(Decimal::ZERO) += txn.amount;
        }
        for value in totals.values_mut() {
            *value = value.abs();
        }
        totals
    }

    /// The category with the largest expense magnitude; ties are broken
    /// arbitrarily by map iteration order.
    pub fn top_category(ledger: &Ledger) -> Option<(Category, Decimal)> {
        Self::category_totals(ledger)
            .into_iter()
            .max_by(|a, b| a.1.cmp(&b.1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn txn(date: (i32, u32, u32), category: Category, amount: i64) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            category,
            "",
            Decimal::from(amount),
        )
    }

    #[test]
    fn empty_ledger_aggregates_to_zero() {
        let ledger = Ledger::new();
        let summary = ReportService::aggregate(&ledger);
        assert_eq!(summary, PeriodSummary::default());
        assert!(ReportService::category_totals(&ledger).is_empty());
        assert_eq!(ReportService::largest_expense(&ledger), None);
        assert!(ReportService::available_months(&ledger).is_empty());
    }

    #[test]
    fn zero_amounts_count_toward_neither_side() {
        let ledger = Ledger::from_entries(vec![
            txn((2024, 3, 1), Category::Income, 100),
            txn((2024, 3, 2), Category::Other, 0),
            txn((2024, 3, 3), Category::Food, -40),
        ]);
        let summary = ReportService::aggregate(&ledger);
        assert_eq!(summary.income, Decimal::from(100));
        assert_eq!(summary.expenses, Decimal::from(-40));
        assert_eq!(summary.balance, summary.income + summary.expenses);
    }
}

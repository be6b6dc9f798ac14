use chrono::NaiveDate;
use rust_decimal::Decimal;

use finsight_core::{
    core::services::{PeriodSummary, ReportService},
    ledger::{Category, Ledger, MonthKey, Transaction},
};

fn txn(date: (i32, u32, u32), category: Category, description: &str, amount: i64) -> Transaction {
    Transaction::new(
        NaiveDate::from_ymd_opt(date.0, date.1, date.2).expect("valid date"),
        category,
        description,
        Decimal::from(amount),
    )
}

/// Ledger from the reference scenario: salary plus two expenses in March.
fn march_ledger() -> Ledger {
    Ledger::from_entries(vec![
        txn((2024, 3, 1), Category::Income, "Salary", 52000),
        txn((2024, 3, 5), Category::Food, "Groceries", -1200),
        txn((2024, 3, 6), Category::Transport, "Bus", -300),
    ])
}

#[test]
fn empty_ledger_yields_zero_aggregates() {
    let ledger = Ledger::new();
    assert_eq!(ReportService::aggregate(&ledger), PeriodSummary::default());
    assert!(ReportService::category_totals(&ledger).is_empty());
    assert_eq!(ReportService::largest_expense(&ledger), None);
    assert_eq!(ReportService::top_category(&ledger), None);
    assert!(ReportService::available_months(&ledger).is_empty());
}

#[test]
fn march_scenario_aggregates_income_expenses_and_balance() {
    let summary = ReportService::aggregate(&march_ledger());
    assert_eq!(summary.income, Decimal::from(52000));
    assert_eq!(summary.expenses, Decimal::from(-1500));
    assert_eq!(summary.balance, Decimal::from(50500));
}

#[test]
fn march_scenario_totals_expenses_per_category() {
    let totals = ReportService::category_totals(&march_ledger());
    assert_eq!(totals.len(), 2);
    assert_eq!(totals.get(&Category::Food), Some(&Decimal::from(1200)));
    assert_eq!(totals.get(&Category::Transport), Some(&Decimal::from(300)));
    assert!(!totals.contains_key(&Category::Income));
}

#[test]
fn march_scenario_largest_expense_is_most_negative() {
    assert_eq!(
        ReportService::largest_expense(&march_ledger()),
        Some(Decimal::from(-1200))
    );
}

#[test]
fn top_category_has_the_largest_magnitude() {
    let (category, total) = ReportService::top_category(&march_ledger()).expect("has expenses");
    assert_eq!(category, Category::Food);
    assert_eq!(total, Decimal::from(1200));
}

#[test]
fn amount_sign_decides_the_side_and_zero_counts_for_neither() {
    let ledger = Ledger::from_entries(vec![
        txn((2024, 1, 1), Category::Income, "Pay", 1000),
        txn((2024, 1, 2), Category::Other, "Placeholder", 0),
        txn((2024, 1, 3), Category::Bills, "Rent", -700),
    ]);
    let summary = ReportService::aggregate(&ledger);
    assert_eq!(summary.income, Decimal::from(1000));
    assert_eq!(summary.expenses, Decimal::from(-700));
    assert_eq!(summary.balance, Decimal::from(300));

    let totals = ReportService::category_totals(&ledger);
    assert!(!totals.contains_key(&Category::Other), "zero rows are not expenses");
}

#[test]
fn balance_identity_holds_for_every_ledger() {
    let ledgers = [
        Ledger::new(),
        march_ledger(),
        Ledger::from_entries(vec![
            txn((2023, 12, 31), Category::Shopping, "Gift", -499),
            txn((2024, 1, 1), Category::Income, "Bonus", 2500),
            txn((2024, 1, 1), Category::Other, "", 0),
        ]),
    ];
    for ledger in &ledgers {
        let summary = ReportService::aggregate(ledger);
        assert_eq!(summary.balance, summary.income + summary.expenses);
    }
}

#[test]
fn available_months_sorts_ascending_regardless_of_row_order() {
    let ledger = Ledger::from_entries(vec![
        txn((2024, 3, 5), Category::Food, "Groceries", -1200),
        txn((2024, 2, 28), Category::Bills, "Electricity", -900),
        txn((2024, 3, 1), Category::Income, "Salary", 52000),
        txn((2024, 2, 2), Category::Transport, "Train", -250),
    ]);
    let months: Vec<String> = ReportService::available_months(&ledger)
        .iter()
        .map(MonthKey::to_string)
        .collect();
    assert_eq!(months, vec!["2024-02", "2024-03"]);
}

#[test]
fn filter_by_month_keeps_only_matching_rows() {
    let ledger = Ledger::from_entries(vec![
        txn((2024, 2, 2), Category::Transport, "Train", -250),
        txn((2024, 3, 1), Category::Income, "Salary", 52000),
        txn((2024, 3, 5), Category::Food, "Groceries", -1200),
    ]);
    let march: MonthKey = "2024-03".parse().expect("valid key");
    let filtered = ReportService::filter_by_month(&ledger, Some(&march));
    assert_eq!(filtered.len(), 2);
    assert!(filtered.iter().all(|txn| txn.month_key() == march));
}

#[test]
fn filter_without_a_month_returns_the_full_ledger() {
    let ledger = march_ledger();
    let unfiltered = ReportService::filter_by_month(&ledger, None);
    assert_eq!(unfiltered.len(), ledger.len());
}

#[test]
fn largest_expense_ignores_the_month_filter() {
    // February holds the biggest expense; filtering on March must not hide it.
    let ledger = Ledger::from_entries(vec![
        txn((2024, 2, 10), Category::Shopping, "Laptop", -80000),
        txn((2024, 3, 1), Category::Income, "Salary", 52000),
        txn((2024, 3, 5), Category::Food, "Groceries", -1200),
    ]);
    let march: MonthKey = "2024-03".parse().expect("valid key");
    let filtered = ReportService::filter_by_month(&ledger, Some(&march));

    assert_eq!(
        ReportService::largest_expense(&ledger),
        Some(Decimal::from(-80000))
    );
    // The filtered view alone would say otherwise; the full ledger wins.
    assert_eq!(
        ReportService::largest_expense(&filtered),
        Some(Decimal::from(-1200))
    );
}

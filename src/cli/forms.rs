//! Interactive prompts for creating and editing transactions.
//!
//! The form, not the store, constrains category input: users pick from the
//! fixed set or take the explicit custom escape hatch.

use chrono::{Local, NaiveDate};
use dialoguer::{theme::ColorfulTheme, Input, Select};
use rust_decimal::Decimal;

use crate::cli::core::CommandError;
use crate::ledger::Category;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Field values collected for a new or edited transaction.
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    pub date: NaiveDate,
    pub category: Category,
    pub description: String,
    pub amount: Decimal,
}

/// Runs the transaction form, prefilled from `existing` when editing.
pub fn transaction_form(
    theme: &ColorfulTheme,
    existing: Option<&TransactionDraft>,
) -> Result<TransactionDraft, CommandError> {
    let date = prompt_date(theme, existing.map(|draft| draft.date))?;
    let category = prompt_category(theme, existing.map(|draft| draft.category.clone()))?;
    let description = prompt_description(theme, existing.map(|draft| draft.description.clone()))?;
    let amount = prompt_amount(theme, existing.map(|draft| draft.amount))?;
    Ok(TransactionDraft {
        date,
        category,
        description,
        amount,
    })
}

fn prompt_date(theme: &ColorfulTheme, default: Option<NaiveDate>) -> Result<NaiveDate, CommandError> {
    let fallback = default.unwrap_or_else(|| Local::now().date_naive());
    let raw: String = Input::with_theme(theme)
        .with_prompt("Date (YYYY-MM-DD)")
        .default(fallback.format(DATE_FORMAT).to_string())
        .validate_with(|input: &String| -> Result<(), &str> {
            NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
                .map(|_| ())
                .map_err(|_| "expected a date in YYYY-MM-DD form")
        })
        .interact_text()?;
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|err| CommandError::Usage(format!("invalid date: {err}")))
}

fn prompt_category(
    theme: &ColorfulTheme,
    default: Option<Category>,
) -> Result<Category, CommandError> {
    let mut labels: Vec<String> = Category::FIXED
        .iter()
        .map(|category| category.to_string())
        .collect();
    labels.push("Custom…".into());

    let default_index = default
        .as_ref()
        .and_then(|category| Category::FIXED.iter().position(|known| known == category))
        .unwrap_or(0);
    let choice = Select::with_theme(theme)
        .with_prompt("Category")
        .items(&labels)
        .default(default_index)
        .interact()?;

    if choice == Category::FIXED.len() {
        let initial = match default {
            Some(Category::Custom(label)) => label,
            _ => String::new(),
        };
        let raw: String = Input::with_theme(theme)
            .with_prompt("Custom category")
            .with_initial_text(initial)
            .interact_text()?;
        Ok(Category::from_label(&raw))
    } else {
        Ok(Category::FIXED[choice].clone())
    }
}

fn prompt_description(
    theme: &ColorfulTheme,
    default: Option<String>,
) -> Result<String, CommandError> {
    let mut input = Input::<String>::with_theme(theme)
        .with_prompt("Description")
        .allow_empty(true);
    if let Some(existing) = default {
        input = input.default(existing).show_default(true);
    }
    Ok(input.interact_text()?)
}

fn prompt_amount(theme: &ColorfulTheme, default: Option<Decimal>) -> Result<Decimal, CommandError> {
    let kinds = ["Expense", "Income"];
    let default_kind = match default {
        Some(amount) if amount > Decimal::ZERO => 1,
        _ => 0,
    };
    let kind = Select::with_theme(theme)
        .with_prompt("Type")
        .items(&kinds)
        .default(default_kind)
        .interact()?;

    let mut input = Input::<String>::with_theme(theme)
        .with_prompt("Amount")
        .validate_with(|value: &String| -> Result<(), &str> {
            match value.trim().parse::<Decimal>() {
                Ok(amount) if amount >= Decimal::ZERO => Ok(()),
                Ok(_) => Err("enter the amount as a magnitude; the type sets the sign"),
                Err(_) => Err("expected a number"),
            }
        });
    if let Some(amount) = default {
        input = input.default(amount.abs().to_string());
    }
    let raw = input.interact_text()?;
    let magnitude: Decimal = raw
        .trim()
        .parse()
        .map_err(|err| CommandError::Usage(format!("invalid amount: {err}")))?;

    if kind == 0 {
        Ok(-magnitude)
    } else {
        Ok(magnitude)
    }
}

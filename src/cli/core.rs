//! Shell context, command dispatch, and command implementations.

use std::io;

use chrono::NaiveDate;
use dialoguer::theme::ColorfulTheme;
use rust_decimal::Decimal;
use rustyline::error::ReadlineError;
use strsim::levenshtein;
use thiserror::Error;

use crate::{
    config::{Config, ConfigManager},
    core::services::{ReportService, ServiceError, TransactionService},
    core::utils,
    errors::StoreError,
    ledger::{Category, Ledger, MonthKey, Transaction},
    storage::{CsvStore, StorageBackend},
};

use super::forms::{self, TransactionDraft};
use super::io as cli_io;
use super::output;

const DATE_FORMAT: &str = "%Y-%m-%d";
const SUGGESTION_DISTANCE: usize = 3;

/// Canonical commands with the summaries shown by `help`.
const COMMANDS: &[(&str, &str)] = &[
    ("dashboard", "Income, expenses, and balance for the active month"),
    ("list", "List transactions, optionally for a given YYYY-MM"),
    ("stats", "Category breakdown, top category, largest expense"),
    ("add", "Record a transaction"),
    ("edit", "Edit a transaction by row number"),
    ("delete", "Delete a transaction by row number"),
    ("months", "List months present in the ledger"),
    ("month", "Set or clear the month filter (YYYY-MM | all)"),
    ("budget", "Show, set, or clear the monthly budget"),
    ("help", "Show this command summary"),
    ("quit", "Exit the shell"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

/// Errors that abort the shell itself.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Readline(#[from] ReadlineError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Dialog(#[from] dialoguer::Error),
}

/// Errors from a single command; reported and the shell keeps running.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Service(#[from] ServiceError),
    #[error(transparent)]
    Dialog(#[from] dialoguer::Error),
}

pub type CommandResult = Result<(), CommandError>;

pub struct ShellContext {
    pub(crate) mode: CliMode,
    pub(crate) running: bool,
    store: CsvStore,
    config: Config,
    config_manager: ConfigManager,
    month: Option<MonthKey>,
    theme: ColorfulTheme,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let base = utils::app_data_dir();
        utils::ensure_dir(&base)?;

        let store = CsvStore::new(utils::ledger_file());
        let config_manager = ConfigManager::new()?;
        let config = match config_manager.load() {
            Ok(config) => config,
            Err(err) => {
                output::warning(format!(
                    "Could not read configuration ({err}); using defaults."
                ));
                Config::default()
            }
        };
        let month = config
            .last_month
            .as_deref()
            .and_then(|raw| raw.parse().ok());

        Ok(Self {
            mode,
            running: true,
            store,
            config,
            config_manager,
            month,
            theme: ColorfulTheme::default(),
        })
    }

    pub(crate) fn prompt(&self) -> String {
        match &self.month {
            Some(month) => format!("finsight {month}> "),
            None => "finsight> ".to_string(),
        }
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        COMMANDS.iter().map(|(name, _)| *name).collect()
    }

    pub(crate) fn print_warning(&self, message: &str) {
        cli_io::print_warning(message);
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        output::error(err.to_string());
        Ok(())
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode != CliMode::Interactive {
            return Ok(true);
        }
        Ok(dialoguer::Confirm::with_theme(&self.theme)
            .with_prompt("Exit FinSight?")
            .default(true)
            .interact()?)
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        match command {
            "dashboard" | "dash" => self.cmd_dashboard()?,
            "list" | "ls" => self.cmd_list(args)?,
            "stats" => self.cmd_stats(args)?,
            "add" => self.cmd_add(args)?,
            "edit" => self.cmd_edit(args)?,
            "delete" | "rm" => self.cmd_delete(args)?,
            "months" => self.cmd_months()?,
            "month" => self.cmd_month(args)?,
            "budget" => self.cmd_budget(args)?,
            "help" => self.cmd_help()?,
            "quit" | "exit" => return Ok(LoopControl::Exit),
            _ => {
                let mut message = format!("Unknown command `{raw}`.");
                if let Some(suggestion) = suggest_command(command) {
                    message.push_str(&format!(" Did you mean `{suggestion}`?"));
                }
                message.push_str(" Type `help` for the command list.");
                return Err(CommandError::Usage(message));
            }
        }
        Ok(LoopControl::Continue)
    }

    /// Every command re-reads the ledger from disk; mutations made by the
    /// previous command (or by anything else) are always visible.
    fn snapshot(&self) -> Result<Ledger, CommandError> {
        Ok(self.store.load()?)
    }

    fn cmd_dashboard(&self) -> CommandResult {
        let ledger = self.snapshot()?;
        let filtered = ReportService::filter_by_month(&ledger, self.month.as_ref());
        let summary = ReportService::aggregate(&filtered);
        let currency = &self.config.currency;

        output::section(match &self.month {
            Some(month) => format!("Dashboard — {month}"),
            None => "Dashboard — all months".to_string(),
        });

        let mut rows = Vec::new();
        if let Some(budget) = self.config.monthly_budget {
            rows.push(vec![
                "Monthly budget".to_string(),
                format_amount(currency, budget),
            ]);
        }
        rows.push(vec![
            "Income".to_string(),
            format_amount(currency, summary.income),
        ]);
        rows.push(vec![
            "Expenses".to_string(),
            format_amount(currency, summary.expenses.abs()),
        ]);
        rows.push(vec![
            "Balance".to_string(),
            format_amount(currency, summary.balance),
        ]);
        if let Some(budget) = self.config.monthly_budget {
            // expenses is negative, so the algebraic sum is what is left.
            rows.push(vec![
                "Budget remaining".to_string(),
                format_amount(currency, budget + summary.expenses),
            ]);
        }
        output::info(output::render_table(&["Metric", "Amount"], &rows));
        Ok(())
    }

    fn cmd_list(&self, args: &[&str]) -> CommandResult {
        let ledger = self.snapshot()?;
        let month = self.month_for(args)?;
        let filtered = ReportService::filter_by_month(&ledger, month.as_ref());

        output::section(match &month {
            Some(month) => format!("Transactions — {month}"),
            None => "Transactions — all months".to_string(),
        });

        if filtered.is_empty() {
            cli_io::print_info("No transactions recorded yet.");
            return Ok(());
        }

        let currency = &self.config.currency;
        let rows: Vec<Vec<String>> = filtered
            .iter()
            .enumerate()
            .map(|(index, txn)| {
                vec![
                    (index + 1).to_string(),
                    txn.date.format(DATE_FORMAT).to_string(),
                    txn.category.to_string(),
                    txn.description.clone(),
                    format_amount(currency, txn.amount),
                ]
            })
            .collect();
        output::info(output::render_table(
            &["#", "Date", "Category", "Description", "Amount"],
            &rows,
        ));
        Ok(())
    }

    fn cmd_stats(&self, args: &[&str]) -> CommandResult {
        let ledger = self.snapshot()?;
        let month = self.month_for(args)?;
        let filtered = ReportService::filter_by_month(&ledger, month.as_ref());
        let currency = &self.config.currency;

        output::section(match &month {
            Some(month) => format!("Statistics — {month}"),
            None => "Statistics — all months".to_string(),
        });

        let totals = ReportService::category_totals(&filtered);
        if totals.is_empty() {
            cli_io::print_info("No expenses to break down.");
        } else {
            let mut entries: Vec<(Category, Decimal)> = totals.into_iter().collect();
            entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.as_label().cmp(b.0.as_label())));
            let rows: Vec<Vec<String>> = entries
                .iter()
                .map(|(category, total)| {
                    vec![category.to_string(), format_amount(currency, *total)]
                })
                .collect();
            output::info(output::render_table(&["Category", "Spent"], &rows));
        }

        if let Some((category, total)) = ReportService::top_category(&filtered) {
            cli_io::print_info(format!(
                "Top category: {category} ({})",
                format_amount(currency, total)
            ));
        }
        // Deliberately full-ledger scoped, independent of the month filter.
        if let Some(amount) = ReportService::largest_expense(&ledger) {
            cli_io::print_info(format!(
                "Largest single expense (all time): {}",
                format_amount(currency, amount)
            ));
        }
        Ok(())
    }

    fn cmd_add(&self, args: &[&str]) -> CommandResult {
        let draft = if args.is_empty() {
            self.require_interactive("add <date> <category> <description> <amount>")?;
            forms::transaction_form(&self.theme, None)?
        } else {
            parse_inline_draft(args)?
        };

        let record = Transaction::new(draft.date, draft.category, draft.description, draft.amount);
        let summary = describe(&record);
        TransactionService::add(&self.store, record)?;
        cli_io::print_success(format!("Recorded {summary}."));
        Ok(())
    }

    fn cmd_edit(&self, args: &[&str]) -> CommandResult {
        let ledger = self.snapshot()?;
        let row = parse_row(args.first().copied(), ledger.len())?;
        let existing = ledger
            .get(row - 1)
            .ok_or_else(|| CommandError::Usage(format!("row {row} is out of range")))?;
        let id = existing.id;

        let draft = if args.len() > 1 {
            parse_inline_draft(&args[1..])?
        } else {
            self.require_interactive("edit <row> <date> <category> <description> <amount>")?;
            let prefill = TransactionDraft {
                date: existing.date,
                category: existing.category.clone(),
                description: existing.description.clone(),
                amount: existing.amount,
            };
            forms::transaction_form(&self.theme, Some(&prefill))?
        };

        let record = Transaction::new(draft.date, draft.category, draft.description, draft.amount);
        let summary = describe(&record);
        TransactionService::update(&self.store, &ledger, id, record)?;
        cli_io::print_success(format!("Row {row} is now {summary}."));
        Ok(())
    }

    fn cmd_delete(&self, args: &[&str]) -> CommandResult {
        let ledger = self.snapshot()?;
        let row = parse_row(args.first().copied(), ledger.len())?;
        let existing = ledger
            .get(row - 1)
            .ok_or_else(|| CommandError::Usage(format!("row {row} is out of range")))?;

        if self.mode == CliMode::Interactive {
            let prompt = format!("Delete row {row} ({})?", describe(existing));
            if !cli_io::confirm_action(&self.theme, &prompt, false)? {
                cli_io::print_info("Nothing deleted.");
                return Ok(());
            }
        }

        let removed = TransactionService::remove(&self.store, &ledger, existing.id)?;
        cli_io::print_success(format!("Deleted {}.", describe(&removed)));
        Ok(())
    }

    fn cmd_months(&self) -> CommandResult {
        let ledger = self.snapshot()?;
        let months = ReportService::available_months(&ledger);
        if months.is_empty() {
            cli_io::print_info("The ledger has no dated entries yet.");
            return Ok(());
        }
        for month in months {
            let marker = if Some(&month) == self.month.as_ref() {
                "  (active filter)"
            } else {
                ""
            };
            output::info(format!("{month}{marker}"));
        }
        Ok(())
    }

    fn cmd_month(&mut self, args: &[&str]) -> CommandResult {
        match args.first() {
            None => {
                match &self.month {
                    Some(month) => cli_io::print_info(format!("Active month filter: {month}")),
                    None => cli_io::print_info("No month filter; showing all months."),
                }
                Ok(())
            }
            Some(&"all") => {
                self.month = None;
                self.config.last_month = None;
                self.persist_config()?;
                cli_io::print_success("Cleared the month filter.");
                Ok(())
            }
            Some(raw) => {
                let month: MonthKey = raw
                    .parse()
                    .map_err(|err| CommandError::Usage(format!("{err}")))?;
                self.month = Some(month);
                self.config.last_month = Some(month.to_string());
                self.persist_config()?;
                cli_io::print_success(format!("Filtering on {month}."));
                Ok(())
            }
        }
    }

    fn cmd_budget(&mut self, args: &[&str]) -> CommandResult {
        match args.first() {
            None => {
                match self.config.monthly_budget {
                    Some(budget) => cli_io::print_info(format!(
                        "Monthly budget: {}",
                        format_amount(&self.config.currency, budget)
                    )),
                    None => cli_io::print_info("No monthly budget set."),
                }
                Ok(())
            }
            Some(&"clear") => {
                self.config.monthly_budget = None;
                self.persist_config()?;
                cli_io::print_success("Cleared the monthly budget.");
                Ok(())
            }
            Some(raw) => {
                let budget: Decimal = raw.parse().map_err(|_| {
                    CommandError::Usage(format!("invalid budget amount `{raw}`"))
                })?;
                if budget < Decimal::ZERO {
                    return Err(CommandError::Usage(
                        "the monthly budget cannot be negative".into(),
                    ));
                }
                self.config.monthly_budget = Some(budget);
                self.persist_config()?;
                cli_io::print_success(format!(
                    "Monthly budget set to {}.",
                    format_amount(&self.config.currency, budget)
                ));
                Ok(())
            }
        }
    }

    fn cmd_help(&self) -> CommandResult {
        let rows: Vec<Vec<String>> = COMMANDS
            .iter()
            .map(|(name, summary)| vec![name.to_string(), summary.to_string()])
            .collect();
        output::info(output::render_table(&["Command", "Description"], &rows));
        Ok(())
    }

    /// Month override from a command argument, falling back to the active
    /// filter.
    fn month_for(&self, args: &[&str]) -> Result<Option<MonthKey>, CommandError> {
        match args.first() {
            None => Ok(self.month),
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|err| CommandError::Usage(format!("{err}"))),
        }
    }

    fn require_interactive(&self, usage: &str) -> CommandResult {
        if self.mode == CliMode::Interactive {
            Ok(())
        } else {
            Err(CommandError::Usage(format!(
                "this command is interactive; in script mode use: {usage}"
            )))
        }
    }

    fn persist_config(&self) -> CommandResult {
        self.config_manager.save(&self.config)?;
        Ok(())
    }
}

fn parse_row(arg: Option<&str>, len: usize) -> Result<usize, CommandError> {
    let raw = arg.ok_or_else(|| CommandError::Usage("expected a row number".into()))?;
    let row: usize = raw
        .parse()
        .map_err(|_| CommandError::Usage(format!("invalid row number `{raw}`")))?;
    if row == 0 || row > len {
        return Err(CommandError::Usage(format!(
            "row {row} is out of range (the ledger has {len} rows)"
        )));
    }
    Ok(row)
}

fn parse_inline_draft(args: &[&str]) -> Result<TransactionDraft, CommandError> {
    if args.len() != 4 {
        return Err(CommandError::Usage(
            "expected <date> <category> <description> <amount>".into(),
        ));
    }
    let date = NaiveDate::parse_from_str(args[0], DATE_FORMAT)
        .map_err(|_| CommandError::Usage(format!("invalid date `{}`, expected YYYY-MM-DD", args[0])))?;
    let category = Category::from_label(args[1]);
    let description = args[2].to_string();
    let amount: Decimal = args[3]
        .parse()
        .map_err(|_| CommandError::Usage(format!("invalid amount `{}`", args[3])))?;
    Ok(TransactionDraft {
        date,
        category,
        description,
        amount,
    })
}

fn describe(record: &Transaction) -> String {
    if record.description.is_empty() {
        format!("{} / {} / {}", record.date, record.category, record.amount)
    } else {
        format!(
            "{} / {} / {} / {}",
            record.date, record.category, record.description, record.amount
        )
    }
}

fn format_amount(currency: &str, value: Decimal) -> String {
    if value < Decimal::ZERO {
        format!("-{currency}{}", value.abs())
    } else {
        format!("{currency}{value}")
    }
}

fn suggest_command(input: &str) -> Option<&'static str> {
    COMMANDS
        .iter()
        .map(|(name, _)| (*name, levenshtein(input, name)))
        .filter(|(_, distance)| *distance <= SUGGESTION_DISTANCE)
        .min_by_key(|(_, distance)| *distance)
        .map(|(name, _)| name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggests_close_command_names() {
        assert_eq!(suggest_command("lst"), Some("list"));
        assert_eq!(suggest_command("budgte"), Some("budget"));
        assert_eq!(suggest_command("zzzzzzzzz"), None);
    }

    #[test]
    fn parse_row_enforces_one_based_range() {
        assert!(parse_row(Some("0"), 3).is_err());
        assert!(parse_row(Some("4"), 3).is_err());
        assert!(parse_row(None, 3).is_err());
        assert_eq!(parse_row(Some("3"), 3).unwrap(), 3);
    }

    #[test]
    fn inline_draft_parses_fixed_field_order() {
        let draft = parse_inline_draft(&["2024-03-05", "Food", "Groceries", "-1200"]).unwrap();
        assert_eq!(draft.category, Category::Food);
        assert_eq!(draft.amount, Decimal::from(-1200));
        assert!(parse_inline_draft(&["2024-03-05", "Food"]).is_err());
        assert!(parse_inline_draft(&["bad", "Food", "x", "-1"]).is_err());
    }
}

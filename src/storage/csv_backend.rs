//! Flat CSV file backend: one row per transaction, header mandatory.

use std::{
    fs::{self, File, OpenOptions},
    io::BufReader,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use csv::WriterBuilder;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::{Category, Ledger, Transaction};

use super::{Result, StorageBackend};

const HEADER: [&str; 4] = ["date", "category", "description", "amount"];
const DATE_FORMAT: &str = "%Y-%m-%d";
const TMP_SUFFIX: &str = "tmp";

/// Stores the ledger as a UTF-8 comma-separated file with the fixed column
/// order `date,category,description,amount`. Row order is append order; the
/// store never sorts.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

/// Wire row, written in the fixed column order regardless of how the
/// in-memory record is laid out.
#[derive(Debug, Serialize)]
struct Row<'a> {
    date: String,
    category: &'a Category,
    description: &'a str,
    amount: Decimal,
}

impl<'a> Row<'a> {
    fn encode(record: &'a Transaction) -> Self {
        Self {
            date: record.date.format(DATE_FORMAT).to_string(),
            category: &record.category,
            description: &record.description,
            amount: record.amount,
        }
    }
}

/// Raw row as read from disk; fields are decoded leniently afterwards so a
/// single bad value drops the row instead of failing the load.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(default)]
    date: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    amount: String,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_header(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_path(&self.path)?;
        writer.write_record(HEADER)?;
        writer.flush()?;
        Ok(())
    }

    /// Rewrites the whole file, staging to a sibling temp file first so a
    /// failed write leaves the original intact.
    fn rewrite(&self, ledger: &Ledger) -> Result<()> {
        let tmp = tmp_path(&self.path);
        {
            let mut writer = WriterBuilder::new().has_headers(false).from_path(&tmp)?;
            writer.write_record(HEADER)?;
            for record in ledger.iter() {
                writer.serialize(Row::encode(record))?;
            }
            writer.flush()?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl StorageBackend for CsvStore {
    fn load(&self) -> Result<Ledger> {
        if !self.path.exists() {
            self.write_header()?;
            return Ok(Ledger::new());
        }
        let file = File::open(&self.path)?;
        let mut reader = csv::Reader::from_reader(BufReader::new(file));
        let mut entries = Vec::new();
        for (offset, result) in reader.deserialize::<RawRow>().enumerate() {
            // Header is line 1, so the first data row is line 2.
            let line = offset + 2;
            let raw = match result {
                Ok(raw) => raw,
                Err(err) => {
                    tracing::warn!(line, %err, "skipping malformed ledger row");
                    continue;
                }
            };
            if let Some(record) = decode_row(raw, line) {
                entries.push(record);
            }
        }
        Ok(Ledger::from_entries(entries))
    }

    fn append(&self, record: &Transaction) -> Result<()> {
        if !self.path.exists() {
            self.write_header()?;
        }
        let file = OpenOptions::new().append(true).open(&self.path)?;
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        writer.serialize(Row::encode(record))?;
        writer.flush()?;
        tracing::debug!(date = %record.date, amount = %record.amount, "appended transaction");
        Ok(())
    }

    fn replace_at(&self, index: usize, record: &Transaction) -> Result<()> {
        let mut ledger = self.load()?;
        ledger.replace(index, record.clone())?;
        self.rewrite(&ledger)?;
        tracing::debug!(index, "replaced transaction");
        Ok(())
    }

    fn delete_at(&self, index: usize) -> Result<()> {
        let mut ledger = self.load()?;
        ledger.remove(index)?;
        self.rewrite(&ledger)?;
        tracing::debug!(index, "deleted transaction");
        Ok(())
    }
}

fn decode_row(raw: RawRow, line: usize) -> Option<Transaction> {
    let date = match NaiveDate::parse_from_str(raw.date.trim(), DATE_FORMAT) {
        Ok(date) => date,
        Err(err) => {
            tracing::warn!(line, date = %raw.date, %err, "dropping row with unparsable date");
            return None;
        }
    };
    let amount = match raw.amount.trim().parse::<Decimal>() {
        Ok(amount) => amount,
        Err(err) => {
            tracing::warn!(line, amount = %raw.amount, %err, "dropping row with unparsable amount");
            return None;
        }
    };
    let category = Category::from_label(&raw.category);
    Some(Transaction::new(date, category, raw.description, amount))
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

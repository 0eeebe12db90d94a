//! Ledger file readers
//!
//! Input adapters that turn an exported ledger into the transaction list the
//! engine consumes. CSV files carry a `date,type,category,amount,description`
//! header (column order is free); JSON files hold an array of transactions.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::models::Transaction;

/// Drop rows the engine cannot use, logging each one
fn keep_usable(transactions: Vec<Transaction>) -> Vec<Transaction> {
    transactions
        .into_iter()
        .enumerate()
        .filter_map(|(index, tx)| {
            if tx.amount.is_finite() && tx.amount > 0.0 {
                Some(tx)
            } else {
                warn!(
                    row = index + 1,
                    amount = tx.amount,
                    date = %tx.date,
                    "Skipping ledger row with non-positive amount"
                );
                None
            }
        })
        .collect()
}

/// Read a CSV ledger
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut transactions = Vec::new();
    for result in rdr.deserialize() {
        let tx: Transaction = result?;
        transactions.push(tx);
    }

    Ok(keep_usable(transactions))
}

/// Read a JSON ledger (an array of transactions)
pub fn read_json<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let transactions: Vec<Transaction> = serde_json::from_reader(reader)?;
    Ok(keep_usable(transactions))
}

/// Read a ledger file, choosing the format by extension
pub fn load(path: &Path) -> Result<Vec<Transaction>> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    let reader = || -> Result<BufReader<File>> { Ok(BufReader::new(File::open(path)?)) };

    let transactions = match extension.as_deref() {
        Some("csv") => read_csv(reader()?)?,
        Some("json") => read_json(reader()?)?,
        _ => {
            return Err(Error::InvalidInput(format!(
                "Unsupported ledger format: {} (expected .csv or .json)",
                path.display()
            )))
        }
    };

    info!(
        path = %path.display(),
        count = transactions.len(),
        "Loaded ledger"
    );
    Ok(transactions)
}

//! Optional transaction sheet augmentation
//!
//! A workbook may carry a sheet of transactions (Application, Function, a
//! "...Type..." column, PGM, DESCR). Each one becomes an activity
//! `Application-Function-Type` of TYPE `TRAN` and a "Hogan Transaction" link.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

use crate::output::{append_records, write_records};
use crate::pipeline::{ACTIVITIES_FILE, LINKS_FILE, UNIQUE_ACTIVITIES_FILE};
use crate::records::{
    Activity, LinkRecord, TRANSACTION_LABEL, TRANSACTION_TYPE, UniqueActivity,
};
use crate::workbook::{Sheet, cell};

/// Column positions of a transaction sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionColumns {
    pub application: usize,
    pub function: usize,
    pub kind: usize,
    pub pgm: usize,
    pub descr: usize,
}

impl TransactionColumns {
    /// Match a sheet's trimmed headers against the transaction signature
    pub fn detect(sheet: &Sheet) -> Option<Self> {
        let trimmed: Vec<&str> = sheet.headers.iter().map(|h| h.trim()).collect();
        let find = |name: &str| trimmed.iter().position(|h| *h == name);

        Some(TransactionColumns {
            application: find("Application")?,
            function: find("Function")?,
            kind: trimmed.iter().position(|h| h.contains("Type"))?,
            pgm: find("PGM")?,
            descr: find("DESCR")?,
        })
    }
}

/// One row of the transaction sheet, trimmed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub activity: String,
    pub pgm: String,
    pub descr: String,
}

impl Transaction {
    pub fn to_activity(&self) -> Activity {
        Activity {
            activity: self.activity.clone(),
            kind: TRANSACTION_TYPE.to_string(),
            source: self.pgm.clone(),
            descr: self.descr.clone(),
        }
    }

    pub fn to_link(&self) -> LinkRecord {
        LinkRecord {
            activity: self.activity.clone(),
            kind: TRANSACTION_LABEL.to_string(),
            pgm_id: self.pgm.clone(),
        }
    }
}

/// First sheet, in workbook order, that looks like a transaction sheet
pub fn find_transaction_sheet(sheets: &[Sheet]) -> Option<(&Sheet, TransactionColumns)> {
    sheets
        .iter()
        .find_map(|s| TransactionColumns::detect(s).map(|cols| (s, cols)))
}

pub fn derive_transactions(sheet: &Sheet, cols: TransactionColumns) -> Vec<Transaction> {
    sheet
        .rows
        .iter()
        .map(|row| {
            let text = |idx| cell(row, idx).trim();
            Transaction {
                activity: format!(
                    "{}-{}-{}",
                    text(cols.application),
                    text(cols.function),
                    text(cols.kind)
                ),
                pgm: text(cols.pgm).to_string(),
                descr: text(cols.descr).to_string(),
            }
        })
        .collect()
}

/// Distinct (ACTIVITY, TYPE, DESCR.) triples in first-occurrence order
pub fn unique_activities(activities: &[Activity]) -> Vec<UniqueActivity> {
    let mut seen = HashSet::new();
    activities
        .iter()
        .map(UniqueActivity::from)
        .filter(|u| seen.insert(u.clone()))
        .collect()
}

/// Fold transaction data into the output folder's artifacts
///
/// Returns the number of transactions added, or `None` when the workbook has
/// no transaction sheet. In that case a unique_activities.csv left by an
/// earlier run is removed.
pub fn augment(sheets: &[Sheet], output_dir: &Path) -> Result<Option<usize>> {
    let Some((sheet, cols)) = find_transaction_sheet(sheets) else {
        log::warn!("No suitable sheet found for transaction extraction.");
        remove_stale(&output_dir.join(UNIQUE_ACTIVITIES_FILE))?;
        return Ok(None);
    };

    log::info!("Using sheet '{}' for transaction extraction", sheet.name);
    let transactions = derive_transactions(sheet, cols);

    let activities_path = output_dir.join(ACTIVITIES_FILE);
    let new_activities: Vec<Activity> = transactions.iter().map(Transaction::to_activity).collect();
    let all_activities = append_records(&activities_path, &new_activities)?;
    log::info!(
        "Appended {} transaction records to {} (new total: {})",
        new_activities.len(),
        activities_path.display(),
        all_activities.len()
    );

    let unique_path = output_dir.join(UNIQUE_ACTIVITIES_FILE);
    let unique = unique_activities(&all_activities);
    write_records(&unique_path, &unique)?;
    log::info!("Created {} with {} unique rows", unique_path.display(), unique.len());

    let links_path = output_dir.join(LINKS_FILE);
    let new_links: Vec<LinkRecord> = transactions.iter().map(Transaction::to_link).collect();
    let all_links = append_records(&links_path, &new_links)?;
    log::info!(
        "Appended {} {} records to {} (new total: {})",
        new_links.len(),
        TRANSACTION_LABEL,
        links_path.display(),
        all_links.len()
    );

    Ok(Some(transactions.len()))
}

fn remove_stale(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            log::info!("Removed stale {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("Failed to remove {}", path.display())),
    }
}

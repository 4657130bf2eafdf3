//! Reading linksData.csv

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::path::Path;

use crate::error::ImportError;

pub const REQUIRED_COLUMNS: [&str; 3] = ["ACTIVITY", "TYPE", "PGMID"];

/// One linksData.csv row; empty fields load as NULL
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LinkRow {
    #[serde(rename = "ACTIVITY")]
    pub activity: Option<String>,
    #[serde(rename = "TYPE")]
    pub kind: Option<String>,
    #[serde(rename = "PGMID")]
    pub pgm_id: Option<String>,
}

/// Parse every row of `path`, in file order
pub fn read_links(path: &Path) -> Result<Vec<LinkRow>> {
    let mut rdr = ReaderBuilder::new()
        .from_path(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

    let headers = rdr
        .headers()
        .with_context(|| format!("Failed to read CSV header: {}", path.display()))?;
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ImportError::MissingColumns {
            path: path.display().to_string(),
            missing,
        }
        .into());
    }

    let mut rows = Vec::new();
    for (idx, result) in rdr.deserialize().enumerate() {
        let row: LinkRow = result
            .with_context(|| format!("Failed to parse row {} of {}", idx + 1, path.display()))?;
        rows.push(row);
    }

    Ok(rows)
}

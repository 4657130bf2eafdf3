//! Workbook to CSV artifacts, end to end

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::columns::{ACTIVITY_COLUMNS, PROGRAM_COLUMNS, require_columns, resolve_aliases};
use crate::error::ExtractError;
use crate::mapping::{combine_links, link_mappings, partition, program_index, sql_mappings};
use crate::output::write_records;
use crate::records::{Activity, Program};
use crate::transactions;
use crate::workbook::{Sheet, cell, find_workbook, read_sheets, sheet_at};

pub const ACTIVITIES_FILE: &str = "activities.csv";
pub const PROGRAMS_FILE: &str = "programs.csv";
pub const LINK_MAPPING_FILE: &str = "activity_program_mapping.csv";
pub const SQL_MAPPING_FILE: &str = "sql_program_mapping.csv";
pub const LINKS_FILE: &str = "linksData.csv";
pub const UNIQUE_ACTIVITIES_FILE: &str = "unique_activities.csv";

/// Rows of linksData.csv echoed to the log after it is written
const SAMPLE_ROWS: usize = 5;

/// Counts reported at the end of a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub link_rows: usize,
    pub matched: usize,
    pub sql_rows: usize,
    /// `None` when the workbook had no transaction sheet
    pub transactions: Option<usize>,
}

impl Summary {
    pub fn unmatched(&self) -> usize {
        self.link_rows - self.matched
    }

    pub fn log(&self) {
        log::info!("SUMMARY:");
        log::info!(
            "LINK activities: {} (Matched: {}, Unmatched: {})",
            self.link_rows,
            self.matched,
            self.unmatched()
        );
        log::info!("SQL activities: {}", self.sql_rows);
        if let Some(count) = self.transactions {
            log::info!("Transaction activities: {}", count);
        }
    }
}

/// Activities sheet rows, verbatim
pub fn read_activities(sheet: &Sheet) -> Result<Vec<Activity>, ExtractError> {
    let [activity, kind, source, descr] = require_columns(sheet, &ACTIVITY_COLUMNS)?;

    Ok(sheet
        .rows
        .iter()
        .map(|row| Activity {
            activity: cell(row, activity).to_string(),
            kind: cell(row, kind).to_string(),
            source: cell(row, source).to_string(),
            descr: cell(row, descr).to_string(),
        })
        .collect())
}

/// Programs sheet rows under canonical names, keys trimmed
pub fn read_programs(sheet: &Sheet) -> Result<Vec<Program>, ExtractError> {
    let [link, id, descr] = resolve_aliases(sheet, &PROGRAM_COLUMNS)?;

    Ok(sheet
        .rows
        .iter()
        .map(|row| Program {
            link: cell(row, link).trim().to_string(),
            id: cell(row, id).trim().to_string(),
            descr: cell(row, descr).to_string(),
        })
        .collect())
}

/// Find the workbook in `input_dir` and write every artifact to `output_dir`
///
/// Both mandatory sheets are validated before anything is written, so a
/// structural error leaves the output folder untouched.
pub fn process_workbook(input_dir: &Path, output_dir: &Path) -> Result<Summary> {
    let workbook = find_workbook(input_dir)?;
    log::info!("Found Excel file: {}", workbook.display());

    let sheets = read_sheets(&workbook)?;
    let activities = read_activities(sheet_at(&sheets, 0)?)?;
    let programs = read_programs(sheet_at(&sheets, 1)?)?;

    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output folder: {}", output_dir.display()))?;

    let path = output_dir.join(ACTIVITIES_FILE);
    write_records(&path, &activities)?;
    log::info!("Created {} with {} records", path.display(), activities.len());

    let path = output_dir.join(PROGRAMS_FILE);
    write_records(&path, &programs)?;
    log::info!("Created {} with {} records", path.display(), programs.len());

    let (link, sql) = partition(&activities);
    log::info!("Found {} LINK activities", link.len());

    let index = program_index(&programs);
    let link_mapped = link_mappings(&link, &index);
    let path = output_dir.join(LINK_MAPPING_FILE);
    write_records(&path, &link_mapped)?;
    log::info!("Created {} with {} records", path.display(), link_mapped.len());

    log::info!("Found {} SQL activities", sql.len());
    let sql_mapped = sql_mappings(&sql);
    let path = output_dir.join(SQL_MAPPING_FILE);
    write_records(&path, &sql_mapped)?;
    log::info!("Created {} with {} records", path.display(), sql_mapped.len());

    let combined = combine_links(&link_mapped, &sql_mapped);
    let path = output_dir.join(LINKS_FILE);
    write_records(&path, &combined)?;
    log::info!("Created combined output {} with {} records", path.display(), combined.len());
    log::info!("Sample of combined data:");
    for record in combined.iter().take(SAMPLE_ROWS) {
        log::info!("  {} | {} | {}", record.activity, record.kind, record.pgm_id);
    }

    let transactions = transactions::augment(&sheets, output_dir)?;

    Ok(Summary {
        link_rows: link_mapped.len(),
        matched: link_mapped.iter().filter(|m| m.is_matched()).count(),
        sql_rows: sql_mapped.len(),
        transactions,
    })
}

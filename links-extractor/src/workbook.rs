//! Locating and reading the input workbook
//!
//! Every sheet is flattened to text: the first row becomes the header list and
//! the remaining non-blank rows become data rows, each cell rendered by
//! [`cell_to_string`].

use anyhow::{Context, Result};
use calamine::{Data, Reader, open_workbook_auto};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ExtractError;

/// Extensions accepted as workbooks (compared case-insensitively)
const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls"];

/// Rendering of date and datetime cells
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One worksheet rendered as text
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    /// Index of the first header exactly equal to `name`
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

/// Cell text, empty when the row is shorter than the header
pub fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(|s| s.as_str()).unwrap_or("")
}

/// Find the workbook to process in `folder`
///
/// Candidates are sorted by file name so the pick is stable across runs.
/// Extra candidates are reported and ignored.
pub fn find_workbook(folder: &Path) -> Result<PathBuf> {
    let entries = fs::read_dir(folder)
        .with_context(|| format!("Failed to list input folder: {}", folder.display()))?;

    let mut candidates = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("Failed to list input folder: {}", folder.display()))?
            .path();
        if path.is_file() && is_workbook(&path) {
            candidates.push(path);
        }
    }
    candidates.sort();

    let mut candidates = candidates.into_iter();
    let chosen = candidates.next().ok_or_else(|| ExtractError::NoWorkbook {
        folder: folder.display().to_string(),
    })?;

    let ignored: Vec<String> = candidates.map(|p| p.display().to_string()).collect();
    if !ignored.is_empty() {
        log::warn!(
            "Multiple Excel files in {}, using {} and ignoring: {}",
            folder.display(),
            chosen.display(),
            ignored.join(", ")
        );
    }

    Ok(chosen)
}

fn is_workbook(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| {
            let e = e.to_lowercase();
            WORKBOOK_EXTENSIONS.contains(&e.as_str())
        })
        .unwrap_or(false)
}

/// Render an Excel cell as text
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            // Whole floats print without a fractional part
            if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                (*f as i64).to_string()
            } else {
                f.to_string()
            }
        }
        Data::Bool(true) => "True".to_string(),
        Data::Bool(false) => "False".to_string(),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) => datetime.format(DATETIME_FORMAT).to_string(),
            None => dt.to_string(),
        },
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

/// Read every sheet of the workbook, in workbook order
pub fn read_sheets(path: &Path) -> Result<Vec<Sheet>> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Failed to open Excel file: {}", path.display()))?;

    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    let mut sheets = Vec::with_capacity(sheet_names.len());

    for sheet_name in sheet_names {
        let range = workbook
            .worksheet_range(&sheet_name)
            .with_context(|| format!("Failed to read sheet: {}", sheet_name))?;

        let mut rows = range
            .rows()
            .map(|r| r.iter().map(cell_to_string).collect::<Vec<_>>());

        let headers = rows.next().unwrap_or_default();
        let rows = rows
            .filter(|r| r.iter().any(|c| !c.trim().is_empty()))
            .collect();

        sheets.push(Sheet {
            name: sheet_name,
            headers,
            rows,
        });
    }

    Ok(sheets)
}

/// Borrow the sheet at `index`, failing when the workbook is too short
pub fn sheet_at(sheets: &[Sheet], index: usize) -> Result<&Sheet, ExtractError> {
    sheets.get(index).ok_or(ExtractError::MissingSheet {
        index,
        found: sheets.len(),
    })
}

#[cfg(test)]
pub(crate) mod fixtures {
    use rust_xlsxwriter::Workbook;
    use std::path::Path;

    /// Write a workbook where every cell is a string
    pub fn write_workbook(path: &Path, sheets: &[(&str, Vec<Vec<&str>>)]) {
        let mut workbook = Workbook::new();
        for (name, rows) in sheets {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(*name).unwrap();
            for (r, row) in rows.iter().enumerate() {
                for (c, value) in row.iter().enumerate() {
                    if !value.is_empty() {
                        worksheet.write_string(r as u32, c as u16, *value).unwrap();
                    }
                }
            }
        }
        workbook.save(path).unwrap();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calamine::CellErrorType;
    use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};

    #[test]
    fn test_cell_to_string() {
        assert_eq!(cell_to_string(&Data::Empty), "");
        assert_eq!(cell_to_string(&Data::String(" PGM1 ".into())), " PGM1 ");
        assert_eq!(cell_to_string(&Data::Int(7)), "7");
        assert_eq!(cell_to_string(&Data::Float(123.0)), "123");
        assert_eq!(cell_to_string(&Data::Float(1.5)), "1.5");
        assert_eq!(cell_to_string(&Data::Bool(true)), "True");
        assert_eq!(cell_to_string(&Data::Bool(false)), "False");
        assert_eq!(cell_to_string(&Data::Error(CellErrorType::Div0)), "");
        assert_eq!(
            cell_to_string(&Data::DateTimeIso("2024-03-05T10:30:00".into())),
            "2024-03-05T10:30:00"
        );
        assert_eq!(cell_to_string(&Data::DurationIso("PT1H".into())), "PT1H");
    }

    #[test]
    fn test_date_cells_render_as_dates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dates.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        let date_format = Format::new().set_num_format("yyyy-mm-dd");
        let datetime_format = Format::new().set_num_format("yyyy-mm-dd hh:mm:ss");
        sheet.write_string(0, 0, "DESCR").unwrap();
        let date = ExcelDateTime::from_ymd(2024, 3, 5).unwrap();
        let datetime = ExcelDateTime::parse_from_str("2024-03-05 14:07:09").unwrap();
        sheet.write_datetime_with_format(1, 0, &date, &date_format).unwrap();
        sheet.write_datetime_with_format(2, 0, &datetime, &datetime_format).unwrap();
        workbook.save(&path).unwrap();

        let sheets = read_sheets(&path).unwrap();
        assert_eq!(sheets[0].rows[0][0], "2024-03-05 00:00:00");
        assert_eq!(sheets[0].rows[1][0], "2024-03-05 14:07:09");
    }

    #[test]
    fn test_find_workbook_picks_first_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "x").unwrap();
        fs::write(dir.path().join("b.XLSX"), "x").unwrap();
        fs::write(dir.path().join("a.xls"), "x").unwrap();

        let found = find_workbook(dir.path()).unwrap();
        assert_eq!(found.file_name().unwrap(), "a.xls");
    }

    #[test]
    fn test_find_workbook_none() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("data.csv"), "x").unwrap();

        let err = find_workbook(dir.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ExtractError>(),
            Some(ExtractError::NoWorkbook { .. })
        ));
    }

    #[test]
    fn test_read_sheets() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.xlsx");

        let mut workbook = Workbook::new();
        let first = workbook.add_worksheet();
        first.set_name("Activities").unwrap();
        first.write_string(0, 0, "ACTIVITY").unwrap();
        first.write_string(0, 1, "SOURCE").unwrap();
        first.write_string(1, 0, "ACT1").unwrap();
        first.write_number(1, 1, 42.0).unwrap();
        // row 2 left blank, should be dropped
        first.write_string(3, 0, "ACT2").unwrap();
        let second = workbook.add_worksheet();
        second.set_name("Programs").unwrap();
        second.write_string(0, 0, "LINK").unwrap();
        workbook.save(&path).unwrap();

        let sheets = read_sheets(&path).unwrap();
        assert_eq!(sheets.len(), 2);
        assert_eq!(sheets[0].name, "Activities");
        assert_eq!(sheets[0].headers, vec!["ACTIVITY", "SOURCE"]);
        assert_eq!(
            sheets[0].rows,
            vec![
                vec!["ACT1".to_string(), "42".to_string()],
                vec!["ACT2".to_string(), String::new()],
            ]
        );
        assert_eq!(sheets[1].headers, vec!["LINK"]);
        assert!(sheets[1].rows.is_empty());

        assert!(sheet_at(&sheets, 1).is_ok());
        assert_eq!(
            sheet_at(&sheets, 2).unwrap_err(),
            ExtractError::MissingSheet { index: 2, found: 2 }
        );
    }

    #[test]
    fn test_cell_short_row() {
        let row = vec!["a".to_string()];
        assert_eq!(cell(&row, 0), "a");
        assert_eq!(cell(&row, 3), "");
    }
}

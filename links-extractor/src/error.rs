//! Structural validation failures

/// A workbook that does not have the shape the extractor needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// No `.xlsx`/`.xlsm`/`.xls` file in the input folder
    NoWorkbook { folder: String },
    /// Workbook has fewer sheets than required
    MissingSheet { index: usize, found: usize },
    /// Required columns absent from a sheet
    MissingColumns { sheet: String, missing: Vec<String> },
    /// None of the accepted header spellings for a column is present
    UnresolvedColumn {
        sheet: String,
        canonical: String,
        aliases: Vec<String>,
    },
}

impl std::fmt::Display for ExtractError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractError::NoWorkbook { folder } => {
                write!(f, "No Excel file found in input folder {}", folder)
            }
            ExtractError::MissingSheet { index, found } => {
                write!(
                    f,
                    "Workbook needs at least {} sheets, found {}",
                    index + 1,
                    found
                )
            }
            ExtractError::MissingColumns { sheet, missing } => {
                write!(f, "Sheet '{}' missing columns: {}", sheet, missing.join(", "))
            }
            ExtractError::UnresolvedColumn {
                sheet,
                canonical,
                aliases,
            } => {
                write!(
                    f,
                    "Could not find column matching {} in sheet '{}' (accepted: {})",
                    canonical,
                    sheet,
                    aliases.join(", ")
                )
            }
        }
    }
}

impl std::error::Error for ExtractError {}

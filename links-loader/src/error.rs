//! Import failures that are not database or I/O errors

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportError {
    /// CSV path does not name a file
    CsvNotFound { path: String },
    /// CSV header lacks required columns (matched case-sensitively)
    MissingColumns { path: String, missing: Vec<String> },
}

impl std::fmt::Display for ImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportError::CsvNotFound { path } => write!(f, "CSV file not found: {}", path),
            ImportError::MissingColumns { path, missing } => {
                write!(f, "CSV file {} missing columns: {}", path, missing.join(", "))
            }
        }
    }
}

impl std::error::Error for ImportError {}

//! Header validation and alias resolution

use crate::error::ExtractError;
use crate::workbook::Sheet;

/// Columns the activities sheet must carry, by exact header name
pub const ACTIVITY_COLUMNS: [&str; 4] = ["ACTIVITY", "TYPE", "SOURCE", "DESCR."];

/// A canonical column and the header spellings accepted for it, in priority order
#[derive(Debug, Clone, Copy)]
pub struct ColumnAlias {
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
}

/// Program sheet columns: PGM LINK, PGM ID, DESCR
pub const PROGRAM_COLUMNS: [ColumnAlias; 3] = [
    ColumnAlias {
        canonical: "PGM LINK",
        aliases: &["PGM LINK", "LINK"],
    },
    ColumnAlias {
        canonical: "PGM ID",
        aliases: &["PGM ID", "ID"],
    },
    ColumnAlias {
        canonical: "DESCR",
        aliases: &["DESCR", "DESCRIPTION", "DESC"],
    },
];

/// Indices of `required` columns in `sheet`, in the order given
pub fn require_columns<const N: usize>(
    sheet: &Sheet,
    required: &[&str; N],
) -> Result<[usize; N], ExtractError> {
    let mut indices = [0; N];
    let mut missing = Vec::new();

    for (slot, name) in indices.iter_mut().zip(required.iter()) {
        match sheet.column_index(name) {
            Some(idx) => *slot = idx,
            None => missing.push(name.to_string()),
        }
    }

    if !missing.is_empty() {
        return Err(ExtractError::MissingColumns {
            sheet: sheet.name.clone(),
            missing,
        });
    }

    Ok(indices)
}

/// Resolve each alias entry to a column index: the first spelling present wins
pub fn resolve_aliases<const N: usize>(
    sheet: &Sheet,
    table: &[ColumnAlias; N],
) -> Result<[usize; N], ExtractError> {
    let mut indices = [0; N];

    for (slot, entry) in indices.iter_mut().zip(table.iter()) {
        let (idx, header) = entry
            .aliases
            .iter()
            .find_map(|alias| sheet.column_index(alias).map(|i| (i, *alias)))
            .ok_or_else(|| ExtractError::UnresolvedColumn {
                sheet: sheet.name.clone(),
                canonical: entry.canonical.to_string(),
                aliases: entry.aliases.iter().map(|a| a.to_string()).collect(),
            })?;

        if header != entry.canonical {
            log::info!(
                "Sheet '{}': using column '{}' as {}",
                sheet.name,
                header,
                entry.canonical
            );
        }
        *slot = idx;
    }

    Ok(indices)
}

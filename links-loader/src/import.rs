//! CSV to `<schema>.linksdata`, replacing the table wholesale

use anyhow::{Context, Result};
use sqlx::postgres::PgConnectOptions;
use sqlx::{Connection, PgConnection};
use std::path::Path;

use crate::db::{TableRef, create_table, drop_table, insert_row, table_exists};
use crate::error::ImportError;
use crate::input::{LinkRow, read_links};

pub const TABLE_NAME: &str = "linksdata";

/// Load `csv_path` into `<schema>.linksdata`, dropping any previous table
///
/// Returns the number of rows inserted. The connection is closed whether or
/// not the load succeeds.
pub async fn import_links_data(
    csv_path: &Path,
    schema: &str,
    options: &PgConnectOptions,
) -> Result<usize> {
    if !csv_path.is_file() {
        return Err(ImportError::CsvNotFound {
            path: csv_path.display().to_string(),
        }
        .into());
    }

    log::info!("Reading data from {}", csv_path.display());
    let rows = read_links(csv_path)?;

    log::info!("Connecting to PostgreSQL database...");
    let mut conn = PgConnection::connect_with(options)
        .await
        .context("Failed to connect to PostgreSQL")?;

    let table = TableRef::new(schema, TABLE_NAME);
    let result = replace_table(&mut conn, &table, &rows).await;

    if let Err(e) = conn.close().await {
        log::warn!("Failed to close database connection cleanly: {}", e);
    }

    result
}

/// Drop (if present), recreate and fill `table`, one statement per row
pub async fn replace_table(
    conn: &mut PgConnection,
    table: &TableRef,
    rows: &[LinkRow],
) -> Result<usize> {
    log::info!("Checking if table {} exists...", table);
    if table_exists(conn, table).await? {
        log::info!("Table {} exists - dropping it", table);
        drop_table(conn, table).await?;
    }

    log::info!("Creating table {}", table);
    create_table(conn, table).await?;

    log::info!("Inserting {} records into {}", rows.len(), table);
    for (idx, row) in rows.iter().enumerate() {
        insert_row(conn, table, row).await.with_context(|| {
            format!(
                "Failed to insert row {} (ACTIVITY {:?}) into {}",
                idx + 1,
                row.activity.as_deref().unwrap_or(""),
                table
            )
        })?;
    }

    log::info!("Data import completed successfully");
    Ok(rows.len())
}

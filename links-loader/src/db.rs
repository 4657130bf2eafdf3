//! PostgreSQL access for the linksdata table
//!
//! Each statement runs on its own outside any explicit transaction, so
//! PostgreSQL commits it immediately.

use anyhow::{Context, Result};
use sqlx::PgConnection;
use sqlx::postgres::PgConnectOptions;

use crate::input::LinkRow;

/// Database the loader always targets
pub const DATABASE_NAME: &str = "postgres";

/// Maximum length of every linksdata column
pub const COLUMN_WIDTH: usize = 255;

/// Connection parameters as given on the command line
#[derive(Clone)]
pub struct ConnectionParams {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for ConnectionParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionParams")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

impl ConnectionParams {
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.username)
            .password(&self.password)
            .database(DATABASE_NAME)
    }
}

/// Quote an SQL identifier, doubling embedded quotes
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// A schema-qualified table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    pub schema: String,
    pub name: String,
}

impl TableRef {
    pub fn new(schema: &str, name: &str) -> Self {
        TableRef {
            schema: schema.to_string(),
            name: name.to_string(),
        }
    }

    /// `"schema"."name"`, safe to splice into SQL
    pub fn qualified(&self) -> String {
        format!("{}.{}", quote_ident(&self.schema), quote_ident(&self.name))
    }
}

impl std::fmt::Display for TableRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.schema, self.name)
    }
}

fn create_table_sql(table: &TableRef) -> String {
    format!(
        "CREATE TABLE {} (
            activity VARCHAR({w}),
            type VARCHAR({w}),
            pgmid VARCHAR({w})
        )",
        table.qualified(),
        w = COLUMN_WIDTH
    )
}

fn insert_sql(table: &TableRef) -> String {
    format!(
        "INSERT INTO {} (activity, type, pgmid) VALUES ($1, $2, $3)",
        table.qualified()
    )
}

pub async fn table_exists(conn: &mut PgConnection, table: &TableRef) -> Result<bool> {
    let exists: bool = sqlx::query_scalar(
        "SELECT EXISTS (
            SELECT FROM information_schema.tables
            WHERE table_schema = $1 AND table_name = $2
        )",
    )
    .bind(&table.schema)
    .bind(&table.name)
    .fetch_one(&mut *conn)
    .await
    .with_context(|| format!("Failed to check whether {} exists", table))?;

    Ok(exists)
}

pub async fn drop_table(conn: &mut PgConnection, table: &TableRef) -> Result<()> {
    sqlx::query(&format!("DROP TABLE IF EXISTS {}", table.qualified()))
        .execute(&mut *conn)
        .await
        .with_context(|| format!("Failed to drop {}", table))?;

    Ok(())
}

pub async fn create_table(conn: &mut PgConnection, table: &TableRef) -> Result<()> {
    sqlx::query(&create_table_sql(table))
        .execute(&mut *conn)
        .await
        .with_context(|| format!("Failed to create {}", table))?;

    Ok(())
}

/// Insert one row; values longer than [`COLUMN_WIDTH`] are rejected by the database
pub async fn insert_row(conn: &mut PgConnection, table: &TableRef, row: &LinkRow) -> Result<()> {
    sqlx::query(&insert_sql(table))
        .bind(row.activity.as_deref())
        .bind(row.kind.as_deref())
        .bind(row.pgm_id.as_deref())
        .execute(&mut *conn)
        .await?;

    Ok(())
}

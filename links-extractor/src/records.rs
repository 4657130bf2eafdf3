//! Row types for every CSV artifact
//!
//! Field renames carry the exact CSV header text; `HEADERS` repeats it so an
//! artifact with no rows still gets its header line.

use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// TYPE label for LINK activities in linksData.csv
pub const LINK_ACTIVITY_LABEL: &str = "HOGAN Link Activity";
/// TYPE label for SQL activities in linksData.csv
pub const SQL_ACTIVITY_LABEL: &str = "HOGAN SQL Activity";
/// TYPE label for transaction rows in linksData.csv
pub const TRANSACTION_LABEL: &str = "Hogan Transaction";
/// TYPE given to transaction rows in activities.csv
pub const TRANSACTION_TYPE: &str = "TRAN";

/// A CSV row type with a fixed header
pub trait CsvRecord: Serialize + DeserializeOwned {
    const HEADERS: &'static [&'static str];
}

/// activities.csv
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(rename = "ACTIVITY")]
    pub activity: String,
    #[serde(rename = "TYPE")]
    pub kind: String,
    #[serde(rename = "SOURCE")]
    pub source: String,
    #[serde(rename = "DESCR.")]
    pub descr: String,
}

impl CsvRecord for Activity {
    const HEADERS: &'static [&'static str] = &["ACTIVITY", "TYPE", "SOURCE", "DESCR."];
}

/// programs.csv
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    #[serde(rename = "PGM LINK")]
    pub link: String,
    #[serde(rename = "PGM ID")]
    pub id: String,
    #[serde(rename = "DESCR")]
    pub descr: String,
}

impl CsvRecord for Program {
    const HEADERS: &'static [&'static str] = &["PGM LINK", "PGM ID", "DESCR"];
}

/// activity_program_mapping.csv: a LINK activity with its resolved program
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkMapping {
    #[serde(rename = "ACTIVITY")]
    pub activity: String,
    #[serde(rename = "TYPE")]
    pub kind: String,
    #[serde(rename = "SOURCE")]
    pub source: String,
    /// Empty when SOURCE has no program
    #[serde(rename = "PGMID")]
    pub pgm_id: String,
}

impl LinkMapping {
    pub fn is_matched(&self) -> bool {
        !self.pgm_id.is_empty()
    }
}

impl CsvRecord for LinkMapping {
    const HEADERS: &'static [&'static str] = &["ACTIVITY", "TYPE", "SOURCE", "PGMID"];
}

/// sql_program_mapping.csv
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SqlMapping {
    #[serde(rename = "ACTIVITY")]
    pub activity: String,
    #[serde(rename = "TYPE")]
    pub kind: String,
    #[serde(rename = "SOURCE")]
    pub source: String,
    #[serde(rename = "DESCR.")]
    pub descr: String,
}

impl CsvRecord for SqlMapping {
    const HEADERS: &'static [&'static str] = &["ACTIVITY", "TYPE", "SOURCE", "DESCR."];
}

/// linksData.csv
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    #[serde(rename = "ACTIVITY")]
    pub activity: String,
    #[serde(rename = "TYPE")]
    pub kind: String,
    #[serde(rename = "PGMID")]
    pub pgm_id: String,
}

impl CsvRecord for LinkRecord {
    const HEADERS: &'static [&'static str] = &["ACTIVITY", "TYPE", "PGMID"];
}

/// unique_activities.csv
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UniqueActivity {
    #[serde(rename = "ACTIVITY")]
    pub activity: String,
    #[serde(rename = "TYPE")]
    pub kind: String,
    #[serde(rename = "DESCR.")]
    pub descr: String,
}

impl CsvRecord for UniqueActivity {
    const HEADERS: &'static [&'static str] = &["ACTIVITY", "TYPE", "DESCR."];
}

impl From<&Activity> for UniqueActivity {
    fn from(a: &Activity) -> Self {
        UniqueActivity {
            activity: a.activity.clone(),
            kind: a.kind.clone(),
            descr: a.descr.clone(),
        }
    }
}

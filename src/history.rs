//! In-memory history table and the per-client update rules.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Stored in both version fields when a first observation yields nothing.
pub const VERSION_NOT_FOUND: &str = "Versão não encontrada";

/// Timestamp format for the `Data da pesquisa` column.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One row of the history table: the version-tracking state of one client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Client name, unique key within the table.
    #[serde(rename = "Cliente")]
    pub client: String,
    /// Most recently observed URL for this client.
    #[serde(rename = "URL")]
    pub url: String,
    /// Last observed version, or the not-found sentinel.
    #[serde(rename = "Versão Atual")]
    pub current_version: String,
    /// Value `current_version` held before its most recent change.
    #[serde(rename = "Versão Anterior")]
    pub previous_version: String,
    /// When this client was last checked, `YYYY-MM-DD HH:MM:SS`.
    #[serde(rename = "Data da pesquisa")]
    pub last_checked: String,
}

/// Insertion-ordered table of history records with lookup by client name.
///
/// Rows are never deleted; a client that disappears from the input list keeps
/// its row indefinitely. Lookup is first-match, so duplicate client names in
/// the input fold into a single row, in call order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryTable {
    rows: Vec<HistoryRecord>,
}

impl HistoryTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Build a table from already-parsed rows, preserving their order.
    pub fn from_rows(rows: Vec<HistoryRecord>) -> Self {
        Self { rows }
    }

    /// All rows in insertion order.
    pub fn rows(&self) -> &[HistoryRecord] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Look up a client's row, first match wins.
    pub fn get(&self, client: &str) -> Option<&HistoryRecord> {
        self.rows.iter().find(|r| r.client == client)
    }

    /// Merge one observation into the table.
    ///
    /// `observed` is `Some` when extraction produced a version string and
    /// `None` when it failed or found no parameter. For an existing row, a
    /// non-empty observed value that differs from the stored current version
    /// shifts current into previous; anything else only refreshes the
    /// timestamp. A new client gets a fresh row with both version fields set
    /// to the observed value, or to [`VERSION_NOT_FOUND`] when there is none.
    pub fn upsert(&mut self, client: &str, url: &str, observed: Option<&str>, now: NaiveDateTime) {
        let stamp = now.format(TIMESTAMP_FORMAT).to_string();

        match self.rows.iter_mut().find(|r| r.client == client) {
            Some(row) => {
                if let Some(version) = observed {
                    if !version.is_empty() && version != row.current_version {
                        row.previous_version = std::mem::replace(
                            &mut row.current_version,
                            version.to_string(),
                        );
                    }
                }
                row.last_checked = stamp;
            }
            None => {
                let version = match observed {
                    Some(v) if !v.is_empty() => v.to_string(),
                    _ => VERSION_NOT_FOUND.to_string(),
                };
                self.rows.push(HistoryRecord {
                    client: client.to_string(),
                    url: url.to_string(),
                    current_version: version.clone(),
                    previous_version: version,
                    last_checked: stamp,
                });
            }
        }
    }

    /// Header + data rows as plain strings, for the workbook and remote sinks.
    pub fn to_rows(&self) -> Vec<Vec<String>> {
        let mut out = Vec::with_capacity(self.rows.len() + 1);
        out.push(crate::store::HISTORY_HEADERS.iter().map(|h| h.to_string()).collect());
        for r in &self.rows {
            out.push(vec![
                r.client.clone(),
                r.url.clone(),
                r.current_version.clone(),
                r.previous_version.clone(),
                r.last_checked.clone(),
            ]);
        }
        out
    }
}

//! Client list input.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// One entry of the input list: a client and the URL to check for it.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ClientEntry {
    /// Client name. Assumed unique, not enforced.
    #[serde(rename = "Cliente")]
    pub client_name: String,
    /// URL whose final address carries the version parameter.
    #[serde(rename = "URL")]
    pub url: String,
}

/// Load the client list from a UTF-8 CSV with `Cliente` and `URL` columns.
pub fn load_clients(path: &Path) -> Result<Vec<ClientEntry>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open client list {}", path.display()))?;

    let mut entries = Vec::new();
    for record in reader.deserialize::<ClientEntry>() {
        let entry = record
            .with_context(|| format!("malformed client list {}", path.display()))?;
        entries.push(entry);
    }
    Ok(entries)
}

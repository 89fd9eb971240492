//! Exports the history table to its three sinks: the Windows-1252 CSV, the
//! styled XLSX workbook, and the remote Google Sheets spreadsheet.
//!
//! The sinks are independent; there is no transaction linking them. A sink
//! failure aborts the run without rolling back sinks that already wrote.

pub mod sheets;
pub mod xlsx;

use crate::config::Config;
use crate::history::HistoryTable;
use crate::store;
use anyhow::{Context, Result};
use self::sheets::{ServiceAccountKey, SheetsClient};
use tracing::info;

/// Writes the history table to all configured sinks.
pub struct Exporter {
    config: Config,
}

impl Exporter {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Export the table: CSV, then workbook, then remote spreadsheet.
    pub async fn export(&self, table: &HistoryTable) -> Result<()> {
        store::write_history_csv(&self.config.history_csv, table)?;
        info!(path = %self.config.history_csv.display(), rows = table.len(), "history CSV written");

        xlsx::write_workbook(&self.config.history_xlsx, table)?;
        info!(path = %self.config.history_xlsx.display(), "workbook written");

        let cred_path = self
            .config
            .credentials_path
            .as_deref()
            .context("GOOGLE_APPLICATION_CREDENTIALS is not set")?;
        let key = ServiceAccountKey::from_file(cred_path)?;
        let client = SheetsClient::new(
            key,
            self.config.sheets_api_base.clone(),
            self.config.drive_api_base.clone(),
        );
        client
            .replace_all(&self.config.sheet_name, &table.to_rows())
            .await
            .context("failed to update Google Sheets")?;
        info!(sheet = %self.config.sheet_name, "remote spreadsheet updated");

        Ok(())
    }
}

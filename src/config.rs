//! Runtime configuration for a verwatch run.
//!
//! Every external resource the pipeline touches has a named field here, so
//! nothing reads module-level globals. `Config::from_env` is the production
//! path; tests build the struct directly.

use std::path::PathBuf;

/// Environment variable naming the service-account key file.
pub const CREDENTIALS_ENV: &str = "GOOGLE_APPLICATION_CREDENTIALS";

/// Default client-list file.
pub const DEFAULT_CLIENTS_CSV: &str = "clientes.csv";
/// Default persisted history file.
pub const DEFAULT_HISTORY_CSV: &str = "historico_versoes.csv";
/// Default workbook export path.
pub const DEFAULT_HISTORY_XLSX: &str = "historico_versoes.xlsx";
/// Name of the spreadsheet on Google Drive.
pub const DEFAULT_SHEET_NAME: &str = "historico_versoes";

/// Default navigation timeout per client page.
pub const DEFAULT_NAVIGATION_TIMEOUT_MS: u64 = 30_000;

/// Configuration for the pipeline and exporter.
#[derive(Debug, Clone)]
pub struct Config {
    /// Input client list (UTF-8 CSV with `Cliente` and `URL` columns).
    pub clients_csv: PathBuf,
    /// Persisted history CSV (Windows-1252).
    pub history_csv: PathBuf,
    /// Styled workbook export path.
    pub history_xlsx: PathBuf,
    /// Human-readable spreadsheet name resolved through the Drive API.
    pub sheet_name: String,
    /// Service-account key file, from `GOOGLE_APPLICATION_CREDENTIALS`.
    pub credentials_path: Option<PathBuf>,
    /// Per-page navigation timeout in milliseconds.
    pub navigation_timeout_ms: u64,
    /// Sheets API base URL. Overridable so tests can point at a mock server.
    pub sheets_api_base: String,
    /// Drive API base URL. Overridable so tests can point at a mock server.
    pub drive_api_base: String,
}

impl Config {
    /// Build the configuration from the process environment.
    ///
    /// Loads a `.env` file from the working directory first, if one exists.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            clients_csv: PathBuf::from(DEFAULT_CLIENTS_CSV),
            history_csv: PathBuf::from(DEFAULT_HISTORY_CSV),
            history_xlsx: PathBuf::from(DEFAULT_HISTORY_XLSX),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            credentials_path: std::env::var(CREDENTIALS_ENV).ok().map(PathBuf::from),
            navigation_timeout_ms: DEFAULT_NAVIGATION_TIMEOUT_MS,
            sheets_api_base: "https://sheets.googleapis.com".to_string(),
            drive_api_base: "https://www.googleapis.com".to_string(),
        }
    }
}

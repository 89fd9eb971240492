//! Environment readiness check.

use crate::config::{Config, CREDENTIALS_ENV};
use crate::renderer::chromium::find_chromium;
use anyhow::Result;

/// Check Chromium availability, input files, and credential configuration.
pub async fn run() -> Result<()> {
    println!("Verwatch Doctor");
    println!("===============");
    println!();

    let config = Config::from_env();

    // Check Chromium
    let chromium_path = find_chromium();
    match &chromium_path {
        Some(path) => println!("[OK] Chromium found: {}", path.display()),
        None => println!(
            "[!!] Chromium NOT found. Install Chrome or set VERWATCH_CHROMIUM_PATH."
        ),
    }

    // Check client list
    if config.clients_csv.exists() {
        println!("[OK] Client list found: {}", config.clients_csv.display());
    } else {
        println!("[!!] Client list missing: {}", config.clients_csv.display());
    }

    // Check history file (absent is fine — first run)
    if config.history_csv.exists() {
        println!("[OK] History file found: {}", config.history_csv.display());
    } else {
        println!(
            "[--] History file not present yet: {} (will be created)",
            config.history_csv.display()
        );
    }

    // Check credentials
    match &config.credentials_path {
        Some(path) if path.exists() => {
            println!("[OK] Credentials file found: {}", path.display())
        }
        Some(path) => println!("[!!] Credentials file missing: {}", path.display()),
        None => println!("[!!] {CREDENTIALS_ENV} is not set"),
    }

    println!();
    let ready = chromium_path.is_some()
        && config.clients_csv.exists()
        && matches!(&config.credentials_path, Some(p) if p.exists());
    if ready {
        println!("Status: READY");
    } else {
        println!("Status: NOT READY");
    }

    Ok(())
}

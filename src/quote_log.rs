use anyhow::Result;
use chrono::Utc;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use crate::pricing::Quote;

/// Log file name
const QUOTE_LOG_FILE: &str = "quote_log.txt";

/// Get the directory where app data is stored (same as settings)
fn app_data_dir() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        let app_dir = config_dir.join("margo");
        if !app_dir.exists() {
            let _ = fs::create_dir_all(&app_dir);
        }
        app_dir
    } else {
        // Fall back to current directory
        PathBuf::from(".")
    }
}

/// Get the full path to the quote log file
fn log_path() -> PathBuf {
    app_data_dir().join(QUOTE_LOG_FILE)
}

/// Get the full path to the quote log file as a string for display
pub fn log_file_path() -> String {
    log_path().display().to_string()
}

/// Append one calculated quote to the log.
pub fn append_quote(symbol: &str, markup_percent: f64, row_count: usize, quote: &Quote) -> Result<()> {
    let path = log_path();

    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    let timestamp = Utc::now().to_rfc3339();
    let mut file = OpenOptions::new().create(true).append(true).open(&path)?;

    writeln!(
        file,
        "[{}] currency={} markup={}% rows={}",
        timestamp, symbol, markup_percent, row_count
    )?;
    writeln!(
        file,
        "  total={} margin={} price={}",
        quote.total, quote.margin, quote.price
    )?;
    writeln!(file)?;
    Ok(())
}

/// Read the entire log file content
pub fn read_log() -> Result<String> {
    let path = log_path();
    if path.exists() {
        Ok(fs::read_to_string(&path)?)
    } else {
        Ok(String::new())
    }
}

/// Truncate the log file
pub fn clear_log() -> Result<()> {
    let path = log_path();
    if path.exists() {
        fs::write(&path, "")?;
    }
    Ok(())
}

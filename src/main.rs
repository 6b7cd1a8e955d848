#![windows_subsystem = "windows"]

use anyhow::Result;
use margo::{config::Config, gui};
use tracing_subscriber;

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    // Environment config - GUI loads user settings and applies them on top
    let config = Config::from_env();
    gui::launch(config)?;

    Ok(())
}

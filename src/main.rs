mod app;
mod input;
mod render;

use anyhow::{Context, Result};
use mochigotchi::config::project_paths;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing::Level;

fn main() -> Result<()> {
    let paths = project_paths()?;

    // The terminal belongs to the UI, so logs go to a file.
    let log = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&paths.log_path)
        .with_context(|| format!("opening log file {}", paths.log_path.display()))?;
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_writer(Mutex::new(log))
        .with_ansi(false)
        .init();

    app::run(paths)
}

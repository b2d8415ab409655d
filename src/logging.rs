//! Logger setup.
//!
//! The TUI owns the terminal, so interactive sessions only log when a file is
//! given. Command mode logs warnings and above to stderr unless `RUST_LOG`
//! says otherwise.

use anyhow::Context;
use env_logger::{Builder, Env, Target};
use std::fs::OpenOptions;
use std::path::Path;

pub fn init(log_file: Option<&Path>, command_mode: bool) -> anyhow::Result<()> {
    let default_level = if log_file.is_none() && command_mode { "warn" } else { "info" };
    let mut builder = Builder::from_env(Env::default().default_filter_or(default_level));

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            builder.target(Target::Pipe(Box::new(file)));
        }
        None if command_mode => {
            builder.target(Target::Stderr);
        }
        None => return Ok(()),
    }

    builder.try_init().context("installing logger")?;
    Ok(())
}

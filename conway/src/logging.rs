// logging.rs - Logger setup

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};

/// Installs the global logger, appending to `log_file` or writing to stderr
/// when it is `None`. `RUST_LOG` overrides the default `info` level.
///
/// If the file cannot be opened, logging falls back to stderr and the
/// reason is logged once the logger is up.
pub fn init(log_file: Option<&Path>) -> Result<()> {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    builder.format(|buf, record| {
        writeln!(buf, "[{}] {} - {}", buf.timestamp(), record.level(), record.args())
    });

    let fallback = match log_file.map(open_log_file).transpose() {
        Ok(Some(file)) => {
            builder.target(Target::Pipe(Box::new(file)));
            None
        }
        Ok(None) => None,
        Err(err) => Some(err),
    };

    builder.try_init().context("Failed to install the logger")?;
    if let Some(err) = fallback {
        log::warn!("Logging to stderr instead: {err:#}");
    }
    Ok(())
}

fn open_log_file(path: &Path) -> Result<fs::File> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))
}

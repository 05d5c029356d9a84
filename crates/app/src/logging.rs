//! Tracing subscriber setup. Logs go to a file because stdout belongs to the TUI.

use std::path::Path;

use anyhow::Context as _;
use tracing_subscriber::EnvFilter;

/// Installs a file-backed subscriber. Respects `RUST_LOG`, defaulting to `info`.
pub fn init(log_path: &Path) -> anyhow::Result<()> {
    let directory = log_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(directory)
        .with_context(|| format!("create log dir {}", directory.display()))?;

    let file_name = log_path
        .file_name()
        .with_context(|| format!("log path has no file name: {}", log_path.display()))?;

    let file_appender = tracing_appender::rolling::never(directory, file_name);
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(file_appender)
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!("install tracing subscriber: {err}"))
}

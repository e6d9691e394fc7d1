use anyhow::Context;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding the log filter directives
const LOG_FILTER_VAR: &str = "MONTHCAL_LOG";

const DEFAULT_LOG_FILTER: &str = "monthcal=debug";

/// Send log messages to `log_file`, filtered by the `MONTHCAL_LOG` environment
/// variable (default: `monthcal=debug`).
///
/// The terminal is in use by the calendar, so without a log file nothing is
/// logged.
pub(crate) fn init_logging(log_file: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    let env_filter = EnvFilter::try_from_env(LOG_FILTER_VAR)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    fmt()
        .with_env_filter(env_filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(anyhow::Error::msg)
        .context("failed to install log subscriber")
}

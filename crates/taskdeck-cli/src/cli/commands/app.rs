//! Interactive app command handler.

use anyhow::Result;
use taskdeck_core::config::Config;

/// Starts file logging for the interactive session.
///
/// The app owns the terminal while it runs, so diagnostics go to a file
/// under ${TASKDECK_HOME}/logs instead of stderr. The returned guard must
/// stay alive for the duration of the session; dropping it flushes and
/// stops the background writer.
#[cfg(feature = "tui")]
fn init_logging() -> Result<tracing_appender::non_blocking::WorkerGuard> {
    use anyhow::Context;
    use taskdeck_core::config::paths;
    use tracing_subscriber::EnvFilter;

    let logs_dir = paths::logs_dir();
    std::fs::create_dir_all(&logs_dir)
        .with_context(|| format!("create logs dir {}", logs_dir.display()))?;

    let appender = tracing_appender::rolling::never(&logs_dir, "taskdeck.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter =
        EnvFilter::try_from_env("TASKDECK_LOG").unwrap_or_else(|_| EnvFilter::new("taskdeck=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}

#[cfg(feature = "tui")]
pub async fn run(config: &Config) -> Result<()> {
    let _guard = init_logging()?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting taskdeck");

    taskdeck_tui::run_app(config).await
}

#[cfg(not(feature = "tui"))]
pub async fn run(_config: &Config) -> Result<()> {
    anyhow::bail!("TUI support is disabled in this build (feature \"tui\").");
}

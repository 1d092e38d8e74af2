use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Cross-platform log directory under the user data dir.
fn log_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("tabview").join("logs"))
}

/// Initialize tracing with a file writer. The terminal owns stdout and
/// stderr while the viewer runs, so logs go to a per-process file instead.
/// Best-effort: returns the log path on success, `None` when the log
/// directory is unavailable (the viewer still runs, silently).
///
/// Filtering comes from the `TABVIEW_LOG` env var, defaulting to `info`.
pub fn init_tracing() -> Option<PathBuf> {
    let dir = log_dir()?;
    fs::create_dir_all(&dir).ok()?;

    let path = dir.join(format!("tabview_{}.log", std::process::id()));
    let file = File::create(&path).ok()?;

    let filter = EnvFilter::try_from_env("TABVIEW_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_target(true)
        .with_ansi(false)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();

    tracing::info!(target: "system", "logging initialized");
    Some(path)
}

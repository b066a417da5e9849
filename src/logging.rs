use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Keeps the background log writer alive; logs are flushed when dropped.
pub struct LoggingGuard {
    _guard: WorkerGuard,
    log_dir: PathBuf,
}

impl LoggingGuard {
    pub fn log_dir(&self) -> &std::path::Path {
        &self.log_dir
    }
}

fn log_dir() -> std::io::Result<PathBuf> {
    if let Some(dir) = dirs::data_local_dir().map(|dir| dir.join("userlist").join("logs")) {
        if std::fs::create_dir_all(&dir).is_ok() {
            return Ok(dir);
        }
    }

    let dir = std::env::temp_dir().join("userlist").join("logs");
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Routes tracing output to a daily log file. The terminal belongs to the
/// UI, so nothing is written to stdout or stderr. Returns `None` if logging
/// could not be set up.
pub fn init() -> Option<LoggingGuard> {
    let log_dir = log_dir().ok()?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "userlist.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("userlist=info"));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true),
    );

    if subscriber.try_init().is_err() {
        return None;
    }

    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        tracing::error!(panic = %panic_info, "panic");
        default_hook(panic_info);
    }));

    tracing::info!(log_dir = %log_dir.display(), "tracing initialized");

    Some(LoggingGuard {
        _guard: guard,
        log_dir,
    })
}

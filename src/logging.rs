//! Structured JSONL logging to file plus compact output on stderr.
//!
//! - **JSONL to file** (~/.step-palette/logs/step-palette.jsonl) - one JSON object per line
//! - **Compact to stderr** - human-readable
//!
//! ```rust,ignore
//! use step_palette::logging;
//!
//! // keep the guard alive for the duration of the program
//! let _guard = logging::init(false);
//! tracing::info!(element_count = 42, "Catalog loaded");
//! ```

use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Dropping this guard flushes and closes the log file.
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Install the global subscriber.
///
/// `RUST_LOG` overrides the level; otherwise `info`, or `debug` when
/// `verbose`. If the log file cannot be opened only stderr is used.
pub fn init(verbose: bool) -> LoggingGuard {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let log_path = log_path();
    let (json_layer, file_guard) = match open_log_file(&log_path) {
        Ok(file) => {
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer()
                .json()
                .with_writer(writer)
                .with_timer(fmt::time::UtcTime::rfc_3339())
                .with_target(true)
                .with_level(true)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_file(false)
                .with_line_number(false)
                .with_span_events(FmtSpan::NONE);
            (Some(layer), Some(guard))
        }
        Err(e) => {
            eprintln!("[LOGGING] Failed to open {}: {}", log_path.display(), e);
            (None, None)
        }
    };

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false)
        .with_level(true)
        .compact();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(stderr_layer)
        .init();

    tracing::debug!(log_path = %log_path.display(), "Logging initialized");

    LoggingGuard {
        _file_guard: file_guard,
    }
}

fn open_log_file(path: &std::path::Path) -> std::io::Result<fs::File> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Log directory (~/.step-palette/logs/)
fn log_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".step-palette").join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("step-palette-logs"))
}

/// Path of the JSONL log file
pub fn log_path() -> PathBuf {
    log_dir().join("step-palette.jsonl")
}

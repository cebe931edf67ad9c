//! Logging setup for docwin with file output and optional terminal output.
//!
//! Logs always go to a file at `warn` level, or at the configured level when one is set.
//! Terminal logging goes to stderr so stdout stays free for command output. It is enabled
//! when `DOCWIN_LOG` or `RUST_LOG` is set, or in debug builds.
//!
//! ## Environment Variables
//!
//! 1. **`DOCWIN_LOG`** (highest priority) - docwin specific logging control
//! 2. **`RUST_LOG`** - Standard tracing environment variable
//! 3. **Default** - `warn` globally, `info` for docwin crates
//!
//! ## Log File Location
//!
//! Default: `<data_local_dir>/docwin/logs/docwin-<pid>.log`
//! - macOS: `~/Library/Application Support/docwin/logs/docwin-12345.log`
//! - Linux: `~/.local/share/docwin/logs/docwin-12345.log`
//!
//! Override with `--log-file <path>`. A path with an extension names the file, any other path
//! names the directory.

use std::{
    env,
    error::Error,
    path::{Path, PathBuf},
};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry,
};

type BoxError = Box<dyn Error + Send + Sync>;

/// Crates whose level follows a bare `DOCWIN_LOG` value.
const CRATES: &[&str] = &["docwin", "docwin_text", "docwin_bin"];

/// Returned from [`init`]; must be held alive to ensure log file flushing.
pub struct LogGuard {
    _file_guard: WorkerGuard,
    pub log_file: PathBuf,
}

#[derive(Debug, Clone, Default)]
pub struct LogConfig {
    pub log_file_path: Option<PathBuf>,
}

/// Initialize logging.
///
/// Filters follow `DOCWIN_LOG` > `RUST_LOG` > defaults, see the module docs.
///
/// The returned [`LogGuard`] must be held for the lifetime of the program. Dropping it
/// flushes and stops the background file writer.
///
/// Fails if a global subscriber is already installed.
pub fn init(config: LogConfig) -> Result<LogGuard, BoxError> {
    let (log_dir, filename) = resolve_log_path(config.log_file_path);
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::never(&log_dir, &filename);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_filter(create_file_filter());

    let stdout_enabled = env::var("DOCWIN_LOG").is_ok()
        || env::var("RUST_LOG").is_ok()
        || cfg!(debug_assertions);
    let stdout_layer = stdout_enabled.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_filter(create_filter())
    });

    Registry::default()
        .with(file_layer)
        .with(stdout_layer)
        .try_init()?;

    Ok(LogGuard {
        _file_guard: file_guard,
        log_file: log_dir.join(filename),
    })
}

/// Initialize logging for tests.
///
/// Terminal only, captured by the test harness. Safe to call from every test; only the first
/// call installs a subscriber.
pub fn test() {
    let _ = fmt()
        .with_env_filter(create_filter())
        .with_test_writer()
        .try_init();
}

fn resolve_log_path(override_path: Option<PathBuf>) -> (PathBuf, String) {
    let filename = format!("docwin-{}.log", std::process::id());

    if let Some(path) = override_path {
        if path.extension().is_some() {
            let dir = path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or(filename);
            return (dir.to_path_buf(), name);
        }
        return (path, filename);
    }

    let dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("docwin")
        .join("logs");
    (dir, filename)
}

/// File filter: the user's level if one is set, otherwise `warn`.
fn create_file_filter() -> EnvFilter {
    if env::var("DOCWIN_LOG").is_ok() || env::var("RUST_LOG").is_ok() {
        return create_filter();
    }
    EnvFilter::new("warn")
}

fn create_filter() -> EnvFilter {
    if let Ok(docwin_log) = env::var("DOCWIN_LOG") {
        return EnvFilter::new(expand_docwin_log(&docwin_log));
    }
    if let Ok(rust_log) = env::var("RUST_LOG") {
        return EnvFilter::new(rust_log);
    }
    EnvFilter::new(expand_docwin_log("info"))
}

/// Expand a `DOCWIN_LOG` value into a full filter directive.
///
/// - `DOCWIN_LOG=debug` becomes `warn,docwin=debug,docwin_text=debug,docwin_bin=debug`
/// - `DOCWIN_LOG=docwin_text=trace` is used as-is
fn expand_docwin_log(docwin_log: &str) -> String {
    if docwin_log.contains(|c| matches!(c, '=' | ':' | ',')) {
        return docwin_log.to_string();
    }

    let mut directive = String::from("warn");
    for name in CRATES {
        directive.push_str(&format!(",{name}={docwin_log}"));
    }
    directive
}

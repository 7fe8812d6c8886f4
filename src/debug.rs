//! Debug log bridge for appstate-relay.
//!
//! Routes the `log` facade to `appstate_relay_debug.log` in the temp directory
//! (`/tmp` on Unix, `%TEMP%` on Windows), keeping stdout/stdin free for the
//! notification stream. When `RUST_LOG` is set, records are mirrored to stderr.
//!
//! Level precedence: `--log-level` flag, then `RUST_LOG`, then the config file.
//! Dropped-event diagnostics (target [`TAG`], warn and above) bypass the level
//! and always reach stderr.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;

use crate::appstate::diagnostics::TAG;
use crate::config::LogLevel;

struct DebugLogger {
    file: Mutex<Option<File>>,
    level: Mutex<log::LevelFilter>,
    mirror_stderr: bool,
}

/// Records from the app state diagnostics that are never filtered out.
fn is_drop_diagnostic(metadata: &log::Metadata) -> bool {
    metadata.target() == TAG && metadata.level() <= log::Level::Warn
}

fn passes(level: log::LevelFilter, metadata: &log::Metadata) -> bool {
    metadata.level() <= level || is_drop_diagnostic(metadata)
}

impl log::Log for DebugLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        passes(*self.level.lock(), metadata)
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format!(
            "[{}] [{:<5}] [{}] {}\n",
            get_timestamp(),
            record.level(),
            record.target(),
            record.args()
        );
        if let Some(file) = self.file.lock().as_mut() {
            let _ = file.write_all(line.as_bytes());
            let _ = file.flush();
        }
        if self.mirror_stderr || is_drop_diagnostic(record.metadata()) {
            eprint!("{}", line);
        }
    }

    fn flush(&self) {
        if let Some(file) = self.file.lock().as_mut() {
            let _ = file.flush();
        }
    }
}

static LOGGER: OnceLock<DebugLogger> = OnceLock::new();

/// Path of the debug log file.
pub fn log_path() -> PathBuf {
    std::env::temp_dir().join("appstate_relay_debug.log")
}

/// Resolve the effective level from the three sources.
pub fn resolve_level(
    cli_level: Option<LogLevel>,
    rust_log: Option<&str>,
    config_level: LogLevel,
) -> log::LevelFilter {
    if let Some(level) = cli_level {
        return level.to_level_filter();
    }
    if let Some(filter) = rust_log.and_then(|v| log::LevelFilter::from_str(v.trim()).ok()) {
        return filter;
    }
    config_level.to_level_filter()
}

/// Install the logger. Later calls only adjust the level.
pub fn init_log_bridge(cli_level: Option<LogLevel>, config_level: LogLevel) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let level = resolve_level(cli_level, rust_log.as_deref(), config_level);

    let logger = LOGGER.get_or_init(|| {
        let file = if level == log::LevelFilter::Off {
            None
        } else {
            // Silently run without a file if it can't be opened
            OpenOptions::new()
                .write(true)
                .truncate(true)
                .create(true)
                .open(log_path())
                .ok()
        };
        DebugLogger {
            file: Mutex::new(file),
            level: Mutex::new(level),
            mirror_stderr: rust_log.is_some(),
        }
    });
    *logger.level.lock() = level;

    if log::set_logger(logger).is_ok() {
        log::info!(
            "appstate-relay debug session started (level={}, file={:?})",
            level,
            log_path()
        );
    }
    log::set_max_level(level.max(log::LevelFilter::Warn));
}

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

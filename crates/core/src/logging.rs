//! Structured logging with JSON output.
//!
//! Logs are written as JSON lines to `wristnav-<run_id>.json` in the
//! configured directory, through a non-blocking `tracing_appender` writer.
//! Each process gets a UUID v7 run id, so log file names sort in
//! chronological order and old runs can be pruned at startup.
//!
//! The configured level is only a default, `RUST_LOG` takes precedence:
//!
//! ```bash
//! RUST_LOG=debug ./wristnav
//! RUST_LOG=wristnav_core::navigation=trace,info ./wristnav
//! ```
//!
//! # Example Usage
//!
//! ```no_run
//! use wristnav_core::logging::{get_run_id, init_logging, shutdown_logging};
//! use wristnav_core::settings::Settings;
//!
//! init_logging(&Settings::default())?;
//! eprintln!("Started with run ID: {}", get_run_id());
//!
//! tracing::info!("session started");
//!
//! shutdown_logging();
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::settings::Settings;
use anyhow::{Context, Error};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::sync::{Mutex, OnceLock};
use std::thread;
use std::time::Duration;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{Builder, Rotation};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

const GIT_VERSION: &str = env!("GIT_VERSION");
const BUILD_UUID: &str = env!("BUILD_UUID");
const LOG_FILE_PREFIX: &str = "wristnav-";
const LOG_FILE_SUFFIX: &str = "json";
const FLUSH_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_LEVEL: &str = "info";

static LOG_GUARD: OnceLock<Mutex<Option<WorkerGuard>>> = OnceLock::new();
static RUN_ID: OnceLock<String> = OnceLock::new();

/// Returns the run id of this process, generated on first access.
///
/// ```
/// use wristnav_core::logging::get_run_id;
///
/// let run_id = get_run_id();
/// assert_eq!(get_run_id(), run_id);
/// ```
pub fn get_run_id() -> &'static str {
    RUN_ID.get_or_init(|| Uuid::now_v7().to_string()).as_str()
}

fn is_run_log_name(name: &str) -> bool {
    name.starts_with(LOG_FILE_PREFIX) && name.ends_with(LOG_FILE_SUFFIX)
}

/// Run logs in `log_dir`, oldest first.
///
/// Run ids are UUID v7, so sorting file names sorts runs.
fn run_log_files(log_dir: &Path) -> Result<Vec<PathBuf>, Error> {
    let mut files = Vec::new();

    for entry in fs::read_dir(log_dir)
        .with_context(|| format!("can't read log directory {}", log_dir.display()))?
    {
        let entry = entry.context("can't read log directory entry")?;
        if is_run_log_name(&entry.file_name().to_string_lossy()) {
            files.push(entry.path());
        }
    }

    files.sort();
    Ok(files)
}

/// Deletes the oldest run logs so that at most `keep` remain, and returns
/// how many were deleted. `keep == 0` disables pruning.
fn prune_run_logs(log_dir: &Path, keep: usize) -> Result<usize, Error> {
    if keep == 0 {
        return Ok(0);
    }

    let files = run_log_files(log_dir)?;
    let excess = files.len().saturating_sub(keep);

    for path in &files[..excess] {
        fs::remove_file(path)
            .with_context(|| format!("can't remove old log file {}", path.display()))?;
    }

    Ok(excess)
}

/// Installs the global JSON subscriber for the `logging` section of
/// `settings` and logs the navigation configuration of this run.
///
/// Does nothing when logging is disabled. Must be called at most once, before
/// the navigation manager is created.
///
/// # Errors
///
/// Fails if the log directory can't be created or pruned, if the appender
/// can't be built, if the level directive is invalid, or if a global
/// subscriber is already installed.
pub fn init_logging(settings: &Settings) -> Result<(), Error> {
    let logging = &settings.logging;
    if !logging.enabled {
        return Ok(());
    }

    let log_dir = std::env::current_dir()
        .context("can't get current working directory")?
        .join(&logging.directory);
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("can't create log directory {}", log_dir.display()))?;

    let pruned = prune_run_logs(&log_dir, logging.max_files)?;

    let appender = Builder::new()
        .rotation(Rotation::NEVER)
        .filename_prefix(format!("{}{}", LOG_FILE_PREFIX, get_run_id()))
        .filename_suffix(LOG_FILE_SUFFIX)
        .build(&log_dir)
        .context("can't initialize log file appender")?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(build_filter(&logging.level)?)
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(writer)
                .with_current_span(true),
        )
        .try_init()
        .context("can't initialize tracing subscriber")?;

    let _ = LOG_GUARD.set(Mutex::new(Some(guard)));

    tracing::info!(
        run_id = get_run_id(),
        version = GIT_VERSION,
        build = BUILD_UUID,
        pruned,
        host_package = %settings.host_package,
        initial_control = %settings.initial_control.kind(),
        back_key = settings.navigation.back_key.raw(),
        history_on_failure = ?settings.navigation.history_on_failure,
        "logging initialized"
    );

    Ok(())
}

/// Flushes buffered log lines. Waits at most a few seconds for the writer.
pub fn shutdown_logging() {
    let Some(guard) = LOG_GUARD
        .get()
        .and_then(|slot| slot.lock().ok()?.take())
    else {
        return;
    };

    let (done, flushed) = mpsc::channel();
    thread::spawn(move || {
        drop(guard);
        let _ = done.send(());
    });

    if flushed.recv_timeout(FLUSH_TIMEOUT).is_err() {
        eprintln!("log writer did not flush within {:?}", FLUSH_TIMEOUT);
    }
}

/// `RUST_LOG` wins over `level`; an empty level means `info`.
fn build_filter(level: &str) -> Result<EnvFilter, Error> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let level = match level.trim() {
        "" => DEFAULT_LEVEL,
        level => level,
    };

    EnvFilter::builder()
        .parse(level)
        .with_context(|| format!("invalid logging level {:?}", level))
}

//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once per process
//! - Mirror log output into an optional append-only file
//! - Keep that file bounded with a periodic size check
//!
//! # Design Decisions
//! - Console output goes to stderr; stdout is reserved for the result line
//! - Log level comes from `RUST_LOG`, defaulting to `connection_cli=info`
//! - The file is truncated in place once it exceeds `MAX_LOG_BYTES`
//! - The cleanup task stops on the shutdown signal

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Size above which the log file is truncated (1 MiB).
pub const MAX_LOG_BYTES: u64 = 1024 * 1024;

/// Interval between log file size checks.
pub const CLEANUP_INTERVAL: Duration = Duration::from_secs(7 * 24 * 60 * 60);

const DEFAULT_FILTER: &str = "connection_cli=info";

/// Shared handle to the append-only log file.
#[derive(Clone, Debug)]
pub struct LogFile {
    path: PathBuf,
    file: Arc<Mutex<File>>,
}

impl LogFile {
    /// Open (or create) `path` for appending.
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            file: Arc::new(Mutex::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> MutexGuard<'_, File> {
        self.file.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current size in bytes.
    pub fn len(&self) -> io::Result<u64> {
        Ok(self.lock().metadata()?.len())
    }

    pub fn is_empty(&self) -> io::Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Truncate the file if it is larger than `max_bytes`.
    ///
    /// Returns whether a truncation happened.
    pub fn truncate_if_oversized(&self, max_bytes: u64) -> io::Result<bool> {
        let file = self.lock();
        if file.metadata()?.len() <= max_bytes {
            return Ok(false);
        }
        file.set_len(0)?;
        Ok(true)
    }

    /// One cleanup pass, logging what it found.
    fn cleanup(&self, max_bytes: u64) {
        match self.len() {
            Ok(size) => {
                tracing::info!(
                    path = %self.path.display(),
                    size_bytes = size,
                    limit_bytes = max_bytes,
                    "Checked log file size"
                );
            }
            Err(e) => {
                tracing::error!(path = %self.path.display(), error = %e, "Failed to read log file size");
                return;
            }
        }

        match self.truncate_if_oversized(max_bytes) {
            Ok(true) => tracing::info!(path = %self.path.display(), "Log file has been truncated"),
            Ok(false) => tracing::debug!("Log file is still small, skipping cleanup"),
            Err(e) => tracing::error!(path = %self.path.display(), error = %e, "Failed to truncate log file"),
        }
    }
}

/// Writer handed to the fmt layer for each event.
pub struct LogFileWriter {
    file: Arc<Mutex<File>>,
}

impl Write for LogFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.lock().unwrap_or_else(PoisonError::into_inner).write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.lock().unwrap_or_else(PoisonError::into_inner).flush()
    }
}

impl<'a> MakeWriter<'a> for LogFile {
    type Writer = LogFileWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogFileWriter {
            file: self.file.clone(),
        }
    }
}

/// Spawn the periodic size check. The first check runs immediately.
pub fn spawn_cleanup(
    log: LogFile,
    interval: Duration,
    max_bytes: u64,
    mut shutdown: broadcast::Receiver<()>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = time::interval(interval);
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    log.cleanup(max_bytes);
                }
                _ = shutdown.recv() => {
                    tracing::debug!("Log cleanup received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    })
}

/// Process-wide logging service.
///
/// Built once at startup; `shutdown` stops the cleanup task.
pub struct Logging {
    log_file: Option<LogFile>,
    stop: broadcast::Sender<()>,
    cleanup: Option<JoinHandle<()>>,
}

impl Logging {
    /// Install the subscriber and, if `log_path` is set, the file layer.
    ///
    /// Must be called from within a Tokio runtime. A log file that cannot be
    /// opened is reported and skipped.
    pub fn init(log_path: Option<&Path>) -> Self {
        let (log_file, open_error) = match log_path.map(LogFile::open) {
            Some(Ok(file)) => (Some(file), None),
            Some(Err(e)) => (None, Some(e)),
            None => (None, None),
        };

        let file_layer = log_file.clone().map(|file| {
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(file)
        });

        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| DEFAULT_FILTER.into()),
            )
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .with(file_layer)
            .try_init();

        if let (Some(path), Some(e)) = (log_path, open_error) {
            tracing::warn!(path = %path.display(), error = %e, "Failed to open log file");
        }

        let (stop, _) = broadcast::channel(1);
        let cleanup = log_file
            .clone()
            .map(|file| spawn_cleanup(file, CLEANUP_INTERVAL, MAX_LOG_BYTES, stop.subscribe()));

        Self {
            log_file,
            stop,
            cleanup,
        }
    }

    pub fn log_file(&self) -> Option<&LogFile> {
        self.log_file.as_ref()
    }

    /// Stop the cleanup task and flush the log file.
    pub async fn shutdown(self) {
        // No receiver means no cleanup task was started.
        let _ = self.stop.send(());
        if let Some(handle) = self.cleanup {
            let _ = handle.await;
        }
        if let Some(file) = &self.log_file {
            let _ = file.make_writer().flush();
        }
    }
}

use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
    sync::{Mutex, OnceLock},
};

use chrono::Local;

use crate::app_config;

pub const LAUNCHER_LOG_FILE: &str = "launcher.log";
pub const LAUNCHER_LOG_MAX_BYTES: u64 = 5 * 1024 * 1024;
pub const LOG_BACKUP_COUNT: usize = 5;

static LAUNCHER_LOG_WRITE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogCategory {
    Runtime,
    Startup,
    UiCore,
    AutoUpdater,
}

impl LogCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Runtime => "Runtime",
            Self::Startup => "Startup",
            Self::UiCore => "UICore",
            Self::AutoUpdater => "AutoUpdater",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Error => "ERROR",
        }
    }
}

pub fn resolve_launcher_log_path(log_dir: Option<PathBuf>, file_name: &str) -> PathBuf {
    log_dir
        .unwrap_or_else(|| PathBuf::from("."))
        .join(file_name)
}

pub fn format_log_line(
    timestamp: &str,
    category: LogCategory,
    level: LogLevel,
    message: &str,
) -> String {
    format!(
        "[{timestamp}] [{}] [{}] {}",
        category.as_str(),
        level.as_str(),
        message.trim_end()
    )
}

fn backup_path(path: &Path, index: usize) -> PathBuf {
    let mut raw = path.as_os_str().to_owned();
    raw.push(format!(".{index}"));
    PathBuf::from(raw)
}

/// Shifts `launcher.log` to `launcher.log.1` (and older backups up by one)
/// once the file reaches `max_bytes`. The oldest backup past
/// `backup_count` is dropped.
pub fn rotate_log_if_needed(path: &Path, max_bytes: u64, backup_count: usize) -> Result<(), String> {
    let size = match fs::metadata(path) {
        Ok(metadata) => metadata.len(),
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(error) => {
            return Err(format!(
                "Failed to read log metadata {}: {}",
                path.display(),
                error
            ))
        }
    };
    if size < max_bytes {
        return Ok(());
    }

    if backup_count == 0 {
        return fs::remove_file(path)
            .map_err(|error| format!("Failed to truncate log {}: {}", path.display(), error));
    }

    let oldest = backup_path(path, backup_count);
    if oldest.exists() {
        fs::remove_file(&oldest).map_err(|error| {
            format!("Failed to remove log backup {}: {}", oldest.display(), error)
        })?;
    }
    for index in (1..backup_count).rev() {
        let from = backup_path(path, index);
        if from.exists() {
            let to = backup_path(path, index + 1);
            fs::rename(&from, &to).map_err(|error| {
                format!("Failed to rotate log backup {}: {}", from.display(), error)
            })?;
        }
    }
    let first = backup_path(path, 1);
    fs::rename(path, &first)
        .map_err(|error| format!("Failed to rotate log {}: {}", path.display(), error))
}

pub fn append_log_line(
    path: &Path,
    line: &str,
    max_bytes: u64,
    backup_count: usize,
    write_lock: &OnceLock<Mutex<()>>,
) -> Result<(), String> {
    let lock = write_lock.get_or_init(|| Mutex::new(()));
    // A poisoned lock only means another writer panicked mid-line.
    let _guard = lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

    if let Some(parent_dir) = path.parent() {
        fs::create_dir_all(parent_dir).map_err(|error| {
            format!(
                "Failed to create log directory {}: {}",
                parent_dir.display(),
                error
            )
        })?;
    }
    rotate_log_if_needed(path, max_bytes, backup_count)?;

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|error| format!("Failed to open log {}: {}", path.display(), error))?;
    writeln!(file, "{line}")
        .map_err(|error| format!("Failed to write log {}: {}", path.display(), error))
}

pub fn append_launcher_log(category: LogCategory, level: LogLevel, message: &str) {
    let line = format_log_line(
        &Local::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
        category,
        level,
        message,
    );
    if cfg!(debug_assertions) {
        eprintln!("{line}");
    }

    let path = resolve_launcher_log_path(app_config::resolve_log_dir(), LAUNCHER_LOG_FILE);
    if let Err(error) = append_log_line(
        &path,
        &line,
        LAUNCHER_LOG_MAX_BYTES,
        LOG_BACKUP_COUNT,
        &LAUNCHER_LOG_WRITE_LOCK,
    ) {
        if cfg!(debug_assertions) {
            eprintln!("{error}");
        }
    }
}

pub fn append_runtime_log(message: &str) {
    append_launcher_log(LogCategory::Runtime, LogLevel::Info, message);
}

pub fn append_startup_log(message: &str) {
    append_launcher_log(LogCategory::Startup, LogLevel::Info, message);
}

pub fn append_ui_log(message: &str) {
    append_launcher_log(LogCategory::UiCore, LogLevel::Info, message);
}

pub fn append_updater_log(level: LogLevel, message: &str) {
    append_launcher_log(LogCategory::AutoUpdater, level, message);
}

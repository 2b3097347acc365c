use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::Local;

use crate::{runtime_config, DESKTOP_LOG_FILE};

pub(crate) fn resolve_desktop_log_path(root_dir: Option<PathBuf>, file_name: &str) -> PathBuf {
    match root_dir {
        Some(root) => root.join("logs").join(file_name),
        None => std::env::temp_dir().join("it-tools").join(file_name),
    }
}

fn format_log_line(message: &str) -> String {
    format!(
        "[{}] {}",
        Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
        message
    )
}

fn append_line(path: &Path, line: &str) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|error| {
            format!("Failed to create log directory {}: {}", parent.display(), error)
        })?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|error| format!("Failed to open log file {}: {}", path.display(), error))?;
    writeln!(file, "{line}")
        .map_err(|error| format!("Failed to write log file {}: {}", path.display(), error))
}

/// Prints to stdout and, unless disabled, appends to the desktop log file.
/// Never fails: a broken log file must not break the caller.
pub(crate) fn append_desktop_log(message: &str) {
    let line = format_log_line(message);
    println!("{line}");

    if !runtime_config::desktop_log_file_enabled() {
        return;
    }

    let path = resolve_desktop_log_path(runtime_config::default_data_root_dir(), DESKTOP_LOG_FILE);
    if let Err(error) = append_line(&path, &line) {
        eprintln!("{error}");
    }
}

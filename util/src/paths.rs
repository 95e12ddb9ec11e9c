use crate::config;
use chrono::NaiveDate;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Create a directory (and all parents) if it doesn't exist, and return the path.
pub fn ensure_dir<P: AsRef<Path>>(path: P) -> io::Result<PathBuf> {
    let p = path.as_ref();
    fs::create_dir_all(p)?;
    Ok(p.to_path_buf())
}

/// Ensure the parent directory of a *file path* exists (no-op if none).
pub fn ensure_parent_dir<P: AsRef<Path>>(file_path: P) -> io::Result<()> {
    if let Some(parent) = file_path.as_ref().parent() {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Global storage root (absolute), from `config::storage_root()`.
/// If relative in env, resolve against current_dir().
pub fn storage_root() -> PathBuf {
    let root = config::storage_root();
    let p = PathBuf::from(root);
    if p.is_absolute() {
        p
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(p)
    }
}

/// Top-level folder for check-in photos: {STORAGE_ROOT}/attendance
pub fn attendance_dir() -> PathBuf {
    storage_root().join("attendance")
}

/// Per-date photo folder: {STORAGE_ROOT}/attendance/{YYYY-MM-DD}
pub fn attendance_date_dir(date: NaiveDate) -> PathBuf {
    attendance_dir().join(date.format("%Y-%m-%d").to_string())
}

/// Build a path for a stored check-in photo (does not create).
/// Example: attendance_photo_path(2025-03-01, "member_7_1740816000000.jpg")
pub fn attendance_photo_path(date: NaiveDate, filename: &str) -> PathBuf {
    attendance_date_dir(date).join(filename)
}

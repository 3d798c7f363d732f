//! CLI command handlers for `StudyFlow`.
//!
//! Each command is implemented in its own submodule. The helpers here load
//! the record store and resolve the "today" date shared by several commands.

pub mod assignments;
pub mod calendar;
pub mod config;
pub mod courses;
pub mod dashboard;
pub mod grades;
pub mod report;

use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use studyflow::config::Config;
use studyflow::core::records;
use studyflow::core::store::Store;
use studyflow::{debug, error, info, warn};

/// Path of the record snapshot from config
pub fn data_path(config: &Config) -> PathBuf {
    PathBuf::from(&config.paths.data_file)
}

/// Load the store from the configured data file
///
/// A missing file yields an empty store. Normalization warnings are logged.
/// Returns `None` (after reporting the error) if the file exists but cannot be
/// loaded.
pub fn load_store(config: &Config) -> Option<Store> {
    let path = data_path(config);
    if !path.exists() {
        info!("No data file at {}; starting empty", path.display());
        return Some(Store::default());
    }

    match Store::load(&path) {
        Ok((store, warnings)) => {
            for warning in &warnings {
                warn!("{warning}");
            }
            debug!(
                "Loaded {} courses, {} assignments, {} study sessions from {}",
                store.courses.len(),
                store.assignments.len(),
                store.study_sessions.len(),
                path.display()
            );
            Some(store)
        }
        Err(e) => {
            error!("Failed to load {}: {e}", path.display());
            eprintln!("✗ Failed to load data file: {e}");
            None
        }
    }
}

/// Persist the store to `path`, reporting failures
pub fn save_store(store: &Store, path: &Path) -> bool {
    match store.save(path) {
        Ok(()) => {
            debug!("Saved data file {}", path.display());
            true
        }
        Err(e) => {
            error!("Failed to save {}: {e}", path.display());
            eprintln!("✗ Failed to save data file: {e}");
            false
        }
    }
}

/// Resolve `--today`, defaulting to the local date
pub fn resolve_today(today: Option<&str>) -> Result<NaiveDate, String> {
    today.map_or_else(
        || Ok(chrono::Local::now().date_naive()),
        |value| {
            records::parse_date(value).ok_or_else(|| format!("Invalid date '{value}' (expected YYYY-MM-DD)"))
        },
    )
}

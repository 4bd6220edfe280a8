//! Settings and storage helpers for the Routine Advisor app

use anyhow::{Context, Result};
use services::kv_store::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
use shared::settings::AdvisorSettings;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const ENV_COMPLETION_URL: &str = "ADVISOR_COMPLETION_URL";
const ENV_CATALOG: &str = "ADVISOR_CATALOG";
const ENV_STORAGE_DIR: &str = "ADVISOR_STORAGE_DIR";

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("com.local", "Routine Advisor", "RoutineAdvisor")
}

pub fn config_path() -> Option<PathBuf> {
    project_dirs().map(|p| p.config_dir().join("settings.json"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SettingsFile {
    Loaded,
    Missing,
    Unreadable,
}

fn read_settings(path: &Path) -> (AdvisorSettings, SettingsFile) {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return (AdvisorSettings::default(), SettingsFile::Missing)
        }
        Err(e) => {
            tracing::warn!("could not read settings at {:?}: {}", path, e);
            return (AdvisorSettings::default(), SettingsFile::Unreadable);
        }
    };
    match serde_json::from_str::<AdvisorSettings>(&contents) {
        Ok(settings) => (settings, SettingsFile::Loaded),
        Err(e) => {
            tracing::warn!("ignoring unreadable settings at {:?}: {}", path, e);
            (AdvisorSettings::default(), SettingsFile::Unreadable)
        }
    }
}

fn write_settings(path: &Path, settings: &AdvisorSettings) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Settings from `path`. Defaults are written only when no file exists; a file
/// that fails to parse is left alone for the user to fix.
fn load_or_init_at(path: &Path) -> AdvisorSettings {
    let (settings, file) = read_settings(path);
    if file == SettingsFile::Missing {
        match write_settings(path, &settings) {
            Ok(()) => tracing::info!("wrote default settings to {:?}", path),
            Err(e) => tracing::warn!("could not write default settings: {:#}", e),
        }
    }
    settings
}

/// Settings from the platform config directory, or defaults when there is none.
pub fn load_or_init_settings() -> AdvisorSettings {
    match config_path() {
        Some(path) => load_or_init_at(&path),
        None => AdvisorSettings::default(),
    }
}

/// Environment variables win over the settings file
pub fn apply_env_overrides(settings: &mut AdvisorSettings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(url) = lookup(ENV_COMPLETION_URL) {
        settings.completion_url = url;
    }
    if let Some(source) = lookup(ENV_CATALOG) {
        settings.catalog_source = source;
    }
    if let Some(dir) = lookup(ENV_STORAGE_DIR) {
        settings.storage_dir = Some(dir);
    }
}

/// Where the selection lives. Falls back to memory when no directory is known.
pub fn open_storage(settings: &AdvisorSettings) -> Arc<dyn KeyValueStore> {
    if let Some(dir) = &settings.storage_dir {
        return Arc::new(FileKeyValueStore::new(dir));
    }
    match FileKeyValueStore::in_data_dir() {
        Some(store) => {
            tracing::debug!("selection stored under {:?}", store.base_path());
            Arc::new(store)
        }
        None => {
            tracing::warn!("no data directory available; selection will not survive a restart");
            Arc::new(MemoryKeyValueStore::new())
        }
    }
}

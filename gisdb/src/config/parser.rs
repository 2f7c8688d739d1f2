//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This module contains the `parse_ini()` function and its helpers.
//! It is the single place where INI key names are mapped to struct fields.

use ini::Ini;
use std::path::PathBuf;

use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [index] section
    if let Some(section) = ini.section(Some("index")) {
        if let Some(v) = section.get("initial_capacity") {
            config.index.initial_capacity = parse_positive(v).ok_or_else(|| {
                ConfigFileError::InvalidValue {
                    section: "index".to_string(),
                    key: "initial_capacity".to_string(),
                    value: v.to_string(),
                    reason: "must be a positive integer".to_string(),
                }
            })?;
        }
        if let Some(v) = section.get("load_limit") {
            config.index.load_limit = v
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|limit| *limit > 0.0 && *limit <= 1.0)
                .ok_or_else(|| ConfigFileError::InvalidValue {
                    section: "index".to_string(),
                    key: "load_limit".to_string(),
                    value: v.to_string(),
                    reason: "must be a number greater than 0 and at most 1".to_string(),
                })?;
        }
    }

    // [cache] section
    if let Some(section) = ini.section(Some("cache")) {
        if let Some(v) = section.get("capacity") {
            config.cache.capacity =
                parse_positive(v).ok_or_else(|| ConfigFileError::InvalidValue {
                    section: "cache".to_string(),
                    key: "capacity".to_string(),
                    value: v.to_string(),
                    reason: "must be a positive integer".to_string(),
                })?;
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("directory") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.directory = expand_tilde(v);
            }
        }
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = v.to_string();
            }
        }
    }

    Ok(config)
}

/// Parse an integer that must be at least 1.
fn parse_positive(value: &str) -> Option<usize> {
    value.trim().parse::<usize>().ok().filter(|n| *n >= 1)
}

/// Expand ~ to home directory in paths.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

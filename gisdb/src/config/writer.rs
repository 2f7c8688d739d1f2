//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! This module contains the `to_config_string()` function that produces
//! the commented INI representation written to `config.ini`.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    format!(
        r#"[index]
; Number of slots the name index starts with (default: 1024)
; The index doubles whenever it grows past the load limit
initial_capacity = {}
; Load factor above which the name index doubles (default: 0.7)
; Must be greater than 0 and at most 1
load_limit = {}

[cache]
; Number of records kept in the in-memory buffer pool (default: 15)
capacity = {}

[logging]
; Directory for the diagnostic log (default: logs, relative to the working directory)
directory = {}
; Diagnostic log file name (default: gisdb.log)
file = {}
"#,
        config.index.initial_capacity,
        config.index.load_limit,
        config.cache.capacity,
        path_to_string(&config.logging.directory),
        config.logging.file,
    )
}

fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}

//! `load_config` module: loads and validates the JSON configuration file into
//! the typed settings the daemon runs on.
//!
//! This is the only place where untrusted configuration is parsed and mapped
//! to rich internal structs.
//!
//! # Responsibilities
//! - Parse the user-supplied JSON configuration file into an all-optional raw
//!   struct, then validate it in one pass: every missing required key is
//!   enumerated in a single diagnostic, not just the first one encountered.
//! - Inject the connection credential from the environment when present
//!   (`BUCKET_RELAY_CONNECTION_STRING`), so the secret can stay out of the
//!   config file.
//! - Apply defaults for the optional keys (target root, eligibility suffix).
//!
//! # Errors
//! All errors in this module use `anyhow::Error` for context-rich
//! diagnostics, surfaced at the CLI boundary with a non-zero exit status.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use serde::Deserialize;
use tracing::{error, info};

use bucket_relay_core::settings::RelaySettings;

/// Env var that can supply or override the `connection_string` key.
pub const CONNECTION_STRING_ENV: &str = "BUCKET_RELAY_CONNECTION_STRING";

const DEFAULT_FILE_SUFFIX: &str = ".json";

/// Everything main() needs that the core settings do not carry themselves.
#[derive(Debug)]
pub struct LoadedConfig {
    pub settings: RelaySettings,
    pub connection_string: String,
    pub log_path: Option<PathBuf>,
}

/// Raw file shape: every key optional so validation can report all gaps at
/// once instead of failing on the first deserialization error.
#[derive(Debug, Deserialize)]
struct RawConfig {
    polling_interval: Option<u64>,
    watch_path: Option<PathBuf>,
    connection_string: Option<String>,
    container_name: Option<String>,
    local_output_path: Option<PathBuf>,
    log_path: Option<PathBuf>,
    file_suffix: Option<String>,
}

/// Loads the JSON config file at `path` and validates the required keys.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<LoadedConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let config_content = match fs::read_to_string(path_ref) {
        Ok(content) => content,
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to read config file");
            return Err(anyhow::anyhow!(
                "Failed to read config file {:?}: {}",
                path_ref,
                e
            ));
        }
    };

    let raw: RawConfig = match serde_json::from_str(&config_content) {
        Ok(raw) => raw,
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config JSON");
            return Err(anyhow::anyhow!("Failed to parse config JSON: {e}"));
        }
    };

    // The credential may come from the environment instead of the file.
    let connection_string = env::var(CONNECTION_STRING_ENV)
        .ok()
        .or(raw.connection_string);

    let mut missing = Vec::new();
    if raw.polling_interval.is_none() {
        missing.push("polling_interval");
    }
    if raw.watch_path.is_none() {
        missing.push("watch_path");
    }
    if connection_string.is_none() {
        missing.push("connection_string");
    }
    if raw.container_name.is_none() {
        missing.push("container_name");
    }

    let (polling_interval, watch_path, connection_string, container_name) = match (
        raw.polling_interval,
        raw.watch_path,
        connection_string,
        raw.container_name,
    ) {
        (Some(interval), Some(watch), Some(conn), Some(container)) => {
            (interval, watch, conn, container)
        }
        _ => {
            for key in &missing {
                error!(key = %key, config_path = ?path_ref, "Missing configuration setting");
            }
            return Err(anyhow::anyhow!(
                "Missing configuration settings: {}",
                missing.join(", ")
            ));
        }
    };

    if polling_interval == 0 {
        error!(config_path = ?path_ref, "polling_interval must be greater than zero");
        return Err(anyhow::anyhow!("polling_interval must be greater than zero"));
    }

    let target_root = match raw.local_output_path {
        Some(path) => path,
        None => env::current_dir().map_err(|e| {
            anyhow::anyhow!("Failed to resolve current directory as local output root: {e}")
        })?,
    };

    info!(config_path = ?path_ref, "Config file loaded successfully");

    Ok(LoadedConfig {
        settings: RelaySettings {
            watch_dir: watch_path,
            target_root,
            container: container_name,
            poll_interval: Duration::from_secs(polling_interval),
            file_suffix: raw
                .file_suffix
                .unwrap_or_else(|| DEFAULT_FILE_SUFFIX.to_string()),
        },
        connection_string,
        log_path: raw.log_path,
    })
}

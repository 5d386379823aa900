//! Where the console keeps its files, and which config it runs with.
//!
//! Resolution order:
//! - `.env` in the working directory, loaded into the process environment
//! - `P2P_CHAT_CONFIG_DIR`, else `<platform config dir>/p2p-chat`
//! - `config.json` in that directory, else defaults
//! - `P2P_CHAT_BACKEND_URL` over `backend.url`

use crate::error::ChatAppError;

use client_core::config::ClientConfig;
use common::ErrorLocation;

use std::env;
use std::panic::Location;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

pub const CONFIG_DIR_ENV: &str = "P2P_CHAT_CONFIG_DIR";
pub const BACKEND_URL_ENV: &str = "P2P_CHAT_BACKEND_URL";

const APP_DIR_NAME: &str = "p2p-chat";
const LOG_DIR_NAME: &str = "logs";

/// What happened to `.env`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DotenvOutcome {
    Loaded(PathBuf),
    NotFound,
    /// The file exists but could not be read or parsed; nothing after the
    /// failing line was applied.
    Invalid(String),
}

impl DotenvOutcome {
    pub fn from_result(result: Result<PathBuf, dotenvy::Error>) -> Self {
        match result {
            Ok(path) => DotenvOutcome::Loaded(path),
            Err(e) if e.not_found() => DotenvOutcome::NotFound,
            Err(e) => DotenvOutcome::Invalid(e.to_string()),
        }
    }

    /// Report the outcome. Call once the logger is up.
    pub fn log(&self) {
        match self {
            DotenvOutcome::Loaded(path) => info!("Loaded .env from: {}", path.display()),
            DotenvOutcome::NotFound => debug!("No .env file found"),
            DotenvOutcome::Invalid(reason) => warn!("Failed to load .env: {reason}"),
        }
    }
}

/// Load `.env` from the working directory, if there is one.
///
/// Runs before the logger exists, so the outcome is returned for logging later.
pub fn load_dotenv() -> DotenvOutcome {
    DotenvOutcome::from_result(dotenvy::dotenv())
}

/// Config directory from the environment or the platform default.
pub fn config_dir() -> Result<PathBuf, ChatAppError> {
    resolve_config_dir(env::var_os(CONFIG_DIR_ENV).map(PathBuf::from), dirs::config_dir())
}

/// Pick the config directory.
///
/// # Arguments
///
/// * `explicit_override` - Used as-is when set
/// * `platform_dir` - Platform config dir; `p2p-chat` is appended
///
/// # Errors
///
/// Returns [`ChatAppError::Config`] if neither is available.
pub fn resolve_config_dir(
    explicit_override: Option<PathBuf>,
    platform_dir: Option<PathBuf>,
) -> Result<PathBuf, ChatAppError> {
    if let Some(dir) = explicit_override {
        return Ok(dir);
    }

    platform_dir
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or_else(|| ChatAppError::Config {
            message: format!("No config directory available, set {CONFIG_DIR_ENV}"),
            location: ErrorLocation::from(Location::caller()),
        })
}

pub fn log_dir(config_dir: &Path) -> PathBuf {
    config_dir.join(LOG_DIR_NAME)
}

/// Load `config.json` and apply environment overrides.
pub fn load(config_dir: &Path) -> Result<ClientConfig, ChatAppError> {
    let config = ClientConfig::load(config_dir)?;
    apply_overrides(config, env::var(BACKEND_URL_ENV).ok())
}

/// Apply a backend URL override and re-validate.
///
/// # Errors
///
/// Returns [`ChatAppError::Config`] if the overridden config is invalid.
pub fn apply_overrides(
    mut config: ClientConfig,
    backend_url: Option<String>,
) -> Result<ClientConfig, ChatAppError> {
    if let Some(url) = backend_url {
        info!("Backend URL overridden by {BACKEND_URL_ENV}: {url}");
        config.backend.url = url;
    } else {
        debug!("Using backend URL {}", config.backend.url);
    }

    config.validate()?;
    Ok(config)
}

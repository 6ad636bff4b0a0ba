//! # Configuration
//!
//! Profile-based transport defaults, loaded once at startup from an INI
//! file. The composer core never reads configuration; a loaded [`Profile`]
//! only seeds the transport client.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use ini::Ini;

/// Default profile file path.
pub const DEFAULT_PROFILE_PATH: &str = "~/.reqforge/profile";

/// Environment variable name for overriding the profile path.
pub const PROFILE_PATH_ENV_VAR: &str = "REQFORGE_PROFILE_PATH";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Get the profile file path, checking the environment variable first.
pub fn profile_path() -> String {
    std::env::var_os(PROFILE_PATH_ENV_VAR)
        .and_then(|val| val.into_string().ok())
        .unwrap_or_else(|| DEFAULT_PROFILE_PATH.to_string())
}

/// Transport defaults read from one profile section.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub user_agent: Option<String>,
    pub accept: Option<String>,
    pub timeout: Duration,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            user_agent: None,
            accept: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Load a named profile from the configured path, tilde-expanded.
///
/// A missing file or section falls back to the defaults; a file that exists
/// but cannot be parsed is an error.
pub fn load_profile(name: &str) -> Result<Profile> {
    let path = shellexpand::tilde(&profile_path()).into_owned();
    load_profile_from(Path::new(&path), name)
}

/// Load a named profile from an explicit file path.
pub fn load_profile_from(path: &Path, name: &str) -> Result<Profile> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no profile file, using defaults");
        return Ok(Profile::default());
    }

    let ini = Ini::load_from_file(path)
        .with_context(|| format!("failed to read profile file {}", path.display()))?;

    let Some(section) = ini.section(Some(name)) else {
        tracing::debug!(profile = name, "profile section not found, using defaults");
        return Ok(Profile::default());
    };

    let timeout = match section.get("timeout") {
        Some(value) => Duration::from_secs(
            value
                .parse()
                .with_context(|| format!("invalid timeout `{value}` in profile `{name}`"))?,
        ),
        None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
    };

    Ok(Profile {
        user_agent: section.get("user_agent").map(str::to_string),
        accept: section.get("accept").map(str::to_string),
        timeout,
    })
}

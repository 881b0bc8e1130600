use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::api::gemini::ClientInitError;
use crate::core::constants::{DEFAULT_API_KEY_ENV, DEFAULT_BASE_URL, FALLBACK_API_KEY_ENV};

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    /// API root the model path is appended to
    pub base_url: Option<String>,
    /// Environment variable that holds the API key
    pub api_key_env: Option<String>,
    /// Where diagnostics are written while the UI owns the terminal
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn api_key_env(&self) -> &str {
        self.api_key_env
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(DEFAULT_API_KEY_ENV)
    }

    /// Read the API key from the process environment.
    pub fn resolve_api_key(&self) -> Result<String, ClientInitError> {
        self.resolve_api_key_with(|name| std::env::var(name).ok())
    }

    /// Resolve the key through `lookup`, trying the configured variable first
    /// and then [`FALLBACK_API_KEY_ENV`]. Blank values count as missing.
    pub fn resolve_api_key_with<F>(&self, lookup: F) -> Result<String, ClientInitError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut checked = vec![self.api_key_env().to_string()];
        if checked[0] != FALLBACK_API_KEY_ENV {
            checked.push(FALLBACK_API_KEY_ENV.to_string());
        }

        let found = checked
            .iter()
            .filter_map(|name| lookup(name))
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty());

        found.ok_or(ClientInitError::MissingApiKey { checked })
    }
}

/// Get a user-friendly display string for a path
/// Converts absolute paths to use ~ notation on Unix-like systems when possible
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}

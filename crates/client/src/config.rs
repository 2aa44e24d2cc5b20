//! Client configuration loaded from the environment
//!
//! | Env Var               | Default                                 |
//! |-----------------------|-----------------------------------------|
//! | `SEJOUR_API_URL`      | `http://127.0.0.1:8000/api/`            |
//! | `SEJOUR_STORAGE_PATH` | `~/.sejour/storage.json`                |
//! | `SEJOUR_GEOCODER_URL` | `https://nominatim.openstreetmap.org/`  |
//! | `SEJOUR_PAGE_SIZE`    | `10`                                    |

use std::path::PathBuf;

use reqwest::Url;

use crate::error::{ClientError, ClientResult};

/// Default API base URL
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api/";

/// Default geocoding service
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org/";

/// Default client-side table page size
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Name of the local storage file
const STORAGE_FILE: &str = "storage.json";

/// Resolved client configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// API base URL, always ending with `/`
    pub api_url: Url,
    /// Local key/value storage file (token, remembered email)
    pub storage_path: PathBuf,
    /// Geocoding service base URL
    pub geocoder_url: Url,
    /// Rows per page in client-side paginated tables
    pub page_size: usize,
}

impl ClientConfig {
    /// Load `.env` if present, then read the process environment
    pub fn from_env() -> ClientResult<Self> {
        if let Err(e) = dotenvy::dotenv() {
            tracing::debug!("No .env file loaded: {}", e);
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve the configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> ClientResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("SEJOUR_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let geocoder_url =
            lookup("SEJOUR_GEOCODER_URL").unwrap_or_else(|| DEFAULT_GEOCODER_URL.to_string());

        let storage_path = match lookup("SEJOUR_STORAGE_PATH") {
            Some(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => default_storage_path(lookup("HOME")),
        };

        let page_size = match lookup("SEJOUR_PAGE_SIZE") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    ClientError::Config(format!("SEJOUR_PAGE_SIZE must be a positive integer, got '{}'", raw))
                })?,
            None => DEFAULT_PAGE_SIZE,
        };

        Ok(Self {
            api_url: base_url(&api_url)?,
            storage_path,
            geocoder_url: base_url(&geocoder_url)?,
            page_size,
        })
    }

    /// Override the API base URL
    pub fn with_api_url(mut self, url: &str) -> ClientResult<Self> {
        self.api_url = base_url(url)?;
        Ok(self)
    }

    /// Override the storage file
    pub fn with_storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_path = path.into();
        self
    }
}

/// Parse a base URL, making sure relative joins keep its last segment
pub fn base_url(raw: &str) -> ClientResult<Url> {
    let trimmed = raw.trim();
    let normalized = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    };
    Url::parse(&normalized).map_err(|e| ClientError::Config(format!("invalid URL '{}': {}", raw, e)))
}

fn default_storage_path(home: Option<String>) -> PathBuf {
    match home {
        Some(home) if !home.is_empty() => PathBuf::from(home).join(".sejour").join(STORAGE_FILE),
        _ => PathBuf::from(STORAGE_FILE),
    }
}

//! Runtime configuration sourced from the environment.

use reqwest::Url;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

pub const USERNAME_VAR: &str = "DASH_LOGIN_USERNAME";
pub const PASSWORD_VAR: &str = "DASH_LOGIN_PASSWORD";
pub const BASE_PATH_VAR: &str = "DASH_BASE_PATH";
/// Set by GitLab CI when deploying to Pages; its pathname becomes the base path
pub const PAGES_URL_VAR: &str = "CI_PAGES_URL";

/// Base path used when neither an explicit base nor a Pages URL is configured
pub const DEFAULT_BASE_PATH: &str = "/voc-analyse-sentiment/";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} is not a valid URL: {value}")]
    InvalidUrl { var: &'static str, value: String },
}

/// Expected login pair. Either half may be empty, in which case no login succeeds.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Both halves are present and non-empty
    pub fn is_configured(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

// Keep the password out of logs
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub credentials: Credentials,
    /// Always starts and ends with `/`
    pub base_path: String,
}

impl Config {
    /// Build config from process environment, after loading `.env` if one exists.
    ///
    /// - `DASH_LOGIN_USERNAME` / `DASH_LOGIN_PASSWORD`: expected credentials (empty when unset)
    /// - `DASH_BASE_PATH`: deployment base path
    /// - `CI_PAGES_URL`: fallback source of the base path
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Some(problem) = dotenv_problem(&dotenvy::dotenv()) {
            warn!("{}", problem);
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credentials = Credentials {
            username: lookup(USERNAME_VAR).unwrap_or_default(),
            password: lookup(PASSWORD_VAR).unwrap_or_default(),
        };

        let base_path = match lookup(BASE_PATH_VAR).filter(|v| !v.is_empty()) {
            Some(explicit) => normalize_base_path(&explicit),
            None => match lookup(PAGES_URL_VAR).filter(|v| !v.is_empty()) {
                Some(pages_url) => base_path_from_pages_url(&pages_url)?,
                None => DEFAULT_BASE_PATH.to_string(),
            },
        };

        Ok(Self {
            credentials,
            base_path,
        })
    }
}

/// Why loading `.env` went wrong, if it did. A missing file is fine.
fn dotenv_problem(result: &Result<PathBuf, dotenvy::Error>) -> Option<String> {
    match result {
        Ok(_) => None,
        Err(e) if e.not_found() => None,
        Err(e) => Some(format!(
            "Ignoring .env ({}); {} and {} may be unset",
            e, USERNAME_VAR, PASSWORD_VAR
        )),
    }
}

/// Ensure a base path starts and ends with exactly one `/`.
pub fn normalize_base_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}/")
    }
}

/// `https://group.gitlab.io/project` → `/project/`
pub fn base_path_from_pages_url(pages_url: &str) -> Result<String, ConfigError> {
    let url = Url::parse(pages_url).map_err(|_| ConfigError::InvalidUrl {
        var: PAGES_URL_VAR,
        value: pages_url.to_string(),
    })?;
    Ok(normalize_base_path(url.path()))
}

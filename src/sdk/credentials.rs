//! Credential and endpoint resolution for the Aruba Cloud API.
//!
//! Credentials are resolved in order:
//! 1. Explicit options
//! 2. Environment variables (ARUBACLOUD_USERNAME, ARUBACLOUD_PASSWORD)
//! 3. Credentials file (~/.arubacloud/credentials.json)
//!
//! The API host is the ARUBACLOUD_APISERVER override when set, otherwise the
//! default host of the selected datacenter.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::error::{Error, Result};
use crate::types::DataCenterRegion;

/// Environment variable overriding the API host.
pub const API_SERVER_ENV: &str = "ARUBACLOUD_APISERVER";

/// Environment variable holding the control panel username.
pub const USERNAME_ENV: &str = "ARUBACLOUD_USERNAME";

/// Environment variable holding the control panel password.
pub const PASSWORD_ENV: &str = "ARUBACLOUD_PASSWORD";

/// Resolved credentials for API access.
#[derive(Clone)]
pub struct Credentials {
    /// Control panel username
    pub username: String,
    /// Control panel password
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Credentials file structure.
#[derive(Debug, Deserialize)]
struct CredentialsFile {
    username: Option<String>,
    password: Option<String>,
}

/// Get the path to the credentials file.
pub fn credentials_file_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".arubacloud").join("credentials.json"))
}

/// Read a credentials file, ignoring missing or malformed files.
async fn read_credentials_file(path: &Path) -> Option<CredentialsFile> {
    let content = fs::read_to_string(path).await.ok()?;
    serde_json::from_str(&content).ok()
}

/// Resolve credentials from options, environment, or the default credentials file.
///
/// # Errors
///
/// Returns an error if username or password cannot be resolved from any source.
pub async fn resolve_credentials(
    username: Option<&str>,
    password: Option<&str>,
) -> Result<Credentials> {
    resolve_credentials_from(username, password, credentials_file_path().as_deref()).await
}

/// Resolve credentials, falling back to the credentials file at `file`.
pub async fn resolve_credentials_from(
    username: Option<&str>,
    password: Option<&str>,
    file: Option<&Path>,
) -> Result<Credentials> {
    // Try options first
    let mut resolved_username = username.map(String::from);
    let mut resolved_password = password.map(String::from);

    // Try environment variables
    if resolved_username.is_none() {
        resolved_username = std::env::var(USERNAME_ENV).ok();
    }
    if resolved_password.is_none() {
        resolved_password = std::env::var(PASSWORD_ENV).ok();
    }

    // Try credentials file
    if resolved_username.is_none() || resolved_password.is_none() {
        if let Some(path) = file {
            if let Some(saved) = read_credentials_file(path).await {
                if resolved_username.is_none() {
                    resolved_username = saved.username;
                }
                if resolved_password.is_none() {
                    resolved_password = saved.password;
                }
            }
        }
    }

    let username = resolved_username.filter(|u| !u.is_empty()).ok_or_else(|| {
        Error::CredentialsNotFound(format!(
            "username is required. Provide it via:\n\
             1. the username option\n\
             2. the {} environment variable\n\
             3. ~/.arubacloud/credentials.json",
            USERNAME_ENV
        ))
    })?;

    let password = resolved_password.ok_or_else(|| {
        Error::CredentialsNotFound(format!(
            "password is required. Provide it via:\n\
             1. the password option\n\
             2. the {} environment variable\n\
             3. ~/.arubacloud/credentials.json",
            PASSWORD_ENV
        ))
    })?;

    Ok(Credentials { username, password })
}

/// Resolve the API host: explicit override, then environment, then region default.
pub fn resolve_api_host(datacenter: DataCenterRegion, api_server: Option<&str>) -> String {
    api_server
        .map(String::from)
        .or_else(|| std::env::var(API_SERVER_ENV).ok())
        .filter(|host| !host.trim().is_empty())
        .unwrap_or_else(|| datacenter.api_host())
}

//! HTTP client for the hosted backend.
//!
//! The backend exposes two surfaces under a single project URL: the auth
//! API at /auth/v1 and the data API at /rest/v1. Every request carries
//! the project anon key; session-scoped requests add a bearer token.

use anyhow::{Context, Result};
use serde_json::json;
use uuid::Uuid;

use super::error::{RemoteError, RemoteErrorKind, RemoteResult};
use super::types::{NewTask, Session, Task, User};
use crate::config::BackendConfig;

/// Standard User-Agent header for taskdeck API requests.
pub const USER_AGENT: &str = concat!("taskdeck/", env!("CARGO_PKG_VERSION"));

/// Environment variable overriding the configured backend URL.
pub const BACKEND_URL_ENV: &str = "TASKDECK_BACKEND_URL";
/// Environment variable overriding the configured anon key.
pub const ANON_KEY_ENV: &str = "TASKDECK_ANON_KEY";

/// Table holding task rows on the data API.
const TASKS_TABLE: &str = "todos";

/// Resolved connection settings for the hosted backend.
#[derive(Debug, Clone)]
pub struct BackendSettings {
    pub base_url: String,
    pub anon_key: String,
}

impl BackendSettings {
    /// Resolves settings from config with environment overrides.
    ///
    /// Resolution order for both values:
    /// 1. Environment variable (`TASKDECK_BACKEND_URL` / `TASKDECK_ANON_KEY`)
    /// 2. Config file (url / `anon_key` in [backend])
    ///
    /// # Errors
    /// Returns an error if a value is missing from both sources or the
    /// URL does not parse.
    pub fn from_config(config: &BackendConfig) -> Result<Self> {
        let base_url = resolve_backend_url(config)?;
        let anon_key = resolve_anon_key(config)?;
        Ok(Self { base_url, anon_key })
    }
}

/// Resolves the backend URL with precedence: env > config.
fn resolve_backend_url(config: &BackendConfig) -> Result<String> {
    // Try env var first
    if let Ok(env_url) = std::env::var(BACKEND_URL_ENV) {
        let trimmed = env_url.trim();
        if !trimmed.is_empty() {
            validate_url(trimmed)?;
            return Ok(trimmed.trim_end_matches('/').to_string());
        }
    }

    // Try config value
    if let Some(config_url) = config.effective_url() {
        validate_url(config_url)?;
        return Ok(config_url.trim_end_matches('/').to_string());
    }

    anyhow::bail!("No backend URL configured. Set {BACKEND_URL_ENV} or url in [backend].")
}

/// Resolves the anon key with precedence: env > config.
fn resolve_anon_key(config: &BackendConfig) -> Result<String> {
    if let Ok(env_key) = std::env::var(ANON_KEY_ENV) {
        let trimmed = env_key.trim();
        if !trimmed.is_empty() {
            return Ok(trimmed.to_string());
        }
    }

    config
        .effective_anon_key()
        .map(str::to_string)
        .context(format!(
            "No anon key available. Set {ANON_KEY_ENV} or anon_key in [backend]."
        ))
}

/// Validates that a URL is well-formed.
fn validate_url(url: &str) -> Result<()> {
    url::Url::parse(url).with_context(|| format!("Invalid backend URL: {url}"))?;
    Ok(())
}

/// Returns whether a URL points at a loopback host.
fn is_loopback_url(url: &str) -> bool {
    url::Url::parse(url).is_ok_and(|parsed| {
        matches!(parsed.host_str(), Some("127.0.0.1" | "localhost" | "[::1]"))
    })
}

/// Client for the hosted backend.
pub struct BackendClient {
    settings: BackendSettings,
    http: reqwest::Client,
}

impl BackendClient {
    /// Creates a new backend client with the given settings.
    ///
    /// # Panics
    /// - In test builds (`#[cfg(test)]`), panics if `base_url` is not a loopback address.
    /// - At runtime, panics if `TASKDECK_BLOCK_REAL_API=1` and `base_url` is not loopback.
    ///
    /// This prevents tests from accidentally making real network requests.
    /// Point `TASKDECK_BACKEND_URL` at a mock server instead.
    pub fn new(settings: BackendSettings) -> Self {
        // Compile-time guard for unit tests
        #[cfg(test)]
        if !is_loopback_url(&settings.base_url) {
            panic!(
                "Tests must not call a real backend!\n\
                 Set TASKDECK_BACKEND_URL to a mock server (e.g., wiremock).\n\
                 Found base_url: {}",
                settings.base_url
            );
        }

        // Runtime guard for integration tests (set TASKDECK_BLOCK_REAL_API=1 in test harness)
        #[cfg(not(test))]
        if std::env::var("TASKDECK_BLOCK_REAL_API").is_ok_and(|v| v == "1")
            && !is_loopback_url(&settings.base_url)
        {
            panic!(
                "TASKDECK_BLOCK_REAL_API=1 but trying to reach a real backend!\n\
                 Set TASKDECK_BACKEND_URL to a mock server.\n\
                 Found base_url: {}",
                settings.base_url
            );
        }

        Self {
            settings,
            http: reqwest::Client::new(),
        }
    }

    /// Returns the resolved backend base URL.
    pub fn base_url(&self) -> &str {
        &self.settings.base_url
    }

    /// Creates a new account.
    ///
    /// A successful signup does not establish a session; the caller is
    /// expected to sign in afterwards.
    pub async fn sign_up(&self, email: &str, password: &str) -> RemoteResult<()> {
        let url = format!("{}/auth/v1/signup", self.settings.base_url);
        let builder = self
            .request(reqwest::Method::POST, &url, None)
            .json(&json!({ "email": email, "password": password }));
        send(builder).await?;
        Ok(())
    }

    /// Exchanges credentials for a session.
    pub async fn sign_in(&self, email: &str, password: &str) -> RemoteResult<Session> {
        let url = format!(
            "{}/auth/v1/token?grant_type=password",
            self.settings.base_url
        );
        let builder = self
            .request(reqwest::Method::POST, &url, None)
            .json(&json!({ "email": email, "password": password }));
        let response = send(builder).await?;
        parse_json(response, "session").await
    }

    /// Fetches the account behind an access token.
    pub async fn get_user(&self, access_token: &str) -> RemoteResult<User> {
        let url = format!("{}/auth/v1/user", self.settings.base_url);
        let builder = self.request(reqwest::Method::GET, &url, Some(access_token));
        let response = send(builder).await?;
        parse_json(response, "user").await
    }

    /// Revokes the session behind an access token.
    pub async fn sign_out(&self, access_token: &str) -> RemoteResult<()> {
        let url = format!("{}/auth/v1/logout", self.settings.base_url);
        let builder = self.request(reqwest::Method::POST, &url, Some(access_token));
        send(builder).await?;
        Ok(())
    }

    /// Fetches every task visible to the session, newest first.
    ///
    /// Ordering is applied server side on created_at so each reload
    /// observes the same order.
    pub async fn fetch_tasks(&self, access_token: &str) -> RemoteResult<Vec<Task>> {
        let url = format!(
            "{}/rest/v1/{TASKS_TABLE}?select=*&order=created_at.desc",
            self.settings.base_url
        );
        let builder = self.request(reqwest::Method::GET, &url, Some(access_token));
        let response = send(builder).await?;
        parse_json(response, "task list").await
    }

    /// Inserts a new task row.
    pub async fn insert_task(&self, access_token: &str, task: &NewTask) -> RemoteResult<()> {
        let url = format!("{}/rest/v1/{TASKS_TABLE}", self.settings.base_url);
        let builder = self
            .request(reqwest::Method::POST, &url, Some(access_token))
            .header("prefer", "return=minimal")
            .json(task);
        send(builder).await?;
        Ok(())
    }

    /// Sets the completed flag on a task row.
    pub async fn set_task_completed(
        &self,
        access_token: &str,
        id: Uuid,
        completed: bool,
    ) -> RemoteResult<()> {
        let url = format!("{}/rest/v1/{TASKS_TABLE}?id=eq.{id}", self.settings.base_url);
        let builder = self
            .request(reqwest::Method::PATCH, &url, Some(access_token))
            .header("prefer", "return=minimal")
            .json(&json!({ "completed": completed }));
        send(builder).await?;
        Ok(())
    }

    /// Deletes a task row.
    pub async fn delete_task(&self, access_token: &str, id: Uuid) -> RemoteResult<()> {
        let url = format!("{}/rest/v1/{TASKS_TABLE}?id=eq.{id}", self.settings.base_url);
        let builder = self.request(reqwest::Method::DELETE, &url, Some(access_token));
        send(builder).await?;
        Ok(())
    }

    /// Builds a request with the standard backend headers.
    ///
    /// Requests without a session still authorize with the anon key,
    /// which is what the auth API expects for signup and sign-in.
    fn request(
        &self,
        method: reqwest::Method,
        url: &str,
        access_token: Option<&str>,
    ) -> reqwest::RequestBuilder {
        let builder = self
            .http
            .request(method, url)
            .header("apikey", &self.settings.anon_key)
            .header("content-type", "application/json")
            .header("user-agent", USER_AGENT);
        match access_token {
            Some(token) => builder.bearer_auth(token),
            None => builder.bearer_auth(&self.settings.anon_key),
        }
    }
}

/// Sends a request and turns non-success statuses into errors.
async fn send(builder: reqwest::RequestBuilder) -> RemoteResult<reqwest::Response> {
    let response = builder
        .send()
        .await
        .map_err(|e| classify_reqwest_error(&e))?;

    let status = response.status();
    if !status.is_success() {
        let error_body = response.text().await.unwrap_or_default();
        return Err(RemoteError::http_status(status.as_u16(), &error_body));
    }
    Ok(response)
}

async fn parse_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
    what: &str,
) -> RemoteResult<T> {
    response
        .json::<T>()
        .await
        .map_err(|e| RemoteError::parse(format!("Failed to parse {what} response: {e}")))
}

fn classify_reqwest_error(e: &reqwest::Error) -> RemoteError {
    if e.is_timeout() {
        RemoteError::timeout(format!("Request timed out: {e}"))
    } else if e.is_connect() {
        RemoteError::timeout(format!("Connection failed: {e}"))
    } else if e.is_request() {
        RemoteError::new(RemoteErrorKind::HttpStatus, format!("Request error: {e}"))
    } else {
        RemoteError::new(RemoteErrorKind::HttpStatus, format!("Network error: {e}"))
    }
}

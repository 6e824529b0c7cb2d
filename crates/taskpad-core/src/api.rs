//! HTTP client for the remote task service.
//!
//! Stateless request methods: credentials are passed per call and attached
//! as a Basic authorization header, never retained. Each call is a single
//! round trip with no retry and no caching; the caller decides on retry
//! policy.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::{AUTHORIZATION, USER_AGENT as USER_AGENT_HEADER};
use reqwest::{Response, StatusCode};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{Credentials, Task, TaskPatch, User};

/// Standard User-Agent header for taskpad API requests.
pub const USER_AGENT: &str = concat!("taskpad/", env!("CARGO_PKG_VERSION"));

/// Builds the authorization header value for Basic auth.
///
/// The wire format is `Basic base64("{username}:{password}")`, standard
/// alphabet with padding. The service matches this byte-for-byte, so the
/// encoding is applied identically on every authenticated call.
pub fn basic_auth_header(credentials: &Credentials) -> String {
    let raw = format!("{}:{}", credentials.username, credentials.password);
    format!("Basic {}", STANDARD.encode(raw))
}

/// Client for the remote task service.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Creates a new account.
    ///
    /// # Errors
    /// `Error::Registration` on any non-success response (e.g. duplicate
    /// username).
    pub async fn register(&self, username: &str, password: &str) -> Result<User> {
        let response = self
            .http
            .post(self.url("/users/"))
            .header(USER_AGENT_HEADER, USER_AGENT)
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await?;

        if !response.status().is_success() {
            let (status, body) = failure_parts(response).await;
            debug!(%status, "registration rejected");
            return Err(Error::Registration { status, body });
        }

        Ok(response.json().await?)
    }

    /// Validates credentials by requesting the authenticated identity.
    ///
    /// # Errors
    /// `Error::Authentication` on any non-success response (treated as
    /// invalid credentials).
    pub async fn fetch_current_user(&self, credentials: &Credentials) -> Result<User> {
        let response = self
            .http
            .get(self.url("/users/me/"))
            .header(USER_AGENT_HEADER, USER_AGENT)
            .header(AUTHORIZATION, basic_auth_header(credentials))
            .send()
            .await?;

        if !response.status().is_success() {
            debug!(status = %response.status(), "credential check rejected");
            return Err(Error::Authentication);
        }

        Ok(response.json().await?)
    }

    /// Fetches the full task collection, in service order.
    ///
    /// # Errors
    /// `Error::Request` on any non-success response.
    pub async fn list_tasks(&self, credentials: &Credentials) -> Result<Vec<Task>> {
        let response = self
            .http
            .get(self.url("/todos"))
            .header(USER_AGENT_HEADER, USER_AGENT)
            .header(AUTHORIZATION, basic_auth_header(credentials))
            .send()
            .await?;

        let response = check_request(response).await?;
        let tasks: Vec<Task> = response.json().await?;
        debug!(count = tasks.len(), "listed tasks");
        Ok(tasks)
    }

    /// Creates a task with the given title.
    ///
    /// # Errors
    /// `Error::Request` on any non-success response.
    pub async fn create_task(&self, credentials: &Credentials, title: &str) -> Result<Task> {
        let response = self
            .http
            .post(self.url("/todos"))
            .header(USER_AGENT_HEADER, USER_AGENT)
            .header(AUTHORIZATION, basic_auth_header(credentials))
            .json(&serde_json::json!({ "title": title }))
            .send()
            .await?;

        let response = check_request(response).await?;
        Ok(response.json().await?)
    }

    /// Applies a partial update to a task.
    ///
    /// # Errors
    /// `Error::Request` on any non-success response, including not-found for
    /// an unknown id.
    pub async fn update_task(
        &self,
        credentials: &Credentials,
        id: i64,
        patch: &TaskPatch,
    ) -> Result<Task> {
        let response = self
            .http
            .put(self.url(&format!("/todos/{id}")))
            .header(USER_AGENT_HEADER, USER_AGENT)
            .header(AUTHORIZATION, basic_auth_header(credentials))
            .json(patch)
            .send()
            .await?;

        let response = check_request(response).await?;
        Ok(response.json().await?)
    }

    /// Deletes a task. The response body is ignored on success.
    ///
    /// # Errors
    /// `Error::Request` on any non-success response, including not-found for
    /// an unknown id.
    pub async fn delete_task(&self, credentials: &Credentials, id: i64) -> Result<()> {
        let response = self
            .http
            .delete(self.url(&format!("/todos/{id}")))
            .header(USER_AGENT_HEADER, USER_AGENT)
            .header(AUTHORIZATION, basic_auth_header(credentials))
            .send()
            .await?;

        check_request(response).await?;
        Ok(())
    }
}

/// Maps a non-success task response to `Error::Request`.
async fn check_request(response: Response) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let (status, body) = failure_parts(response).await;
    debug!(%status, "task request failed");
    Err(Error::Request { status, body })
}

async fn failure_parts(response: Response) -> (StatusCode, String) {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    (status, body)
}

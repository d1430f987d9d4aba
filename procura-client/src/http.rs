//! HTTP transport for the marketplace API
//!
//! Thin wrapper over `reqwest` that attaches the bearer credential from
//! the session context, applies the configured timeout, and maps response
//! statuses onto the [`ClientError`] taxonomy. Every call requires a
//! session; a missing token short-circuits locally before any request is
//! issued.

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use shared::response::ErrorBody;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::session::SessionHandle;

/// HTTP client for making authenticated requests to the backend.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    session: SessionHandle,
}

impl HttpClient {
    /// Create a new HTTP client from configuration and a session handle.
    pub fn new(config: &ClientConfig, session: SessionHandle) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    /// The session handle this transport authenticates with.
    pub fn session(&self) -> &SessionHandle {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn auth_header(&self) -> ClientResult<String> {
        Ok(format!("Bearer {}", self.session.bearer()?))
    }

    /// Make a GET request.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let auth = self.auth_header()?;
        let response = self
            .client
            .get(self.url(path))
            .header(reqwest::header::AUTHORIZATION, auth)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with a JSON body.
    pub async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let auth = self.auth_header()?;
        let response = self
            .client
            .post(self.url(path))
            .header(reqwest::header::AUTHORIZATION, auth)
            .json(body)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with a form-encoded body.
    pub async fn post_form<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        form: &B,
    ) -> ClientResult<T> {
        let auth = self.auth_header()?;
        let response = self
            .client
            .post(self.url(path))
            .header(reqwest::header::AUTHORIZATION, auth)
            .form(form)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Make a POST request without a body (parameters in the query string).
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let auth = self.auth_header()?;
        let response = self
            .client
            .post(self.url(path))
            .header(reqwest::header::AUTHORIZATION, auth)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Make a PUT request with a JSON body.
    pub async fn put_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let auth = self.auth_header()?;
        let response = self
            .client
            .put(self.url(path))
            .header(reqwest::header::AUTHORIZATION, auth)
            .json(body)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Make a PUT request without a body (parameters in the query string).
    pub async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let auth = self.auth_header()?;
        let response = self
            .client
            .put(self.url(path))
            .header(reqwest::header::AUTHORIZATION, auth)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Make a DELETE request.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let auth = self.auth_header()?;
        let response = self
            .client
            .delete(self.url(path))
            .header(reqwest::header::AUTHORIZATION, auth)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Map the response onto the error taxonomy, extracting the backend
    /// `{detail}` body verbatim when present.
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorBody>(&text)
                .map(|b| b.detail)
                .unwrap_or(text);

            return match status {
                StatusCode::UNAUTHORIZED => Err(ClientError::Unauthenticated),
                StatusCode::FORBIDDEN => Err(ClientError::Forbidden(detail)),
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(detail)),
                StatusCode::CONFLICT => Err(ClientError::Conflict(detail)),
                _ => Err(ClientError::RemoteRejected {
                    status: status.as_u16(),
                    detail,
                }),
            };
        }

        let text = response.text().await?;
        serde_json::from_str(&text)
            .map_err(|e| ClientError::InvalidResponse(format!("{e}: {text}")))
    }
}

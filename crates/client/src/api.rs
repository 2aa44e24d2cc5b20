//! HTTP client for the booking API
//!
//! Wraps [`reqwest`] with the API's conventions: bearer authentication,
//! JSON bodies, multipart bodies when images are attached, and the error
//! envelope on failures.

use std::sync::{Arc, RwLock};

use reqwest::{Method, RequestBuilder, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::{ClientConfig, base_url};
use crate::error::{ClientError, ClientResult};
use crate::upload::{GALLERY_FIELD, ImageUpload, MAIN_IMAGE_FIELD, REMOVED_FIELD};

/// Type-safe HTTP client for the booking API
///
/// Cloning is cheap; clones share the connection pool and the bearer token.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    token: Arc<RwLock<Option<String>>>,
}

impl ApiClient {
    /// Create a client for the configured API
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("sejour/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(http, config.api_url.clone()))
    }

    /// Create a client reusing an existing [`reqwest::Client`]
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            token: Arc::new(RwLock::new(None)),
        }
    }

    /// Create a client from a base URL string
    pub fn with_base_url(url: &str) -> ClientResult<Self> {
        Ok(Self::with_client(reqwest::Client::new(), base_url(url)?))
    }

    /// API base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Set or clear the bearer token
    pub fn set_token(&self, token: Option<String>) {
        match self.token.write() {
            Ok(mut guard) => *guard = token,
            Err(poisoned) => *poisoned.into_inner() = token,
        }
    }

    /// Current bearer token
    pub fn token(&self) -> Option<String> {
        match self.token.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Resolve a path relative to the base URL
    pub fn url(&self, path: &str) -> ClientResult<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ClientError::Config(format!("invalid path '{}': {}", path, e)))
    }

    fn request(&self, method: Method, path: &str) -> ClientResult<RequestBuilder> {
        let url = self.url(path)?;
        tracing::debug!(method = %method, url = %url, "API request");
        let mut builder = self
            .http
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(token) = self.token() {
            builder = builder.bearer_auth(token);
        }
        Ok(builder)
    }

    // ========================================================================
    // JSON helpers
    // ========================================================================

    /// `GET` a JSON resource
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> ClientResult<T> {
        let response = self.request(Method::GET, path)?.query(query).send().await?;
        Self::parse_response(response).await
    }

    /// `POST` a JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send_json(Method::POST, path, body).await
    }

    /// `PUT` a JSON body
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send_json(Method::PUT, path, body).await
    }

    /// `PATCH` a JSON body
    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send_json(Method::PATCH, path, body).await
    }

    /// `DELETE` a resource, discarding the body
    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        let response = self.request(Method::DELETE, path)?.send().await?;
        Self::check_status(response).await
    }

    /// `POST` without a body, discarding the response body
    pub async fn post_empty(&self, path: &str) -> ClientResult<()> {
        let response = self.request(Method::POST, path)?.send().await?;
        Self::check_status(response).await
    }

    /// `GET` a binary document (receipts)
    pub async fn get_bytes(&self, path: &str, query: &[(String, String)]) -> ClientResult<Vec<u8>> {
        let response = self
            .request(Method::GET, path)?
            .header(reqwest::header::ACCEPT, "application/pdf")
            .query(query)
            .send()
            .await?;
        let response = Self::ensure_success(response).await?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn send_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let response = self.request(method, path)?.json(body).send().await?;
        Self::parse_response(response).await
    }

    // ========================================================================
    // Multipart
    // ========================================================================

    /// Send text fields plus image files as `multipart/form-data`
    ///
    /// `PUT`/`PATCH` are tunnelled through `POST` with a `_method` field,
    /// since multipart bodies are only parsed on `POST`.
    pub async fn send_multipart<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        fields: Vec<(String, String)>,
        images: ImageUpload,
    ) -> ClientResult<T> {
        let mut form = reqwest::multipart::Form::new();
        if method != Method::POST {
            form = form.text("_method", method.as_str().to_string());
        }
        for (name, value) in fields {
            form = form.text(name, value);
        }
        if let Some(main) = images.main_image {
            form = form.part(MAIN_IMAGE_FIELD, main.into_part().await?);
        }
        for file in images.gallery_images {
            form = form.part(GALLERY_FIELD, file.into_part().await?);
        }
        for id in images.removed_image_ids {
            form = form.text(REMOVED_FIELD, id.to_string());
        }

        let response = self
            .request(Method::POST, path)?
            .multipart(form)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    // ---- private helpers ----

    /// Return the response unchanged on success, or the classified error
    async fn ensure_success(response: Response) -> ClientResult<Response> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            tracing::debug!(status = status.as_u16(), "API error response");
            return Err(ClientError::from_response(status.as_u16(), &body));
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type
    async fn parse_response<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let response = Self::ensure_success(response).await?;
        let bytes = response.bytes().await?;
        // Some endpoints answer 204; treat an empty body as JSON null
        let raw: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
            b"null"
        } else {
            &bytes
        };
        serde_json::from_slice(raw).map_err(|e| ClientError::Parse(e.to_string()))
    }

    /// Assert the response has a success status code, discarding the body
    async fn check_status(response: Response) -> ClientResult<()> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_join() {
        let client = ApiClient::with_base_url("http://localhost:8000/api").unwrap();
        assert_eq!(
            client.url("/hotels/3").unwrap().as_str(),
            "http://localhost:8000/api/hotels/3"
        );
        assert_eq!(
            client.url("auth/login").unwrap().as_str(),
            "http://localhost:8000/api/auth/login"
        );
    }

    #[test]
    fn test_token_is_shared_between_clones() {
        let client = ApiClient::with_base_url("http://localhost:8000/api/").unwrap();
        let clone = client.clone();
        client.set_token(Some("abc".to_string()));
        assert_eq!(clone.token().as_deref(), Some("abc"));
        clone.set_token(None);
        assert_eq!(client.token(), None);
    }
}

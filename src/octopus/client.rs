//! Octopus Deploy HTTP client
//!
//! Thin reqwest wrapper carrying the server URL and credentials.

use crate::octopus::error::{OctopusError, OctopusResult};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Client, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("push-build-information/", env!("CARGO_PKG_VERSION"));

const API_KEY_HEADER: &str = "X-Octopus-ApiKey";

/// Credentials accepted by the Octopus API.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// API key, sent as `X-Octopus-ApiKey`
    ApiKey(String),
    /// OIDC access token, sent as a bearer token
    AccessToken(String),
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::ApiKey(_) => f.write_str("ApiKey(***)"),
            Credentials::AccessToken(_) => f.write_str("AccessToken(***)"),
        }
    }
}

/// Octopus Deploy API client. Cloning is cheap.
#[derive(Clone, Debug)]
pub struct OctopusClient {
    http: Client,
    server_url: String,
}

impl OctopusClient {
    /// Create a new client builder
    #[must_use]
    pub fn builder() -> OctopusClientBuilder {
        OctopusClientBuilder::new()
    }

    /// Server URL without a trailing slash
    #[must_use]
    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// `GET {server}{path}` and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> OctopusResult<T> {
        let response = self
            .http
            .get(format!("{}{path}", self.server_url))
            .send()
            .await?;
        Ok(check_status(response).await?.json().await?)
    }

    /// `POST {server}{path}` with a JSON body, discarding the response body.
    pub async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> OctopusResult<()> {
        let response = self
            .http
            .post(format!("{}{path}", self.server_url))
            .json(body)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }
}

async fn check_status(response: Response) -> OctopusResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(OctopusError::Api {
        status: status.as_u16(),
        body,
    })
}

/// Builder for creating `OctopusClient`
pub struct OctopusClientBuilder {
    server_url: Option<String>,
    credentials: Option<Credentials>,
}

impl OctopusClientBuilder {
    /// Create a new builder
    #[must_use]
    pub fn new() -> Self {
        Self {
            server_url: None,
            credentials: None,
        }
    }

    /// Set the Octopus server URL
    pub fn server_url(mut self, url: impl Into<String>) -> Self {
        self.server_url = Some(url.into());
        self
    }

    /// Authenticate with an API key
    pub fn api_key(self, key: impl Into<String>) -> Self {
        self.credentials(Credentials::ApiKey(key.into()))
    }

    /// Authenticate with an access token
    pub fn access_token(self, token: impl Into<String>) -> Self {
        self.credentials(Credentials::AccessToken(token.into()))
    }

    /// Set credentials
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Build the `OctopusClient`
    pub fn build(self) -> OctopusResult<OctopusClient> {
        let server_url = self
            .server_url
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .ok_or_else(|| OctopusError::ClientSetup("server URL is required".to_string()))?;

        if !(server_url.starts_with("http://") || server_url.starts_with("https://")) {
            return Err(OctopusError::ClientSetup(format!(
                "server URL must start with http:// or https://, got '{server_url}'"
            )));
        }

        let credentials = self
            .credentials
            .ok_or_else(|| OctopusError::ClientSetup("credentials are required".to_string()))?;

        let mut headers = HeaderMap::new();
        match credentials {
            Credentials::ApiKey(key) => {
                headers.insert(API_KEY_HEADER, sensitive_header(&key)?);
            }
            Credentials::AccessToken(token) => {
                headers.insert(AUTHORIZATION, sensitive_header(&format!("Bearer {token}"))?);
            }
        }

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()
            .map_err(|e| OctopusError::ClientSetup(e.to_string()))?;

        Ok(OctopusClient { http, server_url })
    }
}

impl Default for OctopusClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn sensitive_header(value: &str) -> OctopusResult<HeaderValue> {
    let mut header = HeaderValue::from_str(value)
        .map_err(|e| OctopusError::ClientSetup(format!("Invalid credential: {e}")))?;
    header.set_sensitive(true);
    Ok(header)
}

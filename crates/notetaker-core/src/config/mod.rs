//! Backend connection configuration.
//!
//! Provides a `BackendConfig` describing where the managed GraphQL endpoint
//! lives and how requests authenticate against it. Values are validated once
//! here so transports can assume a well-formed endpoint.

use std::fmt;
use std::time::Duration;

use crate::{Error, Result};

/// Default per-request timeout for the HTTP transport.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// How requests authenticate against the managed backend.
#[derive(Clone, Default, PartialEq, Eq)]
pub enum BackendAuth {
    /// No auth header; only for local/dev endpoints.
    #[default]
    None,
    /// Public API key, sent as `x-api-key`.
    ApiKey(String),
    /// User-pool JWT issued by the hosted auth flow, sent as `Authorization`.
    Token(String),
}

impl BackendAuth {
    /// Build an auth mode from optional credentials. A token wins over an API key.
    pub fn from_credentials(api_key: Option<String>, auth_token: Option<String>) -> Self {
        if let Some(token) = normalize_text_option(auth_token) {
            return Self::Token(token);
        }
        normalize_text_option(api_key).map_or(Self::None, Self::ApiKey)
    }

    /// Short label for logs and status output.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::ApiKey(_) => "api-key",
            Self::Token(_) => "token",
        }
    }
}

impl fmt::Debug for BackendAuth {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => formatter.write_str("None"),
            Self::ApiKey(_) => formatter.debug_tuple("ApiKey").field(&"[REDACTED]").finish(),
            Self::Token(_) => formatter.debug_tuple("Token").field(&"[REDACTED]").finish(),
        }
    }
}

/// Validated GraphQL backend configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// GraphQL endpoint URL (no trailing slash)
    pub endpoint: String,
    /// Request authentication
    pub auth: BackendAuth,
    /// Per-request timeout; `None` waits indefinitely
    pub request_timeout: Option<Duration>,
}

impl BackendConfig {
    /// Create a config for `endpoint`, validating the URL.
    pub fn new(endpoint: impl Into<String>, auth: BackendAuth) -> Result<Self> {
        let endpoint = normalize_endpoint(endpoint.into())?;
        validate_auth(&auth)?;
        Ok(Self {
            endpoint,
            auth,
            request_timeout: Some(DEFAULT_REQUEST_TIMEOUT),
        })
    }

    /// Override the request timeout.
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// Normalize optional text by trimming whitespace and removing empties.
pub fn normalize_text_option(value: Option<String>) -> Option<String> {
    let value = value?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Check if a string starts with `http://` or `https://`.
pub fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

fn normalize_endpoint(raw: String) -> Result<String> {
    let endpoint = normalize_text_option(Some(raw))
        .ok_or_else(|| Error::Config("GraphQL endpoint must not be empty".to_string()))?;
    if is_http_url(&endpoint) {
        Ok(endpoint.trim_end_matches('/').to_string())
    } else {
        Err(Error::Config(
            "GraphQL endpoint must include http:// or https://".to_string(),
        ))
    }
}

fn validate_auth(auth: &BackendAuth) -> Result<()> {
    match auth {
        BackendAuth::ApiKey(value) | BackendAuth::Token(value) if value.trim().is_empty() => Err(
            Error::Config(format!("{} credential must not be empty", auth.label())),
        ),
        _ => Ok(()),
    }
}

// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for OpenSea API operations

use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Result type alias for OpenSea client operations
pub type OpenseaResult<T> = Result<T, OpenseaError>;

/// Errors returned by the OpenSea API client
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum OpenseaError {
    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body was not valid JSON
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    /// The API rejected one or more request parameters (HTTP 400)
    #[error("invalid request: {message}")]
    InvalidRequest { message: String },

    /// A parameter failed client-side validation; nothing was sent
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// Authentication failed (HTTP 401)
    #[error("Authentication failed")]
    Unauthorized,

    /// The server blocked access (HTTP 403), usually a missing or throttled API key
    #[error("the server blocked access")]
    Blocked,

    /// Requested resource does not exist (HTTP 404)
    #[error("resource not found: {endpoint}")]
    NotFound { endpoint: String },

    /// Rate limit exceeded (HTTP 429)
    #[error("Rate limit exceeded")]
    RateLimited,

    /// The upstream gateway timed out (HTTP 504)
    #[error("the server reported a gateway time-out error")]
    GatewayTimeout,

    /// Any other non-success response
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The client-side request deadline elapsed
    #[error("Request timeout after {seconds} seconds")]
    Timeout { seconds: u64 },

    /// Invalid or unloadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Writing the exported response body failed
    #[error("failed to export response to {}: {source}", path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl OpenseaError {
    pub(crate) fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// Map a non-success HTTP status and its body to an error
    pub fn from_status(status: StatusCode, endpoint: &str, message: String) -> Self {
        match status {
            StatusCode::BAD_REQUEST => Self::InvalidRequest { message },
            StatusCode::UNAUTHORIZED => Self::Unauthorized,
            StatusCode::FORBIDDEN => Self::Blocked,
            StatusCode::NOT_FOUND => Self::NotFound {
                endpoint: endpoint.to_string(),
            },
            StatusCode::TOO_MANY_REQUESTS => Self::RateLimited,
            StatusCode::GATEWAY_TIMEOUT => Self::GatewayTimeout,
            status => Self::Api {
                status: status.as_u16(),
                message,
            },
        }
    }

    /// Whether the failure is a network-level hiccup worth retrying
    ///
    /// Covers connection and TLS handshake failures, dropped bodies, client
    /// timeouts, and the 403/504 responses the API emits under load.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(error) => {
                error.is_connect() || error.is_timeout() || error.is_request() || error.is_body()
            }
            Self::Timeout { .. } | Self::Blocked | Self::GatewayTimeout => true,
            _ => false,
        }
    }

    /// HTTP status associated with this error, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::InvalidRequest { .. } => Some(400),
            Self::Unauthorized => Some(401),
            Self::Blocked => Some(403),
            Self::NotFound { .. } => Some(404),
            Self::RateLimited => Some(429),
            Self::GatewayTimeout => Some(504),
            Self::Api { status, .. } => Some(*status),
            Self::Http(error) => error.status().map(|status| status.as_u16()),
            _ => None,
        }
    }
}

//! Client-side error taxonomy.
//!
//! Every failed API call ends up as one [`ApiError`] variant, and each page
//! flow matches on it exhaustively:
//! - `Validation`: 422, bound to a form field when the server names one
//! - `Auth`: 401, the session is gone
//! - `Domain`: any other non-2xx (409 conflict, 400 business rule, 5xx ...)
//! - `Network`: no response at all

use crate::request::{HttpResponse, TransportError};
use serde::Deserialize;
use serde::de::IgnoredAny;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

pub const STATUS_UNAUTHORIZED: u16 = 401;
pub const STATUS_CONFLICT: u16 = 409;
pub const STATUS_UNPROCESSABLE: u16 = 422;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("{message}")]
    Validation {
        field: Option<String>,
        message: String,
    },
    #[error("{message}")]
    Auth { message: String },
    #[error("{message}")]
    Domain { status: u16, message: String },
    #[error("{message}")]
    Network { message: String },
}

impl ApiError {
    /// Classifies a non-2xx response. `default_message` is used whenever the
    /// body carries no usable text.
    pub fn from_response(resp: &HttpResponse, default_message: &str) -> Self {
        let body = ErrorBody::parse(&resp.body);

        match resp.status {
            STATUS_UNPROCESSABLE => {
                let (field, message) = match body.detail {
                    Some(Detail::Field { field, message }) => (field, message),
                    Some(Detail::Text(text)) => (None, Some(text)),
                    _ => (None, None),
                };
                ApiError::Validation {
                    field: field.filter(|f| !f.is_empty()),
                    message: non_empty(message).unwrap_or_else(|| default_message.to_string()),
                }
            }
            STATUS_UNAUTHORIZED => ApiError::Auth {
                message: body.text().unwrap_or_else(|| default_message.to_string()),
            },
            status => ApiError::Domain {
                status,
                message: body.text().unwrap_or_else(|| default_message.to_string()),
            },
        }
    }

    /// The fixed generic message replaces whatever the transport layer reported;
    /// the raw error only goes to the log.
    pub fn network(err: &TransportError, default_message: &str) -> Self {
        tracing::warn!(error = %err, "request did not reach the server");
        ApiError::Network {
            message: default_message.to_string(),
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Validation { .. } => Some(STATUS_UNPROCESSABLE),
            ApiError::Auth { .. } => Some(STATUS_UNAUTHORIZED),
            ApiError::Domain { status, .. } => Some(*status),
            ApiError::Network { .. } => None,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::Validation { message, .. }
            | ApiError::Auth { message }
            | ApiError::Domain { message, .. }
            | ApiError::Network { message } => message,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Validation { .. } => "validation",
            ApiError::Auth { .. } => "auth",
            ApiError::Domain { .. } => "domain",
            ApiError::Network { .. } => "network",
        }
    }
}

// =========================================================
// Error body shapes
// =========================================================

/// `{detail: "..."}`, `{detail: {field, message}}` or `{message: "..."}`.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<Detail>,
    #[serde(default)]
    message: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Detail {
    Text(String),
    Field {
        #[serde(default)]
        field: Option<String>,
        #[serde(default)]
        message: Option<String>,
    },
    Other(IgnoredAny),
}

impl ErrorBody {
    fn parse(raw: &str) -> Self {
        serde_json::from_str(raw).unwrap_or_default()
    }

    /// Server text, `detail` first.
    fn text(self) -> Option<String> {
        let detail = match self.detail {
            Some(Detail::Text(text)) => Some(text),
            Some(Detail::Field { message, .. }) => message,
            _ => None,
        };
        let message = match self.message {
            Some(serde_json::Value::String(text)) => Some(text),
            _ => None,
        };
        non_empty(detail).or_else(|| non_empty(message))
    }
}

fn non_empty(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.trim().is_empty())
}

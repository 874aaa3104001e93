//! Application error type and its HTTP representation.
//!
//! Every fallible operation in the service and repository layers returns
//! [`AppError`]. Handlers propagate it with `?` and axum renders it through
//! the [`IntoResponse`] implementation below.
//!
//! # Response Body
//!
//! ```json
//! { "message": "Short URL not found" }
//! ```
//!
//! Validation failures additionally carry field-level messages:
//!
//! ```json
//! { "message": "Validation failed", "errors": { "url": ["URL is required"] } }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Map, Value, json};
use validator::ValidationErrors;

/// Message returned for every lookup that misses, regardless of whether the
/// code was deleted or never existed.
pub const NOT_FOUND_MESSAGE: &str = "Short URL not found";

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Value>,
}

/// Error taxonomy shared by all layers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    #[error("{message}")]
    Conflict { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// The standard not-found error for a short code.
    pub fn short_url_not_found(short_code: &str) -> Self {
        Self::not_found(NOT_FOUND_MESSAGE, json!({ "short_code": short_code }))
    }

    /// HTTP status this error is rendered with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match self {
            AppError::Validation { message, details } => ErrorBody {
                message,
                errors: (!is_empty_details(&details)).then_some(details),
            },
            AppError::NotFound { message, .. } => ErrorBody {
                message,
                errors: None,
            },
            AppError::Conflict { message, details } => ErrorBody {
                message,
                errors: (!is_empty_details(&details)).then_some(details),
            },
            AppError::Internal { message, details } => {
                // Internal details stay in the logs.
                tracing::error!(%message, %details, "Request failed with internal error");
                ErrorBody {
                    message: "Internal server error".to_string(),
                    errors: None,
                }
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Every database failure is internal. The one expected constraint
/// violation, a taken short code, is classified by the repository before
/// this conversion applies.
impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::internal("Database error", json!({ "reason": e.to_string() }))
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields = Map::new();

        for (field, field_errors) in errors.field_errors() {
            let messages: Vec<Value> = field_errors
                .iter()
                .map(|err| {
                    err.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value ({})", err.code))
                        .into()
                })
                .collect();
            fields.insert(wire_field_name(&field), Value::Array(messages));
        }

        AppError::bad_request("Validation failed", Value::Object(fields))
    }
}

/// Converts a Rust field name to the camelCase name clients send.
fn wire_field_name(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;

    for c in field.chars() {
        if c == '_' {
            upper_next = !out.is_empty();
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }

    out
}

fn is_empty_details(details: &Value) -> bool {
    match details {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

//! DTOs for the `/shorten` endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use validator::Validate;

use crate::domain::entities::UrlMapping;
use crate::error::AppError;
use crate::utils::url_validator::validate_destination_url;

/// Request body for `POST /shorten`.
///
/// `url` is optional at the serde level so a missing field surfaces as a
/// validation error (400) rather than a deserialization failure.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUrlRequest {
    #[validate(
        required(message = "URL is required"),
        custom(function = "validate_destination_url")
    )]
    pub url: Option<String>,
}

impl CreateUrlRequest {
    /// Consumes a validated request, yielding the destination URL.
    pub fn into_url(self) -> Result<String, AppError> {
        self.url.ok_or_else(|| {
            AppError::bad_request("Validation failed", json!({ "url": ["URL is required"] }))
        })
    }
}

/// Request body for `PUT /shorten/{shortCode}`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUrlRequest {
    #[validate(
        required(message = "New URL is required"),
        custom(function = "validate_destination_url")
    )]
    pub new_url: Option<String>,
}

impl UpdateUrlRequest {
    /// Consumes a validated request, yielding the new destination URL.
    pub fn into_new_url(self) -> Result<String, AppError> {
        self.new_url.ok_or_else(|| {
            AppError::bad_request(
                "Validation failed",
                json!({ "newUrl": ["New URL is required"] }),
            )
        })
    }
}

/// Mapping shape returned by create, lookup, and update.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UrlResponse {
    pub id: i64,
    pub url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UrlMapping> for UrlResponse {
    fn from(m: UrlMapping) -> Self {
        Self {
            id: m.id,
            url: m.url,
            short_code: m.short_code,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Mapping shape plus access count, returned by the stats endpoints.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UrlStatsResponse {
    #[serde(flatten)]
    pub mapping: UrlResponse,
    pub access_count: i64,
}

impl From<UrlMapping> for UrlStatsResponse {
    fn from(m: UrlMapping) -> Self {
        let access_count = m.access_count;
        Self {
            mapping: m.into(),
            access_count,
        }
    }
}

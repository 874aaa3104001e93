//! Handlers for the `/shorten` endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
};
use serde_json::json;

use crate::api::dto::shorten::{CreateUrlRequest, UpdateUrlRequest, UrlResponse, UrlStatsResponse};
use crate::api::extract::ValidatedJson;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com" }
/// ```
///
/// # Response
///
/// `201 Created` with a `Location: /shorten/{shortCode}` header:
///
/// ```json
/// {
///   "id": 1,
///   "url": "https://example.com",
///   "shortCode": "aB3xY9",
///   "createdAt": "2025-01-01T10:00:00Z",
///   "updatedAt": "2025-01-01T10:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if `url` is missing or not a valid URL.
/// Returns 500 on store errors.
pub async fn shorten_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CreateUrlRequest>,
) -> Result<(StatusCode, HeaderMap, Json<UrlResponse>), AppError> {
    let mapping = state.shorten_service.shorten(payload.into_url()?).await?;

    let mut headers = HeaderMap::new();
    let location = format!("/shorten/{}", mapping.short_code);
    let location = HeaderValue::from_str(&location).map_err(|e| {
        AppError::internal("Invalid Location header", json!({ "reason": e.to_string() }))
    })?;
    headers.insert(header::LOCATION, location);

    Ok((StatusCode::CREATED, headers, Json(mapping.into())))
}

/// Lists every short URL with its access count.
///
/// # Endpoint
///
/// `GET /shorten`
pub async fn list_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<UrlStatsResponse>>, AppError> {
    let mappings = state.shorten_service.list_all().await?;

    Ok(Json(mappings.into_iter().map(Into::into).collect()))
}

/// Resolves a short code and counts the access.
///
/// # Endpoint
///
/// `GET /shorten/{shortCode}`
///
/// # Errors
///
/// Returns 400 Bad Request if the code is blank.
/// Returns 404 Not Found if the code is unknown.
pub async fn get_url_handler(
    State(state): State<AppState>,
    Path(short_code): Path<String>,
) -> Result<Json<UrlResponse>, AppError> {
    let short_code = require_short_code(&short_code)?;

    let mapping = state
        .shorten_service
        .get_by_short_code(short_code)
        .await?
        .ok_or_else(|| AppError::short_url_not_found(short_code))?;

    Ok(Json(mapping.into()))
}

/// Replaces the destination URL of a short code.
///
/// # Endpoint
///
/// `PUT /shorten/{shortCode}`
///
/// # Request Body
///
/// ```json
/// { "newUrl": "https://example.org" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the code is blank or `newUrl` is invalid.
/// Returns 404 Not Found if the code is unknown.
pub async fn update_url_handler(
    State(state): State<AppState>,
    Path(short_code): Path<String>,
    ValidatedJson(payload): ValidatedJson<UpdateUrlRequest>,
) -> Result<Json<UrlResponse>, AppError> {
    let short_code = require_short_code(&short_code)?;

    let mapping = state
        .shorten_service
        .update(short_code, payload.into_new_url()?)
        .await?
        .ok_or_else(|| AppError::short_url_not_found(short_code))?;

    Ok(Json(mapping.into()))
}

/// Deletes a short code.
///
/// # Endpoint
///
/// `DELETE /shorten/{shortCode}`
///
/// # Errors
///
/// Returns 400 Bad Request if the code is blank.
/// Returns 404 Not Found if the code is unknown.
pub async fn delete_url_handler(
    State(state): State<AppState>,
    Path(short_code): Path<String>,
) -> Result<StatusCode, AppError> {
    let short_code = require_short_code(&short_code)?;

    if !state.shorten_service.delete(short_code).await? {
        return Err(AppError::short_url_not_found(short_code));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// Returns a short code's mapping and access count without counting an access.
///
/// # Endpoint
///
/// `GET /shorten/{shortCode}/stats`
///
/// # Errors
///
/// Returns 400 Bad Request if the code is blank.
/// Returns 404 Not Found if the code is unknown.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(short_code): Path<String>,
) -> Result<Json<UrlStatsResponse>, AppError> {
    let short_code = require_short_code(&short_code)?;

    let mapping = state
        .shorten_service
        .get_stats(short_code)
        .await?
        .ok_or_else(|| AppError::short_url_not_found(short_code))?;

    Ok(Json(mapping.into()))
}

/// Rejects empty or whitespace-only short codes.
///
/// Any other code is returned untouched; lookups match it exactly.
fn require_short_code(short_code: &str) -> Result<&str, AppError> {
    if short_code.trim().is_empty() {
        return Err(AppError::bad_request(
            "Short code is required",
            json!({ "shortCode": ["Short code is required"] }),
        ));
    }
    Ok(short_code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_short_code_rejects_blank() {
        assert!(require_short_code("").is_err());
        assert!(require_short_code("   ").is_err());
    }

    #[test]
    fn test_require_short_code_keeps_padding() {
        assert_eq!(require_short_code(" abc123 ").unwrap(), " abc123 ");
        assert_eq!(require_short_code("abc123\t").unwrap(), "abc123\t");
    }
}

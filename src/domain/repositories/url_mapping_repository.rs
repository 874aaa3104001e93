//! Repository trait for URL mapping data access.

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Repository interface for URL mappings.
///
/// All lookups go through the unique short-code index. Mutating operations
/// are single atomic statements, so concurrent callers never lose updates.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteUrlMappingRepository`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_url_mapping.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlMappingRepository: Send + Sync {
    /// Inserts a new mapping.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short code is already taken.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_mapping: NewUrlMapping) -> Result<UrlMapping, AppError>;

    /// Returns true if a mapping with this short code exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn exists(&self, short_code: &str) -> Result<bool, AppError>;

    /// Finds a mapping by its short code without side effects.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_code(&self, short_code: &str) -> Result<Option<UrlMapping>, AppError>;

    /// Atomically increments the access count and returns the updated mapping.
    ///
    /// Returns `Ok(None)` if no mapping has this short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn increment_access_count(
        &self,
        short_code: &str,
    ) -> Result<Option<UrlMapping>, AppError>;

    /// Replaces the destination URL and sets `updated_at`.
    ///
    /// Returns `Ok(None)` if no mapping has this short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn update_url(
        &self,
        short_code: &str,
        url: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<UrlMapping>, AppError>;

    /// Removes a mapping.
    ///
    /// Returns `Ok(true)` if a row was deleted, `Ok(false)` if not found.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, short_code: &str) -> Result<bool, AppError>;

    /// Lists every mapping ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self) -> Result<Vec<UrlMapping>, AppError>;

    /// Counts all mappings.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self) -> Result<i64, AppError>;
}

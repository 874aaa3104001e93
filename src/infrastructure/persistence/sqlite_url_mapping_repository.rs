//! SQLite implementation of the URL mapping repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::domain::repositories::UrlMappingRepository;
use crate::error::AppError;
use crate::utils::db_error::is_unique_violation_on_short_code;

const MAPPING_COLUMNS: &str = "id, url, short_code, created_at, updated_at, access_count";

/// Raw `url_maps` row.
#[derive(Debug, FromRow)]
struct UrlMapRow {
    id: i64,
    url: String,
    short_code: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    access_count: i64,
}

impl From<UrlMapRow> for UrlMapping {
    fn from(r: UrlMapRow) -> Self {
        UrlMapping::new(
            r.id,
            r.url,
            r.short_code,
            r.created_at,
            r.updated_at,
            r.access_count,
        )
    }
}

/// SQLite repository for URL mappings.
///
/// Queries bind every parameter; read-modify-write operations use
/// `UPDATE ... RETURNING` so each one is a single atomic statement.
pub struct SqliteUrlMappingRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteUrlMappingRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlMappingRepository for SqliteUrlMappingRepository {
    async fn create(&self, new_mapping: NewUrlMapping) -> Result<UrlMapping, AppError> {
        let sql = format!(
            "INSERT INTO url_maps (url, short_code, created_at, updated_at, access_count) \
             VALUES (?1, ?2, ?3, ?3, 0) \
             RETURNING {MAPPING_COLUMNS}"
        );

        let row = sqlx::query_as::<_, UrlMapRow>(&sql)
            .bind(&new_mapping.url)
            .bind(&new_mapping.short_code)
            .bind(new_mapping.created_at)
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(|e| {
                if is_unique_violation_on_short_code(&e) {
                    AppError::conflict(
                        "Short code already exists",
                        json!({ "short_code": new_mapping.short_code }),
                    )
                } else {
                    AppError::from(e)
                }
            })?;

        Ok(row.into())
    }

    async fn exists(&self, short_code: &str) -> Result<bool, AppError> {
        let found: i64 =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM url_maps WHERE short_code = ?1)")
                .bind(short_code)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(found != 0)
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<UrlMapping>, AppError> {
        let sql = format!("SELECT {MAPPING_COLUMNS} FROM url_maps WHERE short_code = ?1");

        let row = sqlx::query_as::<_, UrlMapRow>(&sql)
            .bind(short_code)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(UrlMapping::from))
    }

    async fn increment_access_count(
        &self,
        short_code: &str,
    ) -> Result<Option<UrlMapping>, AppError> {
        let sql = format!(
            "UPDATE url_maps SET access_count = access_count + 1 \
             WHERE short_code = ?1 \
             RETURNING {MAPPING_COLUMNS}"
        );

        let row = sqlx::query_as::<_, UrlMapRow>(&sql)
            .bind(short_code)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(UrlMapping::from))
    }

    async fn update_url(
        &self,
        short_code: &str,
        url: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<UrlMapping>, AppError> {
        let sql = format!(
            "UPDATE url_maps SET url = ?1, updated_at = ?2 \
             WHERE short_code = ?3 \
             RETURNING {MAPPING_COLUMNS}"
        );

        let row = sqlx::query_as::<_, UrlMapRow>(&sql)
            .bind(url)
            .bind(updated_at)
            .bind(short_code)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(UrlMapping::from))
    }

    async fn delete(&self, short_code: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM url_maps WHERE short_code = ?1")
            .bind(short_code)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list(&self) -> Result<Vec<UrlMapping>, AppError> {
        let sql = format!("SELECT {MAPPING_COLUMNS} FROM url_maps ORDER BY id");

        let rows = sqlx::query_as::<_, UrlMapRow>(&sql)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(UrlMapping::from).collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM url_maps")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}

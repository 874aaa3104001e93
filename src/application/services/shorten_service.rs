//! URL mapping lifecycle service.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::domain::repositories::UrlMappingRepository;
use crate::error::AppError;
use crate::utils::code_generator::CodeGenerator;

/// Maximum number of codes drawn for a single shorten request.
///
/// Each attempt covers both the existence check and the insert, so a code
/// lost to a concurrent insert also consumes an attempt.
pub const MAX_CODE_ATTEMPTS: usize = 10;

/// Service for creating, resolving, and managing URL mappings.
///
/// Lookups by short code count as accesses; stats queries do not.
pub struct ShortenService<R: UrlMappingRepository, G: CodeGenerator> {
    repository: Arc<R>,
    generator: Arc<G>,
}

impl<R: UrlMappingRepository, G: CodeGenerator> ShortenService<R, G> {
    /// Creates a new shorten service.
    pub fn new(repository: Arc<R>, generator: Arc<G>) -> Self {
        Self {
            repository,
            generator,
        }
    }

    /// Creates a mapping for `url` under a freshly generated short code.
    ///
    /// # Code Generation
    ///
    /// - Draws a code and skips it if already stored
    /// - Inserts; a unique-constraint violation (concurrent insert of the
    ///   same code) is treated like a taken code
    /// - Gives up after [`MAX_CODE_ATTEMPTS`] draws
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if no unused code was found within the
    /// attempt budget, or on database errors.
    pub async fn shorten(&self, url: String) -> Result<UrlMapping, AppError> {
        for attempt in 1..=MAX_CODE_ATTEMPTS {
            let short_code = self.generator.generate();

            if self.repository.exists(&short_code).await? {
                debug!(%short_code, attempt, "Short code already taken, regenerating");
                continue;
            }

            let new_mapping = NewUrlMapping {
                url: url.clone(),
                short_code,
                created_at: Utc::now(),
            };

            match self.repository.create(new_mapping).await {
                Ok(mapping) => {
                    info!(short_code = %mapping.short_code, id = mapping.id, "Created short URL");
                    return Ok(mapping);
                }
                Err(AppError::Conflict { details, .. }) => {
                    warn!(%details, attempt, "Short code taken by concurrent insert, regenerating");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::internal(
            "Failed to generate unique short code",
            json!({ "attempts": MAX_CODE_ATTEMPTS }),
        ))
    }

    /// Resolves a short code, counting the access.
    ///
    /// Returns `Ok(None)` if the code is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_by_short_code(&self, short_code: &str) -> Result<Option<UrlMapping>, AppError> {
        let mapping = self.repository.increment_access_count(short_code).await?;

        if let Some(ref m) = mapping {
            debug!(short_code, access_count = m.access_count, "Resolved short URL");
        }

        Ok(mapping)
    }

    /// Replaces the destination of an existing mapping.
    ///
    /// The short code, creation time, and access count are left unchanged.
    /// Returns `Ok(None)` if the code is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn update(
        &self,
        short_code: &str,
        new_url: String,
    ) -> Result<Option<UrlMapping>, AppError> {
        let mapping = self
            .repository
            .update_url(short_code, &new_url, Utc::now())
            .await?;

        if mapping.is_some() {
            info!(short_code, "Updated short URL destination");
        }

        Ok(mapping)
    }

    /// Deletes a mapping.
    ///
    /// Returns `Ok(false)` if the code is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn delete(&self, short_code: &str) -> Result<bool, AppError> {
        let deleted = self.repository.delete(short_code).await?;

        if deleted {
            info!(short_code, "Deleted short URL");
        }

        Ok(deleted)
    }

    /// Returns a mapping with its access count, without counting an access.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_stats(&self, short_code: &str) -> Result<Option<UrlMapping>, AppError> {
        self.repository.find_by_code(short_code).await
    }

    /// Returns all mappings ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_all(&self) -> Result<Vec<UrlMapping>, AppError> {
        self.repository.list().await
    }

    /// Counts stored mappings.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn count(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUrlMappingRepository;
    use crate::utils::code_generator::MockCodeGenerator;
    use chrono::{Duration, Utc};

    fn create_test_mapping(id: i64, code: &str, url: &str, access_count: i64) -> UrlMapping {
        let now = Utc::now();
        UrlMapping::new(id, url.to_string(), code.to_string(), now, now, access_count)
    }

    fn generator_yielding(codes: Vec<&'static str>) -> MockCodeGenerator {
        let mut generator = MockCodeGenerator::new();
        let times = codes.len();
        let mut codes = codes.into_iter();
        generator
            .expect_generate()
            .times(times)
            .returning(move || codes.next().unwrap_or("zzzzzz").to_string());
        generator
    }

    #[tokio::test]
    async fn test_shorten_success() {
        let mut mock_repo = MockUrlMappingRepository::new();
        let generator = generator_yielding(vec!["abc123"]);

        mock_repo
            .expect_exists()
            .withf(|code| code == "abc123")
            .times(1)
            .returning(|_| Ok(false));

        mock_repo
            .expect_create()
            .withf(|new_mapping| {
                new_mapping.short_code == "abc123" && new_mapping.url == "https://example.com"
            })
            .times(1)
            .returning(|new_mapping| {
                Ok(UrlMapping::new(
                    1,
                    new_mapping.url,
                    new_mapping.short_code,
                    new_mapping.created_at,
                    new_mapping.created_at,
                    0,
                ))
            });

        let service = ShortenService::new(Arc::new(mock_repo), Arc::new(generator));

        let mapping = service
            .shorten("https://example.com".to_string())
            .await
            .unwrap();

        assert_eq!(mapping.short_code, "abc123");
        assert_eq!(mapping.access_count, 0);
        assert_eq!(mapping.created_at, mapping.updated_at);
    }

    #[tokio::test]
    async fn test_shorten_regenerates_taken_code() {
        let mut mock_repo = MockUrlMappingRepository::new();
        let generator = generator_yielding(vec!["taken1", "free22"]);

        mock_repo
            .expect_exists()
            .withf(|code| code == "taken1")
            .times(1)
            .returning(|_| Ok(true));
        mock_repo
            .expect_exists()
            .withf(|code| code == "free22")
            .times(1)
            .returning(|_| Ok(false));

        let created = create_test_mapping(2, "free22", "https://example.com", 0);
        mock_repo
            .expect_create()
            .withf(|new_mapping| new_mapping.short_code == "free22")
            .times(1)
            .returning(move |_| Ok(created.clone()));

        let service = ShortenService::new(Arc::new(mock_repo), Arc::new(generator));

        let mapping = service
            .shorten("https://example.com".to_string())
            .await
            .unwrap();

        assert_eq!(mapping.short_code, "free22");
    }

    #[tokio::test]
    async fn test_shorten_retries_on_insert_conflict() {
        let mut mock_repo = MockUrlMappingRepository::new();
        let generator = generator_yielding(vec!["raced1", "winner"]);

        mock_repo.expect_exists().times(2).returning(|_| Ok(false));

        mock_repo
            .expect_create()
            .withf(|new_mapping| new_mapping.short_code == "raced1")
            .times(1)
            .returning(|new_mapping| {
                Err(AppError::conflict(
                    "Short code already exists",
                    json!({ "short_code": new_mapping.short_code }),
                ))
            });

        let created = create_test_mapping(3, "winner", "https://example.com", 0);
        mock_repo
            .expect_create()
            .withf(|new_mapping| new_mapping.short_code == "winner")
            .times(1)
            .returning(move |_| Ok(created.clone()));

        let service = ShortenService::new(Arc::new(mock_repo), Arc::new(generator));

        let mapping = service
            .shorten("https://example.com".to_string())
            .await
            .unwrap();

        assert_eq!(mapping.short_code, "winner");
    }

    #[tokio::test]
    async fn test_shorten_gives_up_after_max_attempts() {
        let mut mock_repo = MockUrlMappingRepository::new();
        let mut generator = MockCodeGenerator::new();

        generator
            .expect_generate()
            .times(MAX_CODE_ATTEMPTS)
            .returning(|| "always".to_string());

        mock_repo
            .expect_exists()
            .times(MAX_CODE_ATTEMPTS)
            .returning(|_| Ok(true));
        mock_repo.expect_create().times(0);

        let service = ShortenService::new(Arc::new(mock_repo), Arc::new(generator));

        let result = service.shorten("https://example.com".to_string()).await;

        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_shorten_propagates_database_error() {
        let mut mock_repo = MockUrlMappingRepository::new();
        let generator = generator_yielding(vec!["abc123"]);

        mock_repo.expect_exists().times(1).returning(|_| Ok(false));
        mock_repo
            .expect_create()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let service = ShortenService::new(Arc::new(mock_repo), Arc::new(generator));

        let result = service.shorten("https://example.com".to_string()).await;

        assert!(matches!(result.unwrap_err(), AppError::Internal { .. }));
    }

    #[tokio::test]
    async fn test_get_by_short_code_counts_access() {
        let mut mock_repo = MockUrlMappingRepository::new();

        let mapping = create_test_mapping(1, "abc123", "https://example.com", 1);
        mock_repo
            .expect_increment_access_count()
            .withf(|code| code == "abc123")
            .times(1)
            .returning(move |_| Ok(Some(mapping.clone())));
        mock_repo.expect_find_by_code().times(0);

        let service = ShortenService::new(Arc::new(mock_repo), Arc::new(MockCodeGenerator::new()));

        let result = service.get_by_short_code("abc123").await.unwrap();

        assert_eq!(result.unwrap().access_count, 1);
    }

    #[tokio::test]
    async fn test_get_by_short_code_not_found() {
        let mut mock_repo = MockUrlMappingRepository::new();
        mock_repo
            .expect_increment_access_count()
            .times(1)
            .returning(|_| Ok(None));

        let service = ShortenService::new(Arc::new(mock_repo), Arc::new(MockCodeGenerator::new()));

        assert!(service.get_by_short_code("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_stats_does_not_count_access() {
        let mut mock_repo = MockUrlMappingRepository::new();

        let mapping = create_test_mapping(1, "abc123", "https://example.com", 7);
        mock_repo
            .expect_find_by_code()
            .withf(|code| code == "abc123")
            .times(1)
            .returning(move |_| Ok(Some(mapping.clone())));
        mock_repo.expect_increment_access_count().times(0);

        let service = ShortenService::new(Arc::new(mock_repo), Arc::new(MockCodeGenerator::new()));

        let stats = service.get_stats("abc123").await.unwrap().unwrap();

        assert_eq!(stats.access_count, 7);
    }

    #[tokio::test]
    async fn test_update_passes_new_url_and_fresh_timestamp() {
        let mut mock_repo = MockUrlMappingRepository::new();
        let before = Utc::now();

        mock_repo
            .expect_update_url()
            .withf(move |code, url, updated_at| {
                code == "abc123" && url == "https://example.org" && *updated_at >= before
            })
            .times(1)
            .returning(|code, url, updated_at| {
                Ok(Some(UrlMapping::new(
                    1,
                    url.to_string(),
                    code.to_string(),
                    updated_at - Duration::minutes(1),
                    updated_at,
                    4,
                )))
            });

        let service = ShortenService::new(Arc::new(mock_repo), Arc::new(MockCodeGenerator::new()));

        let updated = service
            .update("abc123", "https://example.org".to_string())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.url, "https://example.org");
        assert_eq!(updated.short_code, "abc123");
        assert_eq!(updated.access_count, 4);
        assert!(updated.was_updated());
    }

    #[tokio::test]
    async fn test_update_not_found() {
        let mut mock_repo = MockUrlMappingRepository::new();
        mock_repo
            .expect_update_url()
            .times(1)
            .returning(|_, _, _| Ok(None));

        let service = ShortenService::new(Arc::new(mock_repo), Arc::new(MockCodeGenerator::new()));

        let result = service
            .update("missing", "https://example.org".to_string())
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete() {
        let mut mock_repo = MockUrlMappingRepository::new();
        mock_repo
            .expect_delete()
            .withf(|code| code == "abc123")
            .times(1)
            .returning(|_| Ok(true));
        mock_repo
            .expect_delete()
            .withf(|code| code == "missing")
            .times(1)
            .returning(|_| Ok(false));

        let service = ShortenService::new(Arc::new(mock_repo), Arc::new(MockCodeGenerator::new()));

        assert!(service.delete("abc123").await.unwrap());
        assert!(!service.delete("missing").await.unwrap());
    }

    #[tokio::test]
    async fn test_list_all() {
        let mut mock_repo = MockUrlMappingRepository::new();
        let mappings = vec![
            create_test_mapping(1, "aaaaaa", "https://a.example", 0),
            create_test_mapping(2, "bbbbbb", "https://b.example", 3),
        ];
        mock_repo
            .expect_list()
            .times(1)
            .returning(move || Ok(mappings.clone()));

        let service = ShortenService::new(Arc::new(mock_repo), Arc::new(MockCodeGenerator::new()));

        let all = service.list_all().await.unwrap();

        assert_eq!(all.len(), 2);
        assert_eq!(all[1].access_count, 3);
    }
}

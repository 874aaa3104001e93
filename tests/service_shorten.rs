mod common;

use sqlx::SqlitePool;
use std::sync::Arc;
use shorten_api::application::services::ShortenService;
use shorten_api::infrastructure::persistence::SqliteUrlMappingRepository;
use shorten_api::utils::code_generator::{CodeGenerator, SeededCodeGenerator};

type SeededService = ShortenService<SqliteUrlMappingRepository, SeededCodeGenerator>;

fn seeded_service(pool: &SqlitePool, seed: u64) -> SeededService {
    ShortenService::new(
        Arc::new(SqliteUrlMappingRepository::new(Arc::new(pool.clone()))),
        Arc::new(SeededCodeGenerator::new(seed)),
    )
}

#[sqlx::test]
async fn test_taken_code_is_regenerated(pool: SqlitePool) {
    let first = seeded_service(&pool, 42)
        .shorten("https://a.example".to_string())
        .await
        .unwrap();

    // Same seed draws the same first code, which is now taken
    let second = seeded_service(&pool, 42)
        .shorten("https://b.example".to_string())
        .await
        .unwrap();

    assert_eq!(first.short_code, SeededCodeGenerator::new(42).generate());
    assert_ne!(first.short_code, second.short_code);
    assert_eq!(common::count_mappings(&pool).await, 2);
}

#[sqlx::test]
async fn test_shorten_then_resolve(pool: SqlitePool) {
    let service = seeded_service(&pool, 7);

    let created = service
        .shorten("https://example.com".to_string())
        .await
        .unwrap();
    let resolved = service
        .get_by_short_code(&created.short_code)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(resolved.id, created.id);
    assert_eq!(resolved.access_count, 1);
    assert_eq!(service.count().await.unwrap(), 1);
}

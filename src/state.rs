//! Shared application state injected into every handler.

use sqlx::SqlitePool;
use std::sync::Arc;

use crate::application::services::ShortenService;
use crate::infrastructure::persistence::SqliteUrlMappingRepository;
use crate::utils::code_generator::RandomCodeGenerator;

/// The service as wired for production.
pub type AppShortenService = ShortenService<SqliteUrlMappingRepository, RandomCodeGenerator>;

/// Application state shared across handlers.
///
/// Cloning is cheap; the service is reference counted.
#[derive(Clone)]
pub struct AppState {
    pub shorten_service: Arc<AppShortenService>,
}

impl AppState {
    /// Wires the repository, code generator, and service over `pool`.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        let repository = Arc::new(SqliteUrlMappingRepository::new(pool));
        let generator = Arc::new(RandomCodeGenerator::new());

        Self {
            shorten_service: Arc::new(ShortenService::new(repository, generator)),
        }
    }
}

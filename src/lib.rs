//! # Shorten API
//!
//! A small URL shortening service built with Axum and SQLite. It maps long
//! URLs to 6-character alphanumeric codes and counts how often each code is
//! resolved.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - The URL mapping entity and repository trait
//! - **Application Layer** ([`application`]) - Code generation retries and the mapping lifecycle
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite pool, migrations, and repository
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Quick Start
//!
//! ```bash
//! export DATABASE_URL="sqlite://shorten.db?mode=rwc"
//! cargo run
//!
//! curl -X POST localhost:3000/shorten -H 'content-type: application/json' \
//!      -d '{"url":"https://example.com"}'
//! ```
//!
//! Migrations in `./migrations` are applied at startup.
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod routes;
pub mod server;
pub mod state;
pub mod telemetry;
pub mod utils;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::ShortenService;
    pub use crate::domain::entities::{NewUrlMapping, UrlMapping};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}

//! Infrastructure layer for external integrations.
//!
//! Implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`database`] - Connection pool setup and migrations
//! - [`persistence`] - SQLite repository implementations

pub mod database;
pub mod persistence;

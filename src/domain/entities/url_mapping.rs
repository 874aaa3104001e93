//! URL mapping entity: the association between a short code and its destination.

use chrono::{DateTime, Utc};

/// A stored short-code-to-URL mapping with its access statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlMapping {
    pub id: i64,
    pub url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub access_count: i64,
}

impl UrlMapping {
    /// Creates a new UrlMapping instance.
    pub fn new(
        id: i64,
        url: String,
        short_code: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        access_count: i64,
    ) -> Self {
        Self {
            id,
            url,
            short_code,
            created_at,
            updated_at,
            access_count,
        }
    }

    /// Returns true if the destination has been changed since creation.
    pub fn was_updated(&self) -> bool {
        self.updated_at > self.created_at
    }
}

/// Input data for creating a new mapping.
///
/// Both timestamps of the stored row are set to `created_at`; the access
/// count starts at zero.
#[derive(Debug, Clone)]
pub struct NewUrlMapping {
    pub url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
}

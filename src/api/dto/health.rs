//! Response shape for `GET /health`.

use serde::Serialize;

/// Overall service health.
///
/// `status` is `healthy` when the store answers and `degraded` otherwise.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub checks: HealthChecks,
}

/// The store is the only dependency worth probing.
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub database: DatabaseCheck,
}

/// Result of querying the URL mapping store.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseCheck {
    pub status: &'static str,

    /// Number of stored short URLs, when the query succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_urls: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl DatabaseCheck {
    pub fn ok(short_urls: i64) -> Self {
        Self {
            status: "ok",
            short_urls: Some(short_urls),
            message: None,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            status: "error",
            short_urls: None,
            message: Some("Database unavailable".to_string()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

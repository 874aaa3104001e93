//! API route configuration.

use crate::api::handlers::{
    delete_url_handler, get_url_handler, list_handler, shorten_handler, stats_handler,
    update_url_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Routes for the URL mapping lifecycle.
///
/// # Endpoints
///
/// - `POST   /shorten`                   - Create a short URL
/// - `GET    /shorten`                   - List all short URLs with access counts
/// - `GET    /shorten/{shortCode}`       - Resolve a short URL (counts an access)
/// - `PUT    /shorten/{shortCode}`       - Replace the destination URL
/// - `DELETE /shorten/{shortCode}`       - Delete a short URL
/// - `GET    /shorten/{shortCode}/stats` - Access statistics (does not count)
pub fn shorten_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler).get(list_handler))
        .route(
            "/shorten/{short_code}",
            get(get_url_handler)
                .put(update_url_handler)
                .delete(delete_url_handler),
        )
        .route("/shorten/{short_code}/stats", get(stats_handler))
}

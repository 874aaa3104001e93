//! HTTP request handlers for API endpoints.

pub mod health;
pub mod shorten;

pub use health::health_handler;
pub use shorten::{
    delete_url_handler, get_url_handler, list_handler, shorten_handler, stats_handler,
    update_url_handler,
};

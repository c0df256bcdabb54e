//! HTTP service for the page redesign assistant
//!
//! Thin axum wiring around the two libraries that do the real work:
//! [`pagescan`] analyzes fetched pages and scores design templates,
//! [`assistant`] runs the chat/code-suggestion pipeline. The service
//! exposes `/parse`, `/chat`, `/health` and serves the bundled static UI.

pub mod config;
pub mod constants;
pub mod error;
pub mod routes;
pub mod scrape;
pub mod state;

pub use config::ServerConfig;
pub use error::ApiError;
pub use routes::router;
pub use state::AppState;

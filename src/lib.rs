pub mod config;
pub mod db;
pub mod error;
pub mod observability;
pub mod routes;
pub mod seed;

pub use config::Config;
pub use routes::AppState;

/// Create the app router over a migrated pool
///
/// Used by `serve` and by integration tests that drive the router without a
/// listening socket.
pub fn create_app(db_pool: sqlx::SqlitePool) -> axum::Router {
    routes::router(AppState::sqlite(db_pool))
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

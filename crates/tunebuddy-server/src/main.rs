use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post, put},
};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use tunebuddy_api::auth::{self, AppState, AppStateInner};
use tunebuddy_api::middleware::require_auth;
use tunebuddy_api::{chat, events, matches, preferences, profile, uploads, wishlist};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tunebuddy=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let jwt_secret =
        std::env::var("TUNEBUDDY_JWT_SECRET").unwrap_or_else(|_| "dev-secret-change-me".into());
    let db_path = std::env::var("TUNEBUDDY_DB_PATH").unwrap_or_else(|_| "tunebuddy.db".into());
    let upload_dir = std::env::var("TUNEBUDDY_UPLOAD_DIR").unwrap_or_else(|_| "uploads".into());
    let host = std::env::var("TUNEBUDDY_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("TUNEBUDDY_PORT")
        .unwrap_or_else(|_| "4000".into())
        .parse()?;

    // Init database and seed the concert catalog on first run
    let db = tunebuddy_db::Database::open(&PathBuf::from(&db_path))?;
    tunebuddy_db::seed::run(&db)?;

    let state: AppState = Arc::new(AppStateInner {
        db,
        jwt_secret,
        upload_dir: PathBuf::from(&upload_dir),
    });

    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("TuneBuddy server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: AppState) -> Router {
    let upload_dir = state.upload_dir.clone();

    let public_routes = Router::new()
        .route("/api/health", get(health))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/events", get(events::list_events))
        .with_state(state.clone());

    let protected_routes = Router::new()
        .route("/api/me", get(profile::me))
        .route("/api/profile", put(profile::update_profile))
        .route("/api/profile", delete(profile::delete_profile))
        .route("/api/preferences", get(preferences::get_preferences))
        .route("/api/preferences", post(preferences::save_preferences))
        .route("/api/matches", get(matches::get_matches))
        .route("/api/events/recommended", get(events::recommended_events))
        .route("/api/artists/recommended", get(events::recommended_artists))
        .route("/api/wishlist", get(wishlist::list_wishlist))
        .route("/api/wishlist/{event_id}", post(wishlist::toggle_wishlist))
        .route("/api/wishlist/{event_id}", delete(wishlist::remove_wishlist))
        .route(
            "/api/wishlist/{event_id}/users",
            get(wishlist::also_favorited),
        )
        // Static segment wins over the {peer_id} capture below.
        .route("/api/chat/unread", get(chat::unread))
        .route("/api/chat/{peer_id}", get(chat::list_messages))
        .route("/api/chat/{peer_id}", post(chat::send_message))
        .route("/api/chat/{peer_id}", delete(chat::delete_conversation))
        .route("/api/chat/message/{message_id}", delete(chat::delete_message))
        .route(
            "/api/upload",
            post(uploads::upload_image)
                .layer(DefaultBodyLimit::max(uploads::MAX_UPLOAD_BYTES + 1024 * 1024)),
        )
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .nest_service("/uploads", ServeDir::new(upload_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok", "service": "tunebuddy-api" }))
}

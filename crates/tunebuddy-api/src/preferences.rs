use axum::{Extension, Json, extract::State, response::IntoResponse};

use tunebuddy_types::api::{Claims, PreferencesResponse, SavePreferencesRequest};
use tunebuddy_types::models::split_artist_entries;

use crate::auth::AppState;
use crate::blocking;
use crate::error::ApiResult;

pub async fn get_preferences(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> ApiResult<impl IntoResponse> {
    let db = state.clone();
    let id = claims.sub.to_string();
    let prefs = blocking(move || db.db.get_preferences(&id)).await?;

    // No saved row reads as empty collections, not an error
    let (genres, artists) = prefs.map(|p| (p.genres, p.artists)).unwrap_or_default();
    Ok(Json(PreferencesResponse { genres, artists }))
}

pub async fn save_preferences(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<SavePreferencesRequest>,
) -> ApiResult<impl IntoResponse> {
    let genres: Vec<String> = req.genres.iter().map(|g| g.to_string()).collect();
    let artists = split_artist_entries(&req.artists);

    let db = state.clone();
    let id = claims.sub.to_string();
    blocking(move || db.db.save_preferences(&id, &genres, &artists)).await?;

    Ok(Json(serde_json::json!({ "success": true })))
}

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::{Value, json};
use uuid::Uuid;

use tunebuddy_types::api::{Claims, EventResponse, FavoritedBy, ToggleWishlistRequest, WishlistStatus};

use crate::auth::AppState;
use crate::error::{ApiError, ApiResult};
use crate::{blocking, events, parse_db_id};

pub async fn list_wishlist(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> ApiResult<Json<Vec<EventResponse>>> {
    let id = claims.sub.to_string();
    let rows = blocking(move || state.db.wishlist_events(&id)).await?;
    Ok(Json(rows.into_iter().map(events::to_response).collect()))
}

pub async fn toggle_wishlist(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(event_id): Path<Uuid>,
    Json(body): Json<ToggleWishlistRequest>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let user_id = claims.sub.to_string();
    let event = event_id.to_string();
    let status = body.status.unwrap_or(WishlistStatus::Interested);

    blocking(move || {
        if !state.db.event_exists(&event)? {
            return Err(ApiError::NotFound.into());
        }
        state.db.toggle_wishlist(&user_id, &event, status.as_str())?;
        Ok(())
    })
    .await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "success": true, "status": status.as_str() })),
    ))
}

/// Removal is idempotent: missing entries still report success.
pub async fn remove_wishlist(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(event_id): Path<Uuid>,
) -> ApiResult<Json<Value>> {
    let user_id = claims.sub.to_string();
    let event = event_id.to_string();
    blocking(move || state.db.remove_wishlist(&user_id, &event)).await?;
    Ok(Json(json!({ "success": true })))
}

pub async fn also_favorited(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(event_id): Path<Uuid>,
) -> ApiResult<Json<Vec<FavoritedBy>>> {
    let requester = claims.sub.to_string();
    let event = event_id.to_string();

    let rows = blocking(move || {
        if !state.db.event_exists(&event)? {
            return Err(ApiError::NotFound.into());
        }
        state.db.users_who_favorited(&event, &requester)
    })
    .await?;

    let users = rows
        .into_iter()
        .map(|row| FavoritedBy {
            id: parse_db_id(&row.id, "user"),
            name: row.name,
            profile_image: row.profile_image,
            location: row.location,
        })
        .collect();
    Ok(Json(users))
}

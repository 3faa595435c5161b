use axum::{Extension, Json, extract::State, response::IntoResponse};

use tunebuddy_db::models::UserRow;
use tunebuddy_types::api::{Claims, UpdateProfileRequest, UserPublic};

use crate::auth::AppState;
use crate::error::{ApiError, ApiResult};
use crate::{blocking, parse_db_id, parse_db_time};

pub(crate) fn to_public(row: UserRow) -> UserPublic {
    let created_at = parse_db_time(&row.created_at, "user");
    UserPublic {
        id: parse_db_id(&row.id, "user"),
        email: row.email,
        first_name: row.first_name,
        last_name: row.last_name,
        bio: row.bio,
        age: row.age,
        gender: row.gender,
        profile_image: row.profile_image,
        location: row.location,
        created_at,
    }
}

pub async fn me(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> ApiResult<impl IntoResponse> {
    let db = state.clone();
    let id = claims.sub.to_string();
    let user = blocking(move || db.db.get_user_by_id(&id))
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(to_public(user)))
}

pub async fn update_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<impl IntoResponse> {
    let db = state.clone();
    let id = claims.sub.to_string();
    let user = blocking(move || {
        db.db.update_user_profile(&id, &req)?;
        db.db.get_user_by_id(&id)
    })
    .await?
    .ok_or(ApiError::NotFound)?;

    Ok(Json(to_public(user)))
}

/// Soft delete: the row stays, every subsequent read skips it.
pub async fn delete_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> ApiResult<impl IntoResponse> {
    let db = state.clone();
    let id = claims.sub.to_string();
    blocking(move || db.db.soft_delete_user(&id)).await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "message": "Profile deleted"
    })))
}

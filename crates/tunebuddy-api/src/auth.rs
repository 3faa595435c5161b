use std::path::PathBuf;
use std::sync::Arc;

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use tunebuddy_db::Database;
use tunebuddy_db::models::NewUser;
use tunebuddy_types::api::{AuthResponse, Claims, LoginRequest, RegisterRequest};
use tunebuddy_types::models::split_artist_entries;

use crate::error::{ApiError, ApiResult};
use crate::{blocking, profile::to_public};

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub jwt_secret: String,
    pub upload_dir: PathBuf,
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<impl IntoResponse> {
    if req.email.trim().is_empty()
        || req.password.is_empty()
        || req.first_name.trim().is_empty()
        || req.last_name.trim().is_empty()
    {
        return Err(ApiError::Validation("Missing required fields".to_string()));
    }

    let taken = {
        let db = state.clone();
        let email = req.email.clone();
        blocking(move || db.db.email_exists(&email)).await?
    };
    if taken {
        return Err(ApiError::Validation("Email already registered".to_string()));
    }

    // Hash password with Argon2id
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(req.password.as_bytes(), &salt)
        .map_err(|_| ApiError::Internal)?
        .to_string();

    let user_id = Uuid::new_v4();

    let user = {
        let db = state.clone();
        let id = user_id.to_string();
        blocking(move || {
            // The pre-check above can lose a race; the constraint cannot.
            let inserted = db.db.create_user(&NewUser {
                id: &id,
                email: &req.email,
                password_hash: &password_hash,
                first_name: &req.first_name,
                last_name: &req.last_name,
                bio: req.bio.as_deref(),
                age: req.age,
                gender: req.gender.as_deref(),
                location: req.location.as_deref(),
            })?;
            if !inserted {
                return Err(
                    ApiError::Validation("Email already registered".to_string()).into(),
                );
            }

            // Initial taste, when the registration form carried one
            if req.genres.is_some() || req.artists.is_some() {
                let genres: Vec<String> = req
                    .genres
                    .unwrap_or_default()
                    .iter()
                    .map(|g| g.to_string())
                    .collect();
                let artists = split_artist_entries(&req.artists.unwrap_or_default());
                db.db.save_preferences(&id, &genres, &artists)?;
            }

            db.db.get_user_by_id(&id)
        })
        .await?
        .ok_or(ApiError::Internal)?
    };

    let token = create_token(&state.jwt_secret, user_id, &user.email)
        .map_err(|_| ApiError::Internal)?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: to_public(user),
        }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    if req.email.trim().is_empty() || req.password.is_empty() {
        return Err(ApiError::Validation(
            "Email and password required".to_string(),
        ));
    }

    let user = {
        let db = state.clone();
        let email = req.email.clone();
        blocking(move || db.db.get_user_by_email(&email)).await?
    }
    .ok_or(ApiError::Unauthorized)?;

    // Verify password
    let parsed_hash = PasswordHash::new(&user.password_hash).map_err(|_| ApiError::Internal)?;
    Argon2::default()
        .verify_password(req.password.as_bytes(), &parsed_hash)
        .map_err(|_| ApiError::Unauthorized)?;

    let user_id: Uuid = user.id.parse().map_err(|_| ApiError::Internal)?;
    let token = create_token(&state.jwt_secret, user_id, &user.email)
        .map_err(|_| ApiError::Internal)?;

    Ok(Json(AuthResponse {
        token,
        user: to_public(user),
    }))
}

fn create_token(secret: &str, user_id: Uuid, email: &str) -> anyhow::Result<String> {
    let claims = Claims {
        sub: user_id,
        email: email.to_string(),
        exp: (chrono::Utc::now() + chrono::Duration::days(7)).timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}

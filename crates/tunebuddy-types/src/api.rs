use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Genre;

// -- JWT Claims --

/// JWT claims shared between token minting (auth handlers) and the request
/// middleware. Canonical definition lives here in tunebuddy-types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub exp: usize,
}

// -- Auth --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub genres: Option<Vec<Genre>>,
    #[serde(default)]
    pub artists: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Public view of a user row. Never carries the password hash.
#[derive(Debug, Clone, Serialize)]
pub struct UserPublic {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub bio: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub profile_image: Option<String>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserPublic,
}

// -- Profile --

/// Partial update: absent fields are left untouched.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub profile_image: Option<String>,
    pub location: Option<String>,
}

// -- Preferences --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SavePreferencesRequest {
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub artists: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct PreferencesResponse {
    pub genres: Vec<String>,
    pub artists: Vec<String>,
}

// -- Matches --

#[derive(Debug, Serialize)]
pub struct MatchEntry {
    pub id: Uuid,
    pub name: String,
    pub location: Option<String>,
    pub profile_image: Option<String>,
    pub genres: Vec<String>,
    pub artists: Vec<String>,
    pub score: u32,
    pub shared_genres: Vec<String>,
    pub shared_artists: Vec<String>,
    pub same_city: bool,
    pub bio: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub last_message_at: Option<DateTime<Utc>>,
}

// -- Events --

#[derive(Debug, Clone, Serialize)]
pub struct EventResponse {
    pub id: Uuid,
    pub title: String,
    pub location: String,
    pub date: String,
    pub artists: String,
    pub genre: String,
    pub ticket_url: Option<String>,
    pub source: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecommendedEvent {
    #[serde(flatten)]
    pub event: EventResponse,
    pub recommended: bool,
}

// -- Wishlist --

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WishlistStatus {
    Interested,
    Going,
}

impl WishlistStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WishlistStatus::Interested => "interested",
            WishlistStatus::Going => "going",
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToggleWishlistRequest {
    #[serde(default)]
    pub status: Option<WishlistStatus>,
}

/// Another user who favorited the same event.
#[derive(Debug, Serialize)]
pub struct FavoritedBy {
    pub id: Uuid,
    pub name: String,
    pub profile_image: Option<String>,
    pub location: Option<String>,
}

// -- Chat --

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SendMessageRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Per-counterpart unread rollup: newest unread message as a preview plus
/// the count since the reader's last-read marker.
#[derive(Debug, Serialize)]
pub struct UnreadSummary {
    pub peer_id: Uuid,
    pub peer_name: String,
    pub peer_image: Option<String>,
    pub last_message: String,
    pub timestamp: DateTime<Utc>,
    pub unread_count: u32,
}

#[derive(Debug, Serialize)]
pub struct DeleteConversationResponse {
    pub deleted: usize,
}

// -- Uploads --

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub image_url: String,
}

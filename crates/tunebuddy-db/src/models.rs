//! Database row types that map directly to SQLite rows. Distinct from the
//! tunebuddy-types API models so the store layer stays independent.
//! Timestamps stay as SQLite text here and are parsed into `chrono` types
//! at the API edge.

/// Borrowed insert payload for a freshly registered user.
pub struct NewUser<'a> {
    pub id: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub bio: Option<&'a str>,
    pub age: Option<i64>,
    pub gender: Option<&'a str>,
    pub location: Option<&'a str>,
}

#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub bio: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub profile_image: Option<String>,
    pub location: Option<String>,
    pub created_at: String,
}

/// Genre/artist lists are JSON text in the `preferences` table; the query
/// layer decodes them so nothing above it sees the serialized form.
#[derive(Debug, Clone)]
pub struct PreferenceRow {
    pub user_id: String,
    pub genres: Vec<String>,
    pub artists: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct EventRow {
    pub id: String,
    pub title: String,
    pub location: String,
    pub date: String,
    pub artists: String,
    pub genre: String,
    pub ticket_url: Option<String>,
    pub source: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MessageRow {
    pub id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub body: String,
    pub created_at: String,
}

/// One unread rollup per counterpart who has messages past the reader's
/// last-read marker.
#[derive(Debug, Clone)]
pub struct UnreadRow {
    pub peer_id: String,
    pub peer_name: String,
    pub peer_image: Option<String>,
    pub last_message: String,
    pub last_at: String,
    pub unread_count: i64,
}

/// A non-deleted user other than the requester, joined with their
/// preferences and the timestamp of the most recent message exchanged with
/// the requester (if any). Input to the matching engine.
#[derive(Debug, Clone)]
pub struct CandidateRow {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub bio: Option<String>,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub profile_image: Option<String>,
    pub location: Option<String>,
    pub genres: Vec<String>,
    pub artists: Vec<String>,
    pub last_message_at: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FavoritedByRow {
    pub id: String,
    pub name: String,
    pub profile_image: Option<String>,
    pub location: Option<String>,
}

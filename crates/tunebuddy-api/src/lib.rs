pub mod auth;
pub mod chat;
pub mod error;
pub mod events;
pub mod matches;
pub mod matching;
pub mod middleware;
pub mod preferences;
pub mod profile;
pub mod recommend;
pub mod uploads;
pub mod wishlist;

use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::{error, warn};
use uuid::Uuid;

use crate::error::ApiError;

/// Runs blocking database work off the async runtime.
pub(crate) async fn blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| {
            error!("spawn_blocking join error: {}", e);
            ApiError::Internal
        })?
        .map_err(ApiError::from)
}

/// SQLite stores timestamps as "YYYY-MM-DD HH:MM:SS" without timezone.
/// Parse as naive UTC and convert, tolerating RFC 3339 text as well.
pub(crate) fn parse_db_time(raw: &str, ctx: &str) -> DateTime<Utc> {
    raw.parse::<DateTime<Utc>>()
        .or_else(|_| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|ndt| ndt.and_utc())
        })
        .unwrap_or_else(|e| {
            warn!("Corrupt timestamp '{}' on {}: {}", raw, ctx, e);
            DateTime::default()
        })
}

pub(crate) fn parse_db_id(raw: &str, ctx: &str) -> Uuid {
    raw.parse().unwrap_or_else(|e| {
        warn!("Corrupt id '{}' on {}: {}", raw, ctx, e);
        Uuid::default()
    })
}

pub mod chat;
pub mod events;
pub mod matches;
pub mod preferences;
pub mod users;
pub mod wishlist;

use tracing::warn;

/// Extension trait for optional query results
pub(crate) trait OptionalExt<T> {
    fn optional(self) -> anyhow::Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> anyhow::Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Decode a JSON string-list column. Corrupt rows are logged and read as
/// empty rather than failing the whole query.
pub(crate) fn decode_list(raw: &str, ctx: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_else(|e| {
        warn!("Corrupt {} list '{}': {}", ctx, raw, e);
        Vec::new()
    })
}

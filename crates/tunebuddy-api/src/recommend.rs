//! Genre-keyed event and artist recommendations.
//!
//! Policy: no saved preferences means no recommendations — the empty list,
//! not the whole catalog.

use tunebuddy_db::models::EventRow;

/// Case-insensitive substring match of any selected genre against the
/// event's possibly comma-joined genre string.
pub fn genre_matches(event_genre: &str, genres: &[String]) -> bool {
    let haystack = event_genre.to_lowercase();
    genres.iter().any(|g| haystack.contains(&g.to_lowercase()))
}

/// Partitions upcoming events (already date-ascending) into genre hits
/// followed by the rest, keeping date order within each partition.
pub fn rank_events(events: Vec<EventRow>, genres: &[String]) -> Vec<(EventRow, bool)> {
    let (hits, rest): (Vec<_>, Vec<_>) = events
        .into_iter()
        .partition(|event| genre_matches(&event.genre, genres));

    hits.into_iter()
        .map(|e| (e, true))
        .chain(rest.into_iter().map(|e| (e, false)))
        .collect()
}

/// Distinct artist names drawn from genre-matching events, comma-split and
/// trimmed, in first-seen order, capped at `limit`.
pub fn recommend_artists(events: &[EventRow], genres: &[String], limit: usize) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();

    for event in events {
        if !genre_matches(&event.genre, genres) {
            continue;
        }
        for artist in event.artists.split(',') {
            let artist = artist.trim();
            if artist.is_empty() || seen.iter().any(|s| s == artist) {
                continue;
            }
            seen.push(artist.to_string());
            if seen.len() == limit {
                return seen;
            }
        }
    }

    seen
}

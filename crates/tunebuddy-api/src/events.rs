use axum::{
    Extension, Json,
    extract::{Query, State},
};
use chrono::{Datelike, NaiveDate, Utc};
use serde::Deserialize;

use tunebuddy_db::models::EventRow;
use tunebuddy_types::api::{Claims, EventResponse, RecommendedEvent};

use crate::auth::AppState;
use crate::error::ApiResult;
use crate::recommend;
use crate::{blocking, parse_db_id};

const ARTIST_RECOMMENDATION_LIMIT: usize = 20;

#[derive(Debug, Default, Deserialize)]
pub struct EventsQuery {
    pub location: Option<String>,
    pub genre: Option<String>,
    /// Comma-separated ticket-source substrings.
    pub sources: Option<String>,
    pub day: Option<u32>,
    pub month: Option<u32>,
    pub year: Option<i32>,
}

pub(crate) fn to_response(row: EventRow) -> EventResponse {
    EventResponse {
        id: parse_db_id(&row.id, "event"),
        title: row.title,
        location: row.location,
        date: row.date,
        artists: row.artists,
        genre: row.genre,
        ticket_url: row.ticket_url,
        source: row.source,
    }
}

/// Public catalog listing. Location and source filtering happen in SQL;
/// genre and calendar filters are applied here.
pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
) -> ApiResult<Json<Vec<EventResponse>>> {
    let sources: Vec<String> = query
        .sources
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    let db = state.clone();
    let location = query.location.clone();
    let mut events =
        blocking(move || db.db.list_events(location.as_deref(), &sources)).await?;

    if let Some(genre) = &query.genre {
        let needle = genre.to_lowercase();
        events.retain(|e| e.genre.to_lowercase().contains(&needle));
    }

    if query.day.is_some() || query.month.is_some() || query.year.is_some() {
        events.retain(|e| matches_calendar(&e.date, query.day, query.month, query.year));
    }

    Ok(Json(events.into_iter().map(to_response).collect()))
}

/// Each calendar component filters independently; undated rows never match.
fn matches_calendar(date: &str, day: Option<u32>, month: Option<u32>, year: Option<i32>) -> bool {
    let Ok(parsed) = NaiveDate::parse_from_str(date, "%Y-%m-%d") else {
        return false;
    };
    if day.is_some_and(|d| parsed.day() != d) {
        return false;
    }
    if month.is_some_and(|m| parsed.month() != m) {
        return false;
    }
    if year.is_some_and(|y| parsed.year() != y) {
        return false;
    }
    true
}

pub async fn recommended_events(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> ApiResult<Json<Vec<RecommendedEvent>>> {
    let db = state.clone();
    let id = claims.sub.to_string();
    let today = Utc::now().date_naive().to_string();

    let (genres, events) = blocking(move || {
        let Some(prefs) = db.db.get_preferences(&id)? else {
            return Ok((Vec::new(), Vec::new()));
        };
        if prefs.genres.is_empty() {
            return Ok((Vec::new(), Vec::new()));
        }
        let events = db.db.upcoming_events(&today)?;
        Ok((prefs.genres, events))
    })
    .await?;

    if genres.is_empty() {
        return Ok(Json(Vec::new()));
    }

    let ranked = recommend::rank_events(events, &genres)
        .into_iter()
        .map(|(event, recommended)| RecommendedEvent {
            event: to_response(event),
            recommended,
        })
        .collect();
    Ok(Json(ranked))
}

pub async fn recommended_artists(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> ApiResult<Json<Vec<String>>> {
    let db = state.clone();
    let id = claims.sub.to_string();
    let today = Utc::now().date_naive().to_string();

    let (genres, events) = blocking(move || {
        let Some(prefs) = db.db.get_preferences(&id)? else {
            return Ok((Vec::new(), Vec::new()));
        };
        if prefs.genres.is_empty() {
            return Ok((Vec::new(), Vec::new()));
        }
        let events = db.db.upcoming_events(&today)?;
        Ok((prefs.genres, events))
    })
    .await?;

    Ok(Json(recommend::recommend_artists(
        &events,
        &genres,
        ARTIST_RECOMMENDATION_LIMIT,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calendar_components_filter_independently() {
        assert!(matches_calendar("2026-03-20", None, Some(3), None));
        assert!(matches_calendar("2026-03-20", Some(20), Some(3), Some(2026)));
        assert!(!matches_calendar("2026-03-20", Some(21), None, None));
        assert!(!matches_calendar("2026-03-20", None, None, Some(2027)));
    }

    #[test]
    fn unparseable_dates_never_match_a_calendar_filter() {
        assert!(!matches_calendar("soon", None, Some(3), None));
    }
}

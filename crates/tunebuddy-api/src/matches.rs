use axum::{Extension, Json, extract::State};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use tunebuddy_db::models::CandidateRow;
use tunebuddy_types::api::{Claims, MatchEntry};

use crate::auth::AppState;
use crate::error::ApiResult;
use crate::matching::{self, Rankable, TasteProfile, compatibility};
use crate::{blocking, parse_db_id, parse_db_time};

impl Rankable for MatchEntry {
    fn score(&self) -> u32 {
        self.score
    }
    fn user_id(&self) -> Uuid {
        self.id
    }
    fn last_message_at(&self) -> Option<DateTime<Utc>> {
        self.last_message_at
    }
}

pub async fn get_matches(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> ApiResult<Json<Vec<MatchEntry>>> {
    let db = state.clone();
    let id = claims.sub.to_string();

    let loaded = blocking(move || {
        // A requester that no longer resolves gets an empty list, not an error
        let Some(user) = db.db.get_user_by_id(&id)? else {
            return Ok(None);
        };
        let prefs = db.db.get_preferences(&id)?;
        let candidates = db.db.match_candidates(&id)?;
        Ok(Some((user, prefs, candidates)))
    })
    .await?;

    let Some((user, prefs, candidates)) = loaded else {
        return Ok(Json(Vec::new()));
    };

    let requester = TasteProfile {
        genres: prefs.as_ref().map(|p| p.genres.clone()).unwrap_or_default(),
        artists: prefs.as_ref().map(|p| p.artists.clone()).unwrap_or_default(),
        location: user.location,
    };

    let mut entries: Vec<MatchEntry> = candidates
        .into_iter()
        .map(|c| to_entry(&requester, c))
        .collect();
    matching::rank(&mut entries);

    Ok(Json(entries))
}

fn to_entry(requester: &TasteProfile, candidate: CandidateRow) -> MatchEntry {
    let taste = TasteProfile {
        genres: candidate.genres.clone(),
        artists: candidate.artists.clone(),
        location: candidate.location.clone(),
    };
    let result = compatibility(requester, &taste);

    MatchEntry {
        id: parse_db_id(&candidate.id, "candidate"),
        name: format!("{} {}", candidate.first_name, candidate.last_name),
        location: candidate.location,
        profile_image: candidate.profile_image,
        genres: candidate.genres,
        artists: candidate.artists,
        score: result.score,
        shared_genres: result.shared_genres,
        shared_artists: result.shared_artists,
        same_city: result.same_city,
        bio: candidate.bio,
        age: candidate.age,
        gender: candidate.gender,
        last_message_at: candidate
            .last_message_at
            .as_deref()
            .map(|ts| parse_db_time(ts, "candidate last message")),
    }
}

//! Pairwise compatibility scoring and match-list ordering.
//!
//! Scoring is a pure function of two taste profiles: a same-city bonus plus
//! per-shared-genre and per-shared-artist increments, clamped to 100. The
//! ordering applied afterwards is deliberately not score-first: anyone the
//! requester has exchanged messages with ranks above everyone they have
//! not, so active conversations stay visible at the top of the list.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Points for living in the same city (case-insensitive comparison).
const SAME_CITY_BONUS: u32 = 50;
/// Points per shared genre label.
const GENRE_POINTS: u32 = 8;
/// Points per shared artist name (exact string match).
const ARTIST_POINTS: u32 = 8;
/// Scores are clamped here.
const MAX_SCORE: u32 = 100;

/// The inputs scoring looks at. Symmetric: swapping the two profiles
/// yields the same score.
#[derive(Debug, Clone, Default)]
pub struct TasteProfile {
    pub genres: Vec<String>,
    pub artists: Vec<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Compatibility {
    pub score: u32,
    pub same_city: bool,
    pub shared_genres: Vec<String>,
    pub shared_artists: Vec<String>,
}

/// Scores two profiles. Genre overlap is label equality; artist overlap is
/// exact, case-sensitive string equality — "Dua Lipa " and "Dua Lipa" are
/// different artists here, intentionally.
pub fn compatibility(a: &TasteProfile, b: &TasteProfile) -> Compatibility {
    let mut score = 0;
    let mut same_city = false;

    if let (Some(loc_a), Some(loc_b)) = (&a.location, &b.location)
        && !loc_a.is_empty()
        && !loc_b.is_empty()
        && loc_a.to_lowercase() == loc_b.to_lowercase()
    {
        score += SAME_CITY_BONUS;
        same_city = true;
    }

    let shared_genres: Vec<String> = a
        .genres
        .iter()
        .filter(|g| b.genres.contains(g))
        .cloned()
        .collect();
    score += shared_genres.len() as u32 * GENRE_POINTS;

    let shared_artists: Vec<String> = a
        .artists
        .iter()
        .filter(|artist| b.artists.contains(artist))
        .cloned()
        .collect();
    score += shared_artists.len() as u32 * ARTIST_POINTS;

    Compatibility {
        score: score.min(MAX_SCORE),
        same_city,
        shared_genres,
        shared_artists,
    }
}

/// Sort key for one candidate in the match list.
pub trait Rankable {
    fn score(&self) -> u32;
    fn user_id(&self) -> Uuid;
    fn last_message_at(&self) -> Option<DateTime<Utc>>;
}

/// Orders the match list: candidates with message history first, most
/// recent conversation on top; the rest by score descending. Ties on score
/// break by user id ascending, which keeps the order deterministic (the
/// secondary key is otherwise unspecified).
pub fn rank<T: Rankable>(entries: &mut [T]) {
    entries.sort_by(|a, b| match (a.last_message_at(), b.last_message_at()) {
        (Some(at_a), Some(at_b)) => at_b.cmp(&at_a),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => b
            .score()
            .cmp(&a.score())
            .then_with(|| a.user_id().cmp(&b.user_id())),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn profile(genres: &[&str], artists: &[&str], location: Option<&str>) -> TasteProfile {
        TasteProfile {
            genres: genres.iter().map(|s| s.to_string()).collect(),
            artists: artists.iter().map(|s| s.to_string()).collect(),
            location: location.map(str::to_string),
        }
    }

    #[test]
    fn same_city_bonus_is_case_insensitive() {
        let a = profile(&[], &[], Some("Zagreb"));
        let b = profile(&[], &[], Some("zagreb"));
        let result = compatibility(&a, &b);
        assert!(result.same_city);
        assert_eq!(result.score, 50);
    }

    #[test]
    fn missing_or_empty_location_disqualifies_the_bonus() {
        let a = profile(&[], &[], Some("Zagreb"));
        assert!(!compatibility(&a, &profile(&[], &[], None)).same_city);
        assert!(!compatibility(&a, &profile(&[], &[], Some(""))).same_city);
    }

    #[test]
    fn eight_points_per_shared_genre_and_artist() {
        let a = profile(&["Rock", "Jazz", "Pop"], &["Sting", "Dua Lipa"], None);
        let b = profile(&["Jazz", "Rock"], &["Sting"], Some("Split"));
        let result = compatibility(&a, &b);
        // 2 genres + 1 artist, no city
        assert_eq!(result.score, 24);
        assert_eq!(result.shared_genres, vec!["Rock", "Jazz"]);
        assert_eq!(result.shared_artists, vec!["Sting"]);
    }

    #[test]
    fn score_is_clamped_at_100() {
        let many: Vec<&str> = vec![
            "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m",
        ];
        let a = profile(&[], &many, Some("Rijeka"));
        let b = profile(&[], &many, Some("Rijeka"));
        // 50 + 13 * 8 = 154 raw
        assert_eq!(compatibility(&a, &b).score, 100);
    }

    #[test]
    fn empty_preference_sets_score_zero() {
        let result = compatibility(&TasteProfile::default(), &TasteProfile::default());
        assert_eq!(result.score, 0);
        assert!(!result.same_city);
        assert!(result.shared_genres.is_empty());
        assert!(result.shared_artists.is_empty());
    }

    #[test]
    fn scoring_is_symmetric() {
        let a = profile(&["Rock", "Metal"], &["Tool"], Some("Osijek"));
        let b = profile(&["Metal"], &["Tool", "Opeth"], Some("osijek"));
        assert_eq!(compatibility(&a, &b).score, compatibility(&b, &a).score);
    }

    #[test]
    fn artist_matching_is_exact_and_case_sensitive() {
        let a = profile(&[], &["Dua Lipa"], None);
        let b = profile(&[], &["Dua Lipa "], None);
        let c = profile(&[], &["dua lipa"], None);
        assert_eq!(compatibility(&a, &b).score, 0);
        assert_eq!(compatibility(&a, &c).score, 0);
    }

    // -- Ranking --

    struct Entry {
        id: Uuid,
        score: u32,
        last_message_at: Option<DateTime<Utc>>,
    }

    impl Rankable for Entry {
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

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, hour, 0, 0).unwrap()
    }

    fn id(n: u8) -> Uuid {
        Uuid::from_u128(n as u128)
    }

    #[test]
    fn any_conversation_outranks_any_score() {
        let mut entries = vec![
            Entry { id: id(1), score: 95, last_message_at: None },
            Entry { id: id(2), score: 10, last_message_at: Some(at(9)) },
        ];
        rank(&mut entries);
        assert_eq!(entries[0].id, id(2));
        assert_eq!(entries[1].id, id(1));
    }

    #[test]
    fn messaged_candidates_sort_by_recency_not_score() {
        let mut entries = vec![
            Entry { id: id(1), score: 90, last_message_at: Some(at(8)) },
            Entry { id: id(2), score: 5, last_message_at: Some(at(12)) },
            Entry { id: id(3), score: 50, last_message_at: Some(at(10)) },
        ];
        rank(&mut entries);
        let order: Vec<Uuid> = entries.iter().map(|e| e.id).collect();
        assert_eq!(order, vec![id(2), id(3), id(1)]);
    }

    #[test]
    fn unmessaged_candidates_sort_by_score_then_id() {
        let mut entries = vec![
            Entry { id: id(3), score: 40, last_message_at: None },
            Entry { id: id(2), score: 40, last_message_at: None },
            Entry { id: id(1), score: 80, last_message_at: None },
        ];
        rank(&mut entries);
        let order: Vec<Uuid> = entries.iter().map(|e| e.id).collect();
        assert_eq!(order, vec![id(1), id(2), id(3)]);
    }
}

use crate::Database;
use crate::models::CandidateRow;
use crate::queries::decode_list;
use anyhow::Result;

impl Database {
    /// Every other non-deleted user, joined with preferences and the
    /// timestamp of the most recent message exchanged with the requester.
    /// LEFT JOIN keeps preference-less users in the candidate set.
    pub fn match_candidates(&self, user_id: &str) -> Result<Vec<CandidateRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT u.id, u.first_name, u.last_name, u.bio, u.age, u.gender,
                        u.profile_image, u.location, p.genres, p.artists,
                        (SELECT MAX(created_at) FROM chat_messages
                         WHERE (sender_id = u.id AND receiver_id = ?1)
                            OR (sender_id = ?1 AND receiver_id = u.id)) AS last_message_at
                 FROM users u
                 LEFT JOIN preferences p ON p.user_id = u.id
                 WHERE u.id != ?1 AND u.deleted_at IS NULL",
            )?;

            let raw = stmt
                .query_map([user_id], |row| {
                    Ok((
                        CandidateRow {
                            id: row.get(0)?,
                            first_name: row.get(1)?,
                            last_name: row.get(2)?,
                            bio: row.get(3)?,
                            age: row.get(4)?,
                            gender: row.get(5)?,
                            profile_image: row.get(6)?,
                            location: row.get(7)?,
                            genres: Vec::new(),
                            artists: Vec::new(),
                            last_message_at: row.get(10)?,
                        },
                        row.get::<_, Option<String>>(8)?,
                        row.get::<_, Option<String>>(9)?,
                    ))
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            let rows = raw
                .into_iter()
                .map(|(mut cand, genres, artists)| {
                    cand.genres = genres.as_deref().map_or_else(Vec::new, |g| decode_list(g, "genre"));
                    cand.artists =
                        artists.as_deref().map_or_else(Vec::new, |a| decode_list(a, "artist"));
                    cand
                })
                .collect();
            Ok(rows)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::test_support::{seed_user, set_message_time};
    use uuid::Uuid;

    #[test]
    fn candidates_exclude_self_and_soft_deleted() {
        let db = Database::open_in_memory().unwrap();
        let ana = seed_user(&db, "ana@example.com", "Ana", None);
        let ivo = seed_user(&db, "ivo@example.com", "Ivo", None);
        let mia = seed_user(&db, "mia@example.com", "Mia", None);
        db.soft_delete_user(&mia).unwrap();

        let candidates = db.match_candidates(&ana).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].id, ivo);
    }

    #[test]
    fn candidates_carry_preferences_and_last_message_timestamp() {
        let db = Database::open_in_memory().unwrap();
        let ana = seed_user(&db, "ana@example.com", "Ana", None);
        let ivo = seed_user(&db, "ivo@example.com", "Ivo", None);
        db.save_preferences(&ivo, &["Rock".to_string()], &["Sting".to_string()])
            .unwrap();

        let msg = Uuid::new_v4().to_string();
        db.insert_message(&msg, &ana, &ivo, "hi").unwrap();
        set_message_time(&db, &msg, "2026-01-01 09:00:00");

        let candidates = db.match_candidates(&ana).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].genres, vec!["Rock"]);
        assert_eq!(candidates[0].artists, vec!["Sting"]);
        assert_eq!(
            candidates[0].last_message_at.as_deref(),
            Some("2026-01-01 09:00:00")
        );
    }

    #[test]
    fn candidates_without_preferences_read_as_empty_sets() {
        let db = Database::open_in_memory().unwrap();
        let ana = seed_user(&db, "ana@example.com", "Ana", None);
        seed_user(&db, "ivo@example.com", "Ivo", None);

        let candidates = db.match_candidates(&ana).unwrap();
        assert!(candidates[0].genres.is_empty());
        assert!(candidates[0].artists.is_empty());
        assert!(candidates[0].last_message_at.is_none());
    }
}

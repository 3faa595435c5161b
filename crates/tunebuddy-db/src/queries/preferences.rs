use crate::Database;
use crate::models::PreferenceRow;
use crate::queries::{OptionalExt, decode_list};
use anyhow::Result;
use uuid::Uuid;

impl Database {
    /// Replaces the user's preference row wholesale: delete-then-insert,
    /// never an incremental patch. Lists are JSON-encoded here and nowhere
    /// else.
    pub fn save_preferences(
        &self,
        user_id: &str,
        genres: &[String],
        artists: &[String],
    ) -> Result<()> {
        let genres_json = serde_json::to_string(genres)?;
        let artists_json = serde_json::to_string(artists)?;
        let row_id = Uuid::new_v4().to_string();

        self.with_conn_mut(|conn| {
            conn.execute("DELETE FROM preferences WHERE user_id = ?1", [user_id])?;
            conn.execute(
                "INSERT INTO preferences (id, user_id, genres, artists) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![row_id, user_id, genres_json, artists_json],
            )?;
            Ok(())
        })
    }

    pub fn get_preferences(&self, user_id: &str) -> Result<Option<PreferenceRow>> {
        self.with_conn(|conn| {
            let raw = conn
                .query_row(
                    "SELECT genres, artists FROM preferences WHERE user_id = ?1",
                    [user_id],
                    |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
                )
                .optional()?;

            Ok(raw.map(|(genres, artists)| PreferenceRow {
                user_id: user_id.to_string(),
                genres: decode_list(&genres, "genre"),
                artists: decode_list(&artists, "artist"),
            }))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::test_support::seed_user;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn preferences_round_trip() {
        let db = Database::open_in_memory().unwrap();
        let id = seed_user(&db, "ana@example.com", "Ana", None);

        db.save_preferences(&id, &strings(&["Rock", "Jazz"]), &strings(&["A", "B", "C"]))
            .unwrap();

        let prefs = db.get_preferences(&id).unwrap().unwrap();
        assert_eq!(prefs.genres, strings(&["Rock", "Jazz"]));
        assert_eq!(prefs.artists, strings(&["A", "B", "C"]));
    }

    #[test]
    fn saving_again_replaces_rather_than_merges() {
        let db = Database::open_in_memory().unwrap();
        let id = seed_user(&db, "ana@example.com", "Ana", None);

        db.save_preferences(&id, &strings(&["Rock", "Jazz"]), &strings(&["A"]))
            .unwrap();
        db.save_preferences(&id, &strings(&["Pop"]), &strings(&[]))
            .unwrap();

        let prefs = db.get_preferences(&id).unwrap().unwrap();
        assert_eq!(prefs.genres, strings(&["Pop"]));
        assert!(prefs.artists.is_empty());
    }

    #[test]
    fn missing_preferences_read_as_none() {
        let db = Database::open_in_memory().unwrap();
        let id = seed_user(&db, "ana@example.com", "Ana", None);
        assert!(db.get_preferences(&id).unwrap().is_none());
    }
}

use crate::Database;
use crate::models::{EventRow, FavoritedByRow};
use anyhow::Result;
use uuid::Uuid;

impl Database {
    pub fn wishlist_events(&self, user_id: &str) -> Result<Vec<EventRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT e.id, e.title, e.location, e.date, e.artists, e.genre, e.ticket_url, e.source
                 FROM events e
                 JOIN wishlist w ON w.event_id = e.id
                 WHERE w.user_id = ?1
                 ORDER BY e.date ASC",
            )?;
            let rows = stmt
                .query_map([user_id], |row| {
                    Ok(EventRow {
                        id: row.get(0)?,
                        title: row.get(1)?,
                        location: row.get(2)?,
                        date: row.get(3)?,
                        artists: row.get(4)?,
                        genre: row.get(5)?,
                        ticket_url: row.get(6)?,
                        source: row.get(7)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Insert-or-update on the (user, event) pair: a second toggle updates
    /// the status in place, it never produces a second row.
    pub fn toggle_wishlist(&self, user_id: &str, event_id: &str, status: &str) -> Result<()> {
        let row_id = Uuid::new_v4().to_string();
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO wishlist (id, user_id, event_id, status) VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(user_id, event_id) DO UPDATE SET status = excluded.status",
                rusqlite::params![row_id, user_id, event_id, status],
            )?;
            Ok(())
        })
    }

    pub fn remove_wishlist(&self, user_id: &str, event_id: &str) -> Result<usize> {
        self.with_conn_mut(|conn| {
            let changed = conn.execute(
                "DELETE FROM wishlist WHERE user_id = ?1 AND event_id = ?2",
                [user_id, event_id],
            )?;
            Ok(changed)
        })
    }

    /// Other, non-deleted users who favorited the same event.
    pub fn users_who_favorited(&self, event_id: &str, excluding: &str) -> Result<Vec<FavoritedByRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT u.id, u.first_name || ' ' || u.last_name AS name, u.profile_image, u.location
                 FROM users u
                 JOIN wishlist w ON w.user_id = u.id
                 WHERE w.event_id = ?1 AND u.id != ?2 AND u.deleted_at IS NULL
                 ORDER BY name ASC",
            )?;
            let rows = stmt
                .query_map([event_id, excluding], |row| {
                    Ok(FavoritedByRow {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        profile_image: row.get(2)?,
                        location: row.get(3)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }
}

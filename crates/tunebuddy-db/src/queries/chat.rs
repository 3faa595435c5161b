use crate::Database;
use crate::models::{MessageRow, UnreadRow};
use crate::queries::OptionalExt;
use anyhow::Result;
use rusqlite::Row;

impl Database {
    pub fn insert_message(
        &self,
        id: &str,
        sender_id: &str,
        receiver_id: &str,
        body: &str,
    ) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO chat_messages (id, sender_id, receiver_id, body) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![id, sender_id, receiver_id, body],
            )?;
            Ok(())
        })
    }

    /// All messages between the unordered pair, oldest first.
    pub fn messages_between(&self, user_id: &str, peer_id: &str) -> Result<Vec<MessageRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, sender_id, receiver_id, body, created_at FROM chat_messages
                 WHERE (sender_id = ?1 AND receiver_id = ?2) OR (sender_id = ?2 AND receiver_id = ?1)
                 ORDER BY created_at ASC, id ASC",
            )?;
            let rows = stmt
                .query_map([user_id, peer_id], map_message)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Stamps the reader's last-read marker for this counterpart to now.
    /// Kept separate from `messages_between` so callers control the order
    /// of the two operations.
    pub fn mark_read(&self, user_id: &str, peer_id: &str) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO chat_read_status (user_id, peer_id, last_read_at)
                 VALUES (?1, ?2, datetime('now'))
                 ON CONFLICT(user_id, peer_id) DO UPDATE SET last_read_at = datetime('now')",
                [user_id, peer_id],
            )?;
            Ok(())
        })
    }

    /// Per-counterpart rollup of messages received after the reader's
    /// last-read marker (epoch if never read), newest counterpart first.
    /// Soft-deleted senders never surface.
    pub fn unread_summaries(&self, user_id: &str) -> Result<Vec<UnreadRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT cm.sender_id,
                        u.first_name || ' ' || u.last_name AS peer_name,
                        u.profile_image,
                        cm.body,
                        MAX(cm.created_at) AS last_at,
                        COUNT(*) AS unread_count
                 FROM chat_messages cm
                 JOIN users u ON u.id = cm.sender_id
                 WHERE cm.receiver_id = ?1
                   AND u.deleted_at IS NULL
                   AND cm.created_at > COALESCE(
                       (SELECT last_read_at FROM chat_read_status
                        WHERE user_id = ?1 AND peer_id = cm.sender_id),
                       '1970-01-01')
                 GROUP BY cm.sender_id
                 ORDER BY last_at DESC",
            )?;
            let rows = stmt
                .query_map([user_id], |row| {
                    Ok(UnreadRow {
                        peer_id: row.get(0)?,
                        peer_name: row.get(1)?,
                        peer_image: row.get(2)?,
                        last_message: row.get(3)?,
                        last_at: row.get(4)?,
                        unread_count: row.get(5)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    pub fn get_message(&self, id: &str) -> Result<Option<MessageRow>> {
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT id, sender_id, receiver_id, body, created_at FROM chat_messages WHERE id = ?1",
                [id],
                map_message,
            )
            .optional()
        })
    }

    /// Deletes the message only when `user_id` authored it. Returns false
    /// (leaving the row intact) for unknown ids and foreign messages alike.
    pub fn delete_message(&self, user_id: &str, message_id: &str) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let changed = conn.execute(
                "DELETE FROM chat_messages WHERE id = ?1 AND sender_id = ?2",
                [message_id, user_id],
            )?;
            Ok(changed > 0)
        })
    }

    /// Removes every message in both directions between the pair plus both
    /// read-state rows. Returns the number of messages deleted.
    pub fn delete_conversation(&self, user_id: &str, peer_id: &str) -> Result<usize> {
        self.with_conn_mut(|conn| {
            let deleted = conn.execute(
                "DELETE FROM chat_messages
                 WHERE (sender_id = ?1 AND receiver_id = ?2) OR (sender_id = ?2 AND receiver_id = ?1)",
                [user_id, peer_id],
            )?;
            conn.execute(
                "DELETE FROM chat_read_status
                 WHERE (user_id = ?1 AND peer_id = ?2) OR (user_id = ?2 AND peer_id = ?1)",
                [user_id, peer_id],
            )?;
            Ok(deleted)
        })
    }
}

fn map_message(row: &Row<'_>) -> rusqlite::Result<MessageRow> {
    Ok(MessageRow {
        id: row.get(0)?,
        sender_id: row.get(1)?,
        receiver_id: row.get(2)?,
        body: row.get(3)?,
        created_at: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::test_support::{seed_user, set_message_time};
    use uuid::Uuid;

    fn send(db: &Database, from: &str, to: &str, body: &str, at: &str) -> String {
        let id = Uuid::new_v4().to_string();
        db.insert_message(&id, from, to, body).unwrap();
        set_message_time(db, &id, at);
        id
    }

    #[test]
    fn conversation_is_ordered_oldest_first_across_both_directions() {
        let db = Database::open_in_memory().unwrap();
        let ana = seed_user(&db, "ana@example.com", "Ana", None);
        let ivo = seed_user(&db, "ivo@example.com", "Ivo", None);

        send(&db, &ana, &ivo, "hey", "2026-01-01 10:00:00");
        send(&db, &ivo, &ana, "hi", "2026-01-01 10:01:00");
        send(&db, &ana, &ivo, "concert?", "2026-01-01 10:02:00");

        let msgs = db.messages_between(&ana, &ivo).unwrap();
        let bodies: Vec<&str> = msgs.iter().map(|m| m.body.as_str()).collect();
        assert_eq!(bodies, vec!["hey", "hi", "concert?"]);
    }

    #[test]
    fn only_the_sender_can_delete_a_message() {
        let db = Database::open_in_memory().unwrap();
        let ana = seed_user(&db, "ana@example.com", "Ana", None);
        let ivo = seed_user(&db, "ivo@example.com", "Ivo", None);

        let id = send(&db, &ana, &ivo, "oops", "2026-01-01 10:00:00");

        assert!(!db.delete_message(&ivo, &id).unwrap());
        assert!(db.get_message(&id).unwrap().is_some());

        assert!(db.delete_message(&ana, &id).unwrap());
        assert!(db.get_message(&id).unwrap().is_none());
    }

    #[test]
    fn unread_counts_respect_the_last_read_marker() {
        let db = Database::open_in_memory().unwrap();
        let ana = seed_user(&db, "ana@example.com", "Ana", None);
        let ivo = seed_user(&db, "ivo@example.com", "Ivo", None);

        send(&db, &ivo, &ana, "one", "2026-01-01 10:00:00");
        send(&db, &ivo, &ana, "two", "2026-01-01 10:01:00");

        let unread = db.unread_summaries(&ana).unwrap();
        assert_eq!(unread.len(), 1);
        assert_eq!(unread[0].unread_count, 2);
        assert_eq!(unread[0].last_message, "two");

        // Reading the conversation clears the rollup.
        db.mark_read(&ana, &ivo).unwrap();
        assert!(db.unread_summaries(&ana).unwrap().is_empty());

        // A message after the marker shows up again.
        send(&db, &ivo, &ana, "three", "2096-01-01 10:00:00");
        let unread = db.unread_summaries(&ana).unwrap();
        assert_eq!(unread.len(), 1);
        assert_eq!(unread[0].unread_count, 1);
    }

    #[test]
    fn unread_skips_soft_deleted_senders() {
        let db = Database::open_in_memory().unwrap();
        let ana = seed_user(&db, "ana@example.com", "Ana", None);
        let ivo = seed_user(&db, "ivo@example.com", "Ivo", None);

        send(&db, &ivo, &ana, "hello", "2026-01-01 10:00:00");
        db.soft_delete_user(&ivo).unwrap();

        assert!(db.unread_summaries(&ana).unwrap().is_empty());
    }

    #[test]
    fn deleting_a_conversation_clears_messages_and_read_state_for_both() {
        let db = Database::open_in_memory().unwrap();
        let ana = seed_user(&db, "ana@example.com", "Ana", None);
        let ivo = seed_user(&db, "ivo@example.com", "Ivo", None);

        send(&db, &ana, &ivo, "a", "2026-01-01 10:00:00");
        send(&db, &ivo, &ana, "b", "2026-01-01 10:01:00");
        db.mark_read(&ana, &ivo).unwrap();
        db.mark_read(&ivo, &ana).unwrap();

        // Either participant may wipe the conversation.
        let deleted = db.delete_conversation(&ivo, &ana).unwrap();
        assert_eq!(deleted, 2);
        assert!(db.messages_between(&ana, &ivo).unwrap().is_empty());
        assert!(db.unread_summaries(&ana).unwrap().is_empty());
        assert!(db.unread_summaries(&ivo).unwrap().is_empty());

        let read_rows: i64 = db
            .with_conn(|conn| {
                let n = conn.query_row("SELECT COUNT(*) FROM chat_read_status", [], |row| {
                    row.get(0)
                })?;
                Ok(n)
            })
            .unwrap();
        assert_eq!(read_rows, 0);
    }
}

use crate::Database;
use crate::models::EventRow;
use crate::queries::OptionalExt;
use anyhow::Result;
use rusqlite::Row;

impl Database {
    #[allow(clippy::too_many_arguments)]
    pub fn insert_event(
        &self,
        id: &str,
        title: &str,
        location: &str,
        date: &str,
        artists: &str,
        genre: &str,
        ticket_url: Option<&str>,
        source: Option<&str>,
    ) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "INSERT INTO events (id, title, location, date, artists, genre, ticket_url, source)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                rusqlite::params![id, title, location, date, artists, genre, ticket_url, source],
            )?;
            Ok(())
        })
    }

    pub fn count_events(&self) -> Result<i64> {
        self.with_conn(|conn| {
            let count = conn.query_row("SELECT COUNT(*) FROM events", [], |row| row.get(0))?;
            Ok(count)
        })
    }

    pub fn event_exists(&self, id: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let found = conn
                .query_row("SELECT 1 FROM events WHERE id = ?1", [id], |_| Ok(()))
                .optional()?;
            Ok(found.is_some())
        })
    }

    /// Catalog listing with optional location substring and ticket-source
    /// substring filters, ascending by date. Genre and calendar filters are
    /// applied by the caller.
    pub fn list_events(&self, location: Option<&str>, sources: &[String]) -> Result<Vec<EventRow>> {
        self.with_conn(|conn| {
            let mut clauses: Vec<String> = Vec::new();
            let mut params: Vec<String> = Vec::new();

            if let Some(loc) = location {
                clauses.push("location LIKE ?".to_string());
                params.push(format!("%{}%", loc));
            }
            if !sources.is_empty() {
                let likes: Vec<&str> = sources.iter().map(|_| "source LIKE ?").collect();
                clauses.push(format!("({})", likes.join(" OR ")));
                params.extend(sources.iter().map(|s| format!("%{}%", s)));
            }

            let where_sql = if clauses.is_empty() {
                String::new()
            } else {
                format!(" WHERE {}", clauses.join(" AND "))
            };
            let sql = format!("{EVENT_COLUMNS}{where_sql} ORDER BY date ASC");

            let mut stmt = conn.prepare(&sql)?;
            let bind: Vec<&dyn rusqlite::types::ToSql> = params
                .iter()
                .map(|p| p as &dyn rusqlite::types::ToSql)
                .collect();

            let rows = stmt
                .query_map(bind.as_slice(), map_event)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }

    /// Events dated `today` or later, ascending by date.
    pub fn upcoming_events(&self, today: &str) -> Result<Vec<EventRow>> {
        self.with_conn(|conn| {
            let mut stmt =
                conn.prepare(&format!("{EVENT_COLUMNS} WHERE date >= ?1 ORDER BY date ASC"))?;
            let rows = stmt
                .query_map([today], map_event)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }
}

const EVENT_COLUMNS: &str =
    "SELECT id, title, location, date, artists, genre, ticket_url, source FROM events";

fn map_event(row: &Row<'_>) -> rusqlite::Result<EventRow> {
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::test_support::seed_event;

    #[test]
    fn location_and_source_filters_combine() {
        let db = Database::open_in_memory().unwrap();
        seed_event(&db, "A", "Zagreb", "2026-03-01", "Rock");
        seed_event(&db, "B", "Split", "2026-03-02", "Pop");

        db.with_conn(|conn| {
            conn.execute(
                "UPDATE events SET source = 'entrio.hr' WHERE title = 'A'",
                [],
            )?;
            Ok(())
        })
        .unwrap();

        let hits = db
            .list_events(Some("Zagreb"), &["entrio".to_string()])
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "A");

        let all = db.list_events(None, &[]).unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn upcoming_cuts_off_past_events() {
        let db = Database::open_in_memory().unwrap();
        seed_event(&db, "Past", "Zagreb", "2020-01-01", "Rock");
        seed_event(&db, "Future", "Zagreb", "2030-01-01", "Rock");

        let upcoming = db.upcoming_events("2026-01-01").unwrap();
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].title, "Future");
    }
}

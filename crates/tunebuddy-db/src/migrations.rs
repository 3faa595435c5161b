use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS users (
            id              TEXT PRIMARY KEY,
            email           TEXT NOT NULL UNIQUE,
            password_hash   TEXT NOT NULL,
            first_name      TEXT NOT NULL,
            last_name       TEXT NOT NULL,
            bio             TEXT,
            age             INTEGER,
            gender          TEXT,
            profile_image   TEXT,
            location        TEXT,
            created_at      TEXT NOT NULL DEFAULT (datetime('now')),
            deleted_at      TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_users_email ON users(email);

        CREATE TABLE IF NOT EXISTS preferences (
            id          TEXT PRIMARY KEY,
            user_id     TEXT NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,
            genres      TEXT NOT NULL,
            artists     TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS events (
            id          TEXT PRIMARY KEY,
            title       TEXT NOT NULL,
            location    TEXT NOT NULL,
            date        TEXT NOT NULL,
            artists     TEXT NOT NULL,
            genre       TEXT NOT NULL,
            ticket_url  TEXT,
            source      TEXT,
            created_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_events_date ON events(date);

        CREATE TABLE IF NOT EXISTS wishlist (
            id          TEXT PRIMARY KEY,
            user_id     TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            event_id    TEXT NOT NULL REFERENCES events(id) ON DELETE CASCADE,
            status      TEXT NOT NULL DEFAULT 'interested',
            created_at  TEXT NOT NULL DEFAULT (datetime('now')),
            UNIQUE(user_id, event_id)
        );

        CREATE INDEX IF NOT EXISTS idx_wishlist_user ON wishlist(user_id);

        CREATE TABLE IF NOT EXISTS chat_messages (
            id          TEXT PRIMARY KEY,
            sender_id   TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            receiver_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            body        TEXT NOT NULL,
            created_at  TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_chat_sender ON chat_messages(sender_id, created_at);
        CREATE INDEX IF NOT EXISTS idx_chat_receiver ON chat_messages(receiver_id, created_at);

        CREATE TABLE IF NOT EXISTS chat_read_status (
            user_id      TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            peer_id      TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            last_read_at TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (user_id, peer_id)
        );
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}

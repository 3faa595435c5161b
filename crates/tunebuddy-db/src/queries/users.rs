use crate::Database;
use crate::models::{NewUser, UserRow};
use crate::queries::OptionalExt;
use anyhow::Result;
use rusqlite::{Connection, Row};
use tunebuddy_types::api::UpdateProfileRequest;

impl Database {
    /// Returns false when the email is already taken. The UNIQUE constraint
    /// is the authority here; a racing pre-check cannot be.
    pub fn create_user(&self, user: &NewUser<'_>) -> Result<bool> {
        self.with_conn_mut(|conn| {
            let inserted = conn.execute(
                "INSERT INTO users (id, email, password_hash, first_name, last_name, bio, age, gender, location)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                rusqlite::params![
                    user.id,
                    user.email,
                    user.password_hash,
                    user.first_name,
                    user.last_name,
                    user.bio,
                    user.age,
                    user.gender,
                    user.location,
                ],
            );
            match inserted {
                Ok(_) => Ok(true),
                Err(rusqlite::Error::SqliteFailure(e, _))
                    if e.code == rusqlite::ErrorCode::ConstraintViolation =>
                {
                    Ok(false)
                }
                Err(e) => Err(e.into()),
            }
        })
    }

    /// True if any row, live or soft-deleted, holds this email. Emails are
    /// never reusable, so deleted rows still count.
    pub fn email_exists(&self, email: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let found = conn
                .query_row("SELECT 1 FROM users WHERE email = ?1", [email], |_| Ok(()))
                .optional()?;
            Ok(found.is_some())
        })
    }

    pub fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| {
            conn.query_row(
                &format!("{USER_COLUMNS} WHERE email = ?1 AND deleted_at IS NULL"),
                [email],
                map_user,
            )
            .optional()
        })
    }

    pub fn get_user_by_id(&self, id: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| {
            conn.query_row(
                &format!("{USER_COLUMNS} WHERE id = ?1 AND deleted_at IS NULL"),
                [id],
                map_user,
            )
            .optional()
        })
    }

    /// Applies only the fields present in the request; a fully-absent
    /// request is a no-op.
    pub fn update_user_profile(&self, id: &str, upd: &UpdateProfileRequest) -> Result<()> {
        self.with_conn_mut(|conn| update_profile(conn, id, upd))
    }

    pub fn soft_delete_user(&self, id: &str) -> Result<()> {
        self.with_conn_mut(|conn| {
            conn.execute(
                "UPDATE users SET deleted_at = datetime('now') WHERE id = ?1 AND deleted_at IS NULL",
                [id],
            )?;
            Ok(())
        })
    }
}

const USER_COLUMNS: &str = "SELECT id, email, password_hash, first_name, last_name, bio, age, \
                            gender, profile_image, location, created_at FROM users";

fn map_user(row: &Row<'_>) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        id: row.get(0)?,
        email: row.get(1)?,
        password_hash: row.get(2)?,
        first_name: row.get(3)?,
        last_name: row.get(4)?,
        bio: row.get(5)?,
        age: row.get(6)?,
        gender: row.get(7)?,
        profile_image: row.get(8)?,
        location: row.get(9)?,
        created_at: row.get(10)?,
    })
}

fn update_profile(conn: &Connection, id: &str, upd: &UpdateProfileRequest) -> Result<()> {
    let mut sets: Vec<&str> = Vec::new();
    let mut vals: Vec<&dyn rusqlite::types::ToSql> = Vec::new();

    if let Some(v) = &upd.first_name {
        sets.push("first_name = ?");
        vals.push(v);
    }
    if let Some(v) = &upd.last_name {
        sets.push("last_name = ?");
        vals.push(v);
    }
    if let Some(v) = &upd.bio {
        sets.push("bio = ?");
        vals.push(v);
    }
    if let Some(v) = &upd.age {
        sets.push("age = ?");
        vals.push(v);
    }
    if let Some(v) = &upd.gender {
        sets.push("gender = ?");
        vals.push(v);
    }
    if let Some(v) = &upd.profile_image {
        sets.push("profile_image = ?");
        vals.push(v);
    }
    if let Some(v) = &upd.location {
        sets.push("location = ?");
        vals.push(v);
    }

    if sets.is_empty() {
        return Ok(());
    }

    vals.push(&id);
    let sql = format!(
        "UPDATE users SET {} WHERE id = ? AND deleted_at IS NULL",
        sets.join(", ")
    );
    conn.execute(&sql, vals.as_slice())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queries::test_support::seed_user;

    #[test]
    fn soft_deleted_user_is_invisible_but_email_stays_taken() {
        let db = Database::open_in_memory().unwrap();
        let id = seed_user(&db, "ana@example.com", "Ana", None);

        assert!(db.get_user_by_id(&id).unwrap().is_some());

        db.soft_delete_user(&id).unwrap();
        assert!(db.get_user_by_id(&id).unwrap().is_none());
        assert!(db.get_user_by_email("ana@example.com").unwrap().is_none());
        assert!(db.email_exists("ana@example.com").unwrap());
    }

    #[test]
    fn inserting_a_taken_email_reports_false_instead_of_erroring() {
        let db = Database::open_in_memory().unwrap();
        seed_user(&db, "ana@example.com", "Ana", None);

        let id = uuid::Uuid::new_v4().to_string();
        let dup = NewUser {
            id: &id,
            email: "ana@example.com",
            password_hash: "y",
            first_name: "Other",
            last_name: "Ana",
            bio: None,
            age: None,
            gender: None,
            location: None,
        };
        assert!(!db.create_user(&dup).unwrap());
        assert!(db.get_user_by_id(&id).unwrap().is_none());
    }

    #[test]
    fn partial_profile_update_leaves_other_fields_alone() {
        let db = Database::open_in_memory().unwrap();
        let id = seed_user(&db, "ivo@example.com", "Ivo", Some("Split"));

        let upd = UpdateProfileRequest {
            bio: Some("Into vinyl".to_string()),
            age: Some(29),
            ..Default::default()
        };
        db.update_user_profile(&id, &upd).unwrap();

        let user = db.get_user_by_id(&id).unwrap().unwrap();
        assert_eq!(user.first_name, "Ivo");
        assert_eq!(user.location.as_deref(), Some("Split"));
        assert_eq!(user.bio.as_deref(), Some("Into vinyl"));
        assert_eq!(user.age, Some(29));
    }

    #[test]
    fn empty_profile_update_is_a_noop() {
        let db = Database::open_in_memory().unwrap();
        let id = seed_user(&db, "mia@example.com", "Mia", None);

        db.update_user_profile(&id, &UpdateProfileRequest::default())
            .unwrap();
        let user = db.get_user_by_id(&id).unwrap().unwrap();
        assert_eq!(user.first_name, "Mia");
    }
}

use async_trait::async_trait;
use skylane_core::identity::{hash_password, verify_password};
use skylane_core::repository::UserRepository;
use skylane_core::user::{User, UserSummary};
use skylane_core::{CoreError, CoreResult};
use sqlx::SqlitePool;
use tracing::info;

use crate::database::internal;

pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    password_hash: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            password_hash: row.password_hash,
        }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn create_user(&self, username: &str, password: &str) -> CoreResult<User> {
        // Argon2 is CPU bound; keep it off the async workers.
        let password = password.to_string();
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|e| CoreError::InternalError(e.to_string()))??;

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES (?, ?)
            RETURNING id, username, password_hash
            "#,
        )
        .bind(username)
        .bind(&password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db) = &e {
                if db.is_unique_violation() {
                    return CoreError::UsernameTaken(username.to_string());
                }
            }
            internal(e)
        })?;

        info!("User created: {} ({})", row.username, row.id);
        Ok(row.into())
    }

    async fn authenticate(&self, username: &str, password: &str) -> CoreResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, password_hash FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(internal)?;

        let user: User = match row {
            Some(row) => row.into(),
            None => return Ok(None),
        };

        let password = password.to_string();
        let stored = user.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || verify_password(&password, &stored))
            .await
            .map_err(|e| CoreError::InternalError(e.to_string()))?;

        Ok(matches.then_some(user))
    }

    async fn list_users(&self) -> CoreResult<Vec<UserSummary>> {
        let rows: Vec<(i64, String)> = sqlx::query_as("SELECT id, username FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(internal)?;

        Ok(rows
            .into_iter()
            .map(|(id, username)| UserSummary { id, username })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_db;

    #[tokio::test]
    async fn test_password_is_not_stored_in_clear() {
        let db = test_db().await;
        let users = SqliteUserRepository::new(db.pool.clone());

        let user = users.create_user("ann", "s3cret").await.unwrap();
        assert_ne!(user.password_hash, "s3cret");

        let (stored,): (String,) = sqlx::query_as("SELECT password_hash FROM users WHERE username = 'ann'")
            .fetch_one(&db.pool)
            .await
            .unwrap();
        assert!(stored.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn test_duplicate_username_is_rejected() {
        let db = test_db().await;
        let users = SqliteUserRepository::new(db.pool.clone());

        users.create_user("ann", "first").await.unwrap();
        let err = users.create_user("ann", "second").await.unwrap_err();
        assert!(matches!(err, CoreError::UsernameTaken(ref name) if name == "ann"));

        let listed = users.list_users().await.unwrap();
        assert_eq!(listed.iter().filter(|u| u.username == "ann").count(), 1);

        // The original password still works
        assert!(users.authenticate("ann", "first").await.unwrap().is_some());
        assert!(users.authenticate("ann", "second").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_authenticate() {
        let db = test_db().await;
        let users = SqliteUserRepository::new(db.pool.clone());
        let created = users.create_user("ann", "s3cret").await.unwrap();

        let found = users.authenticate("ann", "s3cret").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert!(users.authenticate("ann", "S3CRET").await.unwrap().is_none());
        assert!(users.authenticate("bob", "s3cret").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_users_hides_hashes() {
        let db = test_db().await;
        let users = SqliteUserRepository::new(db.pool.clone());
        users.create_user("ann", "a").await.unwrap();
        users.create_user("bob", "b").await.unwrap();

        let listed = users.list_users().await.unwrap();
        let names: Vec<&str> = listed.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["ann", "bob"]);
    }
}

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

pub async fn create(
    db_pool: &SqlitePool,
    username: &str,
    email: &str,
    password_hash: &str,
) -> AppResult<User> {
    if sqlx::query_as::<_, (i64,)>("SELECT 1 FROM users WHERE username=?")
        .bind(username)
        .fetch_optional(db_pool)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict(format!("username {username} is taken")));
    }

    let id = Uuid::now_v7();
    sqlx::query("INSERT INTO users (id,username,email,password_hash) VALUES (?,?,?,?)")
        .bind(id.to_string())
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .execute(db_pool)
        .await?;

    Ok(User {
        id,
        username: username.to_owned(),
        email: email.to_owned(),
        password_hash: password_hash.to_owned(),
    })
}

pub async fn by_username(db_pool: &SqlitePool, username: &str) -> AppResult<Option<User>> {
    let row: Option<(String, String, String, String)> =
        sqlx::query_as("SELECT id,username,email,password_hash FROM users WHERE username=?")
            .bind(username)
            .fetch_optional(db_pool)
            .await?;

    match row {
        Some((id, username, email, password_hash)) => Ok(Some(User {
            id: Uuid::parse_str(&id)?,
            username,
            email,
            password_hash,
        })),
        None => Ok(None),
    }
}

pub async fn by_id(db_pool: &SqlitePool, user_id: Uuid) -> AppResult<User> {
    let (username, email, password_hash): (String, String, String) =
        sqlx::query_as("SELECT username,email,password_hash FROM users WHERE id=?")
            .bind(user_id.to_string())
            .fetch_optional(db_pool)
            .await?
            .ok_or(AppError::NotFound)?;

    Ok(User {
        id: user_id,
        username,
        email,
        password_hash,
    })
}

/// Removes a user and everything hanging off them in one transaction:
/// comments on their posts (any author), comments they wrote elsewhere,
/// their posts, then the user row itself.
pub async fn delete(db_pool: &SqlitePool, user_id: Uuid) -> AppResult<()> {
    let uid = user_id.to_string();
    let mut tx = db_pool.begin().await?;

    if sqlx::query_as::<_, (i64,)>("SELECT 1 FROM users WHERE id=?")
        .bind(&uid)
        .fetch_optional(&mut *tx)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound);
    }

    sqlx::query("DELETE FROM comments WHERE post_id IN (SELECT id FROM posts WHERE user_id=?)")
        .bind(&uid)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM comments WHERE user_id=?")
        .bind(&uid)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM posts WHERE user_id=?")
        .bind(&uid)
        .execute(&mut *tx)
        .await?;
    sqlx::query("DELETE FROM users WHERE id=?")
        .bind(&uid)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}

use sqlx::SqlitePool;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{AppError, AppResult};

#[derive(Debug, Clone)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: i64,
    pub user_id: Uuid,
}

pub async fn create(
    db_pool: &SqlitePool,
    title: &str,
    content: &str,
    owner: Uuid,
) -> AppResult<Uuid> {
    let id = Uuid::now_v7();
    sqlx::query("INSERT INTO posts (id,title,content,created_at,user_id) VALUES (?,?,?,?,?)")
        .bind(id.to_string())
        .bind(title)
        .bind(content)
        .bind(OffsetDateTime::now_utc().unix_timestamp())
        .bind(owner.to_string())
        .execute(db_pool)
        .await?;
    Ok(id)
}

pub async fn get(db_pool: &SqlitePool, post_id: Uuid) -> AppResult<Post> {
    let (title, content, created_at, user_id): (String, String, i64, String) =
        sqlx::query_as("SELECT title,content,created_at,user_id FROM posts WHERE id=?")
            .bind(post_id.to_string())
            .fetch_optional(db_pool)
            .await?
            .ok_or(AppError::NotFound)?;

    Ok(Post {
        id: post_id,
        title,
        content,
        created_at,
        user_id: Uuid::parse_str(&user_id)?,
    })
}

/// Newest first.
pub async fn all(db_pool: &SqlitePool) -> AppResult<Vec<Post>> {
    let rows: Vec<(String, String, String, i64, String)> = sqlx::query_as(
        "SELECT id,title,content,created_at,user_id FROM posts ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(db_pool)
    .await?;

    let mut posts = Vec::with_capacity(rows.len());
    for (id, title, content, created_at, user_id) in rows {
        posts.push(Post {
            id: Uuid::parse_str(&id)?,
            title,
            content,
            created_at,
            user_id: Uuid::parse_str(&user_id)?,
        });
    }
    Ok(posts)
}

/// Replaces title and content together. Only the owner may edit, and
/// neither field may be empty once trimmed.
pub async fn update(
    db_pool: &SqlitePool,
    post_id: Uuid,
    title: &str,
    content: &str,
    acting_user: Uuid,
) -> AppResult<()> {
    let post = get(db_pool, post_id).await?;
    if post.user_id != acting_user {
        return Err(AppError::Unauthorized);
    }

    let title = title.trim();
    let content = content.trim();
    if title.is_empty() || content.is_empty() {
        return Err(AppError::Validation(
            "title and content cannot be empty".to_owned(),
        ));
    }

    sqlx::query("UPDATE posts SET title=?, content=? WHERE id=?")
        .bind(title)
        .bind(content)
        .bind(post_id.to_string())
        .execute(db_pool)
        .await?;
    Ok(())
}

/// Comments first, then the post, in one transaction.
pub async fn delete(db_pool: &SqlitePool, post_id: Uuid) -> AppResult<()> {
    let pid = post_id.to_string();
    let mut tx = db_pool.begin().await?;

    sqlx::query("DELETE FROM comments WHERE post_id=?")
        .bind(&pid)
        .execute(&mut *tx)
        .await?;
    let result = sqlx::query("DELETE FROM posts WHERE id=?")
        .bind(&pid)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound);
    }

    tx.commit().await?;
    Ok(())
}

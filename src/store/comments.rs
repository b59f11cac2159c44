use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{AppError, AppResult};

use super::posts;

#[derive(Debug, Clone)]
pub struct Comment {
    pub id: Uuid,
    pub content: String,
    pub user_id: Uuid,
    pub post_id: Uuid,
}

pub async fn create(
    db_pool: &SqlitePool,
    post_id: Uuid,
    content: &str,
    author: Uuid,
) -> AppResult<Uuid> {
    let content = content.trim();
    if content.is_empty() {
        return Err(AppError::Validation("comment cannot be empty".to_owned()));
    }

    // NotFound before the insert rather than a foreign key error after.
    posts::get(db_pool, post_id).await?;

    let id = Uuid::now_v7();
    sqlx::query("INSERT INTO comments (id,content,user_id,post_id) VALUES (?,?,?,?)")
        .bind(id.to_string())
        .bind(content)
        .bind(author.to_string())
        .bind(post_id.to_string())
        .execute(db_pool)
        .await?;
    Ok(id)
}

pub async fn get(db_pool: &SqlitePool, comment_id: Uuid) -> AppResult<Comment> {
    let (content, user_id, post_id): (String, String, String) =
        sqlx::query_as("SELECT content,user_id,post_id FROM comments WHERE id=?")
            .bind(comment_id.to_string())
            .fetch_optional(db_pool)
            .await?
            .ok_or(AppError::NotFound)?;

    Ok(Comment {
        id: comment_id,
        content,
        user_id: Uuid::parse_str(&user_id)?,
        post_id: Uuid::parse_str(&post_id)?,
    })
}

/// Oldest first, the order they were written in.
pub async fn for_post(db_pool: &SqlitePool, post_id: Uuid) -> AppResult<Vec<Comment>> {
    let rows: Vec<(String, String, String)> =
        sqlx::query_as("SELECT id,content,user_id FROM comments WHERE post_id=? ORDER BY id")
            .bind(post_id.to_string())
            .fetch_all(db_pool)
            .await?;

    let mut comments = Vec::with_capacity(rows.len());
    for (id, content, user_id) in rows {
        comments.push(Comment {
            id: Uuid::parse_str(&id)?,
            content,
            user_id: Uuid::parse_str(&user_id)?,
            post_id,
        });
    }
    Ok(comments)
}

pub async fn update(
    db_pool: &SqlitePool,
    comment_id: Uuid,
    content: &str,
    acting_user: Uuid,
) -> AppResult<()> {
    let comment = get(db_pool, comment_id).await?;
    if comment.user_id != acting_user {
        return Err(AppError::Unauthorized);
    }

    let content = content.trim();
    if content.is_empty() {
        return Err(AppError::Validation("comment cannot be empty".to_owned()));
    }

    sqlx::query("UPDATE comments SET content=? WHERE id=?")
        .bind(content)
        .bind(comment_id.to_string())
        .execute(db_pool)
        .await?;
    Ok(())
}

/// Only the author may delete. Returns the parent post id so the
/// caller can redirect back to it.
pub async fn delete(
    db_pool: &SqlitePool,
    comment_id: Uuid,
    acting_user: Uuid,
) -> AppResult<Uuid> {
    let comment = get(db_pool, comment_id).await?;
    if comment.user_id != acting_user {
        return Err(AppError::Unauthorized);
    }

    sqlx::query("DELETE FROM comments WHERE id=?")
        .bind(comment_id.to_string())
        .execute(db_pool)
        .await?;
    Ok(comment.post_id)
}

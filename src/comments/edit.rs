use axum::{
    Form, debug_handler,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use sqlx::SqlitePool;
use tower_sessions::Session;
use uuid::Uuid;

use crate::{AppError, AppResult, include_res, session, session::Visitor, store};

#[derive(Deserialize)]
pub(crate) struct EditCommentForm {
    content: String,
}

#[debug_handler]
pub(crate) async fn edit_comment_page(
    State(db_pool): State<SqlitePool>,
    visitor: Visitor,
    session: Session,
    Path(comment_id): Path<Uuid>,
) -> AppResult<Response> {
    let comment = store::comments::get(&db_pool, comment_id).await?;

    if visitor.0 != Some(comment.user_id) {
        session::flash(&session, "Unauthorized access!").await?;
        return Ok(Redirect::to(&format!("/viewpost/{}", comment.post_id)).into_response());
    }

    let notice = session::take_notice(&session).await?;
    Ok(Html(
        include_res!(str, "/pages/edit_comment.html")
            .replace("{notice}", &notice)
            .replace("{id}", &comment.id.to_string())
            .replace("{post_id}", &comment.post_id.to_string())
            .replace("{content}", &comment.content),
    )
    .into_response())
}

#[debug_handler]
pub(crate) async fn edit_comment(
    State(db_pool): State<SqlitePool>,
    visitor: Visitor,
    session: Session,
    Path(comment_id): Path<Uuid>,
    Form(EditCommentForm { content }): Form<EditCommentForm>,
) -> AppResult<Response> {
    let comment = store::comments::get(&db_pool, comment_id).await?;

    let Some(user_id) = visitor.0 else {
        session::flash(&session, "Unauthorized access!").await?;
        return Ok(Redirect::to(&format!("/viewpost/{}", comment.post_id)).into_response());
    };

    match store::comments::update(&db_pool, comment_id, &content, user_id).await {
        Ok(()) => {
            session::flash(&session, "Comment updated successfully!").await?;
            Ok(Redirect::to(&format!("/viewpost/{}", comment.post_id)).into_response())
        }
        Err(AppError::Unauthorized) => {
            session::flash(&session, "Unauthorized access!").await?;
            Ok(Redirect::to(&format!("/viewpost/{}", comment.post_id)).into_response())
        }
        Err(AppError::Validation(_)) => {
            session::flash(&session, "Comment cannot be empty!").await?;
            Ok(Redirect::to(&format!("/edit_comment/{comment_id}")).into_response())
        }
        Err(err) => Err(err),
    }
}

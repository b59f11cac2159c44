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
pub(crate) struct EditPostForm {
    title: String,
    content: String,
}

#[debug_handler]
pub(crate) async fn edit_post_page(
    State(db_pool): State<SqlitePool>,
    visitor: Visitor,
    session: Session,
    Path(post_id): Path<Uuid>,
) -> AppResult<Response> {
    let post = store::posts::get(&db_pool, post_id).await?;

    if visitor.0 != Some(post.user_id) {
        session::flash(&session, "Unauthorized access!").await?;
        return Ok(Redirect::to(&format!("/viewpost/{post_id}")).into_response());
    }

    let notice = session::take_notice(&session).await?;
    Ok(Html(
        include_res!(str, "/pages/editpost.html")
            .replace("{notice}", &notice)
            .replace("{id}", &post.id.to_string())
            .replace("{title}", &post.title)
            .replace("{content}", &post.content),
    )
    .into_response())
}

#[debug_handler]
pub(crate) async fn edit_post(
    State(db_pool): State<SqlitePool>,
    visitor: Visitor,
    session: Session,
    Path(post_id): Path<Uuid>,
    Form(EditPostForm { title, content }): Form<EditPostForm>,
) -> AppResult<Response> {
    let Some(user_id) = visitor.0 else {
        session::flash(&session, "Unauthorized access!").await?;
        return Ok(Redirect::to(&format!("/viewpost/{post_id}")).into_response());
    };

    match store::posts::update(&db_pool, post_id, &title, &content, user_id).await {
        Ok(()) => {
            session::flash(&session, "Post updated successfully!").await?;
            Ok(Redirect::to(&format!("/viewpost/{post_id}")).into_response())
        }
        Err(AppError::Unauthorized) => {
            session::flash(&session, "Unauthorized access!").await?;
            Ok(Redirect::to(&format!("/viewpost/{post_id}")).into_response())
        }
        Err(AppError::Validation(_)) => {
            session::flash(&session, "Title and content cannot be empty!").await?;
            Ok(Redirect::to(&format!("/edit_post/{post_id}")).into_response())
        }
        Err(err) => Err(err),
    }
}

use axum::{
    Form, debug_handler,
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use sqlx::SqlitePool;
use tower_sessions::Session;
use uuid::Uuid;

use crate::{AppError, AppResult, Markdown, include_res, session, session::Visitor, store};

#[derive(Deserialize)]
pub(crate) struct CommentForm {
    comment: String,
}

#[debug_handler]
pub(crate) async fn view_post(
    State(db_pool): State<SqlitePool>,
    visitor: Visitor,
    session: Session,
    Path(post_id): Path<Uuid>,
) -> AppResult<Response> {
    if visitor.0.is_none() {
        session::flash(&session, "You must be logged in to comment.").await?;
        return Ok(Redirect::to("/login").into_response());
    }

    let post = store::posts::get(&db_pool, post_id).await?;
    let author = store::users::by_id(&db_pool, post.user_id).await?;

    let mut comment_items = String::new();
    for comment in store::comments::for_post(&db_pool, post_id).await? {
        comment_items += &comment_to_html(&db_pool, &comment).await?;
    }

    let notice = session::take_notice(&session).await?;
    Ok(Html(
        include_res!(str, "/pages/viewpost.html")
            .replace("{notice}", &notice)
            .replace("{id}", &post.id.to_string())
            .replace("{title}", &post.title)
            .replace("{username}", &author.username)
            .replace("{content}", &Markdown(post.content.as_str()).to_html())
            .replace("{comment_items}", &comment_items),
    )
    .into_response())
}

#[debug_handler]
pub(crate) async fn add_comment(
    State(db_pool): State<SqlitePool>,
    visitor: Visitor,
    session: Session,
    Path(post_id): Path<Uuid>,
    Form(CommentForm { comment }): Form<CommentForm>,
) -> AppResult<Response> {
    let Some(user_id) = visitor.0 else {
        session::flash(&session, "You must be logged in to comment.").await?;
        return Ok(Redirect::to("/login").into_response());
    };

    match store::comments::create(&db_pool, post_id, &comment, user_id).await {
        Ok(_) => session::flash(&session, "Comment added successfully!").await?,
        Err(AppError::Validation(_)) => {
            session::flash(&session, "Comment cannot be empty!").await?
        }
        Err(err) => return Err(err),
    }

    Ok(Redirect::to(&format!("/viewpost/{post_id}")).into_response())
}

pub(crate) async fn comment_to_html(
    db_pool: &SqlitePool,
    comment: &store::comments::Comment,
) -> AppResult<String> {
    let author = store::users::by_id(db_pool, comment.user_id).await?;

    Ok(include_res!(str, "/pages/comment_item.html")
        .replace("{id}", &comment.id.to_string())
        .replace("{post_id}", &comment.post_id.to_string())
        .replace("{username}", &author.username)
        .replace("{content}", &Markdown(comment.content.as_str()).to_html()))
}

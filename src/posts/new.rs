use axum::{
    Form, debug_handler,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use sqlx::SqlitePool;
use tower_sessions::Session;
use tracing::info;

use crate::{AppResult, include_res, session, session::Visitor, store};

#[derive(Deserialize)]
pub(crate) struct NewPostForm {
    title: String,
    content: String,
}

#[debug_handler]
pub(crate) async fn create_post_page(visitor: Visitor, session: Session) -> AppResult<Response> {
    if visitor.0.is_none() {
        session::flash(&session, "You must be logged in to create a post.").await?;
        return Ok(Redirect::to("/login").into_response());
    }

    let notice = session::take_notice(&session).await?;
    Ok(Html(include_res!(str, "/pages/createpost.html").replace("{notice}", &notice))
        .into_response())
}

#[debug_handler]
pub(crate) async fn create_post(
    State(db_pool): State<SqlitePool>,
    visitor: Visitor,
    session: Session,
    Form(NewPostForm { title, content }): Form<NewPostForm>,
) -> AppResult<Response> {
    let Some(user_id) = visitor.0 else {
        session::flash(&session, "You must be logged in to create a post.").await?;
        return Ok(Redirect::to("/login").into_response());
    };

    let post_id = store::posts::create(&db_pool, &title, &content, user_id).await?;
    info!(%post_id, %user_id, "post created");

    session::flash(&session, "Post created successfully!").await?;
    Ok(Redirect::to("/").into_response())
}

use axum::{
    debug_handler,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use sqlx::SqlitePool;
use tower_sessions::Session;

use crate::{AppResult, include_res, session, session::Visitor, store};

#[debug_handler]
pub(crate) async fn index(
    State(db_pool): State<SqlitePool>,
    visitor: Visitor,
    session: Session,
) -> AppResult<Response> {
    if visitor.0.is_none() {
        return Ok(Redirect::to("/login").into_response());
    }

    let mut post_items = String::new();
    for post in store::posts::all(&db_pool).await? {
        let author = store::users::by_id(&db_pool, post.user_id).await?;
        post_items += &include_res!(str, "/pages/post_item.html")
            .replace("{id}", &post.id.to_string())
            .replace("{title}", &post.title)
            .replace("{username}", &author.username);
    }

    let notice = session::take_notice(&session).await?;
    Ok(Html(
        include_res!(str, "/pages/index.html")
            .replace("{notice}", &notice)
            .replace("{post_items}", &post_items),
    )
    .into_response())
}

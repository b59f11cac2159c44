use axum::{
    Form, debug_handler,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use sqlx::SqlitePool;
use tower_sessions::Session;
use tracing::info;

use crate::{AppResult, include_res, session, store};

use super::password;

#[derive(Deserialize)]
pub(crate) struct LoginForm {
    username: String,
    password: String,
}

#[debug_handler]
pub(crate) async fn login_page(session: Session) -> AppResult<Response> {
    let notice = session::take_notice(&session).await?;
    Ok(Html(include_res!(str, "/pages/login.html").replace("{notice}", &notice)).into_response())
}

#[debug_handler]
pub(crate) async fn login(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Form(LoginForm { username, password }): Form<LoginForm>,
) -> AppResult<Response> {
    if let Some(user) = store::users::by_username(&db_pool, &username).await?
        && password::verify_password(&password, &user.password_hash)?
    {
        session.insert(session::USER_ID, user.id).await?;
        info!(user_id = %user.id, "welcome u/{}", user.username);
        session::flash(&session, "Login successful!").await?;
        return Ok(Redirect::to("/").into_response());
    }

    session::flash(&session, "Invalid username or password.").await?;
    Ok(Redirect::to("/login").into_response())
}

use axum::{
    Form, debug_handler,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use sqlx::SqlitePool;
use tower_sessions::Session;
use tracing::info;

use crate::{AppError, AppResult, include_res, session, store};

use super::password;

#[derive(Deserialize)]
pub(crate) struct RegisterForm {
    username: String,
    email: String,
    password: String,
}

#[debug_handler]
pub(crate) async fn register_page(session: Session) -> AppResult<Response> {
    let notice = session::take_notice(&session).await?;
    Ok(Html(include_res!(str, "/pages/register.html").replace("{notice}", &notice))
        .into_response())
}

#[debug_handler]
pub(crate) async fn register(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Form(RegisterForm {
        username,
        email,
        password,
    }): Form<RegisterForm>,
) -> AppResult<Response> {
    let password_hash = password::hash_password(&password)?;

    match store::users::create(&db_pool, &username, &email, &password_hash).await {
        Ok(user) => {
            info!(user_id = %user.id, "registered u/{username}");
            session::flash(&session, "Registration successful! Please log in.").await?;
            Ok(Redirect::to("/login").into_response())
        }
        Err(AppError::Conflict(_)) => {
            session::flash(&session, "Username already exists!").await?;
            Ok(Redirect::to("/register").into_response())
        }
        Err(err) => Err(err),
    }
}

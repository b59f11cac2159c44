pub mod auth;
pub mod comments;
pub mod db;
pub mod posts;
pub mod res;
pub mod session;
pub mod store;

use std::ops::Deref;

use axum::{
    extract::FromRef,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use sqlx::SqlitePool;

#[derive(Clone, FromRef)]
pub struct AppState {
    pub db_pool: SqlitePool,
}

pub type AppResult<T> = Result<T, AppError>;

/// Everything a handler can fail with. The first five arms are the
/// domain taxonomy; `Internal` is a storage or session failure and
/// propagates as a 500 carrying the error chain.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("not found")]
    NotFound,
    #[error("unauthorized")]
    Unauthorized,
    #[error("you must be logged in")]
    Unauthenticated,
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "not found").into_response(),
            AppError::Unauthorized => (StatusCode::FORBIDDEN, "unauthorized").into_response(),
            AppError::Unauthenticated => Redirect::to("/login").into_response(),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg).into_response(),
            AppError::Internal(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("{}\n\n{}", err, err.backtrace()),
            )
                .into_response(),
        }
    }
}

impl From<String> for AppError {
    fn from(err: String) -> Self {
        Self::Internal(anyhow::Error::msg(err))
    }
}

impl From<&str> for AppError {
    fn from(err: &str) -> Self {
        Self::Internal(anyhow::Error::msg(err.to_owned()))
    }
}

macro_rules! apperr_impl {
    ($E:ty) => {
        impl From<$E> for AppError {
            fn from(err: $E) -> Self {
                Self::Internal(anyhow::Error::from(err))
            }
        }
    };
}

apperr_impl!(sqlx::Error);
apperr_impl!(tower_sessions::session::Error);
apperr_impl!(axum::Error);
apperr_impl!(uuid::Error);

pub struct Markdown<T>(pub T);

impl<T> Markdown<T>
where
    T: Deref<Target = str>,
{
    pub fn to_html(&self) -> String {
        let mut html_output = String::new();
        pulldown_cmark::html::push_html(&mut html_output, pulldown_cmark::Parser::new(&self.0));
        html_output
    }
}

impl<T> IntoResponse for Markdown<T>
where
    T: Deref<Target = str>,
{
    fn into_response(self) -> Response {
        Html(self.to_html()).into_response()
    }
}

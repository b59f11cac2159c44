use axum::{
    debug_handler,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use sqlx::SqlitePool;
use tower_sessions::Session;
use tracing::warn;

use crate::{AppResult, session, session::Visitor, store};

/// Account removal. The store deletes the user's posts and every
/// comment touching them in the same transaction.
#[debug_handler]
pub(crate) async fn delete_account(
    State(db_pool): State<SqlitePool>,
    visitor: Visitor,
    session: Session,
) -> AppResult<Response> {
    let user_id = visitor.require()?;

    store::users::delete(&db_pool, user_id).await?;
    session.clear().await;

    warn!(%user_id, "account deleted");
    session::flash(&session, "Your account and its posts have been deleted.").await?;
    Ok(Redirect::to("/register").into_response())
}

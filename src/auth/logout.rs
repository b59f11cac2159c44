use axum::{debug_handler, response::Redirect};
use tower_sessions::Session;

use crate::{AppResult, session};

#[debug_handler]
pub(crate) async fn logout(session: Session) -> AppResult<Redirect> {
    session.clear().await;
    session::flash(&session, "You have been logged out.").await?;
    Ok(Redirect::to("/login"))
}

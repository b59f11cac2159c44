use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;
use uuid::Uuid;

use crate::{AppError, AppResult};

pub const USER_ID: &str = "user_id";
const NOTICE: &str = "notice";

/// Who the request is acting as, read from the session exactly once.
/// Handlers take this as an argument and pass the id on explicitly
/// instead of poking at the session themselves.
#[derive(Debug, Clone, Copy)]
pub struct Visitor(pub Option<Uuid>);

impl Visitor {
    pub fn require(self) -> AppResult<Uuid> {
        self.0.ok_or(AppError::Unauthenticated)
    }
}

impl<S> FromRequestParts<S> for Visitor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| AppError::from(msg))?;
        Ok(Visitor(session.get::<Uuid>(USER_ID).await?))
    }
}

/// One transient notice per session, shown on the next page render.
pub async fn flash(session: &Session, notice: impl Into<String>) -> AppResult<()> {
    session.insert(NOTICE, notice.into()).await?;
    Ok(())
}

pub async fn take_notice(session: &Session) -> AppResult<String> {
    Ok(session.remove::<String>(NOTICE).await?.unwrap_or_default())
}

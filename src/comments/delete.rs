use axum::{
    debug_handler,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use sqlx::SqlitePool;
use tower_sessions::Session;
use uuid::Uuid;

use crate::{AppError, AppResult, session, session::Visitor, store};

/// Only the comment's author may delete it.
#[debug_handler]
pub(crate) async fn delete_comment(
    State(db_pool): State<SqlitePool>,
    visitor: Visitor,
    session: Session,
    Path(comment_id): Path<Uuid>,
) -> AppResult<Response> {
    let user_id = visitor.require()?;
    let comment = store::comments::get(&db_pool, comment_id).await?;

    match store::comments::delete(&db_pool, comment_id, user_id).await {
        Ok(post_id) => {
            session::flash(&session, "Successfully Deleted").await?;
            Ok(Redirect::to(&format!("/viewpost/{post_id}")).into_response())
        }
        Err(AppError::Unauthorized) => {
            session::flash(&session, "Unauthorized access!").await?;
            Ok(Redirect::to(&format!("/viewpost/{}", comment.post_id)).into_response())
        }
        Err(err) => Err(err),
    }
}

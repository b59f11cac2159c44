mod delete;
mod edit;

use axum::{
    Router,
    routing::{get, post},
};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/edit_comment/{id}",
            get(edit::edit_comment_page).post(edit::edit_comment),
        )
        .route("/comments/{id}/delete", post(delete::delete_comment))
}

mod edit;
mod index;
mod new;
mod view;

use axum::{Router, routing::get};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index::index))
        .route("/createpost", get(new::create_post_page).post(new::create_post))
        .route("/viewpost/{id}", get(view::view_post).post(view::add_comment))
        .route("/edit_post/{id}", get(edit::edit_post_page).post(edit::edit_post))
}

//! The CRUD layer. All reads and writes for users, posts and comments
//! live here; ownership checks on mutation do too, so a handler can't
//! forget one. Handlers only translate forms and sessions into calls.

pub mod comments;
pub mod posts;
pub mod users;

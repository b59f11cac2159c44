//! The whole happy path, end to end against the store: register, log
//! in, post, comment, rewrite the comment, read it back.

use quillpost::auth::{hash_password, verify_password};
use quillpost::db;
use quillpost::store::{comments, posts, users};

#[tokio::test]
async fn register_login_post_comment_edit_view() {
    let db_pool = db::connect_in_memory().await.unwrap();

    let hash = hash_password("pw1").unwrap();
    users::create(&db_pool, "alice", "alice@example.com", &hash)
        .await
        .unwrap();

    // login: look the user up and check the password
    let alice = users::by_username(&db_pool, "alice").await.unwrap().unwrap();
    assert!(verify_password("pw1", &alice.password_hash).unwrap());

    let post_id = posts::create(&db_pool, "Hi", "World", alice.id).await.unwrap();
    let comment_id = comments::create(&db_pool, post_id, "Nice!", alice.id)
        .await
        .unwrap();
    comments::update(&db_pool, comment_id, "Nicer!", alice.id)
        .await
        .unwrap();

    let post = posts::get(&db_pool, post_id).await.unwrap();
    assert_eq!(post.title, "Hi");
    assert_eq!(post.content, "World");
    assert_eq!(post.user_id, alice.id);

    let all = comments::for_post(&db_pool, post_id).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].content, "Nicer!");
    assert_eq!(all[0].user_id, alice.id);
    assert_eq!(all[0].post_id, post_id);
}

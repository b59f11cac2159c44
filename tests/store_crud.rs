use quillpost::auth::{hash_password, verify_password};
use quillpost::db;
use quillpost::session::Visitor;
use quillpost::store::{comments, posts, users};
use quillpost::{AppError, store::users::User};
use sqlx::SqlitePool;
use uuid::Uuid;

async fn pool() -> SqlitePool {
    db::connect_in_memory().await.unwrap()
}

async fn add_user(db_pool: &SqlitePool, username: &str) -> User {
    users::create(db_pool, username, &format!("{username}@example.com"), "hash")
        .await
        .unwrap()
}

async fn user_count(db_pool: &SqlitePool) -> i64 {
    sqlx::query_as::<_, (i64,)>("SELECT COUNT(*) FROM users")
        .fetch_one(db_pool)
        .await
        .unwrap()
        .0
}

#[tokio::test]
async fn duplicate_username_is_a_conflict() {
    let db_pool = pool().await;
    add_user(&db_pool, "alice").await;

    let err = users::create(&db_pool, "alice", "other@example.com", "hash2")
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));
    assert_eq!(user_count(&db_pool).await, 1);
}

#[tokio::test]
async fn wrong_password_never_verifies() {
    let hash = hash_password("pw1").unwrap();
    assert!(verify_password("pw1", &hash).unwrap());
    assert!(!verify_password("pw2", &hash).unwrap());
    assert!(!verify_password("", &hash).unwrap());
}

#[tokio::test]
async fn anonymous_visitor_is_rejected_before_any_write() {
    // Handlers gate on this before touching the store, so an anonymous
    // post creation never reaches posts::create.
    let err = Visitor(None).require().unwrap_err();
    assert!(matches!(err, AppError::Unauthenticated));
}

#[tokio::test]
async fn non_owner_cannot_edit_post() {
    let db_pool = pool().await;
    let alice = add_user(&db_pool, "alice").await;
    let mallory = add_user(&db_pool, "mallory").await;
    let post_id = posts::create(&db_pool, "Hi", "World", alice.id).await.unwrap();

    let err = posts::update(&db_pool, post_id, "Hacked", "Gotcha", mallory.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized));

    let post = posts::get(&db_pool, post_id).await.unwrap();
    assert_eq!(post.title, "Hi");
    assert_eq!(post.content, "World");
}

#[tokio::test]
async fn empty_title_edit_is_rejected() {
    let db_pool = pool().await;
    let alice = add_user(&db_pool, "alice").await;
    let post_id = posts::create(&db_pool, "Hi", "World", alice.id).await.unwrap();

    let err = posts::update(&db_pool, post_id, "   ", "new content", alice.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let post = posts::get(&db_pool, post_id).await.unwrap();
    assert_eq!(post.title, "Hi");
    assert_eq!(post.content, "World");
}

#[tokio::test]
async fn editing_a_missing_post_is_not_found() {
    let db_pool = pool().await;
    let alice = add_user(&db_pool, "alice").await;

    let err = posts::update(&db_pool, Uuid::now_v7(), "a", "b", alice.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn deleting_a_user_cascades_through_posts_and_comments() {
    let db_pool = pool().await;
    let alice = add_user(&db_pool, "alice").await;
    let bob = add_user(&db_pool, "bob").await;

    let alice_post = posts::create(&db_pool, "Hi", "World", alice.id).await.unwrap();
    let bob_post = posts::create(&db_pool, "Hello", "There", bob.id).await.unwrap();
    comments::create(&db_pool, alice_post, "first", bob.id).await.unwrap();
    comments::create(&db_pool, alice_post, "second", alice.id).await.unwrap();
    comments::create(&db_pool, bob_post, "from alice", alice.id).await.unwrap();

    users::delete(&db_pool, alice.id).await.unwrap();

    assert!(matches!(
        posts::get(&db_pool, alice_post).await.unwrap_err(),
        AppError::NotFound
    ));
    // bob's post survives, but alice's comment on it is gone too
    assert!(posts::get(&db_pool, bob_post).await.is_ok());
    assert!(comments::for_post(&db_pool, bob_post).await.unwrap().is_empty());

    let orphans: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM comments")
        .fetch_one(&db_pool)
        .await
        .unwrap();
    assert_eq!(orphans.0, 0);
}

#[tokio::test]
async fn deleting_a_missing_user_is_not_found() {
    let db_pool = pool().await;
    let err = users::delete(&db_pool, Uuid::now_v7()).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn deleting_a_post_removes_its_comments() {
    let db_pool = pool().await;
    let alice = add_user(&db_pool, "alice").await;
    let post_id = posts::create(&db_pool, "Hi", "World", alice.id).await.unwrap();
    let comment_id = comments::create(&db_pool, post_id, "bye", alice.id).await.unwrap();

    posts::delete(&db_pool, post_id).await.unwrap();

    assert!(matches!(
        comments::get(&db_pool, comment_id).await.unwrap_err(),
        AppError::NotFound
    ));
}

#[tokio::test]
async fn comment_delete_requires_the_author() {
    let db_pool = pool().await;
    let bob = add_user(&db_pool, "bob").await;
    let mallory = add_user(&db_pool, "mallory").await;
    let post_id = posts::create(&db_pool, "Hi", "World", bob.id).await.unwrap();
    let comment_id = comments::create(&db_pool, post_id, "mine", bob.id).await.unwrap();

    let err = comments::delete(&db_pool, comment_id, mallory.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized));
    assert!(comments::get(&db_pool, comment_id).await.is_ok());

    let parent = comments::delete(&db_pool, comment_id, bob.id).await.unwrap();
    assert_eq!(parent, post_id);
    assert!(matches!(
        comments::get(&db_pool, comment_id).await.unwrap_err(),
        AppError::NotFound
    ));
}

#[tokio::test]
async fn blank_or_orphan_comments_are_rejected() {
    let db_pool = pool().await;
    let alice = add_user(&db_pool, "alice").await;
    let post_id = posts::create(&db_pool, "Hi", "World", alice.id).await.unwrap();

    let err = comments::create(&db_pool, post_id, "   ", alice.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));

    let err = comments::create(&db_pool, Uuid::now_v7(), "hello", alice.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound));

    assert!(comments::for_post(&db_pool, post_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn non_author_cannot_edit_comment() {
    let db_pool = pool().await;
    let bob = add_user(&db_pool, "bob").await;
    let mallory = add_user(&db_pool, "mallory").await;
    let post_id = posts::create(&db_pool, "Hi", "World", bob.id).await.unwrap();
    let comment_id = comments::create(&db_pool, post_id, "mine", bob.id).await.unwrap();

    let err = comments::update(&db_pool, comment_id, "yours now", mallory.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Unauthorized));
    assert_eq!(
        comments::get(&db_pool, comment_id).await.unwrap().content,
        "mine"
    );
}

#[tokio::test]
async fn post_listing_is_newest_first() {
    let db_pool = pool().await;
    let alice = add_user(&db_pool, "alice").await;
    posts::create(&db_pool, "first", "a", alice.id).await.unwrap();
    posts::create(&db_pool, "second", "b", alice.id).await.unwrap();

    let titles: Vec<String> = posts::all(&db_pool)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.title)
        .collect();
    assert_eq!(titles, ["second", "first"]);
}

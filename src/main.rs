use axum::Router;
use quillpost::{AppState, auth, comments, db, posts};
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer, cookie::SameSite};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(30)));

    let db_pool = db::connect(dotenv::var("DATABASE_URL")?.as_str()).await?;
    db::init_schema(&db_pool).await?;

    let app_state = AppState { db_pool };

    let app = Router::new()
        .merge(auth::router())
        .merge(posts::router())
        .merge(comments::router())
        .with_state(app_state)
        .layer(session_layer);

    let addr = dotenv::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_owned());
    info!(%addr, "listening");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

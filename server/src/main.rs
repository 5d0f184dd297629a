use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use server::database::{self, PgStore};
use server::routes;
use server::settings::Settings;
use store::storage::MemoryStore;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "server=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::new()?;

    let pool = database::connect(&settings.database).await?;
    database::migrate(&pool).await?;

    let store: Arc<dyn MemoryStore> = Arc::new(PgStore::new(pool));
    let app = routes::router(store);

    let addr = settings.http.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("listening on {addr}");
    axum::serve(listener, app).await?;

    Ok(())
}

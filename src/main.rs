use std::sync::Arc;

use places::auth::TrustedHeaderAuthenticator;
use places::config::Config;
use places::db::{DynStore, MemoryPlaceStore, PgPlaceStore};
use places::engine::Engine;
use places::error::Error;
use places::server::serve;

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;

    let store: DynStore = match &config.database_url {
        Some(url) => Arc::new(PgPlaceStore::new(url, config.max_connections).await?),
        None => {
            tracing::warn!("DATABASE_URL not set, places are kept in memory");
            Arc::new(MemoryPlaceStore::new())
        }
    };

    let engine = Engine::new(store)?;

    serve(config.bind_addr, engine, TrustedHeaderAuthenticator).await
}

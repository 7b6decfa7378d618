use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use assessment_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    middleware::cors::frontend_cors,
    routes,
    store::{postgres::PgStore, Store},
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let store: Arc<dyn Store> = Arc::new(PgStore::new(pool));
    let app_state = AppState::new(store.clone(), config);

    // Expired sessions already fail resolution; the sweeper only reclaims
    // their rows.
    {
        let store = store.clone();
        let interval = Duration::from_secs(config.session_sweep_interval_secs);
        tokio::spawn(async move {
            loop {
                tokio::time::sleep(interval).await;
                match store.delete_expired_sessions(Utc::now()).await {
                    Ok(0) => {}
                    Ok(swept) => info!(swept, "Removed expired sessions"),
                    Err(e) => error!(error = ?e, "Session sweep failed"),
                }
            }
        });
    }

    let app = routes::router(app_state)
        .layer(frontend_cors(&config.frontend_origin)?)
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

use anyhow::Context;
use tokio::net::TcpListener;

use review_scheduler::{
    app,
    config::Config,
    db::{self, ConnectionOptions},
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().context("Invalid configuration")?;

    let pool = db::build_pool(
        &config.database_url,
        config.pool_size,
        ConnectionOptions {
            busy_timeout: config.busy_timeout,
        },
    )
    .context("Failed to create DB pool")?;

    {
        let mut conn = pool.get().context("Failed to get DB connection")?;
        db::run_migrations(&mut conn).context("Failed to create database schema")?;
    }

    let app = app(AppState::new(pool, config.schedule_limits));

    let listener = TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    log::info!("Review scheduler listening on http://{}", config.bind_addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

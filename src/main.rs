use anyhow::Context;
use coursedesk::configuration::get_configuration;
use coursedesk::server::config::configure_app;
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    dotenvy::dotenv().ok();

    let settings = get_configuration().context("failed to load configuration")?;
    // Without Supabase credentials every panel is dead weight; refuse to start.
    settings
        .ensure_credentials()
        .context("missing Supabase credentials")?;

    let app = configure_app(&settings);

    let addr: SocketAddr = format!(
        "{}:{}",
        settings.application.host, settings.application.port
    )
    .parse()
    .context("invalid listen address")?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("failed to bind listener")?;
    info!("Starting server on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}

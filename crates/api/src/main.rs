use anyhow::Context;

use tokengate_api::config::GateConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tokengate_observability::init();

    let config = GateConfig::from_env().context("invalid configuration")?;
    tracing::info!(enforcement = %config.enforcement, "starting tokengate");

    let app = tokengate_api::app::build_app(&config);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

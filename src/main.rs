use dotenvy::dotenv;
use tokengate::logging::init_tracing;
use tokengate::metrics::{init_metrics, metrics_app};
use tokengate::router::init_router;
use tokengate::state::init_app_state;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let metrics_handle = init_metrics()?;
    let state = init_app_state().await?;
    let address = state.server_config.bind_address();

    let mut app = init_router(state);
    if let Some(handle) = metrics_handle {
        app = app.merge(metrics_app(handle));
    }

    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!(address = %address, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, router};
use rxsum_core::SummaryService;

/// Main entry point for the rxsum application
///
/// Starts the REST server with the summary engine wired into request state.
/// The engine is pure and stateless, so a single instance is constructed at
/// startup and cloned into the router state; no process-wide service
/// instance exists.
///
/// # Environment Variables
/// - `RXSUM_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If server startup or runtime fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("rxsum=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("RXSUM_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    tracing::info!("++ Starting rxsum REST on {}", rest_addr);

    let summary_service = SummaryService::new();
    let app = router(AppState { summary_service });

    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

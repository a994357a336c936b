use chirp_web::config::get_configuration;
use chirp_web::startup::Application;
use dotenvy::dotenv;
use service_core::observability::{init_metrics, init_tracing, shutdown_tracing};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let configuration = get_configuration().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(
        "chirp-web",
        &configuration.telemetry.log_level,
        configuration.telemetry.otlp_endpoint.as_deref(),
    )?;
    init_metrics()?;

    let application = Application::build(configuration.clone()).await?;

    info!(
        "Starting chirp-web on {}:{} (assets from {})",
        configuration.server.host,
        application.port(),
        configuration.assets.root.display()
    );

    let result = application.run_until_stopped().await;
    shutdown_tracing();

    result.map_err(|e| {
        tracing::error!("Server error: {}", e);
        anyhow::anyhow!("Server error: {}", e)
    })
}

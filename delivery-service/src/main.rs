use delivery_service::{config::Config, services::metrics, startup::Application};
use service_core::observability::logging::init_tracing;

#[tokio::main]
async fn main() -> Result<(), service_core::error::AppError> {
    // Load configuration - fail fast if invalid
    let config = Config::from_env()?;

    init_tracing(&config.service_name, &config.log_level);
    metrics::init_metrics();

    tracing::info!(
        service = %config.service_name,
        environment = ?config.environment,
        "Starting delivery service"
    );

    let app = Application::build(config).await?;
    app.run_until_stopped().await?;

    tracing::info!("Service shutdown complete");
    Ok(())
}

use dotenvy::dotenv;
use payment_page::config::get_configuration;
use payment_page::services::init_metrics;
use payment_page::Application;
use service_core::observability::logging::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let settings = get_configuration().map_err(|e| {
        eprintln!("Failed to read configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(
        "payment-page",
        &settings.telemetry.log_level,
        settings.telemetry.otlp_endpoint.as_deref(),
    )?;

    init_metrics();

    let application = Application::build(settings).await?;
    application.run_until_stopped().await?;

    Ok(())
}

use actix_web::{middleware, web, App, HttpServer};
use anyhow::Result;
use loan_documents::api::{configure_routes, ApiState};
use loan_documents::core::{GeneratorConfig, ServerConfig};
use tracing_actix_web::TracingLogger;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    tracing::info!("Starting Loan Documents API");

    // Process metrics on the default registry, next to the service counters
    prometheus::default_registry()
        .register(Box::new(prometheus::process_collector::ProcessCollector::for_self()))?;

    let generator_config = GeneratorConfig::from_env()?;
    let server_config = ServerConfig::from_env()?;

    let state = web::Data::new(ApiState::from_config(&generator_config)?);

    tracing::info!("Starting server on {}:{}", server_config.host, server_config.port);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(TracingLogger::default())
            .wrap(middleware::NormalizePath::trim())
            .configure(configure_routes)
    })
    .bind((server_config.host.as_str(), server_config.port))?
    .run()
    .await?;

    Ok(())
}

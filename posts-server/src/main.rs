use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenvy::dotenv;
use std::sync::Arc;

use posts_server::application::PostService;
use posts_server::data::PostgrestClient;
use posts_server::infrastructure::{config::AppConfig, logging::init_logging};
use posts_server::presentation::{http_handlers, middleware::configure_cors};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    init_logging()?;

    let config = AppConfig::from_env()?;
    let http_addr = config.http_addr();

    tracing::info!("Starting posts gateway...");
    tracing::info!("HTTP server will listen on {}", http_addr);
    tracing::info!("Data service: {}", config.data_service.base_url);
    tracing::info!(
        "CORS allowed origins: {}",
        config.cors_allowed_origins.join(",")
    );

    let data_service = Arc::new(PostgrestClient::new(
        config.data_service.base_url.clone(),
        config.data_service.api_key.clone(),
    )?);
    let post_service = Arc::new(PostService::new(data_service));

    run_http_server(http_addr, post_service, config.cors_allowed_origins).await?;

    tracing::info!("Shutting down...");
    Ok(())
}

async fn run_http_server(
    addr: String,
    post_service: Arc<PostService>,
    cors_allowed_origins: Vec<String>,
) -> anyhow::Result<()> {
    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(configure_cors(&cors_allowed_origins))
            .app_data(web::Data::new(post_service.clone()))
            .configure(http_handlers::configure_routes)
    })
    .bind(&addr)?
    .run();

    tracing::info!("HTTP server running on {}", addr);

    server.await?;

    Ok(())
}

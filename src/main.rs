use std::net::SocketAddr;
use std::sync::Arc;

use roomviz::{api, config, room, OpenAIImageClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    config::Config::dotenv_load();
    let config = config::Config::new().map_err(|e| {
        tracing::error!("OPENAI_API_KEY must be set: {}", e);
        e
    })?;
    config.log_settings();

    let gateway = OpenAIImageClient::new(
        config.openai_base_url.clone(),
        config.openai_api_key.clone(),
        config.image_model.clone(),
        config.generation_timeout(),
    );
    let state = Arc::new(api::routes::AppState {
        gateway: Arc::new(gateway),
        validator: room::RoomValidator::new(config.validation_policy()),
    });
    let app = api::routes::router(state);

    // Run with safe parsing of the listen address
    let host_str = config.api_host.clone();
    let port_str = config.api_port.clone();
    let ip: std::net::IpAddr = host_str.parse().unwrap_or_else(|_| {
        tracing::warn!("Invalid API_HOST '{}', falling back to 127.0.0.1", host_str);
        std::net::IpAddr::from([127, 0, 0, 1])
    });
    let port: u16 = port_str.parse().unwrap_or_else(|_| {
        tracing::warn!("Invalid API_PORT '{}', falling back to 3000", port_str);
        3000
    });
    let socket_address = SocketAddr::new(ip, port);
    tracing::info!("listening on {}", socket_address);
    axum::Server::bind(&socket_address)
        .serve(app.into_make_service())
        .await?;
    Ok(())
}

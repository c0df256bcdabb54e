//! Service entry point

use assistant::AssistantConfig;
use sitemuse::{router, AppState, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let server_config = ServerConfig::from_env();
    let state = AppState::new(AssistantConfig::from_env())?;
    let app = router(state, &server_config.static_dir);

    let addr = server_config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::info!("sitemuse listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

use sweeper_server::config::ServerConfig;
use tracing::info;

#[rocket::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    info!("🚀 Starting Minesweeper server");

    let rocket = sweeper_server::build(ServerConfig::from_env())?;

    info!("📡 Endpoints: POST /games, GET /games/<id>, POST /games/<id>/moves, POST /games/<id>/end");
    rocket.launch().await?;
    Ok(())
}

use dioxus_logger::tracing::{self, Level};
use trustlist::server::{config::Config, router, startup};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    if let Err(e) = dioxus_logger::init(Level::INFO) {
        eprintln!("Failed to initialize logger: {}", e);
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = serve(&config).await {
        tracing::error!("Server stopped: {}", e);
        std::process::exit(1);
    }
}

async fn serve(config: &Config) -> Result<(), trustlist::server::error::Error> {
    let state = startup::build_state(config).await?;
    let app = router::routes().with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;

    tracing::info!("Starting server on {}", config.listen_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

use tracing::{error, info};

use gatehouse::{Config, Database, WebServer};

#[tokio::main]
async fn main() {
    // Load configuration
    let config = match Config::load_with_env("config.toml") {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config.toml: {e}");
            eprintln!("Using default configuration.");
            let mut config = Config::default();
            if let Err(e) = config.apply_env_overrides() {
                eprintln!("Invalid environment override: {e}");
                std::process::exit(1);
            }
            config
        }
    };

    // Initialize logging
    if let Err(e) = gatehouse::logging::init(&config.logging) {
        eprintln!("Failed to initialize logging: {e}");
        // Fall back to console-only logging
        gatehouse::logging::init_console_only(&config.logging.level);
    }

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    info!("Gatehouse authentication service");
    info!(
        "Server configured on {}:{} ({})",
        config.server.host, config.server.port, config.server.environment
    );

    let db = match Database::open(&config.database.url).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to open database: {}", e);
            std::process::exit(1);
        }
    };

    let server = match WebServer::new(&config, db) {
        Ok(server) => server,
        Err(e) => {
            error!("Failed to configure web server: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run().await {
        error!("Web server error: {}", e);
        std::process::exit(1);
    }
}

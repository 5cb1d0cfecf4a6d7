use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::server::{config::Config, error::Error, model::app::AppState};

/// Build the ESI client pointed at the configured ESI URL, with SSO settings when configured
pub fn build_esi_client(config: &Config) -> Result<eve_esi::Client, Error> {
    let esi_config = eve_esi::Config::builder()
        .esi_url(&config.esi_url)
        .build()?;

    let mut builder = eve_esi::Client::builder()
        .config(esi_config)
        .user_agent(&config.user_agent);

    // eve_esi rejects a partial SSO setup, so a missing setting surfaces at startup
    if let Some(client_id) = &config.esi_client_id {
        builder = builder.client_id(client_id);
    }
    if let Some(client_secret) = &config.esi_client_secret {
        builder = builder.client_secret(client_secret);
    }
    if let Some(callback_url) = &config.esi_callback_url {
        builder = builder.callback_url(callback_url);
    }

    let esi_client = builder.build()?;

    Ok(esi_client)
}

/// HTTP client for ESI endpoints the ESI client does not cover, sending the same user agent
pub fn build_http_client(config: &Config) -> Result<reqwest::Client, Error> {
    let http_client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .build()?;

    Ok(http_client)
}

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Build everything the handlers share
pub async fn build_state(config: &Config) -> Result<AppState, Error> {
    Ok(AppState {
        db: connect_to_database(config).await?,
        esi_client: build_esi_client(config)?,
        http_client: build_http_client(config)?,
        esi_url: config.esi_url.clone(),
    })
}

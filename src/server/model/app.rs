use sea_orm::DatabaseConnection;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub esi_client: eve_esi::Client,
    /// Client for ESI endpoints not covered by `esi_client`
    pub http_client: reqwest::Client,
    pub esi_url: String,
}

impl From<(DatabaseConnection, eve_esi::Client, String)> for AppState {
    fn from((db, esi_client, esi_url): (DatabaseConnection, eve_esi::Client, String)) -> Self {
        Self {
            db,
            esi_client,
            http_client: reqwest::Client::new(),
            esi_url,
        }
    }
}

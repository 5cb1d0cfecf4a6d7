//! Test context returned by [`TestBuilder`](crate::TestBuilder).
//!
//! Bundles an in-memory SQLite database, a mockito server standing in for ESI and an ESI client
//! pointed at that server.

use mockito::{Mock, Server, ServerGuard};
use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};

use crate::{
    constant::{TEST_CALLBACK_URL, TEST_ESI_CLIENT_ID, TEST_ESI_CLIENT_SECRET, TEST_USER_AGENT},
    error::TestError,
};

/// ```ignore
/// let mut test = TestBuilder::new().with_trust_tables().build().await?;
///
/// test.trust().insert_trusted_character(2114794365, 98000001, true).await?;
/// let state: AppState = test.to_app_state();
///
/// test.assert_mocks();
/// ```
pub struct TestContext {
    /// Database connection to in-memory SQLite database
    pub db: DatabaseConnection,
    /// ESI client configured to use mock server
    pub esi_client: eve_esi::Client,
    /// Base URL of the mock ESI server
    pub esi_url: String,

    pub(crate) server: ServerGuard,
    pub(crate) mocks: Vec<Mock>,
}

impl TestContext {
    /// Convert database, ESI client and ESI URL into any type constructible from them
    ///
    /// Keeps the test-utils crate free of a dependency on the application crate.
    pub fn to_app_state<T>(&self) -> T
    where
        T: From<(DatabaseConnection, eve_esi::Client, String)>,
    {
        T::from((
            self.db.clone(),
            self.esi_client.clone(),
            self.esi_url.clone(),
        ))
    }

    /// Direct access to the mock server for endpoints the fixtures don't cover
    pub fn server(&mut self) -> &mut ServerGuard {
        &mut self.server
    }

    pub(crate) async fn new() -> Result<Self, TestError> {
        let mock_server = Server::new_async().await;
        let mock_server_url = mock_server.url();

        let esi_config = eve_esi::Config::builder()
            .esi_url(&mock_server_url)
            .token_url(&format!("{}/v2/oauth/token", mock_server_url))
            .jwk_url(&format!("{}/oauth/jwks", mock_server_url))
            .build()?;

        let esi_client = eve_esi::Client::builder()
            .config(esi_config)
            .user_agent(TEST_USER_AGENT)
            .client_id(TEST_ESI_CLIENT_ID)
            .client_secret(TEST_ESI_CLIENT_SECRET)
            .callback_url(TEST_CALLBACK_URL)
            .build()?;

        let db = Database::connect("sqlite::memory:").await?;

        Ok(TestContext {
            server: mock_server,
            db,
            esi_client,
            esi_url: mock_server_url,
            mocks: Vec::new(),
        })
    }

    pub(crate) async fn with_tables(
        &self,
        stmts: Vec<TableCreateStatement>,
    ) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Assert all mock endpoints were called as expected.
    ///
    /// # Panics
    /// Panics if any mock endpoint was not called the expected number of times
    pub fn assert_mocks(&self) {
        for mock in &self.mocks {
            mock.assert();
        }
    }
}

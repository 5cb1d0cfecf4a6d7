//! Declarative test builder.
//!
//! Configuration methods queue work; tables, rows and mock endpoints are all created during the
//! final `build()` call.

use eve_esi::model::{alliance::Alliance, character::Character, corporation::Corporation};
use mockito::Mock;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};
use serde_json::Value;

use crate::{error::TestError, TestContext};

/// Builder for declarative test initialization.
///
/// Sets up database tables, trust-list rows and mock ESI endpoints, finalized with `build()`.
pub struct TestBuilder {
    // Tables to create
    tables: Vec<TableCreateStatement>,
    include_trust_tables: bool,

    // Database fixtures to insert
    trusted_characters: Vec<(i64, i64, bool)>, // (character_id, corporation_id, trusted)
    trusted_corporations: Vec<(i64, Option<i64>, bool)>, // (corporation_id, alliance_id, trusted)

    // Mock endpoints to create
    mock_builders: Vec<Box<dyn FnOnce(&mut mockito::ServerGuard) -> Mock>>,

    alliance_endpoints: Vec<(i64, Alliance, usize)>,
    corporation_endpoints: Vec<(i64, Corporation, usize)>,
    character_endpoints: Vec<(i64, Character, usize)>,
    universe_ids_endpoints: Vec<(String, Value, usize)>,
}

impl TestBuilder {
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            include_trust_tables: false,
            trusted_characters: Vec::new(),
            trusted_corporations: Vec::new(),
            mock_builders: Vec::new(),
            alliance_endpoints: Vec::new(),
            corporation_endpoints: Vec::new(),
            character_endpoints: Vec::new(),
            universe_ids_endpoints: Vec::new(),
        }
    }

    /// Add the `trusted_character` and `trusted_corporation` tables.
    pub fn with_trust_tables(mut self) -> Self {
        self.include_trust_tables = true;
        self
    }

    /// Add a custom entity table to the test database.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use trustlist_test_utils::TestBuilder;
    /// use entity::prelude::*;
    ///
    /// # async fn example() -> Result<(), trustlist_test_utils::TestError> {
    /// let test = TestBuilder::new()
    ///     .with_table(TrustedCharacter)
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Insert a character row into the trusted (`true`) or untrusted (`false`) list.
    ///
    /// Requires the trust tables.
    pub fn with_trusted_character(
        mut self,
        character_id: i64,
        corporation_id: i64,
        trusted: bool,
    ) -> Self {
        self.trusted_characters
            .push((character_id, corporation_id, trusted));
        self
    }

    /// Insert a corporation row into the trusted (`true`) or untrusted (`false`) list.
    ///
    /// Requires the trust tables.
    pub fn with_trusted_corporation(
        mut self,
        corporation_id: i64,
        alliance_id: Option<i64>,
        trusted: bool,
    ) -> Self {
        self.trusted_corporations
            .push((corporation_id, alliance_id, trusted));
        self
    }

    /// Mock `GET /alliances/{alliance_id}`, expected `expected_requests` times.
    pub fn with_alliance_endpoint(
        mut self,
        alliance_id: i64,
        alliance: Alliance,
        expected_requests: usize,
    ) -> Self {
        self.alliance_endpoints
            .push((alliance_id, alliance, expected_requests));
        self
    }

    /// Mock `GET /corporations/{corporation_id}`, expected `expected_requests` times.
    pub fn with_corporation_endpoint(
        mut self,
        corporation_id: i64,
        corporation: Corporation,
        expected_requests: usize,
    ) -> Self {
        self.corporation_endpoints
            .push((corporation_id, corporation, expected_requests));
        self
    }

    /// Mock `GET /characters/{character_id}`, expected `expected_requests` times.
    pub fn with_character_endpoint(
        mut self,
        character_id: i64,
        character: Character,
        expected_requests: usize,
    ) -> Self {
        self.character_endpoints
            .push((character_id, character, expected_requests));
        self
    }

    /// Mock `POST /universe/ids/` for a lookup of `name`.
    ///
    /// Build `body` with [`factory::mock_universe_ids`](crate::fixtures::eve::factory::mock_universe_ids).
    pub fn with_universe_ids_endpoint(
        mut self,
        name: impl Into<String>,
        body: Value,
        expected_requests: usize,
    ) -> Self {
        self.universe_ids_endpoints
            .push((name.into(), body, expected_requests));
        self
    }

    /// Add a custom mock endpoint with full control over the mock server.
    pub fn with_mock_endpoint<F>(mut self, setup: F) -> Self
    where
        F: FnOnce(&mut mockito::ServerGuard) -> Mock + 'static,
    {
        self.mock_builders.push(Box::new(setup));
        self
    }

    /// Create all configured tables, rows and mock endpoints.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully configured test environment
    /// - `Err(TestError::DbErr)` - Table creation or row insertion failed
    /// - `Err(TestError::EsiError)` - Mock ESI client initialization failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new().await?;

        // 1. Create tables
        let mut all_tables = Vec::new();

        if self.include_trust_tables {
            let schema = Schema::new(sea_orm::DbBackend::Sqlite);
            all_tables.extend(vec![
                schema.create_table_from_entity(entity::prelude::TrustedCharacter),
                schema.create_table_from_entity(entity::prelude::TrustedCorporation),
            ]);
        }

        all_tables.extend(self.tables);
        setup.with_tables(all_tables).await?;

        // 2. Insert rows
        for (character_id, corporation_id, trusted) in self.trusted_characters {
            setup
                .trust()
                .insert_trusted_character(character_id, corporation_id, trusted)
                .await?;
        }

        for (corporation_id, alliance_id, trusted) in self.trusted_corporations {
            setup
                .trust()
                .insert_trusted_corporation(corporation_id, alliance_id, trusted)
                .await?;
        }

        // 3. Create mock endpoints
        // Custom endpoints go first so mockito matches an error mock before a success mock on
        // the same path.
        let mut mocks = Vec::new();

        for builder in self.mock_builders {
            mocks.push(builder(&mut setup.server));
        }

        for (alliance_id, alliance, expected) in self.alliance_endpoints {
            mocks.push(
                setup
                    .eve()
                    .create_alliance_endpoint(alliance_id, alliance, expected),
            );
        }

        for (corporation_id, corporation, expected) in self.corporation_endpoints {
            mocks.push(setup.eve().create_corporation_endpoint(
                corporation_id,
                corporation,
                expected,
            ));
        }

        for (character_id, character, expected) in self.character_endpoints {
            mocks.push(
                setup
                    .eve()
                    .create_character_endpoint(character_id, character, expected),
            );
        }

        for (name, body, expected) in self.universe_ids_endpoints {
            mocks.push(
                setup
                    .eve()
                    .create_universe_ids_endpoint(&name, body, expected),
            );
        }

        setup.mocks = mocks;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

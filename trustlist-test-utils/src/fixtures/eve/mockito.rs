//! Mock ESI endpoints registered on the test context's mockito server.
//!
//! Each mock verifies it was called exactly `expected_requests` times when
//! [`TestContext::assert_mocks`](crate::TestContext::assert_mocks) runs.

use eve_esi::model::{alliance::Alliance, character::Character, corporation::Corporation};
use mockito::{Matcher, Mock};
use serde_json::Value;

use crate::fixtures::eve::EveFixtures;

impl<'a> EveFixtures<'a> {
    /// `GET /characters/{character_id}` returning `mock_character`
    pub fn create_character_endpoint(
        &mut self,
        character_id: i64,
        mock_character: Character,
        expected_requests: usize,
    ) -> Mock {
        let url = format!("/characters/{}", character_id);

        self.json_endpoint("GET", &url, serde_json::to_string(&mock_character).unwrap())
            .expect(expected_requests)
            .create()
    }

    /// `GET /corporations/{corporation_id}` returning `mock_corporation`
    pub fn create_corporation_endpoint(
        &mut self,
        corporation_id: i64,
        mock_corporation: Corporation,
        expected_requests: usize,
    ) -> Mock {
        let url = format!("/corporations/{}", corporation_id);

        self.json_endpoint(
            "GET",
            &url,
            serde_json::to_string(&mock_corporation).unwrap(),
        )
        .expect(expected_requests)
        .create()
    }

    /// `GET /alliances/{alliance_id}` returning `mock_alliance`
    pub fn create_alliance_endpoint(
        &mut self,
        alliance_id: i64,
        mock_alliance: Alliance,
        expected_requests: usize,
    ) -> Mock {
        let url = format!("/alliances/{}", alliance_id);

        self.json_endpoint("GET", &url, serde_json::to_string(&mock_alliance).unwrap())
            .expect(expected_requests)
            .create()
    }

    /// `POST /universe/ids/` returning `body` for a lookup of `name`
    pub fn create_universe_ids_endpoint(
        &mut self,
        name: &str,
        body: Value,
        expected_requests: usize,
    ) -> Mock {
        self.json_endpoint("POST", "/universe/ids/", body.to_string())
            .match_body(Matcher::Json(Value::Array(vec![Value::String(
                name.to_string(),
            )])))
            .expect(expected_requests)
            .create()
    }

    /// Any path answering with a bare error status, for exercising failure and retry handling
    pub fn create_error_endpoint(
        &mut self,
        method: &str,
        path: &str,
        status_code: usize,
        expected_requests: usize,
    ) -> Mock {
        self.setup
            .server
            .mock(method, path)
            .with_status(status_code)
            .expect(expected_requests)
            .create()
    }

    fn json_endpoint(&mut self, method: &str, path: &str, body: String) -> Mock {
        self.setup
            .server
            .mock(method, path)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
    }
}

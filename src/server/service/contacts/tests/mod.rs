use std::time::Duration;

use mockito::Matcher;
use serde_json::json;
use trustlist_test_utils::prelude::*;

use super::*;


static ACCESS_TOKEN: &str = "character-access-token";

fn contacts<'a>(test: &'a TestContext, http_client: &'a reqwest::Client) -> ContactsService<'a> {
    ContactsService::new(&test.db, http_client, &test.esi_url)
        .with_retry(3, Duration::from_millis(1))
}

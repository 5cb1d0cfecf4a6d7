use std::time::Duration;

use trustlist_test_utils::prelude::*;

use super::*;


/// Directory over the test context's ESI mock, retrying with a 1ms backoff.
fn directory<'a>(test: &'a TestContext, http_client: &'a reqwest::Client) -> DirectoryService<'a> {
    DirectoryService::new(&test.esi_client, http_client, &test.esi_url)
        .with_retry(3, Duration::from_millis(1))
}

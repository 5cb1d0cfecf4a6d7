use std::time::Duration;

use trustlist_test_utils::prelude::*;

use crate::{
    model::trust::{EntityKind, IdentifierDto, ListKey, TrustState, TrustedEntityDto},
    server::{
        data::trust::character::TrustedCharacterRepository, error::trust::TrustError,
        service::directory::DirectoryService,
    },
};

use super::*;


fn trust_service<'a>(test: &'a TestContext, http_client: &'a reqwest::Client) -> TrustService<'a> {
    let directory = DirectoryService::new(&test.esi_client, http_client, &test.esi_url)
        .with_retry(2, Duration::from_millis(1));

    TrustService::new(&test.db, directory)
}

fn identifier(identifier: &str) -> IdentifierDto {
    IdentifierDto {
        identifier: identifier.to_string(),
        added_by: None,
    }
}

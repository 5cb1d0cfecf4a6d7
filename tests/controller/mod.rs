//! Tests for the trust-list and contacts HTTP endpoints.
//!
//! Handlers are called directly with extracted arguments, and through the router where path
//! and body extraction matter.

mod contacts;
mod router;
mod trust;

use axum::{body::to_bytes, response::Response};
use serde::de::DeserializeOwned;
use trustlist::server::model::app::AppState;
use trustlist_test_utils::prelude::*;

fn app_state(test: &TestContext) -> AppState {
    test.to_app_state()
}

async fn read_json<T: DeserializeOwned>(response: Response) -> T {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    serde_json::from_slice(&bytes).unwrap()
}

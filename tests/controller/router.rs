use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use tower::ServiceExt;
use trustlist::{
    model::{api::ErrorDto, trust::TrustedEntityDto},
    server::router::routes,
};

use super::*;

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Expect lowercase path segments to select the list
#[tokio::test]
async fn routes_add_by_path_segments() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_trust_tables()
        .with_corporation_endpoint(98785281, factory::mock_corporation(None, None), 1)
        .build()
        .await?;
    let app = routes().with_state(app_state(&test));

    let response = app
        .oneshot(post_json(
            "/api/trust/untrusted/corporation/add",
            r#"{"identifier":"98785281"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let entity: TrustedEntityDto = read_json(response).await;
    assert_eq!(entity.primary_id(), 98785281);
    test.assert_mocks();

    Ok(())
}

/// Expect an unknown trust state in the path to be rejected before reaching the handler
#[tokio::test]
async fn rejects_unknown_list() -> Result<(), TestError> {
    let test = TestBuilder::new().with_trust_tables().build().await?;
    let app = routes().with_state(app_state(&test));

    let response = app
        .oneshot(post_json(
            "/api/trust/neutral/character/add",
            r#"{"identifier":"1"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Expect the removal of a name to be answered with its JSON error body
#[tokio::test]
async fn answers_errors_as_json() -> Result<(), TestError> {
    let test = TestBuilder::new().with_trust_tables().build().await?;
    let app = routes().with_state(app_state(&test));

    let response = app
        .oneshot(post_json(
            "/api/trust/trusted/character/remove",
            r#"{"identifier":"Hyziri"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ErrorDto = read_json(response).await;
    assert_eq!(error.error, "Identifier must be a valid ID for removal: Hyziri");

    Ok(())
}

/// Expect the contacts routes to be mounted and to read the bearer token from the request
#[tokio::test]
async fn routes_contacts_with_bearer_token() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_trust_tables()
        .with_trusted_corporation(98785281, None, true)
        .with_mock_endpoint(|server| {
            server
                .mock("POST", "/characters/2114794365/contacts/")
                .match_query(mockito::Matcher::Any)
                .match_header("authorization", "Bearer token")
                .with_status(201)
                .with_header("content-type", "application/json")
                .with_body("[98785281]")
                .expect(1)
                .create()
        })
        .build()
        .await?;
    let app = routes().with_state(app_state(&test));

    let request = Request::builder()
        .method("POST")
        .uri("/api/contacts/add")
        .header("content-type", "application/json")
        .header("authorization", "Bearer token")
        .body(Body::from(r#"{"character_id":2114794365}"#))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    test.assert_mocks();

    Ok(())
}

/// Expect the contacts routes to reject a request without a bearer token
#[tokio::test]
async fn rejects_contacts_without_token() -> Result<(), TestError> {
    let test = TestBuilder::new().with_trust_tables().build().await?;
    let app = routes().with_state(app_state(&test));

    let response = app
        .oneshot(post_json(
            "/api/contacts/delete",
            r#"{"character_id":2114794365}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let error: ErrorDto = read_json(response).await;
    assert_eq!(error.error, "Missing ESI access token for the character");

    Ok(())
}

/// Expect the OpenAPI document to be served
#[tokio::test]
async fn serves_openapi_document() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;
    let app = routes().with_state(app_state(&test));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    Ok(())
}

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, HeaderValue, StatusCode},
    response::IntoResponse,
    Json,
};
use trustlist::{
    model::{
        api::{ErrorDto, MessageDto},
        trust::ContactsDto,
    },
    server::controller::contacts::{add_contacts, delete_contacts},
};

use super::*;

fn bearer(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    );
    headers
}

fn character(character_id: i64) -> Json<ContactsDto> {
    Json(ContactsDto { character_id })
}

mod add_contacts {
    use super::*;

    /// Expect 200 once the trusted entities are written to ESI
    #[tokio::test]
    async fn writes_trusted_contacts() -> Result<(), TestError> {
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

        let response = add_contacts(
            State(app_state(&test)),
            bearer("token"),
            character(2114794365),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let message: MessageDto = read_json(response).await;
        assert_eq!(message.message, "Contacts added successfully");
        test.assert_mocks();

        Ok(())
    }

    /// Expect 401 without an access token
    #[tokio::test]
    async fn requires_access_token() -> Result<(), TestError> {
        let test = TestBuilder::new().with_trust_tables().build().await?;

        let response = add_contacts(
            State(app_state(&test)),
            HeaderMap::new(),
            character(2114794365),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        Ok(())
    }

    /// Expect 502 carrying ESI's status when ESI refuses the contacts
    #[tokio::test]
    async fn reports_esi_refusal() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_trust_tables()
            .with_trusted_character(90000001, 98785281, true)
            .with_mock_endpoint(|server| {
                server
                    .mock("POST", "/characters/2114794365/contacts/")
                    .match_query(mockito::Matcher::Any)
                    .with_status(403)
                    .expect(1)
                    .create()
            })
            .build()
            .await?;

        let response = add_contacts(
            State(app_state(&test)),
            bearer("token"),
            character(2114794365),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let error: ErrorDto = read_json(response).await;
        assert_eq!(
            error.error,
            "Error adding contacts: ESI answered with status 403"
        );
        test.assert_mocks();

        Ok(())
    }
}

mod delete_contacts {
    use super::*;

    /// Expect 400 for a character ID that is not positive
    #[tokio::test]
    async fn rejects_invalid_character_id() -> Result<(), TestError> {
        let test = TestBuilder::new().with_trust_tables().build().await?;

        let response = delete_contacts(State(app_state(&test)), bearer("token"), character(-1))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ErrorDto = read_json(response).await;
        assert_eq!(error.error, "Invalid Character ID: -1");

        Ok(())
    }

    /// Expect 200 once the untrusted entities are removed on ESI
    #[tokio::test]
    async fn removes_untrusted_contacts() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_trust_tables()
            .with_trusted_character(90000001, 98785281, false)
            .with_mock_endpoint(|server| {
                server
                    .mock("DELETE", "/characters/2114794365/contacts/")
                    .match_query(mockito::Matcher::UrlEncoded(
                        "contact_ids".to_string(),
                        "90000001".to_string(),
                    ))
                    .with_status(204)
                    .expect(1)
                    .create()
            })
            .build()
            .await?;

        let response = delete_contacts(
            State(app_state(&test)),
            bearer("token"),
            character(2114794365),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let message: MessageDto = read_json(response).await;
        assert_eq!(message.message, "Contacts deleted successfully");
        test.assert_mocks();

        Ok(())
    }
}

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use trustlist::{
    model::{
        api::{ErrorDto, MessageDto},
        trust::{CommentDto, EntityKind, IdentifierDto, TrustListsDto, TrustState, TrustedEntityDto},
    },
    server::controller::trust::{add_entity, get_trust_lists, remove_entity, update_comment},
};

use super::*;

fn identifier(identifier: &str) -> Json<IdentifierDto> {
    Json(IdentifierDto {
        identifier: identifier.to_string(),
        added_by: Some("Operator".to_string()),
    })
}

mod get_trust_lists {
    use super::*;

    /// Expect 200 with every stored list
    #[tokio::test]
    async fn returns_all_lists() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_trust_tables()
            .with_trusted_character(1, 98000001, true)
            .with_trusted_corporation(98000002, Some(99000001), false)
            .build()
            .await?;

        let response = get_trust_lists(State(app_state(&test)))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let lists: TrustListsDto = read_json(response).await;
        assert_eq!(lists.trusted_characters.len(), 1);
        assert_eq!(lists.untrusted_corporations.len(), 1);
        assert_eq!(
            lists.untrusted_corporations[0].alliance_name.as_deref(),
            Some("Alliance 99000001")
        );

        Ok(())
    }

    /// Expect a generic 500 when the database is unusable
    #[tokio::test]
    async fn hides_database_errors() -> Result<(), TestError> {
        let test = TestBuilder::new().build().await?;

        let response = get_trust_lists(State(app_state(&test)))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let error: ErrorDto = read_json(response).await;
        assert_eq!(error.error, "Internal server error");

        Ok(())
    }
}

mod add_entity {
    use super::*;

    /// Expect 200 with the canonical character record
    #[tokio::test]
    async fn returns_canonical_record() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_trust_tables()
            .with_character_endpoint(2114794365, factory::mock_character(98785281, None), 1)
            .with_corporation_endpoint(98785281, factory::mock_corporation(None, None), 1)
            .build()
            .await?;

        let response = add_entity(
            State(app_state(&test)),
            Path((TrustState::Trusted, EntityKind::Character)),
            identifier("2114794365"),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let entity: TrustedEntityDto = read_json(response).await;
        assert_eq!(entity.kind(), EntityKind::Character);
        assert_eq!(entity.name(), "Hyziri");
        test.assert_mocks();

        Ok(())
    }

    /// Expect 400 naming the identifier when it cannot be resolved
    #[tokio::test]
    async fn rejects_unresolvable_identifier() -> Result<(), TestError> {
        let test = TestBuilder::new().with_trust_tables().build().await?;

        let response = add_entity(
            State(app_state(&test)),
            Path((TrustState::Untrusted, EntityKind::Character)),
            identifier("0"),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ErrorDto = read_json(response).await;
        assert_eq!(error.error, "Identifier resolution failed: 0");

        Ok(())
    }

    /// Expect 409 when the opposite list holds the entity
    #[tokio::test]
    async fn rejects_conflicting_entity() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_trust_tables()
            .with_trusted_character(12345, 98000001, true)
            .build()
            .await?;

        let response = add_entity(
            State(app_state(&test)),
            Path((TrustState::Untrusted, EntityKind::Character)),
            identifier("12345"),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let error: ErrorDto = read_json(response).await;
        assert_eq!(error.error, "Character already exists in the trusted list.");

        Ok(())
    }

    /// Expect 500 naming the identifier when ESI lookups fail
    #[tokio::test]
    async fn reports_retrieval_failure() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_trust_tables().build().await?;
        let mock = test
            .eve()
            .create_error_endpoint("GET", "/corporations/98000001", 404, 1);

        let response = add_entity(
            State(app_state(&test)),
            Path((TrustState::Trusted, EntityKind::Corporation)),
            identifier("98000001"),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let error: ErrorDto = read_json(response).await;
        assert_eq!(error.error, "Entity data retrieval failed: 98000001");
        mock.assert();

        Ok(())
    }
}

mod remove_entity {
    use super::*;

    /// Expect 200 with a confirmation message
    #[tokio::test]
    async fn confirms_removal() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_trust_tables()
            .with_trusted_corporation(98000001, None, false)
            .build()
            .await?;

        let response = remove_entity(
            State(app_state(&test)),
            Path((TrustState::Untrusted, EntityKind::Corporation)),
            identifier("98000001"),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let message: MessageDto = read_json(response).await;
        assert_eq!(message.message, "Untrusted corporation removed successfully");

        Ok(())
    }

    /// Expect 400 when removing by name
    #[tokio::test]
    async fn rejects_name() -> Result<(), TestError> {
        let test = TestBuilder::new().with_trust_tables().build().await?;

        let response = remove_entity(
            State(app_state(&test)),
            Path((TrustState::Trusted, EntityKind::Character)),
            identifier("Hyziri"),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let error: ErrorDto = read_json(response).await;
        assert_eq!(
            error.error,
            "Identifier must be a valid ID for removal: Hyziri"
        );

        Ok(())
    }
}

mod update_comment {
    use super::*;

    /// Expect 404 when the list does not hold the entry
    #[tokio::test]
    async fn reports_missing_entry() -> Result<(), TestError> {
        let test = TestBuilder::new().with_trust_tables().build().await?;

        let response = update_comment(
            State(app_state(&test)),
            Path((TrustState::Trusted, EntityKind::Character)),
            Json(CommentDto {
                id: 12345,
                comment: "scout".to_string(),
            }),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let error: ErrorDto = read_json(response).await;
        assert_eq!(error.error, "Entry not found");

        Ok(())
    }

    /// Expect 200 once the comment is stored
    #[tokio::test]
    async fn stores_comment() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_trust_tables()
            .with_trusted_character(12345, 98000001, true)
            .build()
            .await?;

        let response = update_comment(
            State(app_state(&test)),
            Path((TrustState::Trusted, EntityKind::Character)),
            Json(CommentDto {
                id: 12345,
                comment: "scout".to_string(),
            }),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);

        let lists = get_trust_lists(State(app_state(&test)))
            .await
            .into_response();
        let lists: TrustListsDto = read_json(lists).await;
        assert_eq!(lists.trusted_characters[0].comment, "scout");

        Ok(())
    }
}

use mockito::{Matcher, Server};
use serde_json::json;
use trustlist::{
    client::{
        error::RemoteError,
        remote::{HttpRemoteAuthority, RemoteAuthority, FALLBACK_ERROR_MESSAGE},
    },
    model::trust::{ContactsDto, EntityKind, IdentifierDto, ListKey},
};

fn identifier(identifier: &str) -> IdentifierDto {
    IdentifierDto {
        identifier: identifier.to_string(),
        added_by: None,
    }
}

/// Expect the canonical record decoded from the add endpoint of the list
#[tokio::test]
async fn add_decodes_canonical_record() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/trust/trusted/character/add")
        .match_body(Matcher::Json(json!({ "identifier": "12345" })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "character_id": 12345,
                "character_name": "Hyziri",
                "corporation_id": 98785281,
                "corporation_name": "The Order of Autumn",
                "added_by": "Operator",
                "date_added": "2025-11-01T12:00:00",
                "comment": ""
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let remote = HttpRemoteAuthority::new(format!("{}/", server.url()));
    let entity = remote
        .add(ListKey::TRUSTED_CHARACTERS, &identifier("12345"))
        .await
        .unwrap();

    assert_eq!(entity.kind(), EntityKind::Character);
    assert_eq!(entity.primary_id(), 12345);
    assert_eq!(entity.name(), "Hyziri");
    mock.assert_async().await;
}

/// Expect the `error` field of a JSON error body to become the message
#[tokio::test]
async fn extracts_json_error_message() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/trust/untrusted/corporation/add")
        .with_status(409)
        .with_header("content-type", "application/json")
        .with_body(json!({ "error": "Corporation already exists in the trusted list." }).to_string())
        .create_async()
        .await;

    let remote = HttpRemoteAuthority::new(server.url());
    let result = remote
        .add(ListKey::UNTRUSTED_CORPORATIONS, &identifier("500"))
        .await;

    assert_eq!(
        result,
        Err(RemoteError::Rejected {
            status: 409,
            message: "Corporation already exists in the trusted list.".to_string(),
        })
    );
}

/// Expect a plain text error body to become the message
#[tokio::test]
async fn extracts_text_error_message() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/trust/trusted/character/remove")
        .with_status(502)
        .with_header("content-type", "text/plain")
        .with_body("Bad gateway\n")
        .create_async()
        .await;

    let remote = HttpRemoteAuthority::new(server.url());
    let result = remote
        .remove(ListKey::TRUSTED_CHARACTERS, &identifier("1"))
        .await;

    assert_eq!(
        result,
        Err(RemoteError::Rejected {
            status: 502,
            message: "Bad gateway".to_string(),
        })
    );
}

/// Expect contact writes to carry the access token registered for the character
#[tokio::test]
async fn contacts_send_character_access_token() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/contacts/add")
        .match_header("authorization", "Bearer token-for-42")
        .match_body(Matcher::Json(json!({ "character_id": 42 })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "message": "Contacts added successfully" }).to_string())
        .expect(1)
        .create_async()
        .await;

    let remote = HttpRemoteAuthority::new(server.url())
        .with_access_token(42, "token-for-42")
        .with_access_token(43, "token-for-43");
    let result = remote.add_contacts(&ContactsDto { character_id: 42 }).await;

    assert!(result.is_ok(), "Got: {:?}", result);
    mock.assert_async().await;
}

/// Expect the fallback message when the error body is empty or unreadable
#[tokio::test]
async fn falls_back_for_unusable_error_body() {
    let mut server = Server::new_async().await;
    let _empty = server
        .mock("POST", "/api/contacts/add")
        .with_status(500)
        .create_async()
        .await;
    let _malformed = server
        .mock("POST", "/api/contacts/delete")
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body("not json")
        .create_async()
        .await;

    let remote = HttpRemoteAuthority::new(server.url());
    let request = ContactsDto { character_id: 1 };

    for result in [
        remote.add_contacts(&request).await,
        remote.delete_contacts(&request).await,
    ] {
        assert_eq!(
            result,
            Err(RemoteError::Rejected {
                status: 500,
                message: FALLBACK_ERROR_MESSAGE.to_string(),
            })
        );
    }
}

/// Expect a record of the wrong kind to be refused
#[tokio::test]
async fn rejects_record_of_other_kind() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/trust/trusted/character/add")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "corporation_id": 98785281,
                "corporation_name": "The Order of Autumn",
                "alliance_id": null,
                "alliance_name": null,
                "added_by": "Operator",
                "date_added": "2025-11-01T12:00:00",
                "comment": ""
            })
            .to_string(),
        )
        .create_async()
        .await;

    let remote = HttpRemoteAuthority::new(server.url());
    let result = remote
        .add(ListKey::TRUSTED_CHARACTERS, &identifier("98785281"))
        .await;

    assert!(matches!(result, Err(RemoteError::Decode(_))), "Got: {:?}", result);
}

/// Expect an unreachable server to surface as a transport error
#[tokio::test]
async fn reports_transport_failure() {
    let remote = HttpRemoteAuthority::new("http://127.0.0.1:1");

    let result = remote.fetch_lists().await;

    assert!(matches!(result, Err(RemoteError::Transport(_))), "Got: {:?}", result);
}

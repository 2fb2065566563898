use std::collections::HashMap;

use serde_json::json;
use wiremock::{
    matchers::{body_partial_json, method, path},
    Mock, MockServer, ResponseTemplate,
};

use super::{Params, RevocationServiceClient};
use crate::{
    credential_formatter::model::CredentialStatus,
    revocation::{error::RevocationError, model::CredentialRevocationState, RevocationMethod},
};

fn credential_status() -> CredentialStatus {
    CredentialStatus {
        id: Some("https://revocation.example/status/BPNL000000000001/revocation/1#7".to_string()),
        r#type: "BitstringStatusListEntry".to_string(),
        status_purpose: Some("revocation".to_string()),
        additional_fields: HashMap::from([
            ("statusListIndex".to_string(), json!("7")),
            (
                "statusListCredential".to_string(),
                json!("https://revocation.example/status/BPNL000000000001/revocation/1"),
            ),
        ]),
    }
}

async fn client_for(server: &MockServer) -> RevocationServiceClient {
    RevocationServiceClient::new(
        reqwest::Client::new(),
        Params {
            url: format!("{}/", server.uri()).parse().unwrap(),
        },
    )
}

async fn mount_status(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/api/v1/revocations/credentials/verify"))
        .and(body_partial_json(json!({
            "credentialStatus": { "type": "BitstringStatusListEntry", "statusListIndex": "7" }
        })))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_check_active() {
    let server = MockServer::start().await;
    mount_status(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "status": "active" })),
    )
    .await;

    let result = client_for(&server)
        .await
        .check_credential_revocation_status(&credential_status())
        .await
        .unwrap();

    assert_eq!(result, CredentialRevocationState::Active);
}

#[tokio::test]
async fn test_check_revoked() {
    let server = MockServer::start().await;
    mount_status(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "status": "revoked" })),
    )
    .await;

    let result = client_for(&server)
        .await
        .check_credential_revocation_status(&credential_status())
        .await
        .unwrap();

    assert_eq!(result, CredentialRevocationState::Revoked);
}

#[tokio::test]
async fn test_check_service_failure() {
    let server = MockServer::start().await;
    mount_status(&server, ResponseTemplate::new(503)).await;

    let result = client_for(&server)
        .await
        .check_credential_revocation_status(&credential_status())
        .await;

    assert!(matches!(result, Err(RevocationError::HttpRequestError(_))));
}

#[tokio::test]
async fn test_check_unexpected_status() {
    let server = MockServer::start().await;
    mount_status(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "status": "suspended" })),
    )
    .await;

    let result = client_for(&server)
        .await
        .check_credential_revocation_status(&credential_status())
        .await;

    assert!(matches!(result, Err(RevocationError::UnexpectedStatus(status)) if status == "suspended"));
}

#[tokio::test]
async fn test_base_url_path_without_trailing_slash() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/revocation/api/v1/revocations/credentials/verify"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "active" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = RevocationServiceClient::new(
        reqwest::Client::new(),
        Params {
            url: format!("{}/revocation", server.uri()).parse().unwrap(),
        },
    );

    let result = client
        .check_credential_revocation_status(&credential_status())
        .await
        .unwrap();

    assert_eq!(result, CredentialRevocationState::Active);
}

use crate::common::{entity_xml, mock_rotating_login, test_config, token_header};
use mockito::{Matcher, Server};
use preservica_client::application::client::Client;
use preservica_client::application::interfaces::entity::EntityService;
use preservica_client::error::AppError;
use preservica_client::model::entity::EntityType;
use preservica_client::model::requests::ApiRequest;
use reqwest::StatusCode;
use serde_json::{Value, json};

const ASSET_PATH: &str = "/api/entity/information-objects/asset-1";

#[tokio::test]
async fn expired_token_is_refreshed_and_call_replayed() {
    let mut server = Server::new_async().await;
    let login = mock_rotating_login(&mut server, 2).await;
    let (name, value) = token_header("token-1");
    let rejected = server
        .mock("GET", ASSET_PATH)
        .match_header(name, value)
        .with_status(401)
        .expect(1)
        .create_async()
        .await;
    let (name, value) = token_header("token-2");
    let accepted = server
        .mock("GET", ASSET_PATH)
        .match_header(name, value)
        .with_status(200)
        .with_header("content-type", "application/xml")
        .with_body(entity_xml("InformationObject", "asset-1", "Charter"))
        .expect(1)
        .create_async()
        .await;

    let client = Client::new(test_config(&server, 10)).await.unwrap();
    let entity = client.get_entity(EntityType::Asset, "asset-1").await.unwrap();

    assert_eq!(entity.reference, "asset-1");
    assert_eq!(entity.title.as_deref(), Some("Charter"));
    assert_eq!(client.get_session().await.unwrap().token, "token-2");
    login.assert_async().await;
    rejected.assert_async().await;
    accepted.assert_async().await;
}

#[tokio::test]
async fn second_unauthorized_is_fatal() {
    let mut server = Server::new_async().await;
    let login = mock_rotating_login(&mut server, 2).await;
    let data = server
        .mock("GET", ASSET_PATH)
        .with_status(401)
        .expect(2)
        .create_async()
        .await;

    let client = Client::new(test_config(&server, 10)).await.unwrap();
    match client.get_entity(EntityType::Asset, "asset-1").await {
        Err(AppError::Unauthorized { url }) => assert!(url.ends_with(ASSET_PATH)),
        other => panic!("expected unauthorized, got {other:?}"),
    }
    login.assert_async().await;
    data.assert_async().await;
}

#[tokio::test]
async fn missing_entity_is_not_found_with_reference() {
    let mut server = Server::new_async().await;
    let _login = mock_rotating_login(&mut server, 1).await;
    let _data = server
        .mock("GET", "/api/entity/structural-objects/missing-folder")
        .with_status(404)
        .create_async()
        .await;

    let client = Client::new(test_config(&server, 10)).await.unwrap();
    match client.get_entity(EntityType::Folder, "missing-folder").await {
        Err(AppError::NotFound { reference }) => assert_eq!(reference, "missing-folder"),
        other => panic!("expected not found, got {other:?}"),
    }
}

#[tokio::test]
async fn other_failures_carry_status_url_and_body() {
    let mut server = Server::new_async().await;
    let _login = mock_rotating_login(&mut server, 1).await;
    let _data = server
        .mock("GET", ASSET_PATH)
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    let client = Client::new(test_config(&server, 10)).await.unwrap();
    match client.get_entity(EntityType::Asset, "asset-1").await {
        Err(AppError::RequestFailed { status, url, body }) => {
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(url, format!("{}{}", server.url(), ASSET_PATH));
            assert_eq!(body, "boom");
        }
        other => panic!("expected request failure, got {other:?}"),
    }
}

#[tokio::test]
async fn json_post_body_is_replayed_after_refresh() {
    let mut server = Server::new_async().await;
    let login = mock_rotating_login(&mut server, 2).await;
    let (name, value) = token_header("token-1");
    let _rejected = server
        .mock("POST", "/api/custom/echo")
        .match_header(name, value)
        .with_status(401)
        .create_async()
        .await;
    let (name, value) = token_header("token-2");
    let accepted = server
        .mock("POST", "/api/custom/echo")
        .match_header(name, value)
        .match_header("content-type", Matcher::Regex("application/json".into()))
        .match_body(Matcher::Json(json!({"name": "box 12"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success":true}"#)
        .expect(1)
        .create_async()
        .await;

    let client = Client::new(test_config(&server, 10)).await.unwrap();
    let response: Value = client
        .http_client()
        .post("api/custom/echo", json!({"name": "box 12"}))
        .await
        .unwrap();

    assert_eq!(response["success"], true);
    login.assert_async().await;
    accepted.assert_async().await;
}

#[tokio::test]
async fn query_parameters_are_encoded() {
    let mut server = Server::new_async().await;
    let _login = mock_rotating_login(&mut server, 1).await;
    let data = server
        .mock("GET", "/api/custom/lookup")
        .match_query(Matcher::UrlEncoded("name".into(), "a&b c".into()))
        .with_status(200)
        .with_body("found")
        .create_async()
        .await;

    let client = Client::new(test_config(&server, 10)).await.unwrap();
    let request = ApiRequest::get("api/custom/lookup").query("name", "a&b c");
    let text = client.http_client().text(&request).await.unwrap();

    assert_eq!(text, "found");
    data.assert_async().await;
}

#[tokio::test]
async fn delete_goes_through_the_same_policy() {
    let mut server = Server::new_async().await;
    let _login = mock_rotating_login(&mut server, 1).await;
    let _data = server
        .mock("DELETE", "/api/custom/thing")
        .with_status(404)
        .create_async()
        .await;

    let client = Client::new(test_config(&server, 10)).await.unwrap();
    let result = client.http_client().delete("api/custom/thing").await;
    assert!(matches!(result, Err(AppError::NotFound { .. })));
}

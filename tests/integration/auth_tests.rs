use crate::common::{LOGIN_PATH, login_body, mock_login, test_config};
use mockito::{Matcher, Server};
use preservica_client::application::client::Client;
use preservica_client::config::{Config, Credentials};
use preservica_client::error::AppError;
use reqwest::StatusCode;

#[tokio::test]
async fn login_sends_form_credentials_and_stores_session() {
    let mut server = Server::new_async().await;
    let login = server
        .mock("POST", LOGIN_PATH)
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("username".into(), "test_user".into()),
            Matcher::UrlEncoded("password".into(), "test_password".into()),
            Matcher::UrlEncoded("tenant".into(), "TEST".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(login_body("token-1"))
        .expect(1)
        .create_async()
        .await;

    let client = Client::new(test_config(&server, 10)).await.unwrap();
    let session = client.get_session().await.unwrap();

    assert_eq!(session.token, "token-1");
    assert_eq!(session.refresh_token.as_deref(), Some("refresh-token-1"));
    assert_eq!(session.valid_for_minutes, 15);
    assert_eq!(session.roles, vec!["ROLE_SDB_MANAGER_USER".to_string()]);
    assert!(!session.is_expired(None));
    login.assert_async().await;
}

#[tokio::test]
async fn rejected_login_is_authentication_error() {
    let mut server = Server::new_async().await;
    let login = server
        .mock("POST", LOGIN_PATH)
        .with_status(401)
        .with_body("Invalid credentials")
        .create_async()
        .await;

    match Client::new(test_config(&server, 10)).await {
        Err(AppError::Authentication { status, message }) => {
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(message, "Invalid credentials");
        }
        Err(other) => panic!("expected authentication error, got {other}"),
        Ok(_) => panic!("expected authentication error"),
    }
    login.assert_async().await;
}

#[tokio::test]
async fn login_without_token_is_authentication_error() {
    let mut server = Server::new_async().await;
    let _login = server
        .mock("POST", LOGIN_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success":false}"#)
        .create_async()
        .await;

    let result = Client::new(test_config(&server, 10)).await;
    assert!(matches!(result, Err(AppError::Authentication { .. })));
}

#[tokio::test]
async fn login_server_error_is_request_failed() {
    let mut server = Server::new_async().await;
    let _login = server
        .mock("POST", LOGIN_PATH)
        .with_status(503)
        .with_body("maintenance")
        .create_async()
        .await;

    match Client::new(test_config(&server, 10)).await {
        Err(AppError::RequestFailed { status, url, body }) => {
            assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
            assert!(url.ends_with(LOGIN_PATH));
            assert_eq!(body, "maintenance");
        }
        Err(other) => panic!("expected request failure, got {other}"),
        Ok(_) => panic!("expected request failure"),
    }
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    let config = Config::with_credentials(Credentials {
        username: "u".to_string(),
        password: "p".to_string(),
        tenant: None,
        server: "127.0.0.1:1".to_string(),
        protocol: "http".to_string(),
    });
    let result = Client::new(config).await;
    assert!(matches!(result, Err(AppError::Http(_))));
}

#[tokio::test]
async fn lazy_client_logs_in_on_first_request() {
    let mut server = Server::new_async().await;
    let login = mock_login(&mut server, "token-1").await;
    let client = Client::new_lazy(test_config(&server, 10)).unwrap();

    assert!(client.http_client().auth().current_session().await.is_none());
    let session = client.get_session().await.unwrap();
    assert_eq!(session.token, "token-1");
    login.assert_async().await;
}

#[tokio::test]
async fn logout_forces_a_new_login() {
    let mut server = Server::new_async().await;
    let login = server
        .mock("POST", LOGIN_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(login_body("token-1"))
        .expect(2)
        .create_async()
        .await;
    let client = Client::new(test_config(&server, 10)).await.unwrap();

    client.logout().await;
    assert!(client.http_client().auth().current_session().await.is_none());
    client.get_session().await.unwrap();
    login.assert_async().await;
}

//! Integration tests against a local mock of the SMS Center HTTP API.

use std::io::Write;
use std::time::Duration;

use flate2::{Compression, write::GzEncoder};
use serde_json::json;
use smsc::{
    Credentials, ErrorCode, HttpMethod, MessageText, Params, RawPhoneNumber, SenderId,
    SmscClient, SmscError, ValidationError,
};
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> SmscClient {
    SmscClient::builder(Credentials::new("user", "secret").unwrap())
        .host(server.uri())
        .request_timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_get_request_sends_credentials_in_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/sys/balance.php"))
        .and(query_param("fmt", "3"))
        .and(query_param("login", "user"))
        .and(query_param("psw", "secret"))
        .and(header("user-agent", "Web client"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"balance": "120.50"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    let get_params: Params = vec![("fmt".to_owned(), "3".to_owned())];
    let response = client
        .request("balance", Some(get_params), None)
        .await
        .unwrap();

    assert_eq!(response.get("balance"), Some(&json!("120.50")));
    assert_eq!(
        client.last_request_info().map(|info| info.http_method),
        Some(HttpMethod::Get)
    );
}

#[tokio::test]
async fn test_send_message_by_sms_posts_form() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sys/send.php"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("phones=%2B1234567890"))
        .and(body_string_contains("mes=hi"))
        .and(body_string_contains("cost=3"))
        .and(body_string_contains("fmt=3"))
        .and(body_string_contains("sender=Shop"))
        .and(body_string_contains("charset=utf-8"))
        .and(body_string_contains("login=user"))
        .and(body_string_contains("psw=secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1, "cnt": 1})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    let response = client
        .send_message_by_sms(
            &MessageText::new("hi").unwrap(),
            &RawPhoneNumber::new("+1234567890").unwrap(),
            Some(&SenderId::new("Shop").unwrap()),
        )
        .await
        .unwrap();

    assert_eq!(Some(&response), json!({"id": 1, "cnt": 1}).as_object());
    assert_eq!(client.requests_counter(), 1);
    assert_eq!(client.last_response().map(|r| r.status()), Some(200));
}

#[tokio::test]
async fn test_send_messages_by_sms_joins_recipients() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sys/send.php"))
        .and(body_string_contains("phones=%2B1%2C%2B2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 7, "cnt": 2})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    let phones = vec![
        RawPhoneNumber::new("+1").unwrap(),
        RawPhoneNumber::new("+2").unwrap(),
    ];
    client
        .send_messages_by_sms(&MessageText::new("hi").unwrap(), &phones, None)
        .await
        .unwrap();

    let body = client_last_body(&mock_server).await;
    assert!(!body.contains("mes="), "unexpected mes in {body}");
    assert!(!body.contains("cost="), "unexpected cost in {body}");
}

#[tokio::test]
async fn test_price_query_uses_cost_one() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/sys/send.php"))
        .and(body_string_contains("cost=1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"cost": "30", "cnt": 2})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    let phones = vec![
        RawPhoneNumber::new("+77011234567").unwrap(),
        RawPhoneNumber::new("+77021234567").unwrap(),
    ];
    let response = client
        .get_price_of_sms_messages(&MessageText::new("hello").unwrap(), &phones)
        .await
        .unwrap();

    assert_eq!(response.get("cost"), Some(&json!("30")));
}

#[tokio::test]
async fn test_remote_error_is_typed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error_code": 2,
            "error": "неверный логин или пароль"
        })))
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    let err = client
        .request("send", None, Some(Params::new()))
        .await
        .unwrap_err();

    match err {
        SmscError::Api(api) => {
            assert_eq!(api.code(), ErrorCode::Login);
            assert_eq!(api.message(), "неверный логин или пароль");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_http_error_status_maps_to_unknown_code() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    let err = client.request("balance", None, None).await.unwrap_err();

    match err {
        SmscError::Api(api) => {
            assert_eq!(api.code(), ErrorCode::Unknown);
            assert_eq!(api.message(), "SMS Center returned HTTP error #503");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(
        client.last_response().map(|r| r.body().to_vec()),
        Some(b"maintenance".to_vec())
    );
}

#[tokio::test]
async fn test_unexpected_error_code_is_validation_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error_code": 11,
            "error": "something new"
        })))
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    let err = client.request("balance", None, None).await.unwrap_err();

    assert!(matches!(
        err,
        SmscError::Validation(ValidationError::UnknownErrorCode { code: 11 })
    ));
}

#[tokio::test]
async fn test_request_timeout_is_transport_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    client.set_request_timeout(Duration::from_millis(50));
    let err = client.request("balance", None, None).await.unwrap_err();

    assert!(matches!(err, SmscError::Transport(_)));
    assert!(client.last_response().is_none());
    assert_eq!(client.requests_counter(), 1);
}

#[tokio::test]
async fn test_zero_request_timeout_fails_immediately() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    client.set_request_timeout(Duration::ZERO);
    let err = client.request("balance", None, None).await.unwrap_err();

    assert!(matches!(err, SmscError::Transport(_)));
    assert!(client.last_response().is_none());
}

#[tokio::test]
async fn test_invalid_utf8_body_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(b"{\"id\":\"\xff\xfe\"}".to_vec(), "application/json"),
        )
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    let err = client.request("balance", None, None).await.unwrap_err();

    assert!(matches!(err, SmscError::Parse(_)));
    assert_eq!(
        client.last_response().map(|r| r.body().to_vec()),
        Some(b"{\"id\":\"\xff\xfe\"}".to_vec())
    );
}

#[tokio::test]
async fn test_string_error_code_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error_code": "9",
            "error": "duplicate request"
        })))
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    let err = client.request("balance", None, None).await.unwrap_err();

    assert!(matches!(err, SmscError::Parse(_)));
}

#[tokio::test]
async fn test_gzip_body_is_decompressed() {
    let mock_server = MockServer::start().await;

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(br#"{"id":1,"cnt":1}"#).unwrap();
    let compressed = encoder.finish().unwrap();

    Mock::given(method("POST"))
        .and(path("/sys/send.php"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-encoding", "gzip")
                .set_body_raw(compressed, "application/json"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = client_for(&mock_server);
    let response = client
        .send_message_by_sms(
            &MessageText::new("hi").unwrap(),
            &RawPhoneNumber::new("+1234567890").unwrap(),
            None,
        )
        .await
        .unwrap();

    assert_eq!(Some(&response), json!({"id": 1, "cnt": 1}).as_object());
    assert_eq!(
        client.last_response().map(|r| r.body().to_vec()),
        Some(br#"{"id":1,"cnt":1}"#.to_vec())
    );
}

async fn client_last_body(server: &MockServer) -> String {
    let requests = server.received_requests().await.unwrap_or_default();
    requests
        .last()
        .map(|request| String::from_utf8_lossy(&request.body).into_owned())
        .unwrap_or_default()
}

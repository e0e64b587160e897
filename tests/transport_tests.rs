mod common;

use common::{
    raw_client, serve_raw_response, setup_mock_server, test_client, test_config, TEST_BOOK,
};
use quadriga::{build_client, ExchangeError, TimeFrame};
use serde_json::json;
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

fn request_error(err: ExchangeError) -> quadriga::RequestError {
    match err {
        ExchangeError::Request(err) => err,
        other => panic!("Expected request error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_get_summary_sends_book_query() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/ticker"))
        .and(query_param("book", TEST_BOOK))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"last": "1234.56"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let summary = assert_ok!(client.get_summary(None).await);
    assert_eq!(summary, json!({"last": "1234.56"}));
}

#[tokio::test]
async fn test_get_requests_are_unsigned() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/transactions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = test_client(&server);
    assert_ok!(client.get_public_trades(TimeFrame::Minute, None).await);
    assert_ok!(client.get_public_trades(TimeFrame::Minute, None).await);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].url, requests[1].url);

    let query: Vec<(String, String)> = requests[0]
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    assert_eq!(
        query,
        vec![
            ("book".to_string(), TEST_BOOK.to_string()),
            ("time".to_string(), "minute".to_string()),
        ]
    );
    assert!(requests[0].body.is_empty());
}

#[tokio::test]
async fn test_exchange_error_object_is_classified() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/ticker"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("bar", "baz")
                .set_body_json(json!({"error": {"code": "123", "message": "failed"}})),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = assert_err!(client.get_summary(None).await);
    assert!(err.is_transport_error());
    assert_eq!(err.error_code(), Some("123"));

    let err = request_error(err);
    assert_eq!(err.http_code, 200);
    assert_eq!(err.error_code.as_deref(), Some("123"));
    assert_eq!(err.to_string(), "[HTTP 200][ERR 123] failed");
    assert_eq!(err.headers.get("bar").map(String::as_str), Some("baz"));
    assert!(err.url.starts_with(&server.uri()));
    assert!(err.url.contains("/ticker?book=btc_usd"));
}

#[tokio::test]
async fn test_exchange_error_on_signed_request() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/balance"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"error": {"code": 106}})),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = request_error(assert_err!(client.get_balance().await));
    assert_eq!(err.error_code.as_deref(), Some("106"));
    assert_eq!(err.to_string(), "[HTTP 200][ERR 106] no error message");
}

#[tokio::test]
async fn test_bad_status_uses_reason_phrase() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/ticker"))
        .respond_with(ResponseTemplate::new(400).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = request_error(assert_err!(client.get_summary(None).await));
    assert_eq!(err.http_code, 400);
    assert_eq!(err.error_code, None);
    assert_eq!(err.body, "not json at all");
    assert_eq!(err.to_string(), "[HTTP 400] Bad Request");
}

#[tokio::test]
async fn test_bad_status_uses_server_reason_phrase() {
    let base_url = serve_raw_response(
        "HTTP/1.1 400 test_reason\r\ncontent-length: 2\r\nconnection: close\r\n\r\n{}",
    )
    .await;

    let client = raw_client(base_url);
    let err = request_error(assert_err!(client.get_summary(None).await));
    assert_eq!(err.http_code, 400);
    assert_eq!(err.to_string(), "[HTTP 400] test_reason");
}

#[tokio::test]
async fn test_repeated_headers_kept_on_error() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/ticker"))
        .respond_with(
            ResponseTemplate::new(503)
                .append_header("set-cookie", "a=1")
                .append_header("set-cookie", "b=2"),
        )
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = request_error(assert_err!(client.get_summary(None).await));
    assert_eq!(err.http_code, 503);
    assert_eq!(err.to_string(), "[HTTP 503] Service Unavailable");
    assert_eq!(
        err.headers.get("set-cookie").map(String::as_str),
        Some("a=1, b=2")
    );
}

#[tokio::test]
async fn test_status_210_is_not_success() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/order_book"))
        .respond_with(ResponseTemplate::new(226).set_body_json(json!({"bids": [], "asks": []})))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = request_error(assert_err!(client.get_public_orders(true, None).await));
    assert_eq!(err.http_code, 226);
    assert_eq!(err.to_string(), "[HTTP 226] IM Used");
}

#[tokio::test]
async fn test_status_206_is_success() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/order_book"))
        .respond_with(ResponseTemplate::new(206).set_body_json(json!({"bids": [], "asks": []})))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let body = assert_ok!(client.get_public_orders(true, None).await);
    assert_eq!(body, json!({"bids": [], "asks": []}));
}

#[tokio::test]
async fn test_unparsable_body() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/ticker"))
        .respond_with(ResponseTemplate::new(200).set_body_string("foo"))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let err = request_error(assert_err!(client.get_summary(None).await));
    assert_eq!(err.error_code, None);
    assert_eq!(err.to_string(), "[HTTP 200] response body: foo");
}

#[tokio::test]
async fn test_timeout_surfaces_as_transport_error() {
    let server = setup_mock_server().await;
    Mock::given(method("GET"))
        .and(path("/ticker"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let client = build_client(test_config(&server).timeout_seconds(1)).unwrap();
    let err = assert_err!(client.get_summary(None).await);
    assert!(err.is_transport_error());
    match err {
        ExchangeError::Http(e) => assert!(e.is_timeout()),
        other => panic!("Expected HTTP error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_invalid_input_never_reaches_network() {
    let server = setup_mock_server().await;
    let client = test_client(&server);

    let err = assert_err!(client.get_summary(Some("invalid_book")).await);
    assert!(err.is_validation_error());
    assert_err!(client.get_orders(Some("invalid_book")).await);
    assert_err!(client.get_deposit_address("dogecoin").await);
    assert_err!(
        client
            .withdraw("dogecoin", "1".parse().unwrap(), "test_address")
            .await
    );

    let requests = server.received_requests().await.unwrap();
    assert!(requests.is_empty());
}

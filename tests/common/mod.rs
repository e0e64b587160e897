//! Shared fixtures for the transport tests.
#![allow(dead_code)]

use hmac::{Hmac, Mac};
use quadriga::{build_client, ExchangeConfig, QuadrigaClient};
use quadriga::core::kernel::ReqwestRest;
use sha2::Sha256;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::MockServer;

pub const TEST_KEY: &str = "test_api_key";
pub const TEST_SECRET: &str = "test_api_secret";
pub const TEST_CLIENT_ID: &str = "test_client_id";
pub const TEST_BOOK: &str = "btc_usd";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

pub fn test_config(server: &MockServer) -> ExchangeConfig {
    ExchangeConfig::new(
        TEST_KEY.to_string(),
        TEST_SECRET.to_string(),
        TEST_CLIENT_ID.to_string(),
    )
    .default_book(TEST_BOOK)
    .base_url(server.uri())
}

pub fn test_client(server: &MockServer) -> QuadrigaClient<ReqwestRest> {
    build_client(test_config(server)).expect("client should build")
}

/// Reference signature computed independently of the crate's signer.
pub fn expected_signature(nonce: u64) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(TEST_SECRET.as_bytes()).unwrap();
    mac.update(format!("{}{}{}", nonce, TEST_CLIENT_ID, TEST_KEY).as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// JSON bodies of every request the server has seen, in order.
pub async fn received_bodies(server: &MockServer) -> Vec<serde_json::Value> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|request| serde_json::from_slice(&request.body).expect("JSON request body"))
        .collect()
}

/// Serve a single hand-written HTTP response, for status lines wiremock
/// cannot produce. Returns the base URL to point a client at.
pub async fn serve_raw_response(raw: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|window| window == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        socket.write_all(raw.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
    });

    format!("http://{}", addr)
}

pub fn raw_client(base_url: String) -> QuadrigaClient<ReqwestRest> {
    let config = ExchangeConfig::new(
        TEST_KEY.to_string(),
        TEST_SECRET.to_string(),
        TEST_CLIENT_ID.to_string(),
    )
    .default_book(TEST_BOOK)
    .base_url(base_url);
    build_client(config).expect("client should build")
}

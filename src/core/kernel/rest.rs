use crate::core::errors::{ExchangeError, RequestError};
use crate::core::kernel::nonce::NonceGenerator;
use crate::core::kernel::signer::Signer;
use async_trait::async_trait;
use hyper::ext::ReasonPhrase;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::ops::Range;
use std::sync::Arc;
use std::time::Duration;
use tracing::{instrument, trace};

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://api.quadrigacx.com/v2";

/// Status codes treated as success. Narrower than the 2xx band.
pub const HTTP_SUCCESS: Range<u16> = 200..210;

/// Default sentinel code when the exchange's error object has no `code`.
const UNKNOWN_ERROR_CODE: &str = "?";

/// REST client trait for making HTTP requests
///
/// Both methods issue exactly one HTTP call and return the decoded JSON body,
/// or a classified [`ExchangeError`]. Nothing is retried.
#[async_trait]
pub trait RestClient: Send + Sync {
    /// Unauthenticated GET with query parameters.
    ///
    /// # Arguments
    /// * `endpoint` - The API endpoint path
    /// * `query_params` - Query parameters as key-value pairs
    async fn get(&self, endpoint: &str, query_params: &[(&str, &str)])
        -> Result<Value, ExchangeError>;

    /// Signed POST with a JSON body.
    ///
    /// The payload is extended with `key`, `nonce` and `signature` before it
    /// is sent; those three keys always carry the transport's values.
    ///
    /// # Arguments
    /// * `endpoint` - The API endpoint path
    /// * `payload` - Caller fields for the request body (may be empty)
    async fn post(
        &self,
        endpoint: &str,
        payload: Map<String, Value>,
    ) -> Result<Value, ExchangeError>;
}

/// Configuration for the REST client
#[derive(Clone, Debug)]
pub struct RestClientConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Exchange name for logging and tracing
    pub exchange_name: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string to include in requests
    pub user_agent: String,
}

impl RestClientConfig {
    /// Create a new configuration
    ///
    /// # Arguments
    /// * `base_url` - Base URL for the API
    /// * `exchange_name` - Name of the exchange
    pub fn new(base_url: String, exchange_name: String) -> Self {
        Self {
            base_url,
            exchange_name,
            timeout_seconds: 30,
            user_agent: concat!("quadriga-rs/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Set the user agent string
    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }
}

/// Builder for creating REST client instances
pub struct RestClientBuilder {
    config: RestClientConfig,
    signer: Option<Arc<dyn Signer>>,
}

impl RestClientBuilder {
    /// Create a new builder with the given configuration
    pub fn new(config: RestClientConfig) -> Self {
        Self {
            config,
            signer: None,
        }
    }

    /// Set the signer for authenticated requests
    pub fn with_signer(mut self, signer: Arc<dyn Signer>) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Build the REST client
    pub fn build(self) -> Result<ReqwestRest, ExchangeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(self.config.timeout_seconds))
            .user_agent(&self.config.user_agent)
            .build()?;

        Ok(ReqwestRest {
            client,
            config: self.config,
            signer: self.signer,
            nonces: Arc::new(NonceGenerator::new()),
        })
    }
}

/// Implementation of `RestClient` using reqwest
///
/// Clones share the nonce generator, so every clone signing with the same
/// credentials still produces strictly increasing nonces.
#[derive(Clone)]
pub struct ReqwestRest {
    client: Client,
    config: RestClientConfig,
    signer: Option<Arc<dyn Signer>>,
    nonces: Arc<NonceGenerator>,
}

impl std::fmt::Debug for ReqwestRest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestRest")
            .field("config", &self.config)
            .field("has_signer", &self.signer.is_some())
            .finish_non_exhaustive()
    }
}

impl ReqwestRest {
    pub fn config(&self) -> &RestClientConfig {
        &self.config
    }

    /// Build the full URL for an endpoint
    fn build_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.config.base_url, endpoint)
    }

    /// Send one request and classify whatever comes back.
    async fn execute(&self, request: RequestBuilder) -> Result<Value, ExchangeError> {
        let response = request.send().await?;
        self.handle_response(response).await
    }

    #[instrument(skip(self, response), fields(exchange = %self.config.exchange_name, status = %response.status()))]
    async fn handle_response(&self, response: Response) -> Result<Value, ExchangeError> {
        let url = response.url().to_string();
        let status = response.status();
        let headers = collect_headers(response.headers());
        // hyper only records the phrase when it differs from the canonical one
        let reason = response
            .extensions()
            .get::<ReasonPhrase>()
            .map(|phrase| String::from_utf8_lossy(phrase.as_bytes()).into_owned())
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown").to_string());
        let body = response.text().await?;

        trace!("Response body: {}", body);

        classify_response(url, status.as_u16(), &reason, headers, body)
            .map_err(ExchangeError::from)
    }
}

/// Flatten response headers, joining repeated values with `", "`.
fn collect_headers(header_map: &HeaderMap) -> HashMap<String, String> {
    let mut headers: HashMap<String, String> = HashMap::new();
    for (name, value) in header_map {
        let value = String::from_utf8_lossy(value.as_bytes());
        headers
            .entry(name.as_str().to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(&value);
            })
            .or_insert_with(|| value.into_owned());
    }
    headers
}

#[async_trait]
impl RestClient for ReqwestRest {
    #[instrument(skip(self, query_params), fields(exchange = %self.config.exchange_name, method = %Method::GET, endpoint = %endpoint))]
    async fn get(
        &self,
        endpoint: &str,
        query_params: &[(&str, &str)],
    ) -> Result<Value, ExchangeError> {
        let request = self
            .client
            .get(self.build_url(endpoint))
            .query(query_params);
        self.execute(request).await
    }

    #[instrument(skip(self, payload), fields(exchange = %self.config.exchange_name, method = %Method::POST, endpoint = %endpoint))]
    async fn post(
        &self,
        endpoint: &str,
        mut payload: Map<String, Value>,
    ) -> Result<Value, ExchangeError> {
        let signer = self.signer.as_ref().ok_or_else(|| {
            ExchangeError::AuthError("Authentication required but no signer provided".to_string())
        })?;

        let nonce = self.nonces.next_nonce();
        signer.sign(nonce)?.apply(&mut payload);
        trace!(nonce, "Signed request payload");

        let request = self
            .client
            .post(self.build_url(endpoint))
            .json(&Value::Object(payload));
        self.execute(request).await
    }
}

/// Turn a raw HTTP response into the decoded body or a [`RequestError`].
///
/// In order: a status outside [`HTTP_SUCCESS`], a body that is not JSON, and
/// a JSON body carrying an `error` entry are all failures; anything else is
/// returned as-is.
pub fn classify_response(
    url: String,
    http_code: u16,
    reason: &str,
    headers: HashMap<String, String>,
    body: String,
) -> Result<Value, RequestError> {
    let fail = |body: String, error_code: Option<String>, message: String| RequestError {
        url: url.clone(),
        body,
        headers: headers.clone(),
        http_code,
        error_code,
        message,
    };

    if !HTTP_SUCCESS.contains(&http_code) {
        let message = format!("[HTTP {}] {}", http_code, reason);
        return Err(fail(body, None, message));
    }

    let parsed: Value = match serde_json::from_str(&body) {
        Ok(value) => value,
        Err(_) => {
            let message = format!("[HTTP {}] response body: {}", http_code, body);
            return Err(fail(body, None, message));
        }
    };

    if let Some(error) = parsed.get("error").filter(|error| !error.is_null()) {
        let error_code = match error.get("code") {
            Some(Value::String(code)) => code.clone(),
            Some(Value::Null) | None => UNKNOWN_ERROR_CODE.to_string(),
            Some(other) => other.to_string(),
        };
        let error_message = match error {
            Value::String(message) => message.clone(),
            _ => match error.get("message") {
                Some(Value::String(message)) => message.clone(),
                Some(Value::Null) | None => "no error message".to_string(),
                Some(other) => other.to_string(),
            },
        };
        let message = format!("[HTTP {}][ERR {}] {}", http_code, error_code, error_message);
        return Err(fail(body, Some(error_code), message));
    }

    Ok(parsed)
}

use crate::core::config::ExchangeConfig;
use crate::core::errors::ExchangeError;
use crate::core::kernel::{
    HmacSigner, ReqwestRest, RestClientBuilder, RestClientConfig, DEFAULT_BASE_URL,
};
use crate::exchanges::quadriga::client::QuadrigaClient;
use crate::exchanges::quadriga::types::OrderBook;
use std::sync::Arc;

/// Create a QuadrigaCX client backed by reqwest, signing POSTs with the
/// configured credentials.
pub fn build_client(config: ExchangeConfig) -> Result<QuadrigaClient<ReqwestRest>, ExchangeError> {
    let base_url = config
        .base_url
        .clone()
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let mut rest_config = RestClientConfig::new(base_url, "quadriga".to_string());
    if let Some(timeout) = config.timeout_seconds {
        rest_config = rest_config.with_timeout(timeout);
    }

    let signer = Arc::new(HmacSigner::new(
        config.api_key().to_string(),
        config.api_secret.clone(),
        config.client_id.clone(),
    ));

    let rest = RestClientBuilder::new(rest_config)
        .with_signer(signer)
        .build()?;

    let default_book = config
        .default_book
        .as_deref()
        .unwrap_or_else(|| OrderBook::default().as_str());

    QuadrigaClient::new(rest, config.client_id.clone(), default_book)
}

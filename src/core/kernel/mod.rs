//! Exchange-agnostic transport layer.
//!
//! - `RestClient` / `ReqwestRest`: HTTP transport and response classification
//! - `Signer` / `HmacSigner`: per-request authentication fields
//! - `NonceGenerator`: strictly increasing millisecond nonces
//!
//! # Example
//! ```rust,no_run
//! use quadriga::core::kernel::*;
//! use secrecy::Secret;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), quadriga::ExchangeError> {
//! let signer = Arc::new(HmacSigner::new(
//!     "api_key".to_string(),
//!     Secret::new("api_secret".to_string()),
//!     "client_id".to_string(),
//! ));
//! let rest = RestClientBuilder::new(RestClientConfig::new(
//!     DEFAULT_BASE_URL.to_string(),
//!     "quadriga".to_string(),
//! ))
//! .with_signer(signer)
//! .build()?;
//!
//! let ticker = rest.get("/ticker", &[("book", "btc_cad")]).await?;
//! let balance = rest.post("/balance", serde_json::Map::new()).await?;
//! # Ok(())
//! # }
//! ```
pub mod nonce;
pub mod rest;
pub mod signer;

// Re-export key types for convenience
pub use nonce::NonceGenerator;
pub use rest::{
    classify_response, ReqwestRest, RestClient, RestClientBuilder, RestClientConfig,
    DEFAULT_BASE_URL, HTTP_SUCCESS,
};
pub use signer::{HmacSigner, SignedFields, Signer};

use crate::core::errors::ExchangeError;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, Secret};
use serde_json::{Map, Value};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Authentication fields the exchange expects in every signed POST body.
///
/// `key`, `nonce` and `signature` are reserved: [`SignedFields::apply`]
/// writes them last, so caller data can never override them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedFields {
    pub key: String,
    pub nonce: u64,
    pub signature: String,
}

impl SignedFields {
    /// Merge the authentication fields into a request payload.
    pub fn apply(self, payload: &mut Map<String, Value>) {
        payload.insert("key".to_string(), Value::String(self.key));
        payload.insert("nonce".to_string(), Value::from(self.nonce));
        payload.insert("signature".to_string(), Value::String(self.signature));
    }
}

/// Signer trait for request authentication
///
/// Implementations turn a fresh nonce into the fields that authenticate one
/// request. A signer never picks the nonce itself; the transport owns the
/// nonce source.
pub trait Signer: Send + Sync {
    fn sign(&self, nonce: u64) -> Result<SignedFields, ExchangeError>;
}

/// HMAC-SHA256 signer over `nonce || client_id || api_key`.
pub struct HmacSigner {
    api_key: String,
    client_id: String,
    api_secret: Secret<String>,
}

impl HmacSigner {
    /// Create a new HMAC signer
    ///
    /// # Arguments
    /// * `api_key` - API key from the exchange
    /// * `api_secret` - Secret used as the HMAC key
    /// * `client_id` - Client (account) identifier
    pub fn new(api_key: String, api_secret: Secret<String>, client_id: String) -> Self {
        Self {
            api_key,
            client_id,
            api_secret,
        }
    }

    /// Lowercase hex HMAC-SHA256 of `"{nonce}{client_id}{api_key}"`.
    pub fn compute_signature(&self, nonce: u64) -> Result<String, ExchangeError> {
        let message = format!("{}{}{}", nonce, self.client_id, self.api_key);

        let mut mac = HmacSha256::new_from_slice(self.api_secret.expose_secret().as_bytes())
            .map_err(|e| ExchangeError::AuthError(format!("Invalid secret key: {}", e)))?;
        mac.update(message.as_bytes());

        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}

impl std::fmt::Debug for HmacSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacSigner")
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}

impl Signer for HmacSigner {
    fn sign(&self, nonce: u64) -> Result<SignedFields, ExchangeError> {
        Ok(SignedFields {
            key: self.api_key.clone(),
            nonce,
            signature: self.compute_signature(nonce)?,
        })
    }
}

//! API credentials and request signing for the BTC-e API
//!
//! BTC-e authenticates tapi requests with an HMAC-SHA512 over the exact
//! URL-encoded POST body, sent as a lowercase hex digest in the `Sign`
//! header alongside the API key in the `Key` header.
//!
//! # Security
//!
//! The API secret is stored using the `secrecy` crate which:
//! - Zeroizes memory on drop (prevents memory scanning)
//! - Prevents accidental logging via Debug impl
//! - Provides explicit access via `expose_secret()`

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};

use crate::error::{AuthError, AuthResult};

type HmacSha512 = Hmac<sha2::Sha512>;

/// API credentials for authenticated requests
///
/// The secret is automatically zeroized when the Credentials are dropped,
/// preventing sensitive data from remaining in memory.
pub struct Credentials {
    /// API key (public identifier)
    api_key: String,
    /// API secret (shared signing key, zeroized on drop)
    api_secret: SecretString,
}

impl Credentials {
    /// Create new credentials from an API key and secret
    ///
    /// BTC-e secrets are plain ASCII strings used directly as the HMAC
    /// key, so no decoding step is required and construction cannot fail.
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: SecretString::from(api_secret.into()),
        }
    }

    /// Create credentials from environment variables
    ///
    /// Reads `BTCE_API_KEY` and `BTCE_API_SECRET` from the environment.
    pub fn from_env() -> AuthResult<Self> {
        let api_key = std::env::var("BTCE_API_KEY")
            .map_err(|_| AuthError::EnvVarNotSet("BTCE_API_KEY".to_string()))?;
        let api_secret = std::env::var("BTCE_API_SECRET")
            .map_err(|_| AuthError::EnvVarNotSet("BTCE_API_SECRET".to_string()))?;

        Ok(Self::new(api_key, api_secret))
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Sign a canonical request body
    ///
    /// The input must be the exact byte sequence that will be transmitted
    /// as the POST body. Encode once and sign that string; re-serializing
    /// for transmission risks a field-order mismatch and a rejected
    /// signature.
    ///
    /// # Returns
    /// Lowercase hex HMAC-SHA512 digest (128 characters), suitable for
    /// the `Sign` header.
    pub fn sign(&self, body: &str) -> String {
        let mut mac = HmacSha512::new_from_slice(self.api_secret.expose_secret().as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(body.as_bytes());

        hex::encode(mac.finalize().into_bytes())
    }
}

impl Clone for Credentials {
    /// Clone credentials (creates a new SecretString with the same content)
    fn clone(&self) -> Self {
        Self {
            api_key: self.api_key.clone(),
            api_secret: SecretString::from(self.api_secret.expose_secret().to_owned()),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field(
                "api_key",
                &format!("{}...", &self.api_key[..8.min(self.api_key.len())]),
            )
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}

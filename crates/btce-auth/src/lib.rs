//! Authentication primitives for the BTC-e trading API
//!
//! This crate provides the two stateful pieces every authenticated tapi
//! request needs: HMAC-SHA512 request signing and a strictly increasing
//! nonce counter.
//!
//! # Example
//!
//! ```
//! use btce_auth::{Credentials, NonceSource};
//!
//! let creds = Credentials::new("KEY", "s3cr3t");
//! let nonces = NonceSource::with_seed(100);
//!
//! let nonce = nonces.next();
//! assert_eq!(nonce, 101);
//!
//! let body = format!("method=getInfo&nonce={}", nonce);
//! let signature = creds.sign(&body);
//! assert_eq!(signature.len(), 128); // hex-encoded SHA-512 output
//! ```

mod credentials;
mod error;
mod nonce;

pub use credentials::Credentials;
pub use error::{AuthError, AuthResult};
pub use nonce::NonceSource;

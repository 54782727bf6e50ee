//! Authenticated transport for the BTC-e trade API
//!
//! Every private call goes through [`Transport::dispatch`]: it builds the
//! canonical URL-encoded envelope (`method`, `nonce`, then caller
//! parameters, in that order), signs it with HMAC-SHA512, POSTs it with
//! the `Key`/`Sign` headers, and validates the JSON reply. When the
//! server rejects the nonce and names the value it expects, the counter
//! is resynchronized and the request is retried exactly once.

use btce_auth::{Credentials, NonceSource};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{RestError, RestResult};
use crate::types::TapiResponse;

pub(crate) struct Transport {
    client: Client,
    trade_url: String,
    credentials: Credentials,
    nonces: NonceSource,
}

impl Transport {
    pub(crate) fn new(
        client: Client,
        trade_url: String,
        credentials: Credentials,
        nonces: NonceSource,
    ) -> Self {
        Self {
            client,
            trade_url,
            credentials,
            nonces,
        }
    }

    /// Make an authenticated POST request
    ///
    /// The retry budget lives in a local flag, so each call gets exactly
    /// one nonce resync and concurrent calls cannot spend each other's
    /// budget.
    pub(crate) async fn dispatch<T: DeserializeOwned>(
        &self,
        method: &str,
        params: &[(&str, String)],
    ) -> RestResult<T> {
        let mut retried = false;

        loop {
            let nonce = self.nonces.next();
            let mut envelope: Vec<(&str, String)> =
                vec![("method", method.to_string()), ("nonce", nonce.to_string())];
            envelope.extend(params.iter().map(|(k, v)| (*k, v.clone())));

            // Encoded once; the identical string is signed and transmitted.
            let body = serde_urlencoded::to_string(&envelope)
                .map_err(|e| RestError::InvalidParameter(e.to_string()))?;
            let signature = self.credentials.sign(&body);

            debug!(method, nonce, "dispatching authenticated request");

            let text = self
                .client
                .post(&self.trade_url)
                .header("Key", self.credentials.api_key())
                .header("Sign", signature)
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(body)
                .send()
                .await?
                .text()
                .await?;

            let raw: serde_json::Value = serde_json::from_str(&text).map_err(|_| {
                RestError::MalformedResponse("response body is not valid JSON".to_string())
            })?;
            if !raw.is_object() {
                return Err(RestError::MalformedResponse(format!(
                    "expected a JSON object, got: {raw}"
                )));
            }

            let message = raw
                .get("error")
                .and_then(|e| e.as_str())
                .map(str::to_owned);
            let message = match message {
                Some(message) => message,
                None => {
                    let parsed: TapiResponse<T> = serde_json::from_value(raw)
                        .map_err(|e| RestError::MalformedResponse(e.to_string()))?;
                    return parsed.into_result().map_err(RestError::MalformedResponse);
                }
            };

            let server_nonce = match parse_expected_nonce(&message) {
                Some(server_nonce) if !retried => server_nonce,
                _ => {
                    return Err(RestError::Remote {
                        message,
                        response: raw,
                    })
                }
            };

            warn!(
                sent = nonce,
                server = server_nonce,
                "nonce rejected, resyncing and retrying once"
            );
            self.nonces.resync(server_nonce);
            retried = true;
        }
    }
}

/// Extract the server's expected nonce from a rejection message
///
/// BTC-e phrases the rejection as
/// `invalid nonce parameter; on key:0, you should send nonce:150`.
/// The message must mention the nonce and carry an extractable integer:
/// the digits directly after the last `nonce:` occurrence, or failing
/// that the last digit run in the message. Anything else is not treated
/// as a recoverable nonce rejection.
fn parse_expected_nonce(message: &str) -> Option<u64> {
    let lower = message.to_ascii_lowercase();
    if !lower.contains("nonce") {
        return None;
    }

    if let Some(idx) = lower.rfind("nonce:") {
        if let Some(nonce) = leading_digits(&lower[idx + "nonce:".len()..]) {
            return Some(nonce);
        }
    }
    last_digit_run(&lower)
}

fn leading_digits(s: &str) -> Option<u64> {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s[..end].parse().ok()
}

fn last_digit_run(s: &str) -> Option<u64> {
    let bytes = s.as_bytes();
    let end = s.rfind(|c: char| c.is_ascii_digit())? + 1;
    let start = (0..end)
        .rev()
        .take_while(|&i| bytes[i].is_ascii_digit())
        .last()?;
    s[start..end].parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_nonce_after_marker() {
        let msg = "invalid nonce parameter; on key:0, you should send nonce:150,...";
        assert_eq!(parse_expected_nonce(msg), Some(150));
    }

    #[test]
    fn test_extracts_trailing_integer_without_marker() {
        let msg = "api method requires minimal nonce value to be 263";
        assert_eq!(parse_expected_nonce(msg), Some(263));
    }

    #[test]
    fn test_rejects_messages_not_naming_the_nonce() {
        assert_eq!(parse_expected_nonce("invalid api key"), None);
        assert_eq!(parse_expected_nonce("insufficient funds on key:5"), None);
    }

    #[test]
    fn test_rejects_nonce_message_without_integer() {
        assert_eq!(parse_expected_nonce("invalid nonce parameter"), None);
    }

    #[test]
    fn test_rejects_overflowing_value() {
        let msg = "you should send nonce:99999999999999999999999999";
        assert_eq!(parse_expected_nonce(msg), None);
    }
}

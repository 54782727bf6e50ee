//! Public market data endpoints
//!
//! These endpoints don't require authentication. They are stateless GETs
//! against the v3 public API, safe to run concurrently.

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::types::{PairDepth, PairFee, PairTicker, PublicTrade};

/// Timeout for public lookups; kept short since these are cheap reads
const PUBLIC_TIMEOUT: Duration = Duration::from_secs(10);

/// Bounds the server accepts for the `limit` query parameter
const MIN_LIMIT: u32 = 1;
const MAX_LIMIT: u32 = 2000;

/// Public market data endpoints
pub struct MarketEndpoints<'a> {
    client: &'a Client,
    public_url: &'a str,
}

impl<'a> MarketEndpoints<'a> {
    pub(crate) fn new(client: &'a Client, public_url: &'a str) -> Self {
        Self { client, public_url }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> RestResult<T> {
        let text = self
            .client
            .get(&url)
            .timeout(PUBLIC_TIMEOUT)
            .send()
            .await?
            .text()
            .await?;

        serde_json::from_str(&text).map_err(|e| RestError::MalformedResponse(e.to_string()))
    }

    /// Build `<public_url>/<endpoint>/<pair>[?limit=N]`, validating the
    /// limit before any network I/O
    fn paged_url(&self, endpoint: &str, pair: &str, limit: Option<u32>) -> RestResult<String> {
        let mut url = format!("{}/{}/{}", self.public_url, endpoint, pair);
        if let Some(limit) = limit {
            if !(MIN_LIMIT..=MAX_LIMIT).contains(&limit) {
                return Err(RestError::InvalidParameter(format!(
                    "limit must be within [{MIN_LIMIT}, {MAX_LIMIT}], found: {limit}"
                )));
            }
            url.push_str(&format!("?limit={}", limit));
        }
        Ok(url)
    }

    /// Get the ticker for a trading pair
    ///
    /// # Arguments
    /// * `pair` - Trading pair (e.g., "btc_usd")
    pub async fn get_ticker(&self, pair: &str) -> RestResult<HashMap<String, PairTicker>> {
        debug!("Fetching ticker for {}", pair);
        self.get_json(format!("{}/ticker/{}", self.public_url, pair))
            .await
    }

    /// Get order book depth for a trading pair
    ///
    /// # Arguments
    /// * `pair` - Trading pair
    /// * `limit` - Number of price levels (1-2000, server default 150)
    pub async fn get_depth(
        &self,
        pair: &str,
        limit: Option<u32>,
    ) -> RestResult<HashMap<String, PairDepth>> {
        let url = self.paged_url("depth", pair, limit)?;
        debug!("Fetching depth for {}", pair);
        self.get_json(url).await
    }

    /// Get recent trades for a trading pair
    ///
    /// # Arguments
    /// * `pair` - Trading pair
    /// * `limit` - Number of trades (1-2000, server default 150)
    pub async fn get_trades(
        &self,
        pair: &str,
        limit: Option<u32>,
    ) -> RestResult<HashMap<String, Vec<PublicTrade>>> {
        let url = self.paged_url("trades", pair, limit)?;
        debug!("Fetching trades for {}", pair);
        self.get_json(url).await
    }

    /// Get the trading fee for a pair
    pub async fn get_fee(&self, pair: &str) -> RestResult<HashMap<String, PairFee>> {
        debug!("Fetching fee for {}", pair);
        self.get_json(format!("{}/fee/{}", self.public_url, pair))
            .await
    }
}

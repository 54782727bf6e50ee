//! Main REST client implementation

use btce_auth::{Credentials, NonceSource};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;
use tracing::info;

use crate::endpoints::{AccountEndpoints, MarketEndpoints, TradingEndpoints};
use crate::error::{RestError, RestResult};
use crate::transport::Transport;
use crate::types::{
    AccountInfo, ActiveOrder, CancelOrderResult, Direction, HistoricalTrade, HistoryQuery,
    OrderInfo, PairDepth, PairFee, PairTicker, PublicTrade, TradeResult, Transaction,
};

/// Default request timeout for authenticated calls
const DEFAULT_TIMEOUT_SECS: u64 = 30;

const DEFAULT_TRADE_URL: &str = "https://btc-e.nz/tapi/";
const DEFAULT_PUBLIC_URL: &str = "https://btc-e.nz/api/3";

/// BTC-e REST API client
///
/// Provides access to both public and private endpoints.
///
/// The nonce counter is owned by the client, so all private calls must
/// go through one instance per API key. Share a client across tasks with
/// `Arc` rather than constructing a second one; two instances on one key
/// race on the server-side nonce check.
///
/// # Example
///
/// ```no_run
/// use btce_rest::{BtceClient, Credentials};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Public endpoints only
///     let client = BtceClient::new();
///     let ticker = client.get_ticker("btc_usd").await?;
///
///     // With authentication for private endpoints
///     let creds = Credentials::from_env()?;
///     let auth_client = BtceClient::with_credentials(creds);
///     let info = auth_client.get_info().await?;
///
///     Ok(())
/// }
/// ```
pub struct BtceClient {
    http_client: Client,
    public_url: String,
    transport: Option<Transport>,
}

impl BtceClient {
    /// Create a new client without authentication
    ///
    /// Only public endpoints will be available.
    pub fn new() -> Self {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with credentials
    ///
    /// All endpoints (public and private) will be available. The nonce
    /// counter is seeded from the current Unix time.
    pub fn with_credentials(credentials: Credentials) -> Self {
        Self::with_config(ClientConfig::default().with_credentials(credentials))
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_deref().unwrap_or("btce-rest/0.1.0"))
            .build()
            .expect("Failed to create HTTP client");

        info!("Created BTC-e REST client");

        let transport = config.credentials.map(|credentials| {
            let nonces = match config.nonce_seed {
                Some(seed) => NonceSource::with_seed(seed),
                None => NonceSource::new(),
            };
            Transport::new(http_client.clone(), config.trade_url, credentials, nonces)
        });

        Self {
            http_client,
            public_url: config.public_url,
            transport,
        }
    }

    /// Check if the client has credentials for private endpoints
    pub fn has_credentials(&self) -> bool {
        self.transport.is_some()
    }

    fn transport(&self) -> RestResult<&Transport> {
        self.transport.as_ref().ok_or(RestError::AuthRequired)
    }

    /// Call a trade API method directly
    ///
    /// The envelope, nonce, and signature are handled by the client;
    /// callers supply only the method name and its parameters. Prefer
    /// the typed wrappers below unless a method has no wrapper.
    pub async fn query<T: DeserializeOwned>(
        &self,
        method: &str,
        params: &[(&str, String)],
    ) -> RestResult<T> {
        self.transport()?.dispatch(method, params).await
    }

    // ========================================================================
    // Public Market Endpoints
    // ========================================================================

    /// Get market endpoints
    pub fn market(&self) -> MarketEndpoints<'_> {
        MarketEndpoints::new(&self.http_client, &self.public_url)
    }

    /// Get the ticker for a trading pair
    pub async fn get_ticker(&self, pair: &str) -> RestResult<HashMap<String, PairTicker>> {
        self.market().get_ticker(pair).await
    }

    /// Get order book depth for a trading pair
    ///
    /// # Arguments
    /// * `pair` - Trading pair
    /// * `limit` - Number of price levels (1-2000)
    pub async fn get_depth(
        &self,
        pair: &str,
        limit: Option<u32>,
    ) -> RestResult<HashMap<String, PairDepth>> {
        self.market().get_depth(pair, limit).await
    }

    /// Get recent trades for a trading pair
    pub async fn get_trades(
        &self,
        pair: &str,
        limit: Option<u32>,
    ) -> RestResult<HashMap<String, Vec<PublicTrade>>> {
        self.market().get_trades(pair, limit).await
    }

    /// Get the trading fee for a pair
    pub async fn get_fee(&self, pair: &str) -> RestResult<HashMap<String, PairFee>> {
        self.market().get_fee(pair).await
    }

    // ========================================================================
    // Private Account Endpoints
    // ========================================================================

    /// Get account endpoints (requires credentials)
    pub fn account(&self) -> RestResult<AccountEndpoints<'_>> {
        Ok(AccountEndpoints::new(self.transport()?))
    }

    /// Get account balances and key permissions
    pub async fn get_info(&self) -> RestResult<AccountInfo> {
        self.account()?.get_info().await
    }

    /// Get the funds-movement history
    pub async fn transaction_history(
        &self,
        query: &HistoryQuery,
    ) -> RestResult<HashMap<String, Transaction>> {
        self.account()?.transaction_history(query).await
    }

    /// Get the executed-trade history
    pub async fn trade_history(
        &self,
        query: &HistoryQuery,
    ) -> RestResult<HashMap<String, HistoricalTrade>> {
        self.account()?.trade_history(query).await
    }

    // ========================================================================
    // Private Trading Endpoints
    // ========================================================================

    /// Get trading endpoints (requires credentials)
    pub fn trading(&self) -> RestResult<TradingEndpoints<'_>> {
        Ok(TradingEndpoints::new(self.transport()?))
    }

    /// Place an order, validating the direction string first
    ///
    /// `direction` must be `"buy"` or `"sell"`; anything else fails with
    /// [`RestError::InvalidParameter`] before any request is built.
    pub async fn place_order(
        &self,
        pair: &str,
        direction: &str,
        rate: Decimal,
        amount: Decimal,
    ) -> RestResult<TradeResult> {
        let direction: Direction = direction
            .parse()
            .map_err(|e: crate::types::ParseDirectionError| {
                RestError::InvalidParameter(e.to_string())
            })?;
        self.trading()?.trade(pair, direction, rate, amount).await
    }

    /// Cancel an open order by id
    pub async fn cancel_order(&self, order_id: u64) -> RestResult<CancelOrderResult> {
        self.trading()?.cancel_order(order_id).await
    }

    /// List open orders, optionally restricted to one pair
    pub async fn active_orders(
        &self,
        pair: Option<&str>,
    ) -> RestResult<HashMap<String, ActiveOrder>> {
        self.trading()?.active_orders(pair).await
    }

    /// Look up a completed order by id
    pub async fn order_info(&self, order_id: u64) -> RestResult<HashMap<String, OrderInfo>> {
        self.trading()?.order_info(order_id).await
    }
}

impl Default for BtceClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for BtceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BtceClient")
            .field("has_credentials", &self.has_credentials())
            .finish()
    }
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API credentials (optional)
    pub credentials: Option<Credentials>,
    /// Explicit starting nonce; seeded from Unix time when unset
    pub nonce_seed: Option<u64>,
    /// Request timeout in seconds for authenticated calls
    pub timeout_secs: u64,
    /// Custom user agent
    pub user_agent: Option<String>,
    /// Trade API endpoint
    pub trade_url: String,
    /// Public API base URL (no trailing slash)
    pub public_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            nonce_seed: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
            trade_url: DEFAULT_TRADE_URL.to_string(),
            public_url: DEFAULT_PUBLIC_URL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set an explicit starting nonce
    pub fn with_nonce_seed(mut self, seed: u64) -> Self {
        self.nonce_seed = Some(seed);
        self
    }

    /// Set the authenticated-call timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set a custom user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Override the trade API endpoint
    pub fn with_trade_url(mut self, url: impl Into<String>) -> Self {
        self.trade_url = url.into();
        self
    }

    /// Override the public API base URL
    pub fn with_public_url(mut self, url: impl Into<String>) -> Self {
        self.public_url = url.into();
        self
    }
}

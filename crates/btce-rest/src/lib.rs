//! REST API client for the BTC-e cryptocurrency exchange
//!
//! This crate provides a complete client for trading on BTC-e, covering
//! public market data and the authenticated trade API ("tapi").
//!
//! # Features
//!
//! - **Market Data**: Ticker, depth, recent trades, fees
//! - **Account**: Balances, transaction and trade history
//! - **Trading**: Place and cancel orders, query open and past orders
//!
//! # Authentication
//!
//! Private endpoints sign the URL-encoded POST body with HMAC-SHA512 and
//! send the hex digest in the `Sign` header next to the API key in the
//! `Key` header. Every request carries a strictly increasing nonce; when
//! the server rejects a nonce and names the value it expects, the client
//! resynchronizes its counter and retries that call exactly once.
//!
//! # Example
//!
//! ```no_run
//! use btce_rest::{BtceClient, Credentials, HistoryQuery, pairs};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Public endpoints (no auth required)
//!     let client = BtceClient::new();
//!     let ticker = client.get_ticker(pairs::BTC_USD).await?;
//!     println!("btc_usd: {:?}", ticker);
//!
//!     // Private endpoints (auth required)
//!     let creds = Credentials::from_env()?;
//!     let auth_client = BtceClient::with_credentials(creds);
//!     let trades = auth_client.trade_history(&HistoryQuery::new()).await?;
//!     println!("Trades: {:?}", trades);
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod endpoints;
pub mod error;
pub mod types;

mod transport;

// Re-export main types
pub use btce_auth::{Credentials, NonceSource};
pub use client::{BtceClient, ClientConfig};
pub use error::{RestError, RestResult};

// Re-export endpoint-specific types
pub use types::{
    // Market data
    pairs, PairDepth, PairFee, PairTicker, PublicTrade, TradeType,
    // Account
    AccountInfo, AccountRights, HistoricalTrade, HistoryQuery, Transaction,
    // Trading
    ActiveOrder, CancelOrderResult, Direction, OrderBy, OrderInfo, TradeResult,
    // Responses
    TapiResponse,
};

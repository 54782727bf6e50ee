//! Types for BTC-e API requests and responses

use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Trade API Response Wrapper
// ============================================================================

/// Standard trade API ("tapi") response wrapper
///
/// BTC-e replies with either `{"success":1,"return":{...}}` or
/// `{"success":0,"error":"<message>"}`.
#[derive(Debug, Deserialize)]
pub struct TapiResponse<T> {
    /// 1 on success, 0 on error
    pub success: i64,
    /// Result data (present if successful)
    #[serde(rename = "return")]
    pub payload: Option<T>,
    /// Error message (present on failure)
    pub error: Option<String>,
}

impl<T> TapiResponse<T> {
    /// Check if the response indicates success
    pub fn is_success(&self) -> bool {
        self.success == 1
    }

    /// Get the payload, returning the error message otherwise
    pub fn into_result(self) -> Result<T, String> {
        if self.success == 1 {
            self.payload
                .ok_or_else(|| "success reply without a return payload".to_string())
        } else {
            Err(self
                .error
                .unwrap_or_else(|| "non-success reply without an error message".to_string()))
        }
    }
}

// ============================================================================
// Request Enums
// ============================================================================

/// Order direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Buy the base currency
    Buy,
    /// Sell the base currency
    Sell,
}

impl Direction {
    /// Wire representation (`buy` / `sell`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a [`Direction`] from a string
#[derive(Debug, thiserror::Error)]
#[error("expected direction \"buy\" or \"sell\", found: {0}")]
pub struct ParseDirectionError(String);

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buy" => Ok(Self::Buy),
            "sell" => Ok(Self::Sell),
            other => Err(ParseDirectionError(other.to_string())),
        }
    }
}

/// Result ordering for history queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderBy {
    /// Oldest first
    Ascending,
    /// Newest first (server default)
    #[default]
    Descending,
}

impl OrderBy {
    /// Wire representation (`ASC` / `DESC`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// History Query
// ============================================================================

/// Filter for transaction and trade history queries
///
/// Unset fields are omitted from the request, leaving the server
/// defaults in effect.
#[derive(Debug, Clone, Default)]
pub struct HistoryQuery {
    /// Offset of the first row to return
    pub from: Option<u64>,
    /// Maximum number of rows to return
    pub count: Option<u32>,
    /// Lower bound on row id
    pub from_id: Option<u64>,
    /// Upper bound on row id
    pub end_id: Option<u64>,
    /// Result ordering
    pub order: Option<OrderBy>,
    /// Lower time bound (Unix seconds)
    pub since: Option<u64>,
    /// Upper time bound (Unix seconds)
    pub end: Option<u64>,
    /// Restrict to one trading pair (trade history only)
    pub pair: Option<String>,
}

impl HistoryQuery {
    /// Create an empty query (server defaults for everything)
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the row offset
    pub fn with_from(mut self, from: u64) -> Self {
        self.from = Some(from);
        self
    }

    /// Set the maximum row count
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    /// Set the lower row-id bound
    pub fn with_from_id(mut self, from_id: u64) -> Self {
        self.from_id = Some(from_id);
        self
    }

    /// Set the upper row-id bound
    pub fn with_end_id(mut self, end_id: u64) -> Self {
        self.end_id = Some(end_id);
        self
    }

    /// Set the result ordering
    pub fn with_order(mut self, order: OrderBy) -> Self {
        self.order = Some(order);
        self
    }

    /// Set the lower time bound (Unix seconds)
    pub fn with_since(mut self, since: u64) -> Self {
        self.since = Some(since);
        self
    }

    /// Set the upper time bound (Unix seconds)
    pub fn with_end(mut self, end: u64) -> Self {
        self.end = Some(end);
        self
    }

    /// Restrict results to one trading pair
    pub fn with_pair(mut self, pair: impl Into<String>) -> Self {
        self.pair = Some(pair.into());
        self
    }

    /// Build the request parameters, skipping unset fields
    pub(crate) fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(from) = self.from {
            params.push(("from", from.to_string()));
        }
        if let Some(count) = self.count {
            params.push(("count", count.to_string()));
        }
        if let Some(from_id) = self.from_id {
            params.push(("from_id", from_id.to_string()));
        }
        if let Some(end_id) = self.end_id {
            params.push(("end_id", end_id.to_string()));
        }
        if let Some(order) = self.order {
            params.push(("order", order.to_string()));
        }
        if let Some(since) = self.since {
            params.push(("since", since.to_string()));
        }
        if let Some(end) = self.end {
            params.push(("end", end.to_string()));
        }
        if let Some(pair) = &self.pair {
            params.push(("pair", pair.clone()));
        }
        params
    }
}

// ============================================================================
// Market Data Types
// ============================================================================

/// Ticker for a trading pair
#[derive(Debug, Clone, Deserialize)]
pub struct PairTicker {
    /// Highest trade price in the last 24 hours
    pub high: Decimal,
    /// Lowest trade price in the last 24 hours
    pub low: Decimal,
    /// Average price over the last 24 hours
    pub avg: Decimal,
    /// Trade volume in the quote currency
    pub vol: Decimal,
    /// Trade volume in the base currency
    pub vol_cur: Decimal,
    /// Last trade price
    pub last: Decimal,
    /// Current best bid
    pub buy: Decimal,
    /// Current best ask
    pub sell: Decimal,
    /// Unix timestamp of the last update
    pub updated: u64,
}

impl PairTicker {
    /// Mid price (average of best bid and best ask)
    pub fn mid_price(&self) -> Decimal {
        (self.buy + self.sell) / Decimal::TWO
    }
}

/// Order book snapshot for a trading pair
#[derive(Debug, Clone, Deserialize)]
pub struct PairDepth {
    /// Ask levels as `[price, amount]` pairs, best first
    pub asks: Vec<[Decimal; 2]>,
    /// Bid levels as `[price, amount]` pairs, best first
    pub bids: Vec<[Decimal; 2]>,
}

/// Public trade side as reported by the depth feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeType {
    /// Trade hit the ask side
    Ask,
    /// Trade hit the bid side
    Bid,
}

/// A single public trade
#[derive(Debug, Clone, Deserialize)]
pub struct PublicTrade {
    /// Which side of the book was hit
    #[serde(rename = "type")]
    pub kind: TradeType,
    /// Execution price
    pub price: Decimal,
    /// Executed amount in the base currency
    pub amount: Decimal,
    /// Trade id
    pub tid: u64,
    /// Unix timestamp
    pub timestamp: u64,
}

/// Trading fee for a pair
#[derive(Debug, Clone, Deserialize)]
pub struct PairFee {
    /// Fee as a percentage of trade volume
    pub trade: Decimal,
}

// ============================================================================
// Account & Trading Types
// ============================================================================

/// Account information returned by `getInfo`
#[derive(Debug, Clone, Deserialize)]
pub struct AccountInfo {
    /// Available balance per currency
    pub funds: HashMap<String, Decimal>,
    /// API key permissions
    pub rights: AccountRights,
    /// Number of transactions on the account
    pub transaction_count: u64,
    /// Number of open orders
    pub open_orders: u64,
    /// Server time (Unix seconds)
    pub server_time: u64,
}

/// Permissions attached to an API key
#[derive(Debug, Clone, Deserialize)]
pub struct AccountRights {
    /// May query account information
    pub info: u8,
    /// May place and cancel orders
    pub trade: u8,
    /// May withdraw funds
    pub withdraw: u8,
}

/// Result of placing an order via `Trade`
#[derive(Debug, Clone, Deserialize)]
pub struct TradeResult {
    /// Amount filled immediately
    pub received: Decimal,
    /// Amount left on the book
    pub remains: Decimal,
    /// Order id; 0 if the order filled completely on placement
    pub order_id: u64,
    /// Balances after the trade
    pub funds: HashMap<String, Decimal>,
}

/// Result of `CancelOrder`
#[derive(Debug, Clone, Deserialize)]
pub struct CancelOrderResult {
    /// Id of the cancelled order
    pub order_id: u64,
    /// Balances after the cancellation
    pub funds: HashMap<String, Decimal>,
}

/// An open order returned by `ActiveOrders`
#[derive(Debug, Clone, Deserialize)]
pub struct ActiveOrder {
    /// Trading pair
    pub pair: String,
    /// Order direction
    #[serde(rename = "type")]
    pub direction: Direction,
    /// Remaining amount
    pub amount: Decimal,
    /// Order price
    pub rate: Decimal,
    /// Creation time (Unix seconds)
    pub timestamp_created: u64,
    /// Order status (0 = active)
    pub status: u8,
}

/// A funds movement returned by `TransHistory`
#[derive(Debug, Clone, Deserialize)]
pub struct Transaction {
    /// Transaction type code
    #[serde(rename = "type")]
    pub kind: u8,
    /// Transaction amount
    pub amount: Decimal,
    /// Currency of the amount
    pub currency: String,
    /// Human-readable description
    pub desc: String,
    /// Transaction status code
    pub status: u8,
    /// Unix timestamp
    pub timestamp: u64,
}

/// An executed trade returned by `TradeHistory`
#[derive(Debug, Clone, Deserialize)]
pub struct HistoricalTrade {
    /// Trading pair
    pub pair: String,
    /// Order direction
    #[serde(rename = "type")]
    pub direction: Direction,
    /// Executed amount
    pub amount: Decimal,
    /// Execution price
    pub rate: Decimal,
    /// Id of the order this trade filled
    pub order_id: u64,
    /// 1 if the order was placed by this account
    pub is_your_order: u8,
    /// Unix timestamp
    pub timestamp: u64,
}

/// An order returned by `OrderList`
#[derive(Debug, Clone, Deserialize)]
pub struct OrderInfo {
    /// Trading pair
    pub pair: String,
    /// Order direction
    #[serde(rename = "type")]
    pub direction: Direction,
    /// Original order amount
    pub start_amount: Option<Decimal>,
    /// Remaining amount
    pub amount: Decimal,
    /// Order price
    pub rate: Decimal,
    /// Creation time (Unix seconds)
    pub timestamp_created: u64,
    /// Order status (0 active, 1 executed, 2 cancelled, 3 partial cancel)
    pub status: u8,
}

// ============================================================================
// Trading Pairs
// ============================================================================

/// Named trading-pair identifiers
///
/// Pairs are open strings validated only by the server; these constants
/// cover the pairs BTC-e listed.
pub mod pairs {
    pub const BTC_USD: &str = "btc_usd";
    pub const BTC_RUR: &str = "btc_rur";
    pub const BTC_EUR: &str = "btc_eur";

    pub const LTC_BTC: &str = "ltc_btc";
    pub const LTC_USD: &str = "ltc_usd";
    pub const LTC_RUR: &str = "ltc_rur";
    pub const LTC_EUR: &str = "ltc_eur";

    pub const NMC_BTC: &str = "nmc_btc";
    pub const NMC_USD: &str = "nmc_usd";

    pub const NVC_BTC: &str = "nvc_btc";
    pub const NVC_USD: &str = "nvc_usd";

    pub const USD_RUR: &str = "usd_rur";
    pub const EUR_USD: &str = "eur_usd";
    pub const EUR_RUR: &str = "eur_rur";

    pub const PPC_BTC: &str = "ppc_btc";
    pub const PPC_USD: &str = "ppc_usd";

    pub const DSH_BTC: &str = "dsh_btc";
    pub const DSH_USD: &str = "dsh_usd";

    pub const ETH_BTC: &str = "eth_btc";
    pub const ETH_USD: &str = "eth_usd";
    pub const ETH_EUR: &str = "eth_eur";
    pub const ETH_LTC: &str = "eth_ltc";
    pub const ETH_RUR: &str = "eth_rur";
}

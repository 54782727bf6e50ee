//! Trading endpoints for order management
//!
//! These endpoints require authentication.

use rust_decimal::Decimal;
use std::collections::HashMap;
use tracing::debug;

use crate::error::RestResult;
use crate::transport::Transport;
use crate::types::{ActiveOrder, CancelOrderResult, Direction, OrderInfo, TradeResult};

/// Trading endpoints for order management
pub struct TradingEndpoints<'a> {
    transport: &'a Transport,
}

impl<'a> TradingEndpoints<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// Place an order
    ///
    /// # Arguments
    /// * `pair` - Trading pair (e.g., "btc_usd")
    /// * `direction` - Buy or sell
    /// * `rate` - Limit price in the quote currency
    /// * `amount` - Amount in the base currency
    pub async fn trade(
        &self,
        pair: &str,
        direction: Direction,
        rate: Decimal,
        amount: Decimal,
    ) -> RestResult<TradeResult> {
        let params = [
            ("pair", pair.to_string()),
            ("type", direction.to_string()),
            ("rate", rate.to_string()),
            ("amount", amount.to_string()),
        ];
        debug!("Placing {} order for {} {} at {}", direction, amount, pair, rate);
        self.transport.dispatch("Trade", &params).await
    }

    /// Cancel an open order
    pub async fn cancel_order(&self, order_id: u64) -> RestResult<CancelOrderResult> {
        let params = [("order_id", order_id.to_string())];
        debug!("Cancelling order {}", order_id);
        self.transport.dispatch("CancelOrder", &params).await
    }

    /// List open orders, keyed by order id
    ///
    /// # Arguments
    /// * `pair` - Restrict to one trading pair; `None` lists all pairs
    pub async fn active_orders(
        &self,
        pair: Option<&str>,
    ) -> RestResult<HashMap<String, ActiveOrder>> {
        let mut params = Vec::new();
        if let Some(pair) = pair {
            params.push(("pair", pair.to_string()));
        }
        debug!("Listing active orders");
        self.transport.dispatch("ActiveOrders", &params).await
    }

    /// Look up a completed (non-active) order by id
    pub async fn order_info(&self, order_id: u64) -> RestResult<HashMap<String, OrderInfo>> {
        let params = [
            ("from_id", order_id.to_string()),
            ("to_id", order_id.to_string()),
            ("active", "0".to_string()),
        ];
        debug!("Looking up order {}", order_id);
        self.transport.dispatch("OrderList", &params).await
    }
}

//! Account endpoints for balances and history
//!
//! These endpoints require authentication.

use std::collections::HashMap;
use tracing::debug;

use crate::error::RestResult;
use crate::transport::Transport;
use crate::types::{AccountInfo, HistoricalTrade, HistoryQuery, Transaction};

/// Account endpoints for balances and history
pub struct AccountEndpoints<'a> {
    transport: &'a Transport,
}

impl<'a> AccountEndpoints<'a> {
    pub(crate) fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// Get account balances, key permissions, and open-order count
    pub async fn get_info(&self) -> RestResult<AccountInfo> {
        debug!("Fetching account info");
        self.transport.dispatch("getInfo", &[]).await
    }

    /// Get the funds-movement history, keyed by transaction id
    ///
    /// Unset [`HistoryQuery`] fields are left to the server defaults.
    /// The `pair` filter is ignored by this method.
    pub async fn transaction_history(
        &self,
        query: &HistoryQuery,
    ) -> RestResult<HashMap<String, Transaction>> {
        debug!("Fetching transaction history");
        self.transport
            .dispatch("TransHistory", &query.to_params())
            .await
    }

    /// Get the executed-trade history, keyed by trade id
    pub async fn trade_history(
        &self,
        query: &HistoryQuery,
    ) -> RestResult<HashMap<String, HistoricalTrade>> {
        debug!("Fetching trade history");
        self.transport
            .dispatch("TradeHistory", &query.to_params())
            .await
    }
}

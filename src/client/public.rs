use crate::core::errors::BackpackError;
use crate::core::kernel::RestClient;
use serde_json::Value;
use std::collections::HashMap;

/// Unauthenticated market-data client
///
/// Every method issues one unsigned GET and returns the raw JSON response.
/// Generic over the transport so a test double can be injected.
pub struct PublicClient<R: RestClient> {
    rest: R,
}

impl<R: RestClient> PublicClient<R> {
    pub fn new(rest: R) -> Self {
        Self { rest }
    }

    fn require_symbol(symbol: &str) -> Result<(), BackpackError> {
        if symbol.trim().is_empty() {
            return Err(BackpackError::InvalidParameters(
                "symbol must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    async fn get(&self, endpoint: &str, query: &[(String, String)]) -> Result<Value, BackpackError> {
        self.rest.get(endpoint, query, &HashMap::new()).await
    }

    /// Get all supported assets
    pub async fn get_assets(&self) -> Result<Value, BackpackError> {
        self.get("/api/v1/assets", &[]).await
    }

    /// Get all supported markets
    pub async fn get_markets(&self) -> Result<Value, BackpackError> {
        self.get("/api/v1/markets", &[]).await
    }

    /// Get the 24h ticker for a symbol
    pub async fn get_ticker(&self, symbol: &str) -> Result<Value, BackpackError> {
        Self::require_symbol(symbol)?;
        let query = vec![("symbol".to_string(), symbol.to_string())];
        self.get("/api/v1/ticker", &query).await
    }

    /// Get the order book depth for a symbol
    pub async fn get_depth(&self, symbol: &str) -> Result<Value, BackpackError> {
        Self::require_symbol(symbol)?;
        let query = vec![("symbol".to_string(), symbol.to_string())];
        self.get("/api/v1/depth", &query).await
    }

    /// Get k-lines for a symbol at the given interval (e.g. "1m", "1h", "1d")
    pub async fn get_klines(
        &self,
        symbol: &str,
        interval: &str,
        start_time: Option<i64>,
        end_time: Option<i64>,
    ) -> Result<Value, BackpackError> {
        Self::require_symbol(symbol)?;
        let mut query = vec![
            ("symbol".to_string(), symbol.to_string()),
            ("interval".to_string(), interval.to_string()),
        ];
        if let Some(start_time) = start_time {
            query.push(("startTime".to_string(), start_time.to_string()));
        }
        if let Some(end_time) = end_time {
            query.push(("endTime".to_string(), end_time.to_string()));
        }
        self.get("/api/v1/klines", &query).await
    }

    /// Get the system status
    pub async fn get_status(&self) -> Result<Value, BackpackError> {
        self.get("/api/v1/status", &[]).await
    }

    /// Ping the API; answers "pong"
    pub async fn get_ping(&self) -> Result<Value, BackpackError> {
        self.get("/api/v1/ping", &[]).await
    }

    /// Get the server time in milliseconds
    pub async fn get_time(&self) -> Result<Value, BackpackError> {
        self.get("/api/v1/time", &[]).await
    }

    /// Get the most recent trades for a symbol
    pub async fn get_recent_trades(
        &self,
        symbol: &str,
        limit: Option<u32>,
    ) -> Result<Value, BackpackError> {
        Self::require_symbol(symbol)?;
        let mut query = vec![("symbol".to_string(), symbol.to_string())];
        if let Some(limit) = limit {
            query.push(("limit".to_string(), limit.to_string()));
        }
        self.get("/api/v1/trades", &query).await
    }

    /// Get older trades for a symbol, paged by limit/offset
    pub async fn get_history_trades(
        &self,
        symbol: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Value, BackpackError> {
        Self::require_symbol(symbol)?;
        let query = vec![
            ("symbol".to_string(), symbol.to_string()),
            ("limit".to_string(), limit.to_string()),
            ("offset".to_string(), offset.to_string()),
        ];
        self.get("/api/v1/trades/history", &query).await
    }
}

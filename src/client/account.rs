use crate::client::request::RequestBuilder;
use crate::client::types::ExecuteOrderRequest;
use crate::core::errors::BackpackError;
use crate::core::kernel::RestClient;
use serde_json::Value;

/// Authenticated account and order client
///
/// Composition of a stateless `RequestBuilder` (parameter marshaling and
/// signing) and an owned transport: each method builds the signed request,
/// dispatches it with the proper verb and returns the raw JSON response.
/// Errors from the transport pass through unchanged; there are no retries.
pub struct AccountClient<R: RestClient> {
    rest: R,
    builder: RequestBuilder,
}

impl<R: RestClient> AccountClient<R> {
    pub fn new(rest: R, builder: RequestBuilder) -> Self {
        Self { rest, builder }
    }

    /// Get the account balances
    pub async fn get_balances(&self, window: Option<u64>) -> Result<Value, BackpackError> {
        let request = self.builder.get_balances(window)?;
        self.rest
            .get(request.path, &request.query(), &request.headers)
            .await
    }

    /// Get the account deposits, paged by limit/offset with an optional
    /// millisecond time range
    pub async fn get_deposits(
        &self,
        limit: u64,
        offset: u64,
        from: Option<u64>,
        to: Option<u64>,
        window: Option<u64>,
    ) -> Result<Value, BackpackError> {
        let request = self.builder.get_deposits(limit, offset, from, to, window)?;
        self.rest
            .get(request.path, &request.query(), &request.headers)
            .await
    }

    /// Get the deposit address for a blockchain (e.g. "Solana")
    pub async fn get_deposit_address(
        &self,
        blockchain: &str,
        window: Option<u64>,
    ) -> Result<Value, BackpackError> {
        let request = self.builder.get_deposit_address(blockchain, window)?;
        self.rest
            .get(request.path, &request.query(), &request.headers)
            .await
    }

    /// Get the account withdrawals
    pub async fn get_withdrawals(
        &self,
        limit: u64,
        offset: u64,
        from: Option<u64>,
        to: Option<u64>,
        window: Option<u64>,
    ) -> Result<Value, BackpackError> {
        let request = self
            .builder
            .get_withdrawals(limit, offset, from, to, window)?;
        self.rest
            .get(request.path, &request.query(), &request.headers)
            .await
    }

    /// Submit a withdrawal and return its status
    pub async fn request_withdrawal(
        &self,
        address: &str,
        symbol: &str,
        blockchain: &str,
        quantity: &str,
        window: Option<u64>,
    ) -> Result<Value, BackpackError> {
        let request =
            self.builder
                .request_withdrawal(address, symbol, blockchain, quantity, window)?;
        self.rest
            .post(request.path, &request.body(), &request.headers)
            .await
    }

    /// Get the order history for a symbol
    pub async fn get_order_history(
        &self,
        symbol: &str,
        limit: u64,
        offset: u64,
        window: Option<u64>,
    ) -> Result<Value, BackpackError> {
        let request = self
            .builder
            .get_order_history(symbol, limit, offset, window)?;
        self.rest
            .get(request.path, &request.query(), &request.headers)
            .await
    }

    /// Get the fill history for a symbol
    pub async fn get_fill_history(
        &self,
        symbol: &str,
        limit: u64,
        offset: u64,
        from: Option<u64>,
        to: Option<u64>,
        window: Option<u64>,
    ) -> Result<Value, BackpackError> {
        let request =
            self.builder
                .get_fill_history(symbol, limit, offset, from, to, window)?;
        self.rest
            .get(request.path, &request.query(), &request.headers)
            .await
    }

    /// Look up one open order by exchange order id or client id
    pub async fn get_open_order(
        &self,
        symbol: &str,
        order_id: Option<&str>,
        client_id: Option<u32>,
        window: Option<u64>,
    ) -> Result<Value, BackpackError> {
        let request = self
            .builder
            .get_open_order(symbol, order_id, client_id, window)?;
        self.rest
            .get(request.path, &request.query(), &request.headers)
            .await
    }

    /// Place an order and return the execution status
    pub async fn execute_order(
        &self,
        order: &ExecuteOrderRequest,
        window: Option<u64>,
    ) -> Result<Value, BackpackError> {
        let request = self.builder.execute_order(order, window)?;
        self.rest
            .post(request.path, &request.body(), &request.headers)
            .await
    }

    /// Cancel one order by exchange order id or client id
    pub async fn cancel_order(
        &self,
        symbol: &str,
        order_id: Option<&str>,
        client_id: Option<u32>,
        window: Option<u64>,
    ) -> Result<Value, BackpackError> {
        let request = self
            .builder
            .cancel_order(symbol, order_id, client_id, window)?;
        self.rest
            .delete(request.path, &request.body(), &request.headers)
            .await
    }

    /// List the open orders for a symbol
    pub async fn get_open_orders(
        &self,
        symbol: &str,
        window: Option<u64>,
    ) -> Result<Value, BackpackError> {
        let request = self.builder.get_open_orders(symbol, window)?;
        self.rest
            .get(request.path, &request.query(), &request.headers)
            .await
    }

    /// Cancel all open orders for a symbol
    pub async fn cancel_all_orders(
        &self,
        symbol: &str,
        window: Option<u64>,
    ) -> Result<Value, BackpackError> {
        let request = self.builder.cancel_all_orders(symbol, window)?;
        self.rest
            .delete(request.path, &request.body(), &request.headers)
            .await
    }
}

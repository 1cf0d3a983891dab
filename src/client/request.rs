use crate::client::types::ExecuteOrderRequest;
use crate::core::errors::BackpackError;
use crate::core::kernel::{Params, RequestSigner};
use reqwest::Method;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// A fully prepared authenticated request, ready for dispatch
///
/// Built fresh per call and never reused. The parameter mapping is sorted by
/// key, matching the canonical string the signature covers.
#[derive(Debug)]
pub struct SignedRequest {
    pub method: Method,
    pub path: &'static str,
    pub headers: HashMap<String, String>,
    pub params: Params,
}

impl SignedRequest {
    /// Parameters rendered as query pairs for GET dispatch
    pub fn query(&self) -> Vec<(String, String)> {
        self.params
            .iter()
            .map(|(key, value)| {
                let rendered = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                ((*key).to_string(), rendered)
            })
            .collect()
    }

    /// Parameters as a JSON object for POST/DELETE dispatch
    pub fn body(&self) -> Value {
        let map: Map<String, Value> = self
            .params
            .iter()
            .map(|(key, value)| ((*key).to_string(), value.clone()))
            .collect();
        Value::Object(map)
    }
}

/// Builds signed requests for every authenticated Backpack operation
///
/// Pure request construction: validates arguments, marshals the parameter
/// mapping, resolves the instruction/path pair and invokes the signer. HTTP
/// dispatch is the owning client's job.
pub struct RequestBuilder {
    signer: Arc<dyn RequestSigner>,
    window: u64,
}

impl RequestBuilder {
    pub fn new(signer: Arc<dyn RequestSigner>, window: u64) -> Self {
        Self { signer, window }
    }

    /// Get the current timestamp in milliseconds
    fn current_timestamp() -> Result<u64, BackpackError> {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .map_err(|e| BackpackError::Other(format!("System time error: {}", e)))
    }

    fn require(field: &'static str, value: &str) -> Result<(), BackpackError> {
        if value.trim().is_empty() {
            return Err(BackpackError::InvalidParameters(format!(
                "{} must not be empty",
                field
            )));
        }
        Ok(())
    }

    /// Sign a parameter mapping and assemble the request
    pub(crate) fn signed(
        &self,
        instruction: &'static str,
        method: Method,
        path: &'static str,
        mut params: Params,
        window: Option<u64>,
        timestamp: u64,
    ) -> Result<SignedRequest, BackpackError> {
        params.sort_by_key(|(key, _)| *key);
        let window = window.unwrap_or(self.window);
        let signature = self.signer.sign(instruction, &params, timestamp, window)?;

        let mut headers = HashMap::new();
        headers.insert("X-API-Key".to_string(), self.signer.api_key());
        headers.insert("X-Signature".to_string(), signature);
        headers.insert("X-Timestamp".to_string(), timestamp.to_string());
        headers.insert("X-Window".to_string(), window.to_string());

        Ok(SignedRequest {
            method,
            path,
            headers,
            params,
        })
    }

    pub fn get_balances(&self, window: Option<u64>) -> Result<SignedRequest, BackpackError> {
        self.signed(
            "balanceQuery",
            Method::GET,
            "/api/v1/capital",
            Vec::new(),
            window,
            Self::current_timestamp()?,
        )
    }

    pub fn get_deposits(
        &self,
        limit: u64,
        offset: u64,
        from: Option<u64>,
        to: Option<u64>,
        window: Option<u64>,
    ) -> Result<SignedRequest, BackpackError> {
        let mut params: Params = vec![("limit", json!(limit)), ("offset", json!(offset))];
        if let Some(from) = from {
            params.push(("from", json!(from)));
        }
        if let Some(to) = to {
            params.push(("to", json!(to)));
        }
        self.signed(
            "depositQueryAll",
            Method::GET,
            "/wapi/v1/capital/deposits",
            params,
            window,
            Self::current_timestamp()?,
        )
    }

    pub fn get_deposit_address(
        &self,
        blockchain: &str,
        window: Option<u64>,
    ) -> Result<SignedRequest, BackpackError> {
        Self::require("blockchain", blockchain)?;
        let params: Params = vec![("blockchain", json!(blockchain))];
        self.signed(
            "depositAddressQuery",
            Method::GET,
            "/wapi/v1/capital/deposit/address",
            params,
            window,
            Self::current_timestamp()?,
        )
    }

    pub fn get_withdrawals(
        &self,
        limit: u64,
        offset: u64,
        from: Option<u64>,
        to: Option<u64>,
        window: Option<u64>,
    ) -> Result<SignedRequest, BackpackError> {
        let mut params: Params = vec![("limit", json!(limit)), ("offset", json!(offset))];
        if let Some(from) = from {
            params.push(("from", json!(from)));
        }
        if let Some(to) = to {
            params.push(("to", json!(to)));
        }
        self.signed(
            "withdrawalQueryAll",
            Method::GET,
            "/wapi/v1/capital/withdrawals",
            params,
            window,
            Self::current_timestamp()?,
        )
    }

    pub fn request_withdrawal(
        &self,
        address: &str,
        symbol: &str,
        blockchain: &str,
        quantity: &str,
        window: Option<u64>,
    ) -> Result<SignedRequest, BackpackError> {
        Self::require("address", address)?;
        Self::require("symbol", symbol)?;
        Self::require("blockchain", blockchain)?;
        Self::require("quantity", quantity)?;
        let params: Params = vec![
            ("address", json!(address)),
            ("blockchain", json!(blockchain)),
            ("quantity", json!(quantity)),
            ("symbol", json!(symbol)),
        ];
        self.signed(
            "withdraw",
            Method::POST,
            "/wapi/v1/capital/withdrawals",
            params,
            window,
            Self::current_timestamp()?,
        )
    }

    pub fn get_order_history(
        &self,
        symbol: &str,
        limit: u64,
        offset: u64,
        window: Option<u64>,
    ) -> Result<SignedRequest, BackpackError> {
        Self::require("symbol", symbol)?;
        let params: Params = vec![
            ("limit", json!(limit)),
            ("offset", json!(offset)),
            ("symbol", json!(symbol)),
        ];
        self.signed(
            "orderHistoryQueryAll",
            Method::GET,
            "/wapi/v1/history/orders",
            params,
            window,
            Self::current_timestamp()?,
        )
    }

    pub fn get_fill_history(
        &self,
        symbol: &str,
        limit: u64,
        offset: u64,
        from: Option<u64>,
        to: Option<u64>,
        window: Option<u64>,
    ) -> Result<SignedRequest, BackpackError> {
        Self::require("symbol", symbol)?;
        let mut params: Params = vec![
            ("limit", json!(limit)),
            ("offset", json!(offset)),
            ("symbol", json!(symbol)),
        ];
        if let Some(from) = from {
            params.push(("from", json!(from)));
        }
        if let Some(to) = to {
            params.push(("to", json!(to)));
        }
        self.signed(
            "fillHistoryQueryAll",
            Method::GET,
            "/wapi/v1/history/fills",
            params,
            window,
            Self::current_timestamp()?,
        )
    }

    /// Open order lookup by exchange order id or client id
    ///
    /// The exchange requires one of `order_id`/`client_id`; that rule is not
    /// enforced locally and the server rejects requests carrying neither.
    pub fn get_open_order(
        &self,
        symbol: &str,
        order_id: Option<&str>,
        client_id: Option<u32>,
        window: Option<u64>,
    ) -> Result<SignedRequest, BackpackError> {
        Self::require("symbol", symbol)?;
        let mut params: Params = vec![("symbol", json!(symbol))];
        if let Some(order_id) = order_id {
            params.push(("orderId", json!(order_id)));
        }
        if let Some(client_id) = client_id {
            params.push(("clientId", json!(client_id)));
        }
        self.signed(
            "orderQuery",
            Method::GET,
            "/api/v1/order",
            params,
            window,
            Self::current_timestamp()?,
        )
    }

    pub fn execute_order(
        &self,
        order: &ExecuteOrderRequest,
        window: Option<u64>,
    ) -> Result<SignedRequest, BackpackError> {
        Self::require("symbol", &order.symbol)?;
        self.signed(
            "orderExecute",
            Method::POST,
            "/api/v1/order",
            order.params(),
            window,
            Self::current_timestamp()?,
        )
    }

    pub fn cancel_order(
        &self,
        symbol: &str,
        order_id: Option<&str>,
        client_id: Option<u32>,
        window: Option<u64>,
    ) -> Result<SignedRequest, BackpackError> {
        Self::require("symbol", symbol)?;
        let mut params: Params = vec![("symbol", json!(symbol))];
        if let Some(order_id) = order_id {
            params.push(("orderId", json!(order_id)));
        }
        if let Some(client_id) = client_id {
            params.push(("clientId", json!(client_id)));
        }
        self.signed(
            "orderCancel",
            Method::DELETE,
            "/api/v1/order",
            params,
            window,
            Self::current_timestamp()?,
        )
    }

    pub fn get_open_orders(
        &self,
        symbol: &str,
        window: Option<u64>,
    ) -> Result<SignedRequest, BackpackError> {
        Self::require("symbol", symbol)?;
        let params: Params = vec![("symbol", json!(symbol))];
        self.signed(
            "orderQueryAll",
            Method::GET,
            "/api/v1/orders",
            params,
            window,
            Self::current_timestamp()?,
        )
    }

    pub fn cancel_all_orders(
        &self,
        symbol: &str,
        window: Option<u64>,
    ) -> Result<SignedRequest, BackpackError> {
        Self::require("symbol", symbol)?;
        let params: Params = vec![("symbol", json!(symbol))];
        self.signed(
            "orderCancelAll",
            Method::DELETE,
            "/api/v1/orders",
            params,
            window,
            Self::current_timestamp()?,
        )
    }
}

use crate::core::kernel::Params;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;

/// Order side as named by the exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderSide {
    Bid,
    Ask,
}

impl OrderSide {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bid => "Bid",
            Self::Ask => "Ask",
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderType {
    Market,
    Limit,
}

impl OrderType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Market => "Market",
            Self::Limit => "Limit",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeInForce {
    #[serde(rename = "GTC")]
    Gtc,
    #[serde(rename = "IOC")]
    Ioc,
    #[serde(rename = "FOK")]
    Fok,
}

impl TimeInForce {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gtc => "GTC",
            Self::Ioc => "IOC",
            Self::Fok => "FOK",
        }
    }
}

impl fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SelfTradePrevention {
    RejectTaker,
    RejectMaker,
    #[default]
    RejectBoth,
    Allow,
}

impl SelfTradePrevention {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RejectTaker => "RejectTaker",
            Self::RejectMaker => "RejectMaker",
            Self::RejectBoth => "RejectBoth",
            Self::Allow => "Allow",
        }
    }
}

impl fmt::Display for SelfTradePrevention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order placement request for `POST /api/v1/order`
///
/// Only `symbol`, `side` and `order_type` are required. Optional fields that
/// are left unset are omitted from the outgoing parameter mapping. The
/// exchange arbitrates mutually exclusive fields (`quantity` vs
/// `quote_quantity`); no local rule is enforced.
#[derive(Debug, Clone)]
pub struct ExecuteOrderRequest {
    pub symbol: String,
    pub side: OrderSide,
    pub order_type: OrderType,
    pub quantity: Option<String>,
    pub quote_quantity: Option<String>,
    pub price: Option<String>,
    pub trigger_price: Option<String>,
    pub time_in_force: Option<TimeInForce>,
    pub self_trade_prevention: SelfTradePrevention,
    pub client_id: Option<u32>,
    pub post_only: Option<bool>,
}

impl ExecuteOrderRequest {
    pub fn new(symbol: impl Into<String>, side: OrderSide, order_type: OrderType) -> Self {
        Self {
            symbol: symbol.into(),
            side,
            order_type,
            quantity: None,
            quote_quantity: None,
            price: None,
            trigger_price: None,
            time_in_force: None,
            self_trade_prevention: SelfTradePrevention::default(),
            client_id: None,
            post_only: None,
        }
    }

    /// Base asset quantity, as a decimal string
    pub fn with_quantity(mut self, quantity: impl Into<String>) -> Self {
        self.quantity = Some(quantity.into());
        self
    }

    /// Quote asset quantity for market orders, as a decimal string
    pub fn with_quote_quantity(mut self, quote_quantity: impl Into<String>) -> Self {
        self.quote_quantity = Some(quote_quantity.into());
        self
    }

    pub fn with_price(mut self, price: impl Into<String>) -> Self {
        self.price = Some(price.into());
        self
    }

    pub fn with_trigger_price(mut self, trigger_price: impl Into<String>) -> Self {
        self.trigger_price = Some(trigger_price.into());
        self
    }

    pub fn with_time_in_force(mut self, time_in_force: TimeInForce) -> Self {
        self.time_in_force = Some(time_in_force);
        self
    }

    pub fn with_self_trade_prevention(mut self, stp: SelfTradePrevention) -> Self {
        self.self_trade_prevention = stp;
        self
    }

    pub fn with_client_id(mut self, client_id: u32) -> Self {
        self.client_id = Some(client_id);
        self
    }

    pub fn with_post_only(mut self, post_only: bool) -> Self {
        self.post_only = Some(post_only);
        self
    }

    /// Parameter mapping with camelCase wire keys, unset optionals omitted
    pub(crate) fn params(&self) -> Params {
        let mut params: Params = vec![
            ("symbol", json!(self.symbol)),
            ("side", json!(self.side.as_str())),
            ("orderType", json!(self.order_type.as_str())),
        ];

        if let Some(ref quantity) = self.quantity {
            params.push(("quantity", json!(quantity)));
        }
        if let Some(ref quote_quantity) = self.quote_quantity {
            params.push(("quoteQuantity", json!(quote_quantity)));
        }
        if let Some(ref price) = self.price {
            params.push(("price", json!(price)));
        }
        if let Some(ref trigger_price) = self.trigger_price {
            params.push(("triggerPrice", json!(trigger_price)));
        }
        if let Some(time_in_force) = self.time_in_force {
            params.push(("timeInForce", json!(time_in_force.as_str())));
        }
        params.push((
            "selfTradePrevention",
            json!(self.self_trade_prevention.as_str()),
        ));
        if let Some(client_id) = self.client_id {
            params.push(("clientId", json!(client_id)));
        }
        if let Some(post_only) = self.post_only {
            params.push(("postOnly", json!(post_only)));
        }

        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enum_wire_names() {
        assert_eq!(OrderSide::Bid.as_str(), "Bid");
        assert_eq!(OrderSide::Ask.as_str(), "Ask");
        assert_eq!(OrderType::Limit.as_str(), "Limit");
        assert_eq!(TimeInForce::Gtc.as_str(), "GTC");
        assert_eq!(SelfTradePrevention::RejectBoth.as_str(), "RejectBoth");
    }

    #[test]
    fn self_trade_prevention_defaults_to_reject_both() {
        let order = ExecuteOrderRequest::new("SOL_USDC", OrderSide::Bid, OrderType::Limit);
        assert_eq!(order.self_trade_prevention, SelfTradePrevention::RejectBoth);
    }

    #[test]
    fn minimal_order_params() {
        let order = ExecuteOrderRequest::new("SOL_USDC", OrderSide::Bid, OrderType::Limit)
            .with_quantity("1")
            .with_price("100");
        let params = order.params();
        let keys: Vec<&str> = params.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            vec!["symbol", "side", "orderType", "quantity", "price", "selfTradePrevention"]
        );
        assert!(!keys.contains(&"quoteQuantity"));
        assert!(!keys.contains(&"triggerPrice"));
        assert!(!keys.contains(&"clientId"));
    }

    #[test]
    fn full_order_params() {
        let order = ExecuteOrderRequest::new("SOL_USDC", OrderSide::Ask, OrderType::Limit)
            .with_quantity("2")
            .with_price("150")
            .with_trigger_price("149")
            .with_time_in_force(TimeInForce::Ioc)
            .with_self_trade_prevention(SelfTradePrevention::Allow)
            .with_client_id(42)
            .with_post_only(true);
        let params = order.params();
        let lookup = |key: &str| {
            params
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.clone())
        };
        assert_eq!(lookup("timeInForce"), Some(json!("IOC")));
        assert_eq!(lookup("selfTradePrevention"), Some(json!("Allow")));
        assert_eq!(lookup("clientId"), Some(json!(42)));
        assert_eq!(lookup("postOnly"), Some(json!(true)));
    }
}

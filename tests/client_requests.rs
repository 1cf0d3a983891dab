use async_trait::async_trait;
use backpack_client::{
    AccountClient, BackpackError, Ed25519Signer, ExecuteOrderRequest, OrderSide, OrderType,
    PublicClient, RequestBuilder, RestClient, DEFAULT_WINDOW,
};
use base64::engine::general_purpose;
use base64::Engine;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Clone, Debug)]
struct RecordedCall {
    method: &'static str,
    endpoint: String,
    query: Vec<(String, String)>,
    headers: HashMap<String, String>,
    body: Option<Value>,
}

/// Transport double that records every dispatched request
#[derive(Clone, Default)]
struct RecordingRest {
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl RecordingRest {
    fn last_call(&self) -> RecordedCall {
        self.calls.lock().unwrap().last().cloned().expect("no call recorded")
    }
}

#[async_trait]
impl RestClient for RecordingRest {
    async fn get(
        &self,
        endpoint: &str,
        query: &[(String, String)],
        headers: &HashMap<String, String>,
    ) -> Result<Value, BackpackError> {
        self.calls.lock().unwrap().push(RecordedCall {
            method: "GET",
            endpoint: endpoint.to_string(),
            query: query.to_vec(),
            headers: headers.clone(),
            body: None,
        });
        Ok(json!({}))
    }

    async fn post(
        &self,
        endpoint: &str,
        body: &Value,
        headers: &HashMap<String, String>,
    ) -> Result<Value, BackpackError> {
        self.calls.lock().unwrap().push(RecordedCall {
            method: "POST",
            endpoint: endpoint.to_string(),
            query: Vec::new(),
            headers: headers.clone(),
            body: Some(body.clone()),
        });
        Ok(json!({}))
    }

    async fn delete(
        &self,
        endpoint: &str,
        body: &Value,
        headers: &HashMap<String, String>,
    ) -> Result<Value, BackpackError> {
        self.calls.lock().unwrap().push(RecordedCall {
            method: "DELETE",
            endpoint: endpoint.to_string(),
            query: Vec::new(),
            headers: headers.clone(),
            body: Some(body.clone()),
        });
        Ok(json!({}))
    }
}

fn public_client() -> (PublicClient<RecordingRest>, RecordingRest) {
    let rest = RecordingRest::default();
    (PublicClient::new(rest.clone()), rest)
}

fn account_client() -> (AccountClient<RecordingRest>, RecordingRest) {
    let secret = general_purpose::STANDARD.encode([5u8; 32]);
    let signer = Ed25519Signer::new(&secret).unwrap();
    let builder = RequestBuilder::new(Arc::new(signer), DEFAULT_WINDOW);
    let rest = RecordingRest::default();
    (AccountClient::new(rest.clone(), builder), rest)
}

#[tokio::test]
async fn public_endpoints_are_unsigned() {
    let (client, rest) = public_client();

    client.get_ping().await.unwrap();
    let ping = rest.last_call();
    assert_eq!(ping.method, "GET");
    assert_eq!(ping.endpoint, "/api/v1/ping");
    assert!(ping.headers.is_empty());
    assert!(ping.body.is_none());
    assert!(ping.query.is_empty());

    client.get_time().await.unwrap();
    assert_eq!(rest.last_call().endpoint, "/api/v1/time");

    client.get_status().await.unwrap();
    let status = rest.last_call();
    assert_eq!(status.endpoint, "/api/v1/status");
    assert!(status.headers.is_empty());
}

#[tokio::test]
async fn public_market_data_queries() {
    let (client, rest) = public_client();

    client.get_ticker("SOL_USDC").await.unwrap();
    let ticker = rest.last_call();
    assert_eq!(ticker.endpoint, "/api/v1/ticker");
    assert_eq!(
        ticker.query,
        vec![("symbol".to_string(), "SOL_USDC".to_string())]
    );

    client
        .get_klines("SOL_USDC", "1d", None, None)
        .await
        .unwrap();
    let klines = rest.last_call();
    assert_eq!(klines.endpoint, "/api/v1/klines");
    assert_eq!(klines.query.len(), 2);

    client.get_recent_trades("SOL_USDC", Some(25)).await.unwrap();
    let trades = rest.last_call();
    assert_eq!(trades.endpoint, "/api/v1/trades");
    assert!(trades
        .query
        .contains(&("limit".to_string(), "25".to_string())));

    client.get_history_trades("SOL_USDC", 100, 10).await.unwrap();
    assert_eq!(rest.last_call().endpoint, "/api/v1/trades/history");
}

#[tokio::test]
async fn public_symbol_validation() {
    let (client, _rest) = public_client();
    let result = client.get_depth("").await;
    assert!(matches!(result, Err(BackpackError::InvalidParameters(_))));
}

#[tokio::test]
async fn balances_request_is_signed() {
    let (client, rest) = account_client();

    client.get_balances(None).await.unwrap();
    let call = rest.last_call();
    assert_eq!(call.method, "GET");
    assert_eq!(call.endpoint, "/api/v1/capital");
    assert!(call.query.is_empty());
    assert!(call.headers.contains_key("X-API-Key"));
    assert!(call.headers.contains_key("X-Signature"));
    assert!(call.headers.contains_key("X-Timestamp"));
    assert_eq!(
        call.headers.get("X-Window"),
        Some(&DEFAULT_WINDOW.to_string())
    );
}

#[tokio::test]
async fn window_override_is_verbatim() {
    let (client, rest) = account_client();

    client.get_open_orders("SOL_USDC", Some(9000)).await.unwrap();
    let call = rest.last_call();
    assert_eq!(call.headers.get("X-Window"), Some(&"9000".to_string()));
}

#[tokio::test]
async fn deposits_query_omits_unset_range() {
    let (client, rest) = account_client();

    client.get_deposits(50, 10, None, None, None).await.unwrap();
    let call = rest.last_call();
    assert_eq!(call.endpoint, "/wapi/v1/capital/deposits");
    assert_eq!(
        call.query,
        vec![
            ("limit".to_string(), "50".to_string()),
            ("offset".to_string(), "10".to_string()),
        ]
    );
}

#[tokio::test]
async fn execute_order_posts_expected_body() {
    let (client, rest) = account_client();

    let order = ExecuteOrderRequest::new("SOL_USDC", OrderSide::Bid, OrderType::Limit)
        .with_quantity("1")
        .with_price("100");
    client.execute_order(&order, None).await.unwrap();

    let call = rest.last_call();
    assert_eq!(call.method, "POST");
    assert_eq!(call.endpoint, "/api/v1/order");
    // Content-Type is attached once by the transport when it writes the
    // body, never by the request builder.
    assert!(!call.headers.contains_key("Content-Type"));

    let body = call.body.unwrap();
    let object = body.as_object().unwrap();
    let mut keys: Vec<&String> = object.keys().collect();
    keys.sort();
    assert_eq!(
        keys,
        vec!["orderType", "price", "quantity", "selfTradePrevention", "side", "symbol"]
    );
    assert_eq!(body["side"], "Bid");
    assert_eq!(body["orderType"], "Limit");
    assert_eq!(body["selfTradePrevention"], "RejectBoth");
}

#[tokio::test]
async fn cancel_order_deletes_with_body() {
    let (client, rest) = account_client();

    client
        .cancel_order("SOL_USDC", Some("abc123"), None, None)
        .await
        .unwrap();
    let call = rest.last_call();
    assert_eq!(call.method, "DELETE");
    assert_eq!(call.endpoint, "/api/v1/order");
    let body = call.body.unwrap();
    assert_eq!(body["symbol"], "SOL_USDC");
    assert_eq!(body["orderId"], "abc123");

    client.cancel_all_orders("SOL_USDC", None).await.unwrap();
    let call = rest.last_call();
    assert_eq!(call.method, "DELETE");
    assert_eq!(call.endpoint, "/api/v1/orders");
}

#[tokio::test]
async fn history_and_capital_operations_dispatch() {
    let (client, rest) = account_client();

    client
        .get_order_history("SOL_USDC", 100, 0, None)
        .await
        .unwrap();
    assert_eq!(rest.last_call().endpoint, "/wapi/v1/history/orders");

    client
        .get_fill_history("SOL_USDC", 100, 0, None, None, None)
        .await
        .unwrap();
    assert_eq!(rest.last_call().endpoint, "/wapi/v1/history/fills");

    client.get_deposit_address("Solana", None).await.unwrap();
    let call = rest.last_call();
    assert_eq!(call.endpoint, "/wapi/v1/capital/deposit/address");
    assert_eq!(
        call.query,
        vec![("blockchain".to_string(), "Solana".to_string())]
    );

    client
        .request_withdrawal("addr", "SOL", "Solana", "1.5", None)
        .await
        .unwrap();
    let call = rest.last_call();
    assert_eq!(call.method, "POST");
    assert_eq!(call.endpoint, "/wapi/v1/capital/withdrawals");
    assert_eq!(call.body.unwrap()["quantity"], "1.5");

    client
        .get_open_order("SOL_USDC", None, Some(7), None)
        .await
        .unwrap();
    let call = rest.last_call();
    assert_eq!(call.endpoint, "/api/v1/order");
    assert!(call
        .query
        .contains(&("clientId".to_string(), "7".to_string())));
}

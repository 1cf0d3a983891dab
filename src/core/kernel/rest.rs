use crate::core::errors::BackpackError;
use async_trait::async_trait;
use reqwest::{Client, Method, Proxy, Response};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, instrument, trace};

/// REST client trait for dispatching prepared requests
///
/// Implementations own the HTTP plumbing only: connection reuse, proxying and
/// timeouts. Authentication headers and parameter mappings are prepared by the
/// caller, which keeps signing logic transport-agnostic and independently
/// testable.
#[async_trait]
pub trait RestClient: Send + Sync {
    /// Make a GET request
    ///
    /// # Arguments
    /// * `endpoint` - The API endpoint path
    /// * `query` - Query parameters as key-value pairs
    /// * `headers` - Headers to attach, including any authentication headers
    async fn get(
        &self,
        endpoint: &str,
        query: &[(String, String)],
        headers: &HashMap<String, String>,
    ) -> Result<Value, BackpackError>;

    /// Make a POST request with a JSON body
    async fn post(
        &self,
        endpoint: &str,
        body: &Value,
        headers: &HashMap<String, String>,
    ) -> Result<Value, BackpackError>;

    /// Make a DELETE request with a JSON body
    async fn delete(
        &self,
        endpoint: &str,
        body: &Value,
        headers: &HashMap<String, String>,
    ) -> Result<Value, BackpackError>;
}

/// Configuration for the REST client
#[derive(Clone, Debug)]
pub struct RestClientConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string to include in requests
    pub user_agent: String,
    /// Optional proxy URL applied to every request
    pub proxy: Option<String>,
    /// Log request/response bodies at debug level instead of trace
    pub debug: bool,
}

impl RestClientConfig {
    /// Create a new configuration
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            timeout_seconds: 30,
            user_agent: "backpack-client/0.1".to_string(),
            proxy: None,
            debug: false,
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    /// Set the user agent string
    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }

    /// Route requests through the given proxy URL
    pub fn with_proxy(mut self, proxy: String) -> Self {
        self.proxy = Some(proxy);
        self
    }

    /// Enable body logging at debug level
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// Builder for creating REST client instances
pub struct RestClientBuilder {
    config: RestClientConfig,
}

impl RestClientBuilder {
    /// Create a new builder with the given configuration
    pub fn new(config: RestClientConfig) -> Self {
        Self { config }
    }

    /// Build the REST client
    pub fn build(self) -> Result<ReqwestRest, BackpackError> {
        let mut builder = Client::builder()
            .timeout(std::time::Duration::from_secs(self.config.timeout_seconds))
            .user_agent(&self.config.user_agent);

        if let Some(proxy_url) = &self.config.proxy {
            let proxy = Proxy::all(proxy_url).map_err(|e| {
                crate::core::config::ConfigError::InvalidConfiguration(format!(
                    "Invalid proxy URL '{}': {}",
                    proxy_url, e
                ))
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().map_err(|e| {
            crate::core::config::ConfigError::InvalidConfiguration(format!(
                "Failed to build HTTP client: {}",
                e
            ))
        })?;

        Ok(ReqwestRest {
            client,
            config: self.config,
        })
    }
}

/// Implementation of `RestClient` using reqwest
#[derive(Clone)]
pub struct ReqwestRest {
    client: Client,
    config: RestClientConfig,
}

impl std::fmt::Debug for ReqwestRest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestRest")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ReqwestRest {
    /// Build the full URL for an endpoint
    fn build_url(&self, endpoint: &str) -> String {
        format!("{}{}", self.config.base_url, endpoint)
    }

    /// Handle the response and extract JSON
    ///
    /// Non-2xx responses pass through as `ApiError` without reinterpretation.
    /// A handful of endpoints (`/api/v1/ping`, `/api/v1/time`) answer
    /// text/plain; successful non-JSON bodies surface as a JSON string value.
    #[instrument(skip(self, response), fields(status = %response.status()))]
    async fn handle_response(&self, response: Response) -> Result<Value, BackpackError> {
        let status = response.status();
        let response_text = response.text().await.map_err(|e| {
            BackpackError::NetworkError(format!("Failed to read response body: {}", e))
        })?;

        if self.config.debug {
            debug!("Response body: {}", response_text);
        } else {
            trace!("Response body: {}", response_text);
        }

        if status.is_success() {
            Ok(serde_json::from_str(&response_text)
                .unwrap_or_else(|_| Value::String(response_text.trim().to_string())))
        } else {
            Err(BackpackError::ApiError {
                code: i32::from(status.as_u16()),
                message: response_text,
            })
        }
    }

    /// Make a request with the given parameters
    #[instrument(skip(self, body, headers), fields(method = %method, endpoint = %endpoint))]
    async fn make_request(
        &self,
        method: Method,
        endpoint: &str,
        query: &[(String, String)],
        body: Option<&Value>,
        headers: &HashMap<String, String>,
    ) -> Result<Value, BackpackError> {
        let url = self.build_url(endpoint);
        let mut request = self.client.request(method, &url);

        for (key, value) in headers {
            request = request.header(key, value);
        }

        for (key, value) in query {
            request = request.query(&[(key, value)]);
        }

        if let Some(body) = body {
            let body_bytes = serde_json::to_vec(body)?;
            if self.config.debug {
                debug!("Request body: {}", String::from_utf8_lossy(&body_bytes));
            }
            request = request
                .header("Content-Type", "application/json")
                .body(body_bytes);
        }

        let response = request
            .send()
            .await
            .map_err(|e| BackpackError::NetworkError(format!("Request failed: {}", e)))?;

        self.handle_response(response).await
    }
}

#[async_trait]
impl RestClient for ReqwestRest {
    #[instrument(skip(self, query, headers), fields(endpoint = %endpoint, param_count = query.len()))]
    async fn get(
        &self,
        endpoint: &str,
        query: &[(String, String)],
        headers: &HashMap<String, String>,
    ) -> Result<Value, BackpackError> {
        self.make_request(Method::GET, endpoint, query, None, headers)
            .await
    }

    #[instrument(skip(self, body, headers), fields(endpoint = %endpoint))]
    async fn post(
        &self,
        endpoint: &str,
        body: &Value,
        headers: &HashMap<String, String>,
    ) -> Result<Value, BackpackError> {
        self.make_request(Method::POST, endpoint, &[], Some(body), headers)
            .await
    }

    #[instrument(skip(self, body, headers), fields(endpoint = %endpoint))]
    async fn delete(
        &self,
        endpoint: &str,
        body: &Value,
        headers: &HashMap<String, String>,
    ) -> Result<Value, BackpackError> {
        self.make_request(Method::DELETE, endpoint, &[], Some(body), headers)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = RestClientConfig::new("https://api.backpack.exchange".to_string());
        assert_eq!(config.timeout_seconds, 30);
        assert!(config.proxy.is_none());
        assert!(!config.debug);
    }

    #[test]
    fn build_without_proxy() {
        let config = RestClientConfig::new("https://api.backpack.exchange".to_string());
        let result = RestClientBuilder::new(config).build();
        assert!(result.is_ok());
    }

    #[test]
    fn build_with_invalid_proxy_fails() {
        let config = RestClientConfig::new("https://api.backpack.exchange".to_string())
            .with_proxy(String::new());
        let result = RestClientBuilder::new(config).build();
        assert!(matches!(result, Err(BackpackError::ConfigError(_))));
    }

    #[test]
    fn build_url_joins_base_and_path() {
        let config = RestClientConfig::new("https://api.backpack.exchange".to_string());
        let rest = RestClientBuilder::new(config).build().unwrap();
        assert_eq!(
            rest.build_url("/api/v1/ticker"),
            "https://api.backpack.exchange/api/v1/ticker"
        );
    }

    fn rest() -> ReqwestRest {
        let config = RestClientConfig::new("https://api.backpack.exchange".to_string());
        RestClientBuilder::new(config).build().unwrap()
    }

    fn response(status: u16, body: &str) -> Response {
        Response::from(
            http::Response::builder()
                .status(status)
                .body(body.to_string())
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn handle_response_parses_json_success() {
        let value = rest()
            .handle_response(response(200, r#"{"status":"Ok"}"#))
            .await
            .unwrap();
        assert_eq!(value["status"], "Ok");
    }

    #[tokio::test]
    async fn handle_response_surfaces_plain_text_as_json_string() {
        // /api/v1/ping answers text/plain
        let value = rest()
            .handle_response(response(200, "pong"))
            .await
            .unwrap();
        assert_eq!(value, Value::String("pong".to_string()));
    }

    #[tokio::test]
    async fn handle_response_keeps_numeric_bodies_as_numbers() {
        // /api/v1/time answers the epoch milliseconds as a bare number
        let value = rest()
            .handle_response(response(200, "1700000000000"))
            .await
            .unwrap();
        assert_eq!(value, serde_json::json!(1_700_000_000_000_u64));
    }

    #[tokio::test]
    async fn handle_response_passes_through_api_errors() {
        let result = rest()
            .handle_response(response(400, r#"{"code":"INVALID_ORDER"}"#))
            .await;
        match result {
            Err(BackpackError::ApiError { code, message }) => {
                assert_eq!(code, 400);
                assert!(message.contains("INVALID_ORDER"));
            }
            other => panic!("expected ApiError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn handle_response_passes_through_server_errors() {
        let result = rest().handle_response(response(503, "maintenance")).await;
        match result {
            Err(BackpackError::ApiError { code, message }) => {
                assert_eq!(code, 503);
                assert_eq!(message, "maintenance");
            }
            other => panic!("expected ApiError, got {:?}", other),
        }
    }
}

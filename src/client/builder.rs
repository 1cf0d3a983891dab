use crate::client::account::AccountClient;
use crate::client::public::PublicClient;
use crate::client::request::RequestBuilder;
use crate::core::config::{BackpackConfig, DEFAULT_BASE_URL};
use crate::core::errors::BackpackError;
use crate::core::kernel::{Ed25519Signer, ReqwestRest, RestClientBuilder, RestClientConfig};
use std::sync::Arc;

fn build_rest(config: &BackpackConfig) -> Result<ReqwestRest, BackpackError> {
    let mut rest_config = RestClientConfig::new(
        config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
    )
    .with_timeout(30)
    .with_debug(config.debug);

    if let Some(proxy) = config.proxy.clone() {
        rest_config = rest_config.with_proxy(proxy);
    }

    RestClientBuilder::new(rest_config).build()
}

/// Create a market-data client; no credentials required
pub fn build_public_client(
    config: &BackpackConfig,
) -> Result<PublicClient<ReqwestRest>, BackpackError> {
    let rest = build_rest(config)?;
    Ok(PublicClient::new(rest))
}

/// Create an authenticated account client
///
/// Fails with `AuthError` when credentials are missing or the secret key is
/// malformed, before any request is made.
pub fn build_account_client(
    config: &BackpackConfig,
) -> Result<AccountClient<ReqwestRest>, BackpackError> {
    if !config.has_credentials() {
        return Err(BackpackError::AuthError(
            "Account operations require an API key and secret key".to_string(),
        ));
    }

    let signer = Ed25519Signer::new(config.secret_key())?;
    let builder = RequestBuilder::new(Arc::new(signer), config.window);
    let rest = build_rest(config)?;

    Ok(AccountClient::new(rest, builder))
}

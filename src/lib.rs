//! Thin async client for the Backpack Exchange REST API.
//!
//! The crate splits into a transport kernel (`core`) and the exchange glue
//! (`client`). `RequestBuilder` turns caller arguments into a signed request
//! value; `PublicClient` and `AccountClient` dispatch those through an owned
//! `RestClient` transport and return the raw JSON responses. No order-book
//! state, no streaming, no retries.
//!
//! ```rust,no_run
//! use backpack_client::{build_public_client, BackpackConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let public = build_public_client(&BackpackConfig::read_only())?;
//! let ticker = public.get_ticker("SOL_USDC").await?;
//! println!("{ticker}");
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod core;

pub use client::{
    build_account_client, build_public_client, AccountClient, ExecuteOrderRequest, OrderSide,
    OrderType, PublicClient, RequestBuilder, SelfTradePrevention, SignedRequest, TimeInForce,
};
pub use self::core::config::{BackpackConfig, DEFAULT_BASE_URL, DEFAULT_WINDOW};
pub use self::core::errors::BackpackError;
pub use self::core::kernel::{Ed25519Signer, ReqwestRest, RestClient};

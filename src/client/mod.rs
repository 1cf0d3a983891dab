pub mod account;
pub mod builder;
pub mod public;
pub mod request;
pub mod types;

// Re-export main types for easier importing
pub use account::AccountClient;
pub use builder::{build_account_client, build_public_client};
pub use public::PublicClient;
pub use request::{RequestBuilder, SignedRequest};
pub use types::{ExecuteOrderRequest, OrderSide, OrderType, SelfTradePrevention, TimeInForce};

/// Transport kernel - generic HTTP dispatch and request signing
///
/// The kernel contains no endpoint knowledge. `RestClient` dispatches
/// prepared requests; `RequestSigner` turns an instruction name plus a
/// parameter mapping into a signature header value. The Backpack-specific
/// request shaping lives in `crate::client`.
pub mod rest;
pub mod signer;

// Re-export key types for convenience
pub use rest::{ReqwestRest, RestClient, RestClientBuilder, RestClientConfig};
pub use signer::{canonical_string, Ed25519Signer, Params, RequestSigner};

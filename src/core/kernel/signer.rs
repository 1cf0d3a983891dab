use crate::core::errors::BackpackError;
use base64::engine::general_purpose;
use base64::Engine;
use ed25519_dalek::{Signer as Ed25519SignerTrait, SigningKey, VerifyingKey};
use serde_json::Value;

/// Parameter mapping for a single request: wire key to JSON value.
///
/// Optional caller arguments that are unset are never inserted, so the mapping
/// contains exactly the fields that go out on the wire.
pub type Params = Vec<(&'static str, Value)>;

/// Signer trait for request authentication
///
/// Produces the signature header value for an authenticated request. The
/// instruction is the exchange's name for the operation (e.g. `orderExecute`),
/// not the endpoint path.
pub trait RequestSigner: Send + Sync {
    /// Sign the canonical string for one request
    ///
    /// # Arguments
    /// * `instruction` - Operation name as documented by the exchange
    /// * `params` - Parameter mapping for the request
    /// * `timestamp` - Request timestamp in milliseconds
    /// * `window` - Signature validity window in milliseconds
    ///
    /// # Returns
    /// Base64-encoded signature for the `X-Signature` header
    fn sign(
        &self,
        instruction: &str,
        params: &Params,
        timestamp: u64,
        window: u64,
    ) -> Result<String, BackpackError>;

    /// Base64-encoded verifying key for the `X-API-Key` header
    fn api_key(&self) -> String;
}

/// Build the canonical string the exchange verifies.
///
/// Shape: `instruction=<name>&<k=v joined by &>&timestamp=<ts>&window=<win>`,
/// with parameters ordered lexicographically by key. String values render
/// unquoted; numbers and booleans render in their JSON form.
pub fn canonical_string(
    instruction: &str,
    params: &Params,
    timestamp: u64,
    window: u64,
) -> String {
    let mut sorted: Vec<&(&'static str, Value)> = params.iter().collect();
    sorted.sort_by_key(|(key, _)| *key);

    let mut message = format!("instruction={}", instruction);
    for (key, value) in sorted {
        message.push('&');
        message.push_str(key);
        message.push('=');
        match value {
            Value::String(s) => message.push_str(s),
            other => message.push_str(&other.to_string()),
        }
    }
    message.push_str(&format!("&timestamp={}&window={}", timestamp, window));
    message
}

/// Ed25519 signer for the Backpack Exchange
pub struct Ed25519Signer {
    signing_key: SigningKey,
    verifying_key: VerifyingKey,
}

impl Ed25519Signer {
    /// Create a new signer from a base64-encoded 32-byte signing seed
    pub fn new(secret_key: &str) -> Result<Self, BackpackError> {
        let key_bytes = general_purpose::STANDARD
            .decode(secret_key)
            .map_err(|e| BackpackError::AuthError(format!("Invalid secret key format: {}", e)))?;

        let key_bytes: [u8; 32] = key_bytes
            .try_into()
            .map_err(|_| BackpackError::AuthError("Secret key must be 32 bytes".to_string()))?;

        let signing_key = SigningKey::from_bytes(&key_bytes);
        let verifying_key = signing_key.verifying_key();

        Ok(Self {
            signing_key,
            verifying_key,
        })
    }
}

impl RequestSigner for Ed25519Signer {
    fn sign(
        &self,
        instruction: &str,
        params: &Params,
        timestamp: u64,
        window: u64,
    ) -> Result<String, BackpackError> {
        let message = canonical_string(instruction, params, timestamp, window);
        let signature = Ed25519SignerTrait::sign(&self.signing_key, message.as_bytes());
        Ok(general_purpose::STANDARD.encode(signature.to_bytes()))
    }

    fn api_key(&self) -> String {
        general_purpose::STANDARD.encode(self.verifying_key.to_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_secret() -> String {
        general_purpose::STANDARD.encode([7u8; 32])
    }

    #[test]
    fn canonical_string_sorts_params() {
        let params: Params = vec![
            ("symbol", json!("SOL_USDC")),
            ("limit", json!(50)),
            ("postOnly", json!(true)),
        ];
        let message = canonical_string("orderExecute", &params, 1_700_000_000_000, 5000);
        assert_eq!(
            message,
            "instruction=orderExecute&limit=50&postOnly=true&symbol=SOL_USDC\
             &timestamp=1700000000000&window=5000"
        );
    }

    #[test]
    fn canonical_string_without_params() {
        let message = canonical_string("balanceQuery", &Vec::new(), 1_700_000_000_000, 5000);
        assert_eq!(
            message,
            "instruction=balanceQuery&timestamp=1700000000000&window=5000"
        );
    }

    #[test]
    fn signature_is_deterministic() {
        let signer = Ed25519Signer::new(&test_secret()).unwrap();
        let params: Params = vec![("symbol", json!("SOL_USDC"))];
        let first = signer.sign("orderQuery", &params, 1_700_000_000_000, 5000).unwrap();
        let second = signer.sign("orderQuery", &params, 1_700_000_000_000, 5000).unwrap();
        assert_eq!(first, second);

        // A fresh signer built from the same seed must agree byte for byte.
        let other = Ed25519Signer::new(&test_secret()).unwrap();
        let third = other.sign("orderQuery", &params, 1_700_000_000_000, 5000).unwrap();
        assert_eq!(first, third);
    }

    #[test]
    fn signature_changes_with_timestamp() {
        let signer = Ed25519Signer::new(&test_secret()).unwrap();
        let first = signer.sign("balanceQuery", &Vec::new(), 1, 5000).unwrap();
        let second = signer.sign("balanceQuery", &Vec::new(), 2, 5000).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn rejects_invalid_base64() {
        let result = Ed25519Signer::new("not base64!!!");
        assert!(matches!(result, Err(BackpackError::AuthError(_))));
    }

    #[test]
    fn rejects_wrong_length_key() {
        let short = general_purpose::STANDARD.encode([7u8; 16]);
        let result = Ed25519Signer::new(&short);
        assert!(matches!(result, Err(BackpackError::AuthError(_))));
    }

    #[test]
    fn api_key_is_base64_verifying_key() {
        let signer = Ed25519Signer::new(&test_secret()).unwrap();
        let api_key = signer.api_key();
        let decoded = general_purpose::STANDARD.decode(api_key).unwrap();
        assert_eq!(decoded.len(), 32);
    }
}

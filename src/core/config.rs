use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::env;

/// Default signature validity window in milliseconds.
pub const DEFAULT_WINDOW: u64 = 5000;

/// Default base URL for the Backpack Exchange REST API.
pub const DEFAULT_BASE_URL: &str = "https://api.backpack.exchange";

#[derive(Debug, Clone)]
pub struct BackpackConfig {
    pub api_key: Secret<String>,
    pub secret_key: Secret<String>,
    pub window: u64,
    pub base_url: Option<String>,
    pub proxy: Option<String>,
    pub debug: bool,
}

// Custom Serialize implementation - never expose secrets in serialization
impl Serialize for BackpackConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("BackpackConfig", 6)?;
        state.serialize_field("api_key", "[REDACTED]")?;
        state.serialize_field("secret_key", "[REDACTED]")?;
        state.serialize_field("window", &self.window)?;
        state.serialize_field("base_url", &self.base_url)?;
        state.serialize_field("proxy", &self.proxy)?;
        state.serialize_field("debug", &self.debug)?;
        state.end()
    }
}

// Custom Deserialize implementation
impl<'de> Deserialize<'de> for BackpackConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct BackpackConfigHelper {
            api_key: String,
            secret_key: String,
            #[serde(default)]
            window: Option<u64>,
            base_url: Option<String>,
            proxy: Option<String>,
            #[serde(default)]
            debug: bool,
        }

        let helper = BackpackConfigHelper::deserialize(deserializer)?;
        Ok(Self {
            api_key: Secret::new(helper.api_key),
            secret_key: Secret::new(helper.secret_key),
            window: helper.window.unwrap_or(DEFAULT_WINDOW),
            base_url: helper.base_url,
            proxy: helper.proxy,
            debug: helper.debug,
        })
    }
}

impl BackpackConfig {
    /// Create a new configuration with API credentials
    ///
    /// The API key is the base64-encoded Ed25519 verifying key shown by the
    /// exchange, and the secret key is the base64-encoded 32-byte signing seed.
    #[must_use]
    pub fn new(api_key: String, secret_key: String) -> Self {
        Self {
            api_key: Secret::new(api_key),
            secret_key: Secret::new(secret_key),
            window: DEFAULT_WINDOW,
            base_url: None,
            proxy: None,
            debug: false,
        }
    }

    /// Create configuration from environment variables
    ///
    /// Expected environment variables:
    /// - `BACKPACK_API_KEY`
    /// - `BACKPACK_SECRET_KEY`
    /// - `BACKPACK_WINDOW` (optional, defaults to 5000)
    /// - `BACKPACK_BASE_URL` (optional)
    /// - `BACKPACK_PROXY` (optional)
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var("BACKPACK_API_KEY")
            .map_err(|_| ConfigError::MissingEnvironmentVariable("BACKPACK_API_KEY".to_string()))?;

        let secret_key = env::var("BACKPACK_SECRET_KEY").map_err(|_| {
            ConfigError::MissingEnvironmentVariable("BACKPACK_SECRET_KEY".to_string())
        })?;

        let window = match env::var("BACKPACK_WINDOW") {
            Ok(raw) => raw.parse::<u64>().map_err(|_| {
                ConfigError::InvalidConfiguration(format!(
                    "BACKPACK_WINDOW must be an integer, got '{}'",
                    raw
                ))
            })?,
            Err(_) => DEFAULT_WINDOW,
        };

        let base_url = env::var("BACKPACK_BASE_URL").ok();
        let proxy = env::var("BACKPACK_PROXY").ok();

        Ok(Self {
            api_key: Secret::new(api_key),
            secret_key: Secret::new(secret_key),
            window,
            base_url,
            proxy,
            debug: false,
        })
    }

    /// Create configuration from a .env file and environment variables
    ///
    /// Loads environment variables from the given .env file if it exists, then
    /// reads the configuration using the standard variable names.
    ///
    /// **Security Warning**: Never commit .env files to version control!
    #[cfg(feature = "env-file")]
    pub fn from_env_file() -> Result<Self, ConfigError> {
        Self::from_env_file_with_path(".env")
    }

    /// Create configuration from a specific .env file path
    #[cfg(feature = "env-file")]
    pub fn from_env_file_with_path(env_file_path: &str) -> Result<Self, ConfigError> {
        match dotenv::from_path(env_file_path) {
            Ok(()) => {}
            Err(dotenv::Error::Io(io_err)) if io_err.kind() == std::io::ErrorKind::NotFound => {
                // .env file doesn't exist, continue with system env vars
            }
            Err(e) => {
                return Err(ConfigError::InvalidConfiguration(format!(
                    "Failed to load .env file '{}': {}",
                    env_file_path, e
                )));
            }
        }

        Self::from_env()
    }

    /// Create configuration for public market-data operations only
    #[must_use]
    pub fn read_only() -> Self {
        Self {
            api_key: Secret::new(String::new()),
            secret_key: Secret::new(String::new()),
            window: DEFAULT_WINDOW,
            base_url: None,
            proxy: None,
            debug: false,
        }
    }

    /// Check if this configuration has credentials for authenticated operations
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        !self.api_key.expose_secret().is_empty() && !self.secret_key.expose_secret().is_empty()
    }

    /// Set the default signature validity window in milliseconds
    #[must_use]
    pub const fn with_window(mut self, window: u64) -> Self {
        self.window = window;
        self
    }

    /// Set custom base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = Some(base_url);
        self
    }

    /// Route all requests through the given proxy URL
    #[must_use]
    pub fn with_proxy(mut self, proxy: String) -> Self {
        self.proxy = Some(proxy);
        self
    }

    /// Enable request/response body logging at debug level
    #[must_use]
    pub const fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Get API key (use carefully - exposes secret)
    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// Get secret key (use carefully - exposes secret)
    pub fn secret_key(&self) -> &str {
        self.secret_key.expose_secret()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvironmentVariable(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

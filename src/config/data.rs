//! The configuration structs used to build the AppConfig, and their impls.
use std::{
    collections::{hash_map::Entry, HashMap},
    io::Read,
};

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use strum_macros::AsRefStr;
use toml::Value;

// ###################################
// ->   RESULT & ERROR
// ###################################
pub type ConfigResult<T> = core::result::Result<T, ConfigError>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to build the 'Environment' from the provided string.")]
    StringToEnvironmentFail,
    #[error("missing shop domain: set 'shopify_config.shop_domain' or SHOPIFY_SHOP_DOMAIN")]
    MissingShopDomain,
    #[error("missing access token: set 'shopify_config.access_token' or SHOPIFY_ACCESS_TOKEN")]
    MissingAccessToken,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml deserialization error: {0}")]
    TomlDeser(#[from] toml::de::Error),
    #[error("toml serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

// ###################################
// ->   STRUCTS
// ###################################
#[derive(AsRefStr)]
pub enum Environment {
    Local,
    Production,
}

#[derive(Deserialize, Clone, Debug)]
pub struct AppConfig {
    pub net_config: NetConfig,
    pub shopify_config: ShopifyConfig,
    pub subscribe_config: SubscribeConfig,
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct NetConfig {
    pub host: [u8; 4],
    pub app_port: u16,
}

/// Where and how to reach the shop's Admin REST API.
#[derive(Deserialize, Clone, Debug)]
pub struct ShopifyConfig {
    pub shop_domain: String,
    pub access_token: SecretString,
    pub api_version: String,
    pub timeout_millis: u64,
}

/// The single configuration surface for the upsert workflow.
/// The source handler variants disagreed on defaults and on whether a failed
/// update falls back to creating the customer; both live here now.
#[derive(Deserialize, Clone, Debug)]
pub struct SubscribeConfig {
    pub source: String,
    pub discount_code: String,
    pub tags: String,
    pub metafield_namespace: String,
    pub fallback_on_update_failure: bool,
}

#[derive(Serialize, Deserialize, Debug, Default)]
pub struct AppConfigBuilder(HashMap<String, HashMap<String, Value>>);

// ###################################
// ->   IMPLs
// ###################################
impl AppConfig {
    pub fn init() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

impl ShopifyConfig {
    /// Checked once at App build time, handlers never re-read credentials.
    pub fn validate(&self) -> ConfigResult<()> {
        use secrecy::ExposeSecret;

        if self.shop_domain.trim().is_empty() {
            return Err(ConfigError::MissingShopDomain);
        }
        if self.access_token.expose_secret().trim().is_empty() {
            return Err(ConfigError::MissingAccessToken);
        }
        Ok(())
    }

    /// The versioned Admin API base, with a trailing slash so that relative
    /// endpoint paths can be joined onto it.
    pub fn api_base_url(&self) -> String {
        format!(
            "https://{}/admin/api/{}/",
            self.shop_domain, self.api_version
        )
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_millis)
    }
}

impl AppConfigBuilder {
    pub fn add_source(mut self, mut file: std::fs::File) -> ConfigResult<Self> {
        let mut file_content = String::new();

        let file_len = file.metadata().map(|data| data.len())?;
        let read_len = file.read_to_string(&mut file_content)?;
        assert_eq!(file_len, read_len as u64);

        let app_conf_builder: AppConfigBuilder = toml::from_str(&file_content)?;

        for (entry, entry_hm) in app_conf_builder.0 {
            if let Entry::Vacant(e) = self.0.entry(entry.clone()) {
                e.insert(entry_hm);
            } else {
                let target_hm = self.0.get_mut(&entry).expect("Checked above!");
                for (inner_entry, inner_value) in entry_hm {
                    target_hm.insert(inner_entry, inner_value);
                }
            }
        }

        Ok(self)
    }

    pub fn build(self) -> ConfigResult<AppConfig> {
        let serialized = toml::to_string(&self)?;
        let app_config: AppConfig = toml::from_str(&serialized)?;
        Ok(app_config)
    }
}

// ###################################
// ->   TRY FROMs
// ###################################

impl TryFrom<String> for Environment {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            _ => Err(Self::Error::StringToEnvironmentFail),
        }
    }
}

// ###################################
// ->   TESTS
// ###################################

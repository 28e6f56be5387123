use crate::{config, shopify};

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("admin api client error: {0}")]
    Shopify(#[from] shopify::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

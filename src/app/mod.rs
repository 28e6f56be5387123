pub mod serve;

// re-export
pub use serve::serve;

use std::{net::SocketAddr, sync::Arc};

use derive_more::Deref;
use tokio::net::TcpListener;
use tracing::info;

use crate::{
    config::{AppConfig, SubscribeConfig},
    AdminClient, Result,
};

// ###################################
// ->  Structs
// ###################################
pub struct App {
    pub app_state: AppState,
    pub listener: TcpListener,
}
impl App {
    pub fn new(app_state: AppState, listener: TcpListener) -> Self {
        App {
            app_state,
            listener,
        }
    }

    pub async fn build_from_config(config: AppConfig) -> Result<Self> {
        // Credentials are checked once here; handlers get an already-valid client.
        config.shopify_config.validate()?;

        let api_base_url = config.shopify_config.api_base_url();
        let api_timeout = config.shopify_config.timeout();
        let admin_client = AdminClient::new(
            api_base_url,
            config.shopify_config.access_token,
            api_timeout,
        )?;

        let app_state = AppState::new(admin_client, config.subscribe_config);

        let addr = SocketAddr::from((config.net_config.host, config.net_config.app_port));
        let listener = TcpListener::bind(addr).await?;
        let addr = listener.local_addr()?;
        info!("{:<20} - {}", "Listening on:", addr);

        let app = App::new(app_state, listener);
        Ok(app)
    }
}

pub struct InternalState {
    pub admin_client: AdminClient,
    pub subscribe_config: SubscribeConfig,
}

/// Application state containing all global data.
/// It implements `Deref` to easily access the fields on `InternalState`
/// Uses an `Arc` so it can be cloned around.
#[derive(Clone, Deref)]
pub struct AppState(Arc<InternalState>);

impl AppState {
    pub fn new(admin_client: AdminClient, subscribe_config: SubscribeConfig) -> Self {
        AppState(Arc::new(InternalState {
            admin_client,
            subscribe_config,
        }))
    }
}

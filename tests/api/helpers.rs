use std::{net::SocketAddr, time::Duration};

use anyhow::Result;
use secrecy::SecretString;
use shopsub::{config::SubscribeConfig, AdminClient, App, AppState};
use tokio::net::TcpListener;
use wiremock::MockServer;

pub const TEST_API_VERSION: &str = "2024-07";

pub struct TestApp {
    pub addr: SocketAddr,
    pub http_client: reqwest::Client,
    /// Stands in for the shop's Admin REST API.
    pub shopify_server: MockServer,
}

pub fn default_subscribe_config() -> SubscribeConfig {
    SubscribeConfig {
        source: "popup".to_string(),
        discount_code: "WELCOME10".to_string(),
        tags: "newsletter,discount-popup,popup-subscriber".to_string(),
        metafield_namespace: "popup".to_string(),
        fallback_on_update_failure: true,
    }
}

impl TestApp {
    /// Spawns the app on a random local port, wired to a wiremock Admin API.
    pub async fn spawn() -> Result<TestApp> {
        Self::spawn_with_subscribe_config(default_subscribe_config()).await
    }

    pub async fn spawn_with_subscribe_config(
        subscribe_config: SubscribeConfig,
    ) -> Result<TestApp> {
        let shopify_server = MockServer::start().await;

        let admin_client = AdminClient::new(
            format!("{}/admin/api/{TEST_API_VERSION}/", shopify_server.uri()),
            SecretString::from("shpat_test".to_string()),
            Duration::from_millis(200),
        )?;
        let app_state = AppState::new(admin_client, subscribe_config);

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        tokio::spawn(shopsub::serve(App::new(app_state, listener)));

        Ok(TestApp {
            addr,
            http_client: reqwest::Client::new(),
            shopify_server,
        })
    }

    pub async fn post_subscribe(&self, body: &serde_json::Value) -> Result<reqwest::Response> {
        let res = self
            .http_client
            .post(format!("http://{}/api/subscribe", self.addr))
            .json(body)
            .send()
            .await?;
        Ok(res)
    }

    pub fn search_path(&self) -> String {
        format!("/admin/api/{TEST_API_VERSION}/customers/search.json")
    }

    pub fn create_path(&self) -> String {
        format!("/admin/api/{TEST_API_VERSION}/customers.json")
    }

    pub fn update_path(&self, customer_id: u64) -> String {
        format!("/admin/api/{TEST_API_VERSION}/customers/{customer_id}.json")
    }
}

//! `AdminClient` wraps the customer endpoints of the shop's Admin REST API.

pub mod data;

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};

use data::{
    Customer, CustomerEnvelope, CustomerResponse, CustomerSearchResponse, CustomerUpdate,
    NewCustomer,
};

pub const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

#[derive(Debug)]
pub struct AdminClient {
    pub http_client: Client,
    pub url: reqwest::Url,
    access_token: SecretString,
}

impl AdminClient {
    /// `url` is the versioned API base, e.g.
    /// `https://example-shop.myshopify.com/admin/api/2024-07/`.
    pub fn new<S: AsRef<str>>(
        url: S,
        access_token: SecretString,
        timeout: std::time::Duration,
    ) -> Result<Self> {
        let mut url = url.as_ref().to_string();
        // Url::join treats the last path segment as a file without this.
        if !url.ends_with('/') {
            url.push('/');
        }
        let url = reqwest::Url::parse(&url).map_err(|e| Error::UrlParsing(e.to_string()))?;

        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(AdminClient {
            http_client,
            url,
            access_token,
        })
    }

    /// Looks up a customer by exact email. Returns the first match, any
    /// further matches are ignored.
    pub async fn find_customer_by_email(&self, email: &str) -> Result<Option<Customer>> {
        let url = self
            .url
            .join("customers/search.json")
            .map_err(|e| Error::UrlParsing(e.to_string()))?;

        let resp = self
            .http_client
            .get(url)
            .header(ACCESS_TOKEN_HEADER, self.access_token.expose_secret())
            .query(&[("query", format!("email:{email}"))])
            .send()
            .await?;
        let resp = fail_on_upstream_error(resp).await?;

        let search: CustomerSearchResponse = resp.json().await?;
        Ok(search.customers.into_iter().next())
    }

    /// Marks an existing customer as subscribed and overwrites its tag string.
    pub async fn update_marketing_consent(&self, update: CustomerUpdate<'_>) -> Result<()> {
        let url = self
            .url
            .join(&format!("customers/{}.json", update.id))
            .map_err(|e| Error::UrlParsing(e.to_string()))?;

        let resp = self
            .http_client
            .put(url)
            .header(ACCESS_TOKEN_HEADER, self.access_token.expose_secret())
            .json(&CustomerEnvelope { customer: update })
            .send()
            .await?;
        fail_on_upstream_error(resp).await?;

        Ok(())
    }

    /// Creates a customer with marketing consent, tags, note and metafields.
    pub async fn create_customer(&self, new_customer: NewCustomer<'_>) -> Result<Customer> {
        let url = self
            .url
            .join("customers.json")
            .map_err(|e| Error::UrlParsing(e.to_string()))?;

        let resp = self
            .http_client
            .post(url)
            .header(ACCESS_TOKEN_HEADER, self.access_token.expose_secret())
            .json(&CustomerEnvelope {
                customer: new_customer,
            })
            .send()
            .await?;
        let resp = fail_on_upstream_error(resp).await?;

        let created: CustomerResponse = resp.json().await?;
        Ok(created.customer)
    }
}

/// A non-success response is terminal; the upstream status and body are kept
/// so the caller can surface them.
async fn fail_on_upstream_error(resp: reqwest::Response) -> Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    Err(Error::Upstream {
        status: status.as_u16(),
        body,
    })
}

// ###################################
// ->   ERROR & RESULT
// ###################################
pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("url parsing error: {0}")]
    UrlParsing(String),
    #[error("admin api returned status {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

//! Wire types for the Admin REST API customer endpoints.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// The projection of a remote customer record this service reads and writes.
/// The record itself is owned entirely by the platform.
#[derive(Debug, Clone, Deserialize)]
pub struct Customer {
    pub id: u64,
    pub email: Option<String>,
    #[serde(default)]
    pub tags: String,
}

#[derive(Debug, Serialize)]
pub struct EmailMarketingConsent {
    pub state: &'static str,
    pub opt_in_level: &'static str,
    pub consent_updated_at: String,
}

impl EmailMarketingConsent {
    /// Consent is always recorded as a single opt-in taken right now.
    pub fn subscribed_now() -> Self {
        EmailMarketingConsent {
            state: "subscribed",
            opt_in_level: "single_opt_in",
            consent_updated_at: Utc::now().to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Metafield<'a> {
    pub namespace: &'a str,
    pub key: &'a str,
    pub value: &'a str,
    #[serde(rename = "type")]
    pub value_type: &'a str,
}

/// Update payload for an existing customer: consent and the merged tag string.
/// Note and metafields are set only at creation time, never here.
#[derive(Debug, Serialize)]
pub struct CustomerUpdate<'a> {
    pub id: u64,
    pub email_marketing_consent: EmailMarketingConsent,
    pub tags: &'a str,
}

#[derive(Debug, Serialize)]
pub struct NewCustomer<'a> {
    pub email: &'a str,
    pub email_marketing_consent: EmailMarketingConsent,
    pub tags: &'a str,
    pub note: String,
    pub metafields: Vec<Metafield<'a>>,
}

/// The REST API wraps every customer payload in a `customer` object.
#[derive(Debug, Serialize)]
pub(crate) struct CustomerEnvelope<T> {
    pub customer: T,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CustomerSearchResponse {
    pub customers: Vec<Customer>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CustomerResponse {
    pub customer: Customer,
}

//! Request/response structs of the `web` module and their parsing impls.

use lazy_regex::regex_is_match;
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

// ###################################
// ->   STRUCTS
// ###################################
/// Deserializable popup submission.
/// Everything except the email is optional; missing fields fall back to the
/// configured defaults when the upsert payloads are assembled.
#[derive(Debug, Deserialize)]
pub struct DeserSubscription {
    pub email: Option<String>,
    pub source: Option<String>,
    pub discount_code: Option<String>,
    pub tags: Option<String>,
    /// Accepted for compatibility with older popup scripts, not validated.
    pub marketing_consent: Option<serde_json::Value>,
}

/// A submission with the email validated.
#[derive(Debug, Clone)]
pub struct ValidSubscription {
    pub email: ValidEmail,
    pub source: Option<String>,
    pub discount_code: Option<String>,
    pub tags: Option<String>,
}

impl TryFrom<DeserSubscription> for ValidSubscription {
    type Error = DataParsingError;

    fn try_from(deser_sub: DeserSubscription) -> Result<Self, Self::Error> {
        let email = deser_sub.email.ok_or(DataParsingError::EmailMissing)?;

        Ok(ValidSubscription {
            email: ValidEmail::parse(email)?,
            source: deser_sub.source,
            discount_code: deser_sub.discount_code,
            tags: deser_sub.tags,
        })
    }
}

/// Validated Subscriber Email
#[derive(Debug, Clone)]
pub struct ValidEmail(String);

impl AsRef<str> for ValidEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl ValidEmail {
    pub fn parse<S>(value: S) -> Result<Self, DataParsingError>
    where
        S: AsRef<str>,
    {
        let value = value.as_ref();

        if value.graphemes(true).count() > 256 {
            return Err(DataParsingError::EmailTooLong);
        }

        // local@domain.tld shape: no whitespace or extra '@', a '.' after the '@'
        if regex_is_match!(r"^[^\s@]+@[^\s@]+\.[^\s@]+$", value) {
            Ok(ValidEmail(value.to_owned()))
        } else {
            Err(DataParsingError::EmailInvalid(value.to_owned()))
        }
    }
}

/// The normalized body returned on a successful upsert.
#[derive(Debug, Serialize)]
pub struct SubscribeResponse {
    pub success: bool,
    pub message: String,
    pub customer_id: u64,
    pub email: String,
    pub existing_customer: bool,
}

// ###################################
// ->   ERROR
// ###################################
#[derive(Debug, thiserror::Error)]
pub enum DataParsingError {
    #[error("missing email")]
    EmailMissing,
    #[error("invalid email format: {0}")]
    EmailInvalid(String),
    #[error("email too long")]
    EmailTooLong,
}

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use strum_macros::AsRefStr;

use crate::shopify;

pub type WebResult<T> = core::result::Result<T, Error>;

#[derive(Debug, AsRefStr, thiserror::Error)]
pub enum Error {
    #[error("data parsing error: {0}")]
    DataParsing(#[from] super::data::DataParsingError),

    #[error("admin api error: {0}")]
    Shopify(#[from] shopify::Error),
}

impl Error {
    pub fn status_code_and_client_error(&self) -> (StatusCode, ClientError) {
        use ClientError::*;

        match self {
            Error::DataParsing(data_er) => {
                (StatusCode::BAD_REQUEST, InvalidInput(data_er.to_string()))
            }
            Error::Shopify(shopify::Error::Upstream { status, body }) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Upstream {
                    status: *status,
                    body: body.clone(),
                },
            ),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, ServiceError),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::debug!("{:<12} - into_response(Error: {self:?})", "INTO_RESP");

        // Construct a response
        let mut res = StatusCode::INTERNAL_SERVER_ERROR.into_response();

        // Insert the Error into response so that it can be retrieved later.
        res.extensions_mut().insert(Arc::new(self));

        res
    }
}

#[derive(Debug, AsRefStr, derive_more::Display)]
pub enum ClientError {
    #[display("Received invalid input: {_0}")]
    InvalidInput(String),
    #[display("Admin API request failed with status {status}")]
    Upstream { status: u16, body: String },
    #[display("Service Error!")]
    ServiceError,
}

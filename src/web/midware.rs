use std::sync::Arc;

use axum::{
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;
use uuid::Uuid;

use crate::web::{ClientError, Error};

/// Maps errors stored in the response extensions into the JSON body the
/// caller sees, and emits a structured per-request log line.
pub async fn response_mapper(req_method: Method, uri: Uri, resp: Response) -> Response {
    let uuid = Uuid::new_v4();

    let web_error = resp.extensions().get::<Arc<Error>>().map(|er| er.as_ref());
    let client_status_and_error = web_error.map(Error::status_code_and_client_error);

    let err_resp = client_status_and_error.as_ref().map(|(status, cl_err)| {
        let details = match cl_err {
            ClientError::Upstream { status, body } => Some(json!({
                "upstream_status": status,
                "upstream_body": body,
            })),
            _ => None,
        };

        let client_error_body = json!({
            "success": false,
            "error": cl_err.to_string(),
            "details": details,
            "req_id": uuid.to_string(),
        });

        (*status, Json(client_error_body)).into_response()
    });

    log_request(
        uuid,
        req_method,
        uri,
        resp.status(),
        web_error,
        client_status_and_error,
    );

    err_resp.unwrap_or(resp)
}

fn log_request(
    uuid: Uuid,
    req_method: Method,
    uri: Uri,
    status_code: StatusCode,
    web_error: Option<&Error>,
    client_status_and_error: Option<(StatusCode, ClientError)>,
) {
    let client_error_type = client_status_and_error
        .as_ref()
        .map(|(_, ce)| ce.as_ref().to_string());
    let status_code = client_status_and_error
        .map(|(sc, _)| sc.to_string())
        .unwrap_or(status_code.to_string());

    let logline = LogLine {
        timestamp: chrono::Utc::now().to_rfc3339(),
        uuid: uuid.to_string(),
        req_method: req_method.to_string(),
        uri: uri.to_string(),
        status_code,
        client_error_type,
        web_error_type: web_error.map(|we| we.as_ref().to_string()),
        web_error_detail: web_error.map(|we| Value::String(we.to_string())),
    };

    debug!("LOGLINE: {}", json!(logline));
}

#[derive(Serialize)]
struct LogLine {
    timestamp: String,
    uuid: String,

    req_method: String,
    uri: String,
    status_code: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    client_error_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    web_error_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    web_error_detail: Option<Value>,
}

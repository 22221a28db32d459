//! Relay layer: the `POST /api/send-sms` endpoint.
//!
//! Per request: method check, shape check, audit log, forward to the
//! gateway, map the outcome to the `{success, error?}` envelope. Stateless
//! across requests; every error is converted to the envelope at this
//! boundary, nothing propagates as an uncaught fault.

mod audit;

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::domain::{MessageBody, OutboundMessage, Recipient};
use crate::gateway::SmsSender;

pub use audit::{AuditRecord, LogEnvironment, MASKED_BODY};

const ERR_METHOD: &str = "Method not allowed";
const ERR_MISSING: &str = "Missing phone number or message";
const ERR_SEND_FALLBACK: &str = "Failed to send SMS";

#[derive(Debug, Clone, Default, Deserialize)]
/// Inbound request body for `POST /api/send-sms`.
///
/// Absent fields decode as empty strings so that "missing" and "empty"
/// follow the same rejection path.
pub struct SendSmsRequest {
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Response envelope: `error` is present iff `success` is `false`.
pub struct SendSmsResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SendSmsResponse {
    /// The success envelope, `{"success": true}`.
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    /// A failure envelope with a human-readable message.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
        }
    }
}

#[derive(Clone)]
/// State shared across request handlers: the gateway seam and the logging
/// policy, both fixed at startup.
pub struct AppState {
    sender: Arc<dyn SmsSender>,
    environment: LogEnvironment,
}

impl AppState {
    /// Wrap the gateway sender and logging policy for injection into axum.
    pub fn new(sender: Arc<dyn SmsSender>, environment: LogEnvironment) -> Self {
        Self {
            sender,
            environment,
        }
    }
}

/// Build the relay router. Non-POST methods on the route fall through to a
/// `405` with the same envelope shape the rest of the API uses.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/send-sms",
            post(send_sms).fallback(method_not_allowed),
        )
        .with_state(state)
}

async fn method_not_allowed() -> (StatusCode, Json<SendSmsResponse>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(SendSmsResponse::failure(ERR_METHOD)),
    )
}

async fn send_sms(
    State(state): State<AppState>,
    body: Bytes,
) -> (StatusCode, Json<SendSmsResponse>) {
    // Undecodable bodies land on the same 400 as missing fields.
    let request: SendSmsRequest = serde_json::from_slice(&body).unwrap_or_default();
    if request.to.is_empty() || request.message.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(SendSmsResponse::failure(ERR_MISSING)),
        );
    }

    let message = match build_message(&request) {
        Ok(message) => message,
        Err(err) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(SendSmsResponse::failure(err.to_string())),
            );
        }
    };

    AuditRecord::for_send(state.environment, message.recipient()).emit();

    match state.sender.send(&message).await {
        Ok(()) => (StatusCode::OK, Json(SendSmsResponse::ok())),
        Err(err) => {
            let text = err.to_string();
            let text = if text.trim().is_empty() {
                ERR_SEND_FALLBACK.to_owned()
            } else {
                text
            };
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SendSmsResponse::failure(text)),
            )
        }
    }
}

// The gateway must receive `to` and `message` exactly as the caller sent
// them; the domain constructors validate without rewriting the values.
fn build_message(
    request: &SendSmsRequest,
) -> Result<OutboundMessage, crate::domain::ValidationError> {
    let recipient = Recipient::new(request.to.clone())?;
    let body = MessageBody::new(request.message.clone())?;
    Ok(OutboundMessage::new(recipient, body))
}

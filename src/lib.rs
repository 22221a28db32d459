//! Authenticated relay for outbound SMS through an HTTP gateway.
//!
//! The crate is split the way the traffic flows: a `form` layer models the
//! client-side submission lifecycle, the `relay` layer exposes the
//! `POST /api/send-sms` endpoint, and the `gateway` layer issues the single
//! authenticated call to the external SMS gateway. Strong types with their
//! invariants live in `domain`; process-wide settings in `config`.
//!
//! ```rust,no_run
//! use smsrelay::config::Settings;
//! use smsrelay::gateway::GatewayClient;
//! use smsrelay::domain::{MessageBody, OutboundMessage, Recipient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = Settings::from_env();
//!     let client = GatewayClient::new(settings.credentials()?);
//!     let message = OutboundMessage::new(
//!         Recipient::new("+905551234567")?,
//!         MessageBody::new("Merhaba")?,
//!     );
//!     client.send(&message).await?;
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod config;
pub mod domain;
pub mod form;
pub mod gateway;
pub mod relay;

pub use config::{ConfigError, Settings};
pub use domain::{AuthKey, MessageBody, OutboundMessage, Recipient, ValidationError};
pub use form::{FormError, FormState, PhonePattern, RelayFormClient, SubmissionForm};
pub use gateway::{
    GatewayClient, GatewayClientBuilder, GatewayCredentials, GatewayError, SmsSender,
};
pub use relay::{AppState, LogEnvironment, SendSmsRequest, SendSmsResponse};

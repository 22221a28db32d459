//! Gateway layer: the single authenticated POST to the external SMS gateway.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use url::Url;

use crate::domain::{AuthKey, OutboundMessage};

/// Boxed future used at the transport seams so fakes can stand in for
/// reqwest in tests.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

const JSON_UTF8: &str = "application/json; charset=utf-8";

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        auth: &'a str,
        payload: serde_json::Value,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        auth: &'a str,
        payload: serde_json::Value,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self
                .client
                .post(url)
                .header(AUTHORIZATION, auth)
                .header(CONTENT_TYPE, JSON_UTF8)
                .body(payload.to_string())
                .send()
                .await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, Clone)]
/// Where and how to authenticate to the SMS gateway.
///
/// Built once at startup from [`Settings`](crate::config::Settings) and
/// injected into [`GatewayClient`]; immutable for the process lifetime.
pub struct GatewayCredentials {
    endpoint: Url,
    key: AuthKey,
}

impl GatewayCredentials {
    /// Combine a validated endpoint URL and auth key.
    pub fn new(endpoint: Url, key: AuthKey) -> Self {
        Self { endpoint, key }
    }

    /// The gateway endpoint URL.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`GatewayClient::send`].
///
/// Both variants surface to the relay caller as a generic `500` failure;
/// the caller cannot distinguish them, by design.
pub enum GatewayError {
    /// HTTP client / transport failure (DNS, TLS, connection, timeouts).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// The gateway answered with a non-success HTTP status.
    #[error("SMS gateway error: {status} {body}")]
    Status { status: u16, body: String },
}

/// Seam between the relay handler and the gateway call.
///
/// [`GatewayClient`] is the production implementation; handler tests
/// substitute a counting fake.
pub trait SmsSender: Send + Sync {
    /// Relay one message to the gateway.
    fn send<'a>(&'a self, message: &'a OutboundMessage)
    -> BoxFuture<'a, Result<(), GatewayError>>;
}

#[derive(Debug, Clone)]
/// Builder for [`GatewayClient`].
///
/// Use this to bound the gateway call with a timeout; without one, a hung
/// gateway degrades to a stuck `sending` state on the client.
pub struct GatewayClientBuilder {
    credentials: GatewayCredentials,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl GatewayClientBuilder {
    /// Create a builder with no timeout or user-agent override.
    pub fn new(credentials: GatewayCredentials) -> Self {
        Self {
            credentials,
            timeout: None,
            user_agent: None,
        }
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`GatewayClient`].
    pub fn build(self) -> Result<GatewayClient, GatewayError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| GatewayError::Transport(Box::new(err)))?;

        Ok(GatewayClient {
            credentials: self.credentials,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// Client for the external SMS gateway.
///
/// Issues exactly one authenticated POST per [`send`](GatewayClient::send)
/// invocation; no retries, no caching. Stateless apart from the read-only
/// credentials, so a single instance safely serves concurrent requests.
pub struct GatewayClient {
    credentials: GatewayCredentials,
    http: Arc<dyn HttpTransport>,
}

impl GatewayClient {
    /// Create a client with default HTTP settings.
    ///
    /// For a timeout or user-agent override, use [`GatewayClient::builder`].
    pub fn new(credentials: GatewayCredentials) -> Self {
        Self {
            credentials,
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: GatewayCredentials) -> GatewayClientBuilder {
        GatewayClientBuilder::new(credentials)
    }

    /// POST the message to the configured endpoint.
    ///
    /// Wire format: header `Authorization: <key>`, body
    /// `{"to": .., "message": ..}`, UTF-8 JSON. Any 2xx counts as success;
    /// anything else becomes [`GatewayError::Status`] carrying the status
    /// code and response body text.
    pub async fn send(&self, message: &OutboundMessage) -> Result<(), GatewayError> {
        let response = self
            .http
            .post_json(
                self.credentials.endpoint.as_str(),
                self.credentials.key.as_str(),
                message.to_wire_json(),
            )
            .await
            .map_err(GatewayError::Transport)?;

        if !(200..=299).contains(&response.status) {
            return Err(GatewayError::Status {
                status: response.status,
                body: response.body,
            });
        }

        Ok(())
    }
}

impl SmsSender for GatewayClient {
    fn send<'a>(
        &'a self,
        message: &'a OutboundMessage,
    ) -> BoxFuture<'a, Result<(), GatewayError>> {
        Box::pin(self.send(message))
    }
}

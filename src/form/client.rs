//! The form's HTTP side: posting a submission to the relay endpoint and
//! settling the state machine from the outcome.

use std::error::Error as StdError;
use std::sync::Arc;

use reqwest::header::CONTENT_TYPE;

use crate::form::{ERR_UNKNOWN, FormError, FormState, SubmissionForm};
use crate::gateway::BoxFuture;
use crate::relay::SendSmsResponse;

const JSON_UTF8: &str = "application/json; charset=utf-8";

#[derive(Debug, Clone)]
struct HttpResponse {
    body: String,
}

trait RelayTransport: Send + Sync {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        payload: serde_json::Value,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl RelayTransport for ReqwestTransport {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        payload: serde_json::Value,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self
                .client
                .post(url)
                .header(CONTENT_TYPE, JSON_UTF8)
                .body(payload.to_string())
                .send()
                .await?;
            let body = response.text().await?;
            Ok(HttpResponse { body })
        })
    }
}

#[derive(Clone)]
/// Drives a [`SubmissionForm`] against the relay endpoint.
///
/// The HTTP status is deliberately ignored in favor of the envelope: the
/// relay answers 400/405/500 with the same `{success, error?}` shape, and
/// the form only distinguishes settled success from settled failure.
pub struct RelayFormClient {
    endpoint: String,
    http: Arc<dyn RelayTransport>,
}

impl RelayFormClient {
    /// Client posting to `endpoint` (typically `<origin>/api/send-sms`).
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Run one submission cycle: guard and validate via
    /// [`SubmissionForm::begin_submit`], post the payload, settle the form
    /// from the envelope (or from a network failure). There is no way to
    /// cancel once dispatched.
    pub async fn submit<'a>(
        &self,
        form: &'a mut SubmissionForm,
    ) -> Result<&'a FormState, FormError> {
        let message = form.begin_submit()?;

        match self
            .http
            .post_json(&self.endpoint, message.to_wire_json())
            .await
        {
            Ok(response) => {
                match serde_json::from_str::<SendSmsResponse>(&response.body) {
                    Ok(envelope) if envelope.success => form.settle_success(),
                    Ok(envelope) => {
                        form.settle_failure(Some(
                            envelope.error.unwrap_or_else(|| ERR_UNKNOWN.to_owned()),
                        ));
                    }
                    Err(_) => form.settle_failure(Some(ERR_UNKNOWN.to_owned())),
                }
            }
            Err(_) => form.settle_failure(None),
        }

        Ok(form.state())
    }
}

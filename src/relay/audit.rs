//! Audit logging for relayed sends, with environment-dependent redaction.
//!
//! The message body is confidential: production records never contain it at
//! all, and every other environment only ever sees the fixed
//! [`MASKED_BODY`] placeholder. Record construction is pure so the redaction
//! rule is testable without capturing log output.

use std::time::{SystemTime, UNIX_EPOCH};

use tracing::info;

use crate::domain::Recipient;

/// Placeholder written in place of the message body outside production.
pub const MASKED_BODY: &str = "[MASKED]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Deployment environment, as far as logging is concerned.
pub enum LogEnvironment {
    /// Recipient and timestamp only; the body never reaches the log.
    Production,
    /// Adds the fixed [`MASKED_BODY`] placeholder, never the real body.
    Development,
}

impl LogEnvironment {
    /// Map the `APP_ENV` value: `production` (case-insensitive) selects
    /// [`LogEnvironment::Production`], anything else (or unset) selects
    /// [`LogEnvironment::Development`].
    pub fn from_app_env(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.eq_ignore_ascii_case("production") => Self::Production,
            _ => Self::Development,
        }
    }

    /// Whether this is the production policy.
    pub fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One audit entry for a send about to be forwarded.
///
/// The constructor never receives the message body, so no code path can
/// leak it into a record by mistake.
pub struct AuditRecord {
    phone: String,
    body: Option<&'static str>,
    timestamp: u64,
}

impl AuditRecord {
    /// Build the record for one send under the given policy.
    pub fn for_send(environment: LogEnvironment, recipient: &Recipient) -> Self {
        let body = match environment {
            LogEnvironment::Production => None,
            LogEnvironment::Development => Some(MASKED_BODY),
        };
        Self {
            phone: recipient.as_str().to_owned(),
            body,
            timestamp: unix_now(),
        }
    }

    /// The recorded recipient.
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// The recorded body field: `None` in production, the mask elsewhere.
    pub fn body(&self) -> Option<&'static str> {
        self.body
    }

    /// Seconds since the Unix epoch at record construction.
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Emit the record through `tracing`.
    pub fn emit(&self) {
        info!(
            target: "smsrelay::audit",
            phone = %self.phone,
            body = self.body,
            timestamp = self.timestamp,
            "relaying sms"
        );
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

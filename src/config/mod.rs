//! Configuration layer: process-wide settings, read once at startup.
//!
//! Missing gateway credentials are a startup fault, not a per-request
//! error: a [`GatewayClient`](crate::gateway::GatewayClient) cannot exist
//! without them, so no send attempt ever reaches the network first.

use std::net::SocketAddr;

use url::Url;

use crate::domain::AuthKey;
use crate::gateway::GatewayCredentials;
use crate::relay::LogEnvironment;

/// Gateway endpoint URL (required).
pub const ENV_SMS_URL: &str = "SMS_URL";
/// Gateway auth key (required).
pub const ENV_SMS_KEY: &str = "SMS_KEY";
/// `production` enables log redaction; anything else is development.
pub const ENV_APP_ENV: &str = "APP_ENV";
/// Bind address for the relay server.
pub const ENV_LISTEN_ADDR: &str = "RELAY_LISTEN_ADDR";

const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";

#[derive(Debug, thiserror::Error)]
/// Startup configuration faults. Fatal; none of these are recoverable by a
/// caller correcting a request.
pub enum ConfigError {
    #[error("{name} is not set in the environment")]
    MissingVar { name: &'static str },

    #[error("invalid {name}: {source}")]
    InvalidUrl {
        name: &'static str,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid {name}: {source}")]
    InvalidListenAddr {
        name: &'static str,
        #[source]
        source: std::net::AddrParseError,
    },
}

#[derive(Debug, Clone, Default)]
/// Raw settings as found in the environment. Interpretation (and the
/// required/optional split) happens in the accessor methods, so tests can
/// build any combination without touching process env.
pub struct Settings {
    pub sms_url: Option<String>,
    pub sms_key: Option<String>,
    pub app_env: Option<String>,
    pub listen_addr: Option<String>,
}

impl Settings {
    /// Read the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read from an arbitrary source, for substitution in tests.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            sms_url: lookup(ENV_SMS_URL),
            sms_key: lookup(ENV_SMS_KEY),
            app_env: lookup(ENV_APP_ENV),
            listen_addr: lookup(ENV_LISTEN_ADDR),
        }
    }

    /// Resolve the gateway credentials. Both values are required; a blank
    /// key counts as missing.
    pub fn credentials(&self) -> Result<GatewayCredentials, ConfigError> {
        let raw_url = self
            .sms_url
            .as_deref()
            .ok_or(ConfigError::MissingVar { name: ENV_SMS_URL })?;
        let endpoint = Url::parse(raw_url).map_err(|source| ConfigError::InvalidUrl {
            name: ENV_SMS_URL,
            source,
        })?;

        let key = self
            .sms_key
            .as_deref()
            .and_then(|raw| AuthKey::new(raw).ok())
            .ok_or(ConfigError::MissingVar { name: ENV_SMS_KEY })?;

        Ok(GatewayCredentials::new(endpoint, key))
    }

    /// Resolve the logging policy.
    pub fn environment(&self) -> LogEnvironment {
        LogEnvironment::from_app_env(self.app_env.as_deref())
    }

    /// Resolve the bind address, defaulting to `127.0.0.1:3000`.
    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.listen_addr
            .as_deref()
            .unwrap_or(DEFAULT_LISTEN_ADDR)
            .parse()
            .map_err(|source| ConfigError::InvalidListenAddr {
                name: ENV_LISTEN_ADDR,
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(pairs: &[(&str, &str)]) -> Settings {
        Settings::from_lookup(|name| {
            pairs
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value).to_owned())
        })
    }

    #[test]
    fn full_settings_resolve_credentials() {
        let settings = settings(&[
            ("SMS_URL", "https://sms.example.invalid/send"),
            ("SMS_KEY", "secret"),
        ]);
        let credentials = settings.credentials().unwrap();
        assert_eq!(
            credentials.endpoint().as_str(),
            "https://sms.example.invalid/send"
        );
    }

    #[test]
    fn missing_url_or_key_fails_before_any_client_exists() {
        let err = settings(&[("SMS_KEY", "secret")]).credentials().unwrap_err();
        assert_eq!(err.to_string(), "SMS_URL is not set in the environment");

        let err = settings(&[("SMS_URL", "https://sms.example.invalid/send")])
            .credentials()
            .unwrap_err();
        assert_eq!(err.to_string(), "SMS_KEY is not set in the environment");
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let err = settings(&[
            ("SMS_URL", "https://sms.example.invalid/send"),
            ("SMS_KEY", "   "),
        ])
        .credentials()
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MissingVar { name: "SMS_KEY" }
        ));
    }

    #[test]
    fn configuration_errors_read_nothing_like_gateway_failures() {
        // Scenario: credentials unset vs. the gateway rejecting a send.
        let config_err = settings(&[]).credentials().unwrap_err().to_string();
        let gateway_err = crate::gateway::GatewayError::Status {
            status: 503,
            body: "rate limited".to_owned(),
        }
        .to_string();
        assert!(config_err.contains("not set in the environment"));
        assert!(gateway_err.contains("SMS gateway error"));
        assert_ne!(config_err, gateway_err);
    }

    #[test]
    fn malformed_url_is_reported_as_such() {
        let err = settings(&[("SMS_URL", "not a url"), ("SMS_KEY", "secret")])
            .credentials()
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { name: "SMS_URL", .. }));
    }

    #[test]
    fn environment_and_listen_addr_have_defaults() {
        let bare = settings(&[]);
        assert!(!bare.environment().is_production());
        assert_eq!(bare.listen_addr().unwrap().port(), 3000);

        let production = settings(&[
            ("APP_ENV", "production"),
            ("RELAY_LISTEN_ADDR", "0.0.0.0:8080"),
        ]);
        assert!(production.environment().is_production());
        assert_eq!(production.listen_addr().unwrap().port(), 8080);
    }
}

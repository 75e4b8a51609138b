//! SMS delivery configuration
//!
//! Delivery mode is an explicit configuration value. `SMS_DELIVERY_MODE`
//! must be set to `live` or `noop`; there is no default, so the log-only
//! mode can never apply silently in a production deployment.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// How verification codes are delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMode {
    /// Send real SMS messages through the provider API
    Live,
    /// Log codes to the console instead of contacting a carrier
    Noop,
}

impl FromStr for DeliveryMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "live" => Ok(DeliveryMode::Live),
            "noop" => Ok(DeliveryMode::Noop),
            _ => Err(()),
        }
    }
}

/// SMS provider settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmsConfig {
    /// Delivery mode (live or noop)
    pub mode: DeliveryMode,

    /// Twilio Account SID
    pub account_sid: String,

    /// Twilio Auth Token
    pub auth_token: String,

    /// Sender phone number in E.164 format
    pub from_number: String,
}

impl SmsConfig {
    /// Create from environment variables.
    ///
    /// Provider credentials are only required in live mode.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_mode = std::env::var("SMS_DELIVERY_MODE")
            .map_err(|_| ConfigError::MissingVar("SMS_DELIVERY_MODE".to_string()))?;
        let mode = raw_mode.parse().map_err(|_| ConfigError::InvalidValue {
            name: "SMS_DELIVERY_MODE".to_string(),
            value: raw_mode,
        })?;

        let account_sid = std::env::var("TWILIO_ACCOUNT_SID").unwrap_or_default();
        let auth_token = std::env::var("TWILIO_AUTH_TOKEN").unwrap_or_default();
        let from_number = std::env::var("TWILIO_FROM_NUMBER").unwrap_or_default();

        if mode == DeliveryMode::Live {
            if account_sid.is_empty() {
                return Err(ConfigError::MissingVar("TWILIO_ACCOUNT_SID".to_string()));
            }
            if auth_token.is_empty() {
                return Err(ConfigError::MissingVar("TWILIO_AUTH_TOKEN".to_string()));
            }
            if from_number.is_empty() {
                return Err(ConfigError::MissingVar("TWILIO_FROM_NUMBER".to_string()));
            }
        }

        Ok(Self {
            mode,
            account_sid,
            auth_token,
            from_number,
        })
    }

    /// A no-op configuration, for tests and local tooling.
    pub fn noop() -> Self {
        Self {
            mode: DeliveryMode::Noop,
            account_sid: String::new(),
            auth_token: String::new(),
            from_number: String::new(),
        }
    }
}

//! Twilio SMS sender.
//!
//! Calls the Twilio Messages endpoint directly over HTTP with basic auth.
//! Numbers are stored nationally and converted to E.164 only here, at the
//! provider boundary.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{error, info};

use lb_shared::config::SmsConfig;
use lb_shared::utils::phone::{mask_phone_number, to_e164};

use crate::InfrastructureError;

use super::sms_sender::SmsSender;

const API_BASE: &str = "https://api.twilio.com/2010-04-01";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Twilio SMS sender
pub struct TwilioSmsSender {
    client: reqwest::Client,
    account_sid: String,
    auth_token: String,
    from_number: String,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    sid: String,
}

impl TwilioSmsSender {
    /// Create a new Twilio sender from configuration
    pub fn new(config: &SmsConfig) -> Result<Self, InfrastructureError> {
        if config.account_sid.is_empty() {
            return Err(InfrastructureError::Config(
                "TWILIO_ACCOUNT_SID not set".to_string(),
            ));
        }
        if config.auth_token.is_empty() {
            return Err(InfrastructureError::Config(
                "TWILIO_AUTH_TOKEN not set".to_string(),
            ));
        }
        if !config.from_number.starts_with('+') {
            return Err(InfrastructureError::Config(
                "TWILIO_FROM_NUMBER must be in E.164 format (starting with '+')".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| InfrastructureError::Config(format!("HTTP client setup failed: {}", e)))?;

        info!(
            from = %mask_phone_number(&config.from_number),
            "Twilio SMS sender initialized"
        );

        Ok(Self {
            client,
            account_sid: config.account_sid.clone(),
            auth_token: config.auth_token.clone(),
            from_number: config.from_number.clone(),
        })
    }
}

#[async_trait]
impl SmsSender for TwilioSmsSender {
    async fn send_sms(
        &self,
        phone_number: &str,
        message: &str,
    ) -> Result<String, InfrastructureError> {
        let to = to_e164(phone_number).ok_or_else(|| {
            InfrastructureError::Sms(format!(
                "Not a valid mobile number: {}",
                mask_phone_number(phone_number)
            ))
        })?;

        let url = format!("{}/Accounts/{}/Messages.json", API_BASE, self.account_sid);
        let params = [
            ("To", to.as_str()),
            ("From", self.from_number.as_str()),
            ("Body", message),
        ];

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&params)
            .send()
            .await
            .map_err(|e| InfrastructureError::Sms(format!("Twilio request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(
                phone = %mask_phone_number(phone_number),
                status = %status,
                "Twilio rejected the message"
            );
            return Err(InfrastructureError::Sms(format!(
                "Twilio returned {}: {}",
                status, body
            )));
        }

        let parsed: MessageResponse = response
            .json()
            .await
            .map_err(|e| InfrastructureError::Sms(format!("Invalid Twilio response: {}", e)))?;

        info!(
            phone = %mask_phone_number(phone_number),
            sid = %parsed.sid,
            "SMS sent via Twilio"
        );
        Ok(parsed.sid)
    }

    fn provider_name(&self) -> &'static str {
        "twilio"
    }
}

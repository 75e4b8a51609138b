//! SMS delivery module.
//!
//! Two senders implement the [`SmsSender`] trait: a Twilio client for live
//! delivery and a console sender that only logs. Which one runs is decided
//! by the explicit [`DeliveryMode`] in configuration, resolved once here at
//! startup; business logic never branches on it.

pub mod console_sms;
mod gateway;
pub mod sms_sender;
pub mod twilio;

pub use console_sms::ConsoleSmsSender;
pub use gateway::SmsGateway;
pub use sms_sender::{verification_message, SmsSender};
pub use twilio::TwilioSmsSender;

use lb_shared::config::{DeliveryMode, SmsConfig};

use crate::InfrastructureError;

/// Build the SMS gateway for the configured delivery mode.
pub fn create_sms_gateway(config: &SmsConfig) -> Result<SmsGateway, InfrastructureError> {
    match config.mode {
        DeliveryMode::Live => {
            let sender = TwilioSmsSender::new(config)?;
            tracing::info!(provider = sender.provider_name(), "SMS delivery is live");
            Ok(SmsGateway::new(Box::new(sender)))
        }
        DeliveryMode::Noop => {
            tracing::warn!("SMS delivery is in no-op mode; codes are logged, not sent");
            Ok(SmsGateway::new(Box::new(ConsoleSmsSender::new())))
        }
    }
}

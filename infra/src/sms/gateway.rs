//! Adapter from the infrastructure SMS senders onto the core delivery trait.

use async_trait::async_trait;

use lb_core::services::verification::SmsChannel;

use super::sms_sender::{verification_message, SmsSender};

/// Bridges a boxed [`SmsSender`] to the core [`SmsChannel`] trait, composing
/// the verification message body on the way through.
pub struct SmsGateway {
    sender: Box<dyn SmsSender>,
}

impl SmsGateway {
    /// Wrap a sender implementation
    pub fn new(sender: Box<dyn SmsSender>) -> Self {
        Self { sender }
    }

    /// Name of the wrapped provider
    pub fn provider_name(&self) -> &'static str {
        self.sender.provider_name()
    }
}

#[async_trait]
impl SmsChannel for SmsGateway {
    async fn send_verification_code(
        &self,
        phone_number: &str,
        code: &str,
    ) -> Result<String, String> {
        let body = verification_message(code);
        self.sender
            .send_sms(phone_number, &body)
            .await
            .map_err(|e| e.to_string())
    }
}

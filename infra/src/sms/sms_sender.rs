//! SMS provider interface and message composition.

use async_trait::async_trait;

use crate::InfrastructureError;

/// Outbound SMS provider.
#[async_trait]
pub trait SmsSender: Send + Sync {
    /// Send a raw SMS message. Returns the provider's message id.
    async fn send_sms(
        &self,
        phone_number: &str,
        message: &str,
    ) -> Result<String, InfrastructureError>;

    /// Provider name for logs
    fn provider_name(&self) -> &'static str;
}

/// Compose the verification-code message body.
///
/// Wording (including the 10-minute validity notice) matches the production
/// SMS template.
pub fn verification_message(code: &str) -> String {
    format!(
        "【LINEBUZZ】認証コード: {}\n※このコードは10分間有効です。",
        code
    )
}

//! Delivery-channel trait for the verification service.

use async_trait::async_trait;

/// Outbound SMS channel used to deliver verification codes.
///
/// Implementations live in the infrastructure layer and are injected at
/// construction. Errors carry a provider message; the service maps any
/// failure to [`AuthError::DeliveryFailed`](crate::errors::AuthError::DeliveryFailed).
#[async_trait]
pub trait SmsChannel: Send + Sync {
    /// Deliver a verification code to a phone number.
    ///
    /// Returns the provider's message id on success.
    async fn send_verification_code(
        &self,
        phone_number: &str,
        code: &str,
    ) -> Result<String, String>;
}

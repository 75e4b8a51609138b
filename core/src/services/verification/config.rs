//! Configuration for the verification service

use crate::domain::entities::verification_request::CODE_TTL_MINUTES;

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Number of minutes before a verification code expires
    pub code_ttl_minutes: i64,
    /// Minimum seconds between code requests for the same number
    /// (0 disables the cooldown)
    pub resend_cooldown_seconds: i64,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            code_ttl_minutes: CODE_TTL_MINUTES,
            resend_cooldown_seconds: 60,
        }
    }
}

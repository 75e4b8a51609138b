//! Result types for verification service operations

use chrono::{DateTime, Utc};

use crate::domain::entities::verification_request::VerificationRequest;

/// Result of a successful code request
#[derive(Debug, Clone)]
pub struct SendCodeOutcome {
    /// The verification request that was stored
    pub request: VerificationRequest,
    /// The SMS message id from the provider
    pub message_id: String,
    /// When the caller may request another code
    pub next_resend_at: DateTime<Utc>,
}

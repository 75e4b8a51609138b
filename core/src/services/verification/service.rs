//! Verification-code lifecycle: generation, storage, delivery, consumption.

use std::sync::Arc;

use chrono::{Duration, Utc};
use constant_time_eq::constant_time_eq;
use tracing::{error, info, warn};

use lb_shared::utils::phone::{is_valid_mobile, mask_phone_number, normalize_phone_number};

use crate::domain::entities::verification_request::{
    CodePurpose, VerificationRequest, CODE_LENGTH,
};
use crate::errors::{AuthError, DomainResult};
use crate::repositories::{UserRepository, VerificationRepository};

use super::config::VerificationServiceConfig;
use super::traits::SmsChannel;
use super::types::SendCodeOutcome;

/// Service for issuing and consuming one-time phone verification codes.
///
/// All coordination happens in the store: both the per-number replacement
/// and the consumption are single atomic repository operations, so the
/// service itself holds no mutable state and may run in any number of
/// processes concurrently.
pub struct VerificationService<U, V, S>
where
    U: UserRepository,
    V: VerificationRepository,
    S: SmsChannel,
{
    /// Account lookups for the purpose gate
    user_repo: Arc<U>,
    /// Pending-code storage
    verification_repo: Arc<V>,
    /// Outbound SMS channel
    sms: Arc<S>,
    /// Service configuration
    config: VerificationServiceConfig,
}

impl<U, V, S> VerificationService<U, V, S>
where
    U: UserRepository,
    V: VerificationRepository,
    S: SmsChannel,
{
    /// Create a new verification service
    pub fn new(
        user_repo: Arc<U>,
        verification_repo: Arc<V>,
        sms: Arc<S>,
        config: VerificationServiceConfig,
    ) -> Self {
        Self {
            user_repo,
            verification_repo,
            sms,
            config,
        }
    }

    /// Issue a verification code for a phone number.
    ///
    /// This method:
    /// 1. Validates the phone number format
    /// 2. Checks account existence against the requested purpose
    /// 3. Applies the resend cooldown
    /// 4. Generates a new code and atomically replaces any pending request
    ///    for this number (other numbers' requests are never touched)
    /// 5. Delivers the code via SMS
    ///
    /// A delivery failure is reported to the caller, but the stored code is
    /// not rolled back: the next request supersedes it.
    pub async fn request_code(
        &self,
        phone_number: &str,
        purpose: CodePurpose,
    ) -> DomainResult<SendCodeOutcome> {
        let phone = normalize_phone_number(phone_number);
        let masked = mask_phone_number(&phone);

        if !is_valid_mobile(&phone) {
            warn!(
                phone = %masked,
                event = "invalid_phone_format",
                "Rejected verification code request"
            );
            return Err(AuthError::InvalidPhoneFormat.into());
        }

        let registered = self.user_repo.exists_by_phone(&phone).await?;
        match purpose {
            CodePurpose::Registration if registered => {
                warn!(
                    phone = %masked,
                    purpose = purpose.as_str(),
                    event = "purpose_conflict",
                    "Registration code requested for an existing account"
                );
                return Err(AuthError::AlreadyRegistered.into());
            }
            CodePurpose::PasswordReset if !registered => {
                warn!(
                    phone = %masked,
                    purpose = purpose.as_str(),
                    event = "purpose_conflict",
                    "Password reset code requested for an unknown account"
                );
                return Err(AuthError::NotRegistered.into());
            }
            _ => {}
        }

        if self.config.resend_cooldown_seconds > 0 {
            if let Some(existing) = self.verification_repo.find_by_phone(&phone).await? {
                let age = Utc::now() - existing.created_at;
                let cooldown = Duration::seconds(self.config.resend_cooldown_seconds);
                if !existing.is_expired() && age < cooldown {
                    let wait = (cooldown - age).num_seconds().max(1);
                    warn!(
                        phone = %masked,
                        wait_seconds = wait,
                        event = "resend_cooldown",
                        "Verification code requested again within the cooldown window"
                    );
                    return Err(AuthError::RateLimitExceeded { seconds: wait }.into());
                }
            }
        }

        let request = VerificationRequest::with_ttl(
            phone.clone(),
            purpose,
            self.config.code_ttl_minutes,
        );

        // Single upsert on the phone key: the previous pending code for this
        // number (if any) is superseded, and nothing else changes.
        self.verification_repo.upsert(&request).await?;
        info!(
            phone = %masked,
            purpose = purpose.as_str(),
            expires_at = %request.expires_at,
            event = "code_issued",
            "Stored new verification code"
        );

        let message_id = match self.sms.send_verification_code(&phone, &request.code).await {
            Ok(id) => id,
            Err(e) => {
                // The stored code stays; a resend supersedes it.
                error!(
                    phone = %masked,
                    error = %e,
                    event = "sms_delivery_failed",
                    "Failed to deliver verification code"
                );
                return Err(AuthError::DeliveryFailed.into());
            }
        };

        let next_resend_at =
            request.created_at + Duration::seconds(self.config.resend_cooldown_seconds);

        Ok(SendCodeOutcome {
            request,
            message_id,
            next_resend_at,
        })
    }

    /// Validate a candidate code and retire it.
    ///
    /// Reports `CodeNotFound`, `CodeExpired` and `CodeMismatch` as distinct
    /// errors so callers can log them apart, even where the UI collapses
    /// them into one message. On success the stored request is gone: the
    /// conditional delete in the repository is the gate, and of any number
    /// of concurrent callers holding the correct code exactly one returns
    /// `Ok` here. Callers run the action the code authorizes only after
    /// this method succeeds.
    pub async fn verify_and_consume(
        &self,
        phone_number: &str,
        candidate: &str,
        purpose: CodePurpose,
    ) -> DomainResult<()> {
        let phone = normalize_phone_number(phone_number);
        let masked = mask_phone_number(&phone);

        if !is_valid_mobile(&phone) {
            return Err(AuthError::InvalidPhoneFormat.into());
        }

        if candidate.len() != CODE_LENGTH || !candidate.chars().all(|c| c.is_ascii_digit()) {
            warn!(
                phone = %masked,
                event = "code_format_rejected",
                "Candidate code is not a 6-digit number"
            );
            return Err(AuthError::CodeMismatch.into());
        }

        let request = match self.verification_repo.find_by_phone(&phone).await? {
            Some(request) => request,
            None => {
                warn!(
                    phone = %masked,
                    event = "code_not_found",
                    "No pending verification code for this number"
                );
                return Err(AuthError::CodeNotFound.into());
            }
        };

        if request.purpose != purpose {
            // A code issued for one flow does not authorize the other.
            // Publicly indistinguishable from a missing code.
            warn!(
                phone = %masked,
                stored_purpose = request.purpose.as_str(),
                requested_purpose = purpose.as_str(),
                event = "purpose_mismatch",
                "Verification code purpose does not match"
            );
            return Err(AuthError::CodeNotFound.into());
        }

        if request.is_expired() {
            // Left in place for the cleanup sweep; reported apart from a
            // missing code so the caller can say "expired".
            warn!(
                phone = %masked,
                expired_at = %request.expires_at,
                event = "code_expired",
                "Verification code has expired"
            );
            return Err(AuthError::CodeExpired.into());
        }

        if !constant_time_eq(request.code.as_bytes(), candidate.as_bytes()) {
            warn!(
                phone = %masked,
                event = "code_mismatch",
                "Verification code does not match"
            );
            return Err(AuthError::CodeMismatch.into());
        }

        let consumed = self.verification_repo.consume(&phone, candidate).await?;
        if !consumed {
            // The row vanished between the read and the delete: a concurrent
            // caller consumed it, or it expired at the boundary.
            warn!(
                phone = %masked,
                event = "code_already_consumed",
                "Verification code was consumed by a concurrent request"
            );
            return Err(AuthError::CodeNotFound.into());
        }

        info!(
            phone = %masked,
            purpose = purpose.as_str(),
            event = "code_consumed",
            "Verification code consumed"
        );
        Ok(())
    }
}

//! Registration and password-reset flows.

use std::sync::Arc;

use tracing::info;

use lb_shared::utils::phone::{mask_phone_number, normalize_phone_number};

use crate::domain::entities::user::User;
use crate::domain::entities::verification_request::CodePurpose;
use crate::errors::{AuthError, DomainResult};
use crate::repositories::{UserRepository, VerificationRepository};
use crate::services::verification::{SmsChannel, VerificationService};

use super::password::hash_password;

/// Account service: completes the flows a verification code authorizes.
///
/// Both flows are consume-then-act: the code is retired first, and only the
/// caller whose consumption succeeded runs the account mutation. A mutation
/// failure after consumption propagates to the caller, who requests a fresh
/// code; the consumed code can never be replayed.
pub struct AuthService<U, V, S>
where
    U: UserRepository,
    V: VerificationRepository,
    S: SmsChannel,
{
    user_repo: Arc<U>,
    verification: Arc<VerificationService<U, V, S>>,
}

impl<U, V, S> AuthService<U, V, S>
where
    U: UserRepository,
    V: VerificationRepository,
    S: SmsChannel,
{
    /// Create a new auth service
    pub fn new(user_repo: Arc<U>, verification: Arc<VerificationService<U, V, S>>) -> Self {
        Self {
            user_repo,
            verification,
        }
    }

    /// Create an account after SMS verification.
    ///
    /// The password is validated and hashed before the code is consumed, so
    /// a rejected password does not burn the one-time code.
    pub async fn register(
        &self,
        phone_number: &str,
        code: &str,
        password: &str,
    ) -> DomainResult<User> {
        let phone = normalize_phone_number(phone_number);
        let password_hash = hash_password(password)?;

        self.verification
            .verify_and_consume(&phone, code, CodePurpose::Registration)
            .await?;

        let user = self.user_repo.create(User::new(phone.clone(), password_hash)).await?;

        info!(
            phone = %mask_phone_number(&phone),
            user_id = %user.id,
            event = "user_registered",
            "Created account after phone verification"
        );
        Ok(user)
    }

    /// Replace an account password after SMS verification.
    pub async fn reset_password(
        &self,
        phone_number: &str,
        code: &str,
        password: &str,
    ) -> DomainResult<()> {
        let phone = normalize_phone_number(phone_number);
        let password_hash = hash_password(password)?;

        self.verification
            .verify_and_consume(&phone, code, CodePurpose::PasswordReset)
            .await?;

        let updated = self.user_repo.update_password(&phone, &password_hash).await?;
        if !updated {
            // The account vanished between the purpose gate and the update.
            return Err(AuthError::NotRegistered.into());
        }

        info!(
            phone = %mask_phone_number(&phone),
            event = "password_reset",
            "Updated account password after phone verification"
        );
        Ok(())
    }
}

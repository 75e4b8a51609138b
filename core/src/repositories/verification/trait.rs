//! Verification request repository trait.
//!
//! Request handlers are stateless and may run in many processes at once, so
//! every mutation here must be a single atomic operation against the store.
//! Implementations must not decompose `upsert` or `consume` into a
//! read-then-write pair visible to concurrent writers.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::verification_request::VerificationRequest;
use crate::errors::DomainError;

/// Repository contract for pending verification codes, keyed by phone number.
#[async_trait]
pub trait VerificationRepository: Send + Sync {
    /// Store a request, atomically replacing any existing request for the
    /// same phone number. Scoped strictly to that one key: requests for
    /// other numbers are never touched.
    async fn upsert(&self, request: &VerificationRequest) -> Result<(), DomainError>;

    /// Fetch the stored request for a phone number, expired or not.
    ///
    /// No expiry filter here: the service distinguishes an expired code
    /// from a missing one, which a filtered read would collapse.
    async fn find_by_phone(
        &self,
        phone_number: &str,
    ) -> Result<Option<VerificationRequest>, DomainError>;

    /// Conditionally delete the request for `phone_number` if its code
    /// matches and it has not expired.
    ///
    /// The delete is the consumption gate: of any number of concurrent
    /// callers holding the correct code, exactly one observes `true` and
    /// may run the action the code authorizes.
    async fn consume(&self, phone_number: &str, code: &str) -> Result<bool, DomainError>;

    /// Remove requests that expired at or before `now`. Returns the number
    /// of rows deleted.
    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError>;
}

//! Verification request entity for SMS-based phone verification.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Validity window for a verification code (10 minutes)
pub const CODE_TTL_MINUTES: i64 = 10;

/// Which flow a verification code authorizes.
///
/// Registration requires that no account exists for the phone number yet;
/// password reset requires that one does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodePurpose {
    Registration,
    PasswordReset,
}

impl CodePurpose {
    /// Storage representation
    pub fn as_str(&self) -> &'static str {
        match self {
            CodePurpose::Registration => "registration",
            CodePurpose::PasswordReset => "password_reset",
        }
    }

    /// Parse the storage representation
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "registration" => Some(CodePurpose::Registration),
            "password_reset" => Some(CodePurpose::PasswordReset),
            _ => None,
        }
    }
}

/// A pending one-time verification code for a phone number.
///
/// At most one live request exists per phone number; a new request for the
/// same number supersedes the previous one. A request is retired exactly
/// once, by the consumer that deletes its row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRequest {
    /// Normalized phone number this code was sent to (the natural key)
    pub phone_number: String,

    /// The 6-digit verification code
    pub code: String,

    /// Flow this code authorizes
    pub purpose: CodePurpose,

    /// Timestamp when the code was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,
}

impl VerificationRequest {
    /// Create a new request with a random code and the default TTL
    pub fn new(phone_number: String, purpose: CodePurpose) -> Self {
        Self::with_ttl(phone_number, purpose, CODE_TTL_MINUTES)
    }

    /// Create a new request with a custom TTL in minutes
    pub fn with_ttl(phone_number: String, purpose: CodePurpose, ttl_minutes: i64) -> Self {
        let now = Utc::now();
        Self {
            phone_number,
            code: Self::generate_code(),
            purpose,
            created_at: now,
            expires_at: now + Duration::minutes(ttl_minutes),
        }
    }

    /// Generate a random 6-digit code from the OS CSPRNG.
    ///
    /// The modulo bias on a 6-digit range is negligible, and expiry bounds
    /// the exposure window in any case.
    pub fn generate_code() -> String {
        let mut bytes = [0u8; 4];
        OsRng.fill_bytes(&mut bytes);
        let code = u32::from_le_bytes(bytes) % 1_000_000;
        format!("{:06}", code)
    }

    /// Whether the code has passed its expiry timestamp
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

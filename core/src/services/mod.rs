//! Business services.

pub mod auth;
pub mod verification;

pub use auth::AuthService;
pub use verification::{SmsChannel, VerificationService, VerificationServiceConfig};

//! Shared application state injected into request handlers.

use std::sync::Arc;

use lb_core::repositories::{UserRepository, VerificationRepository};
use lb_core::services::auth::AuthService;
use lb_core::services::verification::{SmsChannel, VerificationService};

/// Service handles shared by all handlers.
///
/// Generic over the repository and SMS traits; the concrete types are fixed
/// once, in `main`, where the implementations are constructed and injected.
pub struct AppState<U, V, S>
where
    U: UserRepository,
    V: VerificationRepository,
    S: SmsChannel,
{
    pub verification_service: Arc<VerificationService<U, V, S>>,
    pub auth_service: Arc<AuthService<U, V, S>>,
}

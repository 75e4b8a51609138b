//! Handler for POST /api/v1/auth/reset-password

use actix_web::{web, HttpResponse};
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use lb_core::repositories::{UserRepository, VerificationRepository};
use lb_core::services::verification::SmsChannel;
use lb_shared::types::response::ApiResponse;
use lb_shared::utils::phone::mask_phone_number;

use crate::dto::auth::{MessageResponse, ResetPasswordRequest};
use crate::handlers::error::{error_response, validation_error_response};
use crate::state::AppState;

/// Replace an account password with a previously delivered verification code.
pub async fn reset_password<U, V, S>(
    state: web::Data<AppState<U, V, S>>,
    payload: web::Json<ResetPasswordRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    V: VerificationRepository + 'static,
    S: SmsChannel + 'static,
{
    let request_id = Uuid::new_v4().to_string();

    if let Err(errors) = payload.0.validate() {
        return validation_error_response(&errors);
    }

    info!(
        request_id = %request_id,
        phone = %mask_phone_number(&payload.phone_number),
        "Processing password-reset request"
    );

    match state
        .auth_service
        .reset_password(&payload.phone_number, &payload.code, &payload.password)
        .await
    {
        Ok(()) => {
            info!(request_id = %request_id, "Password reset completed");
            HttpResponse::Ok().json(
                ApiResponse::success(MessageResponse {
                    message: "Password has been reset".to_string(),
                })
                .with_request_id(request_id),
            )
        }
        Err(error) => {
            warn!(
                request_id = %request_id,
                error = %error,
                "Password reset failed"
            );
            error_response(&error)
        }
    }
}

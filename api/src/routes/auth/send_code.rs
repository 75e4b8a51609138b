//! Handler for POST /api/v1/auth/send-code

use actix_web::{web, HttpResponse};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use lb_core::repositories::{UserRepository, VerificationRepository};
use lb_core::services::verification::SmsChannel;
use lb_shared::types::response::ApiResponse;
use lb_shared::utils::phone::mask_phone_number;

use crate::dto::auth::{SendCodeRequest, SendCodeResponse};
use crate::handlers::error::{error_response, validation_error_response};
use crate::state::AppState;

/// Issue a verification code for registration or password reset.
///
/// # Request Body
///
/// ```json
/// {
///     "phone_number": "09012345678",
///     "purpose": "registration"
/// }
/// ```
///
/// Responds 200 with the resend delay on success; error statuses follow the
/// domain error mapping (400 invalid phone, 409 already registered,
/// 404 not registered, 429 cooldown, 503 delivery failure).
pub async fn send_code<U, V, S>(
    state: web::Data<AppState<U, V, S>>,
    payload: web::Json<SendCodeRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    V: VerificationRepository + 'static,
    S: SmsChannel + 'static,
{
    let request_id = Uuid::new_v4().to_string();

    if let Err(errors) = payload.0.validate() {
        warn!(
            request_id = %request_id,
            event = "request_rejected",
            "send-code request failed validation"
        );
        return validation_error_response(&errors);
    }

    info!(
        request_id = %request_id,
        phone = %mask_phone_number(&payload.phone_number),
        purpose = payload.purpose.as_str(),
        "Processing send-code request"
    );

    match state
        .verification_service
        .request_code(&payload.phone_number, payload.purpose)
        .await
    {
        Ok(outcome) => {
            let resend_after = (outcome.next_resend_at - Utc::now()).num_seconds().max(0);
            info!(
                request_id = %request_id,
                message_id = %outcome.message_id,
                "Verification code sent"
            );
            HttpResponse::Ok().json(
                ApiResponse::success(SendCodeResponse {
                    message: "Verification code sent".to_string(),
                    resend_after,
                })
                .with_request_id(request_id),
            )
        }
        Err(error) => {
            warn!(
                request_id = %request_id,
                error = %error,
                "send-code request failed"
            );
            error_response(&error)
        }
    }
}

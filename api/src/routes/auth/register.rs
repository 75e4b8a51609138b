//! Handler for POST /api/v1/auth/register

use actix_web::{web, HttpResponse};
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use lb_core::repositories::{UserRepository, VerificationRepository};
use lb_core::services::verification::SmsChannel;
use lb_shared::types::response::ApiResponse;
use lb_shared::utils::phone::mask_phone_number;

use crate::dto::auth::{RegisterRequest, RegisterResponse};
use crate::handlers::error::{error_response, validation_error_response};
use crate::state::AppState;

/// Create an account with a previously delivered verification code.
///
/// # Request Body
///
/// ```json
/// {
///     "phone_number": "09012345678",
///     "code": "123456",
///     "password": "correct horse"
/// }
/// ```
pub async fn register<U, V, S>(
    state: web::Data<AppState<U, V, S>>,
    payload: web::Json<RegisterRequest>,
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
        "Processing registration request"
    );

    match state
        .auth_service
        .register(&payload.phone_number, &payload.code, &payload.password)
        .await
    {
        Ok(user) => {
            info!(
                request_id = %request_id,
                user_id = %user.id,
                "Registration completed"
            );
            HttpResponse::Ok().json(
                ApiResponse::success(RegisterResponse {
                    user_id: user.id.to_string(),
                })
                .with_request_id(request_id),
            )
        }
        Err(error) => {
            warn!(
                request_id = %request_id,
                error = %error,
                "Registration failed"
            );
            error_response(&error)
        }
    }
}

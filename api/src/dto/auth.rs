//! Authentication endpoint DTOs.
//!
//! Validation here only bounds the input shape; the real phone-number and
//! code checks happen in the domain services.

use serde::{Deserialize, Serialize};
use validator::Validate;

use lb_core::domain::entities::verification_request::CodePurpose;

/// Request body for POST /api/v1/auth/send-code
#[derive(Debug, Deserialize, Validate)]
pub struct SendCodeRequest {
    /// Phone number, national or +81 format, separators allowed
    #[validate(length(min = 10, max = 20, message = "phone number must be 10-20 characters"))]
    pub phone_number: String,

    /// Which flow the code is for
    pub purpose: CodePurpose,
}

/// Response body for a successful send-code request
#[derive(Debug, Serialize)]
pub struct SendCodeResponse {
    pub message: String,
    /// Seconds until another code may be requested
    pub resend_after: i64,
}

/// Request body for POST /api/v1/auth/register
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 10, max = 20, message = "phone number must be 10-20 characters"))]
    pub phone_number: String,

    #[validate(length(equal = 6, message = "verification code must be 6 digits"))]
    pub code: String,

    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
}

/// Response body for a successful registration
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user_id: String,
}

/// Request body for POST /api/v1/auth/reset-password
#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 10, max = 20, message = "phone number must be 10-20 characters"))]
    pub phone_number: String,

    #[validate(length(equal = 6, message = "verification code must be 6 digits"))]
    pub code: String,

    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
}

/// Generic message-only response body
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_code_request_deserializes_purpose() {
        let request: SendCodeRequest = serde_json::from_str(
            r#"{"phone_number": "09012345678", "purpose": "registration"}"#,
        )
        .unwrap();
        assert_eq!(request.purpose, CodePurpose::Registration);

        let request: SendCodeRequest = serde_json::from_str(
            r#"{"phone_number": "09012345678", "purpose": "password_reset"}"#,
        )
        .unwrap();
        assert_eq!(request.purpose, CodePurpose::PasswordReset);
    }

    #[test]
    fn test_send_code_request_rejects_unknown_purpose() {
        let result = serde_json::from_str::<SendCodeRequest>(
            r#"{"phone_number": "09012345678", "purpose": "login"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_register_request_validation() {
        let request = RegisterRequest {
            phone_number: "09012345678".to_string(),
            code: "123456".to_string(),
            password: "long-enough".to_string(),
        };
        assert!(request.validate().is_ok());

        let bad_code = RegisterRequest {
            code: "123".to_string(),
            ..request
        };
        assert!(bad_code.validate().is_err());
    }

    #[test]
    fn test_register_request_rejects_short_password() {
        let request = RegisterRequest {
            phone_number: "09012345678".to_string(),
            code: "123456".to_string(),
            password: "short".to_string(),
        };
        assert!(request.validate().is_err());
    }
}

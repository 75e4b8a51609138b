//! Verification service tests

use std::sync::Arc;

use crate::domain::entities::verification_request::{CodePurpose, VerificationRequest};
use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError};
use crate::repositories::user::{MockUserRepository, UserRepository};
use crate::repositories::verification::{MockVerificationRepository, VerificationRepository};
use crate::services::verification::{VerificationService, VerificationServiceConfig};

use super::mocks::MockSmsChannel;

const PHONE: &str = "09012345678";

type TestService =
    VerificationService<MockUserRepository, MockVerificationRepository, MockSmsChannel>;

struct Fixture {
    user_repo: Arc<MockUserRepository>,
    verification_repo: Arc<MockVerificationRepository>,
    sms: Arc<MockSmsChannel>,
    service: Arc<TestService>,
}

/// Build a service over fresh mocks. Cooldown is disabled unless a test
/// opts in, so back-to-back requests exercise the supersede path.
fn fixture(resend_cooldown_seconds: i64) -> Fixture {
    fixture_with_sms(resend_cooldown_seconds, MockSmsChannel::new())
}

fn fixture_with_sms(resend_cooldown_seconds: i64, sms: MockSmsChannel) -> Fixture {
    let user_repo = Arc::new(MockUserRepository::new());
    let verification_repo = Arc::new(MockVerificationRepository::new());
    let sms = Arc::new(sms);
    let config = VerificationServiceConfig {
        code_ttl_minutes: 10,
        resend_cooldown_seconds,
    };
    let service = Arc::new(VerificationService::new(
        user_repo.clone(),
        verification_repo.clone(),
        sms.clone(),
        config,
    ));
    Fixture {
        user_repo,
        verification_repo,
        sms,
        service,
    }
}

fn auth_err(result: Result<impl std::fmt::Debug, DomainError>) -> AuthError {
    match result {
        Err(DomainError::Auth(e)) => e,
        other => panic!("expected an auth error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_request_then_verify_succeeds_exactly_once() {
    let f = fixture(0);

    let outcome = f
        .service
        .request_code(PHONE, CodePurpose::Registration)
        .await
        .unwrap();
    assert_eq!(f.sms.last_code_for(PHONE), Some(outcome.request.code.clone()));

    f.service
        .verify_and_consume(PHONE, &outcome.request.code, CodePurpose::Registration)
        .await
        .unwrap();

    // The code is gone: a replay observes not-found, never a second success
    let replay = f
        .service
        .verify_and_consume(PHONE, &outcome.request.code, CodePurpose::Registration)
        .await;
    assert_eq!(auth_err(replay), AuthError::CodeNotFound);
}

#[tokio::test]
async fn test_second_request_supersedes_first_code() {
    let f = fixture(0);

    let first = f
        .service
        .request_code(PHONE, CodePurpose::Registration)
        .await
        .unwrap();
    let second = f
        .service
        .request_code(PHONE, CodePurpose::Registration)
        .await
        .unwrap();

    // Exactly one row for this number, holding the newest code
    assert_eq!(f.verification_repo.len(), 1);

    if first.request.code != second.request.code {
        let stale = f
            .service
            .verify_and_consume(PHONE, &first.request.code, CodePurpose::Registration)
            .await;
        assert_eq!(auth_err(stale), AuthError::CodeMismatch);
    }

    f.service
        .verify_and_consume(PHONE, &second.request.code, CodePurpose::Registration)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_expired_code_reports_expired_not_missing() {
    let f = fixture(0);

    let mut request = VerificationRequest::new(PHONE.to_string(), CodePurpose::Registration);
    request.expires_at = request.created_at - chrono::Duration::seconds(1);
    f.verification_repo.insert_raw(request.clone());

    let result = f
        .service
        .verify_and_consume(PHONE, &request.code, CodePurpose::Registration)
        .await;
    assert_eq!(auth_err(result), AuthError::CodeExpired);

    // The expired row is left for the cleanup sweep, not deleted here
    assert_eq!(f.verification_repo.len(), 1);
}

#[tokio::test]
async fn test_registration_rejected_for_existing_account() {
    let f = fixture(0);
    f.user_repo
        .insert_user(User::new(PHONE.to_string(), "hash".to_string()));

    let result = f.service.request_code(PHONE, CodePurpose::Registration).await;
    assert_eq!(auth_err(result), AuthError::AlreadyRegistered);
}

#[tokio::test]
async fn test_password_reset_requires_existing_account() {
    let f = fixture(0);

    let result = f
        .service
        .request_code(PHONE, CodePurpose::PasswordReset)
        .await;
    assert_eq!(auth_err(result), AuthError::NotRegistered);

    f.user_repo
        .insert_user(User::new(PHONE.to_string(), "hash".to_string()));
    f.service
        .request_code(PHONE, CodePurpose::PasswordReset)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_invalid_phone_number_rejected() {
    let f = fixture(0);

    for phone in ["12345", "06012345678", "090123456789", "abc"] {
        let result = f.service.request_code(phone, CodePurpose::Registration).await;
        assert_eq!(auth_err(result), AuthError::InvalidPhoneFormat, "{}", phone);
    }
}

#[tokio::test]
async fn test_formatted_phone_number_is_normalized() {
    let f = fixture(0);

    let outcome = f
        .service
        .request_code("+81 90-1234-5678", CodePurpose::Registration)
        .await
        .unwrap();
    assert_eq!(outcome.request.phone_number, PHONE);

    // Verification accepts any formatting of the same number
    f.service
        .verify_and_consume("090-1234-5678", &outcome.request.code, CodePurpose::Registration)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_wrong_code_reports_mismatch_and_keeps_request() {
    let f = fixture(0);

    let outcome = f
        .service
        .request_code(PHONE, CodePurpose::Registration)
        .await
        .unwrap();
    let wrong = if outcome.request.code == "000000" {
        "111111"
    } else {
        "000000"
    };

    let result = f
        .service
        .verify_and_consume(PHONE, wrong, CodePurpose::Registration)
        .await;
    assert_eq!(auth_err(result), AuthError::CodeMismatch);

    // A failed attempt does not retire the code
    f.service
        .verify_and_consume(PHONE, &outcome.request.code, CodePurpose::Registration)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_malformed_code_reports_mismatch() {
    let f = fixture(0);
    f.service
        .request_code(PHONE, CodePurpose::Registration)
        .await
        .unwrap();

    for candidate in ["12345", "1234567", "12345a", ""] {
        let result = f
            .service
            .verify_and_consume(PHONE, candidate, CodePurpose::Registration)
            .await;
        assert_eq!(auth_err(result), AuthError::CodeMismatch, "{:?}", candidate);
    }
}

#[tokio::test]
async fn test_purpose_mismatch_reports_not_found() {
    let f = fixture(0);

    let outcome = f
        .service
        .request_code(PHONE, CodePurpose::Registration)
        .await
        .unwrap();

    let result = f
        .service
        .verify_and_consume(PHONE, &outcome.request.code, CodePurpose::PasswordReset)
        .await;
    assert_eq!(auth_err(result), AuthError::CodeNotFound);
}

#[tokio::test]
async fn test_delivery_failure_is_reported_and_code_kept() {
    let f = fixture_with_sms(0, MockSmsChannel::failing());

    let result = f.service.request_code(PHONE, CodePurpose::Registration).await;
    assert_eq!(auth_err(result), AuthError::DeliveryFailed);

    // The stored code is not rolled back; the next request supersedes it
    assert_eq!(f.verification_repo.len(), 1);
}

#[tokio::test]
async fn test_resend_after_delivery_failure_supersedes() {
    let f = fixture_with_sms(0, MockSmsChannel::failing());
    let _ = f.service.request_code(PHONE, CodePurpose::Registration).await;
    let undelivered = f
        .verification_repo
        .find_by_phone(PHONE)
        .await
        .unwrap()
        .unwrap();

    // Same store, working channel
    let working = fixture(0);
    working.verification_repo.insert_raw(undelivered.clone());
    let outcome = working
        .service
        .request_code(PHONE, CodePurpose::Registration)
        .await
        .unwrap();

    assert_eq!(working.verification_repo.len(), 1);
    let stored = working
        .verification_repo
        .find_by_phone(PHONE)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.code, outcome.request.code);
}

#[tokio::test]
async fn test_resend_cooldown_applies_and_expires() {
    let f = fixture(60);

    f.service
        .request_code(PHONE, CodePurpose::Registration)
        .await
        .unwrap();

    let result = f.service.request_code(PHONE, CodePurpose::Registration).await;
    match auth_err(result) {
        AuthError::RateLimitExceeded { seconds } => {
            assert!(seconds > 0 && seconds <= 60);
        }
        other => panic!("expected rate limit error, got {:?}", other),
    }

    // Back-dating the stored request past the cooldown lets a resend through
    let mut stored = f
        .verification_repo
        .find_by_phone(PHONE)
        .await
        .unwrap()
        .unwrap();
    stored.created_at = stored.created_at - chrono::Duration::seconds(61);
    f.verification_repo.insert_raw(stored);

    f.service
        .request_code(PHONE, CodePurpose::Registration)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_storage_failure_propagates() {
    let user_repo = Arc::new(MockUserRepository::new());
    let verification_repo = Arc::new(MockVerificationRepository::failing());
    let sms = Arc::new(MockSmsChannel::new());
    let service = VerificationService::new(
        user_repo,
        verification_repo,
        sms,
        VerificationServiceConfig {
            code_ttl_minutes: 10,
            resend_cooldown_seconds: 0,
        },
    );

    let result = service.request_code(PHONE, CodePurpose::Registration).await;
    assert!(matches!(result, Err(DomainError::Database { .. })));
}

#[tokio::test]
async fn test_concurrent_verification_consumes_exactly_once() {
    let f = fixture(0);

    let outcome = f
        .service
        .request_code(PHONE, CodePurpose::Registration)
        .await
        .unwrap();
    let code = outcome.request.code.clone();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let service = f.service.clone();
        let code = code.clone();
        handles.push(tokio::spawn(async move {
            service
                .verify_and_consume(PHONE, &code, CodePurpose::Registration)
                .await
        }));
    }

    let mut successes = 0;
    let mut not_found = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(()) => successes += 1,
            Err(DomainError::Auth(AuthError::CodeNotFound)) => not_found += 1,
            Err(other) => panic!("unexpected error: {:?}", other),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(not_found, 7);
    assert!(f.verification_repo.is_empty());
}

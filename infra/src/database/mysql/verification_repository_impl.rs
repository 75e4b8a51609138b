//! MySQL implementation of the VerificationRepository trait.
//!
//! The `verification_requests` table uses the phone number as its primary
//! key, so both mutations here are single statements: replacement is an
//! upsert on that key and consumption is a conditional delete. Neither
//! operation can observe or damage another number's pending request, and
//! concurrent writers serialize on the row without any application-side
//! locking.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use tracing::debug;

use lb_core::domain::entities::verification_request::{CodePurpose, VerificationRequest};
use lb_core::errors::DomainError;
use lb_core::repositories::VerificationRepository;
use lb_shared::utils::phone::mask_phone_number;

/// MySQL implementation of VerificationRepository
pub struct MySqlVerificationRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlVerificationRepository {
    /// Create a new MySQL verification repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_request(row: &sqlx::mysql::MySqlRow) -> Result<VerificationRequest, DomainError> {
        let purpose_str: String = row.try_get("purpose").map_err(|e| DomainError::Database {
            message: format!("Failed to get purpose: {}", e),
        })?;
        let purpose = CodePurpose::parse(&purpose_str).ok_or_else(|| DomainError::Database {
            message: format!("Unknown verification purpose: {}", purpose_str),
        })?;

        Ok(VerificationRequest {
            phone_number: row.try_get("phone_number").map_err(|e| DomainError::Database {
                message: format!("Failed to get phone_number: {}", e),
            })?,
            code: row.try_get("code").map_err(|e| DomainError::Database {
                message: format!("Failed to get code: {}", e),
            })?,
            purpose,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get created_at: {}", e),
                })?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get expires_at: {}", e),
                })?,
        })
    }
}

#[async_trait]
impl VerificationRepository for MySqlVerificationRepository {
    async fn upsert(&self, request: &VerificationRequest) -> Result<(), DomainError> {
        // One statement on the primary key: replaces this number's pending
        // request, if any, and nothing else.
        let query = r#"
            INSERT INTO verification_requests (phone_number, code, purpose, created_at, expires_at)
            VALUES (?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                code = VALUES(code),
                purpose = VALUES(purpose),
                created_at = VALUES(created_at),
                expires_at = VALUES(expires_at)
        "#;

        sqlx::query(query)
            .bind(&request.phone_number)
            .bind(&request.code)
            .bind(request.purpose.as_str())
            .bind(request.created_at)
            .bind(request.expires_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(
                    phone = %mask_phone_number(&request.phone_number),
                    error = %e,
                    "Failed to store verification request"
                );
                DomainError::Database {
                    message: format!("Failed to store verification request: {}", e),
                }
            })?;

        debug!(
            phone = %mask_phone_number(&request.phone_number),
            "Stored verification request"
        );
        Ok(())
    }

    async fn find_by_phone(
        &self,
        phone_number: &str,
    ) -> Result<Option<VerificationRequest>, DomainError> {
        // No expiry filter: the service reports expired codes distinctly
        // from missing ones.
        let query = r#"
            SELECT phone_number, code, purpose, created_at, expires_at
            FROM verification_requests
            WHERE phone_number = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(phone_number)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to load verification request: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_request(&row)?)),
            None => Ok(None),
        }
    }

    async fn consume(&self, phone_number: &str, code: &str) -> Result<bool, DomainError> {
        // The conditional delete is the consumption gate: with N concurrent
        // callers, the row count tells exactly one of them it won.
        let query = r#"
            DELETE FROM verification_requests
            WHERE phone_number = ? AND code = ? AND expires_at > ?
        "#;

        let result = sqlx::query(query)
            .bind(phone_number)
            .bind(code)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!(
                    phone = %mask_phone_number(phone_number),
                    error = %e,
                    "Failed to consume verification request"
                );
                DomainError::Database {
                    message: format!("Failed to consume verification request: {}", e),
                }
            })?;

        let consumed = result.rows_affected() > 0;
        debug!(
            phone = %mask_phone_number(phone_number),
            consumed = consumed,
            "Consumption attempt finished"
        );
        Ok(consumed)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        let query = "DELETE FROM verification_requests WHERE expires_at <= ?";

        let result = sqlx::query(query)
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to delete expired verification requests: {}", e),
            })?;

        Ok(result.rows_affected())
    }
}

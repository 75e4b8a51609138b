//! MySQL implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use lb_core::domain::entities::user::User;
use lb_core::errors::{AuthError, DomainError};
use lb_core::repositories::UserRepository;
use lb_shared::utils::phone::mask_phone_number;

/// MySQL implementation of UserRepository
pub struct MySqlUserRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserRepository {
    /// Create a new MySQL user repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row.try_get("id").map_err(|e| DomainError::Database {
            message: format!("Failed to get id: {}", e),
        })?;

        Ok(User {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Database {
                message: format!("Invalid UUID: {}", e),
            })?,
            phone_number: row.try_get("phone_number").map_err(|e| DomainError::Database {
                message: format!("Failed to get phone_number: {}", e),
            })?,
            password_hash: row.try_get("password_hash").map_err(|e| DomainError::Database {
                message: format!("Failed to get password_hash: {}", e),
            })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get created_at: {}", e),
                })?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::Database {
                    message: format!("Failed to get updated_at: {}", e),
                })?,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_phone(&self, phone_number: &str) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, phone_number, password_hash, created_at, updated_at
            FROM users
            WHERE phone_number = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(phone_number)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Database query failed: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }

    async fn exists_by_phone(&self, phone_number: &str) -> Result<bool, DomainError> {
        let query = r#"
            SELECT EXISTS(
                SELECT 1 FROM users WHERE phone_number = ?
            ) as user_exists
        "#;

        let result = sqlx::query(query)
            .bind(phone_number)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to check user existence: {}", e),
            })?;

        let exists: i8 = result.try_get("user_exists").map_err(|e| DomainError::Database {
            message: format!("Failed to get existence result: {}", e),
        })?;

        Ok(exists == 1)
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let query = r#"
            INSERT INTO users (id, phone_number, password_hash, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(user.id.to_string())
            .bind(&user.phone_number)
            .bind(&user.password_hash)
            .bind(user.created_at)
            .bind(user.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                // The unique key on phone_number is the last line of defense
                // against two registrations racing for the same number.
                if e.as_database_error()
                    .map(|d| d.is_unique_violation())
                    .unwrap_or(false)
                {
                    tracing::warn!(
                        phone = %mask_phone_number(&user.phone_number),
                        "Concurrent registration hit the phone uniqueness constraint"
                    );
                    DomainError::Auth(AuthError::AlreadyRegistered)
                } else {
                    DomainError::Database {
                        message: format!("Failed to create user: {}", e),
                    }
                }
            })?;

        Ok(user)
    }

    async fn update_password(
        &self,
        phone_number: &str,
        password_hash: &str,
    ) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE users
            SET password_hash = ?, updated_at = ?
            WHERE phone_number = ?
        "#;

        let result = sqlx::query(query)
            .bind(password_hash)
            .bind(Utc::now())
            .bind(phone_number)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Database {
                message: format!("Failed to update password: {}", e),
            })?;

        Ok(result.rows_affected() > 0)
    }
}

//! In-memory mock implementation of the user repository.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError};

use super::UserRepository;

/// Mutex-guarded map of accounts keyed by phone number, for tests.
#[derive(Default)]
pub struct MockUserRepository {
    users: Mutex<HashMap<String, User>>,
    should_fail: bool,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository whose every operation reports a storage failure.
    pub fn failing() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
            should_fail: true,
        }
    }

    /// Seed an account directly, bypassing the create checks.
    pub fn insert_user(&self, user: User) {
        self.users
            .lock()
            .unwrap()
            .insert(user.phone_number.clone(), user);
    }

    fn check_failure(&self) -> Result<(), DomainError> {
        if self.should_fail {
            return Err(DomainError::Database {
                message: "mock user repository failure".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_phone(&self, phone_number: &str) -> Result<Option<User>, DomainError> {
        self.check_failure()?;
        Ok(self.users.lock().unwrap().get(phone_number).cloned())
    }

    async fn exists_by_phone(&self, phone_number: &str) -> Result<bool, DomainError> {
        self.check_failure()?;
        Ok(self.users.lock().unwrap().contains_key(phone_number))
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        self.check_failure()?;
        let mut users = self.users.lock().unwrap();
        if users.contains_key(&user.phone_number) {
            return Err(AuthError::AlreadyRegistered.into());
        }
        users.insert(user.phone_number.clone(), user.clone());
        Ok(user)
    }

    async fn update_password(
        &self,
        phone_number: &str,
        password_hash: &str,
    ) -> Result<bool, DomainError> {
        self.check_failure()?;
        let mut users = self.users.lock().unwrap();
        match users.get_mut(phone_number) {
            Some(user) => {
                user.password_hash = password_hash.to_string();
                user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

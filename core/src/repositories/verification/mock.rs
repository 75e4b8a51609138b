//! In-memory mock implementation of the verification repository.
//!
//! A single mutex guards the map, so `upsert` and `consume` have the same
//! atomicity the MySQL implementation gets from single-statement writes.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::verification_request::VerificationRequest;
use crate::errors::DomainError;

use super::VerificationRepository;

/// Mutex-guarded map of pending requests keyed by phone number, for tests.
#[derive(Default)]
pub struct MockVerificationRepository {
    requests: Mutex<HashMap<String, VerificationRequest>>,
    should_fail: bool,
}

impl MockVerificationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository whose every operation reports a storage failure.
    pub fn failing() -> Self {
        Self {
            requests: Mutex::new(HashMap::new()),
            should_fail: true,
        }
    }

    /// Number of stored requests, live or expired.
    pub fn len(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Overwrite a stored request directly, e.g. to back-date its expiry.
    pub fn insert_raw(&self, request: VerificationRequest) {
        self.requests
            .lock()
            .unwrap()
            .insert(request.phone_number.clone(), request);
    }

    fn check_failure(&self) -> Result<(), DomainError> {
        if self.should_fail {
            return Err(DomainError::Database {
                message: "mock verification repository failure".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl VerificationRepository for MockVerificationRepository {
    async fn upsert(&self, request: &VerificationRequest) -> Result<(), DomainError> {
        self.check_failure()?;
        self.requests
            .lock()
            .unwrap()
            .insert(request.phone_number.clone(), request.clone());
        Ok(())
    }

    async fn find_by_phone(
        &self,
        phone_number: &str,
    ) -> Result<Option<VerificationRequest>, DomainError> {
        self.check_failure()?;
        Ok(self.requests.lock().unwrap().get(phone_number).cloned())
    }

    async fn consume(&self, phone_number: &str, code: &str) -> Result<bool, DomainError> {
        self.check_failure()?;
        let mut requests = self.requests.lock().unwrap();
        let matches = requests
            .get(phone_number)
            .map(|r| r.code == code && !r.is_expired())
            .unwrap_or(false);
        if matches {
            requests.remove(phone_number);
        }
        Ok(matches)
    }

    async fn delete_expired(&self, now: DateTime<Utc>) -> Result<u64, DomainError> {
        self.check_failure()?;
        let mut requests = self.requests.lock().unwrap();
        let before = requests.len();
        requests.retain(|_, r| r.expires_at > now);
        Ok((before - requests.len()) as u64)
    }
}

//! # LINEBUZZ Infrastructure
//!
//! Concrete implementations behind the core crate's trait seams:
//!
//! - **Database**: MySQL repositories using SQLx
//! - **SMS**: Twilio delivery over HTTP, plus a console sender for
//!   development and tests

use thiserror::Error;

pub mod database;
pub mod sms;

/// Errors raised by infrastructure components
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("SMS error: {0}")]
    Sms(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
